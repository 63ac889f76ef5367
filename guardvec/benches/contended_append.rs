use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use guardvec::SerializedVec;
use std::thread;

const APPENDS: u64 = 1_000;

fn benchmark_uncontended_append(c: &mut Criterion) {
    c.benchmark_group("serialized_vec").bench_function("uncontended_append", |b| {
        b.iter_batched(
            SerializedVec::<u64>::new,
            |values| {
                for i in 0..APPENDS {
                    values.append(black_box(i)).unwrap();
                }
                values
            },
            BatchSize::SmallInput,
        );
    });
}

fn benchmark_contended_append(c: &mut Criterion) {
    for threads in [2u64, 4, 8] {
        c.benchmark_group("serialized_vec")
            .bench_function(format!("contended_append_{threads}_threads"), |b| {
                b.iter_batched(
                    SerializedVec::<u64>::new,
                    |values| {
                        thread::scope(|scope| {
                            for id in 0..threads {
                                let values = &values;
                                scope.spawn(move || {
                                    for i in 0..APPENDS {
                                        values.append(black_box(id * APPENDS + i)).unwrap();
                                    }
                                });
                            }
                        });
                        values
                    },
                    BatchSize::SmallInput,
                );
            });
    }
}

fn benchmark_get(c: &mut Criterion) {
    let values = SerializedVec::<u64>::new();
    for i in 0..APPENDS {
        values.append(i).unwrap();
    }

    c.benchmark_group("serialized_vec").bench_function("get", |b| {
        b.iter(|| values.get(black_box(500)).unwrap());
    });
}

criterion_group!(
    benches,
    benchmark_uncontended_append,
    benchmark_contended_append,
    benchmark_get
);
criterion_main!(benches);
