use guardvec::SerializedVec;
use guardvec_allocator::{Encoder, LoggingAllocator, Stdout};

fn main() {
    let values = SerializedVec::with_allocator(LoggingAllocator::<u64, _>::with_sink(Stdout::new(Encoder::Json)));
    std::thread::scope(|scope| {
        for id in 0..4u64 {
            let values = &values;
            scope.spawn(move || {
                for i in 0..8 {
                    values.append(id * 100 + i).unwrap();
                }
            });
        }
    });
    assert_eq!(32, values.len());
}
