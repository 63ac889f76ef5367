#![doc = include_str!("../README.md")]

pub mod config;
mod error;

use crate::config::{DriverConfig, Sink};
use guardvec::SerializedVec;
use guardvec_allocator::{DiagnosticSink, LoggingAllocator};
use log::{debug, info};
use std::fmt;
use std::thread;

// re-exports
pub use error::{Error, Result};

pub type Values<S> = SerializedVec<i32, LoggingAllocator<i32, S>>;

/// Owns the shared sequence for the duration of one exercise. Dropping the driver drops the
/// sequence, which releases its storage through the logging allocator.
pub struct Driver<S: DiagnosticSink> {
    config: DriverConfig,
    values: Values<S>,
}

impl Driver<Sink> {
    /// Driver whose diagnostics go wherever `config.diagnostics` points.
    pub fn new(config: DriverConfig) -> Self {
        let sink = Sink::from(config.diagnostics);
        Self::with_sink(config, sink)
    }
}

impl<S: DiagnosticSink + Send> Driver<S> {
    pub fn with_sink(config: DriverConfig, sink: S) -> Self {
        Self {
            config,
            values: SerializedVec::with_allocator(LoggingAllocator::with_sink(sink)),
        }
    }

    pub const fn values(&self) -> &Values<S> {
        &self.values
    }

    /// Runs every worker to completion.
    pub fn spawn_workers(&self) -> Result<()> {
        info!(
            "starting {} workers with {} appends each",
            self.config.workers, self.config.appends_per_worker
        );
        thread::scope(|scope| {
            let handles: Vec<_> = (1..=self.config.workers)
                .map(|id| (id, scope.spawn(move || self.worker(id))))
                .collect();
            // join everyone before reporting the first failure
            let mut result = Ok(());
            for (id, handle) in handles {
                let outcome = handle.join().map_err(|_| Error::WorkerPanicked(id)).and_then(|res| res);
                if result.is_ok() {
                    result = outcome;
                }
            }
            result
        })
    }

    /// Reads back the aggregate state.
    pub fn report(&self) -> Result<Report> {
        let report = Report {
            size: self.values.len(),
            first: self.values.get(0)?,
        };
        info!("workers done, {} elements stored", report.size);
        Ok(report)
    }

    fn worker(&self, id: u32) -> Result<()> {
        for index in 0..self.config.appends_per_worker {
            if index > 0 {
                thread::sleep(self.config.pacing);
            }
            let value = value_of(id, index)?;
            self.values.append(value)?;
            debug!("worker {id} appended {value}");
        }
        Ok(())
    }
}

fn value_of(worker: u32, index: u32) -> Result<i32> {
    i64::from(worker)
        .checked_mul(100)
        .and_then(|value| value.checked_add(i64::from(index)))
        .and_then(|value| i32::try_from(value).ok())
        .ok_or(Error::ValueOutOfRange { worker, index })
}

/// Aggregate state observed once all workers are done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    pub size: usize,
    pub first: i32,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "total elements: {}", self.size)?;
        write!(f, "first element: {}", self.first)
    }
}

/// Runs one complete exercise and returns what was observed.
pub fn run(config: DriverConfig) -> Result<Report> {
    let driver = Driver::new(config);
    driver.spawn_workers()?;
    driver.report()
}
