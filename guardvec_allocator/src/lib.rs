#![doc = include_str!("../README.md")]

mod event;
mod sink;

use guardvec::alloc::{acquire_in, release_in};
use guardvec::{AllocError, RawAllocator};
use log::warn;
use std::fmt;
use std::marker::PhantomData;
use std::ptr::NonNull;

// re-exports
pub use event::{AllocationEvent, Encoder, EventKind};
pub use sink::{DiagnosticSink, Log, Recorder, Stderr, Stdout};

#[cfg(feature = "jemalloc")]
const POOL: jemallocator::Jemalloc = jemallocator::Jemalloc;
#[cfg(all(feature = "mimalloc", not(feature = "jemalloc")))]
const POOL: mimalloc::MiMalloc = mimalloc::MiMalloc;
#[cfg(not(any(feature = "jemalloc", feature = "mimalloc")))]
const POOL: std::alloc::System = std::alloc::System;

/// This allocator emits one diagnostic line to its sink for every acquisition and release of raw
/// storage. The storage itself is delegated to the concrete allocator (`std::alloc::System` by
/// default, jemalloc or mimalloc when the matching feature is enabled).
///
/// A failed acquisition emits nothing: the error is returned before any line is written.
///
/// ```no_run
/// use guardvec::SerializedVec;
/// use guardvec_allocator::LoggingAllocator;
///
/// let values = SerializedVec::with_allocator(LoggingAllocator::<i32>::new());
/// values.append(42).unwrap(); // prints "acquiring storage for 1 elements"
/// ```
pub struct LoggingAllocator<T, S = Stdout> {
    sink: S,
    _marker: PhantomData<fn() -> T>,
}

impl<T> LoggingAllocator<T> {
    /// Logging allocator that writes plain text lines to standard output.
    pub const fn new() -> Self {
        Self::with_sink(Stdout::new(Encoder::Text))
    }
}

impl<T, S> LoggingAllocator<T, S> {
    pub const fn with_sink(sink: S) -> Self {
        Self {
            sink,
            _marker: PhantomData,
        }
    }

    pub const fn sink(&self) -> &S {
        &self.sink
    }
}

impl<T, S: Default> Default for LoggingAllocator<T, S> {
    fn default() -> Self {
        Self::with_sink(S::default())
    }
}

impl<T, S: Clone> Clone for LoggingAllocator<T, S> {
    fn clone(&self) -> Self {
        Self::with_sink(self.sink.clone())
    }
}

impl<T, S: Copy> Copy for LoggingAllocator<T, S> {}

impl<T, S: fmt::Debug> fmt::Debug for LoggingAllocator<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggingAllocator")
            .field("type", &std::any::type_name::<T>())
            .field("sink", &self.sink)
            .finish()
    }
}

unsafe impl<T, S: DiagnosticSink> RawAllocator for LoggingAllocator<T, S> {
    type Value = T;

    fn acquire(&self, n: usize) -> Result<NonNull<T>, AllocError> {
        let ptr = acquire_in::<T>(&POOL, n).inspect_err(|err| warn!("{err}"))?;
        self.sink.emit(&AllocationEvent::acquire::<T>(n));
        Ok(ptr)
    }

    unsafe fn release(&self, ptr: NonNull<T>, n: usize) {
        unsafe { release_in(&POOL, ptr, n) };
        self.sink.emit(&AllocationEvent::release::<T>(n));
    }
}
