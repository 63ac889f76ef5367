//! A `SerializedVec` is an ordered, growable sequence shared between threads.

use crate::alloc::{RawAllocator, SystemAllocator};
use crate::error::{Error, Result};
use crate::raw::RawSeq;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Ordered sequence whose operations are serialized by a mutex.
///
/// Every operation holds the lock for its whole duration and releases it on every exit path, so
/// each call appears to take effect atomically. Appends from different threads land in the order
/// in which the lock was granted. Raw storage comes from the allocator `A`, which sees one
/// acquisition per growth step and one release per retired region.
///
/// ## Examples
///
/// ```
/// use guardvec::SerializedVec;
/// use std::thread;
///
/// let values: SerializedVec<u32> = SerializedVec::new();
/// thread::scope(|scope| {
///     for id in 1..=4 {
///         let values = &values;
///         scope.spawn(move || values.append(id).unwrap());
///     }
/// });
/// assert_eq!(4, values.len());
/// ```
pub struct SerializedVec<T, A: RawAllocator<Value = T> = SystemAllocator<T>> {
    inner: Mutex<RawSeq<T, A>>,
}

impl<T, A: RawAllocator<Value = T> + Default> SerializedVec<T, A> {
    /// Creates an empty sequence using the default instance of `A`. Nothing is allocated until
    /// the first append.
    pub fn new() -> Self {
        Self::with_allocator(A::default())
    }
}

impl<T, A: RawAllocator<Value = T>> SerializedVec<T, A> {
    /// Creates an empty sequence that acquires its storage from `alloc`.
    ///
    /// ## Examples
    ///
    /// ```
    /// use guardvec::{SerializedVec, SystemAllocator};
    ///
    /// let values = SerializedVec::with_allocator(SystemAllocator::<u8>::new());
    /// assert!(values.is_empty());
    /// ```
    pub const fn with_allocator(alloc: A) -> Self {
        Self {
            inner: Mutex::new(RawSeq::new(alloc)),
        }
    }

    /// Moves `value` into the last position.
    ///
    /// Fails with [`Error::Alloc`] when the allocator cannot provide room, in which case the
    /// sequence is left exactly as it was and `value` is dropped.
    pub fn append(&self, value: T) -> Result<()> {
        self.lock().push(value).map_err(Error::from)
    }

    /// Returns a copy of the value at `index`, or [`Error::Data`] if `index` is out of range.
    pub fn get(&self, index: usize) -> Result<T>
    where
        T: Clone,
    {
        let seq = self.lock();
        match seq.get(index) {
            Some(value) => Ok(value.clone()),
            None => Err(Error::data(format!(
                "index {index} is out of range for sequence of length {}",
                seq.len()
            ))),
        }
    }

    /// Number of values currently stored.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of values the current storage can hold without growing.
    pub fn capacity(&self) -> usize {
        self.lock().capacity()
    }

    // A panic while the lock is held (e.g. in `T::clone`) never leaves the storage half updated,
    // so a poisoned lock is safe to reuse.
    #[inline]
    fn lock(&self) -> MutexGuard<'_, RawSeq<T, A>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T, A: RawAllocator<Value = T> + Default> Default for SerializedVec<T, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, A: RawAllocator<Value = T>> fmt::Debug for SerializedVec<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let seq = self.lock();
        f.debug_struct("SerializedVec")
            .field("len", &seq.len())
            .field("capacity", &seq.capacity())
            .finish()
    }
}
