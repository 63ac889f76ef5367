//! Raw storage capability consumed by [`SerializedVec`](crate::SerializedVec).

use crate::error::AllocError;
use std::alloc::{GlobalAlloc, Layout, System};
use std::fmt;
use std::marker::PhantomData;
use std::ptr::NonNull;

/// Hands out raw, uninitialized storage for a fixed element type.
///
/// An allocator never constructs or drops values, it only traffics in storage. Copies of an
/// allocator must be interchangeable: storage acquired through one copy may be released through
/// another.
///
/// ## Safety
///
/// A successful `acquire(n)` must return a pointer aligned for `Self::Value` that is valid for
/// reads and writes of `n` values until it is passed back to `release` with the same `n`.
pub unsafe trait RawAllocator {
    type Value;

    /// Acquire storage sufficient for `n` contiguous values.
    fn acquire(&self, n: usize) -> Result<NonNull<Self::Value>, AllocError>;

    /// Return storage previously obtained from [`RawAllocator::acquire`].
    ///
    /// ## Safety
    ///
    /// `ptr` must have been returned by `acquire(n)` on this allocator (or a copy of it) and must
    /// not be used after this call.
    unsafe fn release(&self, ptr: NonNull<Self::Value>, n: usize);
}

/// Layout of `n` contiguous values of `T`.
pub fn array_layout<T>(n: usize) -> Result<Layout, AllocError> {
    Layout::array::<T>(n).map_err(|_| AllocError::CapacityOverflow { elements: n })
}

/// Acquire storage for `n` values of `T` from a raw `pool`.
///
/// Zero sized requests never reach the pool and yield a dangling, well aligned pointer.
pub fn acquire_in<T>(pool: &impl GlobalAlloc, n: usize) -> Result<NonNull<T>, AllocError> {
    let layout = array_layout::<T>(n)?;
    if layout.size() == 0 {
        return Ok(NonNull::dangling());
    }
    // layout has a non-zero size
    let ptr = unsafe { pool.alloc(layout) };
    NonNull::new(ptr.cast::<T>()).ok_or(AllocError::OutOfMemory { elements: n })
}

/// Return storage for `n` values of `T` to a raw `pool`.
///
/// ## Safety
///
/// `ptr` must come from [`acquire_in`] on the same `pool` with the same `n`.
pub unsafe fn release_in<T>(pool: &impl GlobalAlloc, ptr: NonNull<T>, n: usize) {
    // the layout was valid when the storage was acquired
    let layout = unsafe { Layout::array::<T>(n).unwrap_unchecked() };
    if layout.size() != 0 {
        unsafe { pool.dealloc(ptr.as_ptr().cast::<u8>(), layout) }
    }
}

/// Allocator that delegates straight to [`std::alloc::System`] without any instrumentation.
pub struct SystemAllocator<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> SystemAllocator<T> {
    pub const fn new() -> Self {
        Self { _marker: PhantomData }
    }
}

impl<T> Default for SystemAllocator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for SystemAllocator<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for SystemAllocator<T> {}

impl<T> fmt::Debug for SystemAllocator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SystemAllocator")
    }
}

unsafe impl<T> RawAllocator for SystemAllocator<T> {
    type Value = T;

    fn acquire(&self, n: usize) -> Result<NonNull<T>, AllocError> {
        acquire_in(&System, n)
    }

    unsafe fn release(&self, ptr: NonNull<T>, n: usize) {
        unsafe { release_in(&System, ptr, n) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_is_aligned_and_writable() {
        let alloc = SystemAllocator::<u64>::new();
        let ptr = alloc.acquire(8).unwrap();
        assert!(ptr.as_ptr().is_aligned());
        unsafe {
            for i in 0..8 {
                ptr.as_ptr().add(i).write(i as u64);
            }
            assert_eq!(7, ptr.as_ptr().add(7).read());
            alloc.release(ptr, 8);
        }
    }

    #[test]
    fn zero_sized_requests_skip_the_pool() {
        let alloc = SystemAllocator::<u32>::new();
        let ptr = alloc.acquire(0).unwrap();
        assert_eq!(NonNull::dangling(), ptr);
        unsafe { alloc.release(ptr, 0) };

        let unit = SystemAllocator::<()>::new();
        let ptr = unit.acquire(1024).unwrap();
        assert_eq!(NonNull::dangling(), ptr);
        unsafe { unit.release(ptr, 1024) };
    }

    #[test]
    fn overflowing_request_is_rejected() {
        let alloc = SystemAllocator::<u64>::new();
        assert_eq!(
            Err(AllocError::CapacityOverflow { elements: usize::MAX }),
            alloc.acquire(usize::MAX)
        );
    }
}
