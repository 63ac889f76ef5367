use crate::alloc::RawAllocator;
use crate::error::AllocError;
use log::debug;
use std::mem;
use std::ptr::{self, NonNull};
use std::slice;

/// Growable storage for `T` backed by a [`RawAllocator`].
///
/// Cells `[0, len)` are initialized, cells `[len, cap)` are not. Not synchronized, the owner is
/// expected to serialize access.
pub(crate) struct RawSeq<T, A: RawAllocator<Value = T>> {
    ptr: NonNull<T>,
    cap: usize,
    len: usize,
    alloc: A,
}

// RawSeq owns its values, the pointer is never shared outside of it.
unsafe impl<T: Send, A: RawAllocator<Value = T> + Send> Send for RawSeq<T, A> {}

impl<T, A: RawAllocator<Value = T>> RawSeq<T, A> {
    pub(crate) const fn new(alloc: A) -> Self {
        Self {
            ptr: NonNull::dangling(),
            cap: 0,
            len: 0,
            alloc,
        }
    }

    #[inline]
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) const fn capacity(&self) -> usize {
        self.cap
    }

    #[inline]
    pub(crate) fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    /// Move `value` into the last position. On error nothing has changed.
    pub(crate) fn push(&mut self, value: T) -> Result<(), AllocError> {
        if self.len == self.cap {
            self.grow()?;
        }
        // len < cap after a successful grow
        unsafe { self.ptr.as_ptr().add(self.len).write(value) };
        self.len += 1;
        Ok(())
    }

    fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    fn grow(&mut self) -> Result<(), AllocError> {
        let new_cap = match self.cap {
            0 => 1,
            cap => cap
                .checked_mul(2)
                .ok_or(AllocError::CapacityOverflow { elements: usize::MAX })?,
        };
        let new_ptr = self.alloc.acquire(new_cap)?;
        debug!("growing sequence from {} to {} elements", self.cap, new_cap);

        unsafe { ptr::copy_nonoverlapping(self.ptr.as_ptr(), new_ptr.as_ptr(), self.len) };
        // swap in the new region before releasing so a panicking allocator can't leave us
        // pointing at freed storage
        let old_ptr = mem::replace(&mut self.ptr, new_ptr);
        let old_cap = mem::replace(&mut self.cap, new_cap);
        if old_cap > 0 {
            unsafe { self.alloc.release(old_ptr, old_cap) };
        }
        Ok(())
    }
}

impl<T, A: RawAllocator<Value = T>> Drop for RawSeq<T, A> {
    fn drop(&mut self) {
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.ptr.as_ptr(), self.len));
            if self.cap > 0 {
                self.alloc.release(self.ptr, self.cap);
            }
        }
    }
}
