#![doc = include_str!("../README.md")]

pub mod alloc;
mod error;
mod raw;
mod sequence;

// re-exports
pub use alloc::{RawAllocator, SystemAllocator};
pub use error::{AllocError, Error, Result};
pub use sequence::SerializedVec;
