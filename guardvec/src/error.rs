use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

/// Failure to obtain raw storage from an allocator.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocError {
    #[error("out of memory acquiring storage for {elements} elements")]
    OutOfMemory { elements: usize },
    #[error("capacity overflow acquiring storage for {elements} elements")]
    CapacityOverflow { elements: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The requested data does not exist, e.g. an out of range index.
    #[error("{0}")]
    Data(String),
    #[error(transparent)]
    Alloc(#[from] AllocError),
}

impl Error {
    pub fn data(message: impl Into<String>) -> Self {
        Self::Data(message.into())
    }

    pub const fn is_data(&self) -> bool {
        matches!(self, Error::Data(_))
    }
}
