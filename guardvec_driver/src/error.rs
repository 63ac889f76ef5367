use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Sequence(#[from] guardvec::Error),
    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),
    #[error("worker {0} panicked")]
    WorkerPanicked(u32),
    #[error("value {index} of worker {worker} does not fit in an i32")]
    ValueOutOfRange { worker: u32, index: u32 },
}

impl Error {
    /// True for errors caused by asking for data that isn't there.
    pub const fn is_data(&self) -> bool {
        matches!(self, Error::Sequence(err) if err.is_data())
    }
}
