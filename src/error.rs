use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BenchError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to open {}: {source}", path.display())]
    OpenFailed { path: PathBuf, source: io::Error },

    #[error("Could not open entropy source {}: {source}", path.display())]
    EntropyUnavailable { path: PathBuf, source: io::Error },

    #[error("Failed to read from {}: {source}", path.display())]
    ReadFailed { path: PathBuf, source: io::Error },

    #[error("Failed to write to {}: {source}", path.display())]
    WriteFailed { path: PathBuf, source: io::Error },

    #[error("{} ended after {copied} of {expected} bytes", path.display())]
    SourceExhausted {
        path: PathBuf,
        copied: usize,
        expected: usize,
    },

    #[error("{0} MB does not fit in memory addressing")]
    SizeTooLarge(usize),

    #[error("Failed to allocate {0} bytes")]
    Allocation(usize),
}

pub type Result<T> = std::result::Result<T, BenchError>;

impl BenchError {
    /// Startup bookkeeping failures terminate the process with exit code 1.
    pub fn is_fatal(&self) -> bool {
        matches!(self, BenchError::Allocation(_))
    }
}
