use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

/// Custom error types for the picsort-core library
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A required directory is missing
    #[error("Directory {0} does not exist")]
    MissingDirectory(PathBuf),

    /// File name is not valid UTF-8
    #[error("File name is not valid UTF-8: {0}")]
    InvalidFileName(PathBuf),

    /// Collision-attempt bound exceeded while resolving a destination name
    #[error("Exhausted {attempts} destination name attempts for {path}")]
    NamespaceExhausted { path: PathBuf, attempts: u32 },
}
