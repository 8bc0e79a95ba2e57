use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Input rejected before anything was written (empty text, reversed range).
    #[error("invalid annotation: {0}")]
    Validation(String),

    #[error("annotation not found: {0}")]
    NotFound(String),

    /// The store file exists but is not a valid annotation document.
    #[error("annotation store at {} is corrupt: {message}", path.display())]
    CorruptStore { path: PathBuf, message: String },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
