//! Common error types for enveye.

use thiserror::Error;

/// Common error type for enveye operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Missing required input: {0}")]
    MissingInput(String),

    #[error("Failed to get executable path: {0}")]
    ExecutableLocation(String),

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("server returned {status}: {body}")]
    UploadStatus { status: String, body: String },

    #[error("request failed: {0}")]
    UploadTransport(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias using common Error.
pub type Result<T> = std::result::Result<T, Error>;

impl From<anyhow::Error> for Error {
    fn from(e: anyhow::Error) -> Self {
        Error::Other(e.to_string())
    }
}
