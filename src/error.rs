//! Request failure taxonomy
//!
//! Every failure raised while answering a media request is one of these
//! variants. They are caught at the request boundary and mapped onto an
//! HTTP status, never propagated to the connection.

use hyper::StatusCode;
use thiserror::Error;

/// Failure while serving a file
#[derive(Debug, Error)]
pub enum MediaError {
    /// Target file is absent (or resolves outside the root)
    #[error("File not found")]
    NotFound,

    /// Range header could not be parsed
    #[error("Malformed Range header: {0}")]
    MalformedRange(String),

    /// Any other read failure
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl MediaError {
    /// HTTP status this failure is surfaced as
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MalformedRange(_) | Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Classify an I/O error from resolving a request path
    ///
    /// Every way a path can fail to name an existing file (missing entry,
    /// a file used as a directory, NUL bytes, overlong names) is `NotFound`.
    pub fn from_io(err: std::io::Error) -> Self {
        use std::io::ErrorKind;

        match err.kind() {
            ErrorKind::NotFound
            | ErrorKind::NotADirectory
            | ErrorKind::InvalidInput
            | ErrorKind::InvalidFilename => Self::NotFound,
            _ => Self::Io(err),
        }
    }
}
