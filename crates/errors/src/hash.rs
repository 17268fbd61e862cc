//! Digest computation error types

use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum HashError {
    #[error("cannot open {path}: {message}")]
    Open { path: String, message: String },

    #[error("read failed for {path}: {message}")]
    Read { path: String, message: String },

    #[error("invalid digest: {message}")]
    InvalidDigest { message: String },
}

impl HashError {
    /// Classify an `io::Error` raised while opening a file
    #[must_use]
    pub fn open(err: &std::io::Error, path: &std::path::Path) -> Self {
        Self::Open {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }

    /// Classify an `io::Error` raised mid-stream
    #[must_use]
    pub fn read(err: &std::io::Error, path: &std::path::Path) -> Self {
        Self::Read {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}
