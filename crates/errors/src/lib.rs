#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Error types for treesum
//!
//! Fine-grained error types organized by domain, with a single root
//! [`Error`] for cross-crate boundaries.

use thiserror::Error;

pub mod hash;
pub mod scan;

pub use hash::HashError;
pub use scan::ScanError;

/// Generic error type for cross-crate boundaries
#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("hash error: {0}")]
    Hash(#[from] HashError),

    #[error("scan error: {0}")]
    Scan(#[from] ScanError),

    #[error("internal error: {0}")]
    Internal(String),

    #[error("I/O error: {message}")]
    Io {
        kind: std::io::ErrorKind,
        message: String,
        path: Option<std::path::PathBuf>,
    },
}

impl Error {
    /// Create an internal error with a message
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Create an Io error with an associated path
    pub fn io_with_path(err: &std::io::Error, path: impl Into<std::path::PathBuf>) -> Self {
        Self::Io {
            kind: err.kind(),
            message: err.to_string(),
            path: Some(path.into()),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            kind: err.kind(),
            message: err.to_string(),
            path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_preserves_path() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::io_with_path(&io, "/tmp/x");
        match err {
            Error::Io { kind, path, .. } => {
                assert_eq!(kind, std::io::ErrorKind::PermissionDenied);
                assert_eq!(path.unwrap(), std::path::PathBuf::from("/tmp/x"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn domain_errors_convert_to_root() {
        let err: Error = HashError::Open {
            path: "a/b".into(),
            message: "no such file".into(),
        }
        .into();
        assert!(matches!(err, Error::Hash(_)));
    }
}
