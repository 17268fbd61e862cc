//! Scan pipeline error types

use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum ScanError {
    #[error("sidecar unreadable: {path}: {message}")]
    SidecarRead { path: String, message: String },

    #[error("sidecar write failed: {path}: {message}")]
    SidecarWrite { path: String, message: String },

    #[error("cannot load manifest {path}: {message}")]
    ManifestLoad { path: String, message: String },

    #[error("worker task failed: {message}")]
    TaskJoin { message: String },
}

impl ScanError {
    #[must_use]
    pub fn sidecar_read(err: &std::io::Error, path: &std::path::Path) -> Self {
        Self::SidecarRead {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }

    #[must_use]
    pub fn sidecar_write(err: &std::io::Error, path: &std::path::Path) -> Self {
        Self::SidecarWrite {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }

    #[must_use]
    pub fn manifest_load(err: &std::io::Error, path: &std::path::Path) -> Self {
        Self::ManifestLoad {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}
