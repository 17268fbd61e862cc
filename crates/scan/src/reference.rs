//! Reference capabilities: what a computed digest is compared against
//!
//! Both scan modes share one pipeline; the mode lives entirely in the
//! [`Reference`] implementation handed to it. Self-checking mode resolves
//! against per-file sidecar digests on disk, manifest mode against an
//! in-memory set loaded once at startup.

use crate::outcome::Outcome;
use std::collections::HashSet;
use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::warn;
use treesum_errors::{Error, ScanError};
use treesum_hash::Digest;

/// Suffix of sidecar digest files
pub const SIDECAR_SUFFIX: &str = ".b3";

/// A lookup a worker resolves each computed digest against.
pub trait Reference: Send + Sync + 'static {
    /// Whether the walker should admit this path as a scan candidate.
    fn is_candidate(&self, path: &Path) -> bool {
        let _ = path;
        true
    }

    /// Classify a computed digest for the given file.
    ///
    /// Errors are reserved for genuine I/O faults (an unreadable sidecar);
    /// an absent reference is an [`Outcome`], not an error.
    fn resolve(
        &self,
        path: &Path,
        computed: &Digest,
    ) -> impl Future<Output = Result<Outcome, Error>> + Send;
}

/// Self-checking mode: one sidecar digest file per scanned file.
#[derive(Debug, Clone)]
pub struct SidecarReference {
    suffix: String,
}

impl SidecarReference {
    #[must_use]
    pub fn new() -> Self {
        Self::with_suffix(SIDECAR_SUFFIX)
    }

    #[must_use]
    pub fn with_suffix(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }

    /// Sidecar path for a scanned file: `<path><suffix>`.
    #[must_use]
    pub fn sidecar_path(&self, path: &Path) -> PathBuf {
        let mut name = path.as_os_str().to_os_string();
        name.push(&self.suffix);
        PathBuf::from(name)
    }
}

impl Default for SidecarReference {
    fn default() -> Self {
        Self::new()
    }
}

impl Reference for SidecarReference {
    fn is_candidate(&self, path: &Path) -> bool {
        // Sidecar files are never themselves hashed
        !path.to_string_lossy().ends_with(&self.suffix)
    }

    async fn resolve(&self, path: &Path, computed: &Digest) -> Result<Outcome, Error> {
        let sidecar = self.sidecar_path(path);
        match fs::read(&sidecar).await {
            Ok(stored) => {
                // Verbatim comparison; a trailing newline is a conflict
                let stored = String::from_utf8_lossy(&stored).into_owned();
                if stored == computed.to_hex() {
                    Ok(Outcome::Match)
                } else {
                    Ok(Outcome::Conflict {
                        computed: computed.clone(),
                        stored,
                    })
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                if let Err(e) = write_sidecar(&sidecar, &computed.to_hex()).await {
                    // Best effort: the file still counts as Added
                    warn!(
                        sidecar = %sidecar.display(),
                        error = %ScanError::sidecar_write(&e, &sidecar),
                        "failed to record sidecar digest"
                    );
                }
                Ok(Outcome::Added(computed.clone()))
            }
            Err(e) => Err(ScanError::sidecar_read(&e, &sidecar).into()),
        }
    }
}

/// Write a freshly computed digest as the sidecar's entire content,
/// read-only so casual edits do not silently retarget the reference.
async fn write_sidecar(sidecar: &Path, digest_hex: &str) -> std::io::Result<()> {
    fs::write(sidecar, digest_hex).await?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(sidecar, std::fs::Permissions::from_mode(0o444)).await?;
    }
    Ok(())
}

/// Manifest mode: an immutable set of known-good digests.
#[derive(Debug, Clone, Default)]
pub struct ManifestReference {
    digests: HashSet<String>,
}

impl ManifestReference {
    /// Load a tab-delimited manifest whose first column per row is a hex
    /// digest. Later columns are ignored, blank rows are skipped, and
    /// duplicate digests collapse.
    ///
    /// # Errors
    /// Fails if the manifest cannot be read; the caller aborts the run
    /// before any scanning starts since there is nothing to compare against.
    pub async fn load(path: &Path) -> Result<Self, Error> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| ScanError::manifest_load(&e, path))?;
        Ok(Self::parse(&content))
    }

    /// Build the set from manifest text.
    #[must_use]
    pub fn parse(content: &str) -> Self {
        let digests = content
            .lines()
            .filter_map(|line| line.split('\t').next())
            .filter(|field| !field.is_empty())
            .map(str::to_owned)
            .collect();
        Self { digests }
    }

    #[must_use]
    pub fn contains(&self, digest_hex: &str) -> bool {
        self.digests.contains(digest_hex)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.digests.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.digests.is_empty()
    }
}

impl Reference for ManifestReference {
    async fn resolve(&self, _path: &Path, computed: &Digest) -> Result<Outcome, Error> {
        if self.contains(&computed.to_hex()) {
            Ok(Outcome::Found)
        } else {
            Ok(Outcome::Missing)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sidecar_path_appends_suffix() {
        let sidecar = SidecarReference::new();
        assert_eq!(
            sidecar.sidecar_path(Path::new("dir/file.bin")),
            PathBuf::from("dir/file.bin.b3")
        );
    }

    #[test]
    fn sidecar_files_are_not_candidates() {
        let sidecar = SidecarReference::new();
        assert!(sidecar.is_candidate(Path::new("dir/file.bin")));
        assert!(!sidecar.is_candidate(Path::new("dir/file.bin.b3")));
    }

    #[test]
    fn manifest_parse_takes_first_column() {
        let manifest = ManifestReference::parse("abc\tname\tsize\ndef\n\nabc\n");
        assert_eq!(manifest.len(), 2);
        assert!(manifest.contains("abc"));
        assert!(manifest.contains("def"));
        assert!(!manifest.contains("name"));
    }

    #[test]
    fn manifest_everything_is_candidate() {
        let manifest = ManifestReference::default();
        assert!(manifest.is_candidate(Path::new("dir/file.bin.b3")));
    }

    #[tokio::test]
    async fn sidecar_first_sight_writes_and_adds() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("data.txt");
        tokio::fs::write(&file, b"payload").await.unwrap();

        let reference = SidecarReference::new();
        let digest = Digest::from_data(b"payload");

        let outcome = reference.resolve(&file, &digest).await.unwrap();
        assert_eq!(outcome, Outcome::Added(digest.clone()));

        let stored = tokio::fs::read_to_string(reference.sidecar_path(&file))
            .await
            .unwrap();
        assert_eq!(stored, digest.to_hex());

        // Second resolution sees the sidecar and matches
        let outcome = reference.resolve(&file, &digest).await.unwrap();
        assert_eq!(outcome, Outcome::Match);
    }

    #[tokio::test]
    async fn sidecar_mismatch_is_conflict() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("data.txt");
        tokio::fs::write(&file, b"new content").await.unwrap();

        let reference = SidecarReference::new();
        let stale = Digest::from_data(b"old content");
        tokio::fs::write(reference.sidecar_path(&file), stale.to_hex())
            .await
            .unwrap();

        let computed = Digest::from_data(b"new content");
        let outcome = reference.resolve(&file, &computed).await.unwrap();
        assert_eq!(
            outcome,
            Outcome::Conflict {
                computed,
                stored: stale.to_hex(),
            }
        );
    }

    #[tokio::test]
    async fn manifest_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = ManifestReference::load(&dir.path().join("absent.tsv")).await;
        assert!(err.is_err());
    }
}
