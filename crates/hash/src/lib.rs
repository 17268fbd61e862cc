#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! BLAKE3 content digests for treesum
//!
//! This crate provides the digest engine used by the scan pipeline:
//! a fixed-width hash value rendered as lowercase hex, and streaming
//! computation over file content in bounded chunks.

use blake3::Hasher;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncReadExt;
use treesum_errors::{Error, HashError};

/// Size of chunks for streaming digest computation
const CHUNK_SIZE: usize = 64 * 1024; // 64KB

/// Number of hex characters in a rendered digest
pub const DIGEST_HEX_LEN: usize = 64;

/// A BLAKE3 digest value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Digest {
    bytes: [u8; 32],
}

impl Digest {
    /// Create a digest from raw bytes
    #[must_use]
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self { bytes }
    }

    /// Get the raw bytes
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }

    /// Render as a lowercase hex string
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    /// Parse from a hex string
    ///
    /// # Errors
    /// Returns an error if the input is not valid hexadecimal or is not
    /// exactly 64 characters (32 bytes).
    pub fn from_hex(s: &str) -> Result<Self, Error> {
        let bytes = hex::decode(s).map_err(|e| HashError::InvalidDigest {
            message: format!("invalid hex: {e}"),
        })?;

        if bytes.len() != 32 {
            return Err(HashError::InvalidDigest {
                message: format!("digest must be 32 bytes, got {}", bytes.len()),
            }
            .into());
        }

        let mut array = [0u8; 32];
        array.copy_from_slice(&bytes);
        Ok(Self::from_bytes(array))
    }

    /// Compute the digest of a byte slice
    #[must_use]
    pub fn from_data(data: &[u8]) -> Self {
        let hash = blake3::hash(data);
        Self::from_bytes(*hash.as_bytes())
    }

    /// Compute the digest of a file, streaming its content in bounded
    /// chunks. Returns the digest together with the number of bytes read.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or a read fails
    /// mid-stream; no partial digest is returned in either case.
    pub async fn hash_file(path: &Path) -> Result<(Self, u64), Error> {
        let mut file = File::open(path)
            .await
            .map_err(|e| HashError::open(&e, path))?;

        let mut hasher = Hasher::new();
        let mut buffer = vec![0; CHUNK_SIZE];
        let mut total_bytes = 0u64;

        loop {
            let n = file
                .read(&mut buffer)
                .await
                .map_err(|e| HashError::read(&e, path))?;
            if n == 0 {
                break;
            }
            hasher.update(&buffer[..n]);
            total_bytes += n as u64;
        }

        Ok((Self::from_bytes(*hasher.finalize().as_bytes()), total_bytes))
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for Digest {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_digest_basics() {
        let data = b"hello world";
        let digest = Digest::from_data(data);

        // Known BLAKE3 hash of "hello world"
        let expected = "d74981efa70a0c880b8d8c1985d075dbcbf679b99a5f9914e5aaf96b831a9e24";
        assert_eq!(digest.to_hex(), expected);
        assert_eq!(digest.to_hex().len(), DIGEST_HEX_LEN);
    }

    #[test]
    fn test_hex_round_trip() {
        let digest = Digest::from_data(b"round trip");
        let parsed = Digest::from_hex(&digest.to_hex()).unwrap();
        assert_eq!(digest, parsed);
    }

    #[test]
    fn test_from_hex_rejects_bad_input() {
        assert!(Digest::from_hex("zz").is_err());
        assert!(Digest::from_hex("abcd").is_err()); // valid hex, wrong length
    }

    #[test]
    fn test_digest_serialization() {
        let digest = Digest::from_data(b"test");
        let json = serde_json::to_string(&digest).unwrap();
        let deserialized: Digest = serde_json::from_str(&json).unwrap();
        assert_eq!(digest, deserialized);
    }

    #[tokio::test]
    async fn test_hash_file() {
        use std::io::Write;
        let mut temp = NamedTempFile::new().unwrap();
        let data = b"test file content";
        temp.write_all(data).unwrap();

        let (digest, bytes) = Digest::hash_file(temp.path()).await.unwrap();
        assert_eq!(digest, Digest::from_data(data));
        assert_eq!(bytes, data.len() as u64);
    }

    #[tokio::test]
    async fn test_hash_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = Digest::hash_file(&dir.path().join("absent")).await;
        assert!(err.is_err());
    }
}
