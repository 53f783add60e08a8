//! # SHA-256 File Digests
//!
//! Whole-file SHA-256 hashing. The input is read into memory in one go and
//! hashed once; there is no streaming or chunking.

use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::SignError;

/// A 32-byte SHA-256 digest of a file's raw bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileDigest {
    bytes: [u8; 32],
}

impl FileDigest {
    /// Wrap an already computed digest.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self { bytes }
    }

    /// The raw digest bytes, as sent to the signing service.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }

    /// Return the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.bytes.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl std::fmt::Display for FileDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Compute the SHA-256 digest of a byte slice.
pub fn sha256_digest(data: &[u8]) -> FileDigest {
    let hash = Sha256::digest(data);
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&hash);
    FileDigest::from_bytes(bytes)
}

/// Read `path` in full and compute its SHA-256 digest.
pub fn sha256_file(path: &Path) -> Result<FileDigest, SignError> {
    let data = std::fs::read(path).map_err(|source| SignError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = data.len(), "read input file");
    Ok(sha256_digest(&data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abc_matches_known_vector() {
        assert_eq!(
            sha256_digest(b"abc").to_hex(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn empty_input_matches_known_vector() {
        assert_eq!(
            sha256_digest(b"").to_hex(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn display_is_hex() {
        let digest = sha256_digest(b"abc");
        assert_eq!(format!("{digest}"), digest.to_hex());
        assert_eq!(digest.to_hex().len(), 64);
    }

    #[test]
    fn file_digest_equals_slice_digest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("payload.bin");
        std::fs::write(&path, [0u8, 1, 2, 255]).unwrap();
        assert_eq!(sha256_file(&path).unwrap(), sha256_digest(&[0u8, 1, 2, 255]));
    }

    #[test]
    fn missing_file_is_file_access_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = sha256_file(&dir.path().join("nope.bin"));
        assert!(matches!(result, Err(SignError::FileAccess { .. })));
    }
}
