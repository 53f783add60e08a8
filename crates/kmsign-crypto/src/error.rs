//! # Signing Error Types
//!
//! Structured errors for the digest-and-sign pipeline. Every failure is
//! terminal for the current invocation: there is no retry and no partial
//! recovery.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from [`sign_file`](crate::signer::sign_file).
#[derive(Error, Debug)]
pub enum SignError {
    /// The input file is missing or unreadable.
    #[error("failed to read input file {}: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Neither the key identifier nor the caller supplied a region.
    #[error("no default region found and no region determinable from key id: {key_id}")]
    RegionResolution { key_id: String },

    /// The remote signing service rejected or failed the request.
    #[error("remote signing service error: {0}")]
    RemoteService(#[from] BackendError),

    /// The remote service answered without any signature bytes.
    #[error("remote signing service returned an empty signature for key {key_id}")]
    EmptySignature { key_id: String },

    /// The signature was produced but could not be persisted.
    #[error("failed to write signature to {}: {source}", .path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised by a [`SigningBackend`](crate::backend::SigningBackend).
#[derive(Error, Debug)]
pub enum BackendError {
    /// The backend could not be initialised (runtime, client, credentials).
    #[error("backend setup failed: {0}")]
    Setup(String),

    /// The sign request itself failed: authorization, network, unknown key,
    /// unsupported algorithm, throttling, or region mismatch.
    #[error("sign request failed: {0}")]
    Request(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_access_display_names_path() {
        let err = SignError::FileAccess {
            path: PathBuf::from("/tmp/missing.bin"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        let msg = format!("{err}");
        assert!(msg.contains("/tmp/missing.bin"));
        assert!(msg.contains("not found"));
    }

    #[test]
    fn region_resolution_display_names_key() {
        let err = SignError::RegionResolution {
            key_id: "alias/release".to_string(),
        };
        assert!(format!("{err}").contains("alias/release"));
    }

    #[test]
    fn backend_error_converts_to_remote_service() {
        let err = SignError::from(BackendError::Request("AccessDeniedException".into()));
        assert!(matches!(err, SignError::RemoteService(_)));
        assert!(format!("{err}").contains("AccessDeniedException"));
    }

    #[test]
    fn output_write_keeps_io_source() {
        use std::error::Error as _;
        let err = SignError::OutputWrite {
            path: PathBuf::from("out.sig"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.source().is_some());
    }
}
