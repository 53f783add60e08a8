//! # Digest-and-Sign Pipeline
//!
//! [`sign_file`] is the single operation of the crate: resolve the region,
//! hash the input, report, ask the backend for a signature, and persist it.
//!
//! The output file is only written after the backend has returned a
//! non-empty signature, so a failure at any earlier step leaves an existing
//! output file untouched.

use std::path::{Path, PathBuf};

use crate::backend::{MessageType, SignRequest, SigningAlgorithm, SigningBackend};
use crate::error::SignError;
use crate::key_id::{resolve_region, KeyId};
use crate::sha256::{sha256_file, FileDigest};

/// Everything one signing invocation needs.
#[derive(Debug, Clone)]
pub struct SignConfig {
    /// File whose digest is signed.
    pub input_path: PathBuf,
    /// Destination of the raw signature bytes. Overwritten if present.
    pub output_path: PathBuf,
    pub algorithm: SigningAlgorithm,
    pub key_id: KeyId,
    /// Region used only when `key_id` does not carry one.
    pub region_hint: Option<String>,
}

impl SignConfig {
    /// Config with the default key and algorithm.
    pub fn new(input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            algorithm: SigningAlgorithm::default(),
            key_id: KeyId::default(),
            region_hint: None,
        }
    }
}

/// Progress details emitted once the digest is known, before the remote call.
#[derive(Debug, Clone)]
pub struct ProgressReport<'a> {
    pub input_path: &'a Path,
    pub digest: &'a FileDigest,
    pub key_id: &'a KeyId,
    pub algorithm: &'a SigningAlgorithm,
    pub output_path: &'a Path,
}

impl std::fmt::Display for ProgressReport<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "File Name   : {}", self.input_path.display())?;
        writeln!(f, "Digest      : {}", self.digest)?;
        writeln!(f, "Sign Key ID : {}", self.key_id)?;
        writeln!(f, "Algorithm   : {}", self.algorithm)?;
        write!(f, "Signature   : {}", self.output_path.display())
    }
}

/// Result of a successful [`sign_file`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignOutcome {
    pub digest: FileDigest,
    pub region: String,
    pub signature_len: usize,
    pub output_path: PathBuf,
}

/// Hash `config.input_path`, have `backend` sign the digest, and write the
/// signature to `config.output_path`.
///
/// `report` is called once with the progress details before the backend
/// is contacted.
///
/// # Errors
///
/// - [`SignError::RegionResolution`] before any file or network access.
/// - [`SignError::FileAccess`] if the input cannot be read.
/// - [`SignError::RemoteService`] if the backend fails.
/// - [`SignError::EmptySignature`] if the backend returns no bytes.
/// - [`SignError::OutputWrite`] if the signature cannot be written.
pub fn sign_file<F>(
    config: &SignConfig,
    backend: &dyn SigningBackend,
    mut report: F,
) -> Result<SignOutcome, SignError>
where
    F: FnMut(&ProgressReport<'_>),
{
    let region = resolve_region(&config.key_id, config.region_hint.as_deref())?;
    tracing::debug!(key_id = %config.key_id, %region, "resolved signing region");

    let digest = sha256_file(&config.input_path)?;

    report(&ProgressReport {
        input_path: &config.input_path,
        digest: &digest,
        key_id: &config.key_id,
        algorithm: &config.algorithm,
        output_path: &config.output_path,
    });

    let request = SignRequest {
        digest,
        key_id: config.key_id.clone(),
        algorithm: config.algorithm.clone(),
        message_type: MessageType::Digest,
        region,
    };

    tracing::info!(
        backend = backend.backend_name(),
        key_id = %request.key_id,
        algorithm = %request.algorithm,
        digest = %digest,
        "requesting signature"
    );

    let signature = backend.sign(&request)?;
    if signature.is_empty() {
        return Err(SignError::EmptySignature {
            key_id: request.key_id.to_string(),
        });
    }

    std::fs::write(&config.output_path, signature.as_bytes()).map_err(|source| {
        SignError::OutputWrite {
            path: config.output_path.clone(),
            source,
        }
    })?;

    tracing::info!(
        path = %config.output_path.display(),
        bytes = signature.len(),
        "wrote signature"
    );

    Ok(SignOutcome {
        digest,
        region: request.region,
        signature_len: signature.len(),
        output_path: config.output_path.clone(),
    })
}
