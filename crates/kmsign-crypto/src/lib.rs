//! # kmsign-crypto — Digest and Remote Signing
//!
//! Building blocks for signing a file with a key held in a remote KMS:
//!
//! - **SHA-256** whole-file digests ([`FileDigest`]).
//! - **Key identifiers** and region derivation from key ARNs ([`KeyId`]).
//! - **Signing backends** behind the [`SigningBackend`] trait, with an
//!   AWS KMS implementation behind the `aws-kms` feature.
//! - The **[`sign_file`] pipeline**: hash, report, sign, persist.
//!
//! ## Crate Policy
//!
//! - No signing primitive is implemented here; signatures always come
//!   from a backend.
//! - Every failure is a typed [`SignError`]; nothing panics on bad input.
//! - Credential selection is a backend constructor concern and never
//!   reaches the pipeline.

pub mod backend;
pub mod error;
pub mod key_id;
pub mod sha256;
pub mod signer;

// Re-export primary types.
#[cfg(feature = "aws-kms")]
pub use backend::AwsKmsSigner;
pub use backend::{
    CredentialsSource, MessageType, SignRequest, Signature, SigningAlgorithm, SigningBackend,
    DEFAULT_SIGNING_ALGORITHM,
};
pub use error::{BackendError, SignError};
pub use key_id::{resolve_region, KeyId, DEFAULT_KEY_ID};
pub use sha256::{sha256_digest, sha256_file, FileDigest};
pub use signer::{sign_file, ProgressReport, SignConfig, SignOutcome};
