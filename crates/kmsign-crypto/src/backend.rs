//! # Signing Backend Abstraction
//!
//! Remote signing sits behind a narrow trait so the pipeline in
//! [`signer`](crate::signer) never touches the network directly:
//!
//! - [`AwsKmsSigner`]: calls the KMS `Sign` API in the request's region.
//!   Requires the `aws-kms` feature.
//! - Tests supply their own deterministic implementations.
//!
//! Credential and session selection is described by [`CredentialsSource`]
//! and consumed only by backend constructors.

use serde::{Deserialize, Serialize};

use crate::error::BackendError;
use crate::key_id::KeyId;
use crate::sha256::FileDigest;

/// Algorithm used when neither the command line nor the config file names one.
pub const DEFAULT_SIGNING_ALGORITHM: &str = "RSASSA_PKCS1_V1_5_SHA_256";

/// Name of a signing scheme understood by the remote service,
/// e.g. `RSASSA_PKCS1_V1_5_SHA_256` or `ECDSA_SHA_256`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SigningAlgorithm(String);

impl SigningAlgorithm {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SigningAlgorithm {
    fn default() -> Self {
        Self::new(DEFAULT_SIGNING_ALGORITHM)
    }
}

impl std::fmt::Display for SigningAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// How the payload of a sign request should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageType {
    /// The payload is a pre-computed digest, not the raw message.
    Digest,
}

impl MessageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Digest => "DIGEST",
        }
    }
}

/// A single request to the remote signing service.
#[derive(Debug, Clone)]
pub struct SignRequest {
    pub digest: FileDigest,
    pub key_id: KeyId,
    pub algorithm: SigningAlgorithm,
    pub message_type: MessageType,
    /// Region the request must be sent to.
    pub region: String,
}

/// Opaque signature bytes returned by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Signature(Vec<u8>);

impl Signature {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A remote service able to sign a digest with a named key.
pub trait SigningBackend {
    /// Sign `request.digest` with `request.key_id` using `request.algorithm`.
    ///
    /// An absent signature in the service response is returned as an empty
    /// [`Signature`]; the caller decides what that means.
    fn sign(&self, request: &SignRequest) -> Result<Signature, BackendError>;

    /// Human-readable name for this backend (for logging).
    fn backend_name(&self) -> &str;
}

/// Where the backend gets its credentials from.
#[derive(Clone, PartialEq, Eq, Default)]
pub enum CredentialsSource {
    /// The SDK's default provider chain (environment, shared config, IMDS).
    #[default]
    DefaultChain,
    /// A named profile from the shared config/credentials files.
    Profile(String),
    /// Explicit long-term keys.
    Static {
        access_key_id: String,
        secret_access_key: String,
    },
}

impl std::fmt::Debug for CredentialsSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DefaultChain => f.write_str("DefaultChain"),
            Self::Profile(name) => f.debug_tuple("Profile").field(name).finish(),
            Self::Static { access_key_id, .. } => f
                .debug_struct("Static")
                .field("access_key_id", access_key_id)
                .field("secret_access_key", &"<redacted>")
                .finish(),
        }
    }
}

impl CredentialsSource {
    /// Short label that never includes secret material.
    pub fn describe(&self) -> String {
        match self {
            Self::DefaultChain => "default credential chain".to_string(),
            Self::Profile(name) => format!("profile {name}"),
            Self::Static { access_key_id, .. } => format!("static key {access_key_id}"),
        }
    }
}

#[cfg(feature = "aws-kms")]
mod aws_kms;

#[cfg(feature = "aws-kms")]
pub use aws_kms::AwsKmsSigner;
