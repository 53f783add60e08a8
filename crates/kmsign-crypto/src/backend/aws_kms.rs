//! # AWS KMS Signing Backend
//!
//! Delegates signing to the KMS `Sign` API. The private key never leaves
//! KMS; only the 32-byte digest is sent, with `MessageType=DIGEST`.
//!
//! ## Prerequisites
//!
//! - An asymmetric KMS key with key usage `SIGN_VERIFY`.
//! - Credentials with `kms:Sign` permission on that key, taken from the
//!   selected [`CredentialsSource`].
//!
//! The SDK is async; the signer owns a current-thread Tokio runtime and
//! blocks on each call so callers stay synchronous.

use aws_config::{BehaviorVersion, Region};
use aws_sdk_kms::config::Credentials;
use aws_sdk_kms::error::DisplayErrorContext;
use aws_sdk_kms::primitives::Blob;
use aws_sdk_kms::types::{MessageType as KmsMessageType, SigningAlgorithmSpec};

use super::{CredentialsSource, MessageType, SignRequest, Signature, SigningBackend};
use crate::error::BackendError;

/// Provider name reported by static credentials.
const STATIC_PROVIDER_NAME: &str = "kmsign-static";

/// AWS KMS signing backend.
///
/// A client is built per request, bound to the request's region, so a
/// single signer can follow whatever region the key id resolves to.
pub struct AwsKmsSigner {
    runtime: tokio::runtime::Runtime,
    credentials: CredentialsSource,
}

impl AwsKmsSigner {
    /// Create a signer that authenticates with `credentials`.
    pub fn new(credentials: CredentialsSource) -> Result<Self, BackendError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| BackendError::Setup(format!("failed to start async runtime: {e}")))?;

        Ok(Self {
            runtime,
            credentials,
        })
    }

    /// The credentials source this signer was built with.
    pub fn credentials(&self) -> &CredentialsSource {
        &self.credentials
    }

    async fn client(&self, region: &str) -> aws_sdk_kms::Client {
        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).region(Region::new(region.to_string()));

        match &self.credentials {
            CredentialsSource::DefaultChain => {}
            CredentialsSource::Profile(name) => {
                loader = loader.profile_name(name);
            }
            CredentialsSource::Static {
                access_key_id,
                secret_access_key,
            } => {
                loader = loader.credentials_provider(Credentials::new(
                    access_key_id,
                    secret_access_key,
                    None,
                    None,
                    STATIC_PROVIDER_NAME,
                ));
            }
        }

        let sdk_config = loader.load().await;
        aws_sdk_kms::Client::new(&sdk_config)
    }

    async fn sign_async(&self, request: &SignRequest) -> Result<Signature, BackendError> {
        let client = self.client(&request.region).await;

        let message_type = match request.message_type {
            MessageType::Digest => KmsMessageType::Digest,
        };

        let resp = client
            .sign()
            .key_id(request.key_id.as_str())
            .message(Blob::new(request.digest.as_bytes().to_vec()))
            .message_type(message_type)
            .signing_algorithm(SigningAlgorithmSpec::from(request.algorithm.as_str()))
            .send()
            .await
            .map_err(|e| BackendError::Request(DisplayErrorContext(&e).to_string()))?;

        Ok(resp
            .signature()
            .map(|blob| Signature::new(blob.as_ref().to_vec()))
            .unwrap_or_default())
    }
}

impl SigningBackend for AwsKmsSigner {
    fn sign(&self, request: &SignRequest) -> Result<Signature, BackendError> {
        tracing::debug!(
            region = %request.region,
            credentials = %self.credentials.describe(),
            "sending KMS sign request"
        );
        self.runtime.block_on(self.sign_async(request))
    }

    fn backend_name(&self) -> &str {
        "AwsKmsSigner"
    }
}
