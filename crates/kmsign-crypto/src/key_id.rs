//! # KMS Key Identifiers
//!
//! A key identifier is an opaque string naming a key held by KMS. Full key
//! ARNs carry the region in their fourth colon-delimited segment:
//!
//! ```text
//! arn:aws:kms:us-west-2:656503231766:key/370d45bb-d629-45d7-8d1c-db0560895690
//!             ^^^^^^^^^
//! ```
//!
//! Bare key ids and aliases (`alias/release`) carry no region, so the caller
//! must supply one.

use serde::{Deserialize, Serialize};

use crate::error::SignError;

/// Key used when neither the command line nor the config file names one.
pub const DEFAULT_KEY_ID: &str =
    "arn:aws:kms:us-west-2:656503231766:key/370d45bb-d629-45d7-8d1c-db0560895690";

/// Opaque identifier of a KMS signing key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyId(String);

impl KeyId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The region segment of the identifier, if it has one.
    ///
    /// Splits on `:` into at most five parts and takes the fourth. An empty
    /// segment (`arn:aws:kms::...`) is treated as absent.
    pub fn region(&self) -> Option<&str> {
        self.0.splitn(5, ':').nth(3).filter(|r| !r.is_empty())
    }
}

impl Default for KeyId {
    fn default() -> Self {
        Self::new(DEFAULT_KEY_ID)
    }
}

impl std::fmt::Display for KeyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Determine the region a sign request must be sent to.
///
/// The region embedded in the key id wins; `hint` is only consulted when
/// the key id has none.
pub fn resolve_region(key_id: &KeyId, hint: Option<&str>) -> Result<String, SignError> {
    key_id
        .region()
        .or(hint.filter(|h| !h.is_empty()))
        .map(str::to_string)
        .ok_or_else(|| SignError::RegionResolution {
            key_id: key_id.to_string(),
        })
}
