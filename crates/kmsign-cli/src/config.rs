//! # Configuration
//!
//! Settings are layered: command-line flag, then the YAML config file
//! given with `--config`, then built-in defaults.
//!
//! ```yaml
//! key_id: arn:aws:kms:eu-west-1:111122223333:key/0f9e...
//! signing_algorithm: RSASSA_PSS_SHA_256
//! profile: release-signing
//! region: eu-west-1            # only used when key_id has no region
//! credentials_file: /etc/kmsign/aws.json
//! ```
//!
//! A credentials file is a JSON document with explicit AWS keys:
//!
//! ```json
//! {"aws_access_key_id": "AKIA...", "aws_secret_access_key": "...", "aws_region": "us-west-2"}
//! ```
//!
//! When one is given it takes precedence over any profile, and its
//! `aws_region` serves as the region fallback if nothing else supplies one.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use kmsign_crypto::{CredentialsSource, KeyId, SignConfig, SigningAlgorithm};

use crate::signing::SignArgs;

/// Profile selected when neither the command line nor the config file names one.
pub const DEFAULT_PROFILE: &str = "harmony-kms";

/// Errors loading configuration or credentials files.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {}: {source}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid credentials file {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("credentials file {} has an empty {field}", .path.display())]
    EmptyField { path: PathBuf, field: &'static str },
}

/// Contents of the optional YAML config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SignerSettings {
    pub key_id: Option<String>,
    pub signing_algorithm: Option<String>,
    pub profile: Option<String>,
    pub region: Option<String>,
    pub credentials_file: Option<PathBuf>,
}

impl SignerSettings {
    /// Parse a YAML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = read(path)?;
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from `path` if given, otherwise all defaults.
    pub fn load_optional(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }
}

/// Explicit AWS keys read from a JSON credentials file.
#[derive(Clone, Deserialize)]
pub struct StaticCredentials {
    #[serde(rename = "aws_access_key_id")]
    pub access_key_id: String,
    #[serde(rename = "aws_secret_access_key")]
    pub secret_access_key: String,
    #[serde(rename = "aws_region", default)]
    pub region: Option<String>,
}

impl std::fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("region", &self.region)
            .finish()
    }
}

impl StaticCredentials {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = read(path)?;
        let creds: Self = serde_json::from_str(&content).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;

        if creds.access_key_id.trim().is_empty() {
            return Err(ConfigError::EmptyField {
                path: path.to_path_buf(),
                field: "aws_access_key_id",
            });
        }
        if creds.secret_access_key.trim().is_empty() {
            return Err(ConfigError::EmptyField {
                path: path.to_path_buf(),
                field: "aws_secret_access_key",
            });
        }
        Ok(creds)
    }
}

/// A fully resolved signing invocation.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub sign: SignConfig,
    pub credentials: CredentialsSource,
}

/// Merge command-line arguments over file settings and defaults.
pub fn resolve(args: &SignArgs, settings: &SignerSettings) -> Result<Invocation, ConfigError> {
    let key_id = args
        .aws_key_id
        .clone()
        .or_else(|| settings.key_id.clone())
        .map(KeyId::new)
        .unwrap_or_default();

    let algorithm = args
        .sig_alg
        .clone()
        .or_else(|| settings.signing_algorithm.clone())
        .map(SigningAlgorithm::new)
        .unwrap_or_default();

    let mut region_hint = args.region.clone().or_else(|| settings.region.clone());

    let credentials_file = args
        .aws_credentials
        .as_deref()
        .or(settings.credentials_file.as_deref());

    let credentials = match credentials_file {
        Some(path) => {
            let creds = StaticCredentials::load(path)?;
            if region_hint.is_none() {
                region_hint = creds.region.filter(|r| !r.is_empty());
            }
            CredentialsSource::Static {
                access_key_id: creds.access_key_id,
                secret_access_key: creds.secret_access_key,
            }
        }
        None => {
            let profile = args
                .aws_profile_name
                .as_deref()
                .or(settings.profile.as_deref())
                .unwrap_or(DEFAULT_PROFILE);
            if profile.is_empty() {
                CredentialsSource::DefaultChain
            } else {
                CredentialsSource::Profile(profile.to_string())
            }
        }
    };

    Ok(Invocation {
        sign: SignConfig {
            input_path: args.input.clone(),
            output_path: args.output.clone(),
            algorithm,
            key_id,
            region_hint,
        },
        credentials,
    })
}

fn read(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })
}
