//! # Sign Command
//!
//! Hashes a file and writes the KMS signature over the digest.
//!
//! ```bash
//! kmsign ./harmony ./harmony.sig
//! kmsign ./harmony ./harmony.sig --aws_key_id alias/release --region us-east-1
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use kmsign_crypto::{sign_file, AwsKmsSigner, SignOutcome, SigningBackend};

use crate::config::{resolve, Invocation, SignerSettings};

/// Arguments for signing a file.
#[derive(Args, Debug, Clone)]
pub struct SignArgs {
    /// The file to be signed.
    #[arg(value_name = "INPUT_FILEPATH")]
    pub input: PathBuf,

    /// Where to write the raw signature bytes.
    #[arg(value_name = "OUTPUT_SIG_FILEPATH")]
    pub output: PathBuf,

    /// The signing algorithm [default: RSASSA_PKCS1_V1_5_SHA_256].
    #[arg(long = "sig_alg", visible_alias = "sig-alg", value_name = "ALG")]
    pub sig_alg: Option<String>,

    /// The ARN (or id/alias) of the signing key.
    #[arg(long = "aws_key_id", visible_alias = "aws-key-id", value_name = "KEY_ID")]
    pub aws_key_id: Option<String>,

    /// The AWS profile with credentials [default: harmony-kms].
    /// Pass an empty string to use the default credential chain.
    #[arg(
        long = "aws_profile_name",
        visible_alias = "aws-profile-name",
        value_name = "PROFILE"
    )]
    pub aws_profile_name: Option<String>,

    /// Region to use when the key id does not carry one.
    #[arg(long)]
    pub region: Option<String>,

    /// JSON file with explicit AWS keys; overrides the profile.
    #[arg(
        long = "aws_credentials",
        visible_alias = "aws-credentials",
        value_name = "FILE"
    )]
    pub aws_credentials: Option<PathBuf>,
}

/// Resolve configuration, connect to KMS, and sign.
pub fn run_sign(args: &SignArgs, settings: &SignerSettings) -> Result<u8> {
    let invocation = resolve(args, settings).context("failed to resolve configuration")?;

    println!("AWS creds   : {}", invocation.credentials.describe());

    let signer = AwsKmsSigner::new(invocation.credentials.clone())
        .context("failed to initialise KMS signer")?;

    execute(&invocation, &signer)?;
    Ok(0)
}

/// Run the pipeline for a resolved invocation against `backend`.
pub fn execute(invocation: &Invocation, backend: &dyn SigningBackend) -> Result<SignOutcome> {
    let outcome = sign_file(&invocation.sign, backend, |report| println!("{report}"))
        .with_context(|| format!("failed to sign {}", invocation.sign.input_path.display()))?;

    tracing::debug!(
        region = %outcome.region,
        bytes = outcome.signature_len,
        "signing complete"
    );
    Ok(outcome)
}
