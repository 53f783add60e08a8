//! # kmsign-cli — Command-Line Interface for kmsign
//!
//! Provides the `kmsign` binary: hash a file with SHA-256 and write the
//! AWS KMS signature over that digest to an output file.
//!
//! ```bash
//! kmsign <input_filepath> <output_sig_filepath> \
//!     [--sig_alg ALG] [--aws_key_id ARN] [--aws_profile_name NAME] \
//!     [--region REGION] [--aws_credentials FILE] [--config FILE]
//! ```
//!
//! ## Crate Policy
//!
//! - Argument parsing and configuration layering live here; the pipeline
//!   lives in `kmsign-crypto`.
//! - Credentials are resolved from profiles, the default chain, or an
//!   explicit credentials file. They are never compiled in.

pub mod config;
pub mod signing;
