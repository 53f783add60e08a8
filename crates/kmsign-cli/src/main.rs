//! # kmsign CLI entry point
//!
//! Parses command-line arguments, initialises tracing, loads the optional
//! config file, and runs the sign command.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use kmsign_cli::config::SignerSettings;
use kmsign_cli::signing::{run_sign, SignArgs};

/// Sign binaries with a key held in AWS KMS.
///
/// Computes the SHA-256 digest of the input file, asks KMS to sign the
/// digest, and writes the raw signature bytes to the output file.
#[derive(Parser, Debug)]
#[command(name = "kmsign", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    sign: SignArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("kmsign v{} starting", env!("CARGO_PKG_VERSION"));

    let result = SignerSettings::load_optional(cli.config.as_deref())
        .map_err(anyhow::Error::from)
        .and_then(|settings| run_sign(&cli.sign, &settings));

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
