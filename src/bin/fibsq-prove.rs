//! Command-line front-end: runs one proof session and writes the proof as JSON.

#![forbid(unsafe_code)]

use std::fs;
use std::io;
use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;
use tracing::info;

use fibsq_stark::config::{ConfigError, ProverConfig, Witness};
use fibsq_stark::{logging, prove, ProverError};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "fibsq-prove",
    about = "Proves knowledge of a secret start value of the Fibonacci-squared sequence",
    version
)]
struct Cli {
    /// Where to write the pretty-printed JSON proof
    #[arg(long, default_value = "proof.json")]
    output: PathBuf,
    /// JSON prover configuration; defaults to the 1023-step profile
    #[arg(long)]
    config: Option<PathBuf>,
    /// Secret second trace element
    #[arg(long, default_value_t = Witness::CANONICAL_SECRET)]
    secret: u64,
    /// Log level (trace|debug|info|warn|error); falls back to RUST_LOG, then info
    #[arg(long, value_parser = ["trace", "debug", "info", "warn", "error"])]
    log_level: Option<String>,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("prove error: {0}")]
    Prover(#[from] ProverError),
    #[error("serialisation error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {source}: {path}")]
    IoPath {
        #[source]
        source: io::Error,
        path: PathBuf,
    },
}

impl CliError {
    fn code(&self) -> i32 {
        match self {
            CliError::Config(_) => 2,
            CliError::Prover(_) => 3,
            CliError::Json(_) => 4,
            CliError::IoPath { .. } => 5,
        }
    }
}

fn try_main(cli: &Cli) -> Result<(), CliError> {
    let config = match &cli.config {
        Some(path) => ProverConfig::from_json_file(path)?,
        None => ProverConfig::default(),
    };
    let output = prove(&config, &Witness::new(cli.secret))?;
    let json = output.proof.to_json_pretty()?;
    fs::write(&cli.output, json).map_err(|source| CliError::IoPath {
        source,
        path: cli.output.clone(),
    })?;
    info!(
        path = %cli.output.display(),
        entries = output.proof.len(),
        result = %output.result,
        "proof written"
    );
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    logging::init_with_level(cli.log_level.as_deref());

    let code = match try_main(&cli) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {err}");
            err.code()
        }
    };
    std::process::exit(code);
}
