//! Toneshift CLI entrypoint.

use std::io::{self, Write};
use std::process::ExitCode;

use ortho_config::OrthoConfig;
use toneshift::{AdjustError, OperationMode, ToneShiftConfig};
use tracing_subscriber::EnvFilter;

mod cli;

const DEFAULT_LOG_FILTER: &str = "warn";

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::debug!("toneshift failed: {error}");
            let _ignored = writeln!(io::stderr().lock(), "{}", error.public_message());
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), AdjustError> {
    let config = load_config()?;
    config.validate()?;

    match config.operation_mode() {
        OperationMode::HealthCheck => cli::health::run(&config).await,
        OperationMode::Adjust => cli::adjust::run(&config).await,
    }
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`AdjustError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<ToneShiftConfig, AdjustError> {
    ToneShiftConfig::load().map_err(|error| AdjustError::Configuration {
        message: error.to_string(),
    })
}

/// Installs a stderr log subscriber filtered by `RUST_LOG`.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ignored = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}
