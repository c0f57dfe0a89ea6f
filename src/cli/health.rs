//! Provider health check operation.

use std::io::{self, Write};

use toneshift::{AdjustError, CompletionClient, ToneAdjustmentService, ToneShiftConfig};

use super::build_service;
use super::output::write_health_to;

/// Checks the provider key and prints the health report.
///
/// # Errors
///
/// Returns [`AdjustError::Completion`] if the HTTP client cannot be built and
/// [`AdjustError::Io`] if the report cannot be written.
pub async fn run(config: &ToneShiftConfig) -> Result<(), AdjustError> {
    let service = build_service(config, config.resolve_api_key().ok())?;
    let mut stdout = io::stdout().lock();
    run_with(&service, &mut stdout).await
}

/// Runs the health check with `service` and writes the report to `writer`.
///
/// # Errors
///
/// Returns [`AdjustError::Io`] if the report cannot be written.
pub async fn run_with<Client, W>(
    service: &ToneAdjustmentService<Client>,
    writer: &mut W,
) -> Result<(), AdjustError>
where
    Client: CompletionClient,
    W: Write,
{
    let report = service.health().await;
    write_health_to(writer, &report)
}
