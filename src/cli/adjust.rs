//! Single rewrite operation.

use std::io::{self, Write};

use toneshift::{
    AdjustError, AdjustmentRequest, CompletionClient, ToneAdjustmentService, ToneShiftConfig,
};

use super::build_service;
use super::output::write_adjustment_to;

/// Rewrites the configured text and prints the result.
///
/// # Errors
///
/// Returns [`AdjustError::Configuration`] if the API key or text is missing,
/// [`AdjustError::Validation`] if the text is rejected, and
/// [`AdjustError::Completion`] if the provider call fails.
pub async fn run(config: &ToneShiftConfig) -> Result<(), AdjustError> {
    let api_key = config.resolve_api_key()?;
    let request = config.adjustment_request()?;
    let service = build_service(config, Some(api_key))?;

    let mut stdout = io::stdout().lock();
    run_with(&service, &request, &mut stdout).await
}

/// Rewrites `request` with `service` and writes the result to `writer`.
///
/// # Errors
///
/// Propagates adjustment and write failures.
pub async fn run_with<Client, W>(
    service: &ToneAdjustmentService<Client>,
    request: &AdjustmentRequest,
    writer: &mut W,
) -> Result<(), AdjustError>
where
    Client: CompletionClient,
    W: Write,
{
    let result = service.adjust(request).await?;
    write_adjustment_to(writer, &result)
}
