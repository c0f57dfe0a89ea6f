//! CLI operation mode handlers.
//!
//! - [`adjust`]: Rewrite a single text in the requested tone
//! - [`health`]: Check the completion provider key and report cache state
//!
//! Output formatting utilities are in [`output`].

use std::sync::Arc;

use toneshift::{
    AdjustError, ChatCompletionClient, NoopTelemetrySink, ResultCache, StderrJsonlTelemetrySink,
    TelemetrySink, ToneAdjustmentService, ToneShiftConfig,
};

pub mod adjust;
pub mod health;
pub mod output;

/// Builds the adjustment service described by `config` around `api_key`.
///
/// # Errors
///
/// Returns [`AdjustError::Completion`] when the HTTP client cannot be built.
pub fn build_service(
    config: &ToneShiftConfig,
    api_key: Option<String>,
) -> Result<ToneAdjustmentService<ChatCompletionClient>, AdjustError> {
    let client = ChatCompletionClient::new(config.completion_config(api_key))?;
    let cache = Arc::new(ResultCache::new(config.cache_ttl()));
    let telemetry: Arc<dyn TelemetrySink> = if config.telemetry {
        Arc::new(StderrJsonlTelemetrySink)
    } else {
        Arc::new(NoopTelemetrySink)
    };

    Ok(ToneAdjustmentService::new(client, cache)
        .with_max_text_length(config.max_text_length)
        .with_telemetry(telemetry))
}
