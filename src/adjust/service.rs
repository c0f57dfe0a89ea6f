//! Orchestration of validation, caching and completion calls.

use std::sync::Arc;

use chrono::Utc;

use crate::cache::{ResultCache, cache_key};
use crate::completion::CompletionClient;
use crate::prompt::build_prompt;
use crate::telemetry::{NoopTelemetrySink, TelemetryEvent, TelemetrySink};
use crate::tone::{ToneAxes, ToneCoordinate, describe_tone};

use super::error::AdjustError;
use super::model::{AdjustmentRequest, AdjustmentResult, HealthReport};

/// Default upper bound on input length, in characters.
pub const DEFAULT_MAX_TEXT_LENGTH: usize = 5000;

/// Rewrites text to a requested tone, memoising results.
///
/// The cache is injected so that its lifetime and sharing are decided by the
/// caller. Provider errors propagate unchanged and are never retried here.
pub struct ToneAdjustmentService<Client>
where
    Client: CompletionClient,
{
    client: Client,
    cache: Arc<ResultCache>,
    max_text_length: usize,
    telemetry: Arc<dyn TelemetrySink>,
}

impl<Client> ToneAdjustmentService<Client>
where
    Client: CompletionClient,
{
    /// Creates a service around `client` and a shared `cache`.
    #[must_use]
    pub fn new(client: Client, cache: Arc<ResultCache>) -> Self {
        Self {
            client,
            cache,
            max_text_length: DEFAULT_MAX_TEXT_LENGTH,
            telemetry: Arc::new(NoopTelemetrySink),
        }
    }

    /// Overrides the maximum accepted text length.
    #[must_use]
    pub fn with_max_text_length(mut self, max_text_length: usize) -> Self {
        self.max_text_length = max_text_length;
        self
    }

    /// Records telemetry events to `sink`.
    #[must_use]
    pub fn with_telemetry(mut self, sink: Arc<dyn TelemetrySink>) -> Self {
        self.telemetry = sink;
        self
    }

    /// Rewrites `request.text` in the requested tone.
    ///
    /// The tone description is recomputed on every call, including cache
    /// hits. On a miss the result is stored and expired entries are swept.
    ///
    /// # Errors
    ///
    /// Returns [`AdjustError::Validation`] when the text is blank or longer
    /// than the configured maximum, and [`AdjustError::Completion`] when the
    /// provider call fails. Failed calls leave the cache untouched.
    pub async fn adjust(
        &self,
        request: &AdjustmentRequest,
    ) -> Result<AdjustmentResult, AdjustError> {
        let text_chars = self.validate(request.text.as_str())?;
        log_out_of_range(request.tone_coordinates);

        let tone = describe_tone(&request.tone_selection());
        let key = cache_key(
            request.text.as_str(),
            request.coordinate(),
            request.preset(),
        );

        if let Some(adjusted_text) = self.cache.get(key.as_str()) {
            tracing::debug!(text_chars, tone = tone.as_str(), "serving tone adjustment from cache");
            self.telemetry.record(TelemetryEvent::AdjustmentServed {
                from_cache: true,
                text_chars,
            });
            return Ok(AdjustmentResult {
                adjusted_text,
                tone_description: tone.description,
                from_cache: true,
                usage: None,
                model: None,
            });
        }

        tracing::debug!(
            text_chars,
            previous_attempts = request.previous_attempts.len(),
            tone = tone.as_str(),
            "cache miss; requesting completion"
        );

        let prompt = build_prompt(
            request.text.as_str(),
            tone.as_str(),
            &request.previous_attempts,
        );
        let completion = self
            .client
            .complete(prompt.as_str(), text_chars)
            .await
            .inspect_err(|error| tracing::warn!("tone adjustment failed: {error}"))?;

        self.cache.put(key, completion.adjusted_text.clone());
        let evicted = self.cache.sweep();
        if evicted > 0 {
            self.telemetry.record(TelemetryEvent::CacheSwept {
                evicted,
                remaining: self.cache.len(),
            });
        }
        self.telemetry.record(TelemetryEvent::AdjustmentServed {
            from_cache: false,
            text_chars,
        });

        Ok(AdjustmentResult {
            adjusted_text: completion.adjusted_text,
            tone_description: tone.description,
            from_cache: false,
            usage: completion.usage,
            model: Some(completion.model),
        })
    }

    /// Checks the provider key and reports cache occupancy.
    pub async fn health(&self) -> HealthReport {
        let api_key_valid = self.client.validate_api_key().await;
        HealthReport {
            api_key_valid,
            cache_entries: self.cache.len(),
            checked_at: Utc::now(),
        }
    }

    /// Number of cached entries.
    #[must_use]
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }

    /// Completion client the service calls on cache misses.
    #[must_use]
    pub const fn client(&self) -> &Client {
        &self.client
    }

    /// Maximum accepted text length, in characters.
    #[must_use]
    pub const fn max_text_length(&self) -> usize {
        self.max_text_length
    }

    fn validate(&self, text: &str) -> Result<usize, AdjustError> {
        if text.trim().is_empty() {
            return Err(AdjustError::Validation {
                message: "Text is required and cannot be empty.".to_owned(),
            });
        }

        let length = text.chars().count();
        if length > self.max_text_length {
            return Err(AdjustError::Validation {
                message: format!(
                    "Text exceeds the maximum length of {} characters.",
                    self.max_text_length
                ),
            });
        }

        Ok(length)
    }
}

fn log_out_of_range(axes: Option<ToneAxes>) {
    if let Some(ToneAxes {
        x: Some(x),
        y: Some(y),
    }) = axes
        && !ToneCoordinate::new(x, y).is_within_bounds()
    {
        tracing::debug!(x, y, "tone coordinates outside the unit square; clamping");
    }
}
