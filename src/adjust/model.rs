//! Request and response types for tone adjustment.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::tone::{ToneAxes, ToneCoordinate, ToneSelection};

/// Inbound tone-adjustment request.
///
/// Deserialises from `{text, toneCoordinates?, preset?, previousAttempts?}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustmentRequest {
    /// Text to rewrite.
    pub text: String,
    /// Requested point on the tone plane; either axis may be missing.
    #[serde(default)]
    pub tone_coordinates: Option<ToneAxes>,
    /// Requested preset name; wins over coordinates when present.
    #[serde(default)]
    pub preset: Option<String>,
    /// Earlier rewrites the model should move away from, oldest first.
    #[serde(default)]
    pub previous_attempts: Vec<String>,
}

impl AdjustmentRequest {
    /// Creates a request with no tone and no previous attempts.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Sets the tone coordinates.
    #[must_use]
    pub fn with_coordinates(mut self, x: f64, y: f64) -> Self {
        self.tone_coordinates = Some(ToneAxes::new(x, y));
        self
    }

    /// Sets the preset name.
    #[must_use]
    pub fn with_preset(mut self, preset: impl Into<String>) -> Self {
        self.preset = Some(preset.into());
        self
    }

    /// Sets the earlier rewrites.
    #[must_use]
    pub fn with_previous_attempts(mut self, attempts: Vec<String>) -> Self {
        self.previous_attempts = attempts;
        self
    }

    /// Clamped coordinate, if both axes were supplied.
    #[must_use]
    pub fn coordinate(&self) -> Option<ToneCoordinate> {
        self.tone_coordinates.and_then(ToneAxes::coordinate)
    }

    /// Preset name, if a non-blank one was supplied.
    #[must_use]
    pub fn preset(&self) -> Option<&str> {
        self.preset
            .as_deref()
            .filter(|preset| !preset.trim().is_empty())
    }

    /// Resolves the requested tone.
    #[must_use]
    pub fn tone_selection(&self) -> ToneSelection {
        ToneSelection::resolve(self.tone_coordinates, self.preset())
    }
}

/// Outcome of a successful tone adjustment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustmentResult {
    /// Rewritten text.
    pub adjusted_text: String,
    /// Tone description computed for this request.
    pub tone_description: String,
    /// True when served from the cache without calling the provider.
    #[serde(rename = "cached")]
    pub from_cache: bool,
    /// Provider usage block, present on fresh completions only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<serde_json::Value>,
    /// Model that produced the text, present on fresh completions only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// Operational snapshot for health endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    /// Whether the provider accepted the configured API key.
    pub api_key_valid: bool,
    /// Entries currently held by the cache, including unswept expired ones.
    pub cache_entries: usize,
    /// When the check ran.
    pub checked_at: DateTime<Utc>,
}
