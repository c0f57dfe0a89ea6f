//! Application configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.toneshift.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `TONESHIFT_API_KEY`, `TONESHIFT_MODEL`,
//!    and so on, plus the provider's own `MISTRAL_API_KEY` as a fallback key
//! 4. **Command-line arguments** – `--api-key`, `--text`/`-t`, `--preset`/`-p`
//!
//! # Configuration File
//!
//! ```toml
//! api_key = "example-key"
//! model = "mistral-small-latest"
//! cache_ttl_seconds = 300
//! max_text_length = 5000
//! ```

use std::env;
use std::fs;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::adjust::{AdjustError, AdjustmentRequest, DEFAULT_MAX_TEXT_LENGTH};
use crate::completion::ChatCompletionConfig;
use crate::tone::ToneAxes;

/// Environment variable consulted when no key is configured.
pub const PROVIDER_API_KEY_ENV: &str = "MISTRAL_API_KEY";

const DEFAULT_BASE_URL: &str = "https://api.mistral.ai/v1";
const DEFAULT_MODEL: &str = "mistral-small-latest";
const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;
const DEFAULT_VALIDATION_TIMEOUT_SECONDS: u64 = 10;
const DEFAULT_CACHE_TTL_SECONDS: u64 = 300;

/// Operation mode determined by CLI arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationMode {
    /// Check the provider key and report cache state.
    HealthCheck,
    /// Rewrite the supplied text.
    Adjust,
}

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Example
///
/// ```no_run
/// use ortho_config::OrthoConfig;
/// use toneshift::ToneShiftConfig;
///
/// let config = ToneShiftConfig::load().expect("failed to load configuration");
/// config.validate().expect("configuration should be consistent");
/// let api_key = config.resolve_api_key().expect("API key required");
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "TONESHIFT",
    discovery(
        dotfile_name = ".toneshift.toml",
        config_file_name = "toneshift.toml",
        app_name = "toneshift"
    )
)]
pub struct ToneShiftConfig {
    /// API key for the completion provider.
    ///
    /// Can be provided via:
    /// - CLI: `--api-key <KEY>`
    /// - Environment: `TONESHIFT_API_KEY` or `MISTRAL_API_KEY` (fallback)
    /// - Config file: `api_key = "..."`
    #[ortho_config()]
    pub api_key: Option<String>,

    /// Base URL of the chat-completions API.
    #[ortho_config()]
    pub base_url: String,

    /// Model identifier sent with every request.
    #[ortho_config()]
    pub model: String,

    /// Timeout for rewrite requests, in seconds.
    #[ortho_config()]
    pub request_timeout_seconds: u64,

    /// Timeout for the API key check, in seconds.
    #[ortho_config()]
    pub validation_timeout_seconds: u64,

    /// Lifetime of cached rewrites, in seconds.
    #[ortho_config()]
    pub cache_ttl_seconds: u64,

    /// Longest accepted input, in characters.
    #[ortho_config()]
    pub max_text_length: usize,

    /// Text to rewrite.
    ///
    /// Can be provided via:
    /// - CLI: `--text <TEXT>` or `-t <TEXT>`
    /// - Environment: `TONESHIFT_TEXT`
    #[ortho_config(cli_short = 't')]
    pub text: Option<String>,

    /// Tone preset name (`executive`, `technical`, `educational`, `basic`).
    #[ortho_config(cli_short = 'p')]
    pub preset: Option<String>,

    /// Formality coordinate, from casual (0) to professional (1).
    #[ortho_config()]
    pub x: Option<f64>,

    /// Detail coordinate, from concise (0) to expanded (1).
    #[ortho_config()]
    pub y: Option<f64>,

    /// Path to a JSON array of earlier rewrites to steer away from.
    #[ortho_config()]
    pub previous_attempts_file: Option<String>,

    /// Runs the health check instead of a rewrite.
    ///
    /// Can be provided via:
    /// - CLI: `--health`
    /// - Config file: `health = true`
    #[ortho_config()]
    pub health: bool,

    /// Emits telemetry events to stderr as JSON lines.
    #[ortho_config()]
    pub telemetry: bool,
}

impl Default for ToneShiftConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_owned(),
            model: DEFAULT_MODEL.to_owned(),
            request_timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECONDS,
            validation_timeout_seconds: DEFAULT_VALIDATION_TIMEOUT_SECONDS,
            cache_ttl_seconds: DEFAULT_CACHE_TTL_SECONDS,
            max_text_length: DEFAULT_MAX_TEXT_LENGTH,
            text: None,
            preset: None,
            x: None,
            y: None,
            previous_attempts_file: None,
            health: false,
            telemetry: false,
        }
    }
}

impl ToneShiftConfig {
    /// Resolves the API key from configuration or `MISTRAL_API_KEY`.
    ///
    /// Blank values are treated as missing.
    ///
    /// # Errors
    ///
    /// Returns [`AdjustError::Configuration`] when no source provides a key.
    pub fn resolve_api_key(&self) -> Result<String, AdjustError> {
        self.api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| {
                env::var(PROVIDER_API_KEY_ENV)
                    .ok()
                    .filter(|key| !key.trim().is_empty())
            })
            .ok_or_else(|| AdjustError::Configuration {
                message: "API key is required (use --api-key, TONESHIFT_API_KEY, or MISTRAL_API_KEY)"
                    .to_owned(),
            })
    }

    /// Checks that numeric limits are usable and the base URL parses.
    ///
    /// # Errors
    ///
    /// Returns [`AdjustError::Configuration`] naming the first offending
    /// setting.
    pub fn validate(&self) -> Result<(), AdjustError> {
        let zero_checks = [
            ("request_timeout_seconds", self.request_timeout_seconds),
            ("validation_timeout_seconds", self.validation_timeout_seconds),
            ("cache_ttl_seconds", self.cache_ttl_seconds),
        ];
        if let Some((name, _)) = zero_checks.iter().find(|(_, value)| *value == 0) {
            return Err(AdjustError::Configuration {
                message: format!("{name} must be greater than zero"),
            });
        }

        if self.max_text_length == 0 {
            return Err(AdjustError::Configuration {
                message: "max_text_length must be greater than zero".to_owned(),
            });
        }

        let parsed = Url::parse(self.base_url.as_str()).map_err(|error| {
            AdjustError::Configuration {
                message: format!("base_url '{}' is not a valid URL: {error}", self.base_url),
            }
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(AdjustError::Configuration {
                message: format!("base_url must use http or https, got '{}'", parsed.scheme()),
            });
        }

        Ok(())
    }

    /// Determines the operation mode.
    #[must_use]
    pub const fn operation_mode(&self) -> OperationMode {
        if self.health {
            OperationMode::HealthCheck
        } else {
            OperationMode::Adjust
        }
    }

    /// Cache entry lifetime.
    #[must_use]
    pub const fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }

    /// Builds the HTTP client configuration around an already resolved key.
    ///
    /// A missing key is passed through as `None`; the client reports it on
    /// first use.
    #[must_use]
    pub fn completion_config(&self, api_key: Option<String>) -> ChatCompletionConfig {
        ChatCompletionConfig::new(self.base_url.as_str(), self.model.as_str(), api_key)
        .with_timeouts(
            Duration::from_secs(self.request_timeout_seconds),
            Duration::from_secs(self.validation_timeout_seconds),
        )
    }

    /// Assembles the adjustment request described by the CLI inputs.
    ///
    /// # Errors
    ///
    /// Returns [`AdjustError::Configuration`] when no text was supplied or
    /// the previous-attempts file is not a JSON array of strings, and
    /// [`AdjustError::Io`] when that file cannot be read.
    pub fn adjustment_request(&self) -> Result<AdjustmentRequest, AdjustError> {
        let text = self
            .text
            .as_deref()
            .ok_or_else(|| AdjustError::Configuration {
                message: "text is required (use --text or -t)".to_owned(),
            })?;

        let mut request = AdjustmentRequest::new(text);
        if self.x.is_some() || self.y.is_some() {
            request.tone_coordinates = Some(ToneAxes {
                x: self.x,
                y: self.y,
            });
        }
        request.preset.clone_from(&self.preset);
        if let Some(path) = self.previous_attempts_file.as_deref() {
            request.previous_attempts = read_previous_attempts(path)?;
        }

        Ok(request)
    }
}

fn read_previous_attempts(path: &str) -> Result<Vec<String>, AdjustError> {
    let contents = fs::read_to_string(path).map_err(|error| AdjustError::Io {
        message: format!("failed to read {path}: {error}"),
    })?;

    serde_json::from_str(contents.as_str()).map_err(|error| AdjustError::Configuration {
        message: format!("{path} must contain a JSON array of strings: {error}"),
    })
}

#[cfg(test)]
mod tests;
