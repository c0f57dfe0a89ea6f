//! Chat-completions HTTP client (Mistral / OpenAI compatible).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::error::CompletionError;
use super::error_mapping::{map_status, map_transport};
use super::{Completion, CompletionClient, TEMPERATURE, TOP_P, max_tokens_for};

const DEFAULT_BASE_URL: &str = "https://api.mistral.ai/v1";
const DEFAULT_MODEL: &str = "mistral-small-latest";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_VALIDATION_TIMEOUT_SECS: u64 = 10;
const VALIDATION_PROMPT: &str = "Test";
const VALIDATION_MAX_TOKENS: u32 = 5;

/// Configuration for [`ChatCompletionClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatCompletionConfig {
    /// Base API URL (e.g., `https://api.mistral.ai/v1`).
    pub base_url: String,
    /// Model identifier sent in chat-completions requests.
    pub model: String,
    /// API key used for bearer authentication.
    pub api_key: Option<String>,
    /// Timeout for rewrite requests.
    pub request_timeout: Duration,
    /// Timeout for the key-validation request.
    pub validation_timeout: Duration,
}

impl Default for ChatCompletionConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            model: DEFAULT_MODEL.to_owned(),
            api_key: None,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            validation_timeout: Duration::from_secs(DEFAULT_VALIDATION_TIMEOUT_SECS),
        }
    }
}

impl ChatCompletionConfig {
    /// Constructs configuration with the required API settings and default
    /// timeouts.
    #[must_use]
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            api_key,
            ..Self::default()
        }
    }

    /// Overrides the rewrite and validation timeouts.
    #[must_use]
    pub fn with_timeouts(mut self, request: Duration, validation: Duration) -> Self {
        self.request_timeout = request;
        self.validation_timeout = validation;
        self
    }
}

/// Chat-completions client.
#[derive(Debug, Clone)]
pub struct ChatCompletionClient {
    config: ChatCompletionConfig,
    http: Client,
}

impl ChatCompletionClient {
    /// Creates a client from explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionError::Configuration`] when the HTTP client cannot
    /// be built.
    pub fn new(config: ChatCompletionConfig) -> Result<Self, CompletionError> {
        let http = Client::builder()
            .build()
            .map_err(|error| CompletionError::Configuration {
                message: format!("failed to configure HTTP client: {error}"),
            })?;
        Ok(Self { config, http })
    }

    /// Model identifier requests are sent to.
    #[must_use]
    pub const fn model(&self) -> &str {
        self.config.model.as_str()
    }

    fn extract_api_key(&self) -> Result<&str, CompletionError> {
        self.config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| CompletionError::Configuration {
                message: concat!(
                    "API key is required (use --api-key, ",
                    "TONESHIFT_API_KEY, or MISTRAL_API_KEY)"
                )
                .to_owned(),
            })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    async fn post(
        &self,
        payload: &ChatCompletionsRequest<'_>,
        timeout: Duration,
    ) -> Result<reqwest::Response, CompletionError> {
        let api_key = self.extract_api_key()?;
        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(api_key)
            .timeout(timeout)
            .json(payload)
            .send()
            .await
            .map_err(|error| map_transport(&error))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(map_status(status, body.as_str()))
    }
}

#[async_trait]
impl CompletionClient for ChatCompletionClient {
    async fn complete(
        &self,
        prompt: &str,
        text_length: usize,
    ) -> Result<Completion, CompletionError> {
        let payload = ChatCompletionsRequest {
            model: self.config.model.as_str(),
            messages: vec![ChatCompletionsMessage {
                role: "user",
                content: prompt,
            }],
            temperature: Some(TEMPERATURE),
            max_tokens: max_tokens_for(text_length),
            top_p: Some(TOP_P),
        };

        tracing::debug!(
            model = self.config.model.as_str(),
            text_length,
            max_tokens = payload.max_tokens,
            "sending tone adjustment request"
        );

        let response = self.post(&payload, self.config.request_timeout).await?;
        let response_payload: ChatCompletionsResponse = response
            .json()
            .await
            .map_err(|error| {
                if error.is_timeout() {
                    return CompletionError::Timeout;
                }
                CompletionError::Unknown {
                    message: format!("response JSON decoding failed: {error}"),
                }
            })?;

        let adjusted_text = response_payload
            .choices
            .first()
            .and_then(|choice| parse_content_value(&choice.message.content))
            .map(str::trim)
            .filter(|content| !content.is_empty())
            .map(ToOwned::to_owned)
            .ok_or_else(|| CompletionError::Unknown {
                message: "response did not contain assistant text".to_owned(),
            })?;

        tracing::info!(
            model = self.config.model.as_str(),
            adjusted_length = adjusted_text.chars().count(),
            "tone adjustment completed"
        );

        Ok(Completion {
            adjusted_text,
            usage: response_payload.usage,
            model: self.config.model.clone(),
        })
    }

    async fn validate_api_key(&self) -> bool {
        let payload = ChatCompletionsRequest {
            model: self.config.model.as_str(),
            messages: vec![ChatCompletionsMessage {
                role: "user",
                content: VALIDATION_PROMPT,
            }],
            temperature: None,
            max_tokens: VALIDATION_MAX_TOKENS,
            top_p: None,
        };

        match self.post(&payload, self.config.validation_timeout).await {
            Ok(_) => true,
            Err(error) => {
                tracing::warn!("API key validation failed: {error}");
                false
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionsRequest<'a> {
    model: &'a str,
    messages: Vec<ChatCompletionsMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f64>,
}

#[derive(Debug, Serialize)]
struct ChatCompletionsMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionsResponse {
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ChatContent {
    Text(String),
    Parts(Vec<ChatContentPart>),
}

#[derive(Debug, Deserialize)]
struct ChatContentPart {
    text: Option<String>,
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: ChatContent,
}

fn parse_content_value(content: &ChatContent) -> Option<&str> {
    match content {
        ChatContent::Text(text) => Some(text.as_str()),
        ChatContent::Parts(parts) => parts
            .iter()
            .find_map(|part| part.text.as_deref().or(part.content.as_deref())),
    }
}

#[cfg(test)]
#[path = "chat_tests.rs"]
mod tests;
