//! Boundary adapter for the external chat-completion endpoint.
//!
//! The [`CompletionClient`] trait lets the adjustment service run against a
//! mock in tests while [`ChatCompletionClient`] performs the real HTTP call.
//! Every call is a single attempt; retries are a caller concern.

mod chat;
mod error;
mod error_mapping;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

use async_trait::async_trait;

pub use chat::{ChatCompletionClient, ChatCompletionConfig};
pub use error::CompletionError;

/// Sampling temperature sent with every rewrite.
pub const TEMPERATURE: f64 = 0.7;

/// Nucleus-sampling parameter sent with every rewrite.
pub const TOP_P: f64 = 0.9;

/// Upper bound on the response length, in tokens.
pub const MAX_RESPONSE_TOKENS: u32 = 1500;

/// Response token budget for an input of `text_length` characters.
///
/// Twice the input length, capped at [`MAX_RESPONSE_TOKENS`].
#[must_use]
pub fn max_tokens_for(text_length: usize) -> u32 {
    let doubled = text_length.saturating_mul(2);
    u32::try_from(doubled).map_or(MAX_RESPONSE_TOKENS, |tokens| {
        tokens.min(MAX_RESPONSE_TOKENS)
    })
}

/// Successful completion.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    /// Trimmed assistant text.
    pub adjusted_text: String,
    /// Provider usage block, passed through untouched.
    pub usage: Option<serde_json::Value>,
    /// Model identifier the request was sent to.
    pub model: String,
}

/// Issues completion requests on behalf of the adjustment service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Sends `prompt` as the sole user message.
    ///
    /// `text_length` is the character count of the text being rewritten and
    /// sizes the response budget.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionError`] classifying the transport or provider
    /// failure.
    async fn complete(
        &self,
        prompt: &str,
        text_length: usize,
    ) -> Result<Completion, CompletionError>;

    /// Sends a minimal request and reports whether the provider accepted it.
    ///
    /// Never fails: any error is reported as `false`.
    async fn validate_api_key(&self) -> bool;
}
