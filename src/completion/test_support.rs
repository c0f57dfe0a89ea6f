//! Test-support utilities for completion flows.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use super::{Completion, CompletionClient, CompletionError};

/// Deterministic completion client that records every prompt it receives.
#[derive(Debug)]
pub struct StubCompletionClient {
    response: Result<String, CompletionError>,
    key_valid: bool,
    prompts: Mutex<Vec<String>>,
}

impl StubCompletionClient {
    /// Model name reported on successful completions.
    pub const MODEL: &'static str = "stub-model";

    /// Creates a stub that always returns the provided text.
    #[must_use]
    pub fn success(adjusted_text: impl Into<String>) -> Self {
        Self {
            response: Ok(adjusted_text.into()),
            key_valid: true,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Creates a stub that always returns the provided error.
    #[must_use]
    pub const fn failure(error: CompletionError) -> Self {
        Self {
            response: Err(error),
            key_valid: false,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts received so far, oldest first.
    #[must_use]
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of completion calls received.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait]
impl CompletionClient for StubCompletionClient {
    async fn complete(
        &self,
        prompt: &str,
        _text_length: usize,
    ) -> Result<Completion, CompletionError> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(prompt.to_owned());

        self.response.clone().map(|adjusted_text| Completion {
            adjusted_text,
            usage: None,
            model: Self::MODEL.to_owned(),
        })
    }

    async fn validate_api_key(&self) -> bool {
        self.key_valid
    }
}
