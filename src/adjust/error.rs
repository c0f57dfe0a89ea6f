//! Errors surfaced by the adjustment service.

use thiserror::Error;

use crate::completion::CompletionError;

/// Failure of a tone adjustment or of the surrounding application.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AdjustError {
    /// The request failed validation; the message is shown verbatim.
    #[error("{message}")]
    Validation {
        /// Human-readable reason.
        message: String,
    },

    /// The completion call failed.
    #[error(transparent)]
    Completion(#[from] CompletionError),

    /// Configuration could not be loaded or is inconsistent.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },
}

impl AdjustError {
    /// Returns true when the caller, not the service, is at fault.
    #[must_use]
    pub const fn is_client_fault(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Message safe to show an end user.
    ///
    /// Validation messages pass through; everything else maps to a fixed
    /// message that never includes provider payloads.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::Validation { message } => message.clone(),
            Self::Completion(error) => error.user_message().to_owned(),
            Self::Configuration { message } => format!("Configuration error: {message}"),
            Self::Io { .. } => "An internal error occurred.".to_owned(),
        }
    }
}
