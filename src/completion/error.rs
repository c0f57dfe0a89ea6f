//! Error taxonomy for completion endpoint calls.

use thiserror::Error;

/// Normalised failure of a completion request.
///
/// Provider-specific error shapes never escape the client; the HTTP status
/// or transport failure is classified once into one of these variants.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CompletionError {
    /// The provider rejected the credentials (HTTP 401).
    #[error("completion provider rejected the API key")]
    Authentication,

    /// The provider throttled the request (HTTP 429).
    #[error("completion provider rate limit exceeded")]
    RateLimited,

    /// The provider reported a server-side failure (HTTP 5xx).
    #[error("completion provider unavailable (status {status})")]
    UpstreamUnavailable {
        /// HTTP status returned by the provider.
        status: u16,
    },

    /// The local request timeout elapsed.
    #[error("completion request timed out")]
    Timeout,

    /// The provider could not be reached (DNS or connection failure).
    #[error("unable to reach completion provider: {message}")]
    NetworkUnavailable {
        /// Transport-level error detail.
        message: String,
    },

    /// Any other provider failure.
    #[error("completion request failed: {message}")]
    Unknown {
        /// Provider or decoding detail, kept for logs.
        message: String,
    },

    /// The client is missing settings it needs to make a request.
    #[error("completion client misconfigured: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },
}

impl CompletionError {
    /// Message safe to show an end user; never includes provider payloads.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::Authentication => {
                "Invalid API key for the completion service. Please check your configuration."
            }
            Self::RateLimited => {
                "Rate limit exceeded for the completion service. Please try again later."
            }
            Self::UpstreamUnavailable { .. } => {
                "The completion service is temporarily unavailable. Please try again later."
            }
            Self::Timeout => "The request to the completion service timed out. Please try again.",
            Self::NetworkUnavailable { .. } => {
                "Unable to connect to the completion service. Please check your internet connection."
            }
            Self::Unknown { .. } => "Failed to adjust tone. Please try again.",
            Self::Configuration { .. } => {
                "The completion service is not configured. Please check your configuration."
            }
        }
    }
}
