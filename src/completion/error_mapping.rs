//! Classification of HTTP statuses and transport failures.

use reqwest::StatusCode;

use super::error::CompletionError;

const MAX_DETAIL_CHARS: usize = 160;

/// Maps a non-success HTTP status to the error taxonomy.
pub(super) fn map_status(status: StatusCode, body: &str) -> CompletionError {
    if status == StatusCode::UNAUTHORIZED {
        return CompletionError::Authentication;
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        return CompletionError::RateLimited;
    }

    if status.is_server_error() {
        return CompletionError::UpstreamUnavailable {
            status: status.as_u16(),
        };
    }

    let detail = extract_provider_message(body).unwrap_or_else(|| body.to_owned());
    CompletionError::Unknown {
        message: format!(
            "provider returned status {}: {}",
            status.as_u16(),
            truncate_for_message(detail.as_str(), MAX_DETAIL_CHARS)
        ),
    }
}

/// Maps a `reqwest` transport failure to the error taxonomy.
pub(super) fn map_transport(error: &reqwest::Error) -> CompletionError {
    if error.is_timeout() {
        return CompletionError::Timeout;
    }

    if error.is_connect() {
        return CompletionError::NetworkUnavailable {
            message: error.to_string(),
        };
    }

    CompletionError::Unknown {
        message: format!("transport failed: {error}"),
    }
}

/// Pulls a human-readable message out of common provider error bodies:
/// `{"message": ...}` or `{"error": {"message": ...}}`.
fn extract_provider_message(body: &str) -> Option<String> {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return None;
    };
    value
        .get("message")
        .or_else(|| value.get("error").and_then(|error| error.get("message")))
        .and_then(serde_json::Value::as_str)
        .map(ToOwned::to_owned)
}

fn truncate_for_message(message: &str, max_chars: usize) -> String {
    let mut output = String::new();
    let mut chars = message.chars();

    for _ in 0..max_chars {
        let Some(character) = chars.next() else {
            return output;
        };
        output.push(character);
    }

    if chars.next().is_some() {
        output.push_str("...");
    }

    output
}
