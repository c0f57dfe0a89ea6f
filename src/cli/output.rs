//! Output formatting utilities for CLI operations.

use std::io::{self, Write};

use toneshift::{AdjustError, AdjustmentResult, HealthReport};

/// Writes a rewrite result to the given writer.
///
/// The header names the tone and where the text came from; the rewritten
/// text follows after a blank line.
pub fn write_adjustment_to<W: Write>(
    writer: &mut W,
    result: &AdjustmentResult,
) -> Result<(), AdjustError> {
    let source = match (result.from_cache, result.model.as_deref()) {
        (true, _) => "cache".to_owned(),
        (false, Some(model)) => format!("provider ({model})"),
        (false, None) => "provider".to_owned(),
    };

    writeln!(writer, "Tone: {}", result.tone_description).map_err(|e| io_error(&e))?;
    writeln!(writer, "Source: {source}").map_err(|e| io_error(&e))?;
    writeln!(writer).map_err(|e| io_error(&e))?;
    writeln!(writer, "{}", result.adjusted_text).map_err(|e| io_error(&e))
}

/// Writes a health report to the given writer as pretty-printed JSON.
pub fn write_health_to<W: Write>(writer: &mut W, report: &HealthReport) -> Result<(), AdjustError> {
    serde_json::to_writer_pretty(&mut *writer, report).map_err(|error| AdjustError::Io {
        message: error.to_string(),
    })?;
    writeln!(writer).map_err(|e| io_error(&e))
}

fn io_error(error: &io::Error) -> AdjustError {
    AdjustError::Io {
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rstest::rstest;
    use toneshift::{AdjustmentResult, HealthReport};

    use super::{write_adjustment_to, write_health_to};

    fn result(from_cache: bool, model: Option<&str>) -> AdjustmentResult {
        AdjustmentResult {
            adjusted_text: "Hi!".to_owned(),
            tone_description: "simple, straightforward, and easy to understand".to_owned(),
            from_cache,
            usage: None,
            model: model.map(str::to_owned),
        }
    }

    #[rstest]
    #[case::fresh(false, Some("mistral-small-latest"), "Source: provider (mistral-small-latest)")]
    #[case::cached(true, None, "Source: cache")]
    fn adjustment_output_names_tone_and_source(
        #[case] from_cache: bool,
        #[case] model: Option<&str>,
        #[case] source_line: &str,
    ) {
        let mut buffer = Vec::new();

        write_adjustment_to(&mut buffer, &result(from_cache, model)).expect("write should succeed");

        let output = String::from_utf8(buffer).expect("output should be UTF-8");
        assert_eq!(
            output,
            format!(
                "Tone: simple, straightforward, and easy to understand\n{source_line}\n\nHi!\n"
            )
        );
    }

    #[rstest]
    fn health_output_is_camel_case_json() {
        let checked_at = Utc
            .with_ymd_and_hms(2026, 1, 2, 3, 4, 5)
            .single()
            .expect("timestamp should be valid");
        let report = HealthReport {
            api_key_valid: true,
            cache_entries: 3,
            checked_at,
        };
        let mut buffer = Vec::new();

        write_health_to(&mut buffer, &report).expect("write should succeed");

        let value: serde_json::Value =
            serde_json::from_slice(&buffer).expect("output should be JSON");
        assert_eq!(value.get("apiKeyValid"), Some(&serde_json::json!(true)));
        assert_eq!(value.get("cacheEntries"), Some(&serde_json::json!(3)));
        assert!(value.get("checkedAt").is_some());
    }
}
