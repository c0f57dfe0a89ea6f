//! Application telemetry events and sinks.
//!
//! Toneshift keeps no metrics backend, but emits a small set of structured
//! events so that cache effectiveness can be inspected while debugging.

use std::io;

use serde::{Deserialize, Serialize};

/// A structured telemetry event emitted by the adjustment service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TelemetryEvent {
    /// A tone adjustment completed successfully.
    AdjustmentServed {
        /// Whether the result came from the cache.
        from_cache: bool,
        /// Length of the input text in characters.
        text_chars: usize,
    },
    /// Expired cache entries were removed after a write.
    CacheSwept {
        /// Entries removed by the sweep.
        evicted: usize,
        /// Entries left in the cache.
        remaining: usize,
    },
}

/// A sink that can record telemetry events.
pub trait TelemetrySink: Send + Sync {
    /// Records a telemetry event.
    fn record(&self, event: TelemetryEvent);
}

/// Telemetry sink that drops all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTelemetrySink;

impl TelemetrySink for NoopTelemetrySink {
    fn record(&self, _event: TelemetryEvent) {}
}

/// Records telemetry events to stderr as JSON lines (JSONL).
///
/// This is intended for local debugging and is not transmitted anywhere.
#[derive(Debug, Default)]
pub struct StderrJsonlTelemetrySink;

impl TelemetrySink for StderrJsonlTelemetrySink {
    fn record(&self, event: TelemetryEvent) {
        let Ok(serialised) = serde_json::to_string(&event) else {
            return;
        };

        let _ignored = writeln_stderr(&serialised);
    }
}

fn writeln_stderr(message: &str) -> io::Result<()> {
    use io::Write;

    let mut stderr = io::stderr().lock();
    writeln!(stderr, "{message}")
}

/// Sink that keeps events in memory for assertions.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Default)]
pub struct RecordingTelemetrySink {
    events: std::sync::Mutex<Vec<TelemetryEvent>>,
}

#[cfg(any(test, feature = "test-support"))]
impl RecordingTelemetrySink {
    /// Drains and returns the recorded events.
    #[must_use]
    pub fn take(&self) -> Vec<TelemetryEvent> {
        self.events
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .drain(..)
            .collect()
    }
}

#[cfg(any(test, feature = "test-support"))]
impl TelemetrySink for RecordingTelemetrySink {
    fn record(&self, event: TelemetryEvent) {
        self.events
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(event);
    }
}
