//! Toneshift library crate for AI-assisted tone adjustment.
//!
//! Callers describe a target tone either as a point on a formality × detail
//! plane or as a named preset. The [`ToneAdjustmentService`] turns that into
//! a natural-language description, builds a rewrite prompt, asks a
//! chat-completion provider for the rewrite and memoises the result in a
//! time-bounded [`ResultCache`].

pub mod adjust;
pub mod cache;
pub mod completion;
pub mod config;
pub mod prompt;
pub mod telemetry;
pub mod tone;

pub use adjust::{
    AdjustError, AdjustmentRequest, AdjustmentResult, HealthReport, ToneAdjustmentService,
};
pub use cache::{ResultCache, cache_key};
pub use completion::{
    ChatCompletionClient, ChatCompletionConfig, Completion, CompletionClient, CompletionError,
};
pub use config::{OperationMode, ToneShiftConfig};
pub use prompt::build_prompt;
pub use telemetry::{NoopTelemetrySink, StderrJsonlTelemetrySink, TelemetryEvent, TelemetrySink};
pub use tone::{
    ToneAxes, ToneCoordinate, ToneDescription, TonePreset, ToneSelection, describe_tone,
};
