//! Tone-adjustment pipeline.
//!
//! [`ToneAdjustmentService::adjust`] validates a request, describes the
//! requested tone, consults the [`ResultCache`](crate::cache::ResultCache)
//! and, on a miss, asks the completion client for a rewrite.

mod error;
mod model;
mod service;

pub use error::AdjustError;
pub use model::{AdjustmentRequest, AdjustmentResult, HealthReport};
pub use service::{DEFAULT_MAX_TEXT_LENGTH, ToneAdjustmentService};
