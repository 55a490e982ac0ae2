use chrono::{DateTime, Utc};
use serde::Serialize;

/// One delay measurement for a segment between two consecutive stops.
///
/// Produced by [`crate::extractor::DelayExtractor`] or
/// [`crate::synthetic::SyntheticFeedGenerator`]; `delay_seconds` is never zero
/// and `route_id` always belongs to the registry the producer was given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DelayObservation {
    pub from_stop: String,
    pub to_stop: String,
    pub route_id: String,
    /// Positive is late, negative is early.
    pub delay_seconds: i32,
    pub timestamp: DateTime<Utc>,
}

impl DelayObservation {
    pub fn delay_minutes(&self) -> f64 {
        self.delay_seconds as f64 / 60.0
    }
}
