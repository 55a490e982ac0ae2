//! Trip metrics derived from delay counts for the dashboard tables.
//!
//! `delay_count` counts delayed segment observations, not trips. The dashboard
//! schema wants total trips, delayed trips and a delay percentage, so they are
//! estimated from the count and mean with fixed factors. These are
//! approximations kept for compatibility with existing dashboard data, not
//! measured quantities.

/// Share of observed segments assumed delayed, for segment statistics.
pub const SEGMENT_DELAYED_SHARE: f64 = 0.15;
/// Percentage points per average delay minute, for segment statistics.
pub const SEGMENT_PERCENT_PER_MINUTE: f64 = 3.33;
/// Share of observed segments assumed delayed, for route statistics.
pub const ROUTE_DELAYED_SHARE: f64 = 0.18;
/// Percentage points per average delay minute, for route statistics.
pub const ROUTE_PERCENT_PER_MINUTE: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TripEstimate {
    pub total_trips: i32,
    pub delayed_trips: i32,
    pub delay_percentage: f64,
}

impl TripEstimate {
    pub fn for_segment(delay_count: usize, avg_delay_minutes: f64) -> Self {
        Self::estimate(
            delay_count,
            avg_delay_minutes,
            SEGMENT_DELAYED_SHARE,
            SEGMENT_PERCENT_PER_MINUTE,
        )
    }

    pub fn for_route(delay_count: usize, avg_delay_minutes: f64) -> Self {
        Self::estimate(
            delay_count,
            avg_delay_minutes,
            ROUTE_DELAYED_SHARE,
            ROUTE_PERCENT_PER_MINUTE,
        )
    }

    fn estimate(delay_count: usize, avg_delay_minutes: f64, share: f64, per_minute: f64) -> Self {
        let total_trips = i32::try_from(delay_count).unwrap_or(i32::MAX);
        let delayed_trips = ((delay_count as f64 * share) as i32).max(1);
        Self {
            total_trips,
            delayed_trips,
            delay_percentage: (avg_delay_minutes * per_minute).min(100.0),
        }
    }
}
