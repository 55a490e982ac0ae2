//! Delay aggregation and corridor classification.
//!
//! This module groups delay observations by day, hour of day and route,
//! computes per-bucket totals, counts and means, and flags segments on the
//! primary commuter corridor.

pub mod aggregate;
pub mod relevance;
pub mod types;
pub mod utility;

pub use aggregate::Aggregator;
pub use types::{DailySegmentStat, DelayTables, HourlySegmentStat, RouteStat, StationDelay};
