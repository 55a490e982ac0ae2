//! Result tables produced by the aggregation pipeline.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Delay statistics for one segment on one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySegmentStat {
    pub date: NaiveDate,
    pub from_stop: String,
    pub to_stop: String,
    pub avg_delay_minutes: f64,
    pub total_delay_minutes: f64,
    pub delay_count: usize,
    pub is_relevant: bool,
}

/// Delay statistics for one segment in one hour of the day, across all dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlySegmentStat {
    pub hour: u32,
    pub from_stop: String,
    pub to_stop: String,
    pub avg_delay_minutes: f64,
    pub total_delay_minutes: f64,
    pub delay_count: usize,
    pub is_relevant: bool,
}

/// Delay statistics for one route on one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStat {
    pub date: NaiveDate,
    pub route_id: String,
    pub avg_delay_minutes: f64,
    pub total_delay_minutes: f64,
    pub delay_count: usize,
    pub route_name: String,
}

/// One observation, ungrouped, for detail views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationDelay {
    pub from_stop: String,
    pub to_stop: String,
    pub route_id: String,
    pub delay_minutes: f64,
    pub timestamp: DateTime<Utc>,
}

/// The four tables handed to persistence and serialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DelayTables {
    pub daily_stats: Vec<DailySegmentStat>,
    pub hourly_stats: Vec<HourlySegmentStat>,
    pub station_delays: Vec<StationDelay>,
    pub route_stats: Vec<RouteStat>,
}

impl DelayTables {
    pub fn is_empty(&self) -> bool {
        self.daily_stats.is_empty()
            && self.hourly_stats.is_empty()
            && self.station_delays.is_empty()
            && self.route_stats.is_empty()
    }
}
