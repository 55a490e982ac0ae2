use chrono::{NaiveDate, Timelike};
use chrono_tz::Tz;
use std::collections::BTreeMap;

use crate::analyzers::relevance::is_relevant;
use crate::analyzers::types::{
    DailySegmentStat, DelayTables, HourlySegmentStat, RouteStat, StationDelay,
};
use crate::analyzers::utility::DelayAccumulator;
use crate::observation::DelayObservation;
use crate::registry::RouteRegistry;

type SegmentKey<'o, K> = (K, &'o str, &'o str);

/// Groups delay observations into daily, hourly and per-route statistics.
///
/// Calendar date and hour of day are taken in the registry's network timezone.
/// Groups live in ordered maps, so identical input always yields identically
/// ordered tables.
pub struct Aggregator<'a> {
    registry: &'a RouteRegistry,
    timezone: Tz,
}

impl<'a> Aggregator<'a> {
    pub fn new(registry: &'a RouteRegistry) -> Self {
        Self {
            registry,
            timezone: registry.timezone(),
        }
    }

    /// Overrides the timezone used to derive dates and hours.
    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    pub fn aggregate(&self, observations: &[DelayObservation]) -> DelayTables {
        if observations.is_empty() {
            return DelayTables::default();
        }

        let mut daily: BTreeMap<SegmentKey<'_, NaiveDate>, DelayAccumulator> = BTreeMap::new();
        let mut hourly: BTreeMap<SegmentKey<'_, u32>, DelayAccumulator> = BTreeMap::new();
        let mut routes: BTreeMap<(NaiveDate, &str), DelayAccumulator> = BTreeMap::new();
        let mut station_delays = Vec::with_capacity(observations.len());

        for o in observations {
            let minutes = o.delay_minutes();
            let local = o.timestamp.with_timezone(&self.timezone);
            let date = local.date_naive();
            let hour = local.hour();

            daily
                .entry((date, o.from_stop.as_str(), o.to_stop.as_str()))
                .or_default()
                .push(minutes);
            hourly
                .entry((hour, o.from_stop.as_str(), o.to_stop.as_str()))
                .or_default()
                .push(minutes);
            routes
                .entry((date, o.route_id.as_str()))
                .or_default()
                .push(minutes);

            station_delays.push(StationDelay {
                from_stop: o.from_stop.clone(),
                to_stop: o.to_stop.clone(),
                route_id: o.route_id.clone(),
                delay_minutes: minutes,
                timestamp: o.timestamp,
            });
        }

        let daily_stats = daily
            .into_iter()
            .map(|((date, from, to), acc)| DailySegmentStat {
                date,
                from_stop: from.to_string(),
                to_stop: to.to_string(),
                avg_delay_minutes: acc.mean(),
                total_delay_minutes: acc.total,
                delay_count: acc.count,
                is_relevant: is_relevant(from, to),
            })
            .collect();

        let hourly_stats = hourly
            .into_iter()
            .map(|((hour, from, to), acc)| HourlySegmentStat {
                hour,
                from_stop: from.to_string(),
                to_stop: to.to_string(),
                avg_delay_minutes: acc.mean(),
                total_delay_minutes: acc.total,
                delay_count: acc.count,
                is_relevant: is_relevant(from, to),
            })
            .collect();

        let route_stats = routes
            .into_iter()
            .map(|((date, route_id), acc)| RouteStat {
                date,
                route_id: route_id.to_string(),
                avg_delay_minutes: acc.mean(),
                total_delay_minutes: acc.total,
                delay_count: acc.count,
                route_name: self.registry.route_name(route_id).to_string(),
            })
            .collect();

        DelayTables {
            daily_stats,
            hourly_stats,
            station_delays,
            route_stats,
        }
    }
}
