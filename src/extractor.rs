//! Turns GTFS-RT trip updates into per-segment delay observations.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::gtfs_rt::FeedEntity;
use crate::gtfs_rt::trip_update::StopTimeUpdate;
use crate::observation::DelayObservation;
use crate::registry::RouteRegistry;

/// Route id used when a trip descriptor carries none.
pub const UNKNOWN_ROUTE_ID: &str = "unknown";

/// Counters describing what an extraction pass kept and dropped.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExtractionSummary {
    pub entities: usize,
    pub trip_updates: usize,
    pub unknown_routes: usize,
    pub short_trips: usize,
    pub zero_delay_segments: usize,
    pub malformed_segments: usize,
    pub emitted: usize,
}

pub struct DelayExtractor<'a> {
    registry: &'a RouteRegistry,
}

impl<'a> DelayExtractor<'a> {
    pub fn new(registry: &'a RouteRegistry) -> Self {
        Self { registry }
    }

    /// Extracts observations from `entities`.
    ///
    /// `now` stamps observations whose trip update carries no timestamp.
    pub fn extract(&self, entities: &[FeedEntity], now: DateTime<Utc>) -> Vec<DelayObservation> {
        let (observations, summary) = self.extract_with_summary(entities, now);
        debug!(
            entities = summary.entities,
            trip_updates = summary.trip_updates,
            unknown_routes = summary.unknown_routes,
            short_trips = summary.short_trips,
            zero_delay_segments = summary.zero_delay_segments,
            malformed_segments = summary.malformed_segments,
            emitted = summary.emitted,
            "Delay extraction finished"
        );
        observations
    }

    pub fn extract_with_summary(
        &self,
        entities: &[FeedEntity],
        now: DateTime<Utc>,
    ) -> (Vec<DelayObservation>, ExtractionSummary) {
        let mut summary = ExtractionSummary {
            entities: entities.len(),
            ..Default::default()
        };
        let mut observations = Vec::new();

        for entity in entities {
            let Some(trip_update) = &entity.trip_update else {
                continue;
            };
            summary.trip_updates += 1;

            let route_id = trip_update
                .trip
                .route_id
                .as_deref()
                .filter(|id| !id.is_empty())
                .unwrap_or(UNKNOWN_ROUTE_ID);

            if !self.registry.is_known_route(route_id) {
                summary.unknown_routes += 1;
                continue;
            }

            let updates = &trip_update.stop_time_update;
            if updates.len() < 2 {
                summary.short_trips += 1;
                continue;
            }

            let timestamp = trip_update
                .timestamp
                .and_then(|ts| i64::try_from(ts).ok())
                .and_then(|ts| DateTime::from_timestamp(ts, 0))
                .unwrap_or(now);

            for pair in updates.windows(2) {
                let (current, next) = (&pair[0], &pair[1]);

                let delay_seconds = segment_delay(current);
                if delay_seconds == 0 {
                    summary.zero_delay_segments += 1;
                    continue;
                }

                let (Some(from_stop), Some(to_stop)) = (&current.stop_id, &next.stop_id) else {
                    summary.malformed_segments += 1;
                    continue;
                };

                observations.push(DelayObservation {
                    from_stop: from_stop.clone(),
                    to_stop: to_stop.clone(),
                    route_id: route_id.to_string(),
                    delay_seconds,
                    timestamp,
                });
            }
        }

        summary.emitted = observations.len();
        (observations, summary)
    }
}

/// Departure delay when present, otherwise arrival delay, otherwise 0.
fn segment_delay(update: &StopTimeUpdate) -> i32 {
    update
        .departure
        .as_ref()
        .and_then(|d| d.delay)
        .or_else(|| update.arrival.as_ref().and_then(|a| a.delay))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gtfs_rt::trip_update::StopTimeEvent;
    use crate::gtfs_rt::{TripDescriptor, TripUpdate};
    use chrono::TimeZone;

    fn stop(id: &str, departure: Option<i32>, arrival: Option<i32>) -> StopTimeUpdate {
        StopTimeUpdate {
            stop_id: Some(id.to_string()),
            departure: departure.map(|delay| StopTimeEvent {
                delay: Some(delay),
                ..Default::default()
            }),
            arrival: arrival.map(|delay| StopTimeEvent {
                delay: Some(delay),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn trip(route_id: Option<&str>, timestamp: Option<u64>, stops: Vec<StopTimeUpdate>) -> FeedEntity {
        FeedEntity {
            id: "e1".to_string(),
            trip_update: Some(TripUpdate {
                trip: TripDescriptor {
                    route_id: route_id.map(str::to_string),
                    ..Default::default()
                },
                stop_time_update: stops,
                timestamp,
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_emits_one_observation_per_delayed_segment() {
        let registry = RouteRegistry::oslo();
        let entities = vec![trip(
            Some("L1"),
            Some(1_709_290_800),
            vec![
                stop("Spikkestad", Some(120), None),
                stop("Asker", Some(0), None),
                stop("Oslo S", None, Some(-30)),
                stop("Lillestrøm", None, None),
            ],
        )];

        let observations = DelayExtractor::new(&registry).extract(&entities, now());

        assert_eq!(observations.len(), 2);
        assert_eq!(observations[0].from_stop, "Spikkestad");
        assert_eq!(observations[0].to_stop, "Asker");
        assert_eq!(observations[0].delay_seconds, 120);
        assert_eq!(observations[0].timestamp.timestamp(), 1_709_290_800);
        assert_eq!(observations[1].from_stop, "Oslo S");
        assert_eq!(observations[1].to_stop, "Lillestrøm");
        assert_eq!(observations[1].delay_seconds, -30);
    }

    #[test]
    fn test_departure_delay_wins_over_arrival() {
        assert_eq!(segment_delay(&stop("A", Some(60), Some(240))), 60);
        assert_eq!(segment_delay(&stop("A", None, Some(240))), 240);
        assert_eq!(segment_delay(&stop("A", None, None)), 0);
    }

    #[test]
    fn test_departure_without_delay_falls_back_to_arrival() {
        let update = StopTimeUpdate {
            stop_id: Some("A".to_string()),
            departure: Some(StopTimeEvent {
                time: Some(1_709_290_800),
                ..Default::default()
            }),
            arrival: Some(StopTimeEvent {
                delay: Some(45),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(segment_delay(&update), 45);
    }

    #[test]
    fn test_unknown_and_missing_routes_are_skipped() {
        let registry = RouteRegistry::oslo();
        let stops = || vec![stop("Ski", Some(60), None), stop("Oslo S", None, None)];
        let entities = vec![
            trip(Some("VY-999"), None, stops()),
            trip(None, None, stops()),
            trip(Some(""), None, stops()),
        ];

        let (observations, summary) =
            DelayExtractor::new(&registry).extract_with_summary(&entities, now());

        assert!(observations.is_empty());
        assert_eq!(summary.unknown_routes, 3);
    }

    #[test]
    fn test_entities_without_trip_update_and_short_trips() {
        let registry = RouteRegistry::oslo();
        let entities = vec![
            FeedEntity {
                id: "alert-only".to_string(),
                ..Default::default()
            },
            trip(Some("L2"), None, vec![stop("Ski", Some(60), None)]),
        ];

        let (observations, summary) =
            DelayExtractor::new(&registry).extract_with_summary(&entities, now());

        assert!(observations.is_empty());
        assert_eq!(summary.entities, 2);
        assert_eq!(summary.trip_updates, 1);
        assert_eq!(summary.short_trips, 1);
    }

    #[test]
    fn test_missing_timestamp_uses_now() {
        let registry = RouteRegistry::oslo();
        let entities = vec![trip(
            Some("FLY1"),
            None,
            vec![stop("Oslo S", Some(90), None), stop("Oslo Lufthavn", None, None)],
        )];

        let observations = DelayExtractor::new(&registry).extract(&entities, now());

        assert_eq!(observations.len(), 1);
        assert_eq!(observations[0].timestamp, now());
    }

    #[test]
    fn test_segment_without_stop_id_is_skipped_alone() {
        let registry = RouteRegistry::oslo();
        let mut nameless = stop("", Some(60), None);
        nameless.stop_id = None;
        let entities = vec![trip(
            Some("R20"),
            None,
            vec![
                stop("Oslo S", Some(30), None),
                nameless,
                stop("Halden", None, None),
            ],
        )];

        let (observations, summary) =
            DelayExtractor::new(&registry).extract_with_summary(&entities, now());

        assert!(observations.is_empty());
        assert_eq!(summary.malformed_segments, 2);
    }

    #[test]
    fn test_every_observation_is_nonzero_and_known() {
        let registry = RouteRegistry::oslo();
        let entities = vec![
            trip(
                Some("R10"),
                None,
                vec![
                    stop("Drammen", Some(0), Some(300)),
                    stop("Oslo S", Some(90), None),
                    stop("Lillehammer", None, None),
                ],
            ),
            trip(
                Some("GJB"),
                None,
                vec![stop("Oslo S", Some(60), None), stop("Gjøvik", None, None)],
            ),
        ];

        let observations = DelayExtractor::new(&registry).extract(&entities, now());

        assert_eq!(observations.len(), 1);
        assert_eq!(observations[0].from_stop, "Oslo S");
        assert!(
            observations
                .iter()
                .all(|o| o.delay_seconds != 0 && registry.is_known_route(&o.route_id))
        );
    }
}
