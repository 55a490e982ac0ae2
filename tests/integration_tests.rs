use chrono::{TimeZone, Utc};
use prost::Message;
use rail_delay_stats::analyzers::Aggregator;
use rail_delay_stats::gtfs_rt::trip_update::{StopTimeEvent, StopTimeUpdate};
use rail_delay_stats::gtfs_rt::{FeedEntity, FeedHeader, FeedMessage, TripDescriptor, TripUpdate};
use rail_delay_stats::parser::parse_feed;
use rail_delay_stats::pipeline::{ObservationSource, Pipeline};
use rail_delay_stats::registry::RouteRegistry;

fn stop(stop_id: &str, departure_delay: i32) -> StopTimeUpdate {
    StopTimeUpdate {
        stop_id: Some(stop_id.to_string()),
        departure: Some(StopTimeEvent {
            delay: Some(departure_delay),
            ..Default::default()
        }),
        ..Default::default()
    }
}

fn trip(id: &str, route_id: &str, timestamp: u64, stops: Vec<StopTimeUpdate>) -> FeedEntity {
    FeedEntity {
        id: id.to_string(),
        trip_update: Some(TripUpdate {
            trip: TripDescriptor {
                trip_id: Some(id.to_string()),
                route_id: Some(route_id.to_string()),
                ..Default::default()
            },
            stop_time_update: stops,
            timestamp: Some(timestamp),
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// Morning snapshot on 2024-05-02 (UTC) covering both a corridor segment and
/// an off-corridor one, plus a trip on a route outside the catalog.
fn sample_feed_bytes() -> Vec<u8> {
    let ts = Utc
        .with_ymd_and_hms(2024, 5, 2, 7, 30, 0)
        .unwrap()
        .timestamp() as u64;

    let feed = FeedMessage {
        header: FeedHeader {
            gtfs_realtime_version: "2.0".to_string(),
            timestamp: Some(ts),
            ..Default::default()
        },
        entity: vec![
            trip("t1", "L12", ts, vec![stop("Drammen", 300), stop("Sandvika", 0)]),
            trip("t2", "L12", ts, vec![stop("Drammen", 600), stop("Sandvika", 0)]),
            trip("t3", "L21", ts, vec![stop("Oslo S", 120), stop("Moss", 0)]),
            trip("t4", "R10", ts, vec![stop("Lillestrøm", 60), stop("Oslo S", 0)]),
            trip("t5", "R10", ts, vec![stop("Lillestrøm", 180), stop("Oslo S", 0)]),
            trip("t6", "VY-BUS", ts, vec![stop("Drammen", 900), stop("Sandvika", 0)]),
        ],
    };
    feed.encode_to_vec()
}

#[test]
fn test_full_pipeline() {
    let registry = RouteRegistry::oslo();
    let pipeline =
        Pipeline::new(&registry).with_aggregator(Aggregator::new(&registry).with_timezone(chrono_tz::UTC));

    let feed = parse_feed(&sample_feed_bytes());
    assert!(feed.is_ok());
    let run = pipeline.run(feed, Utc::now());

    assert_eq!(run.source, ObservationSource::Live);
    assert_eq!(run.observation_count, 5);

    let daily = &run.tables.daily_stats;
    let drammen = daily
        .iter()
        .find(|r| r.from_stop == "Drammen" && r.to_stop == "Sandvika")
        .expect("Drammen -> Sandvika row");
    assert_eq!(drammen.delay_count, 2);
    assert_eq!(drammen.avg_delay_minutes, 7.5);
    assert!(drammen.is_relevant);

    let moss = daily
        .iter()
        .find(|r| r.from_stop == "Oslo S" && r.to_stop == "Moss")
        .expect("Oslo S -> Moss row");
    assert_eq!(moss.delay_count, 1);
    assert_eq!(moss.avg_delay_minutes, 2.0);
    assert!(!moss.is_relevant);

    let r10 = run
        .tables
        .route_stats
        .iter()
        .find(|r| r.route_id == "R10")
        .expect("R10 route row");
    assert_eq!(r10.route_name, "Drammen - Oslo S - Lillehammer");
    assert_eq!(r10.avg_delay_minutes, 2.0);
    assert_eq!(r10.delay_count, 2);

    assert!(run.tables.route_stats.iter().all(|r| r.route_id != "VY-BUS"));
    assert!(run.tables.hourly_stats.iter().all(|r| r.hour == 7));
}

#[test]
fn test_identical_input_gives_identical_tables() {
    let registry = RouteRegistry::oslo();
    let pipeline = Pipeline::new(&registry);
    let now = Utc::now();

    let first = pipeline.run(parse_feed(&sample_feed_bytes()), now);
    let second = pipeline.run(parse_feed(&sample_feed_bytes()), now);

    assert_eq!(
        serde_json::to_string(&first.tables).unwrap(),
        serde_json::to_string(&second.tables).unwrap()
    );
}

#[test]
fn test_corrupt_feed_falls_back_to_synthetic() {
    let registry = RouteRegistry::oslo();
    let run = Pipeline::new(&registry).run(parse_feed(&[0xff, 0xff, 0xff]), Utc::now());

    assert_eq!(run.source, ObservationSource::Synthetic);
    assert!(
        run.tables
            .route_stats
            .iter()
            .all(|r| registry.is_known_route(&r.route_id))
    );
}
