//! Protobuf parser for GTFS Realtime feeds.

use prost::Message;

use crate::error::SourceUnavailable;
use crate::gtfs_rt::FeedMessage;

/// Decodes a protobuf-encoded GTFS-RT [`FeedMessage`] from raw bytes.
///
/// # Errors
///
/// Returns [`SourceUnavailable::Decode`] if the bytes are not valid protobuf
/// for a `FeedMessage`.
pub fn parse_feed(bytes: &[u8]) -> Result<FeedMessage, SourceUnavailable> {
    Ok(FeedMessage::decode(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_bytes_returns_default_feed() {
        // prost does not enforce proto2 `required`; the header decodes as default.
        let feed = parse_feed(&[]).unwrap();
        assert_eq!(feed.header.gtfs_realtime_version, "");
        assert!(feed.entity.is_empty());
    }

    #[test]
    fn test_parse_invalid_bytes() {
        let invalid_bytes = vec![0xFF, 0xFE, 0x00, 0x01];
        let result = parse_feed(&invalid_bytes);
        assert!(matches!(result, Err(SourceUnavailable::Decode(_))));
    }

    #[test]
    fn test_parse_trip_update_feed() {
        use crate::gtfs_rt::trip_update::{StopTimeEvent, StopTimeUpdate};
        use crate::gtfs_rt::{FeedEntity, FeedHeader, TripDescriptor, TripUpdate};

        let feed = FeedMessage {
            header: FeedHeader {
                gtfs_realtime_version: "2.0".to_string(),
                timestamp: Some(1234567890),
                incrementality: None,
                feed_version: None,
            },
            entity: vec![FeedEntity {
                id: "t1".to_string(),
                trip_update: Some(TripUpdate {
                    trip: TripDescriptor {
                        route_id: Some("R10".to_string()),
                        ..Default::default()
                    },
                    stop_time_update: vec![StopTimeUpdate {
                        stop_id: Some("Drammen".to_string()),
                        departure: Some(StopTimeEvent {
                            delay: Some(120),
                            ..Default::default()
                        }),
                        ..Default::default()
                    }],
                    ..Default::default()
                }),
                ..Default::default()
            }],
        };
        let encoded = feed.encode_to_vec();

        let parsed = parse_feed(&encoded).unwrap();

        assert_eq!(parsed.header.timestamp, Some(1234567890));
        let update = parsed.entity[0].trip_update.as_ref().unwrap();
        assert_eq!(update.trip.route_id.as_deref(), Some("R10"));
        assert_eq!(
            update.stop_time_update[0].departure.as_ref().and_then(|d| d.delay),
            Some(120)
        );
    }
}
