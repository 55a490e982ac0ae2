//! Compiled-in Oslo region network.

use super::{Route, RouteCategory, RouteRegistry, Station};
use std::collections::BTreeMap;

use RouteCategory::{AirportExpress, Local, Regional};

/// (code, name, category, stops, description)
type RouteRow = (
    &'static str,
    &'static str,
    RouteCategory,
    &'static [&'static str],
    &'static str,
);

static ROUTES: &[RouteRow] = &[
    (
        "L1",
        "Spikkestad - Oslo S - Lillestrøm",
        Local,
        &["Spikkestad", "Asker", "Oslo S", "Lillestrøm", "Eidsvoll"],
        "Oslo - Akershus (north-east)",
    ),
    (
        "L2",
        "Ski - Oslo S - Stabekk",
        Local,
        &["Ski", "Oslo S", "Stabekk"],
        "Oslo - Østfold (south-east) - Bærum (west)",
    ),
    (
        "L12",
        "Kongsberg - Oslo S - Eidsvoll",
        Local,
        &["Kongsberg", "Drammen", "Oslo S", "Eidsvoll"],
        "Buskerud - Oslo - Akershus",
    ),
    (
        "L13",
        "Drammen - Oslo S - Dal",
        Local,
        &["Drammen", "Oslo S", "Dal"],
        "Buskerud - Oslo - Akershus",
    ),
    (
        "L14",
        "Asker - Oslo S - Kongsvinger",
        Local,
        &["Asker", "Oslo S", "Kongsvinger"],
        "Akershus - Oslo - Hedmark",
    ),
    (
        "L21",
        "Stabekk - Oslo S - Moss",
        Local,
        &["Stabekk", "Oslo S", "Moss"],
        "Bærum - Oslo - Østfold",
    ),
    (
        "L22",
        "Mysen - Oslo S - Stabekk",
        Local,
        &["Mysen", "Oslo S", "Stabekk"],
        "Østfold - Oslo - Bærum",
    ),
    (
        "R10",
        "Drammen - Oslo S - Lillehammer",
        Regional,
        &["Drammen", "Oslo S", "Lillehammer"],
        "Buskerud - Oslo - Oppland",
    ),
    (
        "R11",
        "Skien - Oslo S - Eidsvoll",
        Regional,
        &["Skien", "Oslo S", "Eidsvoll"],
        "Telemark - Oslo - Akershus",
    ),
    (
        "R12",
        "Kongsberg - Oslo S - Eidsvoll",
        Regional,
        &["Kongsberg", "Oslo S", "Eidsvoll"],
        "Buskerud - Oslo - Akershus",
    ),
    (
        "R13",
        "Drammen - Oslo S - Dal",
        Regional,
        &["Drammen", "Oslo S", "Dal"],
        "Buskerud - Oslo - Akershus",
    ),
    (
        "R14",
        "Asker - Oslo S - Kongsvinger",
        Regional,
        &["Asker", "Oslo S", "Kongsvinger"],
        "Akershus - Oslo - Hedmark",
    ),
    (
        "R20",
        "Oslo S - Ski - Halden",
        Regional,
        &["Oslo S", "Ski", "Halden"],
        "Oslo - Østfold",
    ),
    (
        "R21",
        "Oslo S - Moss - Göteborg",
        Regional,
        &["Oslo S", "Moss", "Göteborg"],
        "Oslo - Østfold - Sweden",
    ),
    (
        "R22",
        "Oslo S - Mysen - Rakkestad",
        Regional,
        &["Oslo S", "Mysen", "Rakkestad"],
        "Oslo - Østfold",
    ),
    (
        "R23",
        "Oslo S - Sarpsborg - Fredrikstad",
        Regional,
        &["Oslo S", "Sarpsborg", "Fredrikstad"],
        "Oslo - Østfold",
    ),
    (
        "FLY1",
        "Oslo S - Oslo Lufthavn",
        AirportExpress,
        &["Oslo S", "Oslo Lufthavn"],
        "Oslo - Akershus (airport)",
    ),
    (
        "FLY2",
        "Drammen - Oslo S - Oslo Lufthavn",
        AirportExpress,
        &["Drammen", "Oslo S", "Oslo Lufthavn"],
        "Buskerud - Oslo - Akershus (airport)",
    ),
];

/// (name, display name, latitude, longitude), approximate coordinates.
static STATIONS: &[(&str, &str, f64, f64)] = &[
    ("Spikkestad", "Spikkestad", 59.9467, 10.4100),
    ("Asker", "Asker", 59.8333, 10.4378),
    ("Oslo S", "Oslo Central Station", 59.9111, 10.7550),
    ("Lillestrøm", "Lillestrøm", 59.9550, 11.0492),
    ("Eidsvoll", "Eidsvoll", 60.3286, 11.1581),
    ("Ski", "Ski", 59.7194, 10.8389),
    ("Stabekk", "Stabekk", 59.9072, 10.5878),
    ("Kongsberg", "Kongsberg", 59.6686, 9.6502),
    ("Drammen", "Drammen", 59.7440, 10.2045),
    ("Dal", "Dal", 60.4167, 11.1167),
    ("Kongsvinger", "Kongsvinger", 60.1911, 12.0039),
    ("Moss", "Moss", 59.4344, 10.6572),
    ("Mysen", "Mysen", 59.5536, 11.3258),
    ("Lillehammer", "Lillehammer", 61.1153, 10.4662),
    ("Skien", "Skien", 59.2096, 9.6089),
    ("Halden", "Halden", 59.1222, 11.3875),
    ("Göteborg", "Göteborg", 57.7089, 11.9746),
    ("Rakkestad", "Rakkestad", 59.4286, 11.3450),
    ("Sarpsborg", "Sarpsborg", 59.2833, 11.1094),
    ("Fredrikstad", "Fredrikstad", 59.2181, 10.9298),
    ("Oslo Lufthavn", "Oslo Lufthavn", 60.1939, 11.1004),
];

pub(super) fn oslo_region() -> RouteRegistry {
    let routes: BTreeMap<String, Route> = ROUTES
        .iter()
        .map(|&(code, name, category, stops, description)| {
            (
                code.to_string(),
                Route {
                    code: code.to_string(),
                    name: name.to_string(),
                    category,
                    stops: stops.iter().map(|s| s.to_string()).collect(),
                    description: description.to_string(),
                },
            )
        })
        .collect();

    let stations: BTreeMap<String, Station> = STATIONS
        .iter()
        .map(|&(name, display_name, latitude, longitude)| {
            (
                name.to_string(),
                Station {
                    name: name.to_string(),
                    display_name: display_name.to_string(),
                    latitude,
                    longitude,
                },
            )
        })
        .collect();

    RouteRegistry {
        routes,
        stations,
        timezone: chrono_tz::Europe::Oslo,
    }
}
