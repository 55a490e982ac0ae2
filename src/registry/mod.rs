//! Static catalog of the routes and stations the pipeline knows about.
//!
//! A [`RouteRegistry`] is assembled once through [`RegistryBuilder`] and is
//! read-only afterwards. Every lookup is infallible: unknown codes and names
//! resolve to empty collections or sentinel values.

mod catalog;

use chrono_tz::Tz;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use thiserror::Error;

/// Name returned by [`RouteRegistry::route_name`] for codes outside the catalog.
pub const UNKNOWN_ROUTE_NAME: &str = "Unknown Route";

/// Service category of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteCategory {
    Local,
    Regional,
    AirportExpress,
}

impl RouteCategory {
    pub const ALL: [RouteCategory; 3] = [
        RouteCategory::Local,
        RouteCategory::Regional,
        RouteCategory::AirportExpress,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RouteCategory::Local => "local",
            RouteCategory::Regional => "regional",
            RouteCategory::AirportExpress => "airport_express",
        }
    }
}

impl fmt::Display for RouteCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A train line with its ordered stopping pattern.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub code: String,
    pub name: String,
    pub category: RouteCategory,
    pub stops: Vec<String>,
    pub description: String,
}

impl Route {
    /// Consecutive `(from, to)` stop pairs in travel order.
    pub fn station_pairs(&self) -> Vec<(&str, &str)> {
        self.stops
            .windows(2)
            .map(|w| (w[0].as_str(), w[1].as_str()))
            .collect()
    }
}

/// Informational station record. Keyed in the registry by the short name
/// used in feeds; `display_name` may be longer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Station {
    pub name: String,
    pub display_name: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Error, PartialEq)]
pub enum RegistryError {
    #[error("route {code} has {stops} stop(s), at least 2 are required")]
    TooFewStops { code: String, stops: usize },
    #[error("route code must not be empty")]
    EmptyRouteCode,
}

/// Offline assembly step for a [`RouteRegistry`].
///
/// Later entries with the same code or station name replace earlier ones, so
/// a deployment can extend or override the compiled-in catalog before the
/// registry is frozen.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    routes: BTreeMap<String, Route>,
    stations: BTreeMap<String, Station>,
    timezone: Option<Tz>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_route(mut self, route: Route) -> Self {
        self.routes.insert(route.code.clone(), route);
        self
    }

    pub fn with_station(mut self, station: Station) -> Self {
        self.stations.insert(station.name.clone(), station);
        self
    }

    pub fn with_timezone(mut self, tz: Tz) -> Self {
        self.timezone = Some(tz);
        self
    }

    pub fn build(self) -> Result<RouteRegistry, RegistryError> {
        for route in self.routes.values() {
            if route.code.is_empty() {
                return Err(RegistryError::EmptyRouteCode);
            }
            if route.stops.len() < 2 {
                return Err(RegistryError::TooFewStops {
                    code: route.code.clone(),
                    stops: route.stops.len(),
                });
            }
        }

        Ok(RouteRegistry {
            routes: self.routes,
            stations: self.stations,
            timezone: self.timezone.unwrap_or(chrono_tz::UTC),
        })
    }
}

/// Read-only route and station catalog.
#[derive(Debug, Clone)]
pub struct RouteRegistry {
    routes: BTreeMap<String, Route>,
    stations: BTreeMap<String, Station>,
    timezone: Tz,
}

impl RouteRegistry {
    /// The compiled-in Oslo region network.
    pub fn oslo() -> Self {
        catalog::oslo_region()
    }

    pub fn route_codes(&self) -> BTreeSet<&str> {
        self.routes.keys().map(String::as_str).collect()
    }

    /// Consecutive stop pairs of `code`, empty when the route is unknown.
    pub fn station_pairs(&self, code: &str) -> Vec<(&str, &str)> {
        self.routes
            .get(code)
            .map(Route::station_pairs)
            .unwrap_or_default()
    }

    pub fn route_name(&self, code: &str) -> &str {
        self.routes
            .get(code)
            .map(|r| r.name.as_str())
            .unwrap_or(UNKNOWN_ROUTE_NAME)
    }

    pub fn is_known_route(&self, code: &str) -> bool {
        self.routes.contains_key(code)
    }

    pub fn is_known_station(&self, name: &str) -> bool {
        self.stations.contains_key(name)
    }

    pub fn route(&self, code: &str) -> Option<&Route> {
        self.routes.get(code)
    }

    pub fn station(&self, name: &str) -> Option<&Station> {
        self.stations.get(name)
    }

    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.values()
    }

    pub fn stations(&self) -> impl Iterator<Item = &Station> {
        self.stations.values()
    }

    pub fn routes_by_category(&self, category: RouteCategory) -> Vec<&Route> {
        self.routes
            .values()
            .filter(|r| r.category == category)
            .collect()
    }

    /// Union of consecutive stop pairs across every route.
    pub fn all_station_pairs(&self) -> BTreeSet<(&str, &str)> {
        self.routes.values().flat_map(Route::station_pairs).collect()
    }

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    /// Local timezone of the network, used for date and hour bucketing.
    pub fn timezone(&self) -> Tz {
        self.timezone
    }
}
