use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::collections::BTreeMap;
use tracing::info;

use super::StatsStore;
use super::derived::TripEstimate;
use crate::analyzers::relevance::is_relevant;
use crate::analyzers::utility::DelayAccumulator;
use crate::analyzers::{DailySegmentStat, DelayTables, RouteStat, StationDelay};
use crate::registry::RouteRegistry;

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS stations (
        station_code VARCHAR(64) PRIMARY KEY,
        station_name VARCHAR(255) NOT NULL,
        latitude DOUBLE PRECISION,
        longitude DOUBLE PRECISION,
        station_order INTEGER
    )",
    "CREATE TABLE IF NOT EXISTS station_pair_delays (
        id SERIAL PRIMARY KEY,
        trip_id VARCHAR(255),
        route_id VARCHAR(255),
        from_station VARCHAR(64),
        to_station VARCHAR(64),
        delay_minutes DOUBLE PRECISION,
        observed_at TIMESTAMPTZ,
        recorded_at TIMESTAMPTZ DEFAULT CURRENT_TIMESTAMP
    )",
    "CREATE TABLE IF NOT EXISTS daily_station_stats (
        id SERIAL PRIMARY KEY,
        from_station VARCHAR(64),
        to_station VARCHAR(64),
        date DATE,
        avg_delay_minutes DOUBLE PRECISION,
        total_trips INTEGER,
        delayed_trips INTEGER,
        delay_percentage DOUBLE PRECISION,
        UNIQUE (from_station, to_station, date)
    )",
    "CREATE TABLE IF NOT EXISTS daily_route_stats (
        id SERIAL PRIMARY KEY,
        route_name VARCHAR(255),
        date DATE,
        avg_delay_minutes DOUBLE PRECISION,
        total_trips INTEGER,
        delayed_trips INTEGER,
        delay_percentage DOUBLE PRECISION,
        UNIQUE (route_name, date)
    )",
];

const UPSERT_DAILY_STATION: &str = "
    INSERT INTO daily_station_stats
        (from_station, to_station, date, avg_delay_minutes, total_trips, delayed_trips, delay_percentage)
    VALUES ($1, $2, $3, $4, $5, $6, $7)
    ON CONFLICT (from_station, to_station, date) DO UPDATE SET
        avg_delay_minutes = EXCLUDED.avg_delay_minutes,
        total_trips = EXCLUDED.total_trips,
        delayed_trips = EXCLUDED.delayed_trips,
        delay_percentage = EXCLUDED.delay_percentage";

const UPSERT_DAILY_ROUTE: &str = "
    INSERT INTO daily_route_stats
        (route_name, date, avg_delay_minutes, total_trips, delayed_trips, delay_percentage)
    VALUES ($1, $2, $3, $4, $5, $6)
    ON CONFLICT (route_name, date) DO UPDATE SET
        avg_delay_minutes = EXCLUDED.avg_delay_minutes,
        total_trips = EXCLUDED.total_trips,
        delayed_trips = EXCLUDED.delayed_trips,
        delay_percentage = EXCLUDED.delay_percentage";

const INSERT_PAIR_DELAY: &str = "
    INSERT INTO station_pair_delays
        (trip_id, route_id, from_station, to_station, delay_minutes, observed_at)
    VALUES ($1, $2, $3, $4, $5, $6)";

const INSERT_STATION: &str = "
    INSERT INTO stations (station_code, station_name, latitude, longitude, station_order)
    VALUES ($1, $2, $3, $4, $5)
    ON CONFLICT (station_code) DO NOTHING";

/// Stores corridor segment statistics, route statistics and raw corridor
/// delays in PostgreSQL.
pub struct PgStatsStore {
    pool: PgPool,
}

impl PgStatsStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .context("connecting to PostgreSQL")?;
        Ok(Self::new(pool))
    }

    /// Creates missing tables and seeds the station catalog.
    #[tracing::instrument(skip_all)]
    pub async fn ensure_schema(&self, registry: &RouteRegistry) -> Result<()> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }

        let mut tx = self.pool.begin().await?;
        for (order, station) in registry.stations().enumerate() {
            sqlx::query(INSERT_STATION)
                .bind(&station.name)
                .bind(&station.display_name)
                .bind(station.latitude)
                .bind(station.longitude)
                .bind(order as i32 + 1)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;

        info!(stations = registry.station_count(), "Database schema ready");
        Ok(())
    }
}

/// One `daily_route_stats` row, keyed by `(route_name, date)`.
#[derive(Debug, Clone, PartialEq)]
struct RouteRow<'t> {
    route_name: &'t str,
    date: NaiveDate,
    avg_delay_minutes: f64,
    estimate: TripEstimate,
}

/// Folds route rows sharing a display name and date into one row.
///
/// Distinct route codes may share a name (L12 and R12, for instance), and the
/// table is keyed by name, so their totals and counts are merged before the
/// upsert instead of one overwriting the other.
fn route_rows(stats: &[RouteStat]) -> Vec<RouteRow<'_>> {
    let mut merged: BTreeMap<(NaiveDate, &str), DelayAccumulator> = BTreeMap::new();
    for row in stats {
        merged
            .entry((row.date, row.route_name.as_str()))
            .or_default()
            .merge(DelayAccumulator {
                total: row.total_delay_minutes,
                count: row.delay_count,
            });
    }

    merged
        .into_iter()
        .map(|((date, route_name), acc)| RouteRow {
            route_name,
            date,
            avg_delay_minutes: acc.mean(),
            estimate: TripEstimate::for_route(acc.count, acc.mean()),
        })
        .collect()
}

fn relevant_daily_rows(stats: &[DailySegmentStat]) -> impl Iterator<Item = &DailySegmentStat> {
    stats.iter().filter(|r| r.is_relevant)
}

fn relevant_delays(delays: &[StationDelay]) -> impl Iterator<Item = &StationDelay> {
    delays.iter().filter(|d| is_relevant(&d.from_stop, &d.to_stop))
}

#[async_trait]
impl StatsStore for PgStatsStore {
    /// Upserts relevant daily segment rows and all route rows, and appends
    /// relevant raw delays, in one transaction.
    async fn save(&self, tables: &DelayTables) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        let mut daily_saved = 0usize;
        let mut raw_saved = 0usize;
        let routes = route_rows(&tables.route_stats);

        for row in relevant_daily_rows(&tables.daily_stats) {
            let est = TripEstimate::for_segment(row.delay_count, row.avg_delay_minutes);
            sqlx::query(UPSERT_DAILY_STATION)
                .bind(&row.from_stop)
                .bind(&row.to_stop)
                .bind(row.date)
                .bind(row.avg_delay_minutes)
                .bind(est.total_trips)
                .bind(est.delayed_trips)
                .bind(est.delay_percentage)
                .execute(&mut *tx)
                .await?;
            daily_saved += 1;
        }

        for row in &routes {
            sqlx::query(UPSERT_DAILY_ROUTE)
                .bind(row.route_name)
                .bind(row.date)
                .bind(row.avg_delay_minutes)
                .bind(row.estimate.total_trips)
                .bind(row.estimate.delayed_trips)
                .bind(row.estimate.delay_percentage)
                .execute(&mut *tx)
                .await?;
        }

        for delay in relevant_delays(&tables.station_delays) {
            let trip_id = format!("{}-{}", delay.route_id, delay.timestamp.timestamp());
            sqlx::query(INSERT_PAIR_DELAY)
                .bind(trip_id)
                .bind(&delay.route_id)
                .bind(&delay.from_stop)
                .bind(&delay.to_stop)
                .bind(delay.delay_minutes)
                .bind(delay.timestamp)
                .execute(&mut *tx)
                .await?;
            raw_saved += 1;
        }

        tx.commit().await?;

        info!(
            daily_rows = daily_saved,
            route_rows = routes.len(),
            raw_rows = raw_saved,
            "Saved delay statistics to PostgreSQL"
        );
        Ok(())
    }
}
