//! Destinations for finished delay tables.
//!
//! [`StatsStore`] is the async trait every sink implements.
//! [`PgStatsStore`] upserts statistics into PostgreSQL.
//! [`S3StatsStore`] uploads the JSON tables to an S3 bucket.

pub mod derived;
mod postgres;
mod s3;

pub use postgres::PgStatsStore;
pub use s3::S3StatsStore;

use anyhow::Result;

use crate::analyzers::DelayTables;

/// Persists the tables of one pipeline run.
///
/// Saving the same buckets twice must overwrite, not duplicate. A failed save
/// leaves `tables` untouched so callers can still serialize them.
#[async_trait::async_trait]
pub trait StatsStore: Send + Sync {
    async fn save(&self, tables: &DelayTables) -> Result<()>;
}
