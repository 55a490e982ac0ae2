//! Output formatting and persistence for delay tables.
//!
//! Supports pretty-printing, JSON table files, and CSV append.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use crate::analyzers::DelayTables;
use csv::WriterBuilder;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const DAILY_STATS_FILE: &str = "daily_stats.json";
pub const HOURLY_STATS_FILE: &str = "hourly_stats.json";
pub const STATION_DELAYS_FILE: &str = "station_delays.json";
pub const ROUTE_STATS_FILE: &str = "route_stats.json";

/// Logs the tables using Rust's debug pretty-print format.
pub fn print_pretty(tables: &DelayTables) {
    debug!("{:#?}", tables);
}

/// Writes each table as a pretty-printed JSON array of flat records.
///
/// Creates `dir` if needed and returns the paths written, in table order.
pub fn write_json_tables(dir: impl AsRef<Path>, tables: &DelayTables) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let paths = vec![
        write_json(dir.join(DAILY_STATS_FILE), &tables.daily_stats)?,
        write_json(dir.join(HOURLY_STATS_FILE), &tables.hourly_stats)?,
        write_json(dir.join(STATION_DELAYS_FILE), &tables.station_delays)?,
        write_json(dir.join(ROUTE_STATS_FILE), &tables.route_stats)?,
    ];

    info!(dir = %dir.display(), "JSON tables written");
    Ok(paths)
}

fn write_json<T: Serialize>(path: PathBuf, rows: &[T]) -> Result<PathBuf> {
    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, rows)?;
    writer.flush()?;
    debug!(path = %path.display(), rows = rows.len(), "Wrote JSON table");
    Ok(path)
}

/// Appends rows to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_records<T: Serialize>(path: &str, rows: &[T]) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, rows = rows.len(), "Appending CSV records");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}
