use anyhow::Result;
use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use chrono::NaiveDate;
use flate2::Compression;
use flate2::write::GzEncoder;
use serde::Serialize;
use std::io::Write;
use tracing::info;

use super::StatsStore;
use crate::analyzers::DelayTables;
use crate::output::{DAILY_STATS_FILE, HOURLY_STATS_FILE, ROUTE_STATS_FILE, STATION_DELAYS_FILE};

/// Uploads the JSON tables under `delays/date=YYYY-MM-DD/`.
///
/// Keys depend only on the run date and table name, so a re-run on the same
/// day overwrites the earlier upload.
pub struct S3StatsStore {
    client: aws_sdk_s3::Client,
    bucket: String,
    run_date: NaiveDate,
    gzip: bool,
}

impl S3StatsStore {
    pub fn new(client: aws_sdk_s3::Client, bucket: String, run_date: NaiveDate, gzip: bool) -> Self {
        Self {
            client,
            bucket,
            run_date,
            gzip,
        }
    }

    /// Client built from the ambient AWS configuration (env vars, instance
    /// profile, etc.).
    pub async fn from_env(bucket: String, run_date: NaiveDate, gzip: bool) -> Self {
        let config = aws_config::load_from_env().await;
        Self::new(aws_sdk_s3::Client::new(&config), bucket, run_date, gzip)
    }

    fn key(&self, file_name: &str) -> String {
        table_key(self.run_date, file_name, self.gzip)
    }

    async fn put_json(&self, file_name: &str, value: &impl Serialize) -> Result<()> {
        let body = encode_body(value, self.gzip)?;
        let key = self.key(file_name);

        let mut request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(body))
            .content_type("application/json");
        if self.gzip {
            request = request.content_encoding("gzip");
        }
        request.send().await?;

        Ok(())
    }
}

fn table_key(date: NaiveDate, file_name: &str, gzip: bool) -> String {
    let suffix = if gzip { ".gz" } else { "" };
    format!("delays/date={}/{}{}", date.format("%Y-%m-%d"), file_name, suffix)
}

/// Serializes a value to JSON, gzip-compressing it when asked.
fn encode_body(value: &impl Serialize, gzip: bool) -> Result<Vec<u8>> {
    let json = serde_json::to_vec(value)?;
    if !gzip {
        return Ok(json);
    }
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&json)?;
    Ok(encoder.finish()?)
}

#[async_trait]
impl StatsStore for S3StatsStore {
    #[tracing::instrument(skip_all, fields(bucket = %self.bucket, date = %self.run_date, gzip = self.gzip))]
    async fn save(&self, tables: &DelayTables) -> Result<()> {
        self.put_json(DAILY_STATS_FILE, &tables.daily_stats).await?;
        self.put_json(HOURLY_STATS_FILE, &tables.hourly_stats).await?;
        self.put_json(STATION_DELAYS_FILE, &tables.station_delays).await?;
        self.put_json(ROUTE_STATS_FILE, &tables.route_stats).await?;

        info!("S3 upload complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 2).unwrap()
    }

    #[test]
    fn test_table_key_layout() {
        assert_eq!(
            table_key(date(), DAILY_STATS_FILE, false),
            "delays/date=2024-05-02/daily_stats.json"
        );
        assert_eq!(
            table_key(date(), ROUTE_STATS_FILE, true),
            "delays/date=2024-05-02/route_stats.json.gz"
        );
    }

    #[test]
    fn test_gzip_body_decompresses_to_json() {
        let rows = vec![1, 2, 3];
        let body = encode_body(&rows, true).unwrap();

        let mut decoded = String::new();
        GzDecoder::new(body.as_slice())
            .read_to_string(&mut decoded)
            .unwrap();
        assert_eq!(decoded, "[1,2,3]");
    }

    #[test]
    fn test_plain_body_is_json() {
        let body = encode_body(&vec!["a"], false).unwrap();
        assert_eq!(body, b"[\"a\"]");
    }
}
