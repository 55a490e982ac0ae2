//! Runtime settings read from the environment (after `.env` is loaded).
//!
//! | Variable        | Default                                                    |
//! |-----------------|------------------------------------------------------------|
//! | `FEED_URL`      | `https://api.entur.org/realtime/v1/gtfs-rt/trip-updates`   |
//! | `ET_CLIENT_NAME`| `rail-delay-stats`                                         |
//! | `OUTPUT_DIR`    | `tmp`                                                      |
//! | `DATABASE_URL`  | unset (PostgreSQL disabled)                                |
//! | `S3_BUCKET`     | unset (S3 upload disabled)                                 |
//! | `LOG_FILE_PATH` | `logs/rail_delay_stats.log`                                |

use std::time::Duration;

pub const DEFAULT_FEED_URL: &str = "https://api.entur.org/realtime/v1/gtfs-rt/trip-updates";
pub const DEFAULT_CLIENT_NAME: &str = "rail-delay-stats";
pub const DEFAULT_OUTPUT_DIR: &str = "tmp";
pub const DEFAULT_LOG_FILE_PATH: &str = "logs/rail_delay_stats.log";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub feed_url: String,
    pub client_name: String,
    pub output_dir: String,
    pub database_url: Option<String>,
    pub s3_bucket: Option<String>,
    pub log_file_path: String,
    pub fetch_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            feed_url: get("FEED_URL").unwrap_or_else(|| DEFAULT_FEED_URL.to_string()),
            client_name: get("ET_CLIENT_NAME").unwrap_or_else(|| DEFAULT_CLIENT_NAME.to_string()),
            output_dir: get("OUTPUT_DIR").unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_string()),
            database_url: get("DATABASE_URL"),
            s3_bucket: get("S3_BUCKET"),
            log_file_path: get("LOG_FILE_PATH")
                .unwrap_or_else(|| DEFAULT_LOG_FILE_PATH.to_string()),
            fetch_timeout: Duration::from_secs(30),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[]));
        assert_eq!(config.feed_url, DEFAULT_FEED_URL);
        assert_eq!(config.client_name, DEFAULT_CLIENT_NAME);
        assert_eq!(config.output_dir, "tmp");
        assert_eq!(config.database_url, None);
        assert_eq!(config.s3_bucket, None);
        assert_eq!(config.fetch_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_overrides_and_empty_values() {
        let config = Config::from_lookup(lookup(&[
            ("FEED_URL", "http://localhost:8080/tu.pb"),
            ("DATABASE_URL", "postgres://localhost/train_delays"),
            ("S3_BUCKET", "  "),
        ]));
        assert_eq!(config.feed_url, "http://localhost:8080/tu.pb");
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/train_delays")
        );
        assert_eq!(config.s3_bucket, None);
    }
}
