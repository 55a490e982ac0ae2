//! CLI entry point for the rail delay statistics tool.
//!
//! Provides subcommands for running one extraction/aggregation pass over the
//! live trip-update feed and for inspecting the compiled-in route catalog.

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use rail_delay_stats::{
    analyzers::DelayTables,
    config::Config,
    error::SourceUnavailable,
    fetch::{entur_client, fetch_source},
    gtfs_rt::FeedMessage,
    output::{append_records, print_pretty, write_json_tables},
    pipeline::Pipeline,
    registry::{RouteCategory, RouteRegistry},
    store::{PgStatsStore, S3StatsStore, StatsStore},
};
use std::ffi::OsStr;
use std::path::Path;
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "rail_delay_stats")]
#[command(about = "Aggregate train delays from a GTFS-RT trip-update feed", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch one feed snapshot, aggregate delays and write the result tables
    Run {
        /// Path to a .pb file or URL to fetch (defaults to FEED_URL)
        #[arg(value_name = "FILE_OR_URL")]
        source: Option<String>,

        /// Directory for the JSON tables (defaults to OUTPUT_DIR)
        #[arg(short, long)]
        output_dir: Option<String>,

        /// Skip the feed and aggregate synthetic observations
        #[arg(long, default_value_t = false)]
        offline: bool,

        /// Save statistics to PostgreSQL at DATABASE_URL
        #[arg(long, default_value_t = false)]
        use_db: bool,

        /// Optional: S3 bucket to upload the JSON tables to (defaults to S3_BUCKET)
        #[arg(long)]
        s3_bucket: Option<String>,

        /// Optional: Gzip compress JSON tables before uploading to S3
        #[arg(long, default_value_t = false)]
        gzip: bool,

        /// Optional: also append the daily segment table to this CSV file
        #[arg(long)]
        csv: Option<String>,
    },
    /// Summarize the route catalog
    Routes {
        /// Only list routes of this category
        #[arg(short, long, value_enum)]
        category: Option<CategoryArg>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum CategoryArg {
    Local,
    Regional,
    AirportExpress,
}

impl From<CategoryArg> for RouteCategory {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Local => RouteCategory::Local,
            CategoryArg::Regional => RouteCategory::Regional,
            CategoryArg::AirportExpress => RouteCategory::AirportExpress,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let config = Config::from_env();

    // Logging setup: colored stderr + JSON rolling log file
    let log_dir = Path::new(&config.log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&config.log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("rail_delay_stats.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let registry = RouteRegistry::oslo();

    match cli.command {
        Commands::Run {
            source,
            output_dir,
            offline,
            use_db,
            s3_bucket,
            gzip,
            csv,
        } => {
            let output_dir = output_dir.unwrap_or_else(|| config.output_dir.clone());
            let s3_bucket = s3_bucket.or_else(|| config.s3_bucket.clone());

            let pipeline = Pipeline::new(&registry);
            let now = Utc::now();
            let run = if offline {
                pipeline.run_synthetic(now)
            } else {
                let source = source.unwrap_or_else(|| config.feed_url.clone());
                pipeline.run(fetcher(&config, &source).await, now)
            };

            if use_db {
                match &config.database_url {
                    Some(url) => {
                        if let Err(e) = save_to_database(url, &registry, &run.tables).await {
                            error!(error = %e, "Failed to save statistics to database");
                        }
                    }
                    None => error!("--use-db given but DATABASE_URL is not set, skipping database save"),
                }
            }

            if let Some(bucket) = s3_bucket {
                let store = S3StatsStore::from_env(bucket, now.date_naive(), gzip).await;
                if let Err(e) = store.save(&run.tables).await {
                    error!(error = %e, "Failed to upload tables to S3");
                }
            }

            print_pretty(&run.tables);
            write_json_tables(&output_dir, &run.tables)?;

            if let Some(csv_path) = csv {
                append_records(&csv_path, &run.tables.daily_stats)?;
            }

            info!(
                source = %run.source,
                observations = run.observation_count,
                output_dir = %output_dir,
                "Run completed"
            );
        }
        Commands::Routes { category } => {
            info!(
                routes = registry.route_count(),
                stations = registry.station_count(),
                "Route catalog"
            );

            let categories = match category {
                Some(c) => vec![c.into()],
                None => RouteCategory::ALL.to_vec(),
            };

            for category in categories {
                let routes = registry.routes_by_category(category);
                info!(category = %category, count = routes.len(), "Route category");
                for route in routes {
                    info!(
                        code = %route.code,
                        name = %route.name,
                        stops = route.stops.len(),
                        description = %route.description,
                        "Route"
                    );
                }
            }
        }
    }

    Ok(())
}

/// Loads feed data from a local file path or fetches it over HTTP.
///
/// Every failure, including client setup, is handed back as
/// `SourceUnavailable` so the pipeline can fall back to synthetic data.
#[tracing::instrument(skip(config))]
async fn fetcher(config: &Config, source: &str) -> Result<FeedMessage, SourceUnavailable> {
    let client = entur_client(&config.client_name, config.fetch_timeout)?;
    fetch_source(&client, source).await
}

async fn save_to_database(
    database_url: &str,
    registry: &RouteRegistry,
    tables: &DelayTables,
) -> Result<()> {
    let store = PgStatsStore::connect(database_url).await?;
    store.ensure_schema(registry).await?;
    store.save(tables).await
}
