//! One-shot extraction and aggregation of a feed snapshot.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;
use std::fmt;
use tracing::{info, warn};

use crate::analyzers::{Aggregator, DelayTables};
use crate::error::SourceUnavailable;
use crate::extractor::DelayExtractor;
use crate::gtfs_rt::FeedMessage;
use crate::observation::DelayObservation;
use crate::registry::RouteRegistry;
use crate::synthetic::SyntheticFeedGenerator;

/// Where a run's observations came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ObservationSource {
    Live,
    Synthetic,
}

impl fmt::Display for ObservationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObservationSource::Live => f.write_str("live"),
            ObservationSource::Synthetic => f.write_str("synthetic"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PipelineRun {
    pub source: ObservationSource,
    pub observation_count: usize,
    pub tables: DelayTables,
}

pub struct Pipeline<'a> {
    extractor: DelayExtractor<'a>,
    generator: SyntheticFeedGenerator<'a>,
    aggregator: Aggregator<'a>,
}

impl<'a> Pipeline<'a> {
    pub fn new(registry: &'a RouteRegistry) -> Self {
        Self {
            extractor: DelayExtractor::new(registry),
            generator: SyntheticFeedGenerator::new(registry),
            aggregator: Aggregator::new(registry),
        }
    }

    pub fn with_aggregator(mut self, aggregator: Aggregator<'a>) -> Self {
        self.aggregator = aggregator;
        self
    }

    /// Aggregates a fetched feed, or synthetic data when the fetch failed.
    pub fn run(&self, fetched: Result<FeedMessage, SourceUnavailable>, now: DateTime<Utc>) -> PipelineRun {
        self.run_with(fetched, &mut rand::rng(), now)
    }

    pub fn run_with<R: Rng>(
        &self,
        fetched: Result<FeedMessage, SourceUnavailable>,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> PipelineRun {
        let (source, observations) = match fetched {
            Ok(feed) => (
                ObservationSource::Live,
                self.extractor.extract(&feed.entity, now),
            ),
            Err(e) => {
                warn!(error = %e, "Live feed unavailable, using synthetic observations");
                (
                    ObservationSource::Synthetic,
                    self.generator.generate_with(rng, now),
                )
            }
        };

        self.aggregate(source, &observations)
    }

    /// Aggregates synthetic observations without consulting any feed.
    pub fn run_synthetic(&self, now: DateTime<Utc>) -> PipelineRun {
        let observations = self.generator.generate(now);
        self.aggregate(ObservationSource::Synthetic, &observations)
    }

    /// Aggregates observations that were produced elsewhere.
    pub fn aggregate(&self, source: ObservationSource, observations: &[DelayObservation]) -> PipelineRun {
        let tables = self.aggregator.aggregate(observations);

        info!(
            source = %source,
            observations = observations.len(),
            daily_rows = tables.daily_stats.len(),
            hourly_rows = tables.hourly_stats.len(),
            route_rows = tables.route_stats.len(),
            "Delay tables built"
        );

        PipelineRun {
            source,
            observation_count: observations.len(),
            tables,
        }
    }
}
