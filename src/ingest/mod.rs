mod error;
mod filter;
mod metadata;
mod pipeline;
mod report;

use std::sync::Arc;
use std::thread;

use chrono::{DateTime, Utc};
use uuid::Uuid;

pub use error::{IngestError, RecordError, ValidityError};
pub use filter::{FilterPolicy, DEFAULT_DECAY_GRACE_DAYS, DEFAULT_REENTRY_FLOOR_KM};
pub use metadata::{RawSatellite, SatelliteMetadata};
pub use report::{CatalogEntry, IngestCounts, IngestReport};

use crate::config::{Config, ConfigError};
use crate::frame::{EarthOrientation, ZeroOrientation};
use crate::tle::parse_multi_tle;
use pipeline::EvalContext;

/// Turns raw catalog records into a filtered, deduplicated catalog.
#[derive(Clone)]
pub struct Ingestor {
    pub policy: FilterPolicy,
    /// Upper bound on worker threads, at least 1.
    pub workers: usize,
    pub orientation: Arc<dyn EarthOrientation>,
}

impl Ingestor {
    pub fn new(policy: FilterPolicy) -> Self {
        Self {
            policy,
            workers: default_workers(),
            orientation: Arc::new(ZeroOrientation),
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn with_orientation(mut self, orientation: Arc<dyn EarthOrientation>) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let mut ingestor = Self::new(config.policy()?).with_orientation(config.orientation()?);
        if config.ingest.workers > 0 {
            ingestor = ingestor.with_workers(config.ingest.workers);
        }
        Ok(ingestor)
    }

    pub fn ingest(
        &self,
        records: &[RawSatellite],
        now: DateTime<Utc>,
    ) -> Result<IngestReport, IngestError> {
        if records.is_empty() {
            return Err(IngestError::EmptyInput);
        }

        let batch_id = Uuid::new_v4();
        log::info!(
            "batch {}: ingesting {} records ({} mode, {} workers)",
            batch_id,
            records.len(),
            self.policy.mode,
            self.workers
        );

        let ctx = EvalContext {
            mode: self.policy.mode,
            now,
            orientation: self.orientation.as_ref(),
        };
        let results = pipeline::evaluate_all(records, self.workers, &ctx);
        let (entries, counts) = filter::reduce(records, results, &self.policy, now);

        log::info!(
            "batch {}: accepted {}/{} (parse {}, propagation {}, transform {}, derivation {}, rejected {}, duplicate {})",
            batch_id,
            counts.accepted,
            counts.received,
            counts.parse_failed,
            counts.propagation_failed,
            counts.transform_failed,
            counts.derivation_failed,
            counts.stale_or_invalid,
            counts.duplicate
        );

        Ok(IngestReport {
            batch_id,
            mode: self.policy.mode,
            now,
            counts,
            entries,
        })
    }

    /// Ingest an upstream JSON array. Elements that do not decode count as parse failures.
    pub fn ingest_json(&self, json: &str, now: DateTime<Utc>) -> Result<IngestReport, IngestError> {
        let records = RawSatellite::parse_json_batch(json)?;
        self.ingest(&records, now)
    }

    /// Ingest a plain 2-line or 3-line TLE file.
    pub fn ingest_tle_text(
        &self,
        text: &str,
        now: DateTime<Utc>,
    ) -> Result<IngestReport, IngestError> {
        let records: Vec<RawSatellite> = parse_multi_tle(text)
            .into_iter()
            .map(RawSatellite::from_tle)
            .collect();
        self.ingest(&records, now)
    }
}

impl Default for Ingestor {
    fn default() -> Self {
        Self::new(FilterPolicy::default())
    }
}

fn default_workers() -> usize {
    thread::available_parallelism().map_or(1, |n| n.get())
}
