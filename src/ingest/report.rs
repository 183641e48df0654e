use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::error::{RecordError, ValidityError};
use super::metadata::SatelliteMetadata;
use crate::classify::{ActivityStatus, IngestMode, OrbitType};
use crate::elements::DerivedElements;
use crate::tle::TleRecord;

/// One accepted catalog object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogEntry {
    pub record: TleRecord,
    pub elements: DerivedElements,
    pub orbit_type: OrbitType,
    pub activity: ActivityStatus,
    pub age_days: i64,
    pub metadata: SatelliteMetadata,
}

impl CatalogEntry {
    pub fn catalog_id(&self) -> u32 {
        self.record.catalog_id
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestCounts {
    pub received: usize,
    pub parse_failed: usize,
    pub parsed: usize,
    pub propagation_failed: usize,
    pub transform_failed: usize,
    pub derivation_failed: usize,
    pub stale_or_invalid: usize,
    pub duplicate: usize,
    pub accepted: usize,
}

impl IngestCounts {
    pub(crate) fn record_failure(&mut self, err: &RecordError) {
        match err {
            RecordError::Parse(_) => self.parse_failed += 1,
            RecordError::Propagation(_) => self.propagation_failed += 1,
            RecordError::FrameTransform(_) => self.transform_failed += 1,
            RecordError::Derivation(_) => self.derivation_failed += 1,
        }
    }

    pub(crate) fn record_rejection(&mut self, err: &ValidityError) {
        match err {
            ValidityError::Duplicate(_) => self.duplicate += 1,
            _ => self.stale_or_invalid += 1,
        }
    }

    /// Every received record lands in exactly one bucket.
    pub fn is_balanced(&self) -> bool {
        self.received == self.parse_failed + self.parsed
            && self.parsed
                == self.propagation_failed
                    + self.transform_failed
                    + self.derivation_failed
                    + self.stale_or_invalid
                    + self.duplicate
                    + self.accepted
    }
}

/// Result of one ingestion batch.
#[derive(Debug, Clone, Serialize)]
pub struct IngestReport {
    pub batch_id: Uuid,
    pub mode: IngestMode,
    pub now: DateTime<Utc>,
    pub counts: IngestCounts,
    pub entries: Vec<CatalogEntry>,
}

impl IngestReport {
    pub fn active(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries
            .iter()
            .filter(|e| e.activity == ActivityStatus::Active)
    }
}
