use std::collections::HashSet;

use chrono::{DateTime, Duration, NaiveTime, Utc};
use serde::Serialize;

use super::error::{RecordError, ValidityError};
use super::metadata::RawSatellite;
use super::report::{CatalogEntry, IngestCounts};
use crate::classify::{ActivityStatus, IngestMode};

pub const DEFAULT_DECAY_GRACE_DAYS: i64 = 7;
pub const DEFAULT_REENTRY_FLOOR_KM: f64 = 80.0;

/// Acceptance rules for one batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterPolicy {
    pub mode: IngestMode,
    /// Objects whose decay date is older than `now - decay_grace` are dropped.
    #[serde(skip)]
    pub decay_grace: Duration,
    pub reentry_floor_km: f64,
    /// Drop inactive objects instead of keeping them with an `Inactive` verdict.
    pub drop_inactive: bool,
}

impl Default for FilterPolicy {
    fn default() -> Self {
        Self {
            mode: IngestMode::default(),
            decay_grace: Duration::days(DEFAULT_DECAY_GRACE_DAYS),
            reentry_floor_km: DEFAULT_REENTRY_FLOOR_KM,
            drop_inactive: false,
        }
    }
}

impl FilterPolicy {
    pub fn with_mode(mode: IngestMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Per-record rejection rules. Duplicates are handled by [`reduce`].
    pub fn check(&self, entry: &CatalogEntry, now: DateTime<Utc>) -> Result<(), ValidityError> {
        if let Some(decay) = entry.metadata.decay_date {
            if decay.and_time(NaiveTime::MIN).and_utc() < now - self.decay_grace {
                return Err(ValidityError::Decayed(decay));
            }
        }

        let geodetic = &entry.elements.geodetic;
        if !geodetic.is_finite() {
            return Err(ValidityError::MissingPosition);
        }
        if geodetic.alt_km < self.reentry_floor_km {
            return Err(ValidityError::BelowReentryFloor(geodetic.alt_km));
        }

        if self.drop_inactive && entry.activity == ActivityStatus::Inactive {
            return Err(ValidityError::Inactive {
                age_days: entry.age_days,
            });
        }

        Ok(())
    }
}

/// Sequential pass over per-record results in input order: counts failures,
/// applies the policy and keeps the first accepted entry per catalog id.
pub(crate) fn reduce(
    inputs: &[RawSatellite],
    results: Vec<Result<CatalogEntry, RecordError>>,
    policy: &FilterPolicy,
    now: DateTime<Utc>,
) -> (Vec<CatalogEntry>, IngestCounts) {
    let mut counts = IngestCounts {
        received: results.len(),
        ..IngestCounts::default()
    };
    let mut seen = HashSet::new();
    let mut accepted = Vec::new();

    for (index, result) in results.into_iter().enumerate() {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                log::warn!("record {} ({}) skipped: {}", index, describe(inputs.get(index)), err);
                if !matches!(err, RecordError::Parse(_)) {
                    counts.parsed += 1;
                }
                counts.record_failure(&err);
                continue;
            }
        };
        counts.parsed += 1;

        let verdict = policy.check(&entry, now).and_then(|()| {
            if seen.contains(&entry.catalog_id()) {
                Err(ValidityError::Duplicate(entry.catalog_id()))
            } else {
                Ok(())
            }
        });

        match verdict {
            Ok(()) => {
                seen.insert(entry.catalog_id());
                accepted.push(entry);
            }
            Err(reason) => {
                log::debug!("catalog id {} rejected: {}", entry.catalog_id(), reason);
                counts.record_rejection(&reason);
            }
        }
    }

    counts.accepted = accepted.len();
    (accepted, counts)
}

fn describe(raw: Option<&RawSatellite>) -> String {
    match raw {
        Some(RawSatellite {
            norad_cat_id: Some(id),
            ..
        }) => format!("NORAD {}", id),
        Some(RawSatellite {
            object_name: Some(name),
            ..
        }) => name.clone(),
        _ => "unidentified".to_string(),
    }
}
