use chrono::NaiveDate;
use thiserror::Error;

use crate::elements::DerivationError;
use crate::frame::FrameTransformError;
use crate::propagate::PropagationError;
use crate::tle::ParseError;

/// Batch-level failure. Per-record problems never surface here.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("no input records")]
    EmptyInput,
    #[error("catalog JSON is not an array: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reasons the filter drops an otherwise well-formed record.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidityError {
    #[error("decayed on {0}")]
    Decayed(NaiveDate),
    #[error("geodetic position is missing or not finite")]
    MissingPosition,
    #[error("altitude {0:.1} km is below the reentry floor")]
    BelowReentryFloor(f64),
    #[error("element set is stale ({age_days} days old)")]
    Inactive { age_days: i64 },
    #[error("catalog id {0} already accepted in this batch")]
    Duplicate(u32),
}

/// Why a single record could not be evaluated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Propagation(#[from] PropagationError),
    #[error(transparent)]
    FrameTransform(#[from] FrameTransformError),
    #[error(transparent)]
    Derivation(#[from] DerivationError),
}
