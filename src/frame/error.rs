use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FrameTransformError {
    #[error("earth orientation data unavailable for {epoch}")]
    OrientationUnavailable { epoch: DateTime<Utc> },
    #[error("transform produced non-finite coordinates")]
    NonFinite,
}

#[derive(Debug, Error)]
pub enum OrientationError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("orientation table is empty")]
    Empty,
}
