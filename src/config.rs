use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

use crate::classify::IngestMode;
use crate::frame::{EarthOrientation, OrientationError, OrientationTable, ZeroOrientation};
use crate::ingest::{FilterPolicy, DEFAULT_REENTRY_FLOOR_KM};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid duration '{value}': {source}")]
    InvalidDuration {
        value: String,
        source: humantime::DurationError,
    },
    #[error("duration '{0}' is out of range")]
    DurationOutOfRange(String),
    #[error("orientation table: {0}")]
    Orientation(#[from] OrientationError),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ingest: IngestConfig,
    #[serde(default)]
    pub orientation: OrientationConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IngestConfig {
    #[serde(default)]
    pub mode: IngestMode,
    /// Worker threads; 0 means one per available core.
    #[serde(default)]
    pub workers: usize,
    /// Humantime duration, e.g. `7days` or `36h`.
    #[serde(default = "default_decay_grace")]
    pub decay_grace: String,
    #[serde(default = "default_reentry_floor_km")]
    pub reentry_floor_km: f64,
    #[serde(default)]
    pub drop_inactive: bool,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            mode: IngestMode::default(),
            workers: 0,
            decay_grace: default_decay_grace(),
            reentry_floor_km: default_reentry_floor_km(),
            drop_inactive: false,
        }
    }
}

fn default_decay_grace() -> String {
    "7days".to_string()
}

fn default_reentry_floor_km() -> f64 {
    DEFAULT_REENTRY_FLOOR_KM
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrientationConfig {
    /// YAML file with daily polar motion and UT1-UTC rows. Without it UT1 is taken as UTC.
    pub table: Option<PathBuf>,
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        // Fail early on a bad duration rather than at the first batch.
        config.policy()?;
        Ok(config)
    }

    pub fn policy(&self) -> Result<FilterPolicy, ConfigError> {
        let value = self.ingest.decay_grace.trim();
        let grace = humantime::parse_duration(value).map_err(|source| {
            ConfigError::InvalidDuration {
                value: value.to_string(),
                source,
            }
        })?;
        let decay_grace = chrono::Duration::from_std(grace)
            .map_err(|_| ConfigError::DurationOutOfRange(value.to_string()))?;

        Ok(FilterPolicy {
            mode: self.ingest.mode,
            decay_grace,
            reentry_floor_km: self.ingest.reentry_floor_km,
            drop_inactive: self.ingest.drop_inactive,
        })
    }

    pub fn orientation(&self) -> Result<Arc<dyn EarthOrientation>, ConfigError> {
        Ok(match &self.orientation.table {
            Some(path) => {
                let table = OrientationTable::from_file(path)?;
                log::info!("loaded {} orientation rows from {}", table.len(), path.display());
                Arc::new(table)
            }
            None => Arc::new(ZeroOrientation),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn empty_document_uses_defaults() {
        let config = Config::from_str("{}").unwrap();
        assert_eq!(config.ingest.workers, 0);
        assert!(config.orientation.table.is_none());
        assert_eq!(config.policy().unwrap(), FilterPolicy::default());
    }

    #[test]
    fn full_document() {
        let yaml = r#"
ingest:
  mode: prediction
  workers: 4
  decay_grace: 36h
  reentry_floor_km: 100
  drop_inactive: true
orientation:
  table: /var/lib/eop.yaml
"#;
        let config = Config::from_str(yaml).unwrap();
        assert_eq!(config.ingest.workers, 4);
        assert_eq!(
            config.orientation.table.as_deref(),
            Some(Path::new("/var/lib/eop.yaml"))
        );

        let policy = config.policy().unwrap();
        assert_eq!(policy.mode, IngestMode::Prediction);
        assert_eq!(policy.decay_grace, Duration::hours(36));
        assert_eq!(policy.reentry_floor_km, 100.0);
        assert!(policy.drop_inactive);
    }

    #[test]
    fn bad_duration_is_rejected() {
        let err = Config::from_str("ingest:\n  decay_grace: a week\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDuration { .. }));
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let err = Config::from_str("ingest:\n  mode: archive\n").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn missing_orientation_file() {
        let config = Config {
            orientation: OrientationConfig {
                table: Some(PathBuf::from("/nonexistent/eop.yaml")),
            },
            ..Config::default()
        };
        assert!(matches!(
            config.orientation(),
            Err(ConfigError::Orientation(OrientationError::Io(_)))
        ));
    }
}
