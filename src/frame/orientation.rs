use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::error::OrientationError;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Earth orientation at one instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OrientationParameters {
    /// Polar motion, arcseconds.
    pub xp_arcsec: f64,
    pub yp_arcsec: f64,
    /// UT1 - UTC, seconds.
    pub dut1_s: f64,
}

/// Source of Earth orientation parameters.
pub trait EarthOrientation: Send + Sync {
    /// `None` when no data covers `epoch`.
    fn parameters(&self, epoch: DateTime<Utc>) -> Option<OrientationParameters>;
}

/// Treats UT1 as UTC and ignores polar motion. Always available; geodetic
/// positions carry errors of the order of a few hundred metres.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroOrientation;

impl EarthOrientation for ZeroOrientation {
    fn parameters(&self, _epoch: DateTime<Utc>) -> Option<OrientationParameters> {
        Some(OrientationParameters::default())
    }
}

/// One daily row of an orientation table file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrientationEntry {
    pub date: NaiveDate,
    pub xp_arcsec: f64,
    pub yp_arcsec: f64,
    pub dut1_s: f64,
}

impl OrientationEntry {
    fn parameters(&self) -> OrientationParameters {
        OrientationParameters {
            xp_arcsec: self.xp_arcsec,
            yp_arcsec: self.yp_arcsec,
            dut1_s: self.dut1_s,
        }
    }
}

/// Daily orientation values (0h UTC), linearly interpolated in between.
#[derive(Debug, Clone)]
pub struct OrientationTable {
    entries: Vec<OrientationEntry>,
}

impl OrientationTable {
    pub fn new(mut entries: Vec<OrientationEntry>) -> Result<Self, OrientationError> {
        if entries.is_empty() {
            return Err(OrientationError::Empty);
        }
        entries.sort_by_key(|e| e.date);
        entries.dedup_by_key(|e| e.date);
        Ok(Self { entries })
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, OrientationError> {
        let entries: Vec<OrientationEntry> = serde_yaml::from_str(yaml)?;
        Self::new(entries)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, OrientationError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn midnight(date: NaiveDate) -> DateTime<Utc> {
        date.and_time(chrono::NaiveTime::MIN).and_utc()
    }
}

impl EarthOrientation for OrientationTable {
    fn parameters(&self, epoch: DateTime<Utc>) -> Option<OrientationParameters> {
        let first = self.entries.first()?;
        let last = self.entries.last()?;
        if epoch < Self::midnight(first.date) || epoch > Self::midnight(last.date) {
            return None;
        }

        // Index of the first entry strictly after the epoch's day.
        let upper = self
            .entries
            .partition_point(|e| Self::midnight(e.date) <= epoch);
        let lower = &self.entries[upper - 1];
        let Some(next) = self.entries.get(upper) else {
            return Some(lower.parameters());
        };

        let start = Self::midnight(lower.date);
        let span = (Self::midnight(next.date) - start).num_milliseconds() as f64 / 1000.0;
        // Gaps longer than a day are not bridged.
        if span > SECONDS_PER_DAY {
            return None;
        }
        let frac = (epoch - start).num_milliseconds() as f64 / 1000.0 / span;

        let a = lower.parameters();
        let b = next.parameters();
        let lerp = |x: f64, y: f64| x + (y - x) * frac;
        // UT1-UTC jumps by a second at a leap second; hold the earlier value.
        let dut1_s = if (b.dut1_s - a.dut1_s).abs() > 0.5 {
            a.dut1_s
        } else {
            lerp(a.dut1_s, b.dut1_s)
        };

        Some(OrientationParameters {
            xp_arcsec: lerp(a.xp_arcsec, b.xp_arcsec),
            yp_arcsec: lerp(a.yp_arcsec, b.yp_arcsec),
            dut1_s,
        })
    }
}
