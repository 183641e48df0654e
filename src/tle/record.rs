use chrono::{DateTime, Utc};
use serde::Serialize;

/// Length of every TLE line, checksum digit included.
pub const TLE_LINE_LEN: usize = 69;

/// Mean orbital elements decoded from one two-line element set.
///
/// Angles are stored in radians, mean motion in revolutions per day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TleRecord {
    pub name: Option<String>,
    pub catalog_id: u32,
    pub classification: char,
    pub intl_designator: String,
    pub ephemeris_type: u8,
    pub element_set_number: u32,
    pub epoch: DateTime<Utc>,
    pub mean_motion_dot: f64,
    pub mean_motion_ddot: f64,
    pub bstar: f64,
    pub inclination: f64,
    pub raan: f64,
    pub eccentricity: f64,
    pub arg_perigee: f64,
    pub mean_anomaly: f64,
    pub mean_motion: f64,
    pub rev_num: u32,
    #[serde(skip)]
    pub line1: String,
    #[serde(skip)]
    pub line2: String,
}

impl TleRecord {
    pub fn period_min(&self) -> f64 {
        1440.0 / self.mean_motion
    }

    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("NORAD {}", self.catalog_id))
    }
}

/// Digit sum modulo 10 over the first 68 characters; `-` counts as 1.
pub fn checksum(line: &str) -> u8 {
    let sum: u32 = line
        .bytes()
        .take(TLE_LINE_LEN - 1)
        .map(|b| match b {
            b'0'..=b'9' => (b - b'0') as u32,
            b'-' => 1,
            _ => 0,
        })
        .sum();
    (sum % 10) as u8
}

/// True when the last column of a full-length line holds the right digit.
pub fn verify_checksum(line: &str) -> bool {
    line.len() == TLE_LINE_LEN
        && (line.as_bytes()[TLE_LINE_LEN - 1] as char).to_digit(10) == Some(checksum(line) as u32)
}
