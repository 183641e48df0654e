use chrono::{DateTime, Utc};
use serde::Serialize;
use sgp4::{Constants, Elements, MinutesSinceEpoch};

use super::error::{PropagationCode, PropagationError};
use crate::frame::EARTH_EQUATORIAL_RADIUS_KM;
use crate::tle::{checksum, TleRecord, TLE_LINE_LEN};

/// Position and velocity in the model's true-equator, mean-equinox frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrbitalState {
    pub epoch: DateTime<Utc>,
    /// km
    pub position: [f64; 3],
    /// km/s
    pub velocity: [f64; 3],
}

impl OrbitalState {
    pub fn radius_km(&self) -> f64 {
        norm(self.position)
    }

    pub fn speed_km_s(&self) -> f64 {
        norm(self.velocity)
    }
}

/// Evaluate the mean-element model exactly at the record's own epoch.
pub fn propagate_at_epoch(record: &TleRecord) -> Result<OrbitalState, PropagationError> {
    let line1 = model_line(&record.line1, record.catalog_id);
    let line2 = model_line(&record.line2, record.catalog_id);
    let elements = Elements::from_tle(record.name.clone(), line1.as_bytes(), line2.as_bytes())
    .map_err(|e| PropagationError::new(PropagationCode::InvalidElements, e))?;

    let constants = Constants::from_elements(&elements)
        .map_err(|e| PropagationError::new(PropagationCode::Initialization, e))?;

    let prediction = constants
        .propagate(MinutesSinceEpoch(0.0))
        .map_err(|e| PropagationError::new(PropagationCode::Evaluation, e))?;

    let state = OrbitalState {
        epoch: record.epoch,
        position: prediction.position,
        velocity: prediction.velocity,
    };

    if !state.position.iter().chain(&state.velocity).all(|v| v.is_finite()) {
        return Err(PropagationError::new(
            PropagationCode::NonFinite,
            "state vector is not finite",
        ));
    }

    let radius = state.radius_km();
    if radius < EARTH_EQUATORIAL_RADIUS_KM {
        return Err(PropagationError::new(
            PropagationCode::Decayed,
            format!("radius {:.1} km is below the Earth's surface", radius),
        ));
    }

    Ok(state)
}

/// Line text handed to the model. An Alpha-5 catalog field is folded back to
/// five digits with a fresh checksum; the model only uses it as a label.
fn model_line(line: &str, catalog_id: u32) -> String {
    let alpha5 = line.len() == TLE_LINE_LEN && line.as_bytes()[2].is_ascii_alphabetic();
    if !alpha5 || !line.is_ascii() {
        return line.to_string();
    }
    let body = format!("{}{:05}{}", &line[..2], catalog_id % 100_000, &line[7..TLE_LINE_LEN - 1]);
    let digit = checksum(&body);
    format!("{}{}", body, digit)
}

fn norm(v: [f64; 3]) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}
