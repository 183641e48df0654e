use std::f64::consts::TAU;

use serde::Serialize;

use super::error::DerivationError;
use super::kepler::{eccentric_anomaly, true_anomaly};
use crate::frame::{Geodetic, EARTH_EQUATORIAL_RADIUS_KM};
use crate::propagate::OrbitalState;
use crate::tle::TleRecord;

/// Earth gravitational parameter, km³/s².
pub const MU_EARTH_KM3_S2: f64 = 398_600.4418;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Scalar orbit description at the element set's epoch.
///
/// Angles are degrees in [0, 360); altitudes are measured from the WGS-84
/// equatorial radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivedElements {
    pub semi_major_axis_km: f64,
    pub perigee_alt_km: f64,
    pub apogee_alt_km: f64,
    pub period_min: f64,
    /// Speed of the propagated state, not a circular-orbit estimate.
    pub velocity_mag_km_s: f64,
    pub mean_anomaly_deg: f64,
    pub eccentric_anomaly_deg: f64,
    pub true_anomaly_deg: f64,
    pub arg_latitude_deg: f64,
    /// km²/s
    pub specific_angular_momentum: f64,
    pub radial_distance_km: f64,
    /// Negative angles (descending towards perigee) appear as values above 270.
    pub flight_path_angle_deg: f64,
    pub geodetic: Geodetic,
}

pub fn derive_elements(
    record: &TleRecord,
    state: &OrbitalState,
    geodetic: Geodetic,
) -> Result<DerivedElements, DerivationError> {
    let e = record.eccentricity;
    if !(0.0..1.0).contains(&e) {
        return Err(DerivationError::Hyperbolic { eccentricity: e });
    }
    let revs_per_day = record.mean_motion;
    if !(revs_per_day > 0.0 && revs_per_day.is_finite()) {
        return Err(DerivationError::NonPositiveMeanMotion(revs_per_day));
    }

    let n = revs_per_day * TAU / SECONDS_PER_DAY;
    let a = (MU_EARTH_KM3_S2 / (n * n)).cbrt();

    let mean_anomaly = record.mean_anomaly;
    let ecc_anomaly = eccentric_anomaly(mean_anomaly, e);
    let nu = true_anomaly(ecc_anomaly, e);
    let fpa = (e * nu.sin() / (1.0 + e * nu.cos())).atan();

    Ok(DerivedElements {
        semi_major_axis_km: finite(a, "semi_major_axis_km")?,
        perigee_alt_km: finite(a * (1.0 - e) - EARTH_EQUATORIAL_RADIUS_KM, "perigee_alt_km")?,
        apogee_alt_km: finite(a * (1.0 + e) - EARTH_EQUATORIAL_RADIUS_KM, "apogee_alt_km")?,
        period_min: finite(record.period_min(), "period_min")?,
        velocity_mag_km_s: finite(state.speed_km_s(), "velocity_mag_km_s")?,
        mean_anomaly_deg: degrees(mean_anomaly, "mean_anomaly_deg")?,
        eccentric_anomaly_deg: degrees(ecc_anomaly, "eccentric_anomaly_deg")?,
        true_anomaly_deg: degrees(nu, "true_anomaly_deg")?,
        arg_latitude_deg: degrees(record.arg_perigee + nu, "arg_latitude_deg")?,
        specific_angular_momentum: finite(
            (MU_EARTH_KM3_S2 * a * (1.0 - e * e)).sqrt(),
            "specific_angular_momentum",
        )?,
        radial_distance_km: finite(a * (1.0 - e * ecc_anomaly.cos()), "radial_distance_km")?,
        flight_path_angle_deg: degrees(fpa, "flight_path_angle_deg")?,
        geodetic,
    })
}

fn finite(value: f64, field: &'static str) -> Result<f64, DerivationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DerivationError::NonFinite { field })
    }
}

fn degrees(rad: f64, field: &'static str) -> Result<f64, DerivationError> {
    let deg = finite(rad, field)?.to_degrees().rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    Ok(if deg >= 360.0 { 0.0 } else { deg })
}
