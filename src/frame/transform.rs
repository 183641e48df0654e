use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use super::error::FrameTransformError;
use super::orientation::{EarthOrientation, OrientationParameters};
use crate::propagate::OrbitalState;

// WGS-84 constants
pub const EARTH_EQUATORIAL_RADIUS_KM: f64 = 6378.137;
pub const WGS84_FLATTENING: f64 = 1.0 / 298.257_223_563;

const GEODETIC_MAX_ITERATIONS: usize = 10;
const GEODETIC_TOLERANCE_RAD: f64 = 1e-12;
const ARCSEC_TO_RAD: f64 = std::f64::consts::PI / (180.0 * 3600.0);

/// Earth-fixed geodetic coordinates on the WGS-84 ellipsoid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Geodetic {
    pub lat_deg: f64,
    /// Longitude in [-180, 180).
    pub lon_deg: f64,
    pub alt_km: f64,
}

impl Geodetic {
    pub fn is_finite(&self) -> bool {
        self.lat_deg.is_finite() && self.lon_deg.is_finite() && self.alt_km.is_finite()
    }
}

/// TEME state to geodetic coordinates, using orientation data valid at the state's epoch.
pub fn teme_to_geodetic(
    state: &OrbitalState,
    orientation: &dyn EarthOrientation,
) -> Result<Geodetic, FrameTransformError> {
    let params = orientation
        .parameters(state.epoch)
        .ok_or(FrameTransformError::OrientationUnavailable { epoch: state.epoch })?;

    let geodetic = ecef_to_geodetic(teme_to_ecef(state.position, state.epoch, &params));
    if geodetic.is_finite() {
        Ok(geodetic)
    } else {
        Err(FrameTransformError::NonFinite)
    }
}

/// Rotate a TEME position into the Earth-fixed frame: sidereal rotation at
/// UT1 into the pseudo-Earth-fixed frame, then polar motion.
pub fn teme_to_ecef(pos_teme: [f64; 3], epoch: DateTime<Utc>, params: &OrientationParameters) -> [f64; 3] {
    let ut1 = epoch + Duration::microseconds((params.dut1_s * 1e6).round() as i64);
    let gmst =
        sgp4::iau_epoch_to_sidereal_time(sgp4::julian_years_since_j2000(&ut1.naive_utc()));

    let cos_gmst = gmst.cos();
    let sin_gmst = gmst.sin();
    let pef = [
        pos_teme[0] * cos_gmst + pos_teme[1] * sin_gmst,
        -pos_teme[0] * sin_gmst + pos_teme[1] * cos_gmst,
        pos_teme[2],
    ];

    let xp = params.xp_arcsec * ARCSEC_TO_RAD;
    let yp = params.yp_arcsec * ARCSEC_TO_RAD;
    let (sin_xp, cos_xp) = xp.sin_cos();
    let (sin_yp, cos_yp) = yp.sin_cos();
    [
        cos_xp * pef[0] + sin_xp * sin_yp * pef[1] + sin_xp * cos_yp * pef[2],
        cos_yp * pef[1] - sin_yp * pef[2],
        -sin_xp * pef[0] + cos_xp * sin_yp * pef[1] + cos_xp * cos_yp * pef[2],
    ]
}

pub fn ecef_to_geodetic(ecef: [f64; 3]) -> Geodetic {
    let a = EARTH_EQUATORIAL_RADIUS_KM;
    let e2 = WGS84_FLATTENING * (2.0 - WGS84_FLATTENING);
    let [x, y, z] = ecef;

    let lon = y.atan2(x);
    let p = (x * x + y * y).sqrt();

    let mut lat = z.atan2(p * (1.0 - e2));
    for _ in 0..GEODETIC_MAX_ITERATIONS {
        let sin_lat = lat.sin();
        let n = a / (1.0 - e2 * sin_lat * sin_lat).sqrt();
        let next = (z + n * e2 * sin_lat).atan2(p);
        let delta = (next - lat).abs();
        lat = next;
        if delta < GEODETIC_TOLERANCE_RAD {
            break;
        }
    }

    let sin_lat = lat.sin();
    let alt = p * lat.cos() + z * sin_lat - a * (1.0 - e2 * sin_lat * sin_lat).sqrt();

    Geodetic {
        lat_deg: lat.to_degrees(),
        lon_deg: normalize_lon(lon.to_degrees()),
        alt_km: alt,
    }
}

fn normalize_lon(deg: f64) -> f64 {
    (deg + 180.0).rem_euclid(360.0) - 180.0
}
