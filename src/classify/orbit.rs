use serde::{Deserialize, Serialize};

pub const LEO_CEILING_KM: f64 = 2_000.0;
pub const GEO_BAND_LOW_KM: f64 = 35_786.0;
pub const GEO_BAND_HIGH_KM: f64 = 35_792.0;

/// Orbit regime by mean altitude.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum OrbitType {
    Leo,
    Meo,
    Geo,
    Heo,
}

/// Classify by the average of perigee and apogee altitude (km).
///
/// Total: anything that is not LEO, MEO or inside the geosynchronous band,
/// including non-finite input, is HEO.
pub fn classify_orbit_type(perigee_alt_km: f64, apogee_alt_km: f64) -> OrbitType {
    let avg = (perigee_alt_km + apogee_alt_km) / 2.0;
    if avg < LEO_CEILING_KM {
        OrbitType::Leo
    } else if (LEO_CEILING_KM..GEO_BAND_LOW_KM).contains(&avg) {
        OrbitType::Meo
    } else if (GEO_BAND_LOW_KM..=GEO_BAND_HIGH_KM).contains(&avg) {
        OrbitType::Geo
    } else {
        OrbitType::Heo
    }
}
