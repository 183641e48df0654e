mod activity;
mod orbit;

pub use activity::{activity_cutoff_days, age_days, classify_activity, ActivityStatus, IngestMode};
pub use orbit::{classify_orbit_type, OrbitType, GEO_BAND_HIGH_KM, GEO_BAND_LOW_KM, LEO_CEILING_KM};
