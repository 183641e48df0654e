mod derive;
mod error;
mod kepler;

pub use derive::{derive_elements, DerivedElements, MU_EARTH_KM3_S2};
pub use error::DerivationError;
pub use kepler::{eccentric_anomaly, true_anomaly, KEPLER_MAX_ITERATIONS, KEPLER_TOLERANCE};
