use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DerivationError {
    #[error("eccentricity {eccentricity} is outside [0, 1)")]
    Hyperbolic { eccentricity: f64 },
    #[error("mean motion must be positive, got {0}")]
    NonPositiveMeanMotion(f64),
    #[error("derived {field} is not finite")]
    NonFinite { field: &'static str },
}
