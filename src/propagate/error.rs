use std::fmt::Display;

use thiserror::Error;

/// Stage of the mean-element model that rejected a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "snake_case")]
pub enum PropagationCode {
    /// The model could not rebuild its elements from the TLE text.
    InvalidElements,
    /// Model initialization failed (e.g. out-of-range eccentricity or mean motion).
    Initialization,
    /// Evaluation at epoch failed (e.g. negative semi-latus rectum).
    Evaluation,
    /// Evaluated radius is inside the Earth.
    Decayed,
    /// Evaluated state contains NaN or infinite components.
    NonFinite,
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("propagation failed ({code}): {message}")]
pub struct PropagationError {
    pub code: PropagationCode,
    pub message: String,
}

impl PropagationError {
    pub fn new(code: PropagationCode, message: impl Display) -> Self {
        Self {
            code,
            message: message.to_string(),
        }
    }
}
