mod error;
mod propagator;

pub use error::{PropagationCode, PropagationError};
pub use propagator::{propagate_at_epoch, OrbitalState};
