mod error;
mod orientation;
mod transform;

pub use error::{FrameTransformError, OrientationError};
pub use orientation::{
    EarthOrientation, OrientationEntry, OrientationParameters, OrientationTable, ZeroOrientation,
};
pub use transform::{
    ecef_to_geodetic, teme_to_ecef, teme_to_geodetic, Geodetic, EARTH_EQUATORIAL_RADIUS_KM,
    WGS84_FLATTENING,
};
