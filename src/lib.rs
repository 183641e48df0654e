//! Ingestion of two-line element catalogs: parsing, SGP4 evaluation at epoch,
//! geodetic positions, derived orbital elements and activity classification.

pub mod classify;
pub mod config;
pub mod elements;
pub mod frame;
pub mod ingest;
pub mod propagate;
pub mod tle;

#[cfg(test)]
mod testing;

pub use config::{Config, ConfigError};
pub use ingest::{FilterPolicy, IngestError, IngestReport, Ingestor, RawSatellite};
