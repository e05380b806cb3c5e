//! Shared data types for the AquaGuard workspace.
//!
//! Everything here is plain data: readings, risk tiers, advice entries,
//! serialized model artifacts and the on-disk dashboard configuration.

pub mod file_formats;
pub mod model;
pub mod reading;
pub mod risk;
