//! Ammonia risk monitoring engine.
//!
//! Sensor values go through a [`prediction::PredictionProvider`] to estimate
//! ammonia, the [`risk`] rules classify the result and produce advice, and a
//! [`series::SeriesStore`] keeps the recent window for statistics and charts.
//! [`session::MonitoringSession`] ties these together for one operator.

pub mod error;
pub mod logger;
pub mod prediction;
pub mod risk;
pub mod series;
pub mod session;
pub mod simulation;

pub use error::AquaError;
