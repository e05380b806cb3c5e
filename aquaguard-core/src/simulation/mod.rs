//! Simulated sensor input: random probe samples and the periodic feed that
//! drives real-time mode.

pub mod realtime;
pub mod sensor;

pub use realtime::RealtimeFeed;
pub use sensor::SensorSimulator;
