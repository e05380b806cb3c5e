use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One completed prediction cycle: the two sensor inputs and the predicted
/// ammonia concentration (mg/L).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub timestamp: DateTime<Utc>,
    pub ph: f64,
    /// Water temperature in °C.
    pub temperature: f64,
    pub ammonia: f64,
}

impl Reading {
    pub fn new(timestamp: DateTime<Utc>, ph: f64, temperature: f64, ammonia: f64) -> Self {
        Self {
            timestamp,
            ph,
            temperature,
            ammonia,
        }
    }
}

/// A raw pair of sensor values, before any prediction has been made.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorSample {
    pub ph: f64,
    pub temperature: f64,
}

/// Rolling statistics over a window of readings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesStats {
    pub mean_ph: f64,
    pub mean_temperature: f64,
    pub mean_ammonia: f64,
    pub max_ammonia: f64,
}
