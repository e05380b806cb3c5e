use crate::{
    error::AquaError,
    prediction::{PH_MAX, PH_MIN, TEMPERATURE_MAX_C, TEMPERATURE_MIN_C},
};
use aquaguard_schemas::reading::{Reading, SeriesStats};
use std::collections::VecDeque;

/// Default number of readings retained per session.
pub const DEFAULT_CAPACITY: usize = 50;

/// Checks the value ranges every stored reading must satisfy: pH in
/// `[0, 14]`, temperature in `[0, 40]` and a finite, non-negative ammonia.
///
/// Readings produced by a session always pass; this guards readings loaded
/// from outside, such as an edited log.
pub fn check_reading(reading: &Reading) -> Result<(), AquaError> {
    let checks = [
        ("pH", reading.ph, PH_MIN, PH_MAX),
        ("temperature", reading.temperature, TEMPERATURE_MIN_C, TEMPERATURE_MAX_C),
        ("ammonia", reading.ammonia, 0.0, f64::MAX),
    ];
    for (parameter, value, min, max) in checks {
        if !(min..=max).contains(&value) {
            return Err(AquaError::InvalidInput { parameter, value });
        }
    }
    Ok(())
}

/// A bounded, chronologically ordered window of readings.
///
/// The oldest reading is evicted once the capacity is exceeded.
#[derive(Debug, Clone)]
pub struct SeriesStore {
    readings: VecDeque<Reading>,
    capacity: usize,
}

impl SeriesStore {
    /// Creates an empty store. A capacity of zero is raised to one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            readings: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends a reading at the tail, evicting from the head when full.
    ///
    /// # Errors
    ///
    /// Returns `AquaError::OutOfOrderReading` if the reading is older than the
    /// current tail; the store is left unchanged.
    pub fn append(&mut self, reading: Reading) -> Result<(), AquaError> {
        if let Some(last) = self.readings.back() {
            if reading.timestamp < last.timestamp {
                return Err(AquaError::OutOfOrderReading(reading.timestamp));
            }
        }

        self.readings.push_back(reading);
        while self.readings.len() > self.capacity {
            self.readings.pop_front();
        }
        Ok(())
    }

    /// The last `min(k, len)` readings, oldest first.
    pub fn recent(&self, k: usize) -> Vec<Reading> {
        let skip = self.readings.len().saturating_sub(k);
        self.readings.iter().skip(skip).cloned().collect()
    }

    /// Means and peak ammonia over the whole retained window, or `None` when
    /// the store is empty.
    pub fn aggregate(&self) -> Option<SeriesStats> {
        if self.readings.is_empty() {
            return None;
        }

        let n = self.readings.len() as f64;
        let (sum_ph, sum_temp, sum_ammonia, max_ammonia) = self.readings.iter().fold(
            (0.0, 0.0, 0.0, f64::NEG_INFINITY),
            |(ph, temp, nh3, peak), r| {
                (ph + r.ph, temp + r.temperature, nh3 + r.ammonia, f64::max(peak, r.ammonia))
            },
        );

        Some(SeriesStats {
            mean_ph: sum_ph / n,
            mean_temperature: sum_temp / n,
            mean_ammonia: sum_ammonia / n,
            max_ammonia,
        })
    }

    pub fn latest(&self) -> Option<&Reading> {
        self.readings.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Reading> {
        self.readings.iter()
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for SeriesStore {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}
