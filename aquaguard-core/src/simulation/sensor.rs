use aquaguard_schemas::reading::{Reading, SensorSample};
use chrono::{DateTime, Duration, Utc};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::ops::Range;

const PH_RANGE: Range<f64> = 7.0..9.0;
const TEMPERATURE_RANGE: Range<f64> = 25.0..31.0;
const HISTORY_AMMONIA_RANGE: Range<f64> = 0.1..0.5;

/// Stands in for the pond's pH and temperature probes.
#[derive(Debug, Clone)]
pub struct SensorSimulator {
    rng: StdRng,
}

impl SensorSimulator {
    pub fn from_entropy() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    /// A new probe sample, rounded to two decimals as the probes report.
    pub fn next_sample(&mut self) -> SensorSample {
        SensorSample {
            ph: round2(self.rng.gen_range(PH_RANGE)),
            temperature: round2(self.rng.gen_range(TEMPERATURE_RANGE)),
        }
    }

    /// Daily readings for the `days` days before `end` plus `end` itself,
    /// oldest first. Used to give a fresh session something to chart.
    pub fn generate_history(&mut self, days: u32, end: DateTime<Utc>) -> Vec<Reading> {
        (0..=days)
            .rev()
            .map(|days_back| {
                Reading::new(
                    end - Duration::days(i64::from(days_back)),
                    self.rng.gen_range(PH_RANGE),
                    self.rng.gen_range(TEMPERATURE_RANGE),
                    self.rng.gen_range(HISTORY_AMMONIA_RANGE),
                )
            })
            .collect()
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
