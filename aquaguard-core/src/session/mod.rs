//! Session-scoped dashboard state.
//!
//! A `MonitoringSession` owns everything one operator's dashboard needs: the
//! reading window, the latest assessment, an optional CSV log and, while
//! real-time mode is on, the simulated sensor feed. All store mutations
//! happen on the thread that owns the session.

pub mod builder;

pub use builder::SessionBuilder;

use crate::{
    error::AquaError,
    logger::ReadingLogger,
    prediction::PredictionProvider,
    risk,
    series::SeriesStore,
    simulation::{RealtimeFeed, SensorSimulator},
};
use aquaguard_schemas::{
    reading::{Reading, SensorSample},
    risk::{Assessment, DashboardView},
};
use chrono::Utc;
use std::time::Duration;

pub struct MonitoringSession {
    pub(super) provider: PredictionProvider,
    pub(super) store: SeriesStore,
    pub(super) logger: Option<ReadingLogger>,
    pub(super) feed: Option<RealtimeFeed>,
    pub(super) latest: Option<Assessment>,
}

impl MonitoringSession {
    /// Runs one manual prediction cycle.
    ///
    /// On failure nothing is stored and the previous assessment is kept.
    pub fn predict(&mut self, ph: f64, temperature: f64) -> Result<Assessment, AquaError> {
        if self.feed.is_some() {
            return Err(AquaError::RealTimeActive);
        }
        self.run_cycle(SensorSample { ph, temperature })
    }

    /// Switches to real-time mode, replacing manual input with simulated
    /// samples every `interval`.
    pub fn enable_realtime(&mut self, interval: Duration, simulator: SensorSimulator) -> Result<(), AquaError> {
        if self.feed.is_some() {
            return Err(AquaError::RealTimeActive);
        }
        log::info!("Real-time mode enabled ({:?} interval)", interval);
        self.feed = Some(RealtimeFeed::start(interval, simulator));
        Ok(())
    }

    pub fn disable_realtime(&mut self) {
        if let Some(feed) = self.feed.take() {
            feed.stop();
            log::info!("Real-time mode disabled");
        }
    }

    pub fn is_realtime(&self) -> bool {
        self.feed.is_some()
    }

    /// Waits for the next simulated sample and runs a prediction cycle on it.
    ///
    /// Returns `Ok(None)` when real-time mode is off or the feed has ended.
    pub fn next_realtime_tick(&mut self) -> Result<Option<Assessment>, AquaError> {
        let sample = match self.feed.as_ref().and_then(|feed| feed.recv()) {
            Some(sample) => sample,
            None => return Ok(None),
        };
        self.run_cycle(sample).map(Some)
    }

    pub fn latest(&self) -> Option<&Assessment> {
        self.latest.as_ref()
    }

    pub fn store(&self) -> &SeriesStore {
        &self.store
    }

    pub fn provider(&self) -> &PredictionProvider {
        &self.provider
    }

    pub fn log_path(&self) -> Option<&str> {
        self.logger.as_ref().map(|l| l.path())
    }

    /// The latest assessment, window statistics and the last `chart_window`
    /// readings.
    pub fn dashboard(&self, chart_window: usize) -> DashboardView {
        DashboardView {
            latest: self.latest.clone(),
            stats: self.store.aggregate(),
            recent: self.store.recent(chart_window),
        }
    }

    fn run_cycle(&mut self, sample: SensorSample) -> Result<Assessment, AquaError> {
        // Store what the model saw, so clamped inputs never leave the bounds.
        let (sample, ammonia) = self.provider.predict_sample(sample)?;

        // Wall clocks can step backwards; keep the window ordered.
        let mut timestamp = Utc::now();
        if let Some(last) = self.store.latest() {
            timestamp = timestamp.max(last.timestamp);
        }

        let reading = Reading::new(timestamp, sample.ph, sample.temperature, ammonia);
        let assessment = risk::assess(&reading);

        self.store.append(reading)?;
        if let Some(logger) = &mut self.logger {
            if let Err(e) = logger.log_reading(&assessment.reading) {
                log::warn!("Reading was not written to the log: {}", e);
            }
        }

        log::debug!(
            "pH {:.2}, {:.2}°C -> {:.4} mg/L ({})",
            sample.ph,
            sample.temperature,
            ammonia,
            assessment.tier
        );
        self.latest = Some(assessment.clone());
        Ok(assessment)
    }
}
