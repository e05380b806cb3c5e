use super::MonitoringSession;
use crate::{
    error::AquaError,
    logger::ReadingLogger,
    prediction::PredictionProvider,
    series::{self, SeriesStore, DEFAULT_CAPACITY},
};
use aquaguard_schemas::{file_formats::InputPolicy, reading::Reading};

/// A fluent builder for a `MonitoringSession`.
pub struct SessionBuilder {
    provider: Option<PredictionProvider>,
    capacity: usize,
    input_policy: Option<InputPolicy>,
    history: Vec<Reading>,
    log_path: Option<String>,
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self {
            provider: None,
            capacity: DEFAULT_CAPACITY,
            input_policy: None,
            history: Vec::new(),
            log_path: None,
        }
    }
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the prediction provider. Providers are cheap to clone, so one
    /// loaded model can back many sessions.
    pub fn with_provider(mut self, provider: PredictionProvider) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Sets how many readings the session keeps for statistics and charts.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Overrides the input policy of the provider. Without this call the
    /// provider keeps its own policy.
    pub fn with_input_policy(mut self, policy: InputPolicy) -> Self {
        self.input_policy = Some(policy);
        self
    }

    /// Pre-loads readings, e.g. simulated history or a previous log.
    pub fn with_history(mut self, history: Vec<Reading>) -> Self {
        self.history = history;
        self
    }

    /// Writes every reading produced by the session to a CSV file.
    pub fn with_reading_log(mut self, path: &str) -> Self {
        self.log_path = Some(path.to_string());
        self
    }

    /// Consumes the builder and returns a ready session.
    ///
    /// # Errors
    ///
    /// Returns `AquaError::ProviderNotDefined` without a provider,
    /// `AquaError::ConfigError` for a zero capacity, and propagates history
    /// range, ordering and log creation errors.
    pub fn build(self) -> Result<MonitoringSession, AquaError> {
        let mut provider = self.provider.ok_or(AquaError::ProviderNotDefined)?;
        if let Some(policy) = self.input_policy {
            provider = provider.with_input_policy(policy);
        }

        if self.capacity == 0 {
            return Err(AquaError::ConfigError(
                "series capacity must be at least 1".to_string(),
            ));
        }

        let mut store = SeriesStore::with_capacity(self.capacity);
        for reading in self.history {
            series::check_reading(&reading)?;
            store.append(reading)?;
        }

        let logger = match self.log_path {
            Some(path) => Some(ReadingLogger::new(&path)?),
            None => None,
        };

        Ok(MonitoringSession {
            provider,
            store,
            logger,
            feed: None,
            latest: None,
        })
    }
}
