//! Ammonia prediction.
//!
//! A `PredictionProvider` wraps one `AmmoniaModel` backend, chosen when the
//! model artifact is loaded, and enforces the contract shared by all of them:
//! inputs are admitted according to the `InputPolicy`, non-finite outputs are
//! reported as failures, and negative outputs are clamped to zero.
//!
//! A provider whose artifact could not be loaded stays in an unavailable state
//! and reports `AquaError::ModelUnavailable` on every call.

pub mod ensemble;
pub mod loader;
pub mod network;
pub mod scaler;
pub mod surrogate;

use crate::error::AquaError;
use aquaguard_schemas::{file_formats::InputPolicy, model::LinearSurrogateParams, reading::SensorSample};
use std::{fmt, path::Path, sync::Arc};

pub use ensemble::TreeEnsemble;
pub use network::HiddenLayerNetwork;
pub use surrogate::LinearSurrogate;

pub const PH_MIN: f64 = 0.0;
pub const PH_MAX: f64 = 14.0;
pub const TEMPERATURE_MIN_C: f64 = 0.0;
pub const TEMPERATURE_MAX_C: f64 = 40.0;

/// A regression backend mapping `(ph, temperature)` to an ammonia estimate.
///
/// Implementations are immutable once built and are shared between sessions.
pub trait AmmoniaModel: fmt::Debug + Send + Sync {
    fn name(&self) -> &'static str;

    /// A one-line description of the fitted model for operator reports.
    fn summary(&self) -> String {
        self.name().to_string()
    }

    /// The unclamped model output in mg/L.
    fn predict_raw(&self, ph: f64, temperature: f64) -> Result<f64, AquaError>;
}

#[derive(Debug, Clone)]
enum ProviderState {
    Available(Arc<dyn AmmoniaModel>),
    Unavailable(String),
}

#[derive(Debug, Clone)]
pub struct PredictionProvider {
    state: ProviderState,
    input_policy: InputPolicy,
}

impl PredictionProvider {
    pub fn new<M: AmmoniaModel + 'static>(model: M) -> Self {
        Self::from_model(Arc::new(model))
    }

    pub fn from_model(model: Arc<dyn AmmoniaModel>) -> Self {
        Self {
            state: ProviderState::Available(model),
            input_policy: InputPolicy::default(),
        }
    }

    /// The built-in linear surrogate with its default coefficients.
    pub fn surrogate() -> Self {
        let params = LinearSurrogateParams::default();
        match LinearSurrogate::new(params) {
            Ok(model) => Self::new(model),
            Err(e) => Self::unavailable(e.to_string()),
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            state: ProviderState::Unavailable(reason.into()),
            input_policy: InputPolicy::default(),
        }
    }

    /// Loads a model artifact. Any failure is recorded rather than returned,
    /// leaving the provider unavailable.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match loader::load_model(path) {
            Ok(model) => {
                log::info!("Loaded {} model from '{}'", model.name(), path.display());
                Self::from_model(model)
            }
            Err(e) => {
                log::error!("Could not load model from '{}': {}", path.display(), e);
                Self::unavailable(e.to_string())
            }
        }
    }

    pub fn with_input_policy(mut self, policy: InputPolicy) -> Self {
        self.input_policy = policy;
        self
    }

    pub fn input_policy(&self) -> InputPolicy {
        self.input_policy
    }

    pub fn is_available(&self) -> bool {
        matches!(self.state, ProviderState::Available(_))
    }

    pub fn unavailable_reason(&self) -> Option<&str> {
        match &self.state {
            ProviderState::Available(_) => None,
            ProviderState::Unavailable(reason) => Some(reason),
        }
    }

    pub fn model_name(&self) -> Option<&'static str> {
        match &self.state {
            ProviderState::Available(model) => Some(model.name()),
            ProviderState::Unavailable(_) => None,
        }
    }

    pub fn model_summary(&self) -> Option<String> {
        match &self.state {
            ProviderState::Available(model) => Some(model.summary()),
            ProviderState::Unavailable(_) => None,
        }
    }

    /// Predicts the ammonia concentration in mg/L. The result is never negative.
    pub fn predict(&self, ph: f64, temperature: f64) -> Result<f64, AquaError> {
        self.predict_sample(SensorSample { ph, temperature })
            .map(|(_, ammonia)| ammonia)
    }

    /// Like `predict`, but also returns the inputs as admitted by the input
    /// policy, i.e. the values the model actually saw.
    pub fn predict_sample(&self, sample: SensorSample) -> Result<(SensorSample, f64), AquaError> {
        let model = match &self.state {
            ProviderState::Available(model) => model,
            ProviderState::Unavailable(reason) => {
                return Err(AquaError::ModelUnavailable(reason.clone()))
            }
        };

        let admitted = self.admit_inputs(sample)?;
        let raw = model.predict_raw(admitted.ph, admitted.temperature)?;
        if !raw.is_finite() {
            return Err(AquaError::PredictionFailure(format!(
                "{} returned a non-finite value ({})",
                model.name(),
                raw
            )));
        }
        Ok((admitted, raw.max(0.0)))
    }

    /// Applies the input policy to a raw sample.
    ///
    /// Non-finite values are always rejected. Out-of-range values are clamped
    /// to the sensor bounds or rejected, depending on the policy.
    pub fn admit_inputs(&self, sample: SensorSample) -> Result<SensorSample, AquaError> {
        Ok(SensorSample {
            ph: self.admit("pH", sample.ph, PH_MIN, PH_MAX)?,
            temperature: self.admit("temperature", sample.temperature, TEMPERATURE_MIN_C, TEMPERATURE_MAX_C)?,
        })
    }

    fn admit(&self, parameter: &'static str, value: f64, min: f64, max: f64) -> Result<f64, AquaError> {
        if !value.is_finite() {
            return Err(AquaError::InvalidInput { parameter, value });
        }
        if (min..=max).contains(&value) {
            return Ok(value);
        }

        match self.input_policy {
            InputPolicy::Clamp => {
                let clamped = value.clamp(min, max);
                log::warn!("{} {} is outside [{}, {}], clamped to {}", parameter, value, min, max, clamped);
                Ok(clamped)
            }
            InputPolicy::Reject => Err(AquaError::InvalidInput { parameter, value }),
        }
    }
}
