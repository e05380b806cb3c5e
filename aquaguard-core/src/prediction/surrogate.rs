use super::AmmoniaModel;
use crate::error::AquaError;
use aquaguard_schemas::model::LinearSurrogateParams;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::sync::Mutex;

/// Closed-form ammonia estimate: a fixed linear response to pH and
/// temperature around reference centers, plus uniform jitter.
#[derive(Debug)]
pub struct LinearSurrogate {
    params: LinearSurrogateParams,
    rng: Mutex<StdRng>,
}

impl LinearSurrogate {
    pub fn new(params: LinearSurrogateParams) -> Result<Self, AquaError> {
        Self::with_rng(params, StdRng::from_entropy())
    }

    /// Same as `new`, with a reproducible jitter sequence.
    pub fn seeded(params: LinearSurrogateParams, seed: u64) -> Result<Self, AquaError> {
        Self::with_rng(params, StdRng::seed_from_u64(seed))
    }

    fn with_rng(params: LinearSurrogateParams, rng: StdRng) -> Result<Self, AquaError> {
        let coefficients = [
            params.base,
            params.ph_center,
            params.ph_weight,
            params.temperature_center,
            params.temperature_weight,
            params.jitter,
        ];
        if coefficients.iter().any(|c| !c.is_finite()) {
            return Err(AquaError::MalformedModel(
                "surrogate coefficients must be finite".to_string(),
            ));
        }
        if params.jitter < 0.0 {
            return Err(AquaError::MalformedModel(format!(
                "surrogate jitter must be non-negative, got {}",
                params.jitter
            )));
        }

        Ok(Self {
            params,
            rng: Mutex::new(rng),
        })
    }

    fn jitter(&self) -> Result<f64, AquaError> {
        if self.params.jitter == 0.0 {
            return Ok(0.0);
        }
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| AquaError::PredictionFailure("jitter generator lock poisoned".to_string()))?;
        Ok(rng.gen_range(0.0..self.params.jitter))
    }
}

impl AmmoniaModel for LinearSurrogate {
    fn name(&self) -> &'static str {
        "linear surrogate"
    }

    fn summary(&self) -> String {
        format!("linear surrogate (jitter up to {} mg/L)", self.params.jitter)
    }

    fn predict_raw(&self, ph: f64, temperature: f64) -> Result<f64, AquaError> {
        let p = &self.params;
        let ph_factor = (ph - p.ph_center) * p.ph_weight;
        let temp_factor = (temperature - p.temperature_center) * p.temperature_weight;
        Ok(p.base + ph_factor + temp_factor + self.jitter()?)
    }
}
