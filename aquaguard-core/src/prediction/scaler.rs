use crate::error::AquaError;
use aquaguard_schemas::model::InputScaler;

/// Number of model inputs: pH and temperature, in that order.
pub const FEATURE_COUNT: usize = 2;

/// A validated `(x - mean) / scale` transform over `[ph, temperature]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandardScaler {
    mean: [f64; FEATURE_COUNT],
    scale: [f64; FEATURE_COUNT],
}

impl StandardScaler {
    pub fn transform(&self, ph: f64, temperature: f64) -> [f64; FEATURE_COUNT] {
        [
            (ph - self.mean[0]) / self.scale[0],
            (temperature - self.mean[1]) / self.scale[1],
        ]
    }
}

impl TryFrom<&InputScaler> for StandardScaler {
    type Error = AquaError;

    fn try_from(scaler: &InputScaler) -> Result<Self, Self::Error> {
        if scaler.mean.len() != FEATURE_COUNT || scaler.scale.len() != FEATURE_COUNT {
            return Err(AquaError::MalformedModel(format!(
                "input scaler expects {} features, found mean={} scale={}",
                FEATURE_COUNT,
                scaler.mean.len(),
                scaler.scale.len()
            )));
        }
        if scaler.mean.iter().any(|m| !m.is_finite()) {
            return Err(AquaError::MalformedModel("input scaler mean is not finite".to_string()));
        }
        if scaler.scale.iter().any(|s| !s.is_finite() || *s == 0.0) {
            return Err(AquaError::MalformedModel(
                "input scaler scale must be finite and non-zero".to_string(),
            ));
        }

        Ok(Self {
            mean: [scaler.mean[0], scaler.mean[1]],
            scale: [scaler.scale[0], scaler.scale[1]],
        })
    }
}
