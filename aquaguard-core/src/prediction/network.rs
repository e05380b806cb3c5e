use super::{scaler::StandardScaler, scaler::FEATURE_COUNT, AmmoniaModel};
use crate::error::AquaError;
use aquaguard_schemas::model::{Activation, HiddenLayerNetworkParams};

/// A fitted single-hidden-layer regression network.
#[derive(Debug, Clone)]
pub struct HiddenLayerNetwork {
    scaler: StandardScaler,
    hidden_weights: Vec<[f64; FEATURE_COUNT]>,
    hidden_bias: Vec<f64>,
    output_weights: Vec<f64>,
    output_bias: f64,
    activation: Activation,
}

impl TryFrom<HiddenLayerNetworkParams> for HiddenLayerNetwork {
    type Error = AquaError;

    fn try_from(params: HiddenLayerNetworkParams) -> Result<Self, Self::Error> {
        let scaler = StandardScaler::try_from(&params.input_scaler)?;
        let units = params.hidden_layer_weights.len();

        if units == 0 {
            return Err(AquaError::MalformedModel("network has no hidden units".to_string()));
        }
        if params.hidden_layer_bias.len() != units || params.output_weights.len() != units {
            return Err(AquaError::MalformedModel(format!(
                "layer shapes disagree: {} hidden rows, {} biases, {} output weights",
                units,
                params.hidden_layer_bias.len(),
                params.output_weights.len()
            )));
        }

        let mut hidden_weights = Vec::with_capacity(units);
        for (i, row) in params.hidden_layer_weights.iter().enumerate() {
            match row.as_slice() {
                [w_ph, w_temp] => hidden_weights.push([*w_ph, *w_temp]),
                _ => {
                    return Err(AquaError::MalformedModel(format!(
                        "hidden unit {} has {} weights, expected {}",
                        i,
                        row.len(),
                        FEATURE_COUNT
                    )))
                }
            }
        }

        let all_finite = hidden_weights.iter().flatten().all(|w| w.is_finite())
            && params.hidden_layer_bias.iter().all(|b| b.is_finite())
            && params.output_weights.iter().all(|w| w.is_finite())
            && params.output_bias.is_finite();
        if !all_finite {
            return Err(AquaError::MalformedModel("network weights must be finite".to_string()));
        }

        Ok(Self {
            scaler,
            hidden_weights,
            hidden_bias: params.hidden_layer_bias,
            output_weights: params.output_weights,
            output_bias: params.output_bias,
            activation: params.activation_function,
        })
    }
}

impl AmmoniaModel for HiddenLayerNetwork {
    fn name(&self) -> &'static str {
        "hidden layer network"
    }

    fn summary(&self) -> String {
        format!(
            "hidden layer network ({} {:?} units)",
            self.hidden_weights.len(),
            self.activation
        )
    }

    fn predict_raw(&self, ph: f64, temperature: f64) -> Result<f64, AquaError> {
        let x = self.scaler.transform(ph, temperature);

        let output = self
            .hidden_weights
            .iter()
            .zip(&self.hidden_bias)
            .zip(&self.output_weights)
            .map(|((w, b), out_w)| {
                let z = w[0] * x[0] + w[1] * x[1] + b;
                out_w * activate(self.activation, z)
            })
            .sum::<f64>();

        Ok(output + self.output_bias)
    }
}

fn activate(activation: Activation, z: f64) -> f64 {
    match activation {
        Activation::Relu => z.max(0.0),
        Activation::Tanh => z.tanh(),
        Activation::Logistic => 1.0 / (1.0 + (-z).exp()),
        Activation::Identity => z,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aquaguard_schemas::model::InputScaler;

    fn params(activation: Activation) -> HiddenLayerNetworkParams {
        HiddenLayerNetworkParams {
            input_scaler: InputScaler { mean: vec![7.0, 25.0], scale: vec![1.0, 5.0] },
            hidden_layer_weights: vec![vec![1.0, 0.0], vec![0.0, 1.0]],
            hidden_layer_bias: vec![0.0, 0.0],
            output_weights: vec![0.1, 0.05],
            output_bias: 0.15,
            activation_function: activation,
        }
    }

    #[test]
    fn identity_network_is_linear_in_scaled_inputs() {
        let net = HiddenLayerNetwork::try_from(params(Activation::Identity)).unwrap();
        // x = [1.0, 1.0] -> 0.1 + 0.05 + 0.15
        let value = net.predict_raw(8.0, 30.0).unwrap();
        assert!((value - 0.30).abs() < 1e-12);
        assert_eq!(net.summary(), "hidden layer network (2 Identity units)");
    }

    #[test]
    fn relu_cuts_negative_activations() {
        let net = HiddenLayerNetwork::try_from(params(Activation::Relu)).unwrap();
        // x = [-1.0, -1.0] -> both hidden units clipped to zero
        let value = net.predict_raw(6.0, 20.0).unwrap();
        assert!((value - 0.15).abs() < 1e-12);
    }

    #[test]
    fn logistic_at_origin_is_half() {
        let net = HiddenLayerNetwork::try_from(params(Activation::Logistic)).unwrap();
        let value = net.predict_raw(7.0, 25.0).unwrap();
        assert!((value - (0.15 + 0.5 * 0.15)).abs() < 1e-12);
    }

    #[test]
    fn rejects_mismatched_shapes() {
        let mut bad = params(Activation::Tanh);
        bad.output_weights.pop();
        assert!(matches!(HiddenLayerNetwork::try_from(bad), Err(AquaError::MalformedModel(_))));

        let mut wide = params(Activation::Tanh);
        wide.hidden_layer_weights[1].push(0.3);
        assert!(matches!(HiddenLayerNetwork::try_from(wide), Err(AquaError::MalformedModel(_))));
    }
}
