//! Serialized model artifacts.
//!
//! An artifact file holds exactly one backend, selected by its `kind` tag.
//! Fitted backends carry an `input_scaler` that is applied to the raw
//! `[ph, temperature]` vector before evaluation.

use serde::{Deserialize, Serialize};

/// Standardizes raw inputs as `(x - mean) / scale`, one entry per feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// Closed-form stand-in for a trained model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinearSurrogateParams {
    pub base: f64,
    pub ph_center: f64,
    pub ph_weight: f64,
    pub temperature_center: f64,
    pub temperature_weight: f64,
    /// Upper bound of the uniform noise added to every prediction.
    pub jitter: f64,
}

impl Default for LinearSurrogateParams {
    fn default() -> Self {
        Self {
            base: 0.15,
            ph_center: 7.0,
            ph_weight: 0.08,
            temperature_center: 25.0,
            temperature_weight: 0.015,
            jitter: 0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TreeNode {
    /// Go `left` when `features[feature] <= threshold`, otherwise `right`.
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

/// A fitted regression tree stored as a flat node array; node 0 is the root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    pub nodes: Vec<TreeNode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnsembleCombine {
    /// Random-forest style: mean of the tree outputs.
    #[default]
    Average,
    /// Boosting style: `base_value + learning_rate * sum(tree outputs)`.
    Sum,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeEnsembleParams {
    pub input_scaler: InputScaler,
    pub trees: Vec<RegressionTree>,
    #[serde(default)]
    pub combine: EnsembleCombine,
    #[serde(default)]
    pub base_value: f64,
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
}

fn default_learning_rate() -> f64 {
    1.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    Relu,
    Tanh,
    Logistic,
    Identity,
}

/// Single hidden layer network: `output_weights · act(W·x + b) + output_bias`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HiddenLayerNetworkParams {
    pub input_scaler: InputScaler,
    /// One row per hidden unit, one column per input feature.
    pub hidden_layer_weights: Vec<Vec<f64>>,
    pub hidden_layer_bias: Vec<f64>,
    pub output_weights: Vec<f64>,
    #[serde(default)]
    pub output_bias: f64,
    pub activation_function: Activation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    LinearSurrogate(LinearSurrogateParams),
    TreeEnsemble(TreeEnsembleParams),
    HiddenLayerNetwork(HiddenLayerNetworkParams),
}
