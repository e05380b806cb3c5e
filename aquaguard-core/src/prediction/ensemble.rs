use super::{scaler::StandardScaler, scaler::FEATURE_COUNT, AmmoniaModel};
use crate::error::AquaError;
use aquaguard_schemas::model::{EnsembleCombine, RegressionTree, TreeEnsembleParams, TreeNode};

/// A fitted ensemble of regression trees.
///
/// Trees are validated on construction so that evaluation always terminates
/// and never indexes out of bounds: every split points to children with a
/// strictly greater index.
#[derive(Debug, Clone)]
pub struct TreeEnsemble {
    scaler: StandardScaler,
    trees: Vec<RegressionTree>,
    combine: EnsembleCombine,
    base_value: f64,
    learning_rate: f64,
}

impl TryFrom<TreeEnsembleParams> for TreeEnsemble {
    type Error = AquaError;

    fn try_from(params: TreeEnsembleParams) -> Result<Self, Self::Error> {
        let scaler = StandardScaler::try_from(&params.input_scaler)?;

        if params.trees.is_empty() {
            return Err(AquaError::MalformedModel("tree ensemble has no trees".to_string()));
        }
        for (i, tree) in params.trees.iter().enumerate() {
            validate_tree(tree).map_err(|msg| AquaError::MalformedModel(format!("tree {}: {}", i, msg)))?;
        }
        if !params.base_value.is_finite() || !params.learning_rate.is_finite() {
            return Err(AquaError::MalformedModel(
                "base_value and learning_rate must be finite".to_string(),
            ));
        }

        Ok(Self {
            scaler,
            trees: params.trees,
            combine: params.combine,
            base_value: params.base_value,
            learning_rate: params.learning_rate,
        })
    }
}

impl AmmoniaModel for TreeEnsemble {
    fn name(&self) -> &'static str {
        "tree ensemble"
    }

    fn summary(&self) -> String {
        let combine = match self.combine {
            EnsembleCombine::Average => "averaged",
            EnsembleCombine::Sum => "summed",
        };
        format!("tree ensemble ({} trees, {})", self.trees.len(), combine)
    }

    fn predict_raw(&self, ph: f64, temperature: f64) -> Result<f64, AquaError> {
        let features = self.scaler.transform(ph, temperature);
        let total: f64 = self.trees.iter().map(|t| evaluate_tree(t, &features)).sum();

        Ok(match self.combine {
            EnsembleCombine::Average => total / self.trees.len() as f64,
            EnsembleCombine::Sum => self.base_value + self.learning_rate * total,
        })
    }
}

fn validate_tree(tree: &RegressionTree) -> Result<(), String> {
    if tree.nodes.is_empty() {
        return Err("tree has no nodes".to_string());
    }
    let len = tree.nodes.len();
    for (idx, node) in tree.nodes.iter().enumerate() {
        match node {
            TreeNode::Split { feature, threshold, left, right } => {
                if *feature >= FEATURE_COUNT {
                    return Err(format!("node {} splits on unknown feature {}", idx, feature));
                }
                if !threshold.is_finite() {
                    return Err(format!("node {} has a non-finite threshold", idx));
                }
                for child in [*left, *right] {
                    if child <= idx || child >= len {
                        return Err(format!("node {} has invalid child index {}", idx, child));
                    }
                }
            }
            TreeNode::Leaf { value } => {
                if !value.is_finite() {
                    return Err(format!("leaf {} has a non-finite value", idx));
                }
            }
        }
    }
    Ok(())
}

fn evaluate_tree(tree: &RegressionTree, features: &[f64; FEATURE_COUNT]) -> f64 {
    let mut idx = 0;
    loop {
        match &tree.nodes[idx] {
            TreeNode::Leaf { value } => return *value,
            TreeNode::Split { feature, threshold, left, right } => {
                idx = if features[*feature] <= *threshold { *left } else { *right };
            }
        }
    }
}
