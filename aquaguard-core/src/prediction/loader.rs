//! Reads model artifacts from disk and turns them into live backends.

use super::{
    ensemble::TreeEnsemble, network::HiddenLayerNetwork, surrogate::LinearSurrogate, AmmoniaModel,
};
use crate::error::AquaError;
use aquaguard_schemas::model::ModelArtifact;
use std::{fs, path::Path, sync::Arc};

/// Parses an artifact file. The format is chosen by extension:
/// `.json`, or `.yaml` / `.yml`.
pub fn load_artifact<P: AsRef<Path>>(path: P) -> Result<ModelArtifact, AquaError> {
    let path = path.as_ref();
    let display = path.display().to_string();
    let content = fs::read_to_string(path).map_err(|e| AquaError::FileIO(display.clone(), e))?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(serde_json::from_str(&content)?),
        Some("yaml") | Some("yml") => {
            serde_yaml::from_str(&content).map_err(|e| AquaError::YamlParsing(display, e))
        }
        other => Err(AquaError::ConfigError(format!(
            "unsupported model artifact extension {:?} for '{}'",
            other, display
        ))),
    }
}

/// Validates an artifact and builds the matching backend.
pub fn build_model(artifact: ModelArtifact) -> Result<Arc<dyn AmmoniaModel>, AquaError> {
    Ok(match artifact {
        ModelArtifact::LinearSurrogate(params) => Arc::new(LinearSurrogate::new(params)?),
        ModelArtifact::TreeEnsemble(params) => Arc::new(TreeEnsemble::try_from(params)?),
        ModelArtifact::HiddenLayerNetwork(params) => Arc::new(HiddenLayerNetwork::try_from(params)?),
    })
}

pub fn load_model<P: AsRef<Path>>(path: P) -> Result<Arc<dyn AmmoniaModel>, AquaError> {
    build_model(load_artifact(path)?)
}
