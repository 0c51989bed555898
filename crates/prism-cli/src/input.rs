//! Input file loading for the run command.

use crate::error::{CliError, Result};
use prism_domain::{ClaimGraph, StatementId};
use prism_extractor::ModelResponse;
use prism_pipeline::PipelineConfig;
use prism_traversal::PartitionInput;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;

/// One model's answer as it appears in the responses file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseInput {
    /// Origin index of the answering model
    pub model: usize,
    /// The free-text answer
    pub text: String,
}

/// Optional claim-level inputs that enable question derivation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClaimsFile {
    /// Claim graph produced by upstream analysis
    pub claim_graph: ClaimGraph,
    /// Claim partitions for the traversal merge
    pub partitions: Vec<PartitionInput>,
    /// Per-statement disruption scores
    pub disruption: HashMap<StatementId, f64>,
    /// Statements pruned by earlier decisions
    pub pruned: Vec<StatementId>,
    /// Conversational turn id (defaults to a fresh turn)
    pub turn_id: Option<String>,
}

/// Load model responses from a JSON file.
pub fn load_responses(path: &str) -> Result<Vec<ModelResponse>> {
    let raw = fs::read_to_string(path)?;
    let inputs: Vec<ResponseInput> = serde_json::from_str(&raw)?;
    if inputs.is_empty() {
        return Err(CliError::InvalidInput(format!(
            "{} contains no responses",
            path
        )));
    }
    Ok(inputs
        .into_iter()
        .map(|r| ModelResponse {
            model_origin_index: r.model,
            text: r.text,
        })
        .collect())
}

/// Load the claims file.
pub fn load_claims(path: &str) -> Result<ClaimsFile> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Load pipeline configuration, falling back to defaults when no path given.
pub fn load_config(path: Option<&str>) -> Result<PipelineConfig> {
    match path {
        Some(p) => {
            let raw = fs::read_to_string(p)?;
            PipelineConfig::from_toml(&raw).map_err(CliError::Config)
        }
        None => Ok(PipelineConfig::default()),
    }
}
