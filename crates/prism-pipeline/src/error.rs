//! Pipeline errors

use prism_embedding::EmbeddingError;
use thiserror::Error;

/// Errors surfaced by the pipeline.
///
/// Only the embedding boundary can fail; extraction, clustering, and
/// question derivation are total functions that report diagnostics instead.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// An embedding batch failed; the whole batch must be retried by the
    /// caller if resilience is needed
    #[error("Embedding fetch failed: {0}")]
    Embedding(#[from] EmbeddingError),

    /// The configuration failed validation
    #[error("Invalid configuration: {0}")]
    Config(String),
}
