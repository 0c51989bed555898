//! Error types for the embedding boundary

use thiserror::Error;

/// Errors that can occur while acquiring embedding vectors.
///
/// Misalignment errors are fatal for the whole batch, never padded or
/// truncated: a silently misaligned batch would corrupt every downstream
/// similarity computation. Callers needing resilience retry the whole batch.
#[derive(Error, Debug)]
pub enum EmbeddingError {
    /// The provider returned a vector of the wrong dimensionality
    #[error("Dimension mismatch at item {index}: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Position of the offending vector in the batch
        index: usize,
        /// Configured dimensionality
        expected: usize,
        /// Received dimensionality
        got: usize,
    },

    /// The provider returned the wrong number of vectors
    #[error("Count mismatch: requested {requested} texts, received {received} vectors")]
    CountMismatch {
        /// Number of texts in the request
        requested: usize,
        /// Number of vectors in the response
        received: usize,
    },

    /// Transport or inference failure reported by the provider
    #[error("Provider error: {0}")]
    Provider(String),

    /// Empty text cannot be embedded
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
