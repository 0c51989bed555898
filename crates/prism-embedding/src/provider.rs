//! The asynchronous embedding-provider boundary
//!
//! The pipeline is synchronous CPU work except for this one suspension
//! point. A provider turns a batch of texts into one fixed-dimension
//! unit-length vector per input, aligned by position. Misalignment is fatal
//! for the batch; there is no padding, truncation, or partial retry here.

use crate::error::EmbeddingError;
use async_trait::async_trait;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use tracing::debug;

/// Asynchronous source of embedding vectors.
///
/// Timeouts and cancellation belong to the implementation's transport, not
/// to callers of this trait.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Fetch one vector per input text, aligned by position.
    async fn fetch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError>;

    /// Dimensionality of vectors produced by this provider.
    fn dimension(&self) -> usize;
}

/// Validate a provider response against the request.
///
/// Count and dimension mismatches are fatal for the batch.
pub fn validate_batch(
    requested: usize,
    vectors: &[Vec<f32>],
    expected_dim: usize,
) -> Result<(), EmbeddingError> {
    if vectors.len() != requested {
        return Err(EmbeddingError::CountMismatch {
            requested,
            received: vectors.len(),
        });
    }
    for (index, v) in vectors.iter().enumerate() {
        if v.len() != expected_dim {
            return Err(EmbeddingError::DimensionMismatch {
                index,
                expected: expected_dim,
                got: v.len(),
            });
        }
    }
    Ok(())
}

/// Fetch embeddings in batches of `batch_size`, yielding to the runtime
/// between batches so a large request does not starve other work.
///
/// Any failed batch fails the whole call; callers needing resilience retry
/// the whole input.
pub async fn fetch_in_batches<P: EmbeddingProvider + ?Sized>(
    provider: &P,
    texts: &[String],
    batch_size: usize,
) -> Result<Vec<Vec<f32>>, EmbeddingError> {
    let batch_size = batch_size.max(1);
    let mut all = Vec::with_capacity(texts.len());

    for (batch_index, batch) in texts.chunks(batch_size).enumerate() {
        if batch_index > 0 {
            tokio::task::yield_now().await;
        }
        debug!(
            "Fetching embedding batch {} ({} texts)",
            batch_index,
            batch.len()
        );
        let vectors = provider.fetch(batch).await?;
        validate_batch(batch.len(), &vectors, provider.dimension())?;
        all.extend(vectors);
    }

    Ok(all)
}

/// Deterministic hash-based provider for tests and offline runs.
///
/// Produces unit-length vectors where the same text always maps to the same
/// vector and different texts diverge. No semantic meaning, but exercises
/// the full pipeline without an inference service.
pub struct MockEmbeddingProvider {
    dimension: usize,
}

impl MockEmbeddingProvider {
    /// Create a mock provider with the given dimensionality.
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }

    fn hash_with_seed(text: &str, seed: u64) -> f32 {
        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        seed.hash(&mut hasher);
        let hash_value = hasher.finish();

        // Map the hash onto [-1, 1]
        let normalized = (hash_value as f64 / u64::MAX as f64) * 2.0 - 1.0;
        normalized as f32
    }

    fn embed_one(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        if text.is_empty() {
            return Err(EmbeddingError::InvalidInput(
                "Empty text cannot be embedded".to_string(),
            ));
        }

        let mut embedding = Vec::with_capacity(self.dimension);
        for i in 0..self.dimension {
            embedding.push(Self::hash_with_seed(text, i as u64));
        }

        let magnitude: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if magnitude > 0.0 {
            for value in &mut embedding {
                *value /= magnitude;
            }
        }

        Ok(embedding)
    }
}

#[async_trait]
impl EmbeddingProvider for MockEmbeddingProvider {
    async fn fetch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        texts.iter().map(|t| self.embed_one(t)).collect()
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}
