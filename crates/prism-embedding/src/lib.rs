//! Prism Embedding Layer
//!
//! Deterministic similarity math over externally produced embedding vectors,
//! plus the single asynchronous boundary of the pipeline: fetching vectors
//! from an out-of-process inference service.
//!
//! Everything above [`provider::EmbeddingProvider`] is synchronous and pure.
//! All similarity values pass through [`math::quantize`] before any
//! comparison or threshold test, which eliminates least-significant-bit
//! drift between numeric backends computing "the same" embedding.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adjust;
pub mod cache;
pub mod error;
pub mod math;
pub mod provider;

pub use adjust::AdjustmentConfig;
pub use cache::{LabelEmbeddingCache, LabelKey};
pub use error::EmbeddingError;
pub use math::{cosine_similarity, mean_vector, quantize, squared_distance, MISSING_DISTANCE};
pub use provider::{fetch_in_batches, EmbeddingProvider, MockEmbeddingProvider};
