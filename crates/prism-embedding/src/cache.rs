//! Label-embedding cache with single-flight build de-duplication
//!
//! Label prototype vectors (stance and signal paraphrases) are expensive to
//! build and reused across every classified sentence, so the cache memoizes
//! each build behind an in-flight guard: concurrent callers for the same key
//! await the same build instead of triggering duplicate provider calls.
//!
//! The cache is an explicit injectable object, not hidden static state, so
//! tests construct isolated instances.

use crate::error::EmbeddingError;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{Mutex, OnceCell};
use tracing::debug;

/// Cache key: which model family, at what dimensionality, for which label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LabelKey {
    /// Embedding model identifier
    pub model_id: String,
    /// Vector dimensionality
    pub dimension: usize,
    /// Label the prototypes describe (stance or signal name)
    pub label: String,
}

type BuildCell = Arc<OnceCell<Arc<Vec<Vec<f32>>>>>;

/// Single-flight memoized store of label prototype vectors.
#[derive(Default)]
pub struct LabelEmbeddingCache {
    cells: Mutex<HashMap<LabelKey, BuildCell>>,
}

impl LabelEmbeddingCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the prototype vectors for `key`, building them at most once.
    ///
    /// If a build for the same key is already in flight, this call awaits it
    /// rather than starting another. A failed build is not cached; the next
    /// caller retries.
    pub async fn get_or_build<F, Fut>(
        &self,
        key: LabelKey,
        build: F,
    ) -> Result<Arc<Vec<Vec<f32>>>, EmbeddingError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<Vec<f32>>, EmbeddingError>>,
    {
        let cell = {
            let mut cells = self.cells.lock().await;
            cells.entry(key.clone()).or_default().clone()
        };

        let built = cell
            .get_or_try_init(|| async {
                debug!("Building label prototypes for '{}'", key.label);
                build().await.map(Arc::new)
            })
            .await?;

        Ok(Arc::clone(built))
    }

    /// Number of completed builds currently cached.
    pub async fn len(&self) -> usize {
        let cells = self.cells.lock().await;
        cells.values().filter(|c| c.initialized()).count()
    }

    /// Whether no completed builds are cached.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
