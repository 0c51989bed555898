//! Statement - the atomic unit of evidence

use crate::signals::Signals;
use crate::stance::Stance;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a statement, monotonically increasing within one
/// extraction run.
///
/// Statement ids are per-run ordinals, not globally unique: the extractor
/// assigns them in document order, which makes ascending-id tie-breaking
/// equivalent to lexical document order downstream.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct StatementId(pub u64);

impl StatementId {
    /// Get the raw ordinal.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for StatementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}

/// Which classification strategy produced a statement's stance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationStrategy {
    /// Regex trigger tables
    Pattern,
    /// Cosine similarity against frozen label prototypes
    Embedding,
}

/// Why the classifier fell back from the embedding strategy to patterns.
///
/// Recorded so callers can audit degraded classification quality; the
/// fallback itself is silent and never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    /// No embedding pipeline was configured for this run
    EmbeddingUnavailable,
    /// The sentence itself had no vector
    MissingSentenceVector,
    /// Label prototype vectors were not built
    MissingPrototypes,
    /// Best prototype score fell below the similarity floor
    BelowSimilarityFloor,
}

/// Audit trail of how a statement's stance was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationProvenance {
    /// The strategy whose decision stands
    pub strategy: ClassificationStrategy,
    /// Set when the embedding strategy was preferred but unavailable
    pub fallback: Option<FallbackReason>,
    /// Embedding margin to the runner-up stance fell below the ambiguity
    /// threshold
    pub ambiguous: bool,
}

impl ClassificationProvenance {
    /// Provenance for a plain pattern-strategy decision.
    pub fn pattern() -> Self {
        Self {
            strategy: ClassificationStrategy::Pattern,
            fallback: None,
            ambiguous: false,
        }
    }

    /// Provenance for a pattern decision reached by falling back from the
    /// embedding strategy.
    pub fn pattern_fallback(reason: FallbackReason) -> Self {
        Self {
            strategy: ClassificationStrategy::Pattern,
            fallback: Some(reason),
            ambiguous: false,
        }
    }

    /// Provenance for an embedding-strategy decision.
    pub fn embedding(ambiguous: bool) -> Self {
        Self {
            strategy: ClassificationStrategy::Embedding,
            fallback: None,
            ambiguous,
        }
    }
}

/// An atomic, attributable unit of evidence.
///
/// Created once at extraction time and never mutated afterward; later stages
/// attach geometric or graph coordinates in their own structures rather than
/// writing back into the statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    /// Per-run ordinal id
    pub id: StatementId,

    /// Index of the originating model in the response list
    pub model_index: usize,

    /// Literal sentence text (unclipped; downstream semantic comparison must
    /// use this, never a display-shortened form)
    pub text: String,

    /// The single semantic role of this statement
    pub stance: Stance,

    /// Independent boolean signals
    pub signals: Signals,

    /// Classification confidence in [0, 1]
    pub confidence: f64,

    /// Paragraph index within the originating response
    pub paragraph_index: usize,

    /// Sentence index within the paragraph
    pub sentence_index: usize,

    /// How the stance decision was reached
    pub provenance: ClassificationProvenance,
}
