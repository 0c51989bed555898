//! Traversal questions - the unified interactive pruning queue

use crate::statement::StatementId;
use serde::{Deserialize, Serialize};

/// Where a traversal question came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    /// Derived from a claim partition (a structural fork in the landscape)
    Partition,
    /// Derived from a conditional gate
    Conditional,
}

/// Lifecycle status of a traversal question.
///
/// Mutated only by the resolution process; derivation never rewrites status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionStatus {
    /// Ready to ask
    Pending,
    /// Another question must resolve first
    Blocked,
    /// The user answered it
    Answered,
    /// Prior decisions already pruned enough of its evidence to settle it
    AutoResolved,
}

/// A recorded answer to a traversal question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionAnswer {
    /// The yes/no decision
    pub value: bool,
    /// Optional free-text context supplied by the user
    pub context: Option<String>,
}

/// The unifying entity surfaced to the consumer: one prioritized,
/// deduplicated, capped question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraversalQuestion {
    /// Stable, contiguous id within the final queue ("tq_0", "tq_1", ...)
    pub id: String,

    /// Partition or conditional origin
    pub kind: QuestionKind,

    /// Question text
    pub text: String,

    /// Normalized disruption score in [0, 1]
    pub priority: f64,

    /// Ids of questions that must resolve before this one
    pub blocked_by: Vec<String>,

    /// Current lifecycle status
    pub status: QuestionStatus,

    /// Statements whose relevance this question decides
    pub affected_statement_ids: Vec<StatementId>,

    /// Recorded answer, once resolved
    pub answer: Option<QuestionAnswer>,

    /// Gate or partition id this question was derived from
    pub derived_from: String,
}

impl TraversalQuestion {
    /// Whether the question still needs user input.
    pub fn is_active(&self) -> bool {
        matches!(
            self.status,
            QuestionStatus::Pending | QuestionStatus::Blocked
        )
    }
}
