//! Conditional gates - yes/no questions that prune claims

use crate::statement::StatementId;
use serde::{Deserialize, Serialize};

/// Kind of condition extracted from a claim's exclusive statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionKind {
    /// Explicit conditional clause ("if", "when", "unless", "only if")
    Conditional,
    /// Audience qualifier ("for startups", "for large teams")
    Audience,
    /// Dependency clause ("depends on", "provided that")
    Dependency,
    /// No clause found; distinguishing vocabulary surfaced by contrastive
    /// term-frequency analysis instead
    Contrastive,
}

/// A condition-bearing clause found in a claim's exclusive evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedCondition {
    /// The clause or distinguishing term, normalized
    pub clause: String,
    /// How the condition was found
    pub kind: ConditionKind,
    /// Exclusive statements the clause was extracted from
    pub source_statement_ids: Vec<StatementId>,
}

/// Classification of a distinguishing term by embedding coherence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermClass {
    /// Tight coherence across statements containing the term: a situational
    /// fork, safe to build a question around
    ContextAnchor,
    /// Loose coherence: a genuine belief disagreement, not situational
    Epistemic,
    /// Coherence between the two bands
    Ambiguous,
}

/// A derived yes/no disambiguating question.
///
/// The gate's source statements belong, at derivation time, to exactly one
/// claim; that exclusivity is what makes it a defensible binary decision
/// point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionalGate {
    /// Stable gate id
    pub id: String,

    /// The claim whose exclusive evidence motivates this gate
    pub claim_id: String,

    /// Canonical question text
    pub question: String,

    /// The condition the question was built from
    pub condition: ExtractedCondition,

    /// Exclusive statement ids motivating the gate
    pub source_statement_ids: Vec<StatementId>,

    /// Claims pruned or kept by answering this gate
    pub affected_claim_ids: Vec<String>,

    /// |exclusive| / |total| for the motivating claim
    pub exclusivity_ratio: f64,

    /// How context-specific the distinguishing vocabulary is, in [0, 1]
    pub context_specificity: f64,

    /// Ranking score: exclusivity_ratio x context_specificity, optionally
    /// boosted by conflict adjacency
    pub score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_serde_round_trip() {
        let gate = ConditionalGate {
            id: "gate_c1".to_string(),
            claim_id: "c1".to_string(),
            question: "Are you operating as a startup?".to_string(),
            condition: ExtractedCondition {
                clause: "you're a startup".to_string(),
                kind: ConditionKind::Conditional,
                source_statement_ids: vec![StatementId(1), StatementId(4)],
            },
            source_statement_ids: vec![StatementId(1), StatementId(4)],
            affected_claim_ids: vec!["c1".to_string()],
            exclusivity_ratio: 0.6,
            context_specificity: 0.75,
            score: 0.45,
        };
        let json = serde_json::to_string(&gate).unwrap();
        let back: ConditionalGate = serde_json::from_str(&json).unwrap();
        assert_eq!(gate, back);
    }
}
