//! Upstream claim-graph structure consumed by gate and conflict derivation
//!
//! Claims and edges arrive from an out-of-core graph-analysis collaborator.
//! Every field defaults when absent so malformed upstream data degrades to
//! lower-confidence candidates instead of failing derivation.

use crate::statement::StatementId;
use serde::{Deserialize, Serialize};

/// Relationship type between two claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeType {
    /// One claim reinforces the other
    Supports,
    /// The claims cannot both hold
    Conflicts,
    /// Choosing one costs the other
    Tradeoff,
    /// One claim must be settled before the other applies
    Prerequisite,
}

/// How evenly support is distributed across the two sides of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupportSymmetry {
    /// Both sides carry comparable support
    #[default]
    Balanced,
    /// The source claim carries most of the support
    SourceHeavy,
    /// The target claim carries most of the support
    TargetHeavy,
}

/// A claim produced by upstream graph analysis.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Claim {
    /// Upstream claim id
    #[serde(default)]
    pub id: String,

    /// Short label for display
    #[serde(default)]
    pub label: String,

    /// Canonical claim text
    #[serde(default)]
    pub text: String,

    /// Model indices that support this claim
    #[serde(default)]
    pub supporters: Vec<usize>,

    /// Statement ids cited as evidence for this claim
    #[serde(default)]
    pub source_statement_ids: Vec<StatementId>,

    /// Structural significance from upstream graph metrics
    #[serde(default)]
    pub significance: f64,

    /// The claim is supported by a majority of models
    #[serde(default)]
    pub high_support: bool,

    /// The claim challenges a consensus position
    #[serde(default)]
    pub challenger: bool,

    /// Other claims depend on this one
    #[serde(default)]
    pub keystone: bool,
}

/// An edge between two claims.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimEdge {
    /// Source claim id
    #[serde(default)]
    pub source: String,

    /// Target claim id
    #[serde(default)]
    pub target: String,

    /// Relationship type
    pub edge_type: EdgeType,

    /// Edge significance from upstream graph metrics
    #[serde(default)]
    pub significance: f64,

    /// Support distribution across the two sides
    #[serde(default)]
    pub symmetry: SupportSymmetry,
}

/// The claim graph: validated input to gate and conflict derivation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClaimGraph {
    /// All claims
    #[serde(default)]
    pub claims: Vec<Claim>,

    /// All edges
    #[serde(default)]
    pub edges: Vec<ClaimEdge>,
}

impl ClaimGraph {
    /// Normalize the graph once at ingestion.
    ///
    /// Drops claims with empty ids (they cannot be referenced by gates or
    /// conflicts), drops edges whose endpoints are missing from the claim
    /// set, and clamps significance into [0, 1]. Never errors: the worst
    /// malformed input yields an empty graph.
    pub fn sanitized(mut self) -> ClaimGraph {
        self.claims.retain(|c| !c.id.is_empty());
        for claim in &mut self.claims {
            claim.significance = claim.significance.clamp(0.0, 1.0);
        }
        let ids: std::collections::HashSet<&str> =
            self.claims.iter().map(|c| c.id.as_str()).collect();
        self.edges.retain(|e| {
            !e.source.is_empty()
                && !e.target.is_empty()
                && ids.contains(e.source.as_str())
                && ids.contains(e.target.as_str())
        });
        for edge in &mut self.edges {
            edge.significance = edge.significance.clamp(0.0, 1.0);
        }
        self
    }

    /// Look up a claim by id.
    pub fn claim(&self, id: &str) -> Option<&Claim> {
        self.claims.iter().find(|c| c.id == id)
    }

    /// All conflict edges.
    pub fn conflict_edges(&self) -> impl Iterator<Item = &ClaimEdge> {
        self.edges
            .iter()
            .filter(|e| e.edge_type == EdgeType::Conflicts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claim(id: &str, sig: f64) -> Claim {
        Claim {
            id: id.to_string(),
            significance: sig,
            ..Claim::default()
        }
    }

    #[test]
    fn test_sanitize_drops_unidentified_claims() {
        let graph = ClaimGraph {
            claims: vec![claim("", 0.5), claim("c1", 0.5)],
            edges: vec![],
        }
        .sanitized();
        assert_eq!(graph.claims.len(), 1);
        assert_eq!(graph.claims[0].id, "c1");
    }

    #[test]
    fn test_sanitize_drops_dangling_edges() {
        let graph = ClaimGraph {
            claims: vec![claim("c1", 0.5), claim("c2", 0.5)],
            edges: vec![
                ClaimEdge {
                    source: "c1".to_string(),
                    target: "c2".to_string(),
                    edge_type: EdgeType::Conflicts,
                    significance: 0.4,
                    symmetry: SupportSymmetry::Balanced,
                },
                ClaimEdge {
                    source: "c1".to_string(),
                    target: "ghost".to_string(),
                    edge_type: EdgeType::Supports,
                    significance: 0.4,
                    symmetry: SupportSymmetry::Balanced,
                },
            ],
        }
        .sanitized();
        assert_eq!(graph.edges.len(), 1);
        assert_eq!(graph.conflict_edges().count(), 1);
    }

    #[test]
    fn test_sanitize_clamps_significance() {
        let graph = ClaimGraph {
            claims: vec![claim("c1", 3.2), claim("c2", -0.5)],
            edges: vec![],
        }
        .sanitized();
        assert_eq!(graph.claims[0].significance, 1.0);
        assert_eq!(graph.claims[1].significance, 0.0);
    }

    #[test]
    fn test_missing_fields_default() {
        // Upstream data with nothing but an id still parses.
        let c: Claim = serde_json::from_str(r#"{"id": "c9"}"#).unwrap();
        assert_eq!(c.id, "c9");
        assert!(c.source_statement_ids.is_empty());
        assert_eq!(c.significance, 0.0);
        assert!(!c.challenger);
    }
}
