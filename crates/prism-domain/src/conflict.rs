//! Conflicts - claim-vs-claim decision points

use crate::claim_graph::SupportSymmetry;
use serde::{Deserialize, Serialize};

/// Record of a gate standing in front of one side of a conflict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateBlock {
    /// The blocking gate
    pub gate_id: String,
    /// Which side of the conflict the gate affects
    pub blocked_claim_id: String,
}

/// A filtered, enriched conflict between two claims. Derived, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    /// One side of the conflict
    pub claim_a: String,

    /// The other side
    pub claim_b: String,

    /// Upstream edge significance
    pub significance: f64,

    /// Support distribution across the two sides
    pub symmetry: SupportSymmetry,

    /// Passed the significance/support/challenger filter
    pub passes_filter: bool,

    /// Gates that would block this conflict from mattering, with the side
    /// each one affects
    pub blocked_by_gates: Vec<GateBlock>,
}

impl Conflict {
    /// Whether any derived gate blocks a side of this conflict.
    pub fn is_blocked(&self) -> bool {
        !self.blocked_by_gates.is_empty()
    }
}
