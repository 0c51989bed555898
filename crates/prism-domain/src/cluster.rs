//! Cluster - a semantically coherent group of paragraphs

use serde::{Deserialize, Serialize};

/// Why a cluster was flagged uncertain.
///
/// Every reason is evaluated independently and all applicable reasons are
/// reported, not just the first match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UncertaintyReason {
    /// Average similarity to the centroid fell below the floor
    LowCohesion,
    /// Two sub-groups both near the centroid but far from each other
    /// (acceptable centroid cohesion, low pairwise cohesion, gap over the
    /// configured threshold, at least four members)
    Dumbbell,
    /// Member count exceeds the cap
    TooManyMembers,
    /// Too many distinct dominant stances among members
    StanceDiversity,
    /// Ratio of contested member paragraphs exceeds the threshold
    ContestedRatio,
    /// Tension and conditionality signals co-occur across members
    TensionWithConditionality,
}

/// One member of a cluster's expansion payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpansionEntry {
    /// Index of the member item in the clustering input
    pub item: usize,
    /// Quantized similarity of this member to the cluster centroid
    pub similarity_to_centroid: f64,
    /// Raw member text
    pub text: String,
}

/// Bounded raw-evidence payload attached to uncertain clusters.
///
/// Ordered centroid-first, then members by ascending similarity to the
/// centroid (most distant first), cut off by member-count and total-character
/// budgets. Gives a downstream consumer just enough raw evidence to resolve
/// the ambiguity manually.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterExpansion {
    /// Selected members, centroid first
    pub entries: Vec<ExpansionEntry>,
    /// Whether the budgets cut off further members
    pub truncated: bool,
}

/// A set of items (paragraph indices into the clustering input) sharing a
/// representative.
///
/// Membership only ever grows by merging; clusters never split. The number of
/// clusters is emergent from the similarity threshold, never forced toward a
/// target count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    /// Stable cluster index within the run
    pub id: usize,

    /// Member item indices, ascending
    pub members: Vec<usize>,

    /// The member minimizing distance to the cluster mean vector
    /// (lowest index on ties)
    pub centroid: usize,

    /// Average quantized similarity of members to the centroid
    pub cohesion: f64,

    /// Average quantized similarity across all member pairs
    pub pairwise_cohesion: f64,

    /// All uncertainty reasons that apply (empty means confident)
    pub uncertainty_reasons: Vec<UncertaintyReason>,

    /// Raw-evidence payload, present only for uncertain clusters
    pub expansion: Option<ClusterExpansion>,
}

impl Cluster {
    /// Whether any uncertainty reason applies.
    pub fn is_uncertain(&self) -> bool {
        !self.uncertainty_reasons.is_empty()
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the cluster has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
