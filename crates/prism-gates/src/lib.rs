//! Prism Gate and Conflict Derivation
//!
//! Turns upstream claim-graph structure into an interactive pruning protocol:
//! conditional gates (yes/no questions motivated by a single claim's
//! exclusive evidence) and filtered, gate-cross-referenced conflicts.
//!
//! Derivation never errors on malformed upstream data. Missing fields
//! degrade to lower-confidence or excluded candidates, and a debug record
//! enumerates every claim's outcome so an empty gate set is auditable
//! without an exception ever being raised.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod coherence;
pub mod conditions;
pub mod config;
pub mod conflicts;
pub mod deriver;
pub mod exclusivity;
pub mod overlap;
pub mod terms;

pub use config::GateConfig;
pub use conflicts::derive_conflicts;
pub use deriver::{derive_gates, ClaimGateDebug, ClaimGateOutcome, GateOutcome, ShortCircuit};
pub use exclusivity::{compute_exclusivity, ClaimExclusivity};
pub use overlap::{claim_overlap, ClaimOverlap};
pub use terms::{TermIndex, TermIndexCache};
