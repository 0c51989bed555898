//! Prism Domain Layer
//!
//! This crate contains the core data model for Prism: the entities produced
//! and consumed by the evidence-structuring pipeline. It is pure data — no
//! I/O, no async, no pattern tables — and defines the closed enums that all
//! other layers operate on.
//!
//! ## Key Concepts
//!
//! - **Statement**: an atomic, attributable unit of evidence with a single
//!   stance and independent boolean signals
//! - **Paragraph**: an ordered group of statements sharing model + paragraph
//!   origin, with a dominant stance and a contested flag
//! - **Cluster**: a set of paragraphs sharing a centroid, with cohesion
//!   scores and an uncertainty verdict
//! - **Claim graph**: upstream claim/edge structure consumed by gate and
//!   conflict derivation
//! - **Gate / Conflict / TraversalQuestion**: the interactive pruning
//!   protocol surfaced to the consumer
//!
//! ## Architecture
//!
//! Dynamic upstream data is validated once at ingestion
//! ([`claim_graph::ClaimGraph::sanitized`]); everything downstream operates
//! on the validated, strongly-typed form.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod claim_graph;
pub mod cluster;
pub mod conflict;
pub mod gate;
pub mod paragraph;
pub mod signals;
pub mod stance;
pub mod statement;
pub mod traversal;

// Re-exports for convenience
pub use claim_graph::{Claim, ClaimEdge, ClaimGraph, EdgeType, SupportSymmetry};
pub use cluster::{Cluster, ClusterExpansion, ExpansionEntry, UncertaintyReason};
pub use conflict::{Conflict, GateBlock};
pub use gate::{ConditionKind, ConditionalGate, ExtractedCondition, TermClass};
pub use paragraph::{Paragraph, ParagraphKey};
pub use signals::Signals;
pub use stance::Stance;
pub use statement::{
    ClassificationProvenance, ClassificationStrategy, FallbackReason, Statement, StatementId,
};
pub use traversal::{QuestionAnswer, QuestionKind, QuestionStatus, TraversalQuestion};
