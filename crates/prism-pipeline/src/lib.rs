//! Prism Pipeline
//!
//! Orchestrates the evidence-structuring stages end to end: raw model
//! responses are extracted into statements, projected into paragraphs,
//! embedded via the injected provider, and clustered. A separate entry point
//! derives gates, conflicts, and the traversal queue from upstream claim
//! structure, since those need graph analysis the core does not perform.
//!
//! The only suspension point is the embedding fetch; everything above it is
//! synchronous, pure, and deterministic.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod pipeline;
pub mod questions;

pub use config::PipelineConfig;
pub use error::PipelineError;
pub use pipeline::{EvidenceGraph, Pipeline, RunMetadata};
pub use questions::{derive_questions, QuestionInputs, TraversalOutcome};
