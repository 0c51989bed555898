//! Prism Traversal Queue
//!
//! Unifies conditional gates and claim partitions into a single prioritized,
//! deduplicated, capped queue of traversal questions, then tracks resolution:
//! answers prune statements, pruning auto-resolves questions whose evidence
//! is already settled, and blocking edges keep partition forks ahead of the
//! gates inside them.
//!
//! Merging, capping, blocking, and auto-resolution are total functions over
//! their inputs; degenerate input produces an empty queue, never an error.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod merge;
pub mod state;

pub use config::TraversalConfig;
pub use merge::{merge_questions, MergeContext, MergeOutcome, PartitionInput};
pub use state::TraversalState;
