//! Prism Clustering Engine
//!
//! Hierarchical agglomerative clustering over paragraph embeddings: average
//! linkage, a hard similarity-threshold stop (cluster count is emergent,
//! never forced toward a target), and ascending-index tie-breaking at every
//! step so identical inputs produce byte-identical output.
//!
//! An optional mutual-nearest-neighbor graph discounts distances between
//! mutually confirmed semantic neighbors. Per final cluster the engine picks
//! a centroid, computes cohesion scores, evaluates every uncertainty reason
//! independently, and attaches a bounded raw-evidence expansion payload to
//! uncertain clusters.
//!
//! Clustering never errors: degenerate input (too few items, no vectors)
//! degrades to fully confident singleton clusters.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod engine;
pub mod mnn;

pub use config::ClusteringConfig;
pub use engine::{cluster, ClusterItem, ClusteringResult, ClusteringSummary};
pub use mnn::mutual_neighbor_edges;
