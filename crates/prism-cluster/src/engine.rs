//! Agglomerative clustering with average linkage and a threshold stop

use crate::analysis;
use crate::config::ClusteringConfig;
use crate::mnn;
use prism_domain::{Cluster, Signals, Stance};
use prism_embedding::{cosine_similarity, quantize, MISSING_DISTANCE};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// One item to cluster: a paragraph's vector plus the attributes the
/// similarity adjustment and uncertainty checks need.
#[derive(Debug, Clone)]
pub struct ClusterItem {
    /// Unit-length embedding vector, if one was produced
    pub vector: Option<Vec<f32>>,
    /// Dominant stance of the paragraph
    pub stance: Stance,
    /// Originating model
    pub model_index: usize,
    /// The paragraph was contested
    pub contested: bool,
    /// Union of member signals
    pub signals: Signals,
    /// Raw text, used for expansion payloads
    pub text: String,
}

/// Summary metrics for one clustering run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusteringSummary {
    /// Items clustered
    pub item_count: usize,
    /// Final cluster count (emergent, never forced)
    pub cluster_count: usize,
    /// Clusters flagged uncertain
    pub uncertain_count: usize,
    /// Merges performed
    pub merges: usize,
    /// Degenerate input short-circuited to singletons
    pub singleton_fallback: bool,
    /// Items with no embedding vector
    pub missing_vectors: usize,
}

/// Clusters plus summary metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusteringResult {
    /// Final clusters, ordered by smallest member index
    pub clusters: Vec<Cluster>,
    /// Run metrics
    pub summary: ClusteringSummary,
}

/// Symmetric pairwise distance matrix over items.
pub(crate) struct DistanceMatrix {
    n: usize,
    values: Vec<f64>,
}

impl DistanceMatrix {
    fn index(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < j);
        i * self.n - i * (i + 1) / 2 + (j - i - 1)
    }

    pub(crate) fn get(&self, i: usize, j: usize) -> f64 {
        if i == j {
            return 0.0;
        }
        let (i, j) = (i.min(j), i.max(j));
        self.values[self.index(i, j)]
    }

    fn set(&mut self, i: usize, j: usize, value: f64) {
        let (i, j) = (i.min(j), i.max(j));
        let idx = self.index(i, j);
        self.values[idx] = value;
    }
}

/// Cluster items by hierarchical agglomerative clustering.
///
/// Merges the globally closest pair only while the average-linkage distance
/// stays at or below `1 - similarity_threshold`. Tie-breaking at every step
/// is by ascending index, so identical inputs (including embeddings) and
/// configuration produce byte-identical output.
pub fn cluster(items: &[ClusterItem], config: &ClusteringConfig) -> ClusteringResult {
    let missing_vectors = items.iter().filter(|i| i.vector.is_none()).count();

    // Degenerate input short-circuits to one confident singleton per item.
    if items.len() < config.min_items || missing_vectors == items.len() {
        debug!(
            "Clustering short-circuit: {} items, {} without vectors",
            items.len(),
            missing_vectors
        );
        return singleton_result(items, missing_vectors);
    }

    let matrix = build_matrix(items, config);
    let mut active: Vec<Vec<usize>> = (0..items.len()).map(|i| vec![i]).collect();
    let stop = quantize(1.0 - config.similarity_threshold);
    let mut merges = 0;

    loop {
        let mut best: Option<(usize, usize, f64)> = None;
        for a in 0..active.len() {
            for b in (a + 1)..active.len() {
                let d = linkage(&active[a], &active[b], &matrix);
                // Strict improvement keeps the lowest (a, b) pair on ties.
                if best.map_or(true, |(_, _, bd)| d < bd) {
                    best = Some((a, b, d));
                }
            }
        }

        match best {
            Some((a, b, d)) if d <= stop => {
                let merged = active.remove(b);
                active[a].extend(merged);
                active[a].sort_unstable();
                merges += 1;
            }
            _ => break,
        }
    }

    if active.len() > config.safety_ceiling {
        warn!(
            "Cluster count {} exceeds safety ceiling {}",
            active.len(),
            config.safety_ceiling
        );
    }

    // Stable output order: by smallest member index.
    active.sort_by_key(|members| members[0]);

    let clusters: Vec<Cluster> = active
        .iter()
        .enumerate()
        .map(|(id, members)| analysis::analyze_cluster(id, members, items, config))
        .collect();

    let summary = ClusteringSummary {
        item_count: items.len(),
        cluster_count: clusters.len(),
        uncertain_count: clusters.iter().filter(|c| c.is_uncertain()).count(),
        merges,
        singleton_fallback: false,
        missing_vectors,
    };
    info!(
        "Clustering complete: {} items -> {} clusters ({} uncertain, {} merges)",
        summary.item_count, summary.cluster_count, summary.uncertain_count, summary.merges
    );

    ClusteringResult { clusters, summary }
}

/// Average linkage: mean pairwise distance across all member pairs.
fn linkage(a: &[usize], b: &[usize], matrix: &DistanceMatrix) -> f64 {
    let mut total = 0.0;
    for &i in a {
        for &j in b {
            let d = matrix.get(i, j);
            if d == MISSING_DISTANCE {
                return MISSING_DISTANCE;
            }
            total += d;
        }
    }
    quantize(total / (a.len() * b.len()) as f64)
}

fn build_matrix(items: &[ClusterItem], config: &ClusteringConfig) -> DistanceMatrix {
    let n = items.len();
    let mut matrix = DistanceMatrix {
        n,
        values: vec![MISSING_DISTANCE; n * (n - 1) / 2],
    };

    for (i, item) in items.iter().enumerate() {
        if item.vector.is_none() {
            // Logged once per missing id; the sentinel keeps the item
            // unmergeable rather than defaulting a similarity.
            warn!("Item {} has no embedding vector; distances set to +inf", i);
        }
    }

    for i in 0..n {
        for j in (i + 1)..n {
            let (Some(vi), Some(vj)) = (&items[i].vector, &items[j].vector) else {
                continue;
            };
            let raw = cosine_similarity(vi, vj);
            let adjusted = config.adjustment.adjust(
                raw,
                items[i].stance,
                items[j].stance,
                items[i].model_index,
                items[j].model_index,
            );
            matrix.set(i, j, quantize(1.0 - adjusted));
        }
    }

    if config.mutual_neighbor_boost {
        let edges = mnn::mutual_neighbor_edges(n, config.mutual_neighbor_k, |i, j| {
            matrix.get(i, j)
        });
        for (i, j) in edges {
            let discounted = quantize(matrix.get(i, j) * (1.0 - config.mutual_neighbor_discount));
            matrix.set(i, j, discounted);
        }
    }

    matrix
}

fn singleton_result(items: &[ClusterItem], missing_vectors: usize) -> ClusteringResult {
    let clusters: Vec<Cluster> = (0..items.len())
        .map(|i| Cluster {
            id: i,
            members: vec![i],
            centroid: i,
            cohesion: 1.0,
            pairwise_cohesion: 1.0,
            uncertainty_reasons: vec![],
            expansion: None,
        })
        .collect();
    let summary = ClusteringSummary {
        item_count: items.len(),
        cluster_count: clusters.len(),
        uncertain_count: 0,
        merges: 0,
        singleton_fallback: true,
        missing_vectors,
    };
    ClusteringResult { clusters, summary }
}
