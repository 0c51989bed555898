//! Mutual-nearest-neighbor graph
//!
//! Two items share a mutual edge when each sits in the other's k-nearest
//! neighborhood by base distance. Merges between mutually confirmed
//! neighbors get a distance discount in the engine.

use std::collections::HashSet;

/// Compute mutual-neighbor edges from a symmetric distance matrix.
///
/// `distance(i, j)` must be symmetric; infinite distances (missing vectors)
/// never produce edges. Neighbor ranking ties break by ascending index, so
/// the graph is deterministic.
pub fn mutual_neighbor_edges(
    n: usize,
    k: usize,
    distance: impl Fn(usize, usize) -> f64,
) -> HashSet<(usize, usize)> {
    let mut neighborhoods: Vec<Vec<usize>> = Vec::with_capacity(n);

    for i in 0..n {
        let mut candidates: Vec<(usize, f64)> = (0..n)
            .filter(|&j| j != i)
            .map(|j| (j, distance(i, j)))
            .filter(|(_, d)| d.is_finite())
            .collect();
        candidates.sort_by(|a, b| {
            a.1.partial_cmp(&b.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        neighborhoods.push(candidates.into_iter().take(k).map(|(j, _)| j).collect());
    }

    let mut edges = HashSet::new();
    for i in 0..n {
        for &j in &neighborhoods[i] {
            if j > i && neighborhoods[j].contains(&i) {
                edges.insert((i, j));
            }
        }
    }
    edges
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutual_pair_detected() {
        // 0 and 1 are close; 2 is far from both.
        let d = |i: usize, j: usize| -> f64 {
            match (i.min(j), i.max(j)) {
                (0, 1) => 0.1,
                (0, 2) => 0.9,
                (1, 2) => 0.8,
                _ => 0.0,
            }
        };
        let edges = mutual_neighbor_edges(3, 1, d);
        assert!(edges.contains(&(0, 1)));
        assert!(!edges.contains(&(0, 2)));
    }

    #[test]
    fn test_asymmetric_neighborhoods_produce_no_edge() {
        // 1's nearest is 0, but 0's nearest is 2.
        let d = |i: usize, j: usize| -> f64 {
            match (i.min(j), i.max(j)) {
                (0, 1) => 0.5,
                (0, 2) => 0.1,
                (1, 2) => 0.9,
                _ => 0.0,
            }
        };
        let edges = mutual_neighbor_edges(3, 1, d);
        assert!(!edges.contains(&(0, 1)));
        assert!(edges.contains(&(0, 2)));
    }

    #[test]
    fn test_infinite_distances_excluded() {
        let d = |_i: usize, _j: usize| f64::INFINITY;
        let edges = mutual_neighbor_edges(3, 2, d);
        assert!(edges.is_empty());
    }

    #[test]
    fn test_empty_input() {
        let edges = mutual_neighbor_edges(0, 2, |_, _| 0.0);
        assert!(edges.is_empty());
    }
}
