//! Deterministic similarity math
//!
//! All vectors entering this module are pre-normalized to unit length, so
//! cosine similarity is a plain dot product. Arithmetic is widened to `f64`
//! and quantized to six decimal places before any value is compared, which
//! makes repeated runs on identical input bit-identical.

/// Distance sentinel for items with no embedding vector.
///
/// Missing vectors never get a default similarity; they sort after every
/// real candidate.
pub const MISSING_DISTANCE: f64 = f64::INFINITY;

/// Quantize a similarity value to six decimal places.
///
/// Applied to every similarity before comparison or threshold testing.
/// Idempotent: `quantize(quantize(x)) == quantize(x)`.
pub fn quantize(x: f64) -> f64 {
    (x * 1e6).round() / 1e6
}

/// Cosine similarity of two unit-length vectors: their dot product, widened
/// to `f64` and quantized.
///
/// # Panics
///
/// Panics if vectors have different lengths. Length agreement is enforced at
/// the ingestion boundary, so a mismatch here is a bug, not bad input.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    assert_eq!(a.len(), b.len(), "Vectors must have same length");

    let dot: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| *x as f64 * *y as f64)
        .sum();
    quantize(dot.clamp(-1.0, 1.0))
}

/// Mean of a set of unit vectors, used for centroid selection.
///
/// The mean is not re-normalized; it is only ever compared against members
/// by relative distance, where scale cancels out of the ordering.
pub fn mean_vector(vectors: &[&[f32]]) -> Vec<f32> {
    if vectors.is_empty() {
        return Vec::new();
    }
    let dim = vectors[0].len();
    let mut mean = vec![0.0f32; dim];
    for v in vectors {
        for (m, x) in mean.iter_mut().zip(v.iter()) {
            *m += x;
        }
    }
    let n = vectors.len() as f32;
    for m in &mut mean {
        *m /= n;
    }
    mean
}

/// Squared Euclidean distance between two vectors, widened to `f64`.
///
/// Used only for centroid selection (member closest to the mean), where the
/// monotone square root is unnecessary.
pub fn squared_distance(a: &[f32], b: &[f32]) -> f64 {
    assert_eq!(a.len(), b.len(), "Vectors must have same length");
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = *x as f64 - *y as f64;
            d * d
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantize_rounds_to_six_places() {
        assert_eq!(quantize(0.123_456_789), 0.123_457);
        assert_eq!(quantize(0.1), 0.1);
        assert_eq!(quantize(-0.999_999_9), -1.0);
    }

    #[test]
    fn test_cosine_identical_unit_vectors() {
        let v = vec![1.0, 0.0, 0.0];
        assert_eq!(cosine_similarity(&v, &v), 1.0);
    }

    #[test]
    fn test_cosine_orthogonal() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![0.0, 1.0, 0.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_cosine_opposite() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![-1.0, 0.0, 0.0];
        assert_eq!(cosine_similarity(&a, &b), -1.0);
    }

    #[test]
    fn test_mean_vector() {
        let a = vec![1.0, 0.0];
        let b = vec![0.0, 1.0];
        let mean = mean_vector(&[&a, &b]);
        assert_eq!(mean, vec![0.5, 0.5]);
    }

    #[test]
    fn test_mean_vector_empty() {
        let mean = mean_vector(&[]);
        assert!(mean.is_empty());
    }

    #[test]
    fn test_squared_distance() {
        let a = vec![1.0, 0.0];
        let b = vec![0.0, 1.0];
        assert_eq!(squared_distance(&a, &b), 2.0);
        assert_eq!(squared_distance(&a, &a), 0.0);
    }

    #[test]
    fn test_missing_distance_sorts_last() {
        assert!(MISSING_DISTANCE > 1.0);
        assert!(0.3f64 < MISSING_DISTANCE);
    }
}
