//! Cosine similarity and deterministic top-k selection.

use std::cmp::Ordering;

/// Calculate cosine similarity between two vectors
///
/// A zero-norm vector scores 0 against anything. Vectors of different
/// lengths also score 0; callers validate dimensions beforehand.
/// Sums are accumulated in `f64` so large components do not overflow.
pub fn cosine_similarity(vector_a: &[f32], vector_b: &[f32]) -> f32 {
    if vector_a.len() != vector_b.len() {
        return 0.0;
    }

    let dot_product: f64 = vector_a
        .iter()
        .zip(vector_b.iter())
        .map(|(x, y)| f64::from(*x) * f64::from(*y))
        .sum();
    let magnitude_a = norm(vector_a);
    let magnitude_b = norm(vector_b);

    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return 0.0;
    }

    let score = (dot_product / (magnitude_a * magnitude_b)) as f32;
    if score.is_nan() {
        return 0.0;
    }
    // Fold -0.0 into 0.0 so equal scores compare equal under `total_cmp`.
    score + 0.0
}

fn norm(vector: &[f32]) -> f64 {
    vector
        .iter()
        .map(|x| f64::from(*x) * f64::from(*x))
        .sum::<f64>()
        .sqrt()
}

/// Score descending, then position ascending.
fn rank_order(left: &(usize, f32), right: &(usize, f32)) -> Ordering {
    right
        .1
        .total_cmp(&left.1)
        .then_with(|| left.0.cmp(&right.0))
}

/// Keep the `top_k` best `(position, score)` pairs in rank order.
///
/// Positions are unique, so the order is total and the result exact.
pub(crate) fn select_top_k(mut scored: Vec<(usize, f32)>, top_k: usize) -> Vec<(usize, f32)> {
    if top_k == 0 || scored.is_empty() {
        return Vec::new();
    }
    if top_k < scored.len() {
        scored.select_nth_unstable_by(top_k - 1, rank_order);
        scored.truncate(top_k);
    }
    scored.sort_unstable_by(rank_order);
    scored
}
