//! Ranking utilities.

use ordered_float::NotNan;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Indices of the `k` largest positive, finite scores, highest first.
///
/// Equal scores rank the lower index first.
pub fn top_k(scores: &[f64], k: usize) -> Vec<(usize, f64)> {
    if k == 0 || scores.is_empty() {
        return Vec::new();
    }
    // Min-heap over (score, Reverse(index)); the root is the weakest kept entry.
    let mut heap: BinaryHeap<Reverse<(NotNan<f64>, Reverse<usize>)>> =
        BinaryHeap::with_capacity(k + 1);
    for (i, &score) in scores.iter().enumerate() {
        if !score.is_finite() || score <= 0.0 {
            continue;
        }
        let Ok(s) = NotNan::new(score) else { continue };
        let key = (s, Reverse(i));
        if heap.len() < k {
            heap.push(Reverse(key));
        } else if let Some(Reverse(weakest)) = heap.peek() {
            if key > *weakest {
                heap.pop();
                heap.push(Reverse(key));
            }
        }
    }
    let mut results: Vec<(NotNan<f64>, Reverse<usize>)> =
        heap.into_iter().map(|Reverse(key)| key).collect();
    results.sort_unstable_by(|a, b| b.cmp(a));
    results.into_iter().map(|(s, Reverse(i))| (i, s.into_inner())).collect()
}

/// Rescale in place to sum to 1. Leaves all-zero (or negative-sum) input unchanged.
pub fn normalize(scores: &mut [f64]) {
    let sum: f64 = scores.iter().sum();
    if sum > 0.0 {
        for s in scores {
            *s /= sum;
        }
    }
}
