//! Shared numeric utilities for distribution bookkeeping.

use crate::state::CountVector;

/// Split an integer `total` across buckets proportionally to `weights`,
/// conserving the total exactly.
///
/// Uses largest-remainder apportionment: each bucket gets the floor of its
/// real-valued quota, then the leftover units go to the buckets with the
/// largest fractional parts. Ties and any float-induced surplus are broken
/// by bucket index, so the result is deterministic for a given input.
///
/// Returns `None` when the weights cannot define a distribution: an empty
/// slice, a non-finite weight, a negative weight, or an all-zero weight
/// vector while `total > 0`.
pub fn apportion(total: u64, weights: &[f64]) -> Option<CountVector> {
    if weights.is_empty() {
        return None;
    }
    if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
        return None;
    }
    if total == 0 {
        return Some(weights.iter().map(|_| 0).collect());
    }
    let weight_sum: f64 = weights.iter().sum();
    if weight_sum <= 0.0 {
        return None;
    }

    let mut result: CountVector = weights.iter().map(|_| 0).collect();
    let mut fractions: Vec<(usize, f64)> = Vec::with_capacity(weights.len());
    let mut assigned: u64 = 0;
    for (i, w) in weights.iter().enumerate() {
        let quota = total as f64 * w / weight_sum;
        let base = quota.floor();
        result[i] = base as u64;
        assigned += base as u64;
        fractions.push((i, quota - base));
    }

    // Largest fractional part first; index order on ties.
    // Safety: weights were checked finite, so fractions are comparable.
    fractions.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .expect("fractions are finite")
            .then(a.0.cmp(&b.0))
    });
    let leftover = total.saturating_sub(assigned) as usize;
    for k in 0..leftover {
        let (i, _) = fractions[k % fractions.len()];
        result[i] += 1;
    }

    Some(result)
}

/// Whether `shares` sum to 1 within `tol`.
pub fn is_normalized(shares: &[f64], tol: f64) -> bool {
    (shares.iter().sum::<f64>() - 1.0).abs() <= tol
}
