//! Running-sum transform and the sampling side that consumes it.
//!
//! A cumulative array holds `c[r] = Σ_{i≤r} w[i]` for non-negative weights, so
//! it is non-decreasing and its last element is the total mass. Drawing
//! `u ~ Uniform(0, total)` and locating the first `c[r] > u` picks index `r`
//! with probability `w[r] / total`, with no per-element division.

/// Replaces each weight with the running sum up to and including it.
/// Returns the total.
pub fn cumulative_sum_in_place(values: &mut [f32]) -> f32 {
    let mut sum = 0.0f32;
    for v in values.iter_mut() {
        sum += *v;
        *v = sum;
    }
    sum
}

/// Index of the first cumulative value strictly greater than `draw`.
///
/// `None` when the array is empty or `draw` lies outside `[0, total)`.
pub fn sample_index(cumulative: &[f32], draw: f32) -> Option<usize> {
    let total = *cumulative.last()?;
    if !(0.0..total).contains(&draw) {
        return None;
    }
    Some(cumulative.partition_point(|&c| c <= draw))
}

/// Divides by the total so the array ends at 1.0.
///
/// Leaves the array untouched when the total is zero or not finite.
pub fn normalize_cumulative(cumulative: &mut [f32]) {
    let Some(&total) = cumulative.last() else {
        return;
    };
    if total <= 0.0 || !total.is_finite() {
        return;
    }
    let inv = 1.0 / total;
    cumulative.iter_mut().for_each(|c| *c *= inv);
}
