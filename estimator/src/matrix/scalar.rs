//! Scalar dot product.

/// Sequential `Σ weights[i] * features[i]` in index order.
#[inline]
pub fn dot(weights: &[f32], features: &[f32]) -> f32 {
    debug_assert_eq!(weights.len(), features.len());
    weights
        .iter()
        .zip(features)
        .fold(0.0f32, |acc, (w, f)| acc + w * f)
}
