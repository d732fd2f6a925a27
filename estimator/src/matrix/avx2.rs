//! AVX2 dot product (x86_64).

use std::arch::x86_64::*;

/// Horizontal sum of a 256-bit f32 vector (8 elements).
#[inline]
#[target_feature(enable = "avx2")]
unsafe fn horizontal_sum_256(v: __m256) -> f32 {
    // Extract high 128 bits and add to low 128 bits
    let high = _mm256_extractf128_ps(v, 1);
    let low = _mm256_castps256_ps128(v);
    let sum128 = _mm_add_ps(low, high);

    // Standard 128-bit horizontal sum
    let shuf = _mm_movehdup_ps(sum128);
    let sums = _mm_add_ps(sum128, shuf);
    let shuf = _mm_movehl_ps(sums, sums);
    let sums = _mm_add_ss(sums, shuf);
    _mm_cvtss_f32(sums)
}

/// Dot product of two equal-length slices using AVX2.
///
/// # Safety
/// Caller must ensure AVX2 is available.
#[target_feature(enable = "avx2")]
pub unsafe fn dot(weights: &[f32], features: &[f32]) -> f32 {
    debug_assert_eq!(weights.len(), features.len());
    unsafe {
        let mut acc = _mm256_setzero_ps();
        let w_chunks = weights.chunks_exact(8);
        let f_chunks = features.chunks_exact(8);
        let w_rem = w_chunks.remainder();
        let f_rem = f_chunks.remainder();

        for (w, f) in w_chunks.zip(f_chunks) {
            let vw = _mm256_loadu_ps(w.as_ptr());
            let vf = _mm256_loadu_ps(f.as_ptr());
            // separate multiply and add; FMA is not required on the target
            acc = _mm256_add_ps(acc, _mm256_mul_ps(vw, vf));
        }

        horizontal_sum_256(acc) + super::scalar::dot(w_rem, f_rem)
    }
}
