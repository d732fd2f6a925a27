//! SSE dot product (x86_64).

use std::arch::x86_64::*;

#[inline]
#[target_feature(enable = "sse4.1")]
unsafe fn horizontal_sum_128(v: __m128) -> f32 {
    let shuf = _mm_movehdup_ps(v); // [1,1,3,3]
    let sums = _mm_add_ps(v, shuf); // [0+1,_,2+3,_]
    let shuf = _mm_movehl_ps(sums, sums); // [2+3,_,_,_]
    let sums = _mm_add_ss(sums, shuf);
    _mm_cvtss_f32(sums)
}

/// Dot product of two equal-length slices using SSE.
///
/// # Safety
/// Caller must ensure SSE4.1 is available.
#[target_feature(enable = "sse4.1")]
pub unsafe fn dot(weights: &[f32], features: &[f32]) -> f32 {
    debug_assert_eq!(weights.len(), features.len());
    unsafe {
        let mut acc = _mm_setzero_ps();
        let w_chunks = weights.chunks_exact(4);
        let f_chunks = features.chunks_exact(4);
        let w_rem = w_chunks.remainder();
        let f_rem = f_chunks.remainder();

        for (w, f) in w_chunks.zip(f_chunks) {
            let vw = _mm_loadu_ps(w.as_ptr());
            let vf = _mm_loadu_ps(f.as_ptr());
            acc = _mm_add_ps(acc, _mm_mul_ps(vw, vf));
        }

        horizontal_sum_128(acc) + super::scalar::dot(w_rem, f_rem)
    }
}
