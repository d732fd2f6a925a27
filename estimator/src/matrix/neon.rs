//! NEON dot product (aarch64).

use std::arch::aarch64::*;

/// Dot product of two equal-length slices using NEON.
///
/// # Safety
/// NEON is mandatory on aarch64; unsafe only because of the intrinsics.
pub unsafe fn dot(weights: &[f32], features: &[f32]) -> f32 {
    debug_assert_eq!(weights.len(), features.len());
    unsafe {
        let mut acc = vdupq_n_f32(0.0);
        let w_chunks = weights.chunks_exact(4);
        let f_chunks = features.chunks_exact(4);
        let w_rem = w_chunks.remainder();
        let f_rem = f_chunks.remainder();

        for (w, f) in w_chunks.zip(f_chunks) {
            let vw = vld1q_f32(w.as_ptr());
            let vf = vld1q_f32(f.as_ptr());
            acc = vaddq_f32(acc, vmulq_f32(vw, vf));
        }

        vaddvq_f32(acc) + super::scalar::dot(w_rem, f_rem)
    }
}
