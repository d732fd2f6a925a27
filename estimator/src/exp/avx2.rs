//! AVX2 approximate exp for 8 f32 values.

#![allow(unsafe_op_in_unsafe_fn)]

use std::arch::x86_64::*;

use super::{approx_exp, B, C0, C1, C2, C3, EXP_HI, EXP_LO_SIGNED, LOG2E, S};

/// Approximate exp for 8 f32 values.
///
/// # Safety
/// Caller must ensure AVX2 is available.
#[inline]
#[target_feature(enable = "avx2")]
pub unsafe fn approx_exp_8_avx2(x: &[f32; 8]) -> [f32; 8] {
    let vx = _mm256_loadu_ps(x.as_ptr());
    let result = approx_exp_8_avx2_m256(vx);
    let mut out = [0.0f32; 8];
    _mm256_storeu_ps(out.as_mut_ptr(), result);
    out
}

/// Approximate exp for an __m256 register.
///
/// # Safety
/// Caller must ensure AVX2 is available.
#[inline]
#[target_feature(enable = "avx2")]
pub unsafe fn approx_exp_8_avx2_m256(vx: __m256) -> __m256 {
    // Clamp, min first so NaN lanes take the upper bound
    let vx = _mm256_min_ps(vx, _mm256_set1_ps(EXP_HI));
    let vx = _mm256_max_ps(vx, _mm256_set1_ps(EXP_LO_SIGNED));

    let vx = _mm256_mul_ps(vx, _mm256_set1_ps(LOG2E));
    let vfl = _mm256_floor_ps(vx);
    let vxf = _mm256_sub_ps(vx, vfl);

    // Horner with separate mul/add to match the scalar form exactly
    let vkn = _mm256_set1_ps(C3);
    let vkn = _mm256_add_ps(_mm256_mul_ps(vxf, vkn), _mm256_set1_ps(C2));
    let vkn = _mm256_add_ps(_mm256_mul_ps(vxf, vkn), _mm256_set1_ps(C1));
    let vkn = _mm256_add_ps(_mm256_mul_ps(vxf, vkn), _mm256_set1_ps(C0));
    let vx = _mm256_sub_ps(vx, vkn);

    let vbits = _mm256_add_ps(
        _mm256_mul_ps(_mm256_set1_ps(S), vx),
        _mm256_set1_ps(B),
    );
    // numeric conversion (round to nearest), then a bit cast
    _mm256_castsi256_ps(_mm256_cvtps_epi32(vbits))
}

/// Approximate exp in place over a slice of any length.
///
/// # Safety
/// Caller must ensure AVX2 is available.
#[target_feature(enable = "avx2")]
pub unsafe fn approx_exp_in_place(values: &mut [f32]) {
    let mut chunks = values.chunks_exact_mut(8);
    for chunk in &mut chunks {
        let v = _mm256_loadu_ps(chunk.as_ptr());
        _mm256_storeu_ps(chunk.as_mut_ptr(), approx_exp_8_avx2_m256(v));
    }
    for v in chunks.into_remainder() {
        *v = approx_exp(*v);
    }
}
