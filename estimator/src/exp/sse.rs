//! SSE4.1 approximate exp for 4 f32 values.

#![allow(unsafe_op_in_unsafe_fn)]

use std::arch::x86_64::*;

use super::{approx_exp, B, C0, C1, C2, C3, EXP_HI, EXP_LO_SIGNED, LOG2E, S};

/// Approximate exp for an __m128 register.
///
/// # Safety
/// Caller must ensure SSE4.1 is available.
#[inline]
#[target_feature(enable = "sse4.1")]
pub unsafe fn approx_exp_4_sse_m128(vx: __m128) -> __m128 {
    let vx = _mm_min_ps(vx, _mm_set1_ps(EXP_HI));
    let vx = _mm_max_ps(vx, _mm_set1_ps(EXP_LO_SIGNED));

    let vx = _mm_mul_ps(vx, _mm_set1_ps(LOG2E));
    let vfl = _mm_floor_ps(vx);
    let vxf = _mm_sub_ps(vx, vfl);

    let vkn = _mm_set1_ps(C3);
    let vkn = _mm_add_ps(_mm_mul_ps(vxf, vkn), _mm_set1_ps(C2));
    let vkn = _mm_add_ps(_mm_mul_ps(vxf, vkn), _mm_set1_ps(C1));
    let vkn = _mm_add_ps(_mm_mul_ps(vxf, vkn), _mm_set1_ps(C0));
    let vx = _mm_sub_ps(vx, vkn);

    let vbits = _mm_add_ps(_mm_mul_ps(_mm_set1_ps(S), vx), _mm_set1_ps(B));
    _mm_castsi128_ps(_mm_cvtps_epi32(vbits))
}

/// Approximate exp in place over a slice of any length.
///
/// # Safety
/// Caller must ensure SSE4.1 is available.
#[target_feature(enable = "sse4.1")]
pub unsafe fn approx_exp_in_place(values: &mut [f32]) {
    let mut chunks = values.chunks_exact_mut(4);
    for chunk in &mut chunks {
        let v = _mm_loadu_ps(chunk.as_ptr());
        _mm_storeu_ps(chunk.as_mut_ptr(), approx_exp_4_sse_m128(v));
    }
    for v in chunks.into_remainder() {
        *v = approx_exp(*v);
    }
}
