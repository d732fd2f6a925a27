//! NEON approximate exp for 4 f32 values (aarch64).

#![allow(unsafe_op_in_unsafe_fn)]

use std::arch::aarch64::*;

use super::{approx_exp, B, C0, C1, C2, C3, EXP_HI, EXP_LO_SIGNED, LOG2E, S};

/// Approximate exp for a float32x4_t register.
///
/// # Safety
/// NEON is mandatory on aarch64; unsafe only because of the intrinsics.
#[inline]
pub unsafe fn approx_exp_4_neon_q(vx: float32x4_t) -> float32x4_t {
    // minnm/maxnm return the number when one side is NaN, like f32::min/max
    let vx = vminnmq_f32(vx, vdupq_n_f32(EXP_HI));
    let vx = vmaxnmq_f32(vx, vdupq_n_f32(EXP_LO_SIGNED));

    let vx = vmulq_f32(vx, vdupq_n_f32(LOG2E));
    let vfl = vrndmq_f32(vx);
    let vxf = vsubq_f32(vx, vfl);

    let vkn = vdupq_n_f32(C3);
    let vkn = vaddq_f32(vmulq_f32(vxf, vkn), vdupq_n_f32(C2));
    let vkn = vaddq_f32(vmulq_f32(vxf, vkn), vdupq_n_f32(C1));
    let vkn = vaddq_f32(vmulq_f32(vxf, vkn), vdupq_n_f32(C0));
    let vx = vsubq_f32(vx, vkn);

    let vbits = vaddq_f32(vmulq_f32(vdupq_n_f32(S), vx), vdupq_n_f32(B));
    vreinterpretq_f32_s32(vcvtnq_s32_f32(vbits))
}

/// Approximate exp for 4 f32 values.
///
/// # Safety
/// See [`approx_exp_4_neon_q`].
#[inline]
pub unsafe fn approx_exp_4_neon(x: &[f32; 4]) -> [f32; 4] {
    let result = approx_exp_4_neon_q(vld1q_f32(x.as_ptr()));
    let mut out = [0.0f32; 4];
    vst1q_f32(out.as_mut_ptr(), result);
    out
}

/// Approximate exp in place over a slice of any length.
///
/// # Safety
/// See [`approx_exp_4_neon_q`].
pub unsafe fn approx_exp_in_place(values: &mut [f32]) {
    let mut chunks = values.chunks_exact_mut(4);
    for chunk in &mut chunks {
        let v = vld1q_f32(chunk.as_ptr());
        vst1q_f32(chunk.as_mut_ptr(), approx_exp_4_neon_q(v));
    }
    for v in chunks.into_remainder() {
        *v = approx_exp(*v);
    }
}
