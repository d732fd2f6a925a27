//! Fast approximate exponential (expf) using the IEEE 754 pow2 bit trick.
//!
//! Trades a hardware/libm `exp` call for a handful of multiply-adds. The scalar
//! form and every SIMD form (AVX2 x8, SSE4.1 x4, NEON x4) execute the same
//! operations in the same order with the same constants, so their results
//! agree bit for bit.
//!
//! # Algorithm
//! 1. Clamp x to `[EXP_LO_SIGNED, EXP_HI]` so the final integer conversion stays
//!    inside the signed 32-bit range and the result stays finite.
//! 2. Rescale to base 2: `x *= log2(e)`.
//! 3. `xf = x - floor(x)`.
//! 4. Subtract a degree-3 minimax correction in `xf` (Horner, no FMA).
//! 5. `S * x + B` rounded to an integer, reinterpreted as f32 bits. The integer
//!    part of x lands in the exponent field and the fraction in the mantissa.
//!
//! # Accuracy
//! Maximum relative error is about 1.2e-4 over the normal f32 output range.
//! The error is periodic in the fractional part of `x * log2(e)`.

use common::{cfg_aarch64, cfg_x86_64};

pub mod scalar;

cfg_x86_64! {
    pub(crate) mod avx2;
    pub(crate) mod sse;
}

cfg_aarch64! {
    pub(crate) mod neon;
}

pub use scalar::{approx_exp, bits_to_float};

/// Reference lane width (one 256-bit register of f32).
pub const LANE_WIDTH: usize = 8;

/// Zero point of the f32 exponent field.
pub(crate) const EXP_BIAS_32: i32 = 127;

/// Upper clamp (cephes).
#[allow(clippy::excessive_precision)]
pub const EXP_HI: f32 = 88.3762626647949;
/// Lower clamp; tighter than cephes' -88.376 since the conversion is signed.
pub const EXP_LO_SIGNED: f32 = -88.028;

pub(crate) const LOG2E: f32 = std::f32::consts::LOG2_E;

// minimax correction polynomial in the fractional part of x·log2(e)
#[allow(clippy::excessive_precision)]
pub(crate) const C0: f32 = 1.06906116358144185133e-04;
#[allow(clippy::excessive_precision)]
pub(crate) const C1: f32 = 3.03543677780836240743e-01;
#[allow(clippy::excessive_precision)]
pub(crate) const C2: f32 = -2.24339532327269441936e-01;
#[allow(clippy::excessive_precision)]
pub(crate) const C3: f32 = -7.92041454535668681958e-02;

pub(crate) const S: f32 = (1u32 << 23) as f32;
pub(crate) const B: f32 = S * EXP_BIAS_32 as f32;

/// Approximate exp for a fixed-width array of values.
///
/// Applies the scalar [`approx_exp`] to each element; no intrinsics. Any width
/// works, the portable in-place path uses `LANE_WIDTH`.
#[inline]
pub fn approx_exp_lanes<const W: usize>(xs: [f32; W]) -> [f32; W] {
    xs.map(approx_exp)
}

/// Approximate exp of every element, returning a new vector.
pub fn approx_exp_vec(xs: &[f32]) -> Vec<f32> {
    let mut out = xs.to_vec();
    approx_exp_in_place(&mut out);
    out
}

/// Approximate exp of every element in place, using the widest SIMD available.
///
/// Elements past the last full lane go through the scalar form.
pub fn approx_exp_in_place(values: &mut [f32]) {
    #[cfg(target_arch = "x86_64")]
    {
        if values.len() >= 8 && common::cpu_features::has_avx2() {
            unsafe { avx2::approx_exp_in_place(values) };
            return;
        }
        if values.len() >= 4 && common::cpu_features::has_sse4_1() {
            unsafe { sse::approx_exp_in_place(values) };
            return;
        }
    }
    #[cfg(target_arch = "aarch64")]
    {
        if values.len() >= 4 {
            unsafe { neon::approx_exp_in_place(values) };
            return;
        }
    }
    approx_exp_in_place_portable(values);
}

/// Lane-chunked fallback without intrinsics.
pub fn approx_exp_in_place_portable(values: &mut [f32]) {
    let mut chunks = values.chunks_exact_mut(LANE_WIDTH);
    for chunk in &mut chunks {
        let mut lanes = [0.0f32; LANE_WIDTH];
        lanes.copy_from_slice(chunk);
        chunk.copy_from_slice(&approx_exp_lanes(lanes));
    }
    for v in chunks.into_remainder() {
        *v = approx_exp(*v);
    }
}

#[cfg(test)]
mod tests;
