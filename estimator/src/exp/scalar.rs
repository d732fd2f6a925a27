//! Scalar approximate exp and the bit reinterpretation it rests on.

use super::{B, C0, C1, C2, C3, EXP_HI, EXP_LO_SIGNED, LOG2E, S};

/// Reinterpret raw IEEE 754 bits as an f32.
///
/// The only place the crate turns an integer into a float by bits.
#[inline(always)]
pub fn bits_to_float(bits: u32) -> f32 {
    f32::from_bits(bits)
}

/// Approximate `exp(x)`.
///
/// Total over f32: finite inputs outside the clamp range saturate and NaN
/// maps to the upper clamp. The result is always finite and non-negative.
#[inline]
pub fn approx_exp(x: f32) -> f32 {
    let x = x.min(EXP_HI).max(EXP_LO_SIGNED);

    let x = x * LOG2E;
    let xf = x - x.floor();

    let kn = C3;
    let kn = xf * kn + C2;
    let kn = xf * kn + C1;
    let kn = xf * kn + C0;
    let x = x - kn;

    // round to nearest-even like cvtps2dq / fcvtns do
    let bits = (S * x + B).round_ties_even() as i32;
    bits_to_float(bits as u32)
}
