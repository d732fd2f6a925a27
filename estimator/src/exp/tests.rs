//! Tests for the approximate exponential.

use super::*;
use crate::equivalence::{
    assert_all_almost_eq, relative_error, APPROX_MAX_RELATIVE_ERROR, APPROX_TOLERANCE,
    EXACT_TOLERANCE,
};

const VALS: [f32; 8] = [-10.0, -5.0, -1.0, 0.0, 1.0, 2.0, 5.0, 10.0];

fn expected() -> Vec<f32> {
    VALS.iter().map(|v| v.exp()).collect()
}

fn sweep(lo: i32, hi: i32, scale: f32) -> Vec<f32> {
    (lo..=hi).map(|i| i as f32 * scale).collect()
}

// ---------------------------------------------------------------------------
// scalar
// ---------------------------------------------------------------------------

#[test]
fn test_bits_to_float() {
    assert_eq!(bits_to_float(0x3f80_0000), 1.0);
    assert_eq!(bits_to_float((EXP_BIAS_32 as u32) << 23), 1.0);
    assert_eq!(bits_to_float(0x4000_0000), 2.0);
    assert_eq!(bits_to_float(0), 0.0);
}

#[test]
fn test_approx_exp_reference_points() {
    let actual: Vec<f32> = VALS.iter().map(|&v| approx_exp(v)).collect();
    assert_all_almost_eq(&actual, &expected(), APPROX_TOLERANCE);
}

#[test]
fn test_approx_exp_sweep_accuracy() {
    let mut max_err = 0.0f32;
    for x in sweep(-10_000, 10_000, 0.001) {
        let exact = x.exp();
        let err = relative_error(approx_exp(x), exact);
        max_err = max_err.max(err);
        assert!(
            err < APPROX_MAX_RELATIVE_ERROR,
            "approx_exp({}) = {}, expected {}, rel_error = {:.2e}",
            x,
            approx_exp(x),
            exact,
            err
        );
    }
    println!("Scalar max relative error: {:.2e}", max_err);
}

#[test]
fn test_approx_exp_wide_range_accuracy() {
    // error is periodic in x·log2(e), so it holds across the normal range
    for x in sweep(-800, 800, 0.1) {
        let exact = x.exp();
        let err = relative_error(approx_exp(x), exact);
        assert!(
            err < APPROX_MAX_RELATIVE_ERROR,
            "approx_exp({}) rel_error = {:.2e}",
            x,
            err
        );
    }
}

#[test]
fn test_approx_exp_is_total() {
    let specials = [
        f32::MAX,
        f32::MIN,
        f32::MIN_POSITIVE,
        -f32::MIN_POSITIVE,
        f32::INFINITY,
        f32::NEG_INFINITY,
        f32::NAN,
        1e30,
        -1e30,
        EXP_HI,
        EXP_LO_SIGNED,
        88.0,
        -88.0,
        200.0,
        -200.0,
    ];
    for x in specials {
        let r = approx_exp(x);
        assert!(r.is_finite(), "approx_exp({}) = {} is not finite", x, r);
        assert!(r >= 0.0, "approx_exp({}) = {} is negative", x, r);
    }
}

#[test]
fn test_approx_exp_saturates() {
    assert_eq!(approx_exp(1e30), approx_exp(EXP_HI));
    assert_eq!(approx_exp(f32::INFINITY), approx_exp(EXP_HI));
    assert_eq!(approx_exp(-1e30), approx_exp(EXP_LO_SIGNED));
    assert!(approx_exp(EXP_HI) > 1e38);
    assert!(approx_exp(EXP_LO_SIGNED) < 1e-38);
}

#[test]
fn test_approx_exp_zero() {
    let r = approx_exp(0.0);
    assert!((r - 1.0).abs() < APPROX_TOLERANCE, "exp(0) = {}", r);
}

// ---------------------------------------------------------------------------
// lanes and slices
// ---------------------------------------------------------------------------

#[test]
fn test_lanes_match_scalar_bitwise() {
    let lanes8 = approx_exp_lanes(VALS);
    for (x, r) in VALS.iter().zip(lanes8) {
        assert_eq!(r.to_bits(), approx_exp(*x).to_bits());
    }

    let lanes3 = approx_exp_lanes([-1.0f32, 0.5, 3.0]);
    assert_eq!(lanes3[1].to_bits(), approx_exp(0.5).to_bits());

    let lanes0: [f32; 0] = approx_exp_lanes([]);
    assert!(lanes0.is_empty());
}

#[test]
fn test_vec_matches_scalar_lane_multiples() {
    for lanes in 1..=6 {
        let xs = sweep(0, (lanes * LANE_WIDTH) as i32 - 1, 0.37)
            .into_iter()
            .map(|x| x - 10.0)
            .collect::<Vec<_>>();
        let scalar: Vec<f32> = xs.iter().map(|&x| approx_exp(x)).collect();
        assert_all_almost_eq(&approx_exp_vec(&xs), &scalar, EXACT_TOLERANCE);
    }
}

#[test]
fn test_vec_matches_scalar_with_remainder() {
    for len in 0..=41 {
        let xs: Vec<f32> = (0..len).map(|i| (i as f32 - 20.0) * 0.45).collect();
        let scalar: Vec<f32> = xs.iter().map(|&x| approx_exp(x)).collect();
        let vectorized = approx_exp_vec(&xs);
        assert_eq!(vectorized.len(), len);
        assert_all_almost_eq(&vectorized, &scalar, EXACT_TOLERANCE);
    }
}

#[test]
fn test_in_place_matches_portable() {
    let xs = sweep(-250, 250, 0.07);
    let mut dispatched = xs.clone();
    let mut portable = xs.clone();
    approx_exp_in_place(&mut dispatched);
    approx_exp_in_place_portable(&mut portable);
    assert_all_almost_eq(&dispatched, &portable, EXACT_TOLERANCE);
}

#[test]
fn test_vec_empty() {
    assert!(approx_exp_vec(&[]).is_empty());
    let mut empty: [f32; 0] = [];
    approx_exp_in_place(&mut empty);
}

// ---------------------------------------------------------------------------
// SIMD kernels
// ---------------------------------------------------------------------------

#[cfg(target_arch = "x86_64")]
mod avx2_tests {
    use super::*;
    use crate::exp::avx2::{approx_exp_8_avx2, approx_exp_in_place as avx2_in_place};
    use common::cpu_features;

    #[test]
    fn test_approx_exp_8_reference_points() {
        if !cpu_features::has_avx2() {
            println!("AVX2 not available, skipping");
            return;
        }

        let result = unsafe { approx_exp_8_avx2(&VALS) };
        assert_all_almost_eq(&result, &expected(), APPROX_TOLERANCE);
    }

    #[test]
    fn test_approx_exp_8_matches_scalar() {
        if !cpu_features::has_avx2() {
            println!("AVX2 not available, skipping");
            return;
        }

        for chunk in sweep(-900, 900, 0.1).chunks_exact(8) {
            let mut batch = [0.0f32; 8];
            batch.copy_from_slice(chunk);
            let result = unsafe { approx_exp_8_avx2(&batch) };
            for i in 0..8 {
                assert_eq!(
                    result[i].to_bits(),
                    approx_exp(batch[i]).to_bits(),
                    "AVX2 vs scalar mismatch at x={}: avx2={}, scalar={}",
                    batch[i],
                    result[i],
                    approx_exp(batch[i])
                );
            }
        }
    }

    #[test]
    fn test_approx_exp_8_clamping() {
        if !cpu_features::has_avx2() {
            println!("AVX2 not available, skipping");
            return;
        }

        let batch = [
            f32::NEG_INFINITY,
            -1e30,
            -88.5,
            f32::NAN,
            88.5,
            1e30,
            f32::INFINITY,
            f32::MAX,
        ];
        let result = unsafe { approx_exp_8_avx2(&batch) };
        for i in 0..8 {
            assert!(
                result[i].is_finite() && result[i] >= 0.0,
                "approx_exp_8 produced {} for x={}",
                result[i],
                batch[i]
            );
            assert_eq!(result[i].to_bits(), approx_exp(batch[i]).to_bits());
        }
    }

    #[test]
    fn test_in_place_remainder() {
        if !cpu_features::has_avx2() {
            println!("AVX2 not available, skipping");
            return;
        }

        let xs = sweep(-6, 6, 0.9); // 13 values: one lane plus a remainder
        let mut values = xs.clone();
        unsafe { avx2_in_place(&mut values) };
        let scalar: Vec<f32> = xs.iter().map(|&x| approx_exp(x)).collect();
        assert_all_almost_eq(&values, &scalar, EXACT_TOLERANCE);
    }
}

#[cfg(target_arch = "x86_64")]
mod sse_tests {
    use super::*;
    use crate::exp::sse::approx_exp_in_place as sse_in_place;
    use common::cpu_features;

    #[test]
    fn test_sse_matches_scalar() {
        if !cpu_features::has_sse4_1() {
            println!("SSE4.1 not available, skipping");
            return;
        }

        let xs = sweep(-901, 901, 0.1);
        let mut values = xs.clone();
        unsafe { sse_in_place(&mut values) };
        for (x, r) in xs.iter().zip(&values) {
            assert_eq!(r.to_bits(), approx_exp(*x).to_bits(), "x={}", x);
        }
    }

    #[test]
    fn test_sse_reference_points() {
        if !cpu_features::has_sse4_1() {
            println!("SSE4.1 not available, skipping");
            return;
        }

        let mut values = VALS;
        unsafe { sse_in_place(&mut values) };
        assert_all_almost_eq(&values, &expected(), APPROX_TOLERANCE);
    }
}

#[cfg(target_arch = "aarch64")]
mod neon_tests {
    use super::*;
    use crate::exp::neon::{approx_exp_4_neon, approx_exp_in_place as neon_in_place};

    #[test]
    fn test_neon_reference_points() {
        let lo = unsafe { approx_exp_4_neon(&[-10.0, -5.0, -1.0, 0.0]) };
        let hi = unsafe { approx_exp_4_neon(&[1.0, 2.0, 5.0, 10.0]) };
        let expect = expected();
        assert_all_almost_eq(&lo, &expect[0..4], APPROX_TOLERANCE);
        assert_all_almost_eq(&hi, &expect[4..8], APPROX_TOLERANCE);
    }

    #[test]
    fn test_neon_matches_scalar() {
        let xs = sweep(-901, 901, 0.1);
        let mut values = xs.clone();
        unsafe { neon_in_place(&mut values) };
        for (x, r) in xs.iter().zip(&values) {
            assert_eq!(r.to_bits(), approx_exp(*x).to_bits(), "x={}", x);
        }
    }
}
