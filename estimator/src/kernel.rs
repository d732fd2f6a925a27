//! Interchangeable exponential kernels.
//!
//! Every kernel maps a slice of linear outputs to their exponentials in place.
//! The estimator picks one through [`ExpKernelKind`] in its configuration, or a
//! caller passes any `&dyn ExpKernel` explicitly.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::equivalence::{APPROX_MAX_RELATIVE_ERROR, EXACT_TOLERANCE};
use crate::exp;

pub trait ExpKernel: Send + Sync + std::fmt::Debug {
    fn kind(&self) -> ExpKernelKind;

    fn exp_in_place(&self, values: &mut [f32]);
}

/// Platform `f32::exp`; the reference.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExactExp;

/// Scalar approximate exp, one element at a time.
#[derive(Clone, Copy, Debug, Default)]
pub struct ApproxExp;

/// Approximate exp dispatched to the widest SIMD unit available.
#[derive(Clone, Copy, Debug, Default)]
pub struct ApproxExpSimd;

impl ExpKernel for ExactExp {
    fn kind(&self) -> ExpKernelKind {
        ExpKernelKind::Exact
    }

    fn exp_in_place(&self, values: &mut [f32]) {
        values.iter_mut().for_each(|v| *v = v.exp());
    }
}

impl ExpKernel for ApproxExp {
    fn kind(&self) -> ExpKernelKind {
        ExpKernelKind::Approx
    }

    fn exp_in_place(&self, values: &mut [f32]) {
        values.iter_mut().for_each(|v| *v = exp::approx_exp(*v));
    }
}

impl ExpKernel for ApproxExpSimd {
    fn kind(&self) -> ExpKernelKind {
        ExpKernelKind::ApproxSimd
    }

    fn exp_in_place(&self, values: &mut [f32]) {
        exp::approx_exp_in_place(values);
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ExpKernelKind {
    Exact,
    Approx,
    #[default]
    ApproxSimd,
}

impl ExpKernelKind {
    pub fn kernel(self) -> &'static dyn ExpKernel {
        match self {
            ExpKernelKind::Exact => &ExactExp,
            ExpKernelKind::Approx => &ApproxExp,
            ExpKernelKind::ApproxSimd => &ApproxExpSimd,
        }
    }

    pub fn is_approximate(self) -> bool {
        !matches!(self, ExpKernelKind::Exact)
    }

    /// Relative error this kernel stays within against the exact exponential.
    pub fn max_relative_error(self) -> f32 {
        if self.is_approximate() {
            APPROX_MAX_RELATIVE_ERROR
        } else {
            EXACT_TOLERANCE
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;
    use crate::equivalence::{assert_all_almost_eq, APPROX_TOLERANCE};

    fn logits() -> Vec<f32> {
        (-40..=40).map(|i| i as f32 * 0.25).collect()
    }

    #[test]
    fn kind_round_trips_through_kernel() {
        for kind in ExpKernelKind::iter() {
            assert_eq!(kind.kernel().kind(), kind);
        }
    }

    #[test]
    fn every_kernel_tracks_exact() {
        let exact: Vec<f32> = logits().iter().map(|x| x.exp()).collect();
        for kind in ExpKernelKind::iter() {
            let mut values = logits();
            kind.kernel().exp_in_place(&mut values);
            assert_all_almost_eq(&values, &exact, kind.max_relative_error());
        }
    }

    #[test]
    fn approximate_kernels_agree_tightly() {
        let mut scalar = logits();
        let mut simd = logits();
        ApproxExp.exp_in_place(&mut scalar);
        ApproxExpSimd.exp_in_place(&mut simd);
        assert_all_almost_eq(&simd, &scalar, EXACT_TOLERANCE);
    }

    #[test]
    fn reference_points_within_loose_tolerance() {
        let xs = [-10.0f32, -5.0, -1.0, 0.0, 1.0, 2.0, 5.0, 10.0];
        let mut exact = xs;
        ExactExp.exp_in_place(&mut exact);
        for kind in [ExpKernelKind::Approx, ExpKernelKind::ApproxSimd] {
            let mut values = xs;
            kind.kernel().exp_in_place(&mut values);
            assert_all_almost_eq(&values, &exact, APPROX_TOLERANCE);
        }
    }

    #[test]
    fn names() {
        assert_eq!(ExpKernelKind::ApproxSimd.to_string(), "approx_simd");
        assert_eq!(
            ExpKernelKind::from_str("exact").ok(),
            Some(ExpKernelKind::Exact)
        );
        assert!(ExpKernelKind::from_str("sleef").is_err());
        assert_eq!(ExpKernelKind::default(), ExpKernelKind::ApproxSimd);
    }
}
