//! Coefficient storage and the matrix-vector product.
//!
//! Logically the matrix is `inputs x outputs` (`coeff[c][r]` is the weight of
//! input `c` on output `r`). It is stored output-major: each output owns a
//! contiguous run of `num_inputs` weights, so one output's dot product is a
//! single contiguous SIMD-friendly pass over memory.

use common::{cfg_aarch64, cfg_x86_64};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::error::{Dimension, EstimatorError, EstimatorResult};

pub mod scalar;

cfg_x86_64! {
    pub(crate) mod avx2;
    pub(crate) mod sse;
}

cfg_aarch64! {
    pub(crate) mod neon;
}

/// How the dot products of a matrix-vector product are evaluated.
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
pub enum ProductKind {
    /// One multiply-add per weight, in input order.
    Scalar,
    /// Lane-parallel across the input dimension with a scalar remainder.
    #[default]
    Simd,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CoefficientMatrix {
    num_inputs: usize,
    num_outputs: usize,
    // output-major: weights[r * num_inputs + c] == coeff[c][r]
    weights: Box<[f32]>,
}

impl CoefficientMatrix {
    /// Builds the matrix from one row per input, each `num_outputs` long.
    pub fn from_input_rows<R: AsRef<[f32]>>(
        rows: &[R],
        num_outputs: usize,
    ) -> EstimatorResult<Self> {
        for row in rows {
            EstimatorError::check(Dimension::CoefficientRow, num_outputs, row.as_ref().len())?;
        }

        let num_inputs = rows.len();
        let mut weights = vec![0.0f32; num_inputs * num_outputs];
        for (c, row) in rows.iter().enumerate() {
            for (r, &w) in row.as_ref().iter().enumerate() {
                weights[r * num_inputs + c] = w;
            }
        }

        Ok(Self {
            num_inputs,
            num_outputs,
            weights: weights.into_boxed_slice(),
        })
    }

    /// Builds the matrix from a flat buffer where element `c * num_outputs + r`
    /// is `coeff[c][r]` (outputs contiguous, inputs strided).
    pub fn from_column_major(
        num_inputs: usize,
        num_outputs: usize,
        data: &[f32],
    ) -> EstimatorResult<Self> {
        let expected = num_inputs.checked_mul(num_outputs).ok_or(
            EstimatorError::DimensionMismatch {
                dimension: Dimension::CoefficientData,
                expected: usize::MAX,
                actual: data.len(),
            },
        )?;
        EstimatorError::check(Dimension::CoefficientData, expected, data.len())?;

        let mut weights = vec![0.0f32; data.len()];
        for c in 0..num_inputs {
            for r in 0..num_outputs {
                weights[r * num_inputs + c] = data[c * num_outputs + r];
            }
        }

        Ok(Self {
            num_inputs,
            num_outputs,
            weights: weights.into_boxed_slice(),
        })
    }

    pub fn num_inputs(&self) -> usize {
        self.num_inputs
    }

    pub fn num_outputs(&self) -> usize {
        self.num_outputs
    }

    /// Weight of `input` on `output`.
    pub fn weight(&self, input: usize, output: usize) -> f32 {
        assert!(input < self.num_inputs && output < self.num_outputs);
        self.weights[output * self.num_inputs + input]
    }

    /// The contiguous weights feeding one output, in input order.
    pub fn output_weights(&self, output: usize) -> &[f32] {
        let start = output * self.num_inputs;
        &self.weights[start..start + self.num_inputs]
    }

    /// `results[r] = intercepts[r] + dot(output_weights(r), features)`.
    ///
    /// Lengths are checked by the caller.
    pub(crate) fn product_into(
        &self,
        kind: ProductKind,
        features: &[f32],
        intercepts: &[f32],
        results: &mut [f32],
    ) {
        debug_assert_eq!(features.len(), self.num_inputs);
        debug_assert_eq!(intercepts.len(), self.num_outputs);
        debug_assert_eq!(results.len(), self.num_outputs);

        let dot: fn(&[f32], &[f32]) -> f32 = match kind {
            ProductKind::Scalar => scalar::dot,
            ProductKind::Simd => simd_dot(self.num_inputs),
        };

        for (r, (out, &intercept)) in results.iter_mut().zip(intercepts).enumerate() {
            *out = intercept + dot(self.output_weights(r), features);
        }
    }
}

/// Picks the dot product for rows of `len` weights once per call.
fn simd_dot(len: usize) -> fn(&[f32], &[f32]) -> f32 {
    #[cfg(target_arch = "x86_64")]
    {
        if len >= 8 && common::cpu_features::has_avx2() {
            log::trace!("dot product: avx2, {} inputs", len);
            return avx2_dot;
        }
        if len >= 4 && common::cpu_features::has_sse4_1() {
            log::trace!("dot product: sse4.1, {} inputs", len);
            return sse_dot;
        }
    }
    #[cfg(target_arch = "aarch64")]
    {
        if len >= 4 {
            log::trace!("dot product: neon, {} inputs", len);
            return neon_dot;
        }
    }
    scalar::dot
}

cfg_x86_64! {
    fn avx2_dot(weights: &[f32], features: &[f32]) -> f32 {
        // selected only after has_avx2()
        unsafe { avx2::dot(weights, features) }
    }

    fn sse_dot(weights: &[f32], features: &[f32]) -> f32 {
        // selected only after has_sse4_1()
        unsafe { sse::dot(weights, features) }
    }
}

cfg_aarch64! {
    fn neon_dot(weights: &[f32], features: &[f32]) -> f32 {
        unsafe { neon::dot(weights, features) }
    }
}
