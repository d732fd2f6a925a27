//! The estimator: a fixed linear model plus its output transforms.

use crate::config::EstimatorConfig;
use crate::cumulative::cumulative_sum_in_place;
use crate::error::{Dimension, EstimatorError, EstimatorResult};
use crate::kernel::ExpKernel;
use crate::matrix::{CoefficientMatrix, ProductKind};

/// A linear model `y = Wx + b` with immutable coefficients and intercepts.
///
/// Holds no per-call state, so one instance can serve many threads at once as
/// long as every call brings its own buffers. Storage is released on drop.
#[derive(Clone, Debug, PartialEq)]
pub struct Estimator {
    matrix: CoefficientMatrix,
    intercepts: Box<[f32]>,
    config: EstimatorConfig,
}

impl Estimator {
    /// Builds an estimator with the default (fastest) configuration.
    ///
    /// `coefficients` holds one row per input, each with one weight per output;
    /// `intercepts` holds one bias per output.
    pub fn new<R: AsRef<[f32]>>(coefficients: &[R], intercepts: &[f32]) -> EstimatorResult<Self> {
        Self::with_config(coefficients, intercepts, EstimatorConfig::default())
    }

    pub fn with_config<R: AsRef<[f32]>>(
        coefficients: &[R],
        intercepts: &[f32],
        config: EstimatorConfig,
    ) -> EstimatorResult<Self> {
        // without inputs the intercepts alone define the output count
        let num_outputs = coefficients
            .first()
            .map_or(intercepts.len(), |row| row.as_ref().len());
        EstimatorError::check(Dimension::Intercepts, num_outputs, intercepts.len())?;

        let matrix = CoefficientMatrix::from_input_rows(coefficients, num_outputs)?;
        Ok(Self::from_parts(matrix, intercepts, config))
    }

    /// Builds an estimator from a flat buffer where element
    /// `c * num_outputs + r` is the weight of input `c` on output `r`.
    pub fn from_column_major(
        num_inputs: usize,
        num_outputs: usize,
        coefficients: &[f32],
        intercepts: &[f32],
        config: EstimatorConfig,
    ) -> EstimatorResult<Self> {
        EstimatorError::check(Dimension::Intercepts, num_outputs, intercepts.len())?;

        let matrix = CoefficientMatrix::from_column_major(num_inputs, num_outputs, coefficients)?;
        Ok(Self::from_parts(matrix, intercepts, config))
    }

    fn from_parts(matrix: CoefficientMatrix, intercepts: &[f32], config: EstimatorConfig) -> Self {
        log::debug!(
            "Estimator created: {} inputs, {} outputs, product {}, exp {}",
            matrix.num_inputs(),
            matrix.num_outputs(),
            config.product,
            config.exp_kernel
        );

        Self {
            matrix,
            intercepts: intercepts.into(),
            config,
        }
    }

    pub fn num_inputs(&self) -> usize {
        self.matrix.num_inputs()
    }

    pub fn num_outputs(&self) -> usize {
        self.matrix.num_outputs()
    }

    pub fn matrix(&self) -> &CoefficientMatrix {
        &self.matrix
    }

    pub fn intercepts(&self) -> &[f32] {
        &self.intercepts
    }

    pub fn config(&self) -> EstimatorConfig {
        self.config
    }

    fn check_buffers(&self, features: &[f32], results: &[f32]) -> EstimatorResult<()> {
        EstimatorError::check(Dimension::Features, self.num_inputs(), features.len())?;
        EstimatorError::check(Dimension::Results, self.num_outputs(), results.len())
    }

    /// `results[r] = intercept[r] + Σ_c coeff[c][r] * features[c]`.
    ///
    /// On a dimension mismatch `results` is left untouched.
    pub fn estimate_linear(&self, features: &[f32], results: &mut [f32]) -> EstimatorResult<()> {
        self.estimate_linear_with(self.config.product, features, results)
    }

    pub fn estimate_linear_with(
        &self,
        product: ProductKind,
        features: &[f32],
        results: &mut [f32],
    ) -> EstimatorResult<()> {
        self.check_buffers(features, results)?;
        self.matrix
            .product_into(product, features, &self.intercepts, results);
        Ok(())
    }

    /// Writes the running sum of `exp(linear)` into `results`.
    ///
    /// `results[r] = Σ_{i≤r} exp(linear[i])`. This is not normalized: the last
    /// element is the total mass, and sampling draws `u` in `[0, total)`.
    pub fn estimate_cumulative_exp(
        &self,
        features: &[f32],
        results: &mut [f32],
    ) -> EstimatorResult<()> {
        self.estimate_cumulative_exp_unnormalized(features, results)
            .map(|_| ())
    }

    /// As [`Self::estimate_cumulative_exp`], also returning the total mass
    /// (the last element, or 0 with no outputs).
    pub fn estimate_cumulative_exp_unnormalized(
        &self,
        features: &[f32],
        results: &mut [f32],
    ) -> EstimatorResult<f32> {
        self.estimate_cumulative_exp_with(self.config.exp_kernel.kernel(), features, results)
    }

    pub fn estimate_cumulative_exp_with(
        &self,
        kernel: &dyn ExpKernel,
        features: &[f32],
        results: &mut [f32],
    ) -> EstimatorResult<f32> {
        self.exp_into(kernel, features, results)?;
        Ok(cumulative_sum_in_place(results))
    }

    /// Writes `exp(linear[r])` per output (no running sum) and returns the sum.
    pub fn estimate_exp(&self, features: &[f32], results: &mut [f32]) -> EstimatorResult<f32> {
        self.estimate_exp_with(self.config.exp_kernel.kernel(), features, results)
    }

    pub fn estimate_exp_with(
        &self,
        kernel: &dyn ExpKernel,
        features: &[f32],
        results: &mut [f32],
    ) -> EstimatorResult<f32> {
        self.exp_into(kernel, features, results)?;
        Ok(results.iter().sum())
    }

    fn exp_into(
        &self,
        kernel: &dyn ExpKernel,
        features: &[f32],
        results: &mut [f32],
    ) -> EstimatorResult<()> {
        self.estimate_linear_with(self.config.product, features, results)?;
        kernel.exp_in_place(results);
        Ok(())
    }
}
