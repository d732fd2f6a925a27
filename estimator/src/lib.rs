//! Fast linear estimator.
//!
//! Evaluates a fixed linear model `y = Wx + b` for feature vectors and turns the
//! outputs into an unnormalized cumulative distribution over `exp(y)`, ready for
//! categorical sampling by binary search.
//!
//! ```rust
//! use linear_estimator::Estimator;
//!
//! let estimator = Estimator::new(&[[1.0f32, 2.0, 3.0], [4.0, 5.0, 6.0]], &[100.0, 200.0, 300.0])?;
//! let mut results = [0.0f32; 3];
//! estimator.estimate_linear(&[1.0, 2.0], &mut results)?;
//! assert_eq!(results, [109.0, 212.0, 315.0]);
//! # Ok::<(), linear_estimator::EstimatorError>(())
//! ```

pub mod config;
pub mod cumulative;
pub mod equivalence;
mod error;
mod estimator;
pub mod exp;
pub mod kernel;
pub mod matrix;

pub use config::EstimatorConfig;
pub use cumulative::{cumulative_sum_in_place, normalize_cumulative, sample_index};
pub use error::{Dimension, EstimatorError, EstimatorResult};
pub use estimator::Estimator;
pub use exp::{approx_exp, approx_exp_in_place, approx_exp_lanes, approx_exp_vec, bits_to_float};
pub use kernel::{ApproxExp, ApproxExpSimd, ExactExp, ExpKernel, ExpKernelKind};
pub use matrix::{CoefficientMatrix, ProductKind};
