use strum_macros::Display;
use thiserror::Error;

/// Which buffer or table a dimension check was applied to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Dimension {
    /// Intercept vector length versus the number of outputs.
    Intercepts,
    /// Length of one input's row of coefficients versus the number of outputs.
    CoefficientRow,
    /// Length of a flat coefficient buffer versus `inputs * outputs`.
    CoefficientData,
    /// Feature buffer length versus the number of inputs.
    Features,
    /// Result buffer length versus the number of outputs.
    Results,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EstimatorError {
    #[error("Dimension mismatch for {dimension}: expected {expected}, got {actual}")]
    DimensionMismatch {
        dimension: Dimension,
        expected: usize,
        actual: usize,
    },
}

pub type EstimatorResult<T> = std::result::Result<T, EstimatorError>;

impl EstimatorError {
    pub(crate) fn check(dimension: Dimension, expected: usize, actual: usize) -> EstimatorResult<()> {
        if expected == actual {
            Ok(())
        } else {
            Err(EstimatorError::DimensionMismatch {
                dimension,
                expected,
                actual,
            })
        }
    }

    pub fn dimension(&self) -> Dimension {
        match self {
            EstimatorError::DimensionMismatch { dimension, .. } => *dimension,
        }
    }
}
