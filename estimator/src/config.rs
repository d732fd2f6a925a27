use serde::{Deserialize, Serialize};

use crate::kernel::ExpKernelKind;
use crate::matrix::ProductKind;

/// Selects the variant an estimator uses for each stage.
///
/// ```yaml
/// product: simd
/// exp_kernel: approx_simd
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    pub product: ProductKind,
    pub exp_kernel: ExpKernelKind,
}

impl EstimatorConfig {
    /// Scalar product and platform exp; the reference every variant is checked against.
    pub fn exact() -> Self {
        Self {
            product: ProductKind::Scalar,
            exp_kernel: ExpKernelKind::Exact,
        }
    }

    pub fn from_yaml_file(path: &str) -> anyhow::Result<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml(&yaml)
    }

    pub fn from_yaml(yaml: &str) -> anyhow::Result<Self> {
        let config: EstimatorConfig = serde_yml::from_str(yaml)?;

        Ok(config)
    }

    pub fn to_yaml(&self) -> anyhow::Result<String> {
        Ok(serde_yml::to_string(self)?)
    }
}
