//! Model configuration.

use qra_math::QuantRegConfig;
use serde::{Deserialize, Serialize};

/// Configuration shared by every quantile regression averaging model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QraConfig {
    /// Quantile levels to forecast, strictly increasing in (0, 1).
    pub quantiles: Vec<f64>,
    /// Whether the regression carries an intercept.
    pub fit_intercept: bool,
    /// Quantile regression solver settings.
    pub solver: QuantRegConfig,
}

impl Default for QraConfig {
    fn default() -> Self {
        Self { quantiles: vec![0.5], fit_intercept: false, solver: QuantRegConfig::default() }
    }
}

impl QraConfig {
    /// Configuration for a single quantile level.
    #[must_use]
    pub fn for_quantile(quantile: f64) -> Self {
        Self { quantiles: vec![quantile], ..Self::default() }
    }
}

/// Configuration for factor quantile regression averaging.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FqraConfig {
    /// Regression settings for the factor regression.
    pub qra: QraConfig,
    /// Number of factors; `None` selects it by BIC at fit time.
    pub n_factors: Option<usize>,
}
