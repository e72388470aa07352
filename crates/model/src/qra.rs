//! Quantile regression averaging on the raw forecasts.

use ndarray::{Array1, Array2};
use qra_math::{QuantRegConfig, QuantRegResult, quantile_regression};
use qra_primitives::Quantiles;
use qra_traits::QuantileForecaster;
use tracing::debug;

use crate::{ModelError, QraConfig};

#[derive(Debug, Clone)]
enum QraState {
    Unfit,
    Fitted { results: Vec<QuantRegResult>, n_features: usize },
}

/// Quantile regression averaging.
///
/// Regresses the target on every forecaster column, one quantile
/// regression per configured level.
#[derive(Debug, Clone)]
pub struct Qra {
    quantiles: Quantiles,
    fit_intercept: bool,
    solver: QuantRegConfig,
    state: QraState,
}

impl Qra {
    /// Create a model for a single quantile level with default settings.
    ///
    /// # Errors
    /// Returns `ModelError::InvalidConfig` unless `quantile` lies in (0, 1).
    pub fn new(quantile: f64) -> Result<Self, ModelError> {
        Self::with_config(QraConfig::for_quantile(quantile))
    }

    /// Create a model from a full configuration.
    ///
    /// # Errors
    /// Returns `ModelError::InvalidConfig` for invalid quantile levels or
    /// solver settings.
    pub fn with_config(config: QraConfig) -> Result<Self, ModelError> {
        let quantiles =
            Quantiles::new(config.quantiles).map_err(|e| ModelError::InvalidConfig(e.to_string()))?;
        config.solver.validate().map_err(|e| ModelError::InvalidConfig(e.to_string()))?;
        Ok(Self {
            quantiles,
            fit_intercept: config.fit_intercept,
            solver: config.solver,
            state: QraState::Unfit,
        })
    }

    /// Whether the regression carries an intercept.
    #[must_use]
    pub const fn fit_intercept(&self) -> bool {
        self.fit_intercept
    }

    /// Solver settings.
    #[must_use]
    pub const fn solver(&self) -> &QuantRegConfig {
        &self.solver
    }

    /// Fitted per-quantile regressions, in quantile order.
    #[must_use]
    pub fn results(&self) -> Option<&[QuantRegResult]> {
        match &self.state {
            QraState::Fitted { results, .. } => Some(results.as_slice()),
            QraState::Unfit => None,
        }
    }

    /// Number of regressor columns seen at fit time.
    #[must_use]
    pub fn n_features(&self) -> Option<usize> {
        match &self.state {
            QraState::Fitted { n_features, .. } => Some(*n_features),
            QraState::Unfit => None,
        }
    }
}

impl Default for Qra {
    fn default() -> Self {
        Self {
            quantiles: Quantiles::default(),
            fit_intercept: false,
            solver: QuantRegConfig::default(),
            state: QraState::Unfit,
        }
    }
}

impl QuantileForecaster for Qra {
    type Error = ModelError;

    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<&mut Self, ModelError> {
        if y.len() != x.nrows() {
            return Err(ModelError::mismatch(x.nrows(), y.len(), "target"));
        }

        let results = self
            .quantiles
            .levels()
            .iter()
            .map(|&tau| quantile_regression(x, y, tau, self.fit_intercept, &self.solver))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            quantiles = ?self.quantiles.levels(),
            n_obs = x.nrows(),
            n_features = x.ncols(),
            "fitted quantile regression averaging"
        );

        self.state = QraState::Fitted { results, n_features: x.ncols() };
        Ok(self)
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array2<f64>, ModelError> {
        let QraState::Fitted { results, n_features } = &self.state else {
            return Err(ModelError::NotFitted);
        };
        if x.ncols() != *n_features {
            return Err(ModelError::mismatch(*n_features, x.ncols(), "forecasters"));
        }

        let mut predictions = Array2::zeros((x.nrows(), results.len()));
        for (mut column, result) in predictions.columns_mut().into_iter().zip(results) {
            column.assign(&result.predict(x)?);
        }
        Ok(predictions)
    }

    fn quantiles(&self) -> &Quantiles {
        &self.quantiles
    }

    fn is_fitted(&self) -> bool {
        matches!(self.state, QraState::Fitted { .. })
    }

    fn name(&self) -> &str {
        "qra"
    }
}
