//! Standardized factor quantile regression averaging.

use ndarray::{Array1, Array2};
use qra_math::{FactorBasis, standardize_xsection};
use qra_primitives::Quantiles;
use qra_traits::QuantileForecaster;

use crate::{Fqra, FqraConfig, ModelError};

/// Factor quantile regression averaging on row-standardized forecasts.
///
/// Every observation is z-scored across its forecasters, and the target is
/// scaled with the same row mean and standard deviation, before fitting an
/// [`Fqra`]. Predictions are mapped back with `y_hat * std + mean` using
/// statistics recomputed from the forecasts passed to `predict`.
///
/// A row whose forecasts are all equal has no spread and is rejected with
/// `MathError::DegenerateRow`.
///
/// After standardization each row sums to zero, so at most
/// `n_forecasters - 1` factors carry information.
#[derive(Debug, Clone)]
pub struct Sfqra {
    fqra: Fqra,
}

impl Sfqra {
    /// Create a model for a single quantile level.
    ///
    /// # Errors
    /// Returns `ModelError::InvalidConfig` for an invalid quantile or a zero
    /// factor count.
    pub fn new(quantile: f64, n_factors: Option<usize>) -> Result<Self, ModelError> {
        Ok(Self { fqra: Fqra::new(quantile, n_factors)? })
    }

    /// Create a model from a full configuration.
    ///
    /// # Errors
    /// Returns `ModelError::InvalidConfig` for an invalid configuration.
    pub fn with_config(config: FqraConfig) -> Result<Self, ModelError> {
        Ok(Self { fqra: Fqra::with_config(config)? })
    }

    /// Configured factor count; `None` means BIC selection.
    #[must_use]
    pub const fn n_factors(&self) -> Option<usize> {
        self.fqra.n_factors()
    }

    /// Factor count used by the last successful fit.
    #[must_use]
    pub fn selected_factors(&self) -> Option<usize> {
        self.fqra.selected_factors()
    }

    /// Factor loadings of the standardized forecasts.
    #[must_use]
    pub fn basis(&self) -> Option<&FactorBasis> {
        self.fqra.basis()
    }

    /// The factor model fitted on standardized data.
    #[must_use]
    pub const fn inner(&self) -> &Fqra {
        &self.fqra
    }
}

impl QuantileForecaster for Sfqra {
    type Error = ModelError;

    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<&mut Self, ModelError> {
        if y.len() != x.nrows() {
            return Err(ModelError::mismatch(x.nrows(), y.len(), "target"));
        }

        let scale = standardize_xsection(x)?;
        let target = scale.standardize(y)?;
        self.fqra.fit(&scale.values, &target)?;
        Ok(self)
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array2<f64>, ModelError> {
        if !self.fqra.is_fitted() {
            return Err(ModelError::NotFitted);
        }

        let scale = standardize_xsection(x)?;
        let standardized = self.fqra.predict(&scale.values)?;
        Ok(scale.restore(&standardized)?)
    }

    fn quantiles(&self) -> &Quantiles {
        self.fqra.quantiles()
    }

    fn is_fitted(&self) -> bool {
        self.fqra.is_fitted()
    }

    fn name(&self) -> &str {
        "sfqra"
    }
}
