//! Factor quantile regression averaging.

use ndarray::{Array1, Array2};
use qra_math::{FactorBasis, extract_factors, select_n_factors};
use qra_primitives::Quantiles;
use qra_traits::QuantileForecaster;
use tracing::debug;

use crate::{FqraConfig, ModelError, Qra, QraConfig};

#[derive(Debug, Clone)]
enum FqraState {
    Unfit,
    Fitted { basis: FactorBasis, bic: Option<Vec<f64>> },
}

/// Factor quantile regression averaging.
///
/// Compresses the forecasts onto their leading principal components and
/// runs quantile regression on the factor scores. The number of factors is
/// either fixed or chosen by BIC at every fit.
#[derive(Debug, Clone)]
pub struct Fqra {
    n_factors: Option<usize>,
    qra: Qra,
    state: FqraState,
}

impl Fqra {
    /// Create a model for a single quantile level.
    ///
    /// # Arguments
    /// * `quantile` - Quantile level in (0, 1)
    /// * `n_factors` - Fixed factor count, or `None` to select by BIC
    ///
    /// # Errors
    /// Returns `ModelError::InvalidConfig` for an invalid quantile or a zero
    /// factor count.
    pub fn new(quantile: f64, n_factors: Option<usize>) -> Result<Self, ModelError> {
        Self::with_config(FqraConfig { qra: QraConfig::for_quantile(quantile), n_factors })
    }

    /// Create a model from a full configuration.
    ///
    /// # Errors
    /// Returns `ModelError::InvalidConfig` for an invalid configuration.
    pub fn with_config(config: FqraConfig) -> Result<Self, ModelError> {
        if config.n_factors == Some(0) {
            return Err(ModelError::InvalidConfig("n_factors must be positive".to_string()));
        }
        let qra = Qra::with_config(config.qra)?;
        Ok(Self { n_factors: config.n_factors, qra, state: FqraState::Unfit })
    }

    /// Configured factor count; `None` means BIC selection.
    #[must_use]
    pub const fn n_factors(&self) -> Option<usize> {
        self.n_factors
    }

    /// Factor count used by the last successful fit.
    #[must_use]
    pub fn selected_factors(&self) -> Option<usize> {
        self.basis().map(FactorBasis::n_factors)
    }

    /// Factor loadings from the last successful fit.
    #[must_use]
    pub fn basis(&self) -> Option<&FactorBasis> {
        match &self.state {
            FqraState::Fitted { basis, .. } => Some(basis),
            FqraState::Unfit => None,
        }
    }

    /// BIC of every candidate factor count, when the count was selected.
    ///
    /// Entry `i` scores `i + 1` factors.
    #[must_use]
    pub fn bic_scores(&self) -> Option<&[f64]> {
        match &self.state {
            FqraState::Fitted { bic: Some(bic), .. } => Some(bic.as_slice()),
            _ => None,
        }
    }

    /// The regression on the factor scores.
    #[must_use]
    pub const fn inner(&self) -> &Qra {
        &self.qra
    }

    fn factor_basis(&self, x: &Array2<f64>) -> Result<(FactorBasis, Option<Vec<f64>>), ModelError> {
        match self.n_factors {
            Some(k) => {
                let max_factors = x.nrows().min(x.ncols());
                if k > max_factors {
                    return Err(ModelError::InvalidConfig(format!(
                        "n_factors = {k} exceeds min(n_obs, n_forecasters) = {max_factors}"
                    )));
                }
                Ok((extract_factors(x, k)?, None))
            }
            None => {
                let selection = select_n_factors(x)?;
                Ok((selection.basis, Some(selection.bic)))
            }
        }
    }
}

impl QuantileForecaster for Fqra {
    type Error = ModelError;

    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<&mut Self, ModelError> {
        if y.len() != x.nrows() {
            return Err(ModelError::mismatch(x.nrows(), y.len(), "target"));
        }

        let (basis, bic) = self.factor_basis(x)?;
        let scores = basis.project(x)?;
        self.qra.fit(&scores, y)?;

        debug!(
            n_factors = basis.n_factors(),
            explained = basis.explained_ratio(),
            selected = bic.is_some(),
            "fitted factor quantile regression averaging"
        );

        self.state = FqraState::Fitted { basis, bic };
        Ok(self)
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array2<f64>, ModelError> {
        let FqraState::Fitted { basis, .. } = &self.state else {
            return Err(ModelError::NotFitted);
        };
        if x.ncols() != basis.n_features() {
            return Err(ModelError::mismatch(basis.n_features(), x.ncols(), "forecasters"));
        }
        self.qra.predict(&basis.project(x)?)
    }

    fn quantiles(&self) -> &Quantiles {
        self.qra.quantiles()
    }

    fn is_fitted(&self) -> bool {
        matches!(self.state, FqraState::Fitted { .. })
    }

    fn name(&self) -> &str {
        "fqra"
    }
}
