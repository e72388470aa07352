//! Quantile regression on the forecast mean.

use ndarray::{Array1, Array2, Axis};
use qra_math::xsection_mean;
use qra_primitives::Quantiles;
use qra_traits::QuantileForecaster;

use crate::{ModelError, Qra, QraConfig};

/// Quantile regression on the cross-sectional mean of the forecasts.
///
/// Each observation's forecasts are averaged into a single regressor before
/// delegating to [`Qra`], so the model ignores the order of the columns.
/// The default model forecasts the median.
#[derive(Debug, Clone, Default)]
pub struct Qrm {
    qra: Qra,
}

impl Qrm {
    /// Create a model for a single quantile level.
    ///
    /// # Errors
    /// Returns `ModelError::InvalidConfig` unless `quantile` lies in (0, 1).
    pub fn new(quantile: f64) -> Result<Self, ModelError> {
        Ok(Self { qra: Qra::new(quantile)? })
    }

    /// Create a model from a full configuration.
    ///
    /// # Errors
    /// Returns `ModelError::InvalidConfig` for an invalid configuration.
    pub fn with_config(config: QraConfig) -> Result<Self, ModelError> {
        Ok(Self { qra: Qra::with_config(config)? })
    }

    /// The regression on the mean forecast.
    #[must_use]
    pub const fn inner(&self) -> &Qra {
        &self.qra
    }
}

fn mean_forecast(x: &Array2<f64>) -> Result<Array2<f64>, ModelError> {
    Ok(xsection_mean(x)?.insert_axis(Axis(1)))
}

impl QuantileForecaster for Qrm {
    type Error = ModelError;

    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<&mut Self, ModelError> {
        self.qra.fit(&mean_forecast(x)?, y)?;
        Ok(self)
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array2<f64>, ModelError> {
        if !self.qra.is_fitted() {
            return Err(ModelError::NotFitted);
        }
        self.qra.predict(&mean_forecast(x)?)
    }

    fn quantiles(&self) -> &Quantiles {
        self.qra.quantiles()
    }

    fn is_fitted(&self) -> bool {
        self.qra.is_fitted()
    }

    fn name(&self) -> &str {
        "qrm"
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ndarray::array;

    use super::*;

    #[test]
    fn default_is_median() {
        let model = Qrm::default();
        assert_eq!(model.quantiles().levels(), &[0.5]);
        assert!(!model.is_fitted());
        assert_eq!(model.name(), "qrm");
    }

    #[test]
    fn regresses_on_row_mean() {
        let x = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        let y = array![1.5, 3.5, 5.5];

        let mut model = Qrm::new(0.5).unwrap();
        model.fit(&x, &y).unwrap();

        assert_eq!(model.inner().n_features(), Some(1));
        let slope = model.inner().results().unwrap()[0].coefficients[0];
        assert_relative_eq!(slope, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn predict_accepts_any_column_count() {
        let x = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        let y = array![1.5, 3.5, 5.5];
        let mut model = Qrm::default();
        model.fit(&x, &y).unwrap();

        let prediction = model.predict(&array![[2.0, 3.0, 4.0]]).unwrap();
        assert_relative_eq!(prediction[[0, 0]], 3.0, epsilon = 1e-3);
    }

    #[test]
    fn predict_before_fit() {
        let model = Qrm::default();
        assert!(matches!(model.predict(&array![[1.0]]), Err(ModelError::NotFitted)));
    }

    #[test]
    fn no_forecasters() {
        let mut model = Qrm::default();
        let err = model.fit(&Array2::zeros((3, 0)), &array![1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(err, ModelError::Math(_)));
    }
}
