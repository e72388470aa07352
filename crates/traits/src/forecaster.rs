//! Quantile forecaster trait definitions.

use ndarray::{Array1, Array2};
use qra_primitives::Quantiles;

/// A model that combines a matrix of forecasts into quantile forecasts.
///
/// Rows of `x` are observations and columns are individual forecasters.
/// `predict` returns one column per configured quantile level, in the
/// order of [`QuantileForecaster::quantiles`].
pub trait QuantileForecaster: Send + Sync {
    /// Error type returned by fit and predict.
    type Error: std::error::Error;

    /// Fit the model, replacing any previously fitted state.
    ///
    /// On failure the previous state is left untouched.
    ///
    /// # Arguments
    /// * `x` - Forecast matrix (n_obs x n_forecasters)
    /// * `y` - Realised target (n_obs,)
    ///
    /// # Errors
    /// Returns `Self::Error` if dimensions mismatch or fitting fails.
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<&mut Self, Self::Error>;

    /// Predict the configured quantiles.
    ///
    /// # Returns
    /// Prediction matrix (n_obs x n_quantiles).
    ///
    /// # Errors
    /// Returns `Self::Error` if the model is not fitted or `x` has the wrong shape.
    fn predict(&self, x: &Array2<f64>) -> Result<Array2<f64>, Self::Error>;

    /// Quantile levels this model forecasts.
    fn quantiles(&self) -> &Quantiles;

    /// Whether `fit` has completed successfully.
    fn is_fitted(&self) -> bool;

    /// Returns the name of this model.
    fn name(&self) -> &str;
}
