//! Linear quantile regression.
//!
//! Minimises the pinball (check) loss
//!
//! ```text
//! rho_tau(r) = tau * r        if r >= 0
//!            = (tau - 1) * r  otherwise
//! ```
//!
//! with the `anofox-regression` quantile solver. This module validates the
//! input, converts between `ndarray` and `faer`, and reports the training
//! loss.

use anofox_regression::prelude::*;
use faer::{Col, Mat};
use ndarray::{Array1, Array2, Axis, concatenate};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{MathError, column_rank};

/// Solver settings for [`quantile_regression`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuantRegConfig {
    /// Maximum number of solver iterations.
    pub max_iter: usize,
    /// Convergence tolerance passed to the solver.
    pub tolerance: f64,
}

impl Default for QuantRegConfig {
    fn default() -> Self {
        Self { max_iter: 1000, tolerance: 1e-8 }
    }
}

impl QuantRegConfig {
    /// Check the settings.
    ///
    /// # Errors
    /// Returns `MathError::InvalidParameter` for a zero iteration budget or a
    /// non-positive tolerance.
    pub fn validate(&self) -> Result<(), MathError> {
        if self.max_iter == 0 {
            return Err(MathError::InvalidParameter("max_iter must be positive".to_string()));
        }
        if !(self.tolerance > 0.0 && self.tolerance.is_finite()) {
            return Err(MathError::InvalidParameter(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

/// Fitted quantile regression for a single quantile level.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantRegResult {
    /// Quantile level the model was fitted for.
    pub quantile: f64,
    /// Intercept, when one was fitted.
    pub intercept: Option<f64>,
    /// Slope coefficients (n_features,).
    pub coefficients: Array1<f64>,
    /// Mean pinball loss on the training data.
    pub loss: f64,
}

impl QuantRegResult {
    /// Number of features the model expects.
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    /// Predict the conditional quantile.
    ///
    /// # Errors
    /// Returns `MathError::DimensionMismatch` if `x` has the wrong number of columns.
    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>, MathError> {
        if x.ncols() != self.coefficients.len() {
            return Err(MathError::DimensionMismatch {
                expected: self.coefficients.len(),
                actual: x.ncols(),
            });
        }
        let fitted = x.dot(&self.coefficients);
        Ok(match self.intercept {
            Some(intercept) => fitted + intercept,
            None => fitted,
        })
    }
}

/// Mean pinball loss of `residuals` at level `tau`.
#[must_use]
pub fn pinball_loss(residuals: &Array1<f64>, tau: f64) -> f64 {
    if residuals.is_empty() {
        return 0.0;
    }
    let total: f64 =
        residuals.iter().map(|&r| if r >= 0.0 { tau * r } else { (tau - 1.0) * r }).sum();
    total / residuals.len() as f64
}

/// Fit a linear quantile regression.
///
/// # Arguments
/// * `x` - Design matrix (n x p), without an intercept column
/// * `y` - Response vector (n,)
/// * `tau` - Quantile level in (0, 1)
/// * `fit_intercept` - Whether to add an intercept term
/// * `config` - Solver settings
///
/// # Errors
/// Returns error for an invalid quantile or configuration, mismatched or
/// non-finite inputs, fewer observations than unknowns, a design without
/// full column rank, or a solver failure.
pub fn quantile_regression(
    x: &Array2<f64>,
    y: &Array1<f64>,
    tau: f64,
    fit_intercept: bool,
    config: &QuantRegConfig,
) -> Result<QuantRegResult, MathError> {
    if !tau.is_finite() || tau <= 0.0 || tau >= 1.0 {
        return Err(MathError::InvalidQuantile(tau));
    }
    config.validate()?;

    let (n, p) = x.dim();
    if n != y.len() {
        return Err(MathError::DimensionMismatch { expected: y.len(), actual: n });
    }
    if n == 0 || p == 0 {
        return Err(MathError::EmptyData);
    }
    if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
        return Err(MathError::NumericalInstability("non-finite input".to_string()));
    }

    let unknowns = p + usize::from(fit_intercept);
    if n < unknowns {
        return Err(MathError::InsufficientData { required: unknowns, actual: n });
    }
    let rank = if fit_intercept {
        let design = concatenate(Axis(1), &[Array2::ones((n, 1)).view(), x.view()])
            .map_err(|e| MathError::LinearAlgebra(e.to_string()))?;
        column_rank(&design)?
    } else {
        column_rank(x)?
    };
    if rank < unknowns {
        return Err(MathError::LinearAlgebra(format!(
            "design matrix is rank deficient: rank {rank} < {unknowns} columns"
        )));
    }

    let x_mat = Mat::from_fn(n, p, |i, j| x[[i, j]]);
    let y_col = Col::from_fn(n, |i| y[i]);
    let fitted = QuantileRegressor::builder()
        .tau(tau)
        .with_intercept(fit_intercept)
        .max_iterations(config.max_iter)
        .tolerance(config.tolerance)
        .build()
        .fit(&x_mat, &y_col)
        .map_err(|e| MathError::Solver(format!("{e:?}")))?;

    let solution = fitted.result();
    let coefficients: Array1<f64> = solution.coefficients.iter().copied().collect();
    if coefficients.len() != p {
        return Err(MathError::DimensionMismatch { expected: p, actual: coefficients.len() });
    }
    let intercept = match (fit_intercept, solution.intercept) {
        (true, Some(intercept)) => Some(intercept),
        (true, None) => return Err(MathError::Solver("no intercept returned".to_string())),
        (false, _) => None,
    };
    if coefficients.iter().chain(intercept.iter()).any(|v| !v.is_finite()) {
        return Err(MathError::NumericalInstability("non-finite coefficients".to_string()));
    }

    let mut result = QuantRegResult { quantile: tau, intercept, coefficients, loss: 0.0 };
    result.loss = pinball_loss(&(y - &result.predict(x)?), tau);
    trace!(tau, n, p, loss = result.loss, "quantile regression fit");

    Ok(result)
}
