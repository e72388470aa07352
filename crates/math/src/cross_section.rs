//! Cross-sectional statistics.
//!
//! A cross-section here is one observation (row) of the forecast matrix,
//! taken across all forecasters (columns).

use ndarray::{Array1, Array2, Axis};

use crate::MathError;

/// Row spread at or below this fraction of the row's largest magnitude counts as zero.
const SPREAD_TOLERANCE: f64 = 1e-12;

/// Per-row mean across columns.
///
/// # Returns
/// Mean vector (n_obs,).
///
/// # Errors
/// Returns `MathError::EmptyData` if `x` has no columns.
pub fn xsection_mean(x: &Array2<f64>) -> Result<Array1<f64>, MathError> {
    x.mean_axis(Axis(1)).ok_or(MathError::EmptyData)
}

/// Per-row population standard deviation across columns.
///
/// # Errors
/// Returns `MathError::EmptyData` if `x` has no columns.
pub fn xsection_std(x: &Array2<f64>) -> Result<Array1<f64>, MathError> {
    if x.ncols() == 0 {
        return Err(MathError::EmptyData);
    }
    Ok(x.std_axis(Axis(1), 0.0))
}

/// Row-wise z-scores together with the statistics that produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct XSectionScale {
    /// Standardized matrix (n_obs x n_features).
    pub values: Array2<f64>,
    /// Per-row mean (n_obs,).
    pub mean: Array1<f64>,
    /// Per-row population standard deviation (n_obs,).
    pub std: Array1<f64>,
}

impl XSectionScale {
    /// Standardize a target with the same per-row statistics.
    ///
    /// # Errors
    /// Returns `MathError::DimensionMismatch` if `y` does not have one
    /// entry per row.
    pub fn standardize(&self, y: &Array1<f64>) -> Result<Array1<f64>, MathError> {
        if y.len() != self.mean.len() {
            return Err(MathError::DimensionMismatch { expected: self.mean.len(), actual: y.len() });
        }
        Ok((y - &self.mean) / &self.std)
    }

    /// Map standardized predictions back: `y_hat * std + mean`, per row,
    /// applied to every column.
    ///
    /// # Errors
    /// Returns `MathError::DimensionMismatch` if `y_hat` does not have one
    /// row per observation.
    pub fn restore(&self, y_hat: &Array2<f64>) -> Result<Array2<f64>, MathError> {
        if y_hat.nrows() != self.mean.len() {
            return Err(MathError::DimensionMismatch {
                expected: self.mean.len(),
                actual: y_hat.nrows(),
            });
        }
        let std = self.std.view().insert_axis(Axis(1));
        let mean = self.mean.view().insert_axis(Axis(1));
        Ok(y_hat * &std + &mean)
    }
}

/// Standardize each row by its own mean and population standard deviation.
///
/// # Errors
/// Returns `MathError::DegenerateRow` for the first row whose values are
/// all equal, and `MathError::EmptyData` if `x` has no columns.
pub fn standardize_xsection(x: &Array2<f64>) -> Result<XSectionScale, MathError> {
    let mean = xsection_mean(x)?;
    let std = xsection_std(x)?;

    for (row, (values, &s)) in x.axis_iter(Axis(0)).zip(std.iter()).enumerate() {
        let magnitude = values.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
        if !(s > SPREAD_TOLERANCE * magnitude) || !s.is_finite() {
            return Err(MathError::DegenerateRow { row });
        }
    }

    let values = (x - &mean.view().insert_axis(Axis(1))) / &std.view().insert_axis(Axis(1));
    Ok(XSectionScale { values, mean, std })
}
