//! Symmetric clipping for outlier handling.

use ndarray::{Array, Dimension};

use crate::MathError;

/// Clip values to `[-k, k]`.
///
/// Any value with `|v| > k` becomes `k * sign(v)`; NaN is left as is.
///
/// # Errors
/// Returns `MathError::InvalidParameter` unless `k` is finite and positive.
pub fn clip_symmetric<D: Dimension>(
    data: &Array<f64, D>,
    k: f64,
) -> Result<Array<f64, D>, MathError> {
    Ok(Clipper::new(k)?.apply(data))
}

fn validate_threshold(k: f64) -> Result<(), MathError> {
    if !(k > 0.0 && k.is_finite()) {
        return Err(MathError::InvalidParameter(format!(
            "clipping threshold must be positive and finite, got {k}"
        )));
    }
    Ok(())
}

/// Clipping configuration and transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clipper {
    /// Threshold (e.g., 3.0).
    k: f64,
}

impl Clipper {
    /// Create a new clipper.
    ///
    /// # Errors
    /// Returns `MathError::InvalidParameter` unless `k` is finite and positive.
    pub fn new(k: f64) -> Result<Self, MathError> {
        validate_threshold(k)?;
        Ok(Self { k })
    }

    /// Get the threshold.
    #[must_use]
    pub const fn threshold(&self) -> f64 {
        self.k
    }

    /// Apply clipping to an array.
    #[must_use]
    pub fn apply<D: Dimension>(&self, data: &Array<f64, D>) -> Array<f64, D> {
        let k = self.k;
        data.mapv(|v| if v.abs() > k { k.copysign(v) } else { v })
    }
}

impl Default for Clipper {
    fn default() -> Self {
        Self { k: 3.0 }
    }
}
