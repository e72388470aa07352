//! Symmetric clipping scaler.

use qra_math::Clipper;
use qra_primitives::Table;
use qra_traits::{Scaler, TransformError, Transformed};

/// Saturates features and target at `±k`.
///
/// Stateless: `fit` learns nothing. The inverse transform can only clip
/// again, so values that were saturated by `transform` are not recovered;
/// it is exact only for data that was already inside `[-k, k]`.
///
/// The default threshold is `k = 3`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClippingScaler {
    clipper: Clipper,
}

impl ClippingScaler {
    /// Create a new clipping scaler.
    ///
    /// # Errors
    /// Returns `TransformError::InvalidParameter` unless `k` is finite and positive.
    pub fn new(k: f64) -> Result<Self, TransformError> {
        let clipper = Clipper::new(k).map_err(|e| TransformError::InvalidParameter(e.to_string()))?;
        Ok(Self { clipper })
    }

    /// Get the clipping threshold.
    #[must_use]
    pub const fn threshold(&self) -> f64 {
        self.clipper.threshold()
    }

    fn clip(&self, table: &Table) -> Result<Table, TransformError> {
        Ok(table.relabeled(self.clipper.apply(table.values()))?)
    }
}

impl Scaler for ClippingScaler {
    fn transform(&self, x: &Table, y: Option<&Table>) -> Result<Transformed, TransformError> {
        Ok(Transformed { x: self.clip(x)?, y: y.map(|y| self.clip(y)).transpose()? })
    }

    fn fit_transform(
        &mut self,
        x: &Table,
        y: Option<&Table>,
    ) -> Result<Transformed, TransformError> {
        self.fit(x, y)?.transform(x, y)
    }

    fn inverse_transform(
        &self,
        x: Option<&Table>,
        y: Option<&Table>,
    ) -> Result<(Option<Table>, Option<Table>), TransformError> {
        let x = x.map(|x| self.clip(x)).transpose()?;
        let y = y.map(|y| self.clip(y)).transpose()?;
        Ok((x, y))
    }

    fn name(&self) -> &str {
        "clipping"
    }
}
