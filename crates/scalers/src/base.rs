//! Scaler with no behaviour of its own.

use qra_traits::Scaler;

/// A scaler that relies entirely on the provided [`Scaler`] methods.
///
/// `fit` is a no-op; `transform`, `fit_transform` and `inverse_transform`
/// return [`qra_traits::TransformError::NotImplemented`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BaseScaler;

impl Scaler for BaseScaler {
    fn name(&self) -> &str {
        "base"
    }
}
