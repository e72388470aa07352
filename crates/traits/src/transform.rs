//! Data transformation trait definitions.

use qra_primitives::{PrimitiveError, Table};

use crate::ErrorKind;

/// Errors that can occur during transformation.
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    /// Empty input data.
    #[error("empty input data")]
    EmptyData,

    /// Invalid parameter.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Numerical error (NaN, Inf).
    #[error("numerical error: {0}")]
    Numerical(String),

    /// The scaler does not provide this operation.
    #[error("{0} is not implemented for this scaler")]
    NotImplemented(&'static str),

    /// Table construction error.
    #[error("table error: {0}")]
    Primitive(#[from] PrimitiveError),
}

impl TransformError {
    /// Category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyData | Self::InvalidParameter(_) => ErrorKind::Configuration,
            Self::Numerical(_) => ErrorKind::Numerical,
            Self::NotImplemented(_) => ErrorKind::NotImplemented,
            Self::Primitive(
                PrimitiveError::ShapeMismatch { .. } | PrimitiveError::LabelMismatch { .. },
            ) => ErrorKind::DimensionMismatch,
            Self::Primitive(_) => ErrorKind::Configuration,
        }
    }
}

/// Output of [`Scaler::transform`].
#[derive(Debug, Clone, PartialEq)]
pub struct Transformed {
    /// Transformed features, labelled like the input features.
    pub x: Table,
    /// Transformed target, present when a target was passed in.
    pub y: Option<Table>,
}

/// Preprocessing transform over paired feature and target tables.
///
/// Only [`Scaler::name`] is required. The provided `fit` is a no-op for
/// stateless scalers; the provided `transform`, `fit_transform` and
/// `inverse_transform` fail with [`TransformError::NotImplemented`], so a
/// concrete scaler must override the ones it supports.
///
/// Outputs are built with [`Table::relabeled`] and carry the column labels
/// and index of the corresponding input.
pub trait Scaler: Send + Sync {
    /// Learn any state needed by `transform`.
    ///
    /// # Errors
    /// Returns `TransformError` if the data cannot be fitted.
    fn fit(&mut self, _x: &Table, _y: Option<&Table>) -> Result<&mut Self, TransformError> {
        Ok(self)
    }

    /// Transform features and, optionally, the target.
    ///
    /// # Errors
    /// Returns `TransformError::NotImplemented` unless overridden.
    fn transform(&self, _x: &Table, _y: Option<&Table>) -> Result<Transformed, TransformError> {
        Err(TransformError::NotImplemented("transform"))
    }

    /// Fit, then transform the same data.
    ///
    /// # Errors
    /// Returns `TransformError::NotImplemented` unless overridden.
    fn fit_transform(
        &mut self,
        _x: &Table,
        _y: Option<&Table>,
    ) -> Result<Transformed, TransformError> {
        Err(TransformError::NotImplemented("fit_transform"))
    }

    /// Map transformed data back to the original scale.
    ///
    /// # Errors
    /// Returns `TransformError::NotImplemented` unless overridden.
    fn inverse_transform(
        &self,
        _x: Option<&Table>,
        _y: Option<&Table>,
    ) -> Result<(Option<Table>, Option<Table>), TransformError> {
        Err(TransformError::NotImplemented("inverse_transform"))
    }

    /// Returns the name of this scaler.
    fn name(&self) -> &str;
}
