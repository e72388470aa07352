//! Error types for model fitting and prediction.

use qra_math::MathError;
use qra_traits::ErrorKind;

/// Errors that can occur while fitting or applying a model.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Input shapes do not agree.
    #[error("dimension mismatch in {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected size.
        expected: usize,
        /// Actual size.
        actual: usize,
        /// Which input was checked.
        context: String,
    },

    /// `predict` was called before a successful `fit`.
    #[error("model is not fitted")]
    NotFitted,

    /// Solver or factor extraction error.
    #[error("math error: {0}")]
    Math(#[from] MathError),
}

impl ModelError {
    /// Classify this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidConfig(_) | Self::NotFitted => ErrorKind::Configuration,
            Self::DimensionMismatch { .. } => ErrorKind::DimensionMismatch,
            Self::Math(err) => err.kind(),
        }
    }

    pub(crate) fn mismatch(expected: usize, actual: usize, context: &str) -> Self {
        Self::DimensionMismatch { expected, actual, context: context.to_string() }
    }
}
