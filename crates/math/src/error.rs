//! Error types for mathematical operations.

use qra_traits::ErrorKind;

/// Errors that can occur during mathematical operations.
#[derive(Debug, thiserror::Error)]
pub enum MathError {
    /// Invalid quantile level.
    #[error("invalid quantile: {0} (must be in (0, 1))")]
    InvalidQuantile(f64),

    /// Invalid parameter.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Dimension mismatch.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Actual dimension.
        actual: usize,
    },

    /// Empty data.
    #[error("empty data provided")]
    EmptyData,

    /// Fewer observations than unknowns.
    #[error("insufficient data: need at least {required} observations, got {actual}")]
    InsufficientData {
        /// Required number of observations.
        required: usize,
        /// Actual number of observations.
        actual: usize,
    },

    /// Linear algebra error.
    #[error("linear algebra error: {0}")]
    LinearAlgebra(String),

    /// Requested more factors than the data supports.
    #[error("rank deficient data: numerical rank {rank} < requested factors {requested}")]
    RankDeficient {
        /// Numerical rank of the data.
        rank: usize,
        /// Number of factors requested.
        requested: usize,
    },

    /// A row has zero spread across columns and cannot be standardized.
    #[error("row {row} has zero standard deviation")]
    DegenerateRow {
        /// Offending row.
        row: usize,
    },

    /// The quantile regression solver failed.
    #[error("quantile regression solver failed: {0}")]
    Solver(String),

    /// No factor count is available to choose from.
    #[error("no candidate factor counts to select from")]
    EmptyCandidateSet,

    /// Numerical instability (NaN or Inf).
    #[error("numerical instability: {0}")]
    NumericalInstability(String),
}

impl MathError {
    /// Category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidQuantile(_)
            | Self::InvalidParameter(_)
            | Self::EmptyData
            | Self::EmptyCandidateSet => ErrorKind::Configuration,
            Self::DimensionMismatch { .. } => ErrorKind::DimensionMismatch,
            Self::InsufficientData { .. }
            | Self::LinearAlgebra(_)
            | Self::RankDeficient { .. }
            | Self::DegenerateRow { .. }
            | Self::Solver(_)
            | Self::NumericalInstability(_) => ErrorKind::Numerical,
        }
    }
}
