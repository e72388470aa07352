//! Error types for primitive construction.

/// Errors that can occur while building primitive types.
#[derive(Debug, thiserror::Error)]
pub enum PrimitiveError {
    /// Quantile level outside the open unit interval.
    #[error("invalid quantile: {0} (must be in (0, 1))")]
    InvalidQuantile(f64),

    /// No quantile levels were supplied.
    #[error("at least one quantile level is required")]
    EmptyQuantiles,

    /// Quantile levels are not strictly increasing.
    #[error("quantile levels must be strictly increasing: {previous} followed by {next}")]
    UnorderedQuantiles {
        /// Preceding level.
        previous: f64,
        /// Offending level.
        next: f64,
    },

    /// Value matrix does not have the expected shape.
    #[error("shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        /// Expected (rows, columns).
        expected: (usize, usize),
        /// Actual (rows, columns).
        actual: (usize, usize),
    },

    /// Number of labels does not agree with the data.
    #[error("{axis} labels: expected {expected}, got {actual}")]
    LabelMismatch {
        /// Which axis ("column" or "index").
        axis: &'static str,
        /// Expected label count.
        expected: usize,
        /// Actual label count.
        actual: usize,
    },

    /// Polars error.
    #[error("polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = PrimitiveError::InvalidQuantile(1.5);
        assert!(err.to_string().contains("1.5"));

        let err = PrimitiveError::ShapeMismatch { expected: (3, 2), actual: (2, 2) };
        assert_eq!(err.to_string(), "shape mismatch: expected (3, 2), got (2, 2)");
    }
}
