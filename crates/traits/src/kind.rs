//! Error classification.

/// Broad category of a failure.
///
/// Every error type in the workspace maps onto one of these through a
/// `kind()` method, so callers can branch on the category without matching
/// each crate's variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Invalid hyperparameters or inputs rejected before computation.
    Configuration,
    /// Shapes of the inputs do not agree.
    DimensionMismatch,
    /// Singular matrices, zero variance, non-convergence.
    Numerical,
    /// Operation not provided by this implementation.
    NotImplemented,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configuration => write!(f, "configuration"),
            Self::DimensionMismatch => write!(f, "dimension mismatch"),
            Self::Numerical => write!(f, "numerical"),
            Self::NotImplemented => write!(f, "not implemented"),
        }
    }
}
