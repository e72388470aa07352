//! Linear algebra operations for quantile regression and factor extraction.

use ndarray::{Array1, Array2};
use ndarray_linalg::{Eigh, UPLO};

use crate::MathError;

/// Eigenvalues at or below this fraction of the largest count as zero.
pub(crate) const RANK_TOLERANCE: f64 = 1e-12;

/// Eigen decomposition of a symmetric matrix.
///
/// Eigenvalues are returned in descending order; column `j` of the
/// eigenvector matrix belongs to eigenvalue `j`. Each eigenvector is signed
/// so that its largest-magnitude component is positive, which makes the
/// decomposition reproducible across calls.
///
/// # Errors
/// Returns error if the matrix is empty, not square, contains non-finite
/// values, or LAPACK fails.
pub fn symmetric_eigen(a: &Array2<f64>) -> Result<(Array1<f64>, Array2<f64>), MathError> {
    let n = a.nrows();
    if a.ncols() != n {
        return Err(MathError::LinearAlgebra("matrix must be square".to_string()));
    }
    if n == 0 {
        return Err(MathError::EmptyData);
    }
    if a.iter().any(|v| !v.is_finite()) {
        return Err(MathError::NumericalInstability("non-finite matrix entry".to_string()));
    }

    let (values, vectors) =
        a.eigh(UPLO::Lower).map_err(|e| MathError::LinearAlgebra(e.to_string()))?;

    // LAPACK orders eigenvalues ascending
    let eigenvalues: Array1<f64> = values.iter().rev().copied().collect();
    let mut eigenvectors = Array2::zeros((n, n));
    for (dst, src) in (0..n).rev().enumerate() {
        let mut column = vectors.column(src).to_owned();
        let pivot =
            column.iter().fold(0.0_f64, |best, &x| if x.abs() > best.abs() { x } else { best });
        if pivot < 0.0 {
            column.mapv_inplace(|x| -x);
        }
        eigenvectors.column_mut(dst).assign(&column);
    }

    Ok((eigenvalues, eigenvectors))
}

/// Count of descending eigenvalues above `RANK_TOLERANCE` times the largest.
pub(crate) fn numerical_rank(eigenvalues: &[f64]) -> usize {
    let Some(&largest) = eigenvalues.first() else {
        return 0;
    };
    let threshold = RANK_TOLERANCE * largest;
    eigenvalues.iter().take_while(|&&l| l > threshold && l > 0.0).count()
}

/// Numerical column rank of a design matrix, from the spectrum of `X'X`.
///
/// # Errors
/// Returns error if `x` has no columns or the eigen solver fails.
pub fn column_rank(x: &Array2<f64>) -> Result<usize, MathError> {
    let (eigenvalues, _) = symmetric_eigen(&x.t().dot(x))?;
    Ok(numerical_rank(&eigenvalues.to_vec()))
}
