//! Factor extraction and factor-count selection.
//!
//! Factors are the leading eigenvectors of the second-moment matrix
//! `X'X / n`. The data is not centred, so the projection `X V_k` keeps the
//! level of the forecasts, which the downstream regression needs when it
//! is fitted without an intercept.

use std::f64::consts::PI;

use ndarray::{Array1, Array2, s};
use tracing::debug;

use crate::{MathError, linalg::numerical_rank, symmetric_eigen};

/// Orthonormal factor loadings learned from a forecast matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct FactorBasis {
    /// Loadings (n_features x n_factors); column j is the j-th factor.
    loadings: Array2<f64>,
    /// Second-moment eigenvalues of the kept factors, descending.
    eigenvalues: Array1<f64>,
    /// Sum of all eigenvalues of the training data.
    total_variance: f64,
}

impl FactorBasis {
    /// Number of factors.
    #[must_use]
    pub fn n_factors(&self) -> usize {
        self.loadings.ncols()
    }

    /// Number of input columns the basis was learned from.
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.loadings.nrows()
    }

    /// Factor loadings (n_features x n_factors).
    #[must_use]
    pub const fn loadings(&self) -> &Array2<f64> {
        &self.loadings
    }

    /// Eigenvalues of the kept factors.
    #[must_use]
    pub const fn eigenvalues(&self) -> &Array1<f64> {
        &self.eigenvalues
    }

    /// Share of the training second moment captured by the kept factors.
    #[must_use]
    pub fn explained_ratio(&self) -> f64 {
        if self.total_variance > 0.0 { self.eigenvalues.sum() / self.total_variance } else { 0.0 }
    }

    /// Project a matrix onto the factors.
    ///
    /// # Returns
    /// Factor matrix (n_obs x n_factors).
    ///
    /// # Errors
    /// Returns `MathError::DimensionMismatch` if `x` does not have the
    /// number of columns the basis was learned from.
    pub fn project(&self, x: &Array2<f64>) -> Result<Array2<f64>, MathError> {
        if x.ncols() != self.n_features() {
            return Err(MathError::DimensionMismatch {
                expected: self.n_features(),
                actual: x.ncols(),
            });
        }
        Ok(x.dot(&self.loadings))
    }
}

/// Outcome of automatic factor-count selection.
#[derive(Debug, Clone, PartialEq)]
pub struct FactorSelection {
    /// Basis with the selected number of factors.
    pub basis: FactorBasis,
    /// BIC for k = 1, 2, ..., min(n_obs, n_features); `+inf` marks counts
    /// beyond the numerical rank.
    pub bic: Vec<f64>,
}

impl FactorSelection {
    /// Selected number of factors.
    #[must_use]
    pub fn n_factors(&self) -> usize {
        self.basis.n_factors()
    }
}

struct Spectrum {
    eigenvalues: Array1<f64>,
    eigenvectors: Array2<f64>,
}

impl Spectrum {
    fn of(x: &Array2<f64>) -> Result<Self, MathError> {
        let (n, p) = x.dim();
        if n == 0 || p == 0 {
            return Err(MathError::EmptyData);
        }
        if x.iter().any(|v| !v.is_finite()) {
            return Err(MathError::NumericalInstability("non-finite forecast".to_string()));
        }

        let second_moment = x.t().dot(x) / n as f64;
        let (eigenvalues, eigenvectors) = symmetric_eigen(&second_moment)?;
        // Rounding can leave tiny negative values on a PSD matrix.
        Ok(Self { eigenvalues: eigenvalues.mapv(|l| l.max(0.0)), eigenvectors })
    }

    fn rank(&self) -> usize {
        numerical_rank(&self.eigenvalues.to_vec())
    }

    fn basis(&self, k: usize) -> FactorBasis {
        FactorBasis {
            loadings: self.eigenvectors.slice(s![.., ..k]).to_owned(),
            eigenvalues: self.eigenvalues.slice(s![..k]).to_owned(),
            total_variance: self.eigenvalues.sum(),
        }
    }
}

/// Extract a fixed number of factors.
///
/// # Arguments
/// * `x` - Forecast matrix (n_obs x n_features)
/// * `n_factors` - Number of factors, between 1 and min(n_obs, n_features)
///
/// # Errors
/// Returns `MathError::InvalidParameter` for an out-of-range factor count
/// and `MathError::RankDeficient` if the data has fewer than `n_factors`
/// non-degenerate directions.
pub fn extract_factors(x: &Array2<f64>, n_factors: usize) -> Result<FactorBasis, MathError> {
    let max_factors = x.nrows().min(x.ncols());
    if n_factors == 0 || n_factors > max_factors {
        return Err(MathError::InvalidParameter(format!(
            "n_factors must be in [1, {max_factors}], got {n_factors}"
        )));
    }

    let spectrum = Spectrum::of(x)?;
    let rank = spectrum.rank();
    if rank < n_factors {
        return Err(MathError::RankDeficient { rank, requested: n_factors });
    }

    Ok(spectrum.basis(n_factors))
}

/// Select the number of factors that minimises BIC.
///
/// Candidates are k = 1..=min(n_obs, n_features). Each k is scored with the
/// probabilistic PCA likelihood on the non-zero part of the spectrum (see
/// [`factor_bic`]); ties go to the smaller k.
///
/// # Errors
/// Returns `MathError::EmptyCandidateSet` for an empty matrix and
/// `MathError::RankDeficient` if the matrix is identically zero.
pub fn select_n_factors(x: &Array2<f64>) -> Result<FactorSelection, MathError> {
    let (n, p) = x.dim();
    let max_factors = n.min(p);
    if max_factors == 0 {
        return Err(MathError::EmptyCandidateSet);
    }

    let spectrum = Spectrum::of(x)?;
    if spectrum.rank() == 0 {
        return Err(MathError::RankDeficient { rank: 0, requested: 1 });
    }

    let eigenvalues = spectrum.eigenvalues.to_vec();
    let bic: Vec<f64> = (1..=max_factors).map(|k| factor_bic(&eigenvalues, n, k)).collect();

    let mut best = 0;
    for (i, score) in bic.iter().enumerate() {
        if *score < bic[best] {
            best = i;
        }
    }
    let n_factors = best + 1;
    debug!(n_factors, candidates = max_factors, "selected factor count by BIC");

    Ok(FactorSelection { basis: spectrum.basis(n_factors), bic })
}

/// BIC of a k-factor probabilistic PCA model.
///
/// Only the numerically non-zero eigenvalues `l_1 >= ... >= l_r` enter the
/// likelihood, so directions the data never moves in (such as the row-sum
/// direction of cross-sectionally standardized forecasts) do not count as
/// perfectly explained. With noise variance `s2 = mean(l_{k+1}, ..., l_r)`,
/// the maximised log-likelihood is
///
/// ```text
/// -2 ln L = n * (r ln(2 pi) + sum_{j<=k} ln l_j + (r - k) ln s2 + r)
/// ```
///
/// and the model has `r k - k (k - 1) / 2` loading parameters plus one for
/// `s2` when `k < r`. BIC = -2 ln L + params * ln n. At `k = r` the model
/// is the full covariance and its score equals that of `k = r - 1`.
///
/// `eigenvalues` must be sorted in descending order. Returns `+inf` when k
/// exceeds the numerical rank r.
#[must_use]
pub fn factor_bic(eigenvalues: &[f64], n_obs: usize, k: usize) -> f64 {
    let r = numerical_rank(eigenvalues);
    if k == 0 || k > r || n_obs == 0 {
        return f64::INFINITY;
    }

    let n = n_obs as f64;
    let r_f = r as f64;
    let k_f = k as f64;

    let mut log_det: f64 = eigenvalues[..k].iter().map(|l| l.ln()).sum();
    let mut params = r_f * k_f - k_f * (k_f - 1.0) / 2.0;
    if k < r {
        let noise = eigenvalues[k..r].iter().sum::<f64>() / (r - k) as f64;
        log_det += (r - k) as f64 * noise.ln();
        params += 1.0;
    }

    n * (r_f * (2.0 * PI).ln() + log_det + r_f) + params * n.ln()
}
