//! Quantile level definitions.

use derive_more::{Display, Into};
use serde::{Deserialize, Serialize};

use crate::PrimitiveError;

/// A single quantile level in `(0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, Into, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Quantile(f64);

impl Quantile {
    /// The median.
    pub const MEDIAN: Self = Self(0.5);

    /// Create a new quantile level.
    ///
    /// # Errors
    /// Returns `PrimitiveError::InvalidQuantile` unless `tau` is finite and in `(0, 1)`.
    pub fn new(tau: f64) -> Result<Self, PrimitiveError> {
        if !tau.is_finite() || tau <= 0.0 || tau >= 1.0 {
            return Err(PrimitiveError::InvalidQuantile(tau));
        }
        Ok(Self(tau))
    }

    /// Get the level as a float.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl Default for Quantile {
    fn default() -> Self {
        Self::MEDIAN
    }
}

impl TryFrom<f64> for Quantile {
    type Error = PrimitiveError;

    fn try_from(tau: f64) -> Result<Self, Self::Error> {
        Self::new(tau)
    }
}

/// An ordered, non-empty set of quantile levels.
///
/// Levels are strictly increasing, so column `j` of a prediction matrix
/// always belongs to the `j`-th smallest level.
#[derive(Debug, Clone, PartialEq, Into, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct Quantiles(Vec<f64>);

impl Quantiles {
    /// Create a validated set of quantile levels.
    ///
    /// # Errors
    /// Returns an error if `levels` is empty, contains a value outside
    /// `(0, 1)`, or is not strictly increasing.
    pub fn new(levels: Vec<f64>) -> Result<Self, PrimitiveError> {
        if levels.is_empty() {
            return Err(PrimitiveError::EmptyQuantiles);
        }
        for &tau in &levels {
            Quantile::new(tau)?;
        }
        if let Some(pair) = levels.windows(2).find(|w| w[1] <= w[0]) {
            return Err(PrimitiveError::UnorderedQuantiles { previous: pair[0], next: pair[1] });
        }
        Ok(Self(levels))
    }

    /// A single quantile level.
    #[must_use]
    pub fn single(tau: Quantile) -> Self {
        Self(vec![tau.value()])
    }

    /// Levels as a slice.
    #[must_use]
    pub fn levels(&self) -> &[f64] {
        &self.0
    }

    /// Number of levels.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no levels; never true for a validated set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the levels.
    pub fn iter(&self) -> impl Iterator<Item = Quantile> + '_ {
        self.0.iter().map(|&tau| Quantile(tau))
    }
}

impl Default for Quantiles {
    fn default() -> Self {
        Self::single(Quantile::MEDIAN)
    }
}

impl TryFrom<Vec<f64>> for Quantiles {
    type Error = PrimitiveError;

    fn try_from(levels: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(levels)
    }
}
