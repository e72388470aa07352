//! Labelled tabular data.

use ndarray::{Array1, Array2, ArrayView1, Axis};
use polars::prelude::*;

use crate::PrimitiveError;

/// Numeric table with optional column labels and row index.
///
/// Scalers compute on the raw [`Array2`] and hand the result back through
/// [`Table::relabeled`], so a labelled input always produces a labelled
/// output with identical labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Option<Vec<String>>,
    index: Option<Vec<String>>,
    values: Array2<f64>,
}

impl Table {
    /// Create an unlabelled table.
    #[must_use]
    pub const fn from_array(values: Array2<f64>) -> Self {
        Self { columns: None, index: None, values }
    }

    /// Create an unlabelled single-column table from a vector.
    #[must_use]
    pub fn from_vector(values: Array1<f64>) -> Self {
        Self::from_array(values.insert_axis(Axis(1)))
    }

    /// Create a labelled table.
    ///
    /// # Errors
    /// Returns `PrimitiveError::LabelMismatch` if the label counts do not
    /// agree with the shape of `values`.
    pub fn new(
        columns: Vec<String>,
        index: Option<Vec<String>>,
        values: Array2<f64>,
    ) -> Result<Self, PrimitiveError> {
        check_labels("column", columns.len(), values.ncols())?;
        if let Some(index) = &index {
            check_labels("index", index.len(), values.nrows())?;
        }
        Ok(Self { columns: Some(columns), index, values })
    }

    /// Attach a row index.
    ///
    /// # Errors
    /// Returns `PrimitiveError::LabelMismatch` if `index` has the wrong length.
    pub fn with_index(mut self, index: Vec<String>) -> Result<Self, PrimitiveError> {
        check_labels("index", index.len(), self.values.nrows())?;
        self.index = Some(index);
        Ok(self)
    }

    /// Column labels, if any.
    #[must_use]
    pub fn columns(&self) -> Option<&[String]> {
        self.columns.as_deref()
    }

    /// Row index, if any.
    #[must_use]
    pub fn index(&self) -> Option<&[String]> {
        self.index.as_deref()
    }

    /// Raw values.
    #[must_use]
    pub const fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Consume the table, returning the raw values.
    #[must_use]
    pub fn into_values(self) -> Array2<f64> {
        self.values
    }

    /// Number of rows.
    #[must_use]
    pub fn nrows(&self) -> usize {
        self.values.nrows()
    }

    /// Number of columns.
    #[must_use]
    pub fn ncols(&self) -> usize {
        self.values.ncols()
    }

    /// Whether the table carries column labels or an index.
    #[must_use]
    pub const fn is_labeled(&self) -> bool {
        self.columns.is_some() || self.index.is_some()
    }

    /// Get a column by label.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<ArrayView1<'_, f64>> {
        let position = self.columns.as_ref()?.iter().position(|c| c == name)?;
        Some(self.values.column(position))
    }

    /// Build a fresh table over `values` with this table's labels.
    ///
    /// # Errors
    /// Returns `PrimitiveError::ShapeMismatch` if `values` is not the same
    /// shape as this table.
    pub fn relabeled(&self, values: Array2<f64>) -> Result<Self, PrimitiveError> {
        if values.dim() != self.values.dim() {
            return Err(PrimitiveError::ShapeMismatch {
                expected: self.values.dim(),
                actual: values.dim(),
            });
        }
        Ok(Self { columns: self.columns.clone(), index: self.index.clone(), values })
    }

    /// Convert a polars frame into a table.
    ///
    /// Every column other than `index_column` is cast to `f64`; nulls become
    /// NaN. The index column, when given, is cast to strings.
    ///
    /// # Errors
    /// Returns `PrimitiveError::Polars` if a column is missing or cannot be cast.
    pub fn from_frame(df: &DataFrame, index_column: Option<&str>) -> Result<Self, PrimitiveError> {
        let index = match index_column {
            Some(name) => {
                let column = df.column(name)?.cast(&DataType::String)?;
                let labels = column.str()?;
                Some(labels.into_iter().map(|v| v.unwrap_or_default().to_string()).collect())
            }
            None => None,
        };

        let mut names = Vec::new();
        let mut data: Vec<Vec<f64>> = Vec::new();
        for name in df.get_column_names() {
            if Some(name.as_str()) == index_column {
                continue;
            }
            let column = df.column(name.as_str())?.cast(&DataType::Float64)?;
            data.push(column.f64()?.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect());
            names.push(name.to_string());
        }

        let values = Array2::from_shape_fn((df.height(), data.len()), |(i, j)| data[j][i]);
        Ok(Self { columns: Some(names), index, values })
    }

    /// Convert the table into a polars frame.
    ///
    /// Unlabelled columns are named by position. The index, if present,
    /// becomes a leading string column called `index_name`.
    ///
    /// # Errors
    /// Returns `PrimitiveError::Polars` if the frame cannot be built.
    pub fn to_frame(&self, index_name: &str) -> Result<DataFrame, PrimitiveError> {
        let mut out = Vec::with_capacity(self.ncols() + 1);
        if let Some(index) = &self.index {
            out.push(Column::new(index_name.into(), index.clone()));
        }
        for (j, values) in self.values.axis_iter(Axis(1)).enumerate() {
            let name = self.columns.as_ref().map_or_else(|| j.to_string(), |c| c[j].clone());
            out.push(Column::new(name.as_str().into(), values.to_vec()));
        }
        Ok(DataFrame::new(out)?)
    }
}

const fn check_labels(
    axis: &'static str,
    actual: usize,
    expected: usize,
) -> Result<(), PrimitiveError> {
    if actual != expected {
        return Err(PrimitiveError::LabelMismatch { axis, expected, actual });
    }
    Ok(())
}
