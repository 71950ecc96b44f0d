use ndarray::{Array, Array2, ArrayD, Dimension};
use num_traits::ToPrimitive;
use serde::{Serialize, Serializer, ser::SerializeSeq};
use serde_json::Value;

use crate::{ArrayElement, Tensor, error::ValidationError};

/// Activation data as handed over by the caller.
///
/// Every representation is normalized into an [`ActivationGrid`] before any
/// cross-field validation runs.
#[derive(Debug, Clone)]
pub enum FeatureActivations {
    /// An `ndarray` array of any dimensionality.
    Native(ArrayD<f64>),
    /// A raw tensor buffer.
    Tensor(Tensor),
    /// Rows of values, one row per token.
    Nested(Vec<Vec<f64>>),
    /// Untyped input, e.g. read from a JSON file.
    Json(Value),
}

impl<T: ArrayElement, D: Dimension> From<Array<T, D>> for FeatureActivations {
    fn from(array: Array<T, D>) -> Self {
        let array = array
            .into_dyn()
            .mapv(|value| value.to_f64().unwrap_or(f64::NAN));
        FeatureActivations::Native(array)
    }
}

impl From<Tensor> for FeatureActivations {
    fn from(tensor: Tensor) -> Self {
        FeatureActivations::Tensor(tensor)
    }
}

impl<T: ArrayElement> From<Vec<Vec<T>>> for FeatureActivations {
    fn from(rows: Vec<Vec<T>>) -> Self {
        let rows = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|value| value.to_f64().unwrap_or(f64::NAN))
                    .collect()
            })
            .collect();
        FeatureActivations::Nested(rows)
    }
}

impl From<Value> for FeatureActivations {
    fn from(value: Value) -> Self {
        FeatureActivations::Json(value)
    }
}

impl FeatureActivations {
    pub fn normalize(self) -> Result<ActivationGrid, ValidationError> {
        let grid = match self {
            FeatureActivations::Native(array) => {
                let shape = require_two_dimensions(array.shape())?;
                // `iter` walks logical order regardless of memory layout.
                ActivationGrid::from_parts(
                    shape,
                    array.iter().copied().collect(),
                )?
            },
            FeatureActivations::Tensor(tensor) => {
                let shape = require_two_dimensions(tensor.shape())?;
                ActivationGrid::from_parts(shape, tensor.to_f64_vec())?
            },
            FeatureActivations::Nested(rows) => {
                if rows.is_empty() {
                    return Err(ValidationError::ActivationsNotNested);
                }
                ActivationGrid::from_rows(rows.iter().map(Vec::as_slice))?
            },
            FeatureActivations::Json(value) => grid_from_json(&value)?,
        };
        log::debug!(
            "normalized feature activations to shape [{}, {}]",
            grid.rows(),
            grid.cols()
        );
        Ok(grid)
    }
}

fn require_two_dimensions(shape: &[usize]) -> Result<[usize; 2], ValidationError> {
    match shape {
        &[rows, cols] => Ok([rows, cols]),
        _ => Err(ValidationError::NotTwoDimensional {
            shape: shape.to_vec(),
        }),
    }
}

fn grid_from_json(value: &Value) -> Result<ActivationGrid, ValidationError> {
    let Value::Array(rows) = value else {
        return Err(ValidationError::UnsupportedActivations);
    };
    match rows.first() {
        Some(Value::Array(_)) => {},
        _ => return Err(ValidationError::ActivationsNotNested),
    }

    let rows = rows
        .iter()
        .enumerate()
        .map(|(row_index, row)| {
            let Value::Array(cells) = row else {
                return Err(ValidationError::ActivationsNotNested);
            };
            cells
                .iter()
                .enumerate()
                .map(|(column, cell)| {
                    cell.as_f64().ok_or(ValidationError::NonNumericActivation {
                        row: row_index,
                        column,
                    })
                })
                .collect::<Result<Vec<f64>, _>>()
        })
        .collect::<Result<Vec<_>, _>>()?;

    ActivationGrid::from_rows(rows.iter().map(Vec::as_slice))
}

/// Canonical `[num_tokens, num_features]` grid, stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivationGrid {
    shape: [usize; 2],
    values: Vec<f64>,
}

impl ActivationGrid {
    fn from_parts(
        shape: [usize; 2],
        values: Vec<f64>,
    ) -> Result<Self, ValidationError> {
        let expected = shape[0].checked_mul(shape[1]);
        if expected != Some(values.len()) {
            return Err(ValidationError::GridSizeMismatch {
                shape,
                expected: expected.unwrap_or(usize::MAX),
                actual: values.len(),
            });
        }
        Ok(Self {
            shape,
            values,
        })
    }

    /// Builds a grid from rows, taking the column count from the first row.
    pub fn from_rows<'a>(
        rows: impl IntoIterator<Item = &'a [f64]>
    ) -> Result<Self, ValidationError> {
        let mut values = Vec::new();
        let mut num_rows = 0;
        let mut num_cols = 0;
        for (index, row) in rows.into_iter().enumerate() {
            if index == 0 {
                num_cols = row.len();
            } else if row.len() != num_cols {
                return Err(ValidationError::RaggedRows {
                    row: index,
                    expected: num_cols,
                    actual: row.len(),
                });
            }
            values.extend_from_slice(row);
            num_rows += 1;
        }
        Self::from_parts([num_rows, num_cols], values)
    }

    pub fn shape(&self) -> [usize; 2] {
        self.shape
    }

    pub fn rows(&self) -> usize {
        self.shape[0]
    }

    pub fn cols(&self) -> usize {
        self.shape[1]
    }

    pub fn get(
        &self,
        row: usize,
        col: usize,
    ) -> Option<f64> {
        if row >= self.rows() || col >= self.cols() {
            return None;
        }
        Some(self.values[row * self.cols() + col])
    }

    pub fn row(
        &self,
        row: usize,
    ) -> Option<&[f64]> {
        if row >= self.rows() {
            return None;
        }
        let start = row * self.cols();
        Some(&self.values[start..start + self.cols()])
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        (0..self.rows()).map(move |row| {
            let start = row * self.cols();
            &self.values[start..start + self.cols()]
        })
    }

    pub fn column(
        &self,
        col: usize,
    ) -> impl Iterator<Item = f64> + '_ {
        self.iter_rows().filter_map(move |row| row.get(col).copied())
    }

    pub fn to_nested(&self) -> Vec<Vec<f64>> {
        self.iter_rows().map(<[f64]>::to_vec).collect()
    }

    pub fn to_ndarray(&self) -> Array2<f64> {
        let cols = self.cols();
        Array2::from_shape_fn((self.rows(), cols), |(row, col)| {
            self.values[row * cols + col]
        })
    }
}

impl Serialize for ActivationGrid {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut sequence = serializer.serialize_seq(Some(self.rows()))?;
        for row in self.iter_rows() {
            sequence.serialize_element(row)?;
        }
        sequence.end()
    }
}
