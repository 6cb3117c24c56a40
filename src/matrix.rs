//! Dense square matrices holding pairwise travel distances or durations.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::problem::Measure;

/// A dense n×n matrix stored in row-major order.
///
/// Cloning a matrix deep-copies its storage, so two profiles never share
/// backing data even when one was built from the other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMatrix")]
pub struct Matrix {
    data: Vec<Measure>,
    size: usize,
}

/// Serialised form of a [`Matrix`], checked before use.
#[derive(Deserialize)]
struct RawMatrix {
    data: Vec<Measure>,
    size: usize,
}

/// Returned when a deserialised matrix holds the wrong number of entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixLengthError {
    pub size: usize,
    pub len: usize,
}

impl fmt::Display for MatrixLengthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "matrix of size {} needs {} entries, found {}",
            self.size,
            self.size.saturating_mul(self.size),
            self.len
        )
    }
}

impl std::error::Error for MatrixLengthError {}

impl TryFrom<RawMatrix> for Matrix {
    type Error = MatrixLengthError;

    fn try_from(raw: RawMatrix) -> Result<Self, Self::Error> {
        if raw.size.checked_mul(raw.size) != Some(raw.data.len()) {
            return Err(MatrixLengthError {
                size: raw.size,
                len: raw.data.len(),
            });
        }

        Ok(Matrix {
            data: raw.data,
            size: raw.size,
        })
    }
}

/// Returned by [`Matrix::from_rows`] when the rows do not form a square.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotSquareError {
    pub row: usize,
    pub expected: usize,
    pub found: usize,
}

impl fmt::Display for NotSquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "row {} has {} entries, expected {}",
            self.row, self.found, self.expected
        )
    }
}

impl std::error::Error for NotSquareError {}

impl Matrix {
    /// Create a `size`×`size` matrix with every entry set to `fill`.
    pub fn new(size: usize, fill: Measure) -> Self {
        Matrix {
            data: vec![fill; size * size],
            size,
        }
    }

    /// Create a matrix from explicit rows.
    pub fn from_rows(rows: Vec<Vec<Measure>>) -> Result<Self, NotSquareError> {
        let size = rows.len();
        let mut data = Vec::with_capacity(size * size);

        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != size {
                return Err(NotSquareError {
                    row,
                    expected: size,
                    found: values.len(),
                });
            }
            data.extend(values);
        }

        Ok(Matrix { data, size })
    }

    /// Number of rows (and columns).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Value at (`from`, `to`).
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> Measure {
        self.data[from * self.size + to]
    }

    /// Set the value at (`from`, `to`).
    pub fn set(&mut self, from: usize, to: usize, value: Measure) {
        self.data[from * self.size + to] = value;
    }

    /// A row as a slice.
    pub fn row(&self, idx: usize) -> &[Measure] {
        &self.data[idx * self.size..(idx + 1) * self.size]
    }

    /// Rows as owned vectors, mostly useful for printing and tests.
    pub fn to_rows(&self) -> Vec<Vec<Measure>> {
        self.data.chunks(self.size.max(1)).map(<[Measure]>::to_vec).collect()
    }

    /// Return a new `new_size` matrix with `self` copied into its top-left
    /// block and every other entry set to `fill`.
    ///
    /// If `new_size` is smaller than the current size the matrix is
    /// truncated to its top-left block instead.
    pub fn expanded(&self, new_size: usize, fill: Measure) -> Matrix {
        let mut result = Matrix::new(new_size, fill);
        let keep = self.size.min(new_size);

        for i in 0..keep {
            let src = &self.data[i * self.size..i * self.size + keep];
            result.data[i * new_size..i * new_size + keep].copy_from_slice(src);
        }

        result
    }

    /// Overwrite every diagonal entry with `value`.
    pub fn fill_diagonal(&mut self, value: Measure) {
        for i in 0..self.size {
            self.set(i, i, value);
        }
    }

    /// Overwrite the full row and column of `idx` with `value`.
    pub fn forbid(&mut self, idx: usize, value: Measure) {
        for other in 0..self.size {
            self.set(idx, other, value);
            self.set(other, idx, value);
        }
    }

    /// Copy row `reference` into the rows `from..size` and column
    /// `reference` into the columns `from..size`, restricted to the first
    /// `from` entries of each. Entries among the new indices are untouched.
    pub fn copy_reference_row_col(&mut self, reference: usize, from: usize) {
        for new_idx in from..self.size {
            for other in 0..from {
                let out = self.get(reference, other);
                let inc = self.get(other, reference);
                self.set(new_idx, other, out);
                self.set(other, new_idx, inc);
            }
        }
    }

    /// Whether every diagonal entry is zero.
    pub fn has_zero_diagonal(&self) -> bool {
        (0..self.size).all(|i| self.get(i, i) == 0)
    }
}
