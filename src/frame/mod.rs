//! Row-major numeric frames with a fixed column schema.
//!
//! A [`Frame`] is a two-dimensional `f64` table stored as a single row-major
//! buffer. Every frame carries its column count; appending and concatenation
//! enforce that all participating frames share the same [`Schema`].

use serde::{Deserialize, Serialize};

use crate::{ParframeError, Result};

/// Fixed column schema shared by every frame in a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    columns: usize,
}

impl Schema {
    /// Create a schema with the given column count
    pub fn with_columns(columns: usize) -> Self {
        Self { columns }
    }

    /// Number of columns in this schema
    pub fn width(&self) -> usize {
        self.columns
    }
}

/// Two-dimensional numeric table stored row-major.
///
/// Invariant: the buffer length is always a multiple of the column count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    columns: usize,
    data: Vec<f64>,
}

impl Frame {
    /// Create an empty frame with the given schema
    pub fn empty(schema: Schema) -> Self {
        Self {
            columns: schema.width(),
            data: Vec::new(),
        }
    }

    /// Build a frame from a non-empty list of equal-length rows
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let first = rows.first().ok_or_else(|| {
            ParframeError::InvalidFrame(
                "cannot infer a schema from zero rows; use Frame::empty".to_string(),
            )
        })?;

        let columns = first.len();
        if columns == 0 {
            return Err(ParframeError::InvalidFrame(
                "rows must have at least one column".to_string(),
            ));
        }

        let mut data = Vec::with_capacity(rows.len() * columns);
        for row in &rows {
            if row.len() != columns {
                return Err(ParframeError::SchemaMismatch {
                    expected: columns,
                    found: row.len(),
                });
            }
            data.extend_from_slice(row);
        }

        Ok(Self { columns, data })
    }

    /// Build a frame from a row-major buffer
    pub fn from_row_major(columns: usize, data: Vec<f64>) -> Result<Self> {
        if columns == 0 {
            return Err(ParframeError::InvalidFrame(
                "column count must be at least 1".to_string(),
            ));
        }
        if data.len() % columns != 0 {
            return Err(ParframeError::InvalidFrame(format!(
                "buffer of {} values is not a whole number of {}-column rows",
                data.len(),
                columns
            )));
        }

        Ok(Self { columns, data })
    }

    /// Schema of this frame
    pub fn schema(&self) -> Schema {
        Schema::with_columns(self.columns)
    }

    /// Number of columns
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.data.len() / self.columns
    }

    /// Shape as `(rows, columns)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows(), self.columns)
    }

    /// Whether the frame contains no rows
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// A single row as a slice, if in bounds
    pub fn row(&self, index: usize) -> Option<&[f64]> {
        let start = index.checked_mul(self.columns)?;
        self.data.get(start..start + self.columns)
    }

    /// A single cell, if in bounds
    pub fn get(&self, row: usize, column: usize) -> Option<f64> {
        if column >= self.columns {
            return None;
        }
        self.data.get(row * self.columns + column).copied()
    }

    /// Iterate over rows as slices
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks_exact(self.columns)
    }

    /// The underlying row-major buffer
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Append a single row, enforcing the schema
    pub fn push_row(&mut self, row: &[f64]) -> Result<()> {
        if row.len() != self.columns {
            return Err(ParframeError::SchemaMismatch {
                expected: self.columns,
                found: row.len(),
            });
        }
        self.data.extend_from_slice(row);
        Ok(())
    }

    /// Append all rows of another frame, enforcing the schema
    pub fn append(&mut self, other: &Frame) -> Result<()> {
        if other.columns != self.columns {
            return Err(ParframeError::SchemaMismatch {
                expected: self.columns,
                found: other.columns,
            });
        }
        self.data.extend_from_slice(&other.data);
        Ok(())
    }

    /// Concatenate frames in order under a declared schema.
    ///
    /// An empty slice yields an empty frame with the declared schema.
    pub fn concat(schema: Schema, frames: &[Frame]) -> Result<Frame> {
        let mut combined = Frame::empty(schema);
        for frame in frames {
            combined.append(frame)?;
        }
        Ok(combined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_shape() {
        let frame = Frame::from_rows(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();

        assert_eq!(frame.shape(), (2, 3));
        assert_eq!(frame.row(1), Some(&[4.0, 5.0, 6.0][..]));
        assert_eq!(frame.get(0, 2), Some(3.0));
        assert_eq!(frame.get(0, 3), None);
    }

    #[test]
    fn test_from_rows_rejects_ragged_input() {
        let err = Frame::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();

        assert!(matches!(
            err,
            ParframeError::SchemaMismatch {
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn test_from_row_major_rejects_partial_rows() {
        assert!(Frame::from_row_major(3, vec![1.0, 2.0, 3.0, 4.0]).is_err());
        assert!(Frame::from_row_major(0, vec![]).is_err());
        assert!(Frame::from_row_major(2, vec![1.0, 2.0, 3.0, 4.0]).is_ok());
    }

    #[test]
    fn test_append_enforces_schema() {
        let mut frame = Frame::empty(Schema::with_columns(2));
        let wide = Frame::from_rows(vec![vec![1.0, 2.0, 3.0]]).unwrap();

        assert!(frame.append(&wide).is_err());
        assert!(frame.push_row(&[1.0, 2.0]).is_ok());
        assert_eq!(frame.rows(), 1);
    }

    #[test]
    fn test_concat_preserves_order_and_counts() {
        let a = Frame::from_rows(vec![vec![1.0, 1.0]]).unwrap();
        let b = Frame::from_rows(vec![vec![2.0, 2.0], vec![3.0, 3.0]]).unwrap();

        let combined = Frame::concat(Schema::with_columns(2), &[a, b]).unwrap();

        assert_eq!(combined.shape(), (3, 2));
        assert_eq!(combined.row(0), Some(&[1.0, 1.0][..]));
        assert_eq!(combined.row(2), Some(&[3.0, 3.0][..]));
    }

    #[test]
    fn test_concat_of_nothing_is_empty_with_schema() {
        let combined = Frame::concat(Schema::with_columns(5), &[]).unwrap();

        assert_eq!(combined.shape(), (0, 5));
        assert!(combined.is_empty());
    }
}
