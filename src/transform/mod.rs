//! Pure frame transformations.
//!
//! [`FrameTransform`] is the seam between the executors and user compute:
//! a transformation takes a frame by reference and produces a new frame.
//! Implementations must be pure functions of their input (no shared mutable
//! state, no I/O), because the parallel executor runs them in arbitrary
//! interleavings across workers.

use crate::frame::Frame;
use crate::{ParframeError, Result};

/// A pure transformation from one frame to another.
pub trait FrameTransform: Send + Sync {
    /// Apply the transformation to an input frame
    fn apply(&self, input: &Frame) -> Result<Frame>;

    /// Human-readable name used in logs
    fn name(&self) -> &str {
        "transform"
    }
}

/// Adapter turning a closure into a [`FrameTransform`].
pub struct FnTransform<F> {
    name: String,
    func: F,
}

impl<F> FnTransform<F>
where
    F: Fn(&Frame) -> Result<Frame> + Send + Sync,
{
    /// Wrap a closure under the given name
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F> FrameTransform for FnTransform<F>
where
    F: Fn(&Frame) -> Result<Frame> + Send + Sync,
{
    fn apply(&self, input: &Frame) -> Result<Frame> {
        (self.func)(input)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Returns the input frame unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl FrameTransform for Identity {
    fn apply(&self, input: &Frame) -> Result<Frame> {
        Ok(input.clone())
    }

    fn name(&self) -> &str {
        "identity"
    }
}

/// Multiplies one column by a constant factor.
#[derive(Debug, Clone, Copy)]
pub struct ScaleColumn {
    column: usize,
    factor: f64,
}

impl ScaleColumn {
    /// Scale `column` by `factor`
    pub fn new(column: usize, factor: f64) -> Self {
        Self { column, factor }
    }
}

impl FrameTransform for ScaleColumn {
    fn apply(&self, input: &Frame) -> Result<Frame> {
        if self.column >= input.columns() {
            return Err(ParframeError::InvalidFrame(format!(
                "column {} out of range for a {}-column frame",
                self.column,
                input.columns()
            )));
        }

        let columns = input.columns();
        let mut data = input.as_slice().to_vec();
        for row in data.chunks_exact_mut(columns) {
            row[self.column] *= self.factor;
        }
        Frame::from_row_major(columns, data)
    }

    fn name(&self) -> &str {
        "scale_column"
    }
}

/// Appends a constant-valued column, widening the schema by one.
///
/// Useful for tagging each job's output rows with a job index so that
/// completion-ordered results can be re-sorted by submission order.
#[derive(Debug, Clone, Copy)]
pub struct TagColumn {
    value: f64,
}

impl TagColumn {
    /// Tag every row with `value`
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl FrameTransform for TagColumn {
    fn apply(&self, input: &Frame) -> Result<Frame> {
        let columns = input.columns() + 1;
        let mut data = Vec::with_capacity(input.rows() * columns);
        for row in input.iter_rows() {
            data.extend_from_slice(row);
            data.push(self.value);
        }
        Frame::from_row_major(columns, data)
    }

    fn name(&self) -> &str {
        "tag_column"
    }
}
