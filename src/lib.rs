//! # parframe
//!
//! A batch fan-out/fan-in executor for parallel data-frame transformations.
//!
//! ## Overview
//!
//! `parframe` takes a fixed collection of independent, pure compute jobs,
//! distributes them across a bounded pool of concurrent workers, and
//! reassembles the per-job output tables into one combined frame once every
//! job has completed. A deterministic sequential reference executor is
//! provided alongside the parallel one for comparison and testing.
//!
//! ## Quick Start
//!
//! ```rust
//! use parframe::batch::{BatchExecutor, BatchJob};
//! use parframe::frame::{Frame, Schema};
//! use parframe::transform::ScaleColumn;
//! use std::sync::Arc;
//!
//! # async fn example() -> parframe::Result<()> {
//! // One shared input frame, transformed independently by every job
//! let base = Arc::new(Frame::from_rows(vec![
//!     vec![2015.0, 60_000.0],
//!     vec![2016.0, 62_500.0],
//! ])?);
//!
//! let jobs: Vec<BatchJob> = (0..4)
//!     .map(|_| BatchJob::new(Arc::clone(&base), Arc::new(ScaleColumn::new(1, 1.07))))
//!     .collect();
//!
//! let executor = BatchExecutor::new(Schema::with_columns(2)).with_worker_count(2);
//! let combined = executor.submit(jobs).await?;
//! assert_eq!(combined.shape(), (8, 2));
//! # Ok(())
//! # }
//! ```
//!
//! ## Key Features
//!
//! - **Fan-out/fan-in**: jobs are dispatched to a semaphore-bounded worker
//!   pool; results are appended by the orchestrator in completion order
//! - **All-or-nothing**: a single failing job fails the whole submission,
//!   after outstanding work has been stopped and joined
//! - **Schema enforcement**: every job output must match the declared column
//!   schema before it is merged into the combined frame
//! - **Sequential reference path**: deterministic, submission-ordered
//!   execution for baselines and result verification
//!
//! ## Modules
//!
//! - [`frame`]: row-major numeric frames and the fixed column schema
//! - [`transform`]: the pure transformation seam and stock transforms
//! - [`batch`]: parallel and sequential batch executors, stats and reports

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

use thiserror::Error;

/// Result type for parframe operations
pub type Result<T> = std::result::Result<T, ParframeError>;

/// Main error type for parframe operations
#[derive(Error, Debug)]
pub enum ParframeError {
    /// A job's transformation failed inside a worker
    #[error("Job {job_id} failed: {message}")]
    JobExecution {
        /// Identifier of the failing job
        job_id: String,
        /// Description of the underlying failure
        message: String,
    },

    /// The worker pool could not be sized or spawned as requested
    #[error("Worker pool error: {0}")]
    PoolInit(String),

    /// A job output's column count disagrees with the declared schema
    #[error("Schema mismatch: expected {expected} columns, found {found}")]
    SchemaMismatch {
        /// Column count declared on the executor
        expected: usize,
        /// Column count actually produced
        found: usize,
    },

    /// A frame could not be constructed from the given data
    #[error("Invalid frame: {0}")]
    InvalidFrame(String),

    /// A worker task panicked or was lost before reporting
    #[error("Async join error: {0}")]
    Join(#[from] tokio::task::JoinError),

    /// Report serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Row-major numeric frames and the fixed column schema
pub mod frame;

/// Pure frame transformations
pub mod transform;

/// Batch executors, stats and reports
pub mod batch;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{Frame, Schema};

    #[test]
    fn test_frame_creation() {
        let frame = Frame::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();

        assert_eq!(frame.shape(), (2, 2));
        assert_eq!(frame.schema(), Schema::with_columns(2));
    }

    #[test]
    fn test_error_display_carries_job_id() {
        let err = ParframeError::JobExecution {
            job_id: "job_3".to_string(),
            message: "division by zero".to_string(),
        };

        assert!(err.to_string().contains("job_3"));
    }
}
