//! Batch execution of independent frame transformations.
//!
//! The parallel path ([`BatchExecutor`]) fans jobs out across a bounded
//! worker pool and merges outputs in completion order; the sequential path
//! ([`SequentialExecutor`]) processes jobs in submission order and is fully
//! deterministic.

pub mod aggregation;
pub mod executor;
pub mod sequential;
pub mod types;

pub use aggregation::{BatchReport, BatchStats, ReportFormat};
pub use executor::BatchExecutor;
pub use sequential::SequentialExecutor;
pub use types::{BatchJob, JobReport, JobStatus, ProgressCallback};
