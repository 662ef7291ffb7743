//! Sequential reference executor.
//!
//! Processes jobs one at a time in submission order, collecting each full
//! output frame and concatenating them at the end. Output row order always
//! matches submission order and repeated runs over the same jobs are
//! bit-identical, which makes this path the baseline that the parallel
//! executor's results are verified against.

use std::time::Instant;

use tracing::debug;

use crate::batch::types::BatchJob;
use crate::frame::{Frame, Schema};
use crate::{ParframeError, Result};

/// Deterministic, submission-ordered batch executor.
pub struct SequentialExecutor {
    schema: Schema,
}

impl SequentialExecutor {
    /// Create an executor for the given output schema
    pub fn new(schema: Schema) -> Self {
        Self { schema }
    }

    /// Declared output schema
    pub fn schema(&self) -> Schema {
        self.schema
    }

    /// Execute every job in submission order and return the combined frame.
    ///
    /// Fails on the first job error; no partial frame is returned.
    pub fn run(&self, jobs: &[BatchJob]) -> Result<Frame> {
        debug!(job_count = jobs.len(), "Starting sequential execution");

        let mut outputs = Vec::with_capacity(jobs.len());
        for job in jobs {
            let start = Instant::now();
            let output =
                job.transform
                    .apply(&job.input)
                    .map_err(|e| ParframeError::JobExecution {
                        job_id: job.id.clone(),
                        message: e.to_string(),
                    })?;

            debug!(
                job_id = %job.id,
                rows = output.rows(),
                duration_ms = start.elapsed().as_millis() as u64,
                "Job completed"
            );
            outputs.push(output);
        }

        Frame::concat(self.schema, &outputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::Identity;
    use std::sync::Arc;

    #[test]
    fn test_empty_run_has_declared_schema() {
        let executor = SequentialExecutor::new(Schema::with_columns(4));

        let combined = executor.run(&[]).unwrap();
        assert_eq!(combined.shape(), (0, 4));
    }

    #[test]
    fn test_run_preserves_submission_order() {
        let executor = SequentialExecutor::new(Schema::with_columns(1));
        let jobs: Vec<BatchJob> = (0..3)
            .map(|i| {
                let input = Arc::new(Frame::from_rows(vec![vec![i as f64]]).unwrap());
                BatchJob::with_id(format!("job_{}", i), input, Arc::new(Identity))
            })
            .collect();

        let combined = executor.run(&jobs).unwrap();

        assert_eq!(combined.shape(), (3, 1));
        assert_eq!(combined.get(0, 0), Some(0.0));
        assert_eq!(combined.get(1, 0), Some(1.0));
        assert_eq!(combined.get(2, 0), Some(2.0));
    }
}
