//! Job and report types shared by both executors.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::frame::Frame;
use crate::transform::FrameTransform;

/// A single unit of independent, pure computation.
///
/// The input payload is immutable and shared; the transformation is applied
/// to it exactly once by exactly one worker.
#[derive(Clone)]
pub struct BatchJob {
    /// Unique identifier for this job
    pub id: String,
    /// Immutable input payload
    pub input: Arc<Frame>,
    /// Pure transformation applied to the input
    pub transform: Arc<dyn FrameTransform>,
}

impl BatchJob {
    /// Create a job with a generated id
    pub fn new(input: Arc<Frame>, transform: Arc<dyn FrameTransform>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            input,
            transform,
        }
    }

    /// Create a job with an explicit id
    pub fn with_id(
        id: impl Into<String>,
        input: Arc<Frame>,
        transform: Arc<dyn FrameTransform>,
    ) -> Self {
        Self {
            id: id.into(),
            input,
            transform,
        }
    }
}

impl std::fmt::Debug for BatchJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchJob")
            .field("id", &self.id)
            .field("input_shape", &self.input.shape())
            .field("transform", &self.transform.name())
            .finish()
    }
}

/// Terminal status of a batch job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    /// Job completed and its output was accepted
    Completed,
    /// Job failed or its output was rejected
    Failed,
}

/// Per-job outcome recorded during a batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobReport {
    /// Job identifier
    pub job_id: String,
    /// Terminal status
    pub status: JobStatus,
    /// Rows the job produced (zero on failure)
    pub rows: usize,
    /// Wall-clock execution duration
    pub duration: Duration,
    /// Error message, if the job failed
    pub error: Option<String>,
}

/// Callback invoked by the orchestrator as `(completed, total)` after each
/// job's output has been merged
pub type ProgressCallback = Box<dyn Fn(usize, usize) + Send + Sync>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::Identity;

    #[test]
    fn test_generated_ids_are_unique() {
        let input = Arc::new(Frame::from_rows(vec![vec![1.0]]).unwrap());
        let a = BatchJob::new(Arc::clone(&input), Arc::new(Identity));
        let b = BatchJob::new(input, Arc::new(Identity));

        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_debug_names_the_transform() {
        let input = Arc::new(Frame::from_rows(vec![vec![1.0, 2.0]]).unwrap());
        let job = BatchJob::with_id("job_0", input, Arc::new(Identity));

        let rendered = format!("{:?}", job);
        assert!(rendered.contains("job_0"));
        assert!(rendered.contains("identity"));
    }
}
