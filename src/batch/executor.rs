//! Parallel fan-out/fan-in batch executor.
//!
//! Jobs are dispatched fire-and-forget onto spawned tasks gated by a
//! semaphore sized to the worker count. The orchestrator drains completions
//! and is the only code that touches the result accumulator, so appends are
//! serialized without any worker-visible locking. On the first failure all
//! outstanding tasks are aborted and drained before the error is returned;
//! no partial combined frame is ever produced.

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::stream::{FuturesUnordered, StreamExt};
use parking_lot::Mutex;
use tokio::sync::Semaphore;
use tracing::{debug, error, info, instrument, warn};

use crate::batch::aggregation::BatchStats;
use crate::batch::types::{BatchJob, JobReport, JobStatus, ProgressCallback};
use crate::frame::{Frame, Schema};
use crate::{ParframeError, Result};

/// Batch executor distributing jobs across a bounded worker pool.
pub struct BatchExecutor {
    /// Column schema every job output must satisfy
    schema: Schema,
    /// Number of concurrent workers
    worker_count: usize,
    /// Progress callback, invoked from the orchestrator
    progress_callback: Option<Arc<ProgressCallback>>,
    /// Snapshot of the most recent run
    stats: Arc<Mutex<BatchStats>>,
}

impl BatchExecutor {
    /// Create an executor for the given output schema.
    ///
    /// The worker count defaults to the number of available CPUs.
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            worker_count: num_cpus::get(),
            progress_callback: None,
            stats: Arc::new(Mutex::new(BatchStats::default())),
        }
    }

    /// Set the worker pool size.
    ///
    /// Zero is rejected at submission time with a pool error rather than
    /// silently clamped.
    pub fn with_worker_count(mut self, worker_count: usize) -> Self {
        self.worker_count = worker_count;
        self
    }

    /// Set a progress callback invoked as `(completed, total)`
    pub fn with_progress_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(usize, usize) + Send + Sync + 'static,
    {
        self.progress_callback = Some(Arc::new(Box::new(callback)));
        self
    }

    /// Configured worker pool size
    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Declared output schema
    pub fn schema(&self) -> Schema {
        self.schema
    }

    /// Stats recorded during the most recent [`submit`](Self::submit) call
    pub fn stats(&self) -> BatchStats {
        self.stats.lock().clone()
    }

    /// Execute every job and return the combined frame.
    ///
    /// Each job runs exactly once. Outputs are concatenated in **completion
    /// order**, which is race-determined by scheduling; the multiset of rows
    /// is identical for any worker count. Callers that need submission order
    /// should use [`SequentialExecutor`](crate::batch::SequentialExecutor).
    ///
    /// The call returns only after every spawned task has been joined, both
    /// on success and on failure. Any job failure fails the whole call; no
    /// partial frame is returned.
    #[instrument(skip(self, jobs), fields(job_count = jobs.len()))]
    pub async fn submit(&self, jobs: Vec<BatchJob>) -> Result<Frame> {
        let batch_start = Instant::now();

        if self.worker_count == 0 {
            return Err(ParframeError::PoolInit(
                "worker count must be at least 1".to_string(),
            ));
        }

        let total_jobs = jobs.len();
        if jobs.is_empty() {
            info!("No jobs to execute in batch");
            *self.stats.lock() = BatchStats::default();
            return Ok(Frame::empty(self.schema));
        }

        info!(
            total_jobs = total_jobs,
            worker_count = self.worker_count,
            columns = self.schema.width(),
            "Starting batch execution"
        );

        let semaphore = Arc::new(Semaphore::new(self.worker_count));
        let mut tasks = FuturesUnordered::new();
        let mut abort_handles = Vec::with_capacity(total_jobs);

        // Fan-out: dispatch is fire-and-forget; nothing here waits on a
        // specific job.
        for job in jobs {
            let sem = Arc::clone(&semaphore);

            let handle = tokio::spawn(async move {
                let _permit = sem.acquire_owned().await.map_err(|e| {
                    ParframeError::PoolInit(format!("worker pool closed: {}", e))
                })?;
                debug!(job_id = %job.id, transform = job.transform.name(), "Job starting");

                let start = Instant::now();
                let output = job.transform.apply(&job.input).map_err(|e| {
                    ParframeError::JobExecution {
                        job_id: job.id.clone(),
                        message: e.to_string(),
                    }
                })?;

                Ok::<(String, Frame, Duration), ParframeError>((job.id, output, start.elapsed()))
            });

            abort_handles.push(handle.abort_handle());
            tasks.push(handle);
        }

        // Fan-in: the accumulator lives here and only here. Workers return
        // their output; the orchestrator appends it, in completion order.
        let mut combined = Frame::empty(self.schema);
        let mut reports: Vec<JobReport> = Vec::with_capacity(total_jobs);
        let mut completed = 0usize;
        let mut failure: Option<ParframeError> = None;

        while let Some(joined) = tasks.next().await {
            let outcome = match joined {
                Ok(outcome) => outcome,
                // Aborted after a failure was already recorded
                Err(join_err) if join_err.is_cancelled() => continue,
                Err(join_err) => Err(ParframeError::Join(join_err)),
            };

            match outcome {
                Ok((job_id, output, duration)) => {
                    if output.columns() != self.schema.width() {
                        let err = ParframeError::SchemaMismatch {
                            expected: self.schema.width(),
                            found: output.columns(),
                        };
                        error!(job_id = %job_id, error = %err, "Job output rejected");
                        reports.push(JobReport {
                            job_id,
                            status: JobStatus::Failed,
                            rows: 0,
                            duration,
                            error: Some(err.to_string()),
                        });
                        if failure.is_none() {
                            failure = Some(err);
                            Self::abort_outstanding(&abort_handles);
                        }
                        continue;
                    }

                    let rows = output.rows();
                    reports.push(JobReport {
                        job_id: job_id.clone(),
                        status: JobStatus::Completed,
                        rows,
                        duration,
                        error: None,
                    });

                    // After a failure the batch is already doomed; completed
                    // outputs are recorded but never merged.
                    if failure.is_some() {
                        continue;
                    }

                    combined.append(&output)?;
                    completed += 1;
                    debug!(
                        job_id = %job_id,
                        rows = rows,
                        duration_ms = duration.as_millis() as u64,
                        "Job completed"
                    );
                    if let Some(callback) = &self.progress_callback {
                        callback(completed, total_jobs);
                    }
                }
                Err(err) => {
                    error!(error = %err, "Job failed");
                    match &err {
                        ParframeError::JobExecution { job_id, message } => {
                            reports.push(JobReport {
                                job_id: job_id.clone(),
                                status: JobStatus::Failed,
                                rows: 0,
                                duration: Duration::ZERO,
                                error: Some(message.clone()),
                            });
                        }
                        // A panicked task never reported its id
                        ParframeError::Join(join_err) => {
                            reports.push(JobReport {
                                job_id: "unknown".to_string(),
                                status: JobStatus::Failed,
                                rows: 0,
                                duration: Duration::ZERO,
                                error: Some(join_err.to_string()),
                            });
                        }
                        _ => {}
                    }
                    if failure.is_none() {
                        failure = Some(err);
                        Self::abort_outstanding(&abort_handles);
                    }
                }
            }
        }

        let batch_duration = batch_start.elapsed();
        let failed = reports
            .iter()
            .filter(|r| r.status == JobStatus::Failed)
            .count();
        let succeeded = reports.len() - failed;

        *self.stats.lock() = BatchStats {
            total_jobs,
            succeeded,
            failed,
            duration: batch_duration,
            reports,
        };

        if let Some(err) = failure {
            warn!(
                total_jobs = total_jobs,
                succeeded = succeeded,
                failed = failed,
                batch_duration_ms = batch_duration.as_millis() as u64,
                "Batch execution failed"
            );
            return Err(err);
        }

        info!(
            total_jobs = total_jobs,
            combined_rows = combined.rows(),
            batch_duration_ms = batch_duration.as_millis() as u64,
            "Batch execution completed"
        );

        Ok(combined)
    }

    fn abort_outstanding(abort_handles: &[tokio::task::AbortHandle]) {
        debug!("Aborting outstanding jobs after failure");
        for handle in abort_handles {
            handle.abort();
        }
    }
}
