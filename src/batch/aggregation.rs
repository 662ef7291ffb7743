//! Batch stats and report export.
//!
//! [`BatchStats`] is the snapshot the parallel executor records for each
//! run; [`BatchReport`] renders it as JSON or CSV for callers that want to
//! persist or print the outcome of a batch.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::batch::types::{JobReport, JobStatus};
use crate::Result;

/// Statistics recorded during a batch run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchStats {
    /// Jobs submitted
    pub total_jobs: usize,
    /// Jobs that completed with an accepted output
    pub succeeded: usize,
    /// Jobs that failed or had their output rejected
    pub failed: usize,
    /// Wall-clock duration of the whole batch
    pub duration: Duration,
    /// Per-job outcomes, in completion order
    pub reports: Vec<JobReport>,
}

impl BatchStats {
    /// Fraction of submitted jobs that succeeded, in `[0.0, 1.0]`
    pub fn success_rate(&self) -> f64 {
        if self.total_jobs == 0 {
            return 1.0;
        }
        self.succeeded as f64 / self.total_jobs as f64
    }

    /// Mean wall-clock duration across reported jobs
    pub fn average_job_duration(&self) -> Duration {
        if self.reports.is_empty() {
            return Duration::ZERO;
        }
        let total: Duration = self.reports.iter().map(|r| r.duration).sum();
        total / self.reports.len() as u32
    }
}

/// Output formats for a rendered batch report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Pretty-printed JSON
    Json,
    /// One CSV line per job, with a header
    Csv,
}

/// Renderable view over a [`BatchStats`] snapshot
#[derive(Debug, Clone)]
pub struct BatchReport {
    stats: BatchStats,
}

impl BatchReport {
    /// Wrap a stats snapshot
    pub fn new(stats: BatchStats) -> Self {
        Self { stats }
    }

    /// The underlying stats
    pub fn stats(&self) -> &BatchStats {
        &self.stats
    }

    /// Render the report in the requested format
    pub fn render(&self, format: ReportFormat) -> Result<String> {
        match format {
            ReportFormat::Json => Ok(serde_json::to_string_pretty(&self.stats)?),
            ReportFormat::Csv => Ok(self.to_csv()),
        }
    }

    fn to_csv(&self) -> String {
        let mut out = String::from("job_id,status,rows,duration_ms,error\n");
        for report in &self.stats.reports {
            let status = match report.status {
                JobStatus::Completed => "completed",
                JobStatus::Failed => "failed",
            };
            out.push_str(&format!(
                "{},{},{},{},{}\n",
                csv_field(&report.job_id),
                status,
                report.rows,
                report.duration.as_millis(),
                csv_field(report.error.as_deref().unwrap_or("")),
            ));
        }
        out
    }
}

/// Quote a CSV field when it contains a delimiter, quote, or newline.
/// Error messages routinely contain commas, so this keeps failed-job rows
/// well-formed.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
