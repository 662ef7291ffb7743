//! Inflation adjustment demo: fan a wage-table transformation out across a
//! worker pool and reassemble the results, then compare against the
//! sequential reference path.

use std::sync::Arc;
use std::time::Instant;

use parframe::batch::{BatchExecutor, BatchJob, BatchReport, ReportFormat, SequentialExecutor};
use parframe::frame::{Frame, Schema};
use parframe::transform::ScaleColumn;
use tracing_subscriber::EnvFilter;

const YEARS: usize = 10;
const ROWS_PER_YEAR: usize = 50_000;
const WAGE_COLUMN: usize = 2;

/// Columns: case id, filing year, prevailing wage
fn wage_frame(year: usize) -> Frame {
    let rows: Vec<Vec<f64>> = (0..ROWS_PER_YEAR)
        .map(|i| {
            vec![
                (year * ROWS_PER_YEAR + i) as f64,
                (2008 + year) as f64,
                55_000.0 + (i % 400) as f64 * 100.0,
            ]
        })
        .collect();
    Frame::from_rows(rows).expect("demo frame should build")
}

/// Cumulative CPI factor bringing the given filing year to 2018 dollars.
fn inflation_factor(year: usize) -> f64 {
    1.018f64.powi((YEARS - year) as i32)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    println!("parframe - Inflation Adjustment Demo\n");

    // One job per filing year, each scaling the wage column by that year's
    // cumulative inflation factor
    let jobs: Vec<BatchJob> = (0..YEARS)
        .map(|year| {
            BatchJob::with_id(
                format!("year_{}", 2008 + year),
                Arc::new(wage_frame(year)),
                Arc::new(ScaleColumn::new(WAGE_COLUMN, inflation_factor(year))),
            )
        })
        .collect();

    let schema = Schema::with_columns(3);

    println!(
        "Adjusting {} filings across {} jobs...\n",
        YEARS * ROWS_PER_YEAR,
        jobs.len()
    );

    // Parallel path
    let executor = BatchExecutor::new(schema)
        .with_worker_count(8)
        .with_progress_callback(|completed, total| {
            println!("  progress: {}/{}", completed, total);
        });

    let start = Instant::now();
    let combined = executor.submit(jobs.clone()).await?;
    let parallel_elapsed = start.elapsed();

    println!(
        "\nParallel:   shape {:?} in {:?} (8 workers)",
        combined.shape(),
        parallel_elapsed
    );

    // Sequential reference path
    let start = Instant::now();
    let reference = SequentialExecutor::new(schema).run(&jobs)?;
    let sequential_elapsed = start.elapsed();

    println!(
        "Sequential: shape {:?} in {:?}",
        reference.shape(),
        sequential_elapsed
    );

    // Same rows either way; only the order across jobs may differ
    assert_eq!(combined.shape(), reference.shape());

    println!("\nBatch report:");
    let report = BatchReport::new(executor.stats());
    println!("{}", report.render(ReportFormat::Csv)?);

    Ok(())
}
