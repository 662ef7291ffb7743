//! Sequential Reference Path Tests
//!
//! The sequential executor is the deterministic baseline: output rows appear
//! in exact submission order and repeated runs are bit-identical.

use std::sync::Arc;

use parframe::batch::{BatchJob, SequentialExecutor};
use parframe::frame::{Frame, Schema};
use parframe::transform::{Identity, ScaleColumn};
use pretty_assertions::assert_eq;

fn tagged_jobs(count: usize, rows_per_job: usize) -> Vec<BatchJob> {
    (0..count)
        .map(|i| {
            // Column 0 carries the job index so order is observable
            let rows: Vec<Vec<f64>> = (0..rows_per_job)
                .map(|r| vec![i as f64, r as f64])
                .collect();
            let input = Arc::new(Frame::from_rows(rows).unwrap());
            BatchJob::with_id(format!("job_{}", i), input, Arc::new(Identity))
        })
        .collect()
}

#[test]
fn test_rows_follow_submission_order() {
    let executor = SequentialExecutor::new(Schema::with_columns(2));
    let jobs = tagged_jobs(10, 150);

    let combined = executor.run(&jobs).unwrap();
    assert_eq!(combined.shape(), (1500, 2));

    // Job 0's 150 rows first, then job 1's, and so on
    for (index, row) in combined.iter_rows().enumerate() {
        let expected_job = (index / 150) as f64;
        let expected_row = (index % 150) as f64;
        assert_eq!(row, &[expected_job, expected_row][..]);
    }
}

#[test]
fn test_repeated_runs_are_bit_identical() {
    let executor = SequentialExecutor::new(Schema::with_columns(2));
    let jobs: Vec<BatchJob> = (0..5)
        .map(|i| {
            let rows: Vec<Vec<f64>> = (0..20).map(|r| vec![r as f64, 0.1 * i as f64]).collect();
            let input = Arc::new(Frame::from_rows(rows).unwrap());
            BatchJob::with_id(
                format!("job_{}", i),
                input,
                Arc::new(ScaleColumn::new(1, 1.0 / 3.0)),
            )
        })
        .collect();

    let first = executor.run(&jobs).unwrap();
    let second = executor.run(&jobs).unwrap();

    assert_eq!(first.as_slice(), second.as_slice());
    assert_eq!(first, second);
}

#[test]
fn test_full_result_objects_are_concatenated() {
    // Jobs with different row counts; concatenation preserves each block
    let executor = SequentialExecutor::new(Schema::with_columns(1));
    let jobs: Vec<BatchJob> = [1usize, 3, 2]
        .iter()
        .enumerate()
        .map(|(i, &rows)| {
            let block: Vec<Vec<f64>> = (0..rows).map(|_| vec![i as f64]).collect();
            let input = Arc::new(Frame::from_rows(block).unwrap());
            BatchJob::with_id(format!("job_{}", i), input, Arc::new(Identity))
        })
        .collect();

    let combined = executor.run(&jobs).unwrap();

    let tags: Vec<f64> = combined.iter_rows().map(|r| r[0]).collect();
    assert_eq!(tags, vec![0.0, 1.0, 1.0, 1.0, 2.0, 2.0]);
}
