//! Tests for the testing utilities module.

use anyhow::Result;
use charbeam::testing::*;
use charbeam::*;
use std::io::{BufRead, Read};
use std::sync::atomic::Ordering;

#[test]
fn failing_reader_errors_after_data() {
    let mut reader = FailingReader::new("1,a\n2,b\n");
    let mut line = String::new();
    assert_eq!(reader.read_line(&mut line).ok(), Some(4));
    line.clear();
    assert_eq!(reader.read_line(&mut line).ok(), Some(4));
    line.clear();
    assert!(reader.read_line(&mut line).is_err());
}

#[test]
fn counting_reader_counts_started_lines() -> Result<()> {
    let lines = lines_for_ids(1..=3);
    let mut reader = CountingReader::new(&lines);
    let counter = reader.counter();
    assert_eq!(counter.load(Ordering::SeqCst), 0);

    let mut first = String::new();
    reader.read_line(&mut first)?;
    assert_eq!(first.trim_end(), lines[0]);
    assert_eq!(counter.load(Ordering::SeqCst), 1);

    let mut rest = String::new();
    reader.read_to_string(&mut rest)?;
    assert_eq!(rest.lines().count(), 2);
    assert_eq!(counter.load(Ordering::SeqCst), 3);
    Ok(())
}

#[test]
fn temp_dir_is_removed_on_drop() -> Result<()> {
    let path = {
        let tmp = TempDirPath::new()?;
        std::fs::write(tmp.file_path("x.csv"), "1")?;
        assert!(tmp.path().is_dir());
        tmp.path().to_path_buf()
    };
    assert!(!path.exists());
    Ok(())
}

#[test]
fn assert_ids_unordered_ignores_order() {
    let mut chars = sample_characters();
    chars.swap(0, 5);
    assert_ids_unordered(&chars, &[6, 5, 4, 3, 2, 1]);
}

#[test]
#[should_panic(expected = "Record id mismatch")]
fn assert_ids_unordered_reports_mismatch() {
    assert_ids_unordered(&sample_characters()[..2], &[1, 3]);
}

#[test]
#[should_panic(expected = "Duplicate records")]
fn assert_ids_unordered_reports_duplicates() {
    let one = character(1, "Rick");
    assert_ids_unordered(&[one.clone(), one], &[1, 2]);
}

#[test]
#[should_panic(expected = "rejected by 'even' filter")]
fn assert_all_accepted_reports_rejection() {
    assert_all_accepted(&sample_characters(), &EvenIds);
}

#[test]
#[should_panic(expected = "Sentinel record")]
fn assert_all_accepted_reports_sentinel() {
    assert_all_accepted(&[Character::default()], &EvenIds);
}

#[test]
#[should_panic(expected = "Quota exceeded")]
fn assert_run_bounds_reports_quota() {
    let report = RunReport {
        records: sample_characters(),
        per_worker: vec![3, 3],
        workers: 2,
        lines_read: 6,
        quota_reached: true,
        source_error: None,
        stopped_early: true,
    };
    assert_run_bounds(&report, Some(5), None);
}
