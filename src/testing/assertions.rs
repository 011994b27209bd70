//! Assertions over run results.
//!
//! Runs interleave workers, so these compare by membership rather than by
//! position.

use crate::filter::IdFilter;
use crate::record::{Character, CharacterId};
use crate::runner::RunReport;
use std::collections::BTreeSet;

/// Assert that `records` hold exactly the ids in `expected`, in any order
/// and without duplicates.
///
/// # Panics
///
/// Panics on a length mismatch, a duplicate, or a missing/extra id.
///
/// # Example
///
/// ```
/// use charbeam::testing::{assert_ids_unordered, sample_characters};
///
/// let mut records = sample_characters();
/// records.reverse();
/// assert_ids_unordered(&records, &[1, 2, 3, 4, 5, 6]);
/// ```
pub fn assert_ids_unordered(records: &[Character], expected: &[CharacterId]) {
    let actual: Vec<CharacterId> = records.iter().map(|c| c.id).collect();
    assert_eq!(
        actual.len(),
        expected.len(),
        "Record count mismatch:\n  Expected ids: {expected:?}\n  Actual ids: {actual:?}"
    );

    let actual_set: BTreeSet<_> = actual.iter().copied().collect();
    assert_eq!(
        actual_set.len(),
        actual.len(),
        "Duplicate records in result:\n  Actual ids: {actual:?}"
    );

    let expected_set: BTreeSet<_> = expected.iter().copied().collect();
    if actual_set != expected_set {
        let missing: Vec<_> = expected_set.difference(&actual_set).collect();
        let extra: Vec<_> = actual_set.difference(&expected_set).collect();
        panic!(
            "Record id mismatch:\n  Missing ids: {missing:?}\n  Extra ids: {extra:?}\n  Actual ids: {actual:?}"
        );
    }
}

/// Assert that every record is decodable and passes `filter`.
///
/// # Panics
///
/// Panics on the first sentinel or rejected record.
pub fn assert_all_accepted(records: &[Character], filter: &dyn IdFilter) {
    for (i, record) in records.iter().enumerate() {
        assert!(
            !record.is_sentinel(),
            "Sentinel record at index {i}:\n  Record: {record:?}"
        );
        assert!(
            filter.accept(record.id),
            "Record at index {i} rejected by '{}' filter:\n  Record: {record:?}",
            filter.name()
        );
    }
}

/// Assert the size bounds of a report: at most `quota` records (when set)
/// and at most `cap` from any single worker (when set).
///
/// # Panics
///
/// Panics if either bound is exceeded or the per-worker tally does not add
/// up to the record count.
pub fn assert_run_bounds(report: &RunReport, quota: Option<usize>, cap: Option<usize>) {
    if let Some(quota) = quota {
        assert!(
            report.records.len() <= quota,
            "Quota exceeded: {} records for a quota of {quota}",
            report.records.len()
        );
    }
    if let Some(cap) = cap {
        for (worker, count) in report.per_worker.iter().enumerate() {
            assert!(
                *count <= cap,
                "Worker {worker} forwarded {count} records, cap is {cap}"
            );
        }
    }
    let tallied: usize = report.per_worker.iter().sum();
    assert_eq!(
        tallied,
        report.records.len(),
        "Per-worker tally {:?} does not match {} records",
        report.per_worker,
        report.records.len()
    );
}
