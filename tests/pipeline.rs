//! End-to-end runs of the concurrent reader.

use anyhow::Result;
use charbeam::testing::*;
use charbeam::*;
use std::io::{BufReader, Cursor};
use std::thread;
use std::time::Duration;

fn input(ids: impl IntoIterator<Item = u64>) -> Cursor<String> {
    Cursor::new(document(&lines_for_ids(ids)))
}

#[test]
fn even_filter_collects_only_even_ids() -> Result<()> {
    let params = RunParams::new("even").workers(2);
    let report = read_concurrent(input(1..=3), &params)?;

    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].id, 2);
    assert_eq!(report.records[0].name, "Character 2");
    assert_eq!(report.lines_read, 3);
    assert!(!report.quota_reached);
    Ok(())
}

#[test]
fn odd_filter_drains_whole_input_without_quota() -> Result<()> {
    let report = read_concurrent(input(1..=20), &RunParams::new("odd").workers(3))?;

    assert_ids_unordered(&report.records, &[1, 3, 5, 7, 9, 11, 13, 15, 17, 19]);
    assert!(!report.stopped_early);
    assert_all_accepted(&report.records, &OddIds);
    assert_run_bounds(&report, None, None);
    assert_eq!(report.lines_read, 20);
    Ok(())
}

#[test]
fn quota_stops_the_run_early() -> Result<()> {
    let odd: Vec<u64> = (0..10).map(|i| i * 2 + 1).collect();
    let params = RunParams::new("odd").items(3).workers(2);
    let report = read_concurrent(input(odd.clone()), &params)?;

    assert_eq!(report.records.len(), 3);
    assert!(report.quota_reached);
    assert!(report.lines_read < 10, "read {} lines", report.lines_read);
    assert!(report.stopped_early);
    assert_all_accepted(&report.records, &OddIds);
    assert!(report.records.iter().all(|c| odd.contains(&c.id)));
    Ok(())
}

#[test]
fn quota_larger_than_matches_returns_all_matches() -> Result<()> {
    let params = RunParams::new("even").items(50);
    let report = read_concurrent(input(1..=10), &params)?;

    assert_ids_unordered(&report.records, &[2, 4, 6, 8, 10]);
    assert!(!report.quota_reached);
    Ok(())
}

#[test]
fn quota_holds_for_every_worker_count() -> Result<()> {
    for workers in [-5, 0, 1, 2, 3, 4, 100] {
        for quota in [1usize, 2, 5] {
            let params = RunParams::new("even")
                .items(quota as i64)
                .workers(workers);
            let report = read_concurrent(input(1..=40), &params)?;

            assert_eq!(report.records.len(), quota, "workers={workers}");
            assert_all_accepted(&report.records, &EvenIds);
            assert_run_bounds(&report, Some(quota), None);
        }
    }
    Ok(())
}

#[test]
fn per_worker_cap_limits_each_worker() -> Result<()> {
    let params = RunParams::new("even").items_per_worker(1).workers(2);
    let report = read_concurrent(input((1..=6).map(|i| i * 2)), &params)?;

    assert_eq!(report.records.len(), 2);
    assert_eq!(report.per_worker, vec![1, 1]);
    assert!(report.stopped_early);
    assert_run_bounds(&report, None, Some(1));
    assert!(!report.quota_reached);
    Ok(())
}

#[test]
fn per_worker_cap_with_quota() -> Result<()> {
    let params = RunParams::new("odd")
        .items(4)
        .items_per_worker(2)
        .workers(3);
    let report = read_concurrent(input(1..=60), &params)?;

    assert_eq!(report.records.len(), 4);
    assert_run_bounds(&report, Some(4), Some(2));
    Ok(())
}

#[test]
fn worker_count_is_normalized() -> Result<()> {
    for (requested, used) in [(-5, 2), (0, 2), (1, 1), (3, 3), (4, 2), (100, 2)] {
        let report = read_concurrent(input(1..=4), &RunParams::new("even").workers(requested))?;
        assert_eq!(report.workers, used, "requested {requested}");
        assert_eq!(report.per_worker.len(), used);
        assert_ids_unordered(&report.records, &[2, 4]);
    }
    Ok(())
}

#[test]
fn empty_input_yields_empty_result() -> Result<()> {
    let report = read_concurrent(Cursor::new(""), &RunParams::new("odd").items(5))?;

    assert!(report.records.is_empty());
    assert_eq!(report.lines_read, 0);
    assert!(!report.quota_reached);
    assert!(!report.is_truncated());
    Ok(())
}

#[test]
fn malformed_lines_are_skipped() -> Result<()> {
    let text = [
        "ID,Name,Species,Type,Gender,Image,Url,Created".to_string(),
        "not,a,record".to_string(),
        String::new(),
        "x,Rick,Human,,Male,,,".to_string(),
        "0,Nobody,Human,,Male,,,".to_string(),
        "4,Beth,Human,,Female,,,".to_string(),
        "\"unterminated,quote".to_string(),
        "6,Abadango,Alien,,Female,,,".to_string(),
    ]
    .join("\n");
    let report = read_concurrent(Cursor::new(text), &RunParams::new("even"))?;

    assert_ids_unordered(&report.records, &[4, 6]);
    assert_all_accepted(&report.records, &EvenIds);
    Ok(())
}

#[test]
fn crlf_line_endings_are_accepted() -> Result<()> {
    let text = "1,Rick,Human,,Male,,,\r\n2,Morty,Human,,Male,,,\r\n";
    let report = read_concurrent(Cursor::new(text), &RunParams::new("even"))?;

    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].created, "");
    assert_eq!(report.records[0].name, "Morty");
    Ok(())
}

#[test]
fn invalid_params_are_rejected_before_running() -> Result<()> {
    let params = RunParams::new("prime").items(-1).items_per_worker(-2);
    let counting = CountingReader::new(&lines_for_ids(1..=4));
    let served = counting.counter();

    let err = read_concurrent(counting, &params).expect_err("params must be rejected");
    let errors = err
        .downcast_ref::<ValidationErrors>()
        .expect("validation errors");

    assert!(errors.has_field("type"));
    assert!(errors.has_field("items"));
    assert!(errors.has_field("items_per_worker"));
    assert_eq!(errors.errors().len(), 3);
    assert_eq!(served.load(std::sync::atomic::Ordering::SeqCst), 0);
    Ok(())
}

#[test]
fn filter_name_is_case_sensitive() {
    assert!(Runner::new(&RunParams::new("Even")).is_err());
    assert!(Runner::new(&RunParams::new("")).is_err());
    assert!(Runner::new(&RunParams::new("odd")).is_ok());
}

#[test]
fn truncated_source_returns_partial_result() -> Result<()> {
    let text = document(&lines_for_ids(1..=6));
    let report = read_concurrent(
        BufReader::new(FailingReader::new(text)),
        &RunParams::new("even"),
    )?;

    assert!(report.is_truncated());
    assert_ids_unordered(&report.records, &[2, 4, 6]);
    assert_eq!(report.lines_read, 6);
    Ok(())
}

#[test]
fn read_error_mid_line_keeps_complete_lines_only() -> Result<()> {
    let reader = FailingReader::new("2,Morty,Human,,Male,,,\n4,Be");
    let report = read_concurrent(reader, &RunParams::new("even"))?;

    assert_ids_unordered(&report.records, &[2]);
    assert_eq!(report.lines_read, 1);
    assert!(report.source_error.is_some());
    assert!(!report.stopped_early);
    Ok(())
}

#[test]
fn cancel_before_run_reads_nothing() -> Result<()> {
    let runner = Runner::new(&RunParams::new("even"))?;
    let cancel = runner.cancel_signal();
    cancel.cancel();
    cancel.cancel();

    let report = runner.run(input(1..=10))?;

    assert!(report.records.is_empty());
    assert_eq!(report.lines_read, 0);
    assert!(report.stopped_early);
    Ok(())
}

#[test]
fn external_cancel_ends_a_blocked_run() -> Result<()> {
    // A reader that never reaches end-of-stream on its own.
    let endless = std::io::repeat(b'\n');
    let runner = Runner::new(&RunParams::new("odd").workers(3))?;
    let cancel = runner.cancel_signal();

    let canceller = thread::spawn(move || {
        thread::sleep(Duration::from_millis(50));
        cancel.cancel();
    });
    let report = runner.run(BufReader::new(endless))?;
    canceller.join().expect("canceller thread");

    assert!(report.records.is_empty());
    assert!(report.lines_read > 0);
    assert!(!report.quota_reached);
    Ok(())
}

#[test]
fn custom_filter_replaces_builtin() -> Result<()> {
    struct MultipleOfThree;

    impl IdFilter for MultipleOfThree {
        fn accept(&self, id: CharacterId) -> bool {
            id % 3 == 0
        }

        fn name(&self) -> &str {
            "multiple-of-three"
        }
    }

    let report = Runner::new(&RunParams::new("even"))?
        .with_filter(MultipleOfThree)
        .run(input(1..=12))?;

    assert_ids_unordered(&report.records, &[3, 6, 9, 12]);
    assert_all_accepted(&report.records, &MultipleOfThree);
    Ok(())
}

#[test]
fn repeated_runs_are_independent() -> Result<()> {
    let params = RunParams::new("odd").items(2);
    for _ in 0..20 {
        let report = read_concurrent(input(1..=9), &params)?;
        assert_eq!(report.records.len(), 2);
        assert_all_accepted(&report.records, &OddIds);
    }
    Ok(())
}

#[test]
fn service_read_concurrent_returns_records() -> Result<()> {
    let tmp = TempDirPath::new()?;
    let service = Service::empty(Config::default().with_store_folder(tmp.path()));

    let records = service.read_concurrent(input(1..=8), &RunParams::new("even").items(3))?;
    assert_eq!(records.len(), 3);
    assert_all_accepted(&records, &EvenIds);
    Ok(())
}
