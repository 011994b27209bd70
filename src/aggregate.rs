//! Aggregator: the single consumer of accepted records.

use crate::cancel::CancelSignal;
use crate::pool::Accepted;
use crate::record::CharacterList;
use crossbeam_channel::Receiver;
use tracing::debug;

/// Records collected by one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregate {
    /// Accepted records in arrival order.
    pub records: CharacterList,
    /// Records contributed by each worker, indexed by worker id.
    pub per_worker: Vec<usize>,
    /// `true` when collection stopped on the quota rather than end-of-input.
    pub quota_reached: bool,
}

/// Drain `results` until it closes or `quota` records are collected.
///
/// Reaching the quota fires `cancel` and stops reading at once, so the
/// result never holds more than `quota` records. `None` (or `Some(0)`)
/// collects everything.
pub fn aggregate(
    results: Receiver<Accepted>,
    quota: Option<usize>,
    workers: usize,
    cancel: &CancelSignal,
) -> Aggregate {
    let quota = quota.filter(|q| *q > 0);
    let mut agg = Aggregate {
        records: CharacterList::with_capacity(quota.unwrap_or(0)),
        per_worker: vec![0; workers],
        quota_reached: false,
    };

    for Accepted { worker, record } in results.iter() {
        agg.records.push(record);
        if worker >= agg.per_worker.len() {
            agg.per_worker.resize(worker + 1, 0);
        }
        agg.per_worker[worker] += 1;

        if quota.is_some_and(|q| agg.records.len() >= q) {
            agg.quota_reached = true;
            cancel.cancel();
            break;
        }
    }

    debug!(
        records = agg.records.len(),
        quota_reached = agg.quota_reached,
        "aggregator finished"
    );
    agg
}
