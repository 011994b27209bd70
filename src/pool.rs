//! Worker loop of the pool.
//!
//! Every worker runs [`run_worker`] against the same pair of channels. Lines
//! are taken one at a time from the shared input channel (each line goes to
//! exactly one worker), decoded, filtered and, when accepted, handed to the
//! aggregator. The hand-off races the cancellation signal so a worker never
//! stays blocked once the run has been cancelled.

use crate::cancel::CancelSignal;
use crate::codec::decode_line;
use crate::filter::IdFilter;
use crate::record::Character;
use crossbeam_channel::{Receiver, Sender, select};
use tracing::debug;

/// A record accepted by a worker, tagged with the worker that forwarded it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accepted {
    pub worker: usize,
    pub record: Character,
}

/// Why a worker stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerExit {
    /// Input channel closed and drained.
    InputClosed,
    /// Forwarded its per-worker cap.
    CapReached,
    /// Observed the cancellation signal.
    Cancelled,
    /// The aggregator stopped receiving.
    ResultsClosed,
}

/// Per-worker counters, returned when the worker exits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerSummary {
    pub id: usize,
    pub consumed: usize,
    pub rejected: usize,
    pub forwarded: usize,
    pub exit: WorkerExit,
}

enum Next {
    Line(String),
    Stop(WorkerExit),
}

/// Run one worker to completion.
///
/// `cap` of `None` means no per-worker limit. The worker checks its cap
/// before taking another line, so it never consumes input it would not be
/// allowed to forward.
pub fn run_worker(
    id: usize,
    lines: Receiver<String>,
    results: Sender<Accepted>,
    filter: &dyn IdFilter,
    cap: Option<usize>,
    cancel: &CancelSignal,
) -> WorkerSummary {
    let mut consumed = 0usize;
    let mut rejected = 0usize;
    let mut forwarded = 0usize;

    let exit = loop {
        if cap.is_some_and(|cap| forwarded >= cap) {
            break WorkerExit::CapReached;
        }
        if cancel.is_cancelled() {
            break WorkerExit::Cancelled;
        }

        let next = select! {
            recv(lines) -> msg => msg.map_or(Next::Stop(WorkerExit::InputClosed), Next::Line),
            recv(cancel.listener()) -> _ => Next::Stop(WorkerExit::Cancelled),
        };
        let line = match next {
            Next::Line(line) => line,
            Next::Stop(exit) => break exit,
        };
        consumed += 1;

        let record = decode_line(&line);
        if record.is_sentinel() || !filter.accept(record.id) {
            rejected += 1;
            continue;
        }

        let outcome = select! {
            send(results, Accepted { worker: id, record }) -> res => {
                if res.is_ok() { None } else { Some(WorkerExit::ResultsClosed) }
            }
            recv(cancel.listener()) -> _ => Some(WorkerExit::Cancelled),
        };
        match outcome {
            None => forwarded += 1,
            Some(exit) => break exit,
        }
    };

    debug!(
        worker = id,
        consumed,
        rejected,
        forwarded,
        exit = ?exit,
        "worker finished"
    );
    WorkerSummary {
        id,
        consumed,
        rejected,
        forwarded,
        exit,
    }
}
