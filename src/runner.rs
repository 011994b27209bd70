use crate::aggregate::{Aggregate, aggregate};
use crate::cancel::CancelSignal;
use crate::filter::IdFilter;
use crate::params::{RunParams, RunPlan};
use crate::pool::{Accepted, WorkerSummary, run_worker};
use crate::record::CharacterList;
use crate::source::{LineSource, SourceSummary};
use anyhow::{Result, anyhow};
use crossbeam_channel::bounded;
use std::fmt;
use std::io::BufRead;
use std::thread;
use tracing::{debug, warn};

/// Lifecycle of one run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Validating,
    Rejected,
    Running,
    Draining,
    Completed,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Accepted records; cross-worker order is arbitrary.
    pub records: CharacterList,
    /// Records contributed by each worker.
    pub per_worker: Vec<usize>,
    /// Worker count actually used.
    pub workers: usize,
    /// Lines pulled from the input before the source stopped.
    pub lines_read: usize,
    /// `true` when the quota was met and the run was cancelled.
    pub quota_reached: bool,
    /// Read error that truncated the input. The run still succeeds with what
    /// was collected up to that point.
    pub source_error: Option<String>,
    /// `true` when the source quit before end-of-input because the run was
    /// cancelled or every worker had stopped taking lines.
    pub stopped_early: bool,
}

impl RunReport {
    #[must_use]
    pub fn into_records(self) -> CharacterList {
        self.records
    }

    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.source_error.is_some()
    }
}

/// Bounded worker-pool reader.
///
/// Wires line source → N workers → aggregator over two zero-capacity
/// channels and one [`CancelSignal`]. A `Runner` is consumed by
/// [`run`](Runner::run); every run gets fresh channels and threads, and all
/// of them have exited by the time `run` returns.
pub struct Runner {
    plan: RunPlan,
    filter: Box<dyn IdFilter>,
    cancel: CancelSignal,
}

impl Runner {
    /// Validate `params` and build a runner.
    ///
    /// # Errors
    /// Returns the [`ValidationErrors`](crate::validation::ValidationErrors)
    /// (inside `anyhow::Error`) when any parameter is invalid. Nothing has
    /// been spawned at that point.
    pub fn new(params: &RunParams) -> Result<Self> {
        debug!(state = %RunState::Validating, ?params, "validating run parameters");
        match params.plan() {
            Ok(plan) => Ok(Self::from_plan(plan)),
            Err(errors) => {
                debug!(state = %RunState::Rejected, %errors, "run rejected");
                Err(errors.into())
            }
        }
    }

    #[must_use]
    pub fn from_plan(plan: RunPlan) -> Self {
        Self {
            plan,
            filter: plan.filter.into_filter(),
            cancel: CancelSignal::new(),
        }
    }

    /// Replace the plan's built-in filter with a custom one.
    #[must_use]
    pub fn with_filter(mut self, filter: impl IdFilter + 'static) -> Self {
        self.filter = Box::new(filter);
        self
    }

    #[must_use]
    pub fn plan(&self) -> &RunPlan {
        &self.plan
    }

    /// Handle to cancel the run from outside (e.g. another thread).
    #[must_use]
    pub fn cancel_signal(&self) -> CancelSignal {
        self.cancel.clone()
    }

    /// Execute the run over `reader` and collect the accepted records.
    ///
    /// # Errors
    /// Only if a pipeline thread panicked; read errors on `reader` are
    /// reported through [`RunReport::source_error`] instead.
    pub fn run<R: BufRead + Send>(self, reader: R) -> Result<RunReport> {
        let Runner {
            plan,
            filter,
            cancel,
        } = self;
        let filter: &dyn IdFilter = filter.as_ref();
        let cancel = &cancel;

        debug!(
            state = %RunState::Running,
            workers = plan.workers,
            filter = filter.name(),
            quota = ?plan.quota,
            per_worker_cap = ?plan.per_worker_cap,
            "starting run"
        );

        let (line_tx, line_rx) = bounded::<String>(0);
        let (result_tx, result_rx) = bounded::<Accepted>(0);

        let (source, workers, collected) = thread::scope(|s| {
            let source = s.spawn(move || LineSource::new(reader).pump(line_tx, cancel));

            let mut handles = Vec::with_capacity(plan.workers);
            for id in 0..plan.workers {
                let lines = line_rx.clone();
                let results = result_tx.clone();
                handles.push(s.spawn(move || {
                    run_worker(id, lines, results, filter, plan.per_worker_cap, cancel)
                }));
            }
            // Only workers may hold these; the source sees a hang-up once they
            // are all gone and the aggregator sees end-of-stream likewise.
            drop(line_rx);
            drop(result_tx);

            let aggregator =
                s.spawn(move || aggregate(result_rx, plan.quota, plan.workers, cancel));

            debug!(state = %RunState::Draining, "waiting for workers");
            let workers: Vec<thread::Result<WorkerSummary>> =
                handles.into_iter().map(|h| h.join()).collect();
            let collected = aggregator.join();
            let source = source.join();
            (source, workers, collected)
        });

        let mut summaries = Vec::with_capacity(workers.len());
        for joined in workers {
            summaries.push(joined.map_err(|_| anyhow!("worker thread panicked"))?);
        }
        let Aggregate {
            records,
            per_worker,
            quota_reached,
        } = collected.map_err(|_| anyhow!("aggregator thread panicked"))?;
        let SourceSummary {
            lines,
            error,
            stopped_early,
        } =
            source.map_err(|_| anyhow!("line source thread panicked"))?;

        if let Some(ref e) = error {
            warn!(error = %e, records = records.len(), "run completed on truncated input");
        }
        debug!(
            state = %RunState::Completed,
            records = records.len(),
            lines_read = lines,
            stopped_early,
            consumed = summaries.iter().map(|w| w.consumed).sum::<usize>(),
            "run completed"
        );

        Ok(RunReport {
            records,
            per_worker,
            workers: plan.workers,
            lines_read: lines,
            quota_reached,
            source_error: error,
            stopped_early,
        })
    }
}

/// Validate `params` and run them over `reader` in one call.
///
/// # Errors
/// See [`Runner::new`] and [`Runner::run`].
pub fn read_concurrent<R: BufRead + Send>(reader: R, params: &RunParams) -> Result<RunReport> {
    Runner::new(params)?.run(reader)
}
