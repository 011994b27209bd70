//! Parameters of one concurrent read.

use crate::filter::FilterKind;
use crate::validation::{
    Validate, ValidationError, ValidationErrors, ValidationResult, combine_validations,
    validators,
};
use serde::{Deserialize, Serialize};

/// Worker count used when the requested one is out of range.
pub const DEFAULT_WORKERS: usize = 2;
/// Largest worker count accepted as-is.
pub const MAX_WORKERS: usize = 3;

const FILTER_NAMES: [&str; 2] = ["even", "odd"];

/// Run parameters as a caller supplies them (CLI flags, query strings).
///
/// `0` means "unbounded" for both `items` and `items_per_worker`. Any
/// `workers` value is accepted and normalized, see [`normalize_workers`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunParams {
    /// Filter policy name, `"even"` or `"odd"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Overall quota of accepted records.
    pub items: i64,
    /// Cap on records forwarded by a single worker.
    pub items_per_worker: i64,
    /// Requested worker count.
    pub workers: i64,
}

impl RunParams {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            items: 0,
            items_per_worker: 0,
            workers: DEFAULT_WORKERS as i64,
        }
    }

    #[must_use]
    pub fn items(mut self, items: i64) -> Self {
        self.items = items;
        self
    }

    #[must_use]
    pub fn items_per_worker(mut self, items_per_worker: i64) -> Self {
        self.items_per_worker = items_per_worker;
        self
    }

    #[must_use]
    pub fn workers(mut self, workers: i64) -> Self {
        self.workers = workers;
        self
    }

    /// Validate and turn into an executable [`RunPlan`].
    ///
    /// # Errors
    /// Returns every failing field at once.
    pub fn plan(&self) -> Result<RunPlan, ValidationErrors> {
        self.validate().map_err(ValidationErrors)?;
        let filter = self
            .kind
            .parse::<FilterKind>()
            .map_err(|e| ValidationErrors(vec![ValidationError::field("type", e.to_string())]))?;
        Ok(RunPlan {
            filter,
            quota: positive_limit(self.items),
            per_worker_cap: positive_limit(self.items_per_worker),
            workers: normalize_workers(self.workers),
        })
    }
}

impl Validate for RunParams {
    fn validate(&self) -> ValidationResult {
        combine_validations(vec![
            validators::one_of("type", &self.kind, &FILTER_NAMES),
            validators::non_negative("items", self.items),
            validators::non_negative("items_per_worker", self.items_per_worker),
        ])
    }
}

/// Validated, immutable configuration of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunPlan {
    pub filter: FilterKind,
    /// `None` drains the whole input.
    pub quota: Option<usize>,
    /// `None` lets a worker forward without limit.
    pub per_worker_cap: Option<usize>,
    /// Always within `1..=MAX_WORKERS`.
    pub workers: usize,
}

/// Map a requested worker count into `1..=MAX_WORKERS`.
///
/// Anything `<= 0` or `> MAX_WORKERS` becomes [`DEFAULT_WORKERS`]. This is a
/// normalization, not a validation failure.
#[must_use]
pub fn normalize_workers(requested: i64) -> usize {
    match usize::try_from(requested) {
        Ok(n) if (1..=MAX_WORKERS).contains(&n) => n,
        _ => DEFAULT_WORKERS,
    }
}

fn positive_limit(value: i64) -> Option<usize> {
    usize::try_from(value).ok().filter(|n| *n > 0)
}
