//! Identifier filters applied by the worker pool.
//!
//! The pool only ever sees `&dyn IdFilter`, so a new policy is a new type
//! implementing the trait; see [`Runner::with_filter`](crate::Runner::with_filter).

use crate::record::CharacterId;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Accept/reject rule over a record identifier. Must be pure: the same id
/// always gets the same answer, from any thread.
pub trait IdFilter: Send + Sync {
    /// `true` to keep a record with this id.
    fn accept(&self, id: CharacterId) -> bool;

    /// Short name used in logs.
    fn name(&self) -> &str;
}

/// Keep even identifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct EvenIds;

impl IdFilter for EvenIds {
    fn accept(&self, id: CharacterId) -> bool {
        id % 2 == 0
    }

    fn name(&self) -> &str {
        "even"
    }
}

/// Keep odd identifiers; the complement of [`EvenIds`].
#[derive(Debug, Clone, Copy, Default)]
pub struct OddIds;

impl IdFilter for OddIds {
    fn accept(&self, id: CharacterId) -> bool {
        !EvenIds.accept(id)
    }

    fn name(&self) -> &str {
        "odd"
    }
}

/// The built-in policies a caller can select by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Even,
    Odd,
}

impl FilterKind {
    /// Resolve to the filter capability handed to the pool.
    #[must_use]
    pub fn into_filter(self) -> Box<dyn IdFilter> {
        match self {
            FilterKind::Even => Box::new(EvenIds),
            FilterKind::Odd => Box::new(OddIds),
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FilterKind::Even => "even",
            FilterKind::Odd => "odd",
        })
    }
}

/// Unknown policy name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown filter '{0}', expected even or odd")]
pub struct UnknownFilter(pub String);

impl FromStr for FilterKind {
    type Err = UnknownFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "even" => Ok(FilterKind::Even),
            "odd" => Ok(FilterKind::Odd),
            other => Err(UnknownFilter(other.to_string())),
        }
    }
}

