//! Typed errors that callers match on.
//!
//! Everything else in the crate is reported through `anyhow::Error`; these
//! variants travel inside it and can be recovered with `downcast_ref`.

use thiserror::Error;

/// Lookup and persistence failures of the record store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("character {0} not found")]
    NotFound(u64),
    #[error("id should be greater than 0, got {0}")]
    InvalidId(i64),
    #[error("page should be greater than 0, got {0}")]
    InvalidPage(i64),
    #[error("invalid format '{0}', expected csv or json")]
    InvalidFormat(String),
}

/// Failures decoding a whole document (as opposed to a single pipeline line,
/// which never fails).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("empty input")]
    Empty,
    #[error("row {row} has {found} fields, expected {expected}")]
    FieldCount {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("row {row} has an invalid id '{value}'")]
    InvalidId { row: usize, value: String },
}
