//! Testing utilities for charbeam runs.
//!
//! - **Assertions**: membership and bound checks over run results
//! - **Fixtures**: sample characters and ready-made input lines
//! - **Mock I/O**: readers that fail or count, temporary store folders
//!
//! # Quick Start
//!
//! ```
//! use charbeam::testing::*;
//! use charbeam::{RunParams, read_concurrent};
//! use std::io::Cursor;
//!
//! # fn main() -> anyhow::Result<()> {
//! let input = document(&lines_for_ids(1..=6));
//! let report = read_concurrent(Cursor::new(input), &RunParams::new("even"))?;
//! assert_ids_unordered(&report.records, &[2, 4, 6]);
//! # Ok(())
//! # }
//! ```

pub mod assertions;
pub mod fixtures;
pub mod mock_io;

pub use assertions::*;
pub use fixtures::*;
pub use mock_io::*;
