//! # Charbeam
//!
//! A **character record store** with a bounded, cancellable worker-pool reader.
//! Records are eight-field character rows (`ID,Name,Species,Type,Gender,Image,Url,Created`)
//! that can be loaded from CSV, looked up by id, persisted as numbered pages, and
//! streamed through a small pool of filtering workers.
//!
//! ## Key Features
//!
//! - **Concurrent reader** - one line source, 1 to 3 workers and an aggregator over
//!   zero-capacity channels, with a global quota and a per-worker cap
//! - **Single cancellation signal** - reaching the quota stops every stage promptly
//! - **Forgiving decoding** - malformed lines decode to a sentinel and are dropped
//! - **Pluggable filters** - even/odd id parity out of the box, or any [`IdFilter`]
//! - **Stores** - an in-memory table plus CSV/JSON page files in a folder
//! - **Pages** - API page documents decoded and stored as `character_NNN.<ext>`
//!
//! ## Quick Start
//!
//! ```
//! use charbeam::*;
//! use std::io::Cursor;
//!
//! # fn main() -> anyhow::Result<()> {
//! let input = "1,Rick,Human,,Male,,,\n2,Morty,Human,,Male,,,\n3,Summer,Human,,Female,,,\n";
//!
//! let params = RunParams::new("odd").items(1).workers(2);
//! let report = read_concurrent(Cursor::new(input), &params)?;
//!
//! assert_eq!(report.records.len(), 1);
//! assert!(report.records[0].id % 2 == 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Run parameters
//!
//! | Field              | Meaning                                             |
//! |--------------------|-----------------------------------------------------|
//! | `type`             | `"even"` or `"odd"`, selects the id filter           |
//! | `items`            | total records wanted; `0` means no limit            |
//! | `items_per_worker` | per-worker cap; `0` means no cap                    |
//! | `workers`          | `1..=3`; anything else falls back to `2`            |
//!
//! Invalid parameters are rejected before any thread starts, with the
//! offending fields listed in a [`ValidationErrors`].
//!
//! ## Storage
//!
//! A [`Service`] binds a [`Config`] (store folder and table file name) to a
//! [`MemoryStore`] and a [`FileStore`]. Build one per process and pass it
//! around; nothing in the crate is global.

pub mod aggregate;
pub mod cancel;
pub mod codec;
pub mod config;
pub mod error;
pub mod filter;
pub mod io;
pub mod page;
pub mod params;
pub mod pool;
pub mod record;
pub mod runner;
pub mod service;
pub mod source;
pub mod store;
pub mod testing;
pub mod validation;

pub use cancel::CancelSignal;
pub use codec::{Format, decode, decode_line, encode, encode_one};
pub use config::Config;
pub use error::{CodecError, StoreError};
pub use filter::{EvenIds, FilterKind, IdFilter, OddIds};
pub use page::{DocumentPage, PageDocument, PageInfo, PageSource, read_page_document};
pub use params::{RunParams, RunPlan, normalize_workers};
pub use record::{CHARACTER_HEADER, Character, CharacterId, CharacterList};
pub use runner::{RunReport, RunState, Runner, read_concurrent};
pub use service::Service;
pub use store::{FileStore, MemoryStore, page_file_name};
pub use validation::{Validate, ValidationError, ValidationErrors};
