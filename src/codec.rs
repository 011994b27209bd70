//! Record codec: single-line decoding for the pipeline workers and
//! format dispatch for whole documents.

use crate::error::StoreError;
use crate::io::csv::{parse_row, read_csv, write_csv};
use crate::io::json::{read_json, write_json, write_json_object};
use crate::record::{Character, CharacterList};
use anyhow::Result;
use csv::ReaderBuilder;
use std::fmt;
use std::io::{Read, Write};
use std::str::FromStr;

/// Decode one CSV line into a [`Character`].
///
/// Never fails: anything that does not map onto a record (wrong field count,
/// non-numeric or zero id, a header row, blank input, broken quoting) comes
/// back as `Character::default()`, whose id `0` tells the caller to drop it.
#[must_use]
pub fn decode_line(line: &str) -> Character {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());
    match rdr.records().next() {
        Some(Ok(rec)) => parse_row(&rec, 1).unwrap_or_default(),
        _ => Character::default(),
    }
}

/// The two interchangeable document encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    Csv,
    #[default]
    Json,
}

impl Format {
    /// File extension, without the dot.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Format::Csv => "csv",
            Format::Json => "json",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for Format {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Format::Csv),
            "json" => Ok(Format::Json),
            other => Err(StoreError::InvalidFormat(other.to_string())),
        }
    }
}

/// Encode `data` to `writer` in the given format. Returns the item count.
///
/// # Errors
/// Propagates serialization and I/O failures.
pub fn encode<W: Write>(format: Format, writer: W, data: &[Character]) -> Result<usize> {
    match format {
        Format::Csv => write_csv(writer, data),
        Format::Json => write_json(writer, data),
    }
}

/// Encode a single record: a bare object in JSON, a header plus one row in
/// CSV.
///
/// # Errors
/// Propagates serialization and I/O failures.
pub fn encode_one<W: Write>(format: Format, writer: W, character: &Character) -> Result<()> {
    match format {
        Format::Csv => write_csv(writer, std::slice::from_ref(character)).map(|_| ()),
        Format::Json => write_json_object(writer, character),
    }
}

/// Decode a whole document from `reader` in the given format.
///
/// # Errors
/// Propagates parse and I/O failures; empty documents are an error.
pub fn decode<R: Read>(format: Format, reader: R) -> Result<CharacterList> {
    match format {
        Format::Csv => read_csv(reader),
        Format::Json => read_json(reader),
    }
}
