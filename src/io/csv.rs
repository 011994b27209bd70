//! CSV encoding of character lists.
//!
//! This module provides:
//! - **Typed list I/O** over any reader/writer: [`read_csv`] and [`write_csv`]
//! - **Row mapping** shared with the single-line pipeline decoder
//!
//! # Design notes
//! - Rows are positional: `ID,Name,Species,Type,Gender,Image,Url,Created`.
//! - The header row is optional on read (detected by exact match) and always
//!   written on write, even for an empty list.
//! - Quoted fields follow RFC 4180 via the `csv` crate.

use crate::error::CodecError;
use crate::record::{CHARACTER_HEADER, Character, CharacterList};
use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use std::io::{Read, Write};

/// Read a CSV document into a [`CharacterList`].
///
/// * A first row equal to [`CHARACTER_HEADER`] is skipped.
/// * Errors are annotated with row numbers for easier debugging.
///
/// # Errors
/// Returns [`CodecError::Empty`] for a document without rows, and an error
/// for any row that is not valid CSV or does not map onto a [`Character`].
pub fn read_csv<R: Read>(reader: R) -> Result<CharacterList> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut out = CharacterList::new();
    let mut seen_rows = 0usize;
    for (i, rec) in rdr.records().enumerate() {
        let rec = rec.with_context(|| format!("read CSV record #{}", i + 1))?;
        seen_rows += 1;
        if i == 0 && is_header(&rec) {
            continue;
        }
        let character =
            parse_row(&rec, i + 1).with_context(|| format!("parse CSV record #{}", i + 1))?;
        out.push(character);
    }
    if seen_rows == 0 {
        return Err(CodecError::Empty.into());
    }
    Ok(out)
}

/// Write a character slice as CSV, header first.
///
/// # Returns
/// The number of rows written, header excluded (i.e. `data.len()`).
///
/// # Errors
/// Returns an error if any row fails to serialize or the writer fails to flush.
pub fn write_csv<W: Write>(writer: W, data: &[Character]) -> Result<usize> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(CHARACTER_HEADER)
        .context("write CSV header")?;
    for (i, row) in data.iter().enumerate() {
        wtr.serialize(row)
            .with_context(|| format!("serialize CSV row #{}", i + 1))?;
    }
    wtr.flush()?;
    Ok(data.len())
}

fn is_header(rec: &StringRecord) -> bool {
    rec.len() == CHARACTER_HEADER.len()
        && rec
            .iter()
            .zip(CHARACTER_HEADER)
            .all(|(field, name)| field.trim() == name)
}

/// Map one positional row onto a [`Character`]. `row` is 1-based and only
/// used for error reporting.
pub(crate) fn parse_row(rec: &StringRecord, row: usize) -> Result<Character, CodecError> {
    if rec.len() != CHARACTER_HEADER.len() {
        return Err(CodecError::FieldCount {
            row,
            found: rec.len(),
            expected: CHARACTER_HEADER.len(),
        });
    }
    let raw_id = rec[0].trim();
    let id = match raw_id.parse::<u64>() {
        Ok(id) if id > 0 => id,
        _ => {
            return Err(CodecError::InvalidId {
                row,
                value: raw_id.to_string(),
            });
        }
    };
    Ok(Character {
        id,
        name: rec[1].to_string(),
        species: rec[2].to_string(),
        kind: rec[3].to_string(),
        gender: rec[4].to_string(),
        image: rec[5].to_string(),
        url: rec[6].to_string(),
        created: rec[7].to_string(),
    })
}
