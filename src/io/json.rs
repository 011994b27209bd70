//! JSON encoding of character lists.
//!
//! Lists are written as a single JSON array followed by a newline. On read,
//! either an array or a lone object is accepted.

use crate::error::CodecError;
use crate::record::{Character, CharacterList};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::io::{Read, Write};

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(CharacterList),
    One(Character),
}

/// Read a JSON document into a [`CharacterList`].
///
/// # Errors
/// Returns [`CodecError::Empty`] for blank input, and a parse error with
/// line/column context for anything that is not a character or a list of them.
pub fn read_json<R: Read>(mut reader: R) -> Result<CharacterList> {
    let mut buf = String::new();
    reader
        .read_to_string(&mut buf)
        .context("read JSON document")?;
    if buf.trim().is_empty() {
        return Err(CodecError::Empty.into());
    }
    let parsed: OneOrMany = serde_json::from_str(&buf).context("parse JSON document")?;
    Ok(match parsed {
        OneOrMany::Many(list) => list,
        OneOrMany::One(one) => vec![one],
    })
}

/// Write a character slice as a JSON array.
///
/// # Returns
/// The number of items written (`data.len()`).
///
/// # Errors
/// Returns an error if serialization or the underlying writer fails.
pub fn write_json<W: Write>(mut writer: W, data: &[Character]) -> Result<usize> {
    serde_json::to_writer(&mut writer, data)
        .with_context(|| format!("serialize {} items to JSON", data.len()))?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(data.len())
}

/// Write one character as a bare JSON object followed by a newline.
///
/// # Errors
/// Returns an error if serialization or the underlying writer fails.
pub fn write_json_object<W: Write>(mut writer: W, character: &Character) -> Result<()> {
    serde_json::to_writer(&mut writer, character)
        .with_context(|| format!("serialize character {} to JSON", character.id))?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
