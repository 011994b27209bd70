//! The character record shared by every stage of the crate.

use serde::{Deserialize, Serialize};

/// Numeric identifier of a [`Character`]. `0` marks an undecodable record.
pub type CharacterId = u64;

/// A list of characters, in the order they were read or collected.
pub type CharacterList = Vec<Character>;

/// Column names, in encoding order, for both the CSV header and the JSON keys.
pub const CHARACTER_HEADER: [&str; 8] = [
    "ID", "Name", "Species", "Type", "Gender", "Image", "Url", "Created",
];

/// One character record.
///
/// `id` is strictly positive for every record that came out of a successful
/// decode. The default value (id `0`) is the "reject" sentinel produced by
/// [`decode_line`](crate::codec::decode_line) for malformed input and is never
/// forwarded by the worker pool.
///
/// Serializes with capitalized keys; lowercase keys, as served by the
/// upstream character API, are accepted on input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Character {
    #[serde(rename = "ID", alias = "id")]
    pub id: CharacterId,
    #[serde(rename = "Name", alias = "name")]
    pub name: String,
    #[serde(rename = "Species", alias = "species")]
    pub species: String,
    #[serde(rename = "Type", alias = "type")]
    pub kind: String,
    #[serde(rename = "Gender", alias = "gender")]
    pub gender: String,
    #[serde(rename = "Image", alias = "image")]
    pub image: String,
    #[serde(rename = "Url", alias = "url")]
    pub url: String,
    #[serde(rename = "Created", alias = "created")]
    pub created: String,
}

impl Character {
    /// `true` when this is the undecodable sentinel.
    #[must_use]
    pub fn is_sentinel(&self) -> bool {
        self.id == 0
    }

    /// Render as a single comma-joined line, in [`CHARACTER_HEADER`] order.
    ///
    /// Fields are joined verbatim; use [`write_csv`](crate::io::csv::write_csv)
    /// when values may contain commas or quotes.
    #[must_use]
    pub fn to_csv_entry(&self) -> String {
        [
            self.id.to_string().as_str(),
            &self.name,
            &self.species,
            &self.kind,
            &self.gender,
            &self.image,
            &self.url,
            &self.created,
        ]
        .join(",")
    }
}
