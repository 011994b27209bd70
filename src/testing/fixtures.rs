//! Pre-built characters and input lines.

use crate::record::Character;

/// Build a character whose descriptive fields derive from `id` and `name`.
#[must_use]
pub fn character(id: u64, name: &str) -> Character {
    Character {
        id,
        name: name.to_string(),
        species: "Human".to_string(),
        kind: String::new(),
        gender: if id % 2 == 0 { "Female" } else { "Male" }.to_string(),
        image: format!("https://rickandmortyapi.com/api/character/avatar/{id}.jpeg"),
        url: format!("https://rickandmortyapi.com/api/character/{id}"),
        created: "2017-11-04T18:48:46.250Z".to_string(),
    }
}

/// Six characters with ids `1..=6`.
///
/// # Example
///
/// ```
/// use charbeam::testing::sample_characters;
///
/// let chars = sample_characters();
/// assert_eq!(chars.len(), 6);
/// ```
#[must_use]
pub fn sample_characters() -> Vec<Character> {
    [
        (1, "Rick Sanchez"),
        (2, "Morty Smith"),
        (3, "Summer Smith"),
        (4, "Beth Smith"),
        (5, "Jerry Smith"),
        (6, "Abadango Cluster Princess"),
    ]
    .into_iter()
    .map(|(id, name)| character(id, name))
    .collect()
}

/// One CSV line per character.
#[must_use]
pub fn character_lines(characters: &[Character]) -> Vec<String> {
    characters.iter().map(Character::to_csv_entry).collect()
}

/// CSV lines for every id in `ids`, in the given order.
#[must_use]
pub fn lines_for_ids(ids: impl IntoIterator<Item = u64>) -> Vec<String> {
    ids.into_iter()
        .map(|id| character(id, &format!("Character {id}")).to_csv_entry())
        .collect()
}

/// A page document in the upstream API shape: lowercase keys, extra
/// fields the crate ignores, and an `info` block claiming `pages` pages.
#[must_use]
pub fn page_document(characters: &[Character], pages: u32) -> String {
    let results: Vec<serde_json::Value> = characters
        .iter()
        .map(|c| {
            serde_json::json!({
                "id": c.id,
                "name": c.name,
                "status": "Alive",
                "species": c.species,
                "type": c.kind,
                "gender": c.gender,
                "origin": { "name": "Earth (C-137)", "url": "" },
                "image": c.image,
                "episode": [],
                "url": c.url,
                "created": c.created
            })
        })
        .collect();
    serde_json::json!({
        "info": {
            "count": characters.len() as u64 * u64::from(pages),
            "pages": pages,
            "next": null,
            "prev": null
        },
        "results": results
    })
    .to_string()
}

/// Join lines into one newline-terminated document.
#[must_use]
pub fn document(lines: &[String]) -> String {
    let mut doc = lines.join("\n");
    if !doc.is_empty() {
        doc.push('\n');
    }
    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode_line;

    #[test]
    fn test_sample_characters() {
        let chars = sample_characters();
        assert_eq!(chars.len(), 6);
        assert!(chars.iter().all(|c| c.id > 0));
    }

    #[test]
    fn test_lines_decode_back() {
        let chars = sample_characters();
        for (line, expected) in character_lines(&chars).iter().zip(&chars) {
            assert_eq!(&decode_line(line), expected);
        }
    }

    #[test]
    fn test_document_trailing_newline() {
        assert_eq!(document(&[]), "");
        assert_eq!(document(&lines_for_ids([1, 2])).lines().count(), 2);
        assert!(document(&lines_for_ids([7])).ends_with('\n'));
    }
}
