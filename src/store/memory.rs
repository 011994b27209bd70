use crate::error::StoreError;
use crate::record::{Character, CharacterId};
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory table of characters keyed by id.
///
/// Safe to share behind an `Arc`; reads take a shared lock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    db: RwLock<HashMap<CharacterId, Character>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace every entry; the last occurrence of an id wins.
    pub fn upsert<I>(&self, entries: I)
    where
        I: IntoIterator<Item = Character>,
    {
        let mut db = self.db.write().unwrap_or_else(std::sync::PoisonError::into_inner);
        for character in entries {
            db.insert(character.id, character);
        }
    }

    /// # Errors
    /// [`StoreError::NotFound`] when no entry has this id.
    pub fn get(&self, id: CharacterId) -> Result<Character, StoreError> {
        let db = self.db.read().unwrap_or_else(std::sync::PoisonError::into_inner);
        db.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.db.read().map_or(0, |db| db.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
