use std::collections::HashMap;
use std::sync::RwLock;

use super::{ranked_matches, validate_word, StoreError, WordRecord, WordStore};

/// Non-persistent store. Used by tests and as a scratch dictionary.
#[derive(Debug, Default)]
pub struct MemoryStore {
    words: RwLock<HashMap<String, u32>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records<I: IntoIterator<Item = WordRecord>>(records: I) -> Self {
        let mut words = HashMap::new();
        for rec in records {
            words.entry(rec.word).or_insert(rec.frequency);
        }
        Self {
            words: RwLock::new(words),
        }
    }

    pub fn frequency(&self, word: &str) -> Option<u32> {
        let map = self.words.read().unwrap_or_else(|e| e.into_inner());
        map.get(word).copied()
    }
}

impl WordStore for MemoryStore {
    fn contains(&self, word: &str) -> Result<bool, StoreError> {
        let map = self.words.read().unwrap_or_else(|e| e.into_inner());
        Ok(map.contains_key(word))
    }

    fn insert(&self, word: &str, frequency: u32) -> Result<(), StoreError> {
        validate_word(word)?;
        let mut map = self.words.write().unwrap_or_else(|e| e.into_inner());
        if map.contains_key(word) {
            return Err(StoreError::Conflict(word.to_string()));
        }
        map.insert(word.to_string(), frequency);
        Ok(())
    }

    fn query(&self, prefix: &str, limit: usize) -> Result<Vec<WordRecord>, StoreError> {
        let map = self.words.read().unwrap_or_else(|e| e.into_inner());
        Ok(ranked_matches(map.iter(), prefix, limit))
    }

    fn clear(&self) -> Result<(), StoreError> {
        let mut map = self.words.write().unwrap_or_else(|e| e.into_inner());
        map.clear();
        Ok(())
    }

    fn len(&self) -> Result<usize, StoreError> {
        let map = self.words.read().unwrap_or_else(|e| e.into_inner());
        Ok(map.len())
    }
}
