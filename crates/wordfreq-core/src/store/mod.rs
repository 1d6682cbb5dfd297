//! Backing storage for the frequent-word dictionary.
//!
//! `WordStore` is the contract the dictionary manager and the autocomplete
//! engine are written against. `insert` must enforce word uniqueness
//! atomically: of two inserts of the same word, at most one succeeds and the
//! other gets `StoreError::Conflict`.
//!
//! - `MemoryStore`: HashMap behind an `RwLock`, nothing persisted.
//! - `FileStore`: checkpoint file plus a CRC-framed write-ahead log.

mod file;
mod memory;
mod wal;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::cmp::Reverse;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Longest word (in characters) a store accepts.
pub const MAX_WORD_CHARS: usize = 200;

/// A stored dictionary row. The frequency is fixed when the row is created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WordRecord {
    pub word: String,
    pub frequency: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("word already exists: {0}")]
    Conflict(String),

    #[error("invalid word {word:?}: {reason}")]
    InvalidWord { word: String, reason: &'static str },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("corrupt store: {0}")]
    Corrupt(String),

    #[error("serialization error: {0}")]
    Serialize(bincode::Error),
}

impl StoreError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Conflict(_))
    }
}

pub trait WordStore: Send + Sync {
    fn contains(&self, word: &str) -> Result<bool, StoreError>;

    /// Insert a new record. Fails with `StoreError::Conflict` if `word` is
    /// already present; existing records are never overwritten.
    fn insert(&self, word: &str, frequency: u32) -> Result<(), StoreError>;

    /// Records whose word starts with `prefix`, ordered by frequency
    /// descending then word ascending, at most `limit` of them.
    fn query(&self, prefix: &str, limit: usize) -> Result<Vec<WordRecord>, StoreError>;

    /// Remove every record. On error the store keeps its previous contents.
    fn clear(&self) -> Result<(), StoreError>;

    fn len(&self) -> Result<usize, StoreError>;

    fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

/// `path` with `suffix` appended to its full file name, so `words.wfdb` and
/// `words.db` in one directory never share a sibling.
pub(crate) fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

/// Check the field constraints shared by every store.
pub fn validate_word(word: &str) -> Result<(), StoreError> {
    if word.is_empty() {
        return Err(StoreError::InvalidWord {
            word: word.to_string(),
            reason: "must not be empty",
        });
    }
    if word.chars().count() > MAX_WORD_CHARS {
        return Err(StoreError::InvalidWord {
            word: word.to_string(),
            reason: "longer than 200 characters",
        });
    }
    Ok(())
}

/// Prefix match over a word → frequency map, ranked by (frequency desc, word asc).
pub(crate) fn ranked_matches<'a, I>(entries: I, prefix: &str, limit: usize) -> Vec<WordRecord>
where
    I: IntoIterator<Item = (&'a String, &'a u32)>,
{
    if limit == 0 {
        return Vec::new();
    }
    let mut matches: Vec<(&String, u32)> = entries
        .into_iter()
        .filter(|(word, _)| word.starts_with(prefix))
        .map(|(word, &frequency)| (word, frequency))
        .collect();
    matches.sort_unstable_by_key(|&(word, frequency)| (Reverse(frequency), word));
    matches.truncate(limit);
    matches
        .into_iter()
        .map(|(word, frequency)| WordRecord {
            word: word.clone(),
            frequency,
        })
        .collect()
}
