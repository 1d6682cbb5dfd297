use std::collections::HashSet;
use std::io;

use super::*;
use crate::store::{MemoryStore, WordRecord};

fn cand(word: &str, frequency: u32) -> Candidate {
    Candidate {
        word: word.to_string(),
        frequency,
    }
}

fn set(words: &[&str]) -> BTreeSet<String> {
    words.iter().map(|w| w.to_string()).collect()
}

/// Store whose writes fail for selected words, or entirely on `clear`.
struct FlakyStore {
    inner: MemoryStore,
    failing_words: HashSet<&'static str>,
    fail_clear: bool,
    fail_contains: bool,
}

impl FlakyStore {
    fn failing_on(words: &[&'static str]) -> Self {
        Self {
            inner: MemoryStore::new(),
            failing_words: words.iter().copied().collect(),
            fail_clear: false,
            fail_contains: false,
        }
    }
}

impl WordStore for FlakyStore {
    fn contains(&self, word: &str) -> Result<bool, StoreError> {
        if self.fail_contains {
            return Err(io::Error::other("store unreachable").into());
        }
        self.inner.contains(word)
    }

    fn insert(&self, word: &str, frequency: u32) -> Result<(), StoreError> {
        if self.failing_words.contains(word) {
            return Err(io::Error::other("disk full").into());
        }
        self.inner.insert(word, frequency)
    }

    fn query(&self, prefix: &str, limit: usize) -> Result<Vec<WordRecord>, StoreError> {
        self.inner.query(prefix, limit)
    }

    fn clear(&self) -> Result<(), StoreError> {
        if self.fail_clear {
            return Err(io::Error::other("read-only filesystem").into());
        }
        self.inner.clear()
    }

    fn len(&self) -> Result<usize, StoreError> {
        self.inner.len()
    }
}

/// Store that reports every word as absent, so inserts hit the uniqueness
/// check, as when another writer wins the race between check and insert.
struct RacingStore(MemoryStore);

impl WordStore for RacingStore {
    fn contains(&self, _word: &str) -> Result<bool, StoreError> {
        Ok(false)
    }
    fn insert(&self, word: &str, frequency: u32) -> Result<(), StoreError> {
        self.0.insert(word, frequency)
    }
    fn query(&self, prefix: &str, limit: usize) -> Result<Vec<WordRecord>, StoreError> {
        self.0.query(prefix, limit)
    }
    fn clear(&self) -> Result<(), StoreError> {
        self.0.clear()
    }
    fn len(&self) -> Result<usize, StoreError> {
        self.0.len()
    }
}

#[test]
fn ingest_inserts_new_words() {
    let store = MemoryStore::new();
    let dict = DictionaryManager::new(&store);
    let report = dict.ingest([cand("cat", 3), cand("dog", 4)]);
    assert_eq!(report.inserted, set(&["cat", "dog"]));
    assert!(report.skipped.is_empty());
    assert!(report.is_clean());
    assert_eq!(store.frequency("dog"), Some(4));
}

#[test]
fn ingest_skips_known_words_without_updating() {
    let store = MemoryStore::new();
    let dict = DictionaryManager::new(&store);
    dict.ingest([cand("cat", 3)]);
    let report = dict.ingest([cand("cat", 50), cand("dog", 4)]);
    assert_eq!(report.inserted, set(&["dog"]));
    assert_eq!(report.skipped, set(&["cat"]));
    assert_eq!(store.frequency("cat"), Some(3));
}

#[test]
fn storage_failure_does_not_abort_batch() {
    let store = FlakyStore::failing_on(&["dog"]);
    let dict = DictionaryManager::new(&store);
    let report = dict.ingest([cand("cat", 3), cand("dog", 4), cand("eel", 5)]);
    assert_eq!(report.inserted, set(&["cat", "eel"]));
    assert_eq!(report.failed.len(), 1);
    assert!(report.failed["dog"].contains("disk full"));
    assert!(!report.is_clean());
    assert_eq!(report.total(), 3);
    assert!(!store.contains("dog").unwrap());
}

#[test]
fn failed_existence_check_is_reported() {
    let mut store = FlakyStore::failing_on(&[]);
    store.fail_contains = true;
    let dict = DictionaryManager::new(&store);
    let report = dict.ingest([cand("cat", 3)]);
    assert!(report.inserted.is_empty());
    assert!(report.failed.contains_key("cat"));
}

#[test]
fn lost_insert_race_counts_as_skip() {
    let store = RacingStore(MemoryStore::new());
    store.0.insert("cat", 3).unwrap();
    let dict = DictionaryManager::new(&store);
    let report = dict.ingest([cand("cat", 9)]);
    assert_eq!(report.skipped, set(&["cat"]));
    assert!(report.is_clean());
    assert_eq!(store.0.frequency("cat"), Some(3));
}

#[test]
fn ingest_text_end_to_end() {
    let store = MemoryStore::new();
    let dict = DictionaryManager::new(&store);
    let report = dict
        .ingest_text(b"cat cat cat dog dog dog dog bird")
        .unwrap();
    assert_eq!(report.inserted, set(&["cat", "dog"]));
    assert_eq!(store.frequency("cat"), Some(3));
    assert_eq!(store.frequency("dog"), Some(4));
    assert_eq!(store.frequency("bird"), None);
}

#[test]
fn reingesting_same_text_skips_everything() {
    let store = MemoryStore::new();
    let dict = DictionaryManager::new(&store);
    let text = b"cat cat cat dog dog dog dog bird";
    dict.ingest_text(text).unwrap();
    let report = dict.ingest_text(text).unwrap();
    assert!(report.inserted.is_empty());
    assert_eq!(report.skipped, set(&["cat", "dog"]));
    assert_eq!(store.frequency("cat"), Some(3));
    assert_eq!(store.frequency("dog"), Some(4));
}

#[test]
fn invalid_utf8_leaves_store_untouched() {
    let store = MemoryStore::new();
    let dict = DictionaryManager::new(&store);
    let err = dict.ingest_text(b"cat cat cat \xC3\x28").unwrap_err();
    assert!(matches!(err, TokenizeError::InvalidUtf8 { .. }));
    assert!(store.is_empty().unwrap());
}

#[test]
fn cleanup_empties_store() {
    let store = MemoryStore::new();
    let dict = DictionaryManager::new(&store);
    dict.ingest([cand("cat", 3), cand("dog", 4)]);
    dict.cleanup().unwrap();
    assert!(store.is_empty().unwrap());
    // Words can be ingested again after cleanup, with new frequencies.
    let report = dict.ingest([cand("cat", 7)]);
    assert_eq!(report.inserted, set(&["cat"]));
    assert_eq!(store.frequency("cat"), Some(7));
}

#[test]
fn failed_cleanup_keeps_words() {
    let mut store = FlakyStore::failing_on(&[]);
    store.fail_clear = true;
    let dict = DictionaryManager::new(&store);
    dict.ingest([cand("cat", 3)]);
    assert!(dict.cleanup().is_err());
    assert!(store.contains("cat").unwrap());
}
