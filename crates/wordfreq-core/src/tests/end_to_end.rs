//! Full pipeline: text → tokens → candidates → store → completions.

use super::snapshot;
use crate::autocomplete::AutocompleteEngine;
use crate::dictionary::DictionaryManager;
use crate::frequency::{aggregate, Candidate};
use crate::store::{FileStore, MemoryStore, WordStore};
use crate::tokenizer::tokenize;

const SAMPLE: &[u8] = b"cat cat cat dog dog dog dog bird";

#[test]
fn sample_text_pipeline() {
    let tokens = tokenize(SAMPLE).unwrap();
    let candidates = aggregate(&tokens);
    assert_eq!(
        candidates,
        vec![
            Candidate {
                word: "cat".into(),
                frequency: 3
            },
            Candidate {
                word: "dog".into(),
                frequency: 4
            },
        ]
    );

    let store = MemoryStore::new();
    DictionaryManager::new(&store).ingest(candidates);
    let engine = AutocompleteEngine::new(&store);
    assert_eq!(engine.query("c", 5).unwrap(), ["cat"]);
    assert_eq!(engine.query("d", 5).unwrap(), ["dog"]);
    assert!(engine.query("b", 5).unwrap().is_empty());
}

#[test]
fn mixed_case_and_punctuation() {
    let text = "The cat. THE CAT, the \"cat\"\r\nThe dog.";
    let store = MemoryStore::new();
    let report = DictionaryManager::new(&store)
        .ingest_text(text.as_bytes())
        .unwrap();
    assert_eq!(report.inserted.len(), 2);
    assert_eq!(snapshot(&store), [("cat".to_string(), 3), ("the".to_string(), 4)]);
}

#[test]
fn create_then_update_is_additive() {
    let store = MemoryStore::new();
    let dict = DictionaryManager::new(&store);
    dict.ingest_text(SAMPLE).unwrap();
    let report = dict
        .ingest_text(b"dog dog dog dog dog eel eel eel")
        .unwrap();
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.inserted.len(), 1);
    assert_eq!(
        snapshot(&store),
        [
            ("cat".to_string(), 3),
            ("dog".to_string(), 4),
            ("eel".to_string(), 3)
        ]
    );
}

#[test]
fn file_store_pipeline_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dict.wfdb");
    {
        let store = FileStore::open_with(&path, 100).unwrap();
        DictionaryManager::new(&store).ingest_text(SAMPLE).unwrap();
    }
    let store = FileStore::open_with(&path, 100).unwrap();
    let report = DictionaryManager::new(&store).ingest_text(SAMPLE).unwrap();
    assert!(report.inserted.is_empty());
    assert_eq!(report.skipped.len(), 2);
    assert_eq!(
        AutocompleteEngine::new(&store).query("", 5).unwrap(),
        ["dog", "cat"]
    );

    DictionaryManager::new(&store).cleanup().unwrap();
    drop(store);
    let store = FileStore::open_with(&path, 100).unwrap();
    assert!(store.is_empty().unwrap());
}
