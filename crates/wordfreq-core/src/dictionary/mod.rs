//! Additive dictionary updates.
//!
//! A word is inserted only if the store doesn't hold it yet; a known word is
//! skipped and keeps the frequency it was created with. Every candidate is
//! handled on its own, so a storage failure on one word doesn't stop the rest
//! of the batch.

#[cfg(test)]
mod tests;

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::{debug, debug_span, info, warn};

use crate::frequency::{aggregate, Candidate};
use crate::store::{StoreError, WordStore};
use crate::tokenizer::{tokenize, TokenizeError};

/// Per-word outcome of one ingestion.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    pub inserted: BTreeSet<String>,
    pub skipped: BTreeSet<String>,
    /// word → error message
    pub failed: BTreeMap<String, String>,
}

impl IngestReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn total(&self) -> usize {
        self.inserted.len() + self.skipped.len() + self.failed.len()
    }
}

pub struct DictionaryManager<'a> {
    store: &'a dyn WordStore,
}

impl<'a> DictionaryManager<'a> {
    pub fn new(store: &'a dyn WordStore) -> Self {
        Self { store }
    }

    /// Merge `candidates` into the store: insert unknown words, skip known ones.
    pub fn ingest<I>(&self, candidates: I) -> IngestReport
    where
        I: IntoIterator<Item = Candidate>,
    {
        let _span = debug_span!("ingest").entered();
        let mut report = IngestReport::default();

        for Candidate { word, frequency } in candidates {
            match self.store.contains(&word) {
                Ok(true) => {
                    debug!(word = %word, "already in dictionary, skipped");
                    report.skipped.insert(word);
                }
                Ok(false) => match self.store.insert(&word, frequency) {
                    Ok(()) => {
                        debug!(word = %word, frequency, "inserted");
                        report.inserted.insert(word);
                    }
                    Err(StoreError::Conflict(_)) => {
                        debug!(word = %word, "inserted concurrently, skipped");
                        report.skipped.insert(word);
                    }
                    Err(e) => {
                        warn!(word = %word, "insert failed: {e}");
                        report.failed.insert(word, e.to_string());
                    }
                },
                Err(e) => {
                    warn!(word = %word, "existence check failed: {e}");
                    report.failed.insert(word, e.to_string());
                }
            }
        }

        info!(
            inserted = report.inserted.len(),
            skipped = report.skipped.len(),
            failed = report.failed.len(),
            "ingest finished"
        );
        report
    }

    /// Tokenize, aggregate and ingest raw text. Undecodable text is rejected
    /// before the store is touched.
    pub fn ingest_text(&self, text: &[u8]) -> Result<IngestReport, TokenizeError> {
        let tokens = tokenize(text)?;
        Ok(self.ingest(aggregate(tokens)))
    }

    /// Remove every word from the dictionary.
    pub fn cleanup(&self) -> Result<(), StoreError> {
        let _span = debug_span!("cleanup").entered();
        self.store.clear()?;
        info!("dictionary cleared");
        Ok(())
    }
}
