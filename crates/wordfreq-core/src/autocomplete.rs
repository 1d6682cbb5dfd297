//! Ranked prefix completion over a `WordStore`.

use tracing::{debug, debug_span};

use crate::store::{StoreError, WordRecord, WordStore};
use crate::tokenizer::lowercase;

pub struct AutocompleteEngine<'a> {
    store: &'a dyn WordStore,
}

impl<'a> AutocompleteEngine<'a> {
    pub fn new(store: &'a dyn WordStore) -> Self {
        Self { store }
    }

    /// Up to `limit` words starting with `prefix`, most frequent first,
    /// ties in lexicographic order. The prefix is matched case-insensitively.
    pub fn query(&self, prefix: &str, limit: usize) -> Result<Vec<String>, StoreError> {
        Ok(self
            .query_ranked(prefix, limit)?
            .into_iter()
            .map(|r| r.word)
            .collect())
    }

    /// Same as [`query`](Self::query), keeping the stored frequencies.
    pub fn query_ranked(&self, prefix: &str, limit: usize) -> Result<Vec<WordRecord>, StoreError> {
        let prefix = lowercase(prefix);
        let _span = debug_span!("autocomplete", prefix = %prefix, limit).entered();
        if limit == 0 {
            return Ok(Vec::new());
        }
        let records = self.store.query(&prefix, limit)?;
        debug!(matches = records.len());
        Ok(records)
    }
}
