pub mod autocomplete;
pub mod dictionary;
pub mod frequency;
pub mod settings;
pub mod store;
pub mod tokenizer;

#[cfg(test)]
mod tests;

pub use autocomplete::AutocompleteEngine;
pub use dictionary::{DictionaryManager, IngestReport};
pub use frequency::{aggregate, aggregate_with, Candidate, TokenCounts};
pub use store::{FileStore, MemoryStore, StoreError, WordRecord, WordStore};
pub use tokenizer::{lowercase, tokenize, tokenize_str, TokenizeError};
