//! Splits raw text into lowercase word tokens.

use tracing::debug;

/// Characters that separate tokens. Everything else, including other
/// punctuation, stays part of the token.
pub const DELIMITERS: [char; 6] = [' ', '\r', '\n', '.', ',', '"'];

const UTF8_BOM: &str = "\u{FEFF}";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenizeError {
    #[error("input is not valid UTF-8 (first invalid byte at offset {valid_up_to})")]
    InvalidUtf8 { valid_up_to: usize },
}

pub fn is_delimiter(c: char) -> bool {
    DELIMITERS.contains(&c)
}

/// Decode `text` as UTF-8 and split it into tokens.
pub fn tokenize(text: &[u8]) -> Result<Vec<String>, TokenizeError> {
    let decoded = std::str::from_utf8(text).map_err(|e| TokenizeError::InvalidUtf8 {
        valid_up_to: e.valid_up_to(),
    })?;
    let tokens = tokenize_str(decoded);
    debug!(bytes = text.len(), tokens = tokens.len(), "tokenized");
    Ok(tokens)
}

/// Lowercase each character on its own, without context rules such as the
/// Greek final sigma, so a word folds the same whatever follows it.
pub fn lowercase(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}

/// Lowercase `text` and split it on [`DELIMITERS`], dropping empty tokens.
pub fn tokenize_str(text: &str) -> Vec<String> {
    let text = text.strip_prefix(UTF8_BOM).unwrap_or(text);
    lowercase(text)
        .split(is_delimiter)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
