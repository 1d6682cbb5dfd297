//! Reading source text files for ingestion.

use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

use crate::error::InputError;

/// Read the whole file at `path` as raw bytes. Decoding is left to the
/// tokenizer.
pub fn read_source(path: &Path) -> Result<Vec<u8>, InputError> {
    if path.as_os_str().is_empty() {
        return Err(InputError::EmptyPath);
    }
    if !path.is_file() {
        return Err(InputError::NotFound(path.to_path_buf()));
    }
    match fs::read(path) {
        Ok(bytes) => {
            debug!(path = %path.display(), bytes = bytes.len(), "read source");
            Ok(bytes)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(InputError::NotFound(path.to_path_buf()))
        }
        Err(source) => Err(InputError::Unreadable {
            path: path.to_path_buf(),
            source,
        }),
    }
}
