use std::fs;
use std::io::Write;
use std::path::Path;

use wordfreq_core::settings;

use crate::error::{CommandError, InputError};

fn read_toml(path: &Path) -> Result<String, InputError> {
    fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            InputError::NotFound(path.to_path_buf())
        } else {
            InputError::Unreadable {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

pub fn settings_export(out: &mut dyn Write) -> Result<(), CommandError> {
    write!(out, "{}", settings::default_toml())?;
    Ok(())
}

pub fn settings_validate(path: &Path, out: &mut dyn Write) -> Result<(), CommandError> {
    let content = read_toml(path)?;
    let s = settings::parse_settings_toml(&content)?;
    writeln!(
        out,
        "OK: filter.min_count={}, filter.min_len={}, filter.max_len={}, autocomplete.max_results={}, store.compact_threshold={}",
        s.filter.min_count,
        s.filter.min_len,
        s.filter.max_len,
        s.autocomplete.max_results,
        s.store.compact_threshold
    )?;
    Ok(())
}

/// Install the settings file at `path` for the rest of the process.
/// Must run before anything reads the settings.
pub fn load_settings(path: &Path) -> Result<(), CommandError> {
    let content = read_toml(path)?;
    settings::init_custom(content)?;
    Ok(())
}
