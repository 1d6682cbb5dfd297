//! Tunables for ingestion, autocomplete and the on-disk store.
//!
//! `[filter]` decides which tokens become dictionary words (minimum count and
//! character length bounds), `[autocomplete]` caps the completions shown per
//! prefix, and `[store]` sets how many WAL entries trigger a checkpoint.
//!
//! The defaults ship inside the binary. A custom file goes through
//! `init_custom` and must be installed before the first `settings()` call;
//! after that the values are fixed for the process.

use std::sync::OnceLock;

use serde::Deserialize;

use crate::store::MAX_WORD_CHARS;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub filter: FilterSettings,
    pub autocomplete: AutocompleteSettings,
    pub store: StoreSettings,
}

/// Thresholds a token must pass to become a dictionary candidate.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FilterSettings {
    pub min_count: u32,
    pub min_len: usize,
    pub max_len: usize,
}

impl FilterSettings {
    pub fn accepts(&self, word: &str, count: u32) -> bool {
        if count < self.min_count {
            return false;
        }
        let len = word.chars().count();
        (self.min_len..=self.max_len).contains(&len)
    }
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            min_count: 3,
            min_len: 3,
            max_len: 15,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AutocompleteSettings {
    pub max_results: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreSettings {
    pub compact_threshold: usize,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_positive {
        ($section:ident . $field:ident) => {
            if s.$section.$field == 0 {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be positive".to_string(),
                });
            }
        };
    }

    check_positive!(filter.min_count);
    check_positive!(filter.min_len);
    check_positive!(filter.max_len);
    check_positive!(autocomplete.max_results);
    check_positive!(store.compact_threshold);

    if s.filter.min_len > s.filter.max_len {
        return Err(SettingsError::InvalidValue {
            field: "filter.min_len".to_string(),
            reason: format!("must not exceed filter.max_len ({})", s.filter.max_len),
        });
    }
    if s.filter.max_len > MAX_WORD_CHARS {
        return Err(SettingsError::InvalidValue {
            field: "filter.max_len".to_string(),
            reason: format!("must not exceed the stored word limit ({MAX_WORD_CHARS})"),
        });
    }

    Ok(())
}
