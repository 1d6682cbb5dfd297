use std::io;
use std::path::PathBuf;

use wordfreq_core::settings::SettingsError;
use wordfreq_core::{StoreError, TokenizeError};

/// Problems with what the user asked for. Raised before the dictionary is
/// touched, so no partial update can follow from one of these.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("not enough arguments for {command}: missing <{argument}>")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("invalid {argument} {value:?}: expected a positive integer")]
    InvalidNumber {
        argument: &'static str,
        value: String,
    },

    #[error("source path must not be empty")]
    EmptyPath,

    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("cannot read {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: TokenizeError,
    },
}

/// Everything a command can fail with, reported at the command boundary.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("{failed} word(s) could not be stored")]
    PartialIngest { failed: usize },

    #[error("output error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
