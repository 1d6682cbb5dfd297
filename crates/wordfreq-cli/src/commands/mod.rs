//! Command keywords accepted on the command line and their dispatch.
//!
//! Keywords are case-insensitive. An unknown keyword or a missing argument
//! is reported without touching the dictionary.

pub mod config_ops;
pub mod dictionary_ops;
pub mod query_ops;

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;
use wordfreq_core::{FileStore, WordStore};

use crate::error::{CommandError, InputError};

pub const USAGE: &str = "\
Usage: wordfreq [OPTIONS] [COMMAND] [ARGS]...

Commands:
  CREATE <path>              Add frequent words from a UTF-8 text file
  UPDATE <path>              Same as CREATE
  CLEANUP                    Remove every word from the dictionary
  QUERY <prefix> [limit]     Print ranked completions for a prefix
  LIST [limit]               Print the dictionary, most frequent first
  SETTINGS-EXPORT            Print the default settings TOML
  SETTINGS-VALIDATE <file>   Check a custom settings TOML

Without a command, wordfreq starts interactive autocomplete.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Create(PathBuf),
    Update(PathBuf),
    Cleanup,
    Query {
        prefix: String,
        limit: Option<usize>,
    },
    List {
        limit: Option<usize>,
    },
    SettingsExport,
    SettingsValidate(PathBuf),
}

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("unsupported command: {0}")]
    Unrecognized(String),
    #[error(transparent)]
    Input(#[from] InputError),
}

impl Command {
    pub fn parse(keyword: &str, args: &[String]) -> Result<Self, ParseError> {
        let command = match keyword.to_uppercase().as_str() {
            "CREATE" => Command::Create(required(args, 0, "CREATE", "path")?.into()),
            "UPDATE" => Command::Update(required(args, 0, "UPDATE", "path")?.into()),
            "CLEANUP" => Command::Cleanup,
            "QUERY" => Command::Query {
                prefix: required(args, 0, "QUERY", "prefix")?.to_string(),
                limit: optional_limit(args, 1)?,
            },
            "LIST" => Command::List {
                limit: optional_limit(args, 0)?,
            },
            "SETTINGS-EXPORT" => Command::SettingsExport,
            "SETTINGS-VALIDATE" => {
                Command::SettingsValidate(required(args, 0, "SETTINGS-VALIDATE", "file")?.into())
            }
            _ => return Err(ParseError::Unrecognized(keyword.to_string())),
        };
        Ok(command)
    }
}

fn required<'a>(
    args: &'a [String],
    index: usize,
    command: &'static str,
    argument: &'static str,
) -> Result<&'a str, InputError> {
    args.get(index)
        .map(String::as_str)
        .ok_or(InputError::MissingArgument { command, argument })
}

fn optional_limit(args: &[String], index: usize) -> Result<Option<usize>, InputError> {
    let Some(raw) = args.get(index) else {
        return Ok(None);
    };
    match raw.parse::<usize>() {
        Ok(n) if n > 0 => Ok(Some(n)),
        _ => Err(InputError::InvalidNumber {
            argument: "limit",
            value: raw.clone(),
        }),
    }
}

/// Options shared by every command.
#[derive(Debug, Clone)]
pub struct Options {
    pub db: PathBuf,
    pub verbose: bool,
    pub json: bool,
}

pub fn default_store_path() -> PathBuf {
    match std::env::var_os("HOME") {
        Some(home) => Path::new(&home).join(".local/share/wordfreq/dictionary.wfdb"),
        None => PathBuf::from("dictionary.wfdb"),
    }
}

pub fn open_store(path: &Path) -> Result<FileStore, CommandError> {
    let store = FileStore::open(path)?;
    debug!(
        path = %store.path().display(),
        words = store.len()?,
        pending = store.pending_entries(),
        "opened dictionary"
    );
    Ok(store)
}

/// Run `command`, writing user-facing output to `out`.
pub fn execute(command: Command, opts: &Options, out: &mut dyn Write) -> Result<(), CommandError> {
    match command {
        Command::Create(path) => {
            let store = open_store(&opts.db)?;
            dictionary_ops::ingest_file(&store, &path, dictionary_ops::Mode::Create, opts, out)
        }
        Command::Update(path) => {
            let store = open_store(&opts.db)?;
            dictionary_ops::ingest_file(&store, &path, dictionary_ops::Mode::Update, opts, out)
        }
        Command::Cleanup => {
            let store = open_store(&opts.db)?;
            dictionary_ops::cleanup(&store, out)
        }
        Command::Query { prefix, limit } => {
            let store = open_store(&opts.db)?;
            query_ops::query(&store, &prefix, limit, opts, out)
        }
        Command::List { limit } => {
            let store = open_store(&opts.db)?;
            query_ops::list(&store, limit, opts, out)
        }
        Command::SettingsExport => config_ops::settings_export(out),
        Command::SettingsValidate(path) => config_ops::settings_validate(&path, out),
    }
}
