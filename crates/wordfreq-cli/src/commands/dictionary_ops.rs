use std::io::Write;
use std::path::Path;

use wordfreq_core::{DictionaryManager, IngestReport, WordStore};

use super::Options;
use crate::error::{CommandError, InputError};
use crate::source::read_source;

/// CREATE and UPDATE run the same additive ingestion; only the banner differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Create,
    Update,
}

impl Mode {
    fn describe(self) -> &'static str {
        match self {
            Mode::Create => "Creating dictionary from",
            Mode::Update => "Updating dictionary from",
        }
    }
}

pub fn ingest_file(
    store: &dyn WordStore,
    path: &Path,
    mode: Mode,
    opts: &Options,
    out: &mut dyn Write,
) -> Result<(), CommandError> {
    let text = read_source(path)?;
    if !opts.json {
        writeln!(out, "{} {}", mode.describe(), path.display())?;
    }

    let report = DictionaryManager::new(store)
        .ingest_text(&text)
        .map_err(|source| InputError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

    if opts.json {
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
    } else {
        print_report(&report, opts.verbose, out)?;
    }

    if report.is_clean() {
        Ok(())
    } else {
        Err(CommandError::PartialIngest {
            failed: report.failed.len(),
        })
    }
}

fn print_report(report: &IngestReport, verbose: bool, out: &mut dyn Write) -> Result<(), CommandError> {
    if verbose {
        for word in &report.inserted {
            writeln!(out, "Added: {word}")?;
        }
        for word in &report.skipped {
            writeln!(out, "Already exists: {word}")?;
        }
    }
    for (word, error) in &report.failed {
        writeln!(out, "Failed: {word} ({error})")?;
    }
    writeln!(
        out,
        "{} added, {} already present, {} failed",
        report.inserted.len(),
        report.skipped.len(),
        report.failed.len()
    )?;
    Ok(())
}

pub fn cleanup(store: &dyn WordStore, out: &mut dyn Write) -> Result<(), CommandError> {
    let removed = store.len()?;
    DictionaryManager::new(store).cleanup()?;
    writeln!(out, "Dictionary cleared ({removed} words removed)")?;
    Ok(())
}
