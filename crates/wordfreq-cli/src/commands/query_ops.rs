use std::io::Write;

use serde::Serialize;
use unicode_width::UnicodeWidthStr;
use wordfreq_core::settings::settings;
use wordfreq_core::{AutocompleteEngine, WordRecord, WordStore};

use super::Options;
use crate::error::CommandError;

#[derive(Serialize)]
struct QueryOutput<'a> {
    prefix: &'a str,
    results: &'a [WordRecord],
}

pub fn query(
    store: &dyn WordStore,
    prefix: &str,
    limit: Option<usize>,
    opts: &Options,
    out: &mut dyn Write,
) -> Result<(), CommandError> {
    let limit = limit.unwrap_or(settings().autocomplete.max_results);
    let results = AutocompleteEngine::new(store).query_ranked(prefix, limit)?;

    if opts.json {
        let prefix = wordfreq_core::lowercase(prefix);
        serde_json::to_writer_pretty(
            &mut *out,
            &QueryOutput {
                prefix: &prefix,
                results: &results,
            },
        )?;
        writeln!(out)?;
        return Ok(());
    }

    if results.is_empty() {
        writeln!(out, "No completions for \"{prefix}\"")?;
    } else {
        print_table(&results, out)?;
    }
    Ok(())
}

/// Print the dictionary in ranked order, `limit` rows at most.
pub fn list(
    store: &dyn WordStore,
    limit: Option<usize>,
    opts: &Options,
    out: &mut dyn Write,
) -> Result<(), CommandError> {
    let records = store.query("", limit.unwrap_or(usize::MAX))?;

    if opts.json {
        serde_json::to_writer_pretty(&mut *out, &records)?;
        writeln!(out)?;
        return Ok(());
    }

    if records.is_empty() {
        writeln!(out, "(empty)")?;
        return Ok(());
    }
    print_table(&records, out)?;
    if opts.verbose {
        writeln!(out, "{} of {} words", records.len(), store.len()?)?;
    }
    Ok(())
}

fn print_table(records: &[WordRecord], out: &mut dyn Write) -> Result<(), CommandError> {
    let width = records.iter().map(|r| r.word.width()).max().unwrap_or(0);
    for r in records {
        let pad = width - r.word.width();
        writeln!(out, "{}{}  {:>8}", r.word, " ".repeat(pad), r.frequency)?;
    }
    Ok(())
}
