//! Interactive autocomplete loop.
//!
//! Each entered prefix prints its ranked completions. Esc (or an empty line)
//! ends the session.

use std::io::{self, BufRead, Write};

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use tracing::{debug, info_span};
use unicode_width::UnicodeWidthChar;
use wordfreq_core::AutocompleteEngine;

use crate::error::CommandError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    Line(String),
    Cancel,
}

/// Where prefixes come from.
pub trait PromptSource {
    fn read_prompt(&mut self) -> io::Result<Prompt>;
}

struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Reads keys from the terminal in raw mode so Esc can cancel mid-line.
pub struct TerminalPrompt<W: Write> {
    echo: W,
}

impl<W: Write> TerminalPrompt<W> {
    pub fn new(echo: W) -> Self {
        Self { echo }
    }
}

impl<W: Write> PromptSource for TerminalPrompt<W> {
    fn read_prompt(&mut self) -> io::Result<Prompt> {
        let _raw = RawModeGuard::enable()?;
        let mut line = String::new();
        loop {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Esc => {
                    write!(self.echo, "\r\n")?;
                    self.echo.flush()?;
                    return Ok(Prompt::Cancel);
                }
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    write!(self.echo, "\r\n")?;
                    self.echo.flush()?;
                    return Ok(Prompt::Cancel);
                }
                KeyCode::Enter => {
                    write!(self.echo, "\r\n")?;
                    self.echo.flush()?;
                    return Ok(Prompt::Line(line));
                }
                KeyCode::Backspace => {
                    if let Some(c) = line.pop() {
                        let cols = c.width().unwrap_or(0);
                        for _ in 0..cols {
                            write!(self.echo, "\x08 \x08")?;
                        }
                        self.echo.flush()?;
                    }
                }
                KeyCode::Char(c) => {
                    line.push(c);
                    write!(self.echo, "{c}")?;
                    self.echo.flush()?;
                }
                _ => {}
            }
        }
    }
}

/// Line-buffered input for pipes and redirected stdin. EOF cancels.
pub struct LinePrompt<R: BufRead> {
    input: R,
}

impl<R: BufRead> LinePrompt<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }
}

impl<R: BufRead> PromptSource for LinePrompt<R> {
    fn read_prompt(&mut self) -> io::Result<Prompt> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(Prompt::Cancel);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']);
        Ok(Prompt::Line(trimmed.to_string()))
    }
}

pub fn run(
    engine: &AutocompleteEngine<'_>,
    prompt: &mut dyn PromptSource,
    out: &mut dyn Write,
    limit: usize,
) -> Result<(), CommandError> {
    let _span = info_span!("interactive", limit).entered();
    writeln!(out, "Enter a prefix to autocomplete. Press Esc or enter an empty line to exit.")?;
    loop {
        write!(out, "> ")?;
        out.flush()?;
        let prefix = match prompt.read_prompt()? {
            Prompt::Cancel => break,
            Prompt::Line(line) if line.is_empty() => break,
            Prompt::Line(line) => line,
        };
        let words = engine.query(&prefix, limit)?;
        debug!(prefix = %prefix, results = words.len(), "interactive query");
        for word in &words {
            writeln!(out, "{word}")?;
        }
        writeln!(out, "Press Esc or enter an empty line to exit")?;
    }
    Ok(())
}
