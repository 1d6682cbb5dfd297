use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use wordfreq_cli::commands::{self, config_ops, Command, Options, ParseError};
use wordfreq_cli::interactive::{self, LinePrompt, PromptSource, TerminalPrompt};
use wordfreq_cli::CommandError;
use wordfreq_core::settings::settings;
use wordfreq_core::AutocompleteEngine;

#[derive(Parser)]
#[command(
    name = "wordfreq",
    about = "Frequent-word dictionary with prefix autocomplete",
    after_help = commands::USAGE
)]
struct Cli {
    /// Dictionary file
    #[arg(long, env = "WORDFREQ_DB")]
    db: Option<PathBuf>,
    /// Custom settings TOML (see SETTINGS-EXPORT)
    #[arg(long, env = "WORDFREQ_CONFIG")]
    config: Option<PathBuf>,
    /// Also write a JSON trace to this directory
    #[arg(long)]
    log_dir: Option<PathBuf>,
    /// Print per-word detail
    #[arg(short, long)]
    verbose: bool,
    /// Machine-readable output
    #[arg(long)]
    json: bool,
    /// CREATE, UPDATE, CLEANUP, QUERY, LIST, SETTINGS-EXPORT, SETTINGS-VALIDATE
    command: Option<String>,
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let _guard = wordfreq_cli::trace_init::init_tracing(cli.log_dir.as_deref());

    if let Some(path) = &cli.config {
        if let Err(e) = config_ops::load_settings(path) {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    }

    let opts = Options {
        db: cli.db.unwrap_or_else(commands::default_store_path),
        verbose: cli.verbose,
        json: cli.json,
    };

    let result = match cli.command {
        None => interactive_session(&opts),
        Some(keyword) => match Command::parse(&keyword, &cli.args) {
            Ok(command) => {
                info!(?command, db = %opts.db.display(), "run command");
                let stdout = io::stdout();
                let mut out = stdout.lock();
                commands::execute(command, &opts, &mut out)
            }
            Err(e) => {
                // Nothing was touched; report and leave.
                eprintln!("{e}");
                if matches!(e, ParseError::Unrecognized(_)) {
                    eprintln!("{}", commands::USAGE);
                }
                return ExitCode::SUCCESS;
            }
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "command failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn interactive_session(opts: &Options) -> Result<(), CommandError> {
    let store = commands::open_store(&opts.db)?;
    let engine = AutocompleteEngine::new(&store);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut prompt: Box<dyn PromptSource> = if io::stdin().is_terminal() {
        Box::new(TerminalPrompt::new(io::stdout()))
    } else {
        Box::new(LinePrompt::new(io::stdin().lock()))
    };
    interactive::run(
        &engine,
        prompt.as_mut(),
        &mut out,
        settings().autocomplete.max_results,
    )?;
    out.flush()?;
    Ok(())
}
