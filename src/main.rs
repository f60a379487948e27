//! Prevue CLI application entry point
//!
//! Classifies the given file, picks the first matching rule from the user's
//! rule file and runs its command with the file's absolute path substituted.
//!
//! # Usage
//!
//! ```bash
//! # Preview a file (e.g. from fzf)
//! fzf --preview 'prevue {}'
//!
//! # Show what would run without running it
//! prevue --explain notes.md
//! ```
//!
//! # Configuration
//!
//! Rules are read from `~/.config/prevue/config.yaml` on Linux, which is
//! created from a built-in template on first run. `PREVUE_CONFIG` or
//! `--config` select another file, `PREVUE_SHELL` overrides `$SHELL`, and
//! `PREVUE_LOG` sets the log level (default `warn`).

use std::env;
use std::process::ExitCode;

use prevue::{
    FATAL_EXIT, PrevueError,
    cli::Cli,
    config::{self, Bootstrap, DEFAULT_TEMPLATE, Settings},
    dispatch::Dispatcher,
    exec::Executor,
    output::{OutputWriter, StdoutWriter},
};

type Result<T> = std::result::Result<T, PrevueError>;

const LOG_ENV: &str = "PREVUE_LOG";

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or(LOG_ENV, "warn"))
        .format_timestamp(None)
        .init();
}

fn run(cli: &Cli, output: &dyn OutputWriter) -> Result<i32> {
    if cli.print_default_config {
        print!("{DEFAULT_TEMPLATE}");
        return Ok(0);
    }

    let file = cli
        .file
        .as_deref()
        .ok_or_else(|| PrevueError::InvalidInput("No file given".into()))?;

    let settings = Settings::load(cli.config.clone())?;
    let rules_path = settings.rules_path()?;
    let document = config::load_rules(&rules_path, &Bootstrap::default())?;
    log::debug!(
        "loaded {} rules from {}",
        document.rules.len(),
        rules_path.display()
    );

    let executor = Executor::new(settings.shell(env::var("SHELL").ok()));
    let dispatcher = Dispatcher::from_document(document, executor).with_header(cli.header);

    let outcome = dispatcher.dispatch(file, cli.mode())?;
    outcome.report(output);
    Ok(outcome.exit_code())
}

fn exit_with(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(u8::MAX))
}

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    init_logging();

    let output = StdoutWriter::new();
    match run(&cli, &output) {
        Ok(code) => exit_with(code),
        Err(e) => {
            output.error(&e.to_string());
            exit_with(FATAL_EXIT)
        }
    }
}
