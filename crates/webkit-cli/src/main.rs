//! # WebKit CLI
//!
//! Generates project files from `app.json`, tracks them in
//! `.webkit/manifest.json` and reports drift.
//!
//! ## Startup sequence
//!
//! 1. Parse CLI arguments (clap handles `--help` / `--version` early-exit).
//! 2. Initialise the tracing subscriber (logging).
//! 3. Load configuration (file + env + defaults).
//! 4. Check that every embedded template parses.
//! 5. Dispatch to the appropriate command handler.
//! 6. Translate any [`CliError`] into a user-facing message and exit code.
//!
//! ## Exit codes
//!
//! | Code | Meaning                                   |
//! |------|-------------------------------------------|
//! |  0   | Success                                   |
//! |  1   | Drift detected or `app.json` invalid      |
//! |  2   | User / input error                        |
//! |  3   | Resource not found (e.g. no manifest yet) |
//! |  4   | Configuration error                       |
//! |  5   | Internal / system error                   |

use std::io::IsTerminal as _;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{debug, info, instrument};

use crate::{
    cli::{Cli, Commands},
    commands::Project,
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod files;
mod logging;
mod output;

fn main() -> ExitCode {
    // Missing .env is fine.
    let _ = dotenvy::dotenv();

    // ── 1. Parse arguments ────────────────────────────────────────────────
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version exit 0, usage errors 2.
            let _ = e.print();
            return ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(2));
        }
    };

    // ── 2. Initialise tracing ─────────────────────────────────────────────
    if let Err(e) = init_logging(&cli.global) {
        eprintln!("Failed to initialise logging: {e}");
        return ExitCode::from(5);
    }

    debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        no_color = cli.global.no_color,
        "CLI started"
    );

    // ── 3. Load configuration ─────────────────────────────────────────────
    let config = match AppConfig::load(cli.global.config.as_ref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            let err = CliError::ConfigError {
                message: format!("{e:#}"),
                source: None,
            };
            return handle_error(err, cli.global.verbose > 0, cli.global.no_color);
        }
    };

    let verbose = cli.global.verbose > 0;
    let no_color = cli.global.no_color || config.output.no_color;

    // ── 4. Embedded templates ─────────────────────────────────────────────
    if let Err(e) = webkit_adapters::templates::validate_embedded(&files::TEMPLATES) {
        return handle_error(e.into(), verbose, no_color);
    }

    // ── 5. Dispatch + 6. Error handling ──────────────────────────────────
    let output = Arc::new(OutputManager::new(&cli.global, &config));
    match run(cli, &config, output) {
        Ok(()) => {
            info!("webkit completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => handle_error(e, verbose, no_color),
    }
}

/// Dispatch to the correct command handler.
#[instrument(skip_all)]
fn run(cli: Cli, config: &AppConfig, output: Arc<OutputManager>) -> CliResult<()> {
    match cli.command {
        Commands::Version => commands::version::execute(&output),
        Commands::Completions(args) => commands::completions::execute(args),
        Commands::Config(cmd) => commands::config::execute(cmd, config, &output),
        Commands::Drift => commands::drift::execute(&Project::open(&cli.global, config, output)?),
        Commands::Update(args) => {
            commands::update::execute(args, &Project::open(&cli.global, config, output)?)
        }
        Commands::Scaffold(args) => {
            commands::scaffold::execute(args, &Project::open(&cli.global, config, output)?)
        }
        Commands::Validate => {
            commands::validate::execute(&Project::open(&cli.global, config, output)?)
        }
    }
}

/// Log the error, print it to stderr and map it to an exit code.
fn handle_error(err: CliError, verbose: bool, no_color: bool) -> ExitCode {
    err.log();

    let msg = if !no_color && std::io::stderr().is_terminal() {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{msg}");

    ExitCode::from(err.exit_code())
}
