//! envlayer - Command-line front end for environment-driven CMS configuration.
//!
//! Responsibilities:
//! - Parse command-line arguments.
//! - Preview a bootstrap against an in-memory host (`plan`).
//! - Inspect typed environment values and resource URLs.
//!
//! Does NOT handle:
//! - Layer semantics or coercion rules (see `crates/layers` and `crates/config`).
//!
//! Invariants:
//! - Logs go to stderr so stdout stays machine-readable.
//! - `.env` in the current directory is loaded before dispatch, except for
//!   `plan`, which loads the `.env` of the planned instance instead.

mod args;
mod commands;
mod dispatch;
mod error;
mod formatters;

use std::path::Path;

use args::{Cli, Commands};
use clap::Parser;
use dispatch::run_command;
use envlayer_config::load_dotenv;
use error::{ExitCode, ExitCodeExt};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    if !matches!(cli.command, Commands::Plan(_))
        && let Err(e) = load_dotenv(Path::new("."))
    {
        eprintln!("Failed to load environment: {}", e);
        std::process::exit(ExitCode::from(&e).as_i32());
    }

    let exit_code = match run_command(cli) {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            e.exit_code()
        }
    };

    std::process::exit(exit_code.as_i32());
}
