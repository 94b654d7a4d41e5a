//! Command dispatch logic.
//!
//! Responsibilities:
//! - Route parsed CLI arguments to appropriate command handlers.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Dotenv loading for non-plan commands (see `main()`).

use anyhow::Result;
use envlayer_config::Env;

use crate::args::{Cli, Commands, EnvCommand, UrlCommand};
use crate::commands;

/// Dispatch CLI commands to their respective handlers.
pub(crate) fn run_command(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Plan(args) => commands::plan::run(args, cli.output)?,
        Commands::Env {
            command:
                EnvCommand::Get {
                    key,
                    value_type,
                    default,
                },
        } => {
            commands::env::run_get(
                &Env::from_process(),
                &key,
                value_type,
                default.as_deref(),
                cli.output,
            )?;
        }
        Commands::Url {
            command: UrlCommand::Parse { value },
        } => commands::url::run_parse(&value, cli.output)?,
    }
    Ok(())
}
