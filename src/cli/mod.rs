//! Command-line interface wiring for the `keypunch` binary.

use std::path::PathBuf;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use keypunch::Config;

pub mod edit;
pub mod print;

/// Parsed CLI entrypoint for the `keypunch` binary.
#[derive(Parser, Debug)]
#[command(
    name = "keypunch",
    version,
    about = "Edit text as IBM 80-column punch cards (IBM 029)"
)]
pub struct Cli {
    /// Print every line as a card instead of editing.
    #[arg(short = 'p', long = "print")]
    pub print: bool,
    /// JSON settings file.
    #[arg(long, env = "KEYPUNCH_CONFIG")]
    pub config: Option<PathBuf>,
    /// File to edit (created if missing), or to print (default: stdin).
    pub file: Option<PathBuf>,
}

/// Execute the requested mode.
pub fn run(cli: Cli) -> Result<()> {
    let config = Config::load_or_default(cli.config.as_deref())?;
    if cli.print {
        return print::handle(cli.file.as_deref(), &config);
    }
    let Some(file) = cli.file else {
        Cli::command()
            .error(
                ErrorKind::MissingRequiredArgument,
                "a FILE is required for editing (use -p to print)",
            )
            .exit()
    };
    edit::handle(&file, &config)
}
