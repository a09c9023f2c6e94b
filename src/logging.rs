//! `tracing` subscriber setup.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive, e.g. `keypunch=debug`.
pub const LOG_ENV: &str = "KEYPUNCH_LOG";

#[derive(Debug, Clone, Copy)]
pub enum LogTarget<'a> {
    /// Append to a file. Used while the terminal is in raw mode.
    File(&'a Path),
    Stderr,
}

pub fn init(target: LogTarget<'_>, default_directive: &str) -> Result<()> {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let installed = match target {
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        LogTarget::Stderr => builder.with_writer(io::stderr).try_init(),
    };
    installed.map_err(|err| anyhow!("failed to install logger: {err}"))
}
