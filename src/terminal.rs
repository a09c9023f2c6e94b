//! Raw terminal mode and its restoration.
//!
//! Raw mode can be left from two places: the guard dropped on the normal exit
//! path, and the interrupt thread. Both go through [`restore`], which only
//! acts once.

use std::io;
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use anyhow::{Context, Result};
use crossterm::terminal;
use signal_hook::consts::{SIGHUP, SIGINT, SIGTERM};
use signal_hook::iterator::Signals;
use tracing::{info, warn};

static RAW_MODE: AtomicBool = AtomicBool::new(false);

/// Keeps the terminal in raw mode until dropped.
#[derive(Debug)]
pub struct RawMode {
    _private: (),
}

impl RawMode {
    pub fn enable() -> Result<Self> {
        terminal::enable_raw_mode().context("failed to switch terminal to raw mode")?;
        RAW_MODE.store(true, Ordering::SeqCst);
        Ok(Self { _private: () })
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        if let Err(err) = restore() {
            warn!(%err, "failed to restore terminal mode");
        }
    }
}

pub fn is_raw() -> bool {
    RAW_MODE.load(Ordering::SeqCst)
}

/// Leave raw mode if it is still active. Returns whether this call did it.
pub fn restore() -> io::Result<bool> {
    if !RAW_MODE.swap(false, Ordering::SeqCst) {
        return Ok(false);
    }
    terminal::disable_raw_mode()?;
    Ok(true)
}

/// Restore the terminal and exit when SIGINT, SIGTERM or SIGHUP arrives.
pub fn watch_interrupts() -> Result<()> {
    let mut signals =
        Signals::new([SIGINT, SIGTERM, SIGHUP]).context("failed to register signal handlers")?;
    thread::Builder::new()
        .name("keypunch-signals".to_string())
        .spawn(move || {
            if let Some(signal) = signals.forever().next() {
                info!(signal, "interrupted");
                if let Err(err) = restore() {
                    warn!(%err, "failed to restore terminal mode");
                }
                process::exit(0);
            }
        })
        .context("failed to start signal thread")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restore_without_raw_mode_is_a_no_op() {
        assert!(!is_raw());
        assert!(!restore().unwrap());
        assert!(!restore().unwrap());
    }
}
