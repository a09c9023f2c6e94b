//! Print mode (`keypunch -p [FILE]`).

use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use keypunch::logging::{self, LogTarget};
use keypunch::{Alphabet, CardRenderer, CardTemplate, Config};
use tracing::debug;

pub fn handle(file: Option<&Path>, config: &Config) -> Result<()> {
    match config.log_file.as_deref() {
        Some(path) => logging::init(LogTarget::File(path), "info")?,
        None => logging::init(LogTarget::Stderr, "warn")?,
    }

    let input = match file {
        Some(path) => fs::read(path)
            .with_context(|| format!("failed to open source file {}", path.display()))?,
        None => {
            let mut buffer = Vec::new();
            io::stdin()
                .read_to_end(&mut buffer)
                .context("failed to read from stdin")?;
            buffer
        }
    };

    let alphabet = Alphabet::new();
    let template = CardTemplate::fortran();
    let renderer = CardRenderer::new(&template, &alphabet, config.glyphs());

    let mut out = BufWriter::new(io::stdout().lock());
    let cards = renderer
        .write_deck(&input, &mut out)
        .context("failed to write cards")?;
    out.flush().context("failed to write cards")?;
    debug!(cards, "printed deck");
    Ok(())
}
