//! Interactive mode (`keypunch FILE`).

use std::fs::OpenOptions;
use std::io::{self, BufWriter, Read};
use std::path::Path;

use anyhow::{Context, Result};
use keypunch::logging::{self, LogTarget};
use keypunch::terminal::{self, RawMode};
use keypunch::{Alphabet, CardRenderer, CardTemplate, Config, Document, Editor};
use tracing::info;

pub fn handle(path: &Path, config: &Config) -> Result<()> {
    // Nothing may reach stderr while the terminal is raw.
    if let Some(log_file) = config.log_file.as_deref() {
        logging::init(LogTarget::File(log_file), "info")?;
    }

    let mut file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)
        .with_context(|| format!("failed to open file {}", path.display()))?;
    let mut contents = Vec::new();
    file.read_to_end(&mut contents)
        .with_context(|| format!("failed to read file {}", path.display()))?;
    let document = Document::load(&contents);
    info!(path = %path.display(), lines = document.len(), "loaded");

    let alphabet = Alphabet::new();
    let template = CardTemplate::fortran();
    let renderer = CardRenderer::new(&template, &alphabet, config.glyphs());

    let _raw = RawMode::enable()?;
    terminal::watch_interrupts()?;

    let out = BufWriter::new(io::stdout());
    let mut editor = Editor::new(document, file, out, renderer, config);
    editor.start()?;
    editor.run(io::stdin().lock())
}
