//! Interactive card editor.
//!
//! The editor keeps the current line in a working buffer, shows it as a card
//! and writes it back into the [`Document`] whenever it leaves the line or
//! saves. Single-character edits repaint only the affected columns; switching
//! lines repaints the whole card in place.

pub mod keys;

use std::io::{ErrorKind, Read, Write};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::config::{ColumnZeroRule, Config, LineStartBackspace};
use crate::document::{Backing, Document};
use crate::encoding::PunchEncoding;
use crate::punchcards::{CardRenderer, Cell};
use crate::templates::{CardTemplate, DATA_COLUMNS};
use crate::writer::CardWriter;

pub use keys::Key;

/// Bytes a line can hold while it is being edited.
pub const LINE_CAPACITY: usize = DATA_COLUMNS;

const READ_CHUNK: usize = 16;

/// Whether the input loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Editor<'a, W: Write, B: Backing, E: PunchEncoding + ?Sized> {
    document: Document,
    line: Vec<u8>,
    column: usize,
    index: usize,
    renderer: CardRenderer<'a, E>,
    writer: CardWriter<'a, W, E>,
    backing: B,
    column_zero: ColumnZeroRule,
    line_start_backspace: LineStartBackspace,
}

impl<'a, W: Write, B: Backing, E: PunchEncoding + ?Sized> Editor<'a, W, B, E> {
    pub fn new(
        document: Document,
        backing: B,
        out: W,
        renderer: CardRenderer<'a, E>,
        config: &Config,
    ) -> Self {
        Self {
            document,
            line: Vec::with_capacity(LINE_CAPACITY),
            column: 0,
            index: 0,
            renderer,
            writer: CardWriter::new(out, renderer),
            backing,
            column_zero: config.column_zero,
            line_start_backspace: config.line_start_backspace,
        }
    }

    /// Show the first line. Must be called once before [`Editor::handle`].
    pub fn start(&mut self) -> Result<()> {
        self.load_line(0);
        let rows = self.renderer.render(&self.line);
        self.writer
            .paint_card(&rows)
            .context("failed to write to terminal")?;
        self.writer.flush().context("failed to write to terminal")?;
        info!(lines = self.document.len(), "editor started");
        Ok(())
    }

    /// Read chunks from `input` until the user quits or input ends.
    pub fn run<R: Read>(&mut self, mut input: R) -> Result<()> {
        let mut buffer = [0u8; READ_CHUNK];
        loop {
            let n = match input.read(&mut buffer) {
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(err).context("failed to read from stdin"),
            };
            if n == 0 {
                info!("input closed");
                self.writer
                    .park_below()
                    .context("failed to write to terminal")?;
                return Ok(());
            }
            if self.handle(&buffer[..n])? == Flow::Quit {
                return Ok(());
            }
        }
    }

    /// Apply one input chunk.
    pub fn handle(&mut self, chunk: &[u8]) -> Result<Flow> {
        let key = Key::decode(chunk);
        debug!(?key, line = self.index, column = self.column, "key");
        let flow = match key {
            Key::Quit => {
                self.writer
                    .park_below()
                    .context("failed to write to terminal")?;
                info!("quit");
                return Ok(Flow::Quit);
            }
            Key::Save => {
                self.save()?;
                Flow::Continue
            }
            Key::Char(byte) => {
                self.type_byte(byte)?;
                Flow::Continue
            }
            Key::Backspace => {
                self.backspace()?;
                Flow::Continue
            }
            Key::Tab => {
                self.tab()?;
                Flow::Continue
            }
            Key::Return => {
                self.split_line()?;
                Flow::Continue
            }
            Key::PreviousLine => {
                self.navigate(-1)?;
                Flow::Continue
            }
            Key::NextLine => {
                self.navigate(1)?;
                Flow::Continue
            }
            Key::ClearLine => {
                self.line.clear();
                self.column = 0;
                self.repaint()?;
                Flow::Continue
            }
            Key::Unknown => {
                debug!(?chunk, "dropped input sequence");
                Flow::Continue
            }
        };
        self.writer.flush().context("failed to write to terminal")?;
        Ok(flow)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Working copy of the current line.
    pub fn line(&self) -> &[u8] {
        &self.line
    }

    /// Cursor as a byte offset into [`Editor::line`]. Always at a cell start.
    pub fn column(&self) -> usize {
        self.column
    }

    pub fn line_index(&self) -> usize {
        self.index
    }

    pub fn backing(&self) -> &B {
        &self.backing
    }

    pub fn writer(&self) -> &CardWriter<'a, W, E> {
        &self.writer
    }

    fn save(&mut self) -> Result<()> {
        self.commit();
        let len = self
            .document
            .save(&mut self.backing)
            .context("failed to save file")?;
        info!(bytes = len, lines = self.document.len(), "saved");
        Ok(())
    }

    fn type_byte(&mut self, byte: u8) -> Result<()> {
        if !self.renderer.encoding().is_supported(byte) {
            debug!(byte, "ignored unsupported character");
            return Ok(());
        }
        let seed = self.column == 0 && self.column_zero == ColumnZeroRule::SeedSpace;
        let needed = if seed { 2 } else { 1 };
        if self.renderer.cells(&self.line).len() + needed > LINE_CAPACITY {
            debug!("line is full");
            return Ok(());
        }
        if seed {
            self.insert_byte(b' ')?;
        }
        self.insert_byte(byte)
    }

    /// Insert at the cursor and repaint the columns that moved.
    fn insert_byte(&mut self, byte: u8) -> Result<()> {
        let before = self.renderer.cells(&self.line);
        self.line.insert(self.column, byte);
        self.column += 1;
        self.paint_changes(&before)
    }

    fn backspace(&mut self) -> Result<()> {
        if self.column > 0 {
            let before = self.renderer.cell_spans(&self.line);
            let Some((span, _)) = before.iter().find(|(span, _)| span.contains(&(self.column - 1)))
            else {
                return Ok(());
            };
            let span = span.clone();
            self.column = span.start;
            self.line.drain(span);
            let before: Vec<Cell> = before.into_iter().map(|(_, cell)| cell).collect();
            return self.paint_changes(&before);
        }

        self.commit();
        match self.line_start_backspace {
            LineStartBackspace::DeleteLine => {
                self.document.delete_line(self.index);
                self.index = self.index.saturating_sub(1);
                self.load_line(self.index);
            }
            LineStartBackspace::Join => {
                if self.index == 0 {
                    return Ok(());
                }
                let column = self.document.join_with_previous(self.index);
                self.index -= 1;
                self.load_line(self.index);
                self.column = self.cell_boundary(column);
            }
        }
        self.repaint()
    }

    fn tab(&mut self) -> Result<()> {
        let mut column = self.card_column();
        let Some(stop) = CardTemplate::next_tab_stop(column) else {
            return Ok(());
        };
        while column < stop && self.renderer.cells(&self.line).len() < LINE_CAPACITY {
            self.insert_byte(b' ')?;
            column += 1;
        }
        Ok(())
    }

    fn split_line(&mut self) -> Result<()> {
        self.commit();
        self.document.split_at(self.index, self.column);
        self.index += 1;
        self.load_line(self.index);
        self.column = 0;
        self.repaint()
    }

    fn navigate(&mut self, delta: isize) -> Result<()> {
        self.commit();
        let last = self.document.len() - 1;
        let target = self.index.saturating_add_signed(delta).min(last);
        if target == self.index {
            return Ok(());
        }
        self.index = target;
        self.load_line(target);
        self.repaint()
    }

    fn commit(&mut self) {
        self.document.set_line(self.index, &self.line);
    }

    fn load_line(&mut self, index: usize) {
        self.line.clear();
        self.line.extend_from_slice(self.document.line(index));
        self.column = self.cell_boundary(self.line.len());
    }

    /// Card column of the cursor.
    fn card_column(&self) -> usize {
        self.renderer.cells(&self.line[..self.column]).len()
    }

    /// Start of the cell holding byte `offset`, kept within the card.
    fn cell_boundary(&self, offset: usize) -> usize {
        let spans = self.renderer.cell_spans(&self.line);
        let index = spans
            .iter()
            .position(|(span, _)| span.end > offset)
            .unwrap_or(spans.len())
            .min(LINE_CAPACITY);
        spans.get(index).map_or(self.line.len(), |(span, _)| span.start)
    }

    /// Repaint every card column that differs from `before`.
    fn paint_changes(&mut self, before: &[Cell]) -> Result<()> {
        let after = self.renderer.cells(&self.line);
        let first = before
            .iter()
            .zip(&after)
            .position(|(old, new)| old != new)
            .unwrap_or(before.len().min(after.len()));
        let end = before.len().max(after.len()).min(LINE_CAPACITY);
        for column in first..end {
            self.writer
                .draw_column(column, after.get(column).copied())
                .context("failed to write to terminal")?;
        }
        Ok(())
    }

    fn repaint(&mut self) -> Result<()> {
        let rows = self.renderer.render(&self.line);
        self.writer
            .repaint_card(&rows)
            .context("failed to write to terminal")
    }
}
