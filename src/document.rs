use std::fs::File;
use std::io::{self, Cursor, Seek, SeekFrom, Write};

use anyhow::{Context, Result};

/// Storage a [`Document`] is saved into.
///
/// Saving rewrites from offset 0 and then cuts the storage to the written
/// length, so no bytes of a longer previous version survive.
pub trait Backing: Write + Seek {
    fn truncate_to(&mut self, len: u64) -> io::Result<()>;
}

impl Backing for File {
    fn truncate_to(&mut self, len: u64) -> io::Result<()> {
        self.set_len(len)
    }
}

impl Backing for Cursor<Vec<u8>> {
    fn truncate_to(&mut self, len: u64) -> io::Result<()> {
        let len = usize::try_from(len).map_err(io::Error::other)?;
        self.get_mut().truncate(len);
        Ok(())
    }
}

/// The file being edited, one entry per line without its line feed.
///
/// A document always holds at least one line. Passing an out-of-range index
/// to any method is a bug in the caller and panics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    lines: Vec<Vec<u8>>,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            lines: vec![Vec::new()],
        }
    }
}

impl Document {
    /// Split raw file contents on LF.
    ///
    /// One trailing LF is not kept as an extra empty line, so saving the
    /// document drops it.
    pub fn load(bytes: &[u8]) -> Self {
        let mut lines: Vec<Vec<u8>> = bytes.split(|b| *b == b'\n').map(<[u8]>::to_vec).collect();
        if lines.len() > 1 && lines.last().is_some_and(Vec::is_empty) {
            lines.pop();
        }
        Self { lines }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the document has no lines. Loaded and edited documents always
    /// have at least one.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, index: usize) -> &[u8] {
        &self.lines[index]
    }

    pub fn lines(&self) -> impl Iterator<Item = &[u8]> {
        self.lines.iter().map(Vec::as_slice)
    }

    /// Replace the contents of line `index`.
    pub fn set_line(&mut self, index: usize, line: &[u8]) {
        self.lines[index].clear();
        self.lines[index].extend_from_slice(line);
    }

    /// Cut line `index` at `column` and insert the tail as a new line after it.
    pub fn split_at(&mut self, index: usize, column: usize) {
        let column = column.min(self.lines[index].len());
        let tail = self.lines[index].split_off(column);
        self.lines.insert(index + 1, tail);
    }

    /// Remove line `index`. Removing the only line leaves one empty line.
    pub fn delete_line(&mut self, index: usize) {
        self.lines.remove(index);
        if self.lines.is_empty() {
            self.lines.push(Vec::new());
        }
    }

    /// Append line `index` to the line before it and remove it.
    ///
    /// Returns the column where the joined text starts.
    pub fn join_with_previous(&mut self, index: usize) -> usize {
        assert!(index > 0, "line 0 has no previous line");
        let line = self.lines.remove(index);
        let previous = &mut self.lines[index - 1];
        let column = previous.len();
        previous.extend_from_slice(&line);
        column
    }

    /// Lines joined by LF, with no LF after the last line.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.lines.join(&b'\n')
    }

    /// Overwrite `backing` with the document and truncate it to fit.
    pub fn save<B: Backing>(&self, backing: &mut B) -> Result<u64> {
        let bytes = self.to_bytes();
        backing
            .seek(SeekFrom::Start(0))
            .context("failed to rewind file")?;
        backing
            .write_all(&bytes)
            .context("failed to write file contents")?;
        let len = bytes.len() as u64;
        backing
            .truncate_to(len)
            .context("failed to truncate file")?;
        backing.flush().context("failed to flush file")?;
        Ok(len)
    }
}
