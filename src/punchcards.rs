use crate::encoding::{CellMask, PunchEncoding};
use crate::templates::{CardTemplate, DATA_COLUMNS, PUNCH_ROWS, TEXT_ROW, VERTICAL_BAR};
use std::io::{self, Write};
use std::ops::Range;

pub const HOLE_GLYPH: char = '⌷';
pub const INVALID_GLYPH: char = '▒';

/// Glyphs drawn on top of the template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyphs {
    pub hole: char,
    pub invalid: char,
}

impl Default for Glyphs {
    fn default() -> Self {
        Self {
            hole: HOLE_GLYPH,
            invalid: INVALID_GLYPH,
        }
    }
}

/// Content of one data column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Char(u8),
    /// Unsupported byte, or a whole multi-byte sequence, shown as one marker.
    Invalid,
}

/// Draws lines of text onto a [`CardTemplate`].
///
/// Rendering is a pure function of the line: the same input always yields the
/// same rows.
pub struct CardRenderer<'a, E: PunchEncoding + ?Sized> {
    template: &'a CardTemplate,
    encoding: &'a E,
    glyphs: Glyphs,
}

impl<E: PunchEncoding + ?Sized> Clone for CardRenderer<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E: PunchEncoding + ?Sized> Copy for CardRenderer<'_, E> {}

impl<'a, E: PunchEncoding + ?Sized> CardRenderer<'a, E> {
    pub fn new(template: &'a CardTemplate, encoding: &'a E, glyphs: Glyphs) -> Self {
        Self {
            template,
            encoding,
            glyphs,
        }
    }

    pub fn template(&self) -> &'a CardTemplate {
        self.template
    }

    pub fn encoding(&self) -> &'a E {
        self.encoding
    }

    pub fn glyphs(&self) -> Glyphs {
        self.glyphs
    }

    /// Split a line into data columns.
    ///
    /// A high-bit byte and the UTF-8 continuation bytes after it occupy a
    /// single column.
    pub fn cells(&self, line: &[u8]) -> Vec<Cell> {
        self.cell_spans(line).into_iter().map(|(_, cell)| cell).collect()
    }

    /// Like [`CardRenderer::cells`], with the bytes each cell was made from.
    pub fn cell_spans(&self, line: &[u8]) -> Vec<(Range<usize>, Cell)> {
        let mut spans = Vec::with_capacity(line.len().min(DATA_COLUMNS));
        let mut i = 0;
        while i < line.len() {
            let start = i;
            let byte = line[i];
            i += 1;
            let cell = if byte & 0x80 != 0 {
                while i < line.len() && line[i] & 0xC0 == 0x80 {
                    i += 1;
                }
                Cell::Invalid
            } else if self.encoding.is_supported(byte) {
                Cell::Char(byte)
            } else {
                Cell::Invalid
            };
            spans.push((start..i, cell));
        }
        spans
    }

    /// Glyph at data `column` of template `row` for the given cell.
    ///
    /// `None` means the column lies past the end of the line.
    pub fn glyph(&self, row: usize, column: usize, cell: Option<Cell>) -> char {
        let background = self.template.background(row, column);
        if row == TEXT_ROW {
            return match cell {
                Some(Cell::Char(byte)) => char::from(byte),
                Some(Cell::Invalid) => self.glyphs.invalid,
                None => background,
            };
        }
        let Some(physical) = physical_row(row) else {
            return background;
        };
        let mask = match cell {
            Some(Cell::Char(byte)) => self.encoding.mask_or_blank(byte),
            _ => CellMask::EMPTY,
        };
        if mask.is_punched(physical) {
            self.glyphs.hole
        } else {
            background
        }
    }

    /// Full card image for `line`, one string per terminal row.
    pub fn render(&self, line: &[u8]) -> Vec<String> {
        let cells = self.cells(line);
        self.template
            .lines()
            .enumerate()
            .map(|(row, template_row)| {
                if !self.template.is_data_row(row) {
                    return template_row.to_string();
                }
                let mut out = String::with_capacity(template_row.len());
                let mut column = 0;
                for glyph in template_row.chars() {
                    if glyph == VERTICAL_BAR {
                        out.push(glyph);
                        continue;
                    }
                    out.push(self.glyph(row, column, cells.get(column).copied()));
                    column += 1;
                }
                out
            })
            .collect()
    }

    /// Recover the punched rows of every column from a rendered card.
    pub fn read_back(&self, rows: &[String]) -> Vec<CellMask> {
        let mut masks = vec![CellMask::EMPTY; DATA_COLUMNS];
        for (row, physical) in PUNCH_ROWS {
            let Some(line) = rows.get(row) else {
                continue;
            };
            let data = line.chars().filter(|c| *c != VERTICAL_BAR);
            for (column, glyph) in data.take(DATA_COLUMNS).enumerate() {
                if glyph == self.glyphs.hole {
                    masks[column] = masks[column] | CellMask(1 << physical);
                }
            }
        }
        masks
    }

    /// Render every line of `text` as a card, stacked with no separator.
    ///
    /// Lines end at LF; a trailing CR is dropped and a final empty line after
    /// the last LF produces no card. Returns the number of cards written.
    pub fn write_deck<W: Write>(&self, text: &[u8], out: &mut W) -> io::Result<usize> {
        let mut lines: Vec<&[u8]> = text.split(|b| *b == b'\n').collect();
        if lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }
        for line in lines.iter().copied() {
            let line = line.strip_suffix(b"\r").unwrap_or(line);
            for row in self.render(line) {
                out.write_all(row.as_bytes())?;
                out.write_all(b"\n")?;
            }
        }
        Ok(lines.len())
    }
}

/// Physical row punched on template `row`, if it is a punch row.
pub fn physical_row(row: usize) -> Option<u8> {
    PUNCH_ROWS
        .iter()
        .find(|(template_row, _)| *template_row == row)
        .map(|(_, physical)| *physical)
}
