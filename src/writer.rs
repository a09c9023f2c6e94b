//! Cursor-relative painting of a card that is already on screen.

use crate::encoding::PunchEncoding;
use crate::punchcards::{Cell, CardRenderer};
use crate::templates::{CARD_ROWS, CardTemplate, DATA_COLUMNS, PUNCH_ROWS, TEXT_ROW};
use crossterm::cursor::{MoveDown, MoveLeft, MoveRight, MoveUp};
use crossterm::queue;
use crossterm::style::Print;
use std::io::{self, Write};

/// Updates single columns of a painted card in place.
///
/// The writer keeps its own idea of where the terminal cursor is, measured
/// from the home cell: the text row of data column 0. Every public operation
/// starts and ends at home, so callers only ever deal in whole columns.
pub struct CardWriter<'a, W: Write, E: PunchEncoding + ?Sized> {
    out: W,
    renderer: CardRenderer<'a, E>,
    x: i16,
    y: i16,
    painted: bool,
}

impl<'a, W: Write, E: PunchEncoding + ?Sized> CardWriter<'a, W, E> {
    pub fn new(out: W, renderer: CardRenderer<'a, E>) -> Self {
        Self {
            out,
            renderer,
            x: 0,
            y: 0,
            painted: false,
        }
    }

    /// Print a card at the current cursor line and move to home.
    ///
    /// The cursor must be at the start of an empty line.
    pub fn paint_card(&mut self, rows: &[String]) -> io::Result<()> {
        debug_assert_eq!(rows.len(), CARD_ROWS);
        for row in rows {
            queue!(self.out, Print(row), Print("\r\n"))?;
        }
        // Column 0 of the line below the footer.
        self.x = -1;
        self.y = (CARD_ROWS - TEXT_ROW) as i16;
        self.painted = true;
        self.move_to(0, 0)
    }

    /// Overwrite the card on screen with `rows`.
    pub fn repaint_card(&mut self, rows: &[String]) -> io::Result<()> {
        self.assert_home();
        self.move_to(-1, -(TEXT_ROW as i16))?;
        self.paint_card(rows)
    }

    /// Draw `byte` into data `column`.
    pub fn paint_column(&mut self, column: usize, byte: u8) -> io::Result<()> {
        let cell = self.renderer.cells(&[byte]).first().copied();
        self.draw_column(column, cell)
    }

    /// Restore data `column` to the blank template.
    pub fn clear_column(&mut self, column: usize) -> io::Result<()> {
        self.draw_column(column, None)
    }

    /// Draw `cell` into data `column`; `None` restores the blank template.
    pub fn draw_column(&mut self, column: usize, cell: Option<Cell>) -> io::Result<()> {
        if column >= DATA_COLUMNS {
            return Ok(());
        }
        self.assert_home();
        let x = CardTemplate::column_offset(column) as i16;
        let rows = std::iter::once(TEXT_ROW).chain(PUNCH_ROWS.iter().map(|(row, _)| *row));
        for row in rows {
            self.move_to(x, (row - TEXT_ROW) as i16)?;
            let glyph = self.renderer.glyph(row, column, cell);
            queue!(self.out, Print(glyph))?;
            self.x += 1;
        }
        self.move_to(0, 0)
    }

    /// Leave the cursor at the start of the line below the card.
    pub fn park_below(&mut self) -> io::Result<()> {
        if self.painted {
            self.assert_home();
            self.move_to(-1, (CARD_ROWS - 1 - TEXT_ROW) as i16)?;
            self.painted = false;
        }
        queue!(self.out, Print("\r\n"))?;
        self.x = 0;
        self.y = 0;
        self.out.flush()
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    /// Cursor position relative to home.
    pub fn cursor(&self) -> (i16, i16) {
        (self.x, self.y)
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn move_to(&mut self, x: i16, y: i16) -> io::Result<()> {
        let dy = y - self.y;
        if dy < 0 {
            queue!(self.out, MoveUp(dy.unsigned_abs()))?;
        } else if dy > 0 {
            queue!(self.out, MoveDown(dy.unsigned_abs()))?;
        }
        let dx = x - self.x;
        if dx < 0 {
            queue!(self.out, MoveLeft(dx.unsigned_abs()))?;
        } else if dx > 0 {
            queue!(self.out, MoveRight(dx.unsigned_abs()))?;
        }
        self.x = x;
        self.y = y;
        Ok(())
    }

    fn assert_home(&self) {
        debug_assert!(self.painted, "card must be painted before column updates");
        debug_assert_eq!((self.x, self.y), (0, 0), "writer cursor is not at home");
    }
}
