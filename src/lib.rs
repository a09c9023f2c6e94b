//! Punch-card rendering and an 80-column card editor for the terminal.

mod document;
mod encoding;
mod punchcards;
mod templates;
mod writer;

pub mod config;
pub mod editor;
pub mod logging;
pub mod terminal;

pub use config::{ColumnZeroRule, Config, ConfigError, LineStartBackspace};
pub use document::{Backing, Document};
pub use editor::{Editor, Flow, Key, LINE_CAPACITY};
pub use encoding::{Alphabet, CellMask, EncodeError, PHYSICAL_ROWS, PunchEncoding, VALID_SET};
pub use punchcards::{CardRenderer, Cell, Glyphs, HOLE_GLYPH, INVALID_GLYPH, physical_row};
pub use templates::{
    CARD_ROWS, CardTemplate, DATA_COLUMNS, PUNCH_ROWS, TAB_STOPS, TEXT_ROW, VERTICAL_BAR,
};
pub use writer::CardWriter;
