//! Static glyph layout of an 80-column FORTRAN statement card.

/// Number of data columns on a card.
pub const DATA_COLUMNS: usize = 80;
/// Number of terminal rows a card occupies, borders included.
pub const CARD_ROWS: usize = 17;
/// Template row that echoes the printed character.
pub const TEXT_ROW: usize = 1;
/// Fixed alignment columns (zero-based): continuation, statement, identification.
pub const TAB_STOPS: [usize; 3] = [5, 6, 72];

/// Field separator drawn between data columns.
pub const VERTICAL_BAR: char = '│';

/// `(template row, physical row)` for every punchable row, top to bottom.
pub const PUNCH_ROWS: [(usize, u8); 12] = [
    (2, 12),
    (4, 11),
    (6, 0),
    (7, 1),
    (8, 2),
    (9, 3),
    (10, 4),
    (11, 5),
    (12, 6),
    (13, 7),
    (14, 8),
    (15, 9),
];

static FORTRAN_ROWS: [&str; CARD_ROWS] = [
    "┌─────┬─┬──────────────────────────────────────────────────────────────────┬────────┐",
    "│     │ │                                                                  │        │",
    "│     │ │                                                                  │        │",
    "│     │ ├──────────────────────────────────────────────────────────────────┼────────┤",
    "│     │ │                  F O R T R A N  S T A T E M E N T                │        │",
    "├─────┼─┼──────────────────────────────────────────────────────────────────┼────────┤",
    "│00000│0│000000000000000000000000000000000000000000000000000000000000000000│00000000│",
    "│11111│1│111111111111111111111111111111111111111111111111111111111111111111│11111111│",
    "│22222│2│222222222222222222222222222222222222222222222222222222222222222222│22222222│",
    "│33333│3│333333333333333333333333333333333333333333333333333333333333333333│33333333│",
    "│44444│4│444444444444444444444444444444444444444444444444444444444444444444│44444444│",
    "│55555│5│555555555555555555555555555555555555555555555555555555555555555555│55555555│",
    "│66666│6│666666666666666666666666666666666666666666666666666666666666666666│66666666│",
    "│77777│7│777777777777777777777777777777777777777777777777777777777777777777│77777777│",
    "│88888│8│888888888888888888888888888888888888888888888888888888888888888888│88888888│",
    "│99999│9│999999999999999999999999999999999999999999999999999999999999999999│99999999│",
    "└─────┴─┴──────────────────────────────────────────────────────────────────┴────────┘",
];

/// The blank card both renderers draw onto.
///
/// Data rows are the text row and the twelve punch rows; every other row is
/// drawn verbatim. Within a data row each non-`│` glyph belongs to one data
/// column, left to right.
#[derive(Debug, Clone)]
pub struct CardTemplate {
    rows: &'static [&'static str; CARD_ROWS],
    background: Vec<Vec<char>>,
}

impl Default for CardTemplate {
    fn default() -> Self {
        Self::fortran()
    }
}

impl CardTemplate {
    pub fn fortran() -> Self {
        let rows = &FORTRAN_ROWS;
        let background = rows
            .iter()
            .map(|row| row.chars().filter(|c| *c != VERTICAL_BAR).collect())
            .collect();
        Self { rows, background }
    }

    /// All rows of the blank card, top to bottom.
    pub fn lines(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rows.iter().copied()
    }

    pub fn row(&self, row: usize) -> &'static str {
        self.rows[row]
    }

    pub fn is_data_row(&self, row: usize) -> bool {
        row == TEXT_ROW || PUNCH_ROWS.iter().any(|(r, _)| *r == row)
    }

    /// Template glyph shown at `column` of a data row when nothing is drawn there.
    pub fn background(&self, row: usize, column: usize) -> char {
        self.background[row][column]
    }

    /// Terminal offset of data `column` relative to the first data cell.
    ///
    /// Columns 5, 6 and 72 each sit right after an internal separator.
    pub fn column_offset(column: usize) -> usize {
        column + TAB_STOPS.iter().filter(|stop| column >= **stop).count()
    }

    /// First tab stop strictly to the right of `column`.
    pub fn next_tab_stop(column: usize) -> Option<usize> {
        TAB_STOPS.iter().copied().find(|stop| *stop > column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn every_row_is_85_glyphs_wide() {
        let template = CardTemplate::fortran();
        for line in template.lines() {
            assert_eq!(line.chars().count(), 85, "{line}");
        }
        assert_eq!(template.lines().count(), CARD_ROWS);
    }

    #[test]
    fn data_rows_have_80_columns() {
        let template = CardTemplate::fortran();
        for row in 0..CARD_ROWS {
            if template.is_data_row(row) {
                let width = template.row(row).chars().filter(|c| *c != VERTICAL_BAR).count();
                assert_eq!(width, DATA_COLUMNS, "row {row}");
            }
        }
        assert!(!template.is_data_row(0));
        assert!(!template.is_data_row(3));
        assert!(!template.is_data_row(5));
        assert!(!template.is_data_row(16));
    }

    #[test]
    fn digit_rows_show_their_digit() {
        let template = CardTemplate::fortran();
        for (row, physical) in PUNCH_ROWS.iter().skip(2) {
            let digit = char::from(b'0' + physical);
            assert_eq!(template.background(*row, 0), digit);
            assert_eq!(template.background(*row, 79), digit);
        }
        assert_eq!(template.background(4, 24), 'F');
    }

    #[test]
    fn offsets_skip_internal_separators() {
        assert_eq!(CardTemplate::column_offset(0), 0);
        assert_eq!(CardTemplate::column_offset(4), 4);
        assert_eq!(CardTemplate::column_offset(5), 6);
        assert_eq!(CardTemplate::column_offset(6), 8);
        assert_eq!(CardTemplate::column_offset(71), 73);
        assert_eq!(CardTemplate::column_offset(72), 75);
        assert_eq!(CardTemplate::column_offset(79), 82);
    }

    #[test]
    fn offsets_agree_with_template_glyphs() {
        let template = CardTemplate::fortran();
        let digits: Vec<char> = template.row(6).chars().collect();
        for column in 0..DATA_COLUMNS {
            let x = 1 + CardTemplate::column_offset(column);
            assert_eq!(digits[x], '0', "column {column}");
        }
    }

    #[test]
    fn tab_stops_advance_in_order() {
        assert_eq!(CardTemplate::next_tab_stop(0), Some(5));
        assert_eq!(CardTemplate::next_tab_stop(5), Some(6));
        assert_eq!(CardTemplate::next_tab_stop(6), Some(72));
        assert_eq!(CardTemplate::next_tab_stop(40), Some(72));
        assert_eq!(CardTemplate::next_tab_stop(72), None);
    }
}
