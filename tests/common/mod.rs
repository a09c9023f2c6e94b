//! A tiny terminal that understands the output of the card writer.

#![allow(dead_code)]

/// Character grid driven by printable text, CR/LF and CSI cursor motions.
#[derive(Debug, Default)]
pub struct Screen {
    cells: Vec<Vec<char>>,
    x: usize,
    y: usize,
}

impl Screen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&mut self, bytes: &[u8]) {
        let text = std::str::from_utf8(bytes).expect("terminal output is UTF-8");
        let mut chars = text.chars();
        while let Some(ch) = chars.next() {
            match ch {
                '\x1b' => {
                    assert_eq!(chars.next(), Some('['), "only CSI sequences are expected");
                    let mut param = String::new();
                    let command = loop {
                        let c = chars.next().expect("unterminated CSI sequence");
                        if c.is_ascii_digit() {
                            param.push(c);
                        } else {
                            break c;
                        }
                    };
                    let n: usize = param.parse().unwrap_or(1).max(1);
                    match command {
                        'A' => self.y = self.y.saturating_sub(n),
                        'B' => self.y += n,
                        'C' => self.x += n,
                        'D' => self.x = self.x.saturating_sub(n),
                        'G' => self.x = n - 1,
                        other => panic!("unexpected CSI command {other:?}"),
                    }
                }
                '\r' => self.x = 0,
                '\n' => self.y += 1,
                _ => self.put(ch),
            }
        }
    }

    pub fn cursor(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    pub fn height(&self) -> usize {
        self.cells.len()
    }

    pub fn row(&self, y: usize) -> String {
        self.cells
            .get(y)
            .map(|row| row.iter().collect::<String>().trim_end().to_string())
            .unwrap_or_default()
    }

    pub fn rows(&self, range: std::ops::Range<usize>) -> Vec<String> {
        range.map(|y| self.row(y)).collect()
    }

    fn put(&mut self, ch: char) {
        while self.cells.len() <= self.y {
            self.cells.push(Vec::new());
        }
        let row = &mut self.cells[self.y];
        while row.len() <= self.x {
            row.push(' ');
        }
        row[self.x] = ch;
        self.x += 1;
    }
}

pub fn trimmed(rows: &[String]) -> Vec<String> {
    rows.iter().map(|row| row.trim_end().to_string()).collect()
}
