use std::collections::HashMap;
use thiserror::Error;

/// Punched rows of a single card column.
///
/// Bit meaning (LSB → MSB): bit0 = row 0, ..., bit9 = row 9, bit11 = row 11,
/// bit12 = row 12. Bit 10 is never set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellMask(pub u16);

impl CellMask {
    pub const EMPTY: CellMask = CellMask(0);

    /// Whether the hole for physical `row` (12, 11 or 0..=9) is punched.
    pub fn is_punched(self, row: u8) -> bool {
        self.0 & (1 << row) != 0
    }

    /// Physical rows punched in this column, in card order (12, 11, 0..9).
    pub fn rows(self) -> Vec<u8> {
        PHYSICAL_ROWS
            .iter()
            .copied()
            .filter(|row| self.is_punched(*row))
            .collect()
    }
}

impl std::ops::BitOr for CellMask {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self::Output {
        CellMask(self.0 | rhs.0)
    }
}

/// The 12 physical rows from the top edge of the card downwards.
pub const PHYSICAL_ROWS: [u8; 12] = [12, 11, 0, 1, 2, 3, 4, 5, 6, 7, 8, 9];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    #[error("unsupported character: {0:?} (0x{1:02X})")]
    Unsupported(char, u8),
}

pub trait PunchEncoding {
    fn name(&self) -> &'static str;
    fn encode(&self, byte: u8) -> Result<CellMask, EncodeError>;
    fn decode(&self, mask: CellMask) -> Option<u8>;
    fn is_supported(&self, byte: u8) -> bool {
        self.encode(byte).is_ok()
    }
    /// Punch pattern for drawing: unsupported bytes punch nothing.
    fn mask_or_blank(&self, byte: u8) -> CellMask {
        self.encode(byte).unwrap_or(CellMask::EMPTY)
    }
}

/// Valid character set, in IBM 029 keyboard order.
pub const VALID_SET: &[u8] = b"&-0123456789ABCDEFGHIJKLMNOPQR/STUVWXYZ:#@'=\".<(+|!$*); ,%_>?";

/// Hollerith alphabet of the IBM 029 key punch.
///
/// - Digits 0–9: the matching digit row
/// - A–I: 12 + 1–9; J–R: 11 + 1–9; S–Z: 0 + 2–9
/// - Space: no punches
/// - Specials: one or two zone/digit punches, usually with an 8 punch
///
/// Lookups are exact. Lowercase letters are not part of the alphabet.
/// Built once at startup and shared by reference; never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Alphabet {
    map: HashMap<u8, CellMask>,
    reverse: HashMap<CellMask, u8>,
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::new()
    }
}

impl Alphabet {
    pub fn new() -> Self {
        let mut m = HashMap::new();

        m.insert(b' ', CellMask::EMPTY);

        for d in b'0'..=b'9' {
            m.insert(d, row_mask(d - b'0'));
        }
        for (i, ch) in (b'A'..=b'I').enumerate() {
            m.insert(ch, zone12() | row_mask(i as u8 + 1));
        }
        for (i, ch) in (b'J'..=b'R').enumerate() {
            m.insert(ch, zone11() | row_mask(i as u8 + 1));
        }
        for (i, ch) in (b'S'..=b'Z').enumerate() {
            m.insert(ch, row_mask(0) | row_mask(i as u8 + 2));
        }

        m.insert(b'&', zone12()); // 12
        m.insert(b'-', zone11()); // 11
        m.insert(b'/', row_mask(0) | row_mask(1)); // 0-1
        m.insert(b':', row_mask(2) | row_mask(8)); // 2-8
        m.insert(b'#', row_mask(3) | row_mask(8)); // 3-8
        m.insert(b'@', row_mask(4) | row_mask(8)); // 4-8
        m.insert(b'\'', row_mask(5) | row_mask(8)); // 5-8
        m.insert(b'=', row_mask(6) | row_mask(8)); // 6-8
        m.insert(b'"', row_mask(7) | row_mask(8)); // 7-8
        m.insert(b'.', zone12() | row_mask(3) | row_mask(8)); // 12-3-8
        m.insert(b'<', zone12() | row_mask(4) | row_mask(8)); // 12-4-8
        m.insert(b'(', zone12() | row_mask(5) | row_mask(8)); // 12-5-8
        m.insert(b'+', zone12() | row_mask(6) | row_mask(8)); // 12-6-8
        m.insert(b'|', zone12() | row_mask(7) | row_mask(8)); // 12-7-8
        m.insert(b'!', zone11() | row_mask(2) | row_mask(8)); // 11-2-8
        m.insert(b'$', zone11() | row_mask(3) | row_mask(8)); // 11-3-8
        m.insert(b'*', zone11() | row_mask(4) | row_mask(8)); // 11-4-8
        m.insert(b')', zone11() | row_mask(5) | row_mask(8)); // 11-5-8
        m.insert(b';', zone11() | row_mask(6) | row_mask(8)); // 11-6-8
        m.insert(b',', row_mask(0) | row_mask(3) | row_mask(8)); // 0-3-8
        m.insert(b'%', row_mask(0) | row_mask(4) | row_mask(8)); // 0-4-8
        m.insert(b'_', row_mask(0) | row_mask(5) | row_mask(8)); // 0-5-8
        m.insert(b'>', row_mask(0) | row_mask(6) | row_mask(8)); // 0-6-8
        m.insert(b'?', row_mask(0) | row_mask(7) | row_mask(8)); // 0-7-8

        let reverse = m.iter().map(|(ch, mask)| (*mask, *ch)).collect();
        Self { map: m, reverse }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl PunchEncoding for Alphabet {
    fn name(&self) -> &'static str {
        "IBM029"
    }

    fn encode(&self, byte: u8) -> Result<CellMask, EncodeError> {
        self.map
            .get(&byte)
            .copied()
            .ok_or(EncodeError::Unsupported(char::from(byte), byte))
    }

    fn decode(&self, mask: CellMask) -> Option<u8> {
        self.reverse.get(&mask).copied()
    }
}

fn row_mask(row: u8) -> CellMask {
    CellMask(1u16 << row)
}
fn zone11() -> CellMask {
    CellMask(1u16 << 11)
}
fn zone12() -> CellMask {
    CellMask(1u16 << 12)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const GOLDEN: &[(u8, &[u8])] = &[
        (b'0', &[0]),
        (b'1', &[1]),
        (b'5', &[5]),
        (b'9', &[9]),
        (b'A', &[12, 1]),
        (b'E', &[12, 5]),
        (b'H', &[12, 8]),
        (b'I', &[12, 9]),
        (b'J', &[11, 1]),
        (b'O', &[11, 6]),
        (b'R', &[11, 9]),
        (b'S', &[0, 2]),
        (b'W', &[0, 6]),
        (b'Z', &[0, 9]),
        (b' ', &[]),
        (b'&', &[12]),
        (b'-', &[11]),
        (b'/', &[0, 1]),
        (b':', &[2, 8]),
        (b'#', &[3, 8]),
        (b'@', &[4, 8]),
        (b'\'', &[5, 8]),
        (b'=', &[6, 8]),
        (b'"', &[7, 8]),
        (b'.', &[12, 3, 8]),
        (b'<', &[12, 4, 8]),
        (b'(', &[12, 5, 8]),
        (b'+', &[12, 6, 8]),
        (b'|', &[12, 7, 8]),
        (b'!', &[11, 2, 8]),
        (b'$', &[11, 3, 8]),
        (b'*', &[11, 4, 8]),
        (b')', &[11, 5, 8]),
        (b';', &[11, 6, 8]),
        (b',', &[0, 3, 8]),
        (b'%', &[0, 4, 8]),
        (b'_', &[0, 5, 8]),
        (b'>', &[0, 6, 8]),
        (b'?', &[0, 7, 8]),
    ];

    #[test]
    fn golden_rows_match_hollerith_table() {
        let alphabet = Alphabet::new();
        for (ch, rows) in GOLDEN {
            let mask = alphabet.encode(*ch).unwrap();
            assert_eq!(mask.rows(), rows.to_vec(), "rows for {:?}", char::from(*ch));
        }
    }

    #[test]
    fn every_letter_has_one_zone_and_one_digit() {
        let alphabet = Alphabet::new();
        for ch in b'A'..=b'Z' {
            let rows = alphabet.encode(ch).unwrap().rows();
            assert_eq!(rows.len(), 2, "{}", char::from(ch));
            assert!(matches!(rows[0], 12 | 11 | 0));
        }
    }

    #[test]
    fn valid_set_is_exactly_the_alphabet() {
        let alphabet = Alphabet::new();
        assert_eq!(alphabet.len(), VALID_SET.len());
        for byte in 0..=u8::MAX {
            assert_eq!(
                alphabet.is_supported(byte),
                VALID_SET.contains(&byte),
                "byte 0x{:02X}",
                byte
            );
        }
    }

    #[test]
    fn lowercase_is_rejected() {
        let alphabet = Alphabet::new();
        assert_eq!(
            alphabet.encode(b'a'),
            Err(EncodeError::Unsupported('a', b'a'))
        );
        assert_eq!(alphabet.mask_or_blank(b'a'), CellMask::EMPTY);
        assert!(!alphabet.is_supported(0xC3));
    }

    #[test]
    fn codes_are_unique_and_decode_back() {
        let alphabet = Alphabet::new();
        for &byte in VALID_SET {
            let mask = alphabet.encode(byte).unwrap();
            assert_eq!(alphabet.decode(mask), Some(byte));
            assert!(!mask.is_punched(10));
        }
        assert_eq!(alphabet.decode(CellMask(1 << 10)), None);
    }
}
