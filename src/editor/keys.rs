//! Classification of raw input chunks.

pub const TAB: u8 = b'\t';
pub const RETURN: u8 = b'\r';
pub const BACKSPACE: u8 = 127;
pub const QUIT: u8 = b'q';
pub const SAVE: u8 = b'w';

const LEFT_ARROW: &[u8] = b"\x1b[D";
const RIGHT_ARROW: &[u8] = b"\x1b[C";
const DELETE: &[u8] = b"\x1b[3~";

/// One editor command, decoded from a single read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Any other single byte; it may or may not be punchable.
    Char(u8),
    Backspace,
    Tab,
    Return,
    Quit,
    Save,
    PreviousLine,
    NextLine,
    ClearLine,
    /// Multi-byte input that maps to no command.
    Unknown,
}

impl Key {
    /// Decode the bytes of one terminal read.
    ///
    /// Only whole chunks are recognised: a paste that arrives as one read is
    /// not split into keys.
    pub fn decode(chunk: &[u8]) -> Key {
        match chunk {
            [QUIT] => Key::Quit,
            [SAVE] => Key::Save,
            [BACKSPACE] => Key::Backspace,
            [TAB] => Key::Tab,
            [RETURN] => Key::Return,
            [byte] => Key::Char(*byte),
            LEFT_ARROW => Key::PreviousLine,
            RIGHT_ARROW => Key::NextLine,
            DELETE => Key::ClearLine,
            _ => Key::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_bytes() {
        assert_eq!(Key::decode(b"q"), Key::Quit);
        assert_eq!(Key::decode(b"w"), Key::Save);
        assert_eq!(Key::decode(&[127]), Key::Backspace);
        assert_eq!(Key::decode(b"\t"), Key::Tab);
        assert_eq!(Key::decode(b"\r"), Key::Return);
    }

    #[test]
    fn plain_bytes_pass_through() {
        assert_eq!(Key::decode(b"A"), Key::Char(b'A'));
        assert_eq!(Key::decode(b"a"), Key::Char(b'a'));
        assert_eq!(Key::decode(b"Q"), Key::Char(b'Q'));
        assert_eq!(Key::decode(&[3]), Key::Char(3));
    }

    #[test]
    fn escape_sequences() {
        assert_eq!(Key::decode(b"\x1b[D"), Key::PreviousLine);
        assert_eq!(Key::decode(b"\x1b[C"), Key::NextLine);
        assert_eq!(Key::decode(b"\x1b[3~"), Key::ClearLine);
        assert_eq!(Key::decode(b"\x1b[A"), Key::Unknown);
        assert_eq!(Key::decode(b"\x1b[2~"), Key::Unknown);
        assert_eq!(Key::decode(b"AB"), Key::Unknown);
        assert_eq!(Key::decode(b""), Key::Unknown);
    }
}
