//! Byte cursor and the lexical helpers shared by the parser and the path
//! query engine.
//!
//! The cursor owns the row/column bookkeeping for one scan, so every parse
//! carries its own position and nothing is shared between calls. All reads
//! are bounds-checked; running past the end yields
//! [`JzonError::UnexpectedEndOfInput`] instead of a panic.

use std::fmt;

use crate::error::{JzonError, Result};

/// Leading-byte marks for 1..=4 byte UTF-8 sequences, indexed by length.
const FIRST_BYTE_MARK: [u8; 5] = [0x00, 0x00, 0xC0, 0xE0, 0xF0];

/// A row/column location inside the input, 0-based. Displays 1-based as
/// `[row:col]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}:{}]", self.row + 1, self.col + 1)
    }
}

/// Forward-only reader over a byte slice that tracks the current [`Position`].
#[derive(Debug, Clone)]
pub(crate) struct Cursor<'a> {
    input: &'a [u8],
    offset: usize,
    position: Position,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            offset: 0,
            position: Position::default(),
        }
    }

    /// Number of bytes consumed so far.
    pub(crate) fn offset(&self) -> usize {
        self.offset
    }

    pub(crate) fn position(&self) -> Position {
        self.position
    }

    pub(crate) fn is_eof(&self) -> bool {
        self.offset >= self.input.len()
    }

    pub(crate) fn peek(&self) -> Option<u8> {
        self.input.get(self.offset).copied()
    }

    pub(crate) fn peek_at(&self, ahead: usize) -> Option<u8> {
        self.input.get(self.offset + ahead).copied()
    }

    /// The bytes consumed since offset `start`.
    pub(crate) fn since(&self, start: usize) -> &'a [u8] {
        &self.input[start.min(self.offset)..self.offset]
    }

    /// Up to `len` unconsumed bytes, fewer if the input ends first.
    pub(crate) fn lookahead(&self, len: usize) -> &'a [u8] {
        let end = (self.offset + len).min(self.input.len());
        &self.input[self.offset..end]
    }

    /// Consume one byte, updating row/col. `\r\n` counts as a single break.
    pub(crate) fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.offset += 1;
        match b {
            b'\n' => self.new_line(),
            b'\r' if self.peek() != Some(b'\n') => self.new_line(),
            b'\r' => {}
            _ => self.position.col += 1,
        }
        Some(b)
    }

    /// Consume up to `count` bytes.
    pub(crate) fn advance(&mut self, count: usize) {
        for _ in 0..count {
            if self.bump().is_none() {
                break;
            }
        }
    }

    fn new_line(&mut self) {
        self.position.row += 1;
        self.position.col = 0;
    }

    /// Peek one byte or fail with `UnexpectedEndOfInput`.
    pub(crate) fn require(&self) -> Result<u8> {
        self.peek().ok_or_else(|| self.eof())
    }

    /// Consume `byte` or report what was found instead.
    pub(crate) fn expect(&mut self, byte: u8, expected: &'static str) -> Result<()> {
        let found = self.require()?;
        if found != byte {
            return Err(self.unexpected(expected, found));
        }
        self.bump();
        Ok(())
    }

    pub(crate) fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.peek() {
            self.bump();
        }
    }

    pub(crate) fn eof(&self) -> JzonError {
        JzonError::UnexpectedEndOfInput {
            position: self.position,
        }
    }

    pub(crate) fn unexpected(&self, expected: &'static str, found: u8) -> JzonError {
        JzonError::UnexpectedByte {
            expected,
            found,
            position: self.position,
        }
    }

    /// Read four hex digits as one UTF-16 code unit.
    pub(crate) fn read_hex4(&mut self) -> Result<u32> {
        let mut unit = 0u32;
        for _ in 0..4 {
            let b = self.require()?;
            let digit = hex_value(b).ok_or_else(|| self.unexpected("one of `0-9a-fA-F`", b))?;
            self.bump();
            unit = (unit << 4) | digit;
        }
        Ok(unit)
    }

    /// Decode a `\uXXXX` escape (the cursor sits on the backslash), joining a
    /// surrogate pair when needed, and append its UTF-8 encoding to `out`.
    pub(crate) fn read_unicode_escape(&mut self, out: &mut Vec<u8>) -> Result<()> {
        self.expect(b'\\', "`\\`")?;
        self.expect(b'u', "`u`")?;
        let start = self.position;
        let high = self.read_hex4()?;
        if is_invalid_unit(high) {
            return Err(JzonError::InvalidCodePoint { position: start });
        }

        let code_point = if (0xD800..=0xDBFF).contains(&high) {
            if self.peek() != Some(b'\\') || self.peek_at(1) != Some(b'u') {
                return Err(JzonError::InvalidCodePoint {
                    position: self.position,
                });
            }
            self.bump();
            self.bump();
            let low = self.read_hex4()?;
            if !(0xDC00..=0xDFFF).contains(&low) {
                return Err(JzonError::InvalidCodePoint {
                    position: self.position,
                });
            }
            0x10000 + (((high & 0x3FF) << 10) | (low & 0x3FF))
        } else {
            high
        };

        encode_utf8(code_point, out);
        Ok(())
    }
}

/// Map the byte after a backslash through the fixed escape table.
pub(crate) fn unescape(b: u8) -> Option<u8> {
    match b {
        b'"' => Some(b'"'),
        b'/' => Some(b'/'),
        b'\\' => Some(b'\\'),
        b'b' => Some(0x08),
        b'f' => Some(0x0C),
        b'n' => Some(b'\n'),
        b'r' => Some(b'\r'),
        b't' => Some(b'\t'),
        _ => None,
    }
}

pub(crate) fn hex_value(b: u8) -> Option<u32> {
    match b {
        b'0'..=b'9' => Some(u32::from(b - b'0')),
        b'a'..=b'f' => Some(u32::from(b - b'a' + 10)),
        b'A'..=b'F' => Some(u32::from(b - b'A' + 10)),
        _ => None,
    }
}

/// Units that can never start a character: NUL and a lone low surrogate.
fn is_invalid_unit(unit: u32) -> bool {
    unit == 0 || (0xDC00..=0xDFFF).contains(&unit)
}

/// Append the UTF-8 encoding of `code_point` to `out`.
///
/// Trailing bytes carry six payload bits each under a `10` prefix; the
/// leading byte gets the length-specific mark from [`FIRST_BYTE_MARK`].
pub(crate) fn encode_utf8(code_point: u32, out: &mut Vec<u8>) {
    let len = match code_point {
        0..=0x7F => 1,
        0x80..=0x7FF => 2,
        0x800..=0xFFFF => 3,
        _ => 4,
    };

    let mut buf = [0u8; 4];
    let mut cp = code_point;
    for slot in buf[1..len].iter_mut().rev() {
        *slot = 0x80 | (cp & 0x3F) as u8;
        cp >>= 6;
    }
    buf[0] = cp as u8 | FIRST_BYTE_MARK[len];
    out.extend_from_slice(&buf[..len]);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(cp: u32) -> Vec<u8> {
        let mut out = Vec::new();
        encode_utf8(cp, &mut out);
        out
    }

    #[test]
    fn encode_utf8_matches_std_for_every_width() {
        for cp in [0x41, 0xE9, 0x5F20, 0x1F600, 0x10FFFF] {
            let expected = char::from_u32(cp).unwrap().to_string().into_bytes();
            assert_eq!(encoded(cp), expected, "code point {cp:#X}");
        }
    }

    #[test]
    fn read_hex4_accepts_mixed_case() {
        let mut cursor = Cursor::new(b"00aF");
        assert_eq!(cursor.read_hex4().unwrap(), 0xAF);
        assert!(cursor.is_eof());
    }

    #[test]
    fn read_hex4_rejects_non_hex() {
        let mut cursor = Cursor::new(b"00g0");
        assert!(matches!(
            cursor.read_hex4(),
            Err(JzonError::UnexpectedByte { found: b'g', .. })
        ));
    }

    #[test]
    fn read_hex4_reports_truncation() {
        let mut cursor = Cursor::new(b"00");
        assert!(matches!(
            cursor.read_hex4(),
            Err(JzonError::UnexpectedEndOfInput { .. })
        ));
    }

    #[test]
    fn unicode_escape_leaves_remainder() {
        let mut cursor = Cursor::new(b"\\u5f20abcd");
        let mut out = Vec::new();
        cursor.read_unicode_escape(&mut out).unwrap();
        assert_eq!(out, "张".as_bytes());
        assert_eq!(cursor.lookahead(16), b"abcd");
    }

    #[test]
    fn unicode_escape_joins_surrogate_pair() {
        let mut cursor = Cursor::new(b"\\ud83d\\ude00");
        let mut out = Vec::new();
        cursor.read_unicode_escape(&mut out).unwrap();
        assert_eq!(out, "😀".as_bytes());
    }

    #[test]
    fn unicode_escape_rejects_lone_surrogates_and_nul() {
        for input in [
            &b"\\ud83d"[..],
            b"\\ud83dx",
            b"\\ude00",
            b"\\u0000",
            b"\\ud83dA",
        ] {
            let mut cursor = Cursor::new(input);
            let mut out = Vec::new();
            assert!(
                matches!(
                    cursor.read_unicode_escape(&mut out),
                    Err(JzonError::InvalidCodePoint { .. })
                ),
                "input {:?}",
                String::from_utf8_lossy(input)
            );
        }
    }

    #[test]
    fn bump_tracks_rows_and_columns() {
        let mut cursor = Cursor::new(b"a\nb\r\nc\rd");
        while cursor.bump().is_some() {}
        assert_eq!(cursor.position(), Position { row: 3, col: 1 });
        assert_eq!(cursor.offset(), 8);
    }

    #[test]
    fn position_displays_one_based() {
        assert_eq!(Position { row: 0, col: 4 }.to_string(), "[1:5]");
    }
}
