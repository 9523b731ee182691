//! Numeric-literal scanner.
//!
//! A single state machine validates the JSON number grammar and decides
//! whether a literal is an integer or a float. The integer magnitude is
//! accumulated digit by digit; floats are converted once from the validated
//! lexeme, which keeps them correctly rounded instead of piling up error one
//! exponent digit at a time.
//!
//! Integer literals outside the `i64` range are promoted to floats.

use crate::error::Result;
use crate::lexer::Cursor;

/// A scanned JSON number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    /// Scan one number at the start of `input`, returning it together with the
    /// number of bytes consumed. Bytes after the numeral are left alone, so
    /// `123.4f` yields `Float(123.4)` and a length of 5.
    ///
    /// ```
    /// use jzon::Number;
    ///
    /// assert_eq!(Number::parse_prefix(b"1.2E+04").unwrap(), (Number::Float(12000.0), 7));
    /// assert_eq!(Number::parse_prefix(b"-12,").unwrap(), (Number::Integer(-12), 3));
    /// ```
    pub fn parse_prefix(input: &[u8]) -> Result<(Number, usize)> {
        let mut cursor = Cursor::new(input);
        let number = scan_number(&mut cursor)?;
        Ok((number, cursor.offset()))
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }

    /// The value as a float, converting integers.
    pub fn as_f64(&self) -> f64 {
        match *self {
            Number::Integer(n) => n as f64,
            Number::Float(f) => f,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    /// A leading `0`.
    Zero,
    /// The first digit of a non-zero integer part.
    NonZero,
    /// Further integer digits.
    Digit,
    Dot,
    /// Digits after the dot.
    Fraction,
    Exponent,
    Plus,
    Minus,
    /// Digits of the exponent.
    ExponentDigit,
}

impl State {
    fn transition(self, b: u8) -> Option<State> {
        use State::*;
        match (self, b) {
            (Start, b'0') => Some(Zero),
            (Start, b'1'..=b'9') => Some(NonZero),
            (NonZero | Digit, b'0'..=b'9') => Some(Digit),
            (Zero | NonZero | Digit, b'.') => Some(Dot),
            (Dot | Fraction, b'0'..=b'9') => Some(Fraction),
            (Zero | NonZero | Digit | Fraction, b'e' | b'E') => Some(Exponent),
            (Exponent, b'+') => Some(Plus),
            (Exponent, b'-') => Some(Minus),
            (Exponent | Plus | Minus | ExponentDigit, b'0'..=b'9') => Some(ExponentDigit),
            _ => None,
        }
    }

    fn is_accepting(self) -> bool {
        matches!(
            self,
            State::Zero | State::NonZero | State::Digit | State::Fraction | State::ExponentDigit
        )
    }

    fn expected(self) -> &'static str {
        match self {
            State::Start | State::Dot | State::Plus | State::Minus | State::ExponentDigit => {
                "one of `0-9`"
            }
            State::Zero => "one of `.eE`",
            State::NonZero | State::Digit => "one of `0-9.eE`",
            State::Fraction => "one of `0-9eE`",
            State::Exponent => "one of `+-0-9`",
        }
    }
}

fn is_numeral_byte(b: u8) -> bool {
    matches!(b, b'0'..=b'9' | b'-' | b'+' | b'e' | b'E' | b'.')
}

/// Scan a number at the cursor. A leading `-` is consumed first, the unsigned
/// numeral is scanned, and the result negated.
pub(crate) fn scan_number(cursor: &mut Cursor<'_>) -> Result<Number> {
    let start = cursor.offset();
    let negative = cursor.peek() == Some(b'-');
    if negative {
        cursor.bump();
    }

    let (magnitude, is_int) = scan_unsigned(cursor)?;

    let integer = match magnitude {
        Some(m) if is_int && negative => 0i64.checked_sub_unsigned(m),
        Some(m) if is_int => i64::try_from(m).ok(),
        _ => None,
    };
    if let Some(n) = integer {
        return Ok(Number::Integer(n));
    }

    let lexeme = cursor.since(start);
    let float = std::str::from_utf8(lexeme)
        .ok()
        .and_then(|text| text.parse::<f64>().ok())
        .ok_or_else(|| cursor.unexpected("a number", lexeme.first().copied().unwrap_or(b'-')))?;
    if is_int {
        log::debug!(
            "integer literal {} overflows i64, promoted to float",
            String::from_utf8_lossy(lexeme)
        );
    }
    Ok(Number::Float(float))
}

/// Run the state machine over an unsigned numeral. Returns the integer
/// magnitude (`None` once it overflows `u64`) and whether the literal stayed
/// an integer.
fn scan_unsigned(cursor: &mut Cursor<'_>) -> Result<(Option<u64>, bool)> {
    let mut state = State::Start;
    let mut magnitude = Some(0u64);
    let mut is_int = true;

    while let Some(b) = cursor.peek() {
        let Some(next) = state.transition(b) else {
            if state.is_accepting() && !is_numeral_byte(b) {
                break;
            }
            return Err(cursor.unexpected(state.expected(), b));
        };

        match next {
            State::NonZero | State::Digit => {
                let digit = u64::from(b - b'0');
                magnitude = magnitude
                    .and_then(|m| m.checked_mul(10))
                    .and_then(|m| m.checked_add(digit));
            }
            State::Dot | State::Exponent => is_int = false,
            _ => {}
        }

        state = next;
        cursor.bump();
    }

    if !state.is_accepting() {
        return Err(cursor.eof());
    }
    Ok((magnitude, is_int))
}
