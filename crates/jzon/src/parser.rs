//! Recursive-descent JSON parser.
//!
//! Converts UTF-8 bytes into a [`Node`] tree. Dispatch happens on the first
//! non-whitespace byte of each value:
//!
//! - `{` object, `[` array, `"` string
//! - `t` / `f` / `n` the `true` / `false` / `null` literals
//! - `-` / `0-9` a number, scanned by [`crate::number`]
//!
//! Every error carries the `[row:col]` of the offending byte. The position is
//! owned by a per-call cursor, so independent parses never interfere.

use std::str::FromStr;

use crate::error::{JzonError, Result};
use crate::lexer::{unescape, Cursor};
use crate::limits::Limits;
use crate::node::{Map, Node};
use crate::number::scan_number;

const VALUE_START: &str = "one of `{[\"-0-9ftn`";
const ESCAPES: &str = "one of `\"\\/bfnrtu`";

/// Parse a complete JSON document. Only whitespace may follow the value.
///
/// ```
/// use jzon::{parse, Node};
///
/// let node = parse(b" [1, 2.5, \"x\"] ").unwrap();
/// assert_eq!(node.value_at(1).unwrap(), &Node::Float(2.5));
/// assert!(parse(b"[1] 2").is_err());
/// ```
pub fn parse(input: &[u8]) -> Result<Node> {
    parse_with_limits(input, Limits::default())
}

/// [`parse`] for text already known to be UTF-8.
pub fn parse_str(text: &str) -> Result<Node> {
    parse(text.as_bytes())
}

/// [`parse`] with caller-supplied [`Limits`].
pub fn parse_with_limits(input: &[u8], limits: Limits) -> Result<Node> {
    let mut parser = Parser::new(input, limits);
    let node = parser.parse_value()?;
    parser.cursor.skip_whitespace();
    if !parser.cursor.is_eof() {
        return Err(JzonError::TrailingContent {
            position: parser.cursor.position(),
        });
    }
    log::trace!("parsed {} bytes into {}", input.len(), node.node_type());
    Ok(node)
}

/// Parse the first JSON value in `input` and return it with the number of
/// bytes consumed. Whatever follows the value is left alone.
pub fn parse_prefix(input: &[u8]) -> Result<(Node, usize)> {
    let mut parser = Parser::new(input, Limits::default());
    let node = parser.parse_value()?;
    let consumed = parser.cursor.offset();
    log::trace!("parsed {consumed} of {} bytes into {}", input.len(), node.node_type());
    Ok((node, consumed))
}

impl FromStr for Node {
    type Err = JzonError;

    fn from_str(s: &str) -> Result<Self> {
        parse_str(s)
    }
}

struct Parser<'a> {
    cursor: Cursor<'a>,
    limits: Limits,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a [u8], limits: Limits) -> Self {
        Self {
            cursor: Cursor::new(input),
            limits,
            depth: 0,
        }
    }

    fn parse_value(&mut self) -> Result<Node> {
        self.cursor.skip_whitespace();
        match self.cursor.require()? {
            b'{' => self.parse_object(),
            b'[' => self.parse_array(),
            b'"' => self.parse_string().map(Node::String),
            b't' => self.parse_literal("true", Node::Bool(true)),
            b'f' => self.parse_literal("false", Node::Bool(false)),
            b'n' => self.parse_literal("null", Node::Null),
            b'-' | b'0'..=b'9' => scan_number(&mut self.cursor).map(Node::from),
            other => Err(self.cursor.unexpected(VALUE_START, other)),
        }
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.limits.max_depth {
            return Err(JzonError::DepthLimitExceeded {
                limit: self.limits.max_depth,
                position: self.cursor.position(),
            });
        }
        Ok(())
    }

    fn parse_object(&mut self) -> Result<Node> {
        self.enter()?;
        self.cursor.expect(b'{', "`{`")?;
        let mut map = Map::new();

        self.cursor.skip_whitespace();
        if self.cursor.require()? == b'}' {
            self.cursor.bump();
            self.depth -= 1;
            return Ok(Node::Object(map));
        }

        loop {
            self.cursor.skip_whitespace();
            match self.cursor.require()? {
                b'"' => {}
                // Only reachable after a comma.
                b'}' => return Err(self.cursor.unexpected("a value", b'}')),
                other => return Err(self.cursor.unexpected("`\"`", other)),
            }
            let key = self.parse_string()?;

            self.cursor.skip_whitespace();
            self.cursor.expect(b':', "`:`")?;
            let value = self.parse_value()?;
            map.insert(key, value);

            self.cursor.skip_whitespace();
            match self.cursor.require()? {
                b',' => {
                    self.cursor.bump();
                }
                b'}' => {
                    self.cursor.bump();
                    break;
                }
                other => return Err(self.cursor.unexpected("one of `},`", other)),
            }
        }

        self.depth -= 1;
        Ok(Node::Object(map))
    }

    fn parse_array(&mut self) -> Result<Node> {
        self.enter()?;
        self.cursor.expect(b'[', "`[`")?;
        let mut items = Vec::new();

        self.cursor.skip_whitespace();
        if self.cursor.require()? == b']' {
            self.cursor.bump();
            self.depth -= 1;
            return Ok(Node::Array(items));
        }

        loop {
            self.cursor.skip_whitespace();
            if self.cursor.require()? == b']' {
                return Err(self.cursor.unexpected("a value", b']'));
            }
            items.push(self.parse_value()?);

            self.cursor.skip_whitespace();
            match self.cursor.require()? {
                b',' => {
                    self.cursor.bump();
                }
                b']' => {
                    self.cursor.bump();
                    break;
                }
                other => return Err(self.cursor.unexpected("one of `],`", other)),
            }
        }

        self.depth -= 1;
        Ok(Node::Array(items))
    }

    /// Parse a quoted string, decoding escapes. Used for keys and values.
    fn parse_string(&mut self) -> Result<String> {
        self.cursor.expect(b'"', "`\"`")?;
        let mut buf = Vec::new();

        loop {
            match self.cursor.require()? {
                b'"' => {
                    self.cursor.bump();
                    break;
                }
                b'\\' if self.cursor.peek_at(1) == Some(b'u') => {
                    self.cursor.read_unicode_escape(&mut buf)?;
                }
                b'\\' => {
                    self.cursor.bump();
                    let escaped = self.cursor.require()?;
                    let byte = unescape(escaped)
                        .ok_or_else(|| self.cursor.unexpected(ESCAPES, escaped))?;
                    buf.push(byte);
                    self.cursor.bump();
                }
                control @ 0x00..=0x1F => {
                    return Err(self.cursor.unexpected("a non-control character", control));
                }
                byte => {
                    buf.push(byte);
                    self.cursor.bump();
                }
            }
        }

        String::from_utf8(buf).map_err(|_| JzonError::InvalidUtf8 {
            position: self.cursor.position(),
        })
    }

    fn parse_literal(&mut self, literal: &'static str, node: Node) -> Result<Node> {
        let found = self.cursor.lookahead(literal.len());
        if found != literal.as_bytes() {
            return Err(JzonError::UnexpectedLiteral {
                expected: literal,
                found: String::from_utf8_lossy(found).into_owned(),
                position: self.cursor.position(),
            });
        }
        self.cursor.advance(literal.len());
        Ok(node)
    }
}
