//! Path query engine.
//!
//! A path such as `$.store.books[1].title` is tokenized lazily by a small state
//! machine ([`PathSteps`]) and each [`Step`] is resolved against the tree as
//! soon as it is produced. Grammar:
//!
//! ```text
//! path   := '$' step* ';'?
//! step   := '.' key | '[' digits ']'
//! key    := (byte | '\' escape)+        -- ends at an unescaped '.', '[' or ';'
//! ```
//!
//! Inside keys `\.`, `\[`, `\]` and `\;` stand for the literal separator,
//! `\uXXXX` follows the JSON string rules and the usual JSON escapes apply.
//! A trailing `;` ends the path and must be its last byte.

use std::fmt;

use crate::error::{JzonError, Result, StateSet};
use crate::lexer::{unescape, Cursor};
use crate::node::Node;
use crate::number::{scan_number, Number};

const KEY_ESCAPES: &str = "one of `.[];\"\\/bfnrtu`";

/// States of the path tokenizer, reported in [`JzonError::QueryState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathState {
    Start,
    Dollar,
    Dot,
    LeftBracket,
    RightBracket,
    Key,
    Index,
    End,
}

impl PathState {
    /// States that may legally follow this one.
    fn successors(self) -> StateSet {
        use PathState::*;
        let states: &'static [PathState] = match self {
            Start => &[Dollar],
            Dollar | Key | RightBracket => &[Dot, LeftBracket, End],
            Dot => &[Key],
            LeftBracket => &[Index],
            Index => &[RightBracket],
            End => &[],
        };
        StateSet(states)
    }

    fn can_end(self) -> bool {
        matches!(self, PathState::Dollar | PathState::Key | PathState::RightBracket)
    }
}

impl fmt::Display for PathState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PathState::Start => "Start",
            PathState::Dollar => "Dollar",
            PathState::Dot => "Dot",
            PathState::LeftBracket => "LeftBracket",
            PathState::RightBracket => "RightBracket",
            PathState::Key => "Key",
            PathState::Index => "Index",
            PathState::End => "End",
        };
        f.write_str(name)
    }
}

/// One resolved path component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Key(String),
    Index(usize),
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Key(key) => write!(f, ".{}", escape_key(key)),
            Step::Index(index) => write!(f, "[{index}]"),
        }
    }
}

/// Lazy tokenizer over a path expression. Yields each [`Step`] as soon as it
/// is complete, and stops after the first error.
#[derive(Debug, Clone)]
pub struct PathSteps<'p> {
    cursor: Cursor<'p>,
    state: PathState,
}

/// Tokenize `path` into steps without touching any tree.
///
/// ```
/// use jzon::query::steps;
/// use jzon::Step;
///
/// let parsed: Vec<Step> = steps("$.a[2].b").collect::<Result<_, _>>().unwrap();
/// assert_eq!(parsed, [Step::Key("a".into()), Step::Index(2), Step::Key("b".into())]);
/// ```
pub fn steps(path: &str) -> PathSteps<'_> {
    PathSteps {
        cursor: Cursor::new(path.as_bytes()),
        state: PathState::Start,
    }
}

impl PathSteps<'_> {
    pub fn state(&self) -> PathState {
        self.state
    }

    fn fail(&self) -> JzonError {
        JzonError::QueryState {
            expected: self.state.successors(),
            actual: self.state,
            position: self.cursor.offset(),
        }
    }

    fn advance(&mut self) -> Result<Option<Step>> {
        loop {
            let Some(b) = self.cursor.peek() else {
                if self.state.can_end() {
                    self.state = PathState::End;
                    return Ok(None);
                }
                return Err(self.fail());
            };

            match (self.state, b) {
                (PathState::Start, b'$') => {
                    self.cursor.bump();
                    self.state = PathState::Dollar;
                }
                (state, b'.') if state.can_end() => {
                    self.cursor.bump();
                    self.state = PathState::Dot;
                }
                (state, b'[') if state.can_end() => {
                    self.cursor.bump();
                    self.state = PathState::LeftBracket;
                }
                (state, b';') if state.can_end() && self.cursor.peek_at(1).is_none() => {
                    self.cursor.bump();
                    self.state = PathState::End;
                    return Ok(None);
                }
                (PathState::Dot, _) => {
                    let key = self.scan_key()?;
                    self.state = PathState::Key;
                    return Ok(Some(Step::Key(key)));
                }
                (PathState::LeftBracket, b'0'..=b'9') => {
                    let index = self.scan_index()?;
                    self.state = PathState::Index;
                    return Ok(Some(Step::Index(index)));
                }
                (PathState::Index, b']') => {
                    self.cursor.bump();
                    self.state = PathState::RightBracket;
                }
                _ => return Err(self.fail()),
            }
        }
    }

    fn scan_key(&mut self) -> Result<String> {
        let mut buf = Vec::new();
        while let Some(b) = self.cursor.peek() {
            match b {
                b'.' | b'[' | b';' => break,
                b'\\' if self.cursor.peek_at(1) == Some(b'u') => {
                    self.cursor.read_unicode_escape(&mut buf)?;
                }
                b'\\' => {
                    self.cursor.bump();
                    let escaped = self.cursor.require()?;
                    let byte = match escaped {
                        b'.' | b'[' | b']' | b';' => escaped,
                        _ => unescape(escaped)
                            .ok_or_else(|| self.cursor.unexpected(KEY_ESCAPES, escaped))?,
                    };
                    buf.push(byte);
                    self.cursor.bump();
                }
                _ => {
                    buf.push(b);
                    self.cursor.bump();
                }
            }
        }

        if buf.is_empty() {
            return Err(self.fail());
        }
        String::from_utf8(buf).map_err(|_| JzonError::InvalidUtf8 {
            position: self.cursor.position(),
        })
    }

    fn scan_index(&mut self) -> Result<usize> {
        let start = self.cursor.offset();
        let scanned = scan_number(&mut self.cursor).map_err(|_| self.index_error(start))?;
        match scanned {
            Number::Integer(n) => usize::try_from(n).map_err(|_| self.index_error(start)),
            Number::Float(_) => Err(self.index_error(start)),
        }
    }

    fn index_error(&self, start: usize) -> JzonError {
        JzonError::QueryState {
            expected: PathState::LeftBracket.successors(),
            actual: PathState::LeftBracket,
            position: start,
        }
    }
}

impl Iterator for PathSteps<'_> {
    type Item = Result<Step>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state == PathState::End {
            return None;
        }
        match self.advance() {
            Ok(step) => step.map(Ok),
            Err(err) => {
                self.state = PathState::End;
                Some(Err(err))
            }
        }
    }
}

/// Escape `key` so that it reads back as a single path step.
///
/// ```
/// assert_eq!(jzon::query::escape_key("a.b[0]"), r"a\.b\[0\]");
/// ```
pub fn escape_key(key: &str) -> String {
    let mut escaped = String::with_capacity(key.len());
    for c in key.chars() {
        if matches!(c, '.' | '[' | ']' | ';' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn child<'n>(node: &'n Node, step: Step) -> Result<&'n Node> {
    match (node, step) {
        (Node::Object(map), Step::Key(key)) => {
            map.get(&key).ok_or(JzonError::KeyNotFound { key })
        }
        (_, Step::Key(key)) => Err(JzonError::KeyNotFound { key }),
        (Node::Array(items), Step::Index(index)) => {
            items.get(index).ok_or(JzonError::IndexOutOfBounds {
                index,
                length: items.len(),
            })
        }
        (_, Step::Index(index)) => Err(JzonError::IndexOutOfBounds { index, length: 0 }),
    }
}

fn child_mut<'n>(node: &'n mut Node, step: Step) -> Result<&'n mut Node> {
    match (node, step) {
        (Node::Object(map), Step::Key(key)) => {
            map.get_mut(&key).ok_or(JzonError::KeyNotFound { key })
        }
        (_, Step::Key(key)) => Err(JzonError::KeyNotFound { key }),
        (Node::Array(items), Step::Index(index)) => {
            let length = items.len();
            items
                .get_mut(index)
                .ok_or(JzonError::IndexOutOfBounds { index, length })
        }
        (_, Step::Index(index)) => Err(JzonError::IndexOutOfBounds { index, length: 0 }),
    }
}

/// Resolve `path` against `root`.
///
/// A key step on a non-object reports `KeyNotFound`; an index step on a
/// non-array reports `IndexOutOfBounds` with length 0.
pub fn query<'n>(root: &'n Node, path: &str) -> Result<&'n Node> {
    let mut current = root;
    for step in steps(path) {
        current = child(current, step?).inspect_err(|err| {
            log::debug!("query {path:?} failed: {err}");
        })?;
    }
    Ok(current)
}

/// Mutable counterpart of [`query`].
pub fn query_mut<'n>(root: &'n mut Node, path: &str) -> Result<&'n mut Node> {
    let mut current = root;
    for step in steps(path) {
        current = child_mut(current, step?).inspect_err(|err| {
            log::debug!("query {path:?} failed: {err}");
        })?;
    }
    Ok(current)
}

/// Whether `path` resolves to a node.
pub fn search(root: &Node, path: &str) -> bool {
    query(root, path).is_ok()
}

impl Node {
    /// See [`query`].
    pub fn query(&self, path: &str) -> Result<&Node> {
        query(self, path)
    }

    /// See [`query_mut`].
    pub fn query_mut(&mut self, path: &str) -> Result<&mut Node> {
        query_mut(self, path)
    }

    /// See [`search`].
    pub fn search(&self, path: &str) -> bool {
        search(self, path)
    }
}
