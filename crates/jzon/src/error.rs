//! Error types for parsing, querying, validating and converting JSON nodes.

use std::fmt;

use thiserror::Error;

use crate::lexer::Position;
use crate::node::NodeType;
use crate::query::PathState;

/// Errors that can occur while working with jzon nodes.
#[derive(Error, Debug)]
pub enum JzonError {
    /// A structural byte did not match what the grammar allows here.
    #[error("expected {expected} but found '{}' at {position}", .found.escape_ascii())]
    UnexpectedByte {
        expected: &'static str,
        found: u8,
        position: Position,
    },

    /// `true`, `false` or `null` was misspelled.
    #[error("expected \"{expected}\" but found \"{found}\" at {position}")]
    UnexpectedLiteral {
        expected: &'static str,
        found: String,
        position: Position,
    },

    /// A `\uXXXX` escape was zero, a lone surrogate or a broken pair.
    #[error("expected \"\\uXXXX\" formed string as valid Unicode codepoint at {position}")]
    InvalidCodePoint { position: Position },

    /// A decoded string was not valid UTF-8.
    #[error("invalid UTF-8 in string ending at {position}")]
    InvalidUtf8 { position: Position },

    /// The input ran out in the middle of a value.
    #[error("unexpected end of input at {position}")]
    UnexpectedEndOfInput { position: Position },

    /// Something other than whitespace followed the top-level value.
    #[error("expected end of file but found trailing content at {position}")]
    TrailingContent { position: Position },

    /// Objects and arrays were nested deeper than the configured limit.
    #[error("nesting depth exceeds the limit of {limit} at {position}")]
    DepthLimitExceeded { limit: usize, position: Position },

    /// An accessor was called on the wrong variant.
    #[error("expected node of type {expected}, but the real type is {actual}")]
    TypeMismatch { expected: NodeType, actual: NodeType },

    /// An object lookup missed.
    #[error("key \"{key}\" doesn't exist")]
    KeyNotFound { key: String },

    /// An array lookup or removal was out of range.
    #[error("index {index} is out of bounds for length {length}")]
    IndexOutOfBounds { index: usize, length: usize },

    /// The path expression is malformed.
    #[error("expected state {expected} but the path is in state {actual} at offset {position}")]
    QueryState {
        expected: StateSet,
        actual: PathState,
        position: usize,
    },

    /// A validator condition string could not be compiled.
    #[error("invalid condition `{condition}`: {reason}")]
    InvalidCondition { condition: String, reason: String },

    /// The `regexp:` pattern of a validator failed to compile.
    #[error("invalid regular expression: {0}")]
    Regex(#[from] regex::Error),

    /// A serde conversion between nodes and Rust types failed.
    #[error("conversion error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout jzon.
pub type Result<T> = std::result::Result<T, JzonError>;

/// The set of path states that would have been accepted, rendered as
/// `Dot | LeftBracket | End`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateSet(pub &'static [PathState]);

impl fmt::Display for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, state) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            write!(f, "{state}")?;
        }
        Ok(())
    }
}
