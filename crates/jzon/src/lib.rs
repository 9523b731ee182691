//! # jzon
//!
//! A JSON parser built around an explicit node tree. Text is parsed into a
//! [`Node`], which exposes typed accessors, object/array mutators and
//! map/filter/reduce traversal. Descendants are located with a small
//! JSONPath-like language (`$.key[index].key`), and trees render back to
//! compact or pretty-printed text.
//!
//! ## Quick start
//!
//! ```rust
//! use jzon::{parse, Node};
//!
//! let root = parse(br#"{"a":{"b":[{"x":1},{"x":2}]}}"#).unwrap();
//! assert_eq!(root.query("$.a.b[1].x").unwrap(), &Node::Integer(2));
//! assert!(!root.search("$.missing"));
//!
//! // Node -> compact JSON
//! assert_eq!(root.to_compact_string(), r#"{"a":{"b":[{"x":1},{"x":2}]}}"#);
//! ```
//!
//! ## Modules
//!
//! - [`node`]: the `Node` tree, accessors, mutators and traversal
//! - [`parser`]: recursive-descent parser (`parse`, `parse_prefix`)
//! - [`number`]: numeric-literal state machine shared by parser and queries
//! - [`query`]: path query engine (`query`, `query_mut`, `search`)
//! - [`render`]: compact, pretty and colored output
//! - [`validator`]: `regexp:` / `range:` / `bool:` / `null:` conditions
//! - [`convert`]: serde bridge (`to_node`, `from_node`)
//! - [`limits`]: parser configuration
//! - [`error`]: the `JzonError` type

mod lexer;

pub mod convert;
pub mod error;
pub mod limits;
pub mod node;
pub mod number;
pub mod parser;
pub mod query;
pub mod render;
pub mod validator;

pub use convert::{from_node, to_node};
pub use error::{JzonError, Result};
pub use lexer::Position;
pub use limits::Limits;
pub use node::{Map, Node, NodeType};
pub use number::Number;
pub use parser::{parse, parse_prefix, parse_str, parse_with_limits};
pub use query::{query, query_mut, search, PathState, Step};
pub use render::{compact, format, RenderOptions};
pub use validator::{validate, Condition, Range, Validator, Violation};
