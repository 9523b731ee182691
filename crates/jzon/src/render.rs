//! Text output for node trees.
//!
//! - Compact: no insignificant whitespace, used by `Display` and
//!   [`Node::to_compact_string`]. Compacting compact input reproduces it.
//! - Pretty: one object member per line, arrays of scalars kept inline, and
//!   arrays holding containers broken one element per line.
//! - Colored: pretty output with ANSI escapes around keys and scalars.
//!
//! Floats always carry a `.` or an exponent so they parse back as floats.
//! Infinities render as `1e999` / `-1e999`, which parse back to infinity.
//! NaN has no JSON spelling and renders as `null`.

use std::fmt;

use crate::error::Result;
use crate::node::Node;
use crate::parser::parse_str;

const RED: &str = "\x1b[0;31m";
const GREEN: &str = "\x1b[0;32m";
const YELLOW: &str = "\x1b[0;33m";
const BLUE: &str = "\x1b[0;34m";
const PURPLE: &str = "\x1b[0;35m";
const RESET: &str = "\x1b[0m";

/// Layout settings for pretty output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Spaces per nesting level; ignored when `use_tab` is set.
    pub indent: usize,
    /// Indent with one tab per level.
    pub use_tab: bool,
    /// Wrap keys and scalars in ANSI color codes.
    pub color: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent: 2,
            use_tab: false,
            color: false,
        }
    }
}

impl RenderOptions {
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_tab(mut self, use_tab: bool) -> Self {
        self.use_tab = use_tab;
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }
}

/// Parse `text` and return it pretty-printed with the default options.
///
/// ```
/// assert_eq!(jzon::format(r#"{"a":[1,2]}"#).unwrap(), "{\n  \"a\": [1, 2]\n}");
/// ```
pub fn format(text: &str) -> Result<String> {
    Ok(parse_str(text)?.to_pretty_string())
}

/// Parse `text` and return it with all insignificant whitespace removed.
pub fn compact(text: &str) -> Result<String> {
    Ok(parse_str(text)?.to_compact_string())
}

impl Node {
    pub fn to_compact_string(&self) -> String {
        let mut out = String::new();
        write_compact(self, &mut out);
        out
    }

    /// Pretty output with two-space indentation and no color.
    pub fn to_pretty_string(&self) -> String {
        self.render(&RenderOptions::default())
    }

    pub fn render(&self, options: &RenderOptions) -> String {
        let mut pretty = Pretty {
            options,
            out: String::new(),
        };
        pretty.write(self, 0);
        pretty.out
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_compact_string())
    }
}

fn write_compact(node: &Node, out: &mut String) {
    match node {
        Node::Object(map) => {
            out.push('{');
            for (i, (key, value)) in map.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_string(key, out);
                out.push(':');
                write_compact(value, out);
            }
            out.push('}');
        }
        Node::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_compact(item, out);
            }
            out.push(']');
        }
        scalar => write_scalar(scalar, out),
    }
}

fn write_scalar(node: &Node, out: &mut String) {
    match node {
        Node::String(s) => write_string(s, out),
        Node::Integer(n) => out.push_str(&n.to_string()),
        Node::Float(f) => write_float(*f, out),
        Node::Bool(true) => out.push_str("true"),
        Node::Bool(false) => out.push_str("false"),
        Node::Null => out.push_str("null"),
        Node::Object(_) | Node::Array(_) => write_compact(node, out),
    }
}

/// Infinities are written as an overflowing literal so they parse back to the
/// same value. NaN has no such spelling and becomes `null`.
fn write_float(f: f64, out: &mut String) {
    if f.is_nan() {
        out.push_str("null");
        return;
    }
    if f.is_infinite() {
        out.push_str(if f > 0.0 { "1e999" } else { "-1e999" });
        return;
    }
    let text = f.to_string();
    out.push_str(&text);
    if !text.contains(['.', 'e', 'E']) {
        out.push_str(".0");
    }
}

fn write_string(s: &str, out: &mut String) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if u32::from(c) < 0x20 => out.push_str(&format!("\\u{:04x}", u32::from(c))),
            c => out.push(c),
        }
    }
    out.push('"');
}

struct Pretty<'o> {
    options: &'o RenderOptions,
    out: String,
}

impl Pretty<'_> {
    fn indent(&mut self, level: usize) {
        if self.options.use_tab {
            self.out.extend(std::iter::repeat_n('\t', level));
        } else {
            self.out
                .extend(std::iter::repeat_n(' ', level * self.options.indent));
        }
    }

    fn colored(&mut self, color: &str, write: impl FnOnce(&mut String)) {
        if self.options.color {
            self.out.push_str(color);
            write(&mut self.out);
            self.out.push_str(RESET);
        } else {
            write(&mut self.out);
        }
    }

    fn write(&mut self, node: &Node, level: usize) {
        match node {
            Node::Object(map) if map.is_empty() => self.out.push_str("{}"),
            Node::Object(map) => {
                self.out.push_str("{\n");
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        self.out.push_str(",\n");
                    }
                    self.indent(level + 1);
                    self.colored(YELLOW, |out| write_string(key, out));
                    self.out.push_str(": ");
                    self.write(value, level + 1);
                }
                self.out.push('\n');
                self.indent(level);
                self.out.push('}');
            }
            Node::Array(items) if items.is_empty() => self.out.push_str("[]"),
            Node::Array(items) if items.iter().all(|item| !item.is_container()) => {
                self.out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.out.push_str(", ");
                    }
                    self.write(item, level + 1);
                }
                self.out.push(']');
            }
            Node::Array(items) => {
                self.out.push_str("[\n");
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.out.push_str(",\n");
                    }
                    self.indent(level + 1);
                    self.write(item, level + 1);
                }
                self.out.push('\n');
                self.indent(level);
                self.out.push(']');
            }
            Node::String(_) => self.colored(PURPLE, |out| write_scalar(node, out)),
            Node::Integer(_) | Node::Float(_) => self.colored(BLUE, |out| write_scalar(node, out)),
            Node::Bool(_) => self.colored(GREEN, |out| write_scalar(node, out)),
            Node::Null => self.colored(RED, |out| write_scalar(node, out)),
        }
    }
}
