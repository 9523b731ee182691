//! Declarative value validation.
//!
//! A condition is a short string with a type prefix:
//!
//! | Condition | Accepts |
//! |---|---|
//! | `regexp:<pattern>` | strings matching the pattern (unanchored) |
//! | `range:n` | the integer `n` |
//! | `range:lo,hi` | integers with `lo <= n < hi` |
//! | `range:!lo,hi` | integers with `n < lo` or `n > hi` |
//! | `range:{a,b,c}` | integers in the set |
//! | `bool:true`, `bool:false`, `bool:both` | that boolean, or either |
//! | `null:null` | `null` |
//!
//! Whitespace after the prefix is ignored. A schema is an object whose values
//! are conditions or nested schemas; [`validate`] checks a node against it.

use std::fmt;
use std::str::FromStr;

use regex::Regex;

use crate::error::{JzonError, Result};
use crate::node::Node;
use crate::query::escape_key;

const REGEXP: &str = "regexp:";
const RANGE: &str = "range:";
const BOOL: &str = "bool:";
const NULL: &str = "null:";

/// An integer constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Range {
    /// Exactly this value.
    One(i64),
    /// `lower <= n < upper`.
    Close { lower: i64, upper: i64 },
    /// `n < lower || n > upper`.
    Except { lower: i64, upper: i64 },
    /// Any listed value.
    Set(Vec<i64>),
}

impl Range {
    pub fn accepts(&self, n: i64) -> bool {
        match self {
            Range::One(value) => n == *value,
            Range::Close { lower, upper } => *lower <= n && n < *upper,
            Range::Except { lower, upper } => n < *lower || n > *upper,
            Range::Set(values) => values.contains(&n),
        }
    }
}

impl FromStr for Range {
    type Err = JzonError;

    fn from_str(spec: &str) -> Result<Self> {
        let spec = spec.trim();
        let invalid = |reason: &str| JzonError::InvalidCondition {
            condition: format!("{RANGE}{spec}"),
            reason: reason.to_string(),
        };
        let integer = |text: &str| {
            text.trim()
                .parse::<i64>()
                .map_err(|_| invalid(&format!("`{}` is not an integer", text.trim())))
        };
        let bounds = |text: &str| -> Result<(i64, i64)> {
            let (lower, upper) = text
                .split_once(',')
                .ok_or_else(|| invalid("expected `lo,hi`"))?;
            let (lower, upper) = (integer(lower)?, integer(upper)?);
            if lower > upper {
                return Err(invalid("lower bound exceeds upper bound"));
            }
            Ok((lower, upper))
        };

        if let Some(rest) = spec.strip_prefix('!') {
            let (lower, upper) = bounds(rest)?;
            return Ok(Range::Except { lower, upper });
        }
        if let Some(inner) = spec.strip_prefix('{') {
            let inner = inner
                .strip_suffix('}')
                .ok_or_else(|| invalid("unterminated `{`"))?;
            let values = inner.split(',').map(&integer).collect::<Result<Vec<_>>>()?;
            return Ok(Range::Set(values));
        }
        if spec.contains(',') {
            let (lower, upper) = bounds(spec)?;
            return Ok(Range::Close { lower, upper });
        }
        Ok(Range::One(integer(spec)?))
    }
}

/// A compiled condition.
#[derive(Debug, Clone)]
pub enum Condition {
    Regexp(Regex),
    Range(Range),
    /// `None` accepts either boolean.
    Bool(Option<bool>),
    Null,
}

/// A condition together with the text it was compiled from.
#[derive(Debug, Clone)]
pub struct Validator {
    source: String,
    condition: Condition,
}

impl Validator {
    /// Compile a condition string.
    ///
    /// ```
    /// use jzon::{Node, Validator};
    ///
    /// let adult = Validator::compile("range:18,150").unwrap();
    /// assert!(adult.accepts(&Node::Integer(42)));
    /// assert!(!adult.accepts(&Node::Integer(7)));
    /// ```
    pub fn compile(cond: &str) -> Result<Self> {
        let invalid = |reason: &str| JzonError::InvalidCondition {
            condition: cond.to_string(),
            reason: reason.to_string(),
        };

        let condition = if let Some(pattern) = cond.strip_prefix(REGEXP) {
            Condition::Regexp(Regex::new(pattern.trim())?)
        } else if let Some(spec) = cond.strip_prefix(RANGE) {
            Condition::Range(spec.parse()?)
        } else if let Some(value) = cond.strip_prefix(BOOL) {
            match value.trim() {
                "true" => Condition::Bool(Some(true)),
                "false" => Condition::Bool(Some(false)),
                "both" => Condition::Bool(None),
                _ => return Err(invalid("expected `true`, `false` or `both`")),
            }
        } else if let Some(value) = cond.strip_prefix(NULL) {
            if value.trim() != "null" {
                return Err(invalid("expected `null`"));
            }
            Condition::Null
        } else {
            return Err(invalid(
                "expected a `regexp:`, `range:`, `bool:` or `null:` prefix",
            ));
        };

        Ok(Self {
            source: cond.to_string(),
            condition,
        })
    }

    pub fn condition(&self) -> &Condition {
        &self.condition
    }

    pub fn accepts(&self, node: &Node) -> bool {
        match (&self.condition, node) {
            (Condition::Regexp(re), Node::String(s)) => re.is_match(s),
            (Condition::Range(range), Node::Integer(n)) => range.accepts(*n),
            (Condition::Bool(expected), Node::Bool(b)) => expected.is_none_or(|e| e == *b),
            (Condition::Null, Node::Null) => true,
            _ => false,
        }
    }
}

impl FromStr for Validator {
    type Err = JzonError;

    fn from_str(s: &str) -> Result<Self> {
        Self::compile(s)
    }
}

impl fmt::Display for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// A schema entry the node failed. `path` is a query path to the offending
/// value, usable with [`crate::query`] unless it passes through an empty key,
/// which no path can address. Such a step is rendered as a bare `.`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub path: String,
    pub reason: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.reason)
    }
}

/// Check `node` against `schema`, collecting every violation.
///
/// Fails only when the schema itself is malformed: not an object, holding a
/// value that is neither a condition string nor an object, or holding a
/// condition that does not compile.
pub fn validate(node: &Node, schema: &Node) -> Result<Vec<Violation>> {
    let mut violations = Vec::new();
    check(node, schema, "$", &mut violations)?;
    log::debug!("validation finished with {} violation(s)", violations.len());
    Ok(violations)
}

fn check(node: &Node, schema: &Node, path: &str, violations: &mut Vec<Violation>) -> Result<()> {
    let rules = schema.as_object()?;
    let Node::Object(fields) = node else {
        violations.push(Violation {
            path: path.to_string(),
            reason: format!("expected object, found {}", node.node_type()),
        });
        return Ok(());
    };

    for (key, rule) in rules {
        let field_path = format!("{path}.{}", escape_key(key));
        let Some(value) = fields.get(key) else {
            violations.push(Violation {
                path: field_path,
                reason: "missing".to_string(),
            });
            continue;
        };

        match rule {
            Node::String(cond) => {
                let validator = Validator::compile(cond)?;
                if !validator.accepts(value) {
                    violations.push(Violation {
                        path: field_path,
                        reason: format!(
                            "{} {value} does not satisfy `{validator}`",
                            value.node_type()
                        ),
                    });
                }
            }
            Node::Object(_) => check(value, rule, &field_path, violations)?,
            other => {
                return Err(JzonError::InvalidCondition {
                    condition: other.to_compact_string(),
                    reason: "schema values must be condition strings or objects".to_string(),
                });
            }
        }
    }
    Ok(())
}
