//! The JSON node tree.
//!
//! A [`Node`] is a closed sum type over the seven JSON value kinds. Integers
//! and floats are kept apart so that `1` and `1.0` survive a round trip as
//! different variants. Objects keep their keys in insertion order.
//!
//! Accessors never panic: calling one on the wrong variant returns
//! [`JzonError::TypeMismatch`], container lookups return `KeyNotFound` or
//! `IndexOutOfBounds`.

use std::fmt;

use indexmap::IndexMap;

use crate::error::{JzonError, Result};
use crate::number::Number;

/// Object storage: unique keys in insertion order.
pub type Map = IndexMap<String, Node>;

/// The kind of a [`Node`], used in type-mismatch errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    String,
    Integer,
    Float,
    Bool,
    Object,
    Array,
    Null,
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeType::String => "string",
            NodeType::Integer => "integer",
            NodeType::Float => "float",
            NodeType::Bool => "bool",
            NodeType::Object => "object",
            NodeType::Array => "array",
            NodeType::Null => "null",
        };
        f.write_str(name)
    }
}

/// One JSON value. Containers own their children exclusively.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Node {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Object(Map),
    Array(Vec<Node>),
    #[default]
    Null,
}

impl Node {
    /// An empty value of the given type: `""`, `0`, `0.0`, `false`, `{}`, `[]`
    /// or `null`.
    pub fn new(node_type: NodeType) -> Self {
        match node_type {
            NodeType::String => Node::String(String::new()),
            NodeType::Integer => Node::Integer(0),
            NodeType::Float => Node::Float(0.0),
            NodeType::Bool => Node::Bool(false),
            NodeType::Object => Node::Object(Map::new()),
            NodeType::Array => Node::Array(Vec::new()),
            NodeType::Null => Node::Null,
        }
    }

    pub fn object() -> Self {
        Node::Object(Map::new())
    }

    pub fn array() -> Self {
        Node::Array(Vec::new())
    }

    pub fn node_type(&self) -> NodeType {
        match self {
            Node::String(_) => NodeType::String,
            Node::Integer(_) => NodeType::Integer,
            Node::Float(_) => NodeType::Float,
            Node::Bool(_) => NodeType::Bool,
            Node::Object(_) => NodeType::Object,
            Node::Array(_) => NodeType::Array,
            Node::Null => NodeType::Null,
        }
    }

    fn mismatch(&self, expected: NodeType) -> JzonError {
        JzonError::TypeMismatch {
            expected,
            actual: self.node_type(),
        }
    }

    // ------------------------------------------------------------------
    // Typed extraction
    // ------------------------------------------------------------------

    pub fn as_str(&self) -> Result<&str> {
        match self {
            Node::String(s) => Ok(s),
            _ => Err(self.mismatch(NodeType::String)),
        }
    }

    pub fn as_integer(&self) -> Result<i64> {
        match self {
            Node::Integer(n) => Ok(*n),
            _ => Err(self.mismatch(NodeType::Integer)),
        }
    }

    pub fn as_float(&self) -> Result<f64> {
        match self {
            Node::Float(f) => Ok(*f),
            _ => Err(self.mismatch(NodeType::Float)),
        }
    }

    pub fn as_bool(&self) -> Result<bool> {
        match self {
            Node::Bool(b) => Ok(*b),
            _ => Err(self.mismatch(NodeType::Bool)),
        }
    }

    pub fn as_null(&self) -> Result<()> {
        match self {
            Node::Null => Ok(()),
            _ => Err(self.mismatch(NodeType::Null)),
        }
    }

    pub fn as_object(&self) -> Result<&Map> {
        match self {
            Node::Object(map) => Ok(map),
            _ => Err(self.mismatch(NodeType::Object)),
        }
    }

    pub fn as_object_mut(&mut self) -> Result<&mut Map> {
        match self {
            Node::Object(map) => Ok(map),
            _ => Err(self.mismatch(NodeType::Object)),
        }
    }

    pub fn as_array(&self) -> Result<&[Node]> {
        match self {
            Node::Array(items) => Ok(items),
            _ => Err(self.mismatch(NodeType::Array)),
        }
    }

    pub fn as_array_mut(&mut self) -> Result<&mut Vec<Node>> {
        match self {
            Node::Array(items) => Ok(items),
            _ => Err(self.mismatch(NodeType::Array)),
        }
    }

    /// The numeric value of an Integer or Float node.
    pub fn as_number(&self) -> Result<Number> {
        match self {
            Node::Integer(n) => Ok(Number::Integer(*n)),
            Node::Float(f) => Ok(Number::Float(*f)),
            _ => Err(self.mismatch(NodeType::Float)),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    /// Returns true for objects and arrays.
    pub fn is_container(&self) -> bool {
        matches!(self, Node::Object(_) | Node::Array(_))
    }

    /// Key count of an object or element count of an array.
    pub fn len(&self) -> Result<usize> {
        match self {
            Node::Object(map) => Ok(map.len()),
            Node::Array(items) => Ok(items.len()),
            _ => Err(self.mismatch(NodeType::Object)),
        }
    }

    /// True for an empty object or array; errors like [`Node::len`].
    pub fn is_empty(&self) -> Result<bool> {
        self.len().map(|len| len == 0)
    }

    // ------------------------------------------------------------------
    // Container lookups
    // ------------------------------------------------------------------

    pub fn value_of(&self, key: &str) -> Result<&Node> {
        self.as_object()?
            .get(key)
            .ok_or_else(|| JzonError::KeyNotFound {
                key: key.to_string(),
            })
    }

    pub fn value_of_mut(&mut self, key: &str) -> Result<&mut Node> {
        self.as_object_mut()?
            .get_mut(key)
            .ok_or_else(|| JzonError::KeyNotFound {
                key: key.to_string(),
            })
    }

    pub fn value_at(&self, index: usize) -> Result<&Node> {
        let items = self.as_array()?;
        items.get(index).ok_or(JzonError::IndexOutOfBounds {
            index,
            length: items.len(),
        })
    }

    pub fn value_at_mut(&mut self, index: usize) -> Result<&mut Node> {
        let items = self.as_array_mut()?;
        let length = items.len();
        items
            .get_mut(index)
            .ok_or(JzonError::IndexOutOfBounds { index, length })
    }

    pub fn has(&self, key: &str) -> Result<bool> {
        Ok(self.as_object()?.contains_key(key))
    }

    /// Object keys in insertion order.
    pub fn keys(&self) -> Result<Vec<&str>> {
        Ok(self.as_object()?.keys().map(String::as_str).collect())
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// Insert or replace `key`, returning the previous value. A replaced key
    /// keeps its position.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Node>,
    ) -> Result<Option<Node>> {
        Ok(self.as_object_mut()?.insert(key.into(), value.into()))
    }

    pub fn append(&mut self, value: impl Into<Node>) -> Result<()> {
        self.as_array_mut()?.push(value.into());
        Ok(())
    }

    /// Remove `key` from an object. Deleting a missing key is not an error.
    pub fn delete(&mut self, key: &str) -> Result<Option<Node>> {
        Ok(self.as_object_mut()?.shift_remove(key))
    }

    /// Remove the element at `index`, shifting later elements down.
    pub fn remove(&mut self, index: usize) -> Result<Node> {
        let items = self.as_array_mut()?;
        if index >= items.len() {
            return Err(JzonError::IndexOutOfBounds {
                index,
                length: items.len(),
            });
        }
        Ok(items.remove(index))
    }

    /// Replace this node with `Null` and return the old value.
    pub fn take(&mut self) -> Node {
        std::mem::take(self)
    }

    // ------------------------------------------------------------------
    // Traversal
    // ------------------------------------------------------------------

    pub fn map_array<T>(&self, f: impl FnMut(&Node) -> T) -> Result<Vec<T>> {
        Ok(self.as_array()?.iter().map(f).collect())
    }

    /// A new array holding clones of the elements that satisfy `predicate`.
    pub fn filter_array(&self, mut predicate: impl FnMut(&Node) -> bool) -> Result<Node> {
        Ok(Node::Array(
            self.as_array()?
                .iter()
                .filter(|item| predicate(item))
                .cloned()
                .collect(),
        ))
    }

    pub fn reduce_array<A>(&self, init: A, f: impl FnMut(A, &Node) -> A) -> Result<A> {
        Ok(self.as_array()?.iter().fold(init, f))
    }

    pub fn map_object<T>(&self, mut f: impl FnMut(&str, &Node) -> T) -> Result<Vec<T>> {
        Ok(self
            .as_object()?
            .iter()
            .map(|(key, value)| f(key, value))
            .collect())
    }

    /// A new object holding clones of the entries that satisfy `predicate`.
    /// The receiver is left untouched.
    pub fn filter_object(&self, mut predicate: impl FnMut(&str, &Node) -> bool) -> Result<Node> {
        Ok(Node::Object(
            self.as_object()?
                .iter()
                .filter(|(key, value)| predicate(key, value))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        ))
    }

    /// Apply `f` to every child: with the key for objects, with `""` for
    /// array elements. Scalars are passed to `f` once, themselves, with `""`.
    pub fn map<T>(&self, mut f: impl FnMut(&str, &Node) -> T) -> Vec<T> {
        match self {
            Node::Object(map) => map.iter().map(|(key, value)| f(key, value)).collect(),
            Node::Array(items) => items.iter().map(|item| f("", item)).collect(),
            scalar => vec![f("", scalar)],
        }
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::String(s)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::String(s.to_string())
    }
}

impl From<i64> for Node {
    fn from(n: i64) -> Self {
        Node::Integer(n)
    }
}

impl From<i32> for Node {
    fn from(n: i32) -> Self {
        Node::Integer(i64::from(n))
    }
}

impl From<f64> for Node {
    fn from(f: f64) -> Self {
        Node::Float(f)
    }
}

impl From<bool> for Node {
    fn from(b: bool) -> Self {
        Node::Bool(b)
    }
}

impl From<Number> for Node {
    fn from(number: Number) -> Self {
        match number {
            Number::Integer(n) => Node::Integer(n),
            Number::Float(f) => Node::Float(f),
        }
    }
}

impl From<Vec<Node>> for Node {
    fn from(items: Vec<Node>) -> Self {
        Node::Array(items)
    }
}

impl From<Map> for Node {
    fn from(map: Map) -> Self {
        Node::Object(map)
    }
}

impl<T: Into<Node>> From<Option<T>> for Node {
    fn from(value: Option<T>) -> Self {
        value.map_or(Node::Null, Into::into)
    }
}

impl FromIterator<Node> for Node {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        Node::Array(iter.into_iter().collect())
    }
}

impl<K: Into<String>> FromIterator<(K, Node)> for Node {
    fn from_iter<I: IntoIterator<Item = (K, Node)>>(iter: I) -> Self {
        Node::Object(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
