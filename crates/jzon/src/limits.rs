//! Parser configuration.

/// Resource limits applied while parsing untrusted input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum nesting depth of objects and arrays. The top-level value sits
    /// at depth 1.
    pub max_depth: usize,
}

impl Limits {
    pub const DEFAULT_MAX_DEPTH: usize = 512;

    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// No depth limit beyond what the stack allows.
    pub fn unlimited() -> Self {
        Self {
            max_depth: usize::MAX,
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}
