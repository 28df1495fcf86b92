//! Cache key construction
//!
//! Keys are plain strings. A namespace is a naming discipline rather than a
//! stored entity: every key written under namespace `ns` starts with
//! `"ns:"`, which is what a namespace reset matches (`"ns:*"`).
//!
//! Callers pick namespaces that cannot be confused as prefixes of one
//! another: `task` and `tasks` are distinct because the separator is part
//! of the match.

use crate::constants::NAMESPACE_SEPARATOR;
use std::fmt;

/// Build a cache key by concatenating a namespace prefix and a key fragment.
///
/// No escaping is applied; `build_key("task:", "42")` is `"task:42"`.
pub fn build_key(namespace: &str, key: &str) -> String {
    let mut out = String::with_capacity(namespace.len() + key.len());
    out.push_str(namespace);
    out.push_str(key);
    out
}

/// Logical key-prefix grouping related entries for bulk invalidation
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Namespace(String);

impl Namespace {
    /// Create a namespace from its name (without the trailing separator)
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self(name.into())
    }

    /// The namespace name
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Prefix every key of this namespace starts with (`"<name>:"`)
    pub fn pattern_prefix(&self) -> String {
        build_key(&self.0, NAMESPACE_SEPARATOR)
    }

    /// Key for `fragment` inside this namespace
    pub fn key(&self, fragment: &str) -> String {
        build_key(&self.pattern_prefix(), fragment)
    }

    /// Nested namespace `"<name>:<segment>"`
    pub fn child(&self, segment: &str) -> Self {
        Self(self.key(segment))
    }

    /// Whether `key` falls inside this namespace
    pub fn contains(&self, key: &str) -> bool {
        key.strip_prefix(self.0.as_str())
            .is_some_and(|rest| rest.starts_with(NAMESPACE_SEPARATOR))
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Namespace {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Namespace {
    fn from(name: String) -> Self {
        Self(name)
    }
}
