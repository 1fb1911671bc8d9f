//! Ordered mapping type for host dictionaries.
//!
//! This module provides [`Dict`], a wrapper around [`IndexMap`] that keeps
//! insertion order, and [`Key`], the hashable subset of host values allowed
//! as dictionary keys.
//!
//! The encoder emits entries in the mapping's own iteration order, so a
//! `Dict` always encodes to the same bytes. Non-string keys are written
//! using their string form.
//!
//! ## Examples
//!
//! ```rust
//! use objson::{Dict, Value};
//!
//! let mut dict = Dict::new();
//! dict.insert("name", Value::from("Alice"));
//! dict.insert(1, Value::from(30));
//!
//! assert_eq!(dict.len(), 2);
//! assert_eq!(dict.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! ```

use crate::Value;
use indexmap::IndexMap;
use std::borrow::Cow;
use std::fmt;

/// A dictionary key.
///
/// # Examples
///
/// ```rust
/// use objson::Key;
///
/// assert_eq!(Key::from("a").as_name(), "a");
/// assert_eq!(Key::from(7).as_name(), "7");
/// assert_eq!(Key::None.as_name(), "null");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Str(String),
    Int(i64),
    Bool(bool),
    None,
}

impl Key {
    /// Returns the key as it appears in an encoded object.
    ///
    /// String keys are borrowed; other keys are stringified.
    #[must_use]
    pub fn as_name(&self) -> Cow<'_, str> {
        match self {
            Key::Str(s) => Cow::Borrowed(s.as_str()),
            other => Cow::Owned(other.to_string()),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Str(s) => f.write_str(s),
            Key::Int(i) => write!(f, "{}", i),
            Key::Bool(b) => write!(f, "{}", b),
            Key::None => f.write_str("null"),
        }
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::Str(value.to_string())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::Str(value)
    }
}

impl From<i32> for Key {
    fn from(value: i32) -> Self {
        Key::Int(value as i64)
    }
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Key::Int(value)
    }
}

impl From<bool> for Key {
    fn from(value: bool) -> Self {
        Key::Bool(value)
    }
}

/// An insertion-ordered dictionary of host values.
///
/// # Examples
///
/// ```rust
/// use objson::{Dict, Value};
///
/// let mut dict = Dict::new();
/// dict.insert("first", Value::from(1));
/// dict.insert("second", Value::from(2));
///
/// // Iteration maintains insertion order
/// let keys: Vec<_> = dict.keys().map(|k| k.to_string()).collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Dict(IndexMap<Key, Value>);

impl Dict {
    /// Creates an empty `Dict`.
    #[must_use]
    pub fn new() -> Self {
        Dict(IndexMap::new())
    }

    /// Creates an empty `Dict` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Dict(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair, returning the previous value for the key.
    ///
    /// Re-inserting an existing key keeps its original position.
    pub fn insert(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Returns the value stored under a string key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(&Key::Str(key.to_string()))
    }

    /// Returns the value stored under any key.
    #[must_use]
    pub fn get_key(&self, key: &Key) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the entry at a position in iteration order.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<(&Key, &Value)> {
        self.0.get_index(index)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the dictionary has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, Key, Value> {
        self.0.keys()
    }

    /// Returns an iterator over the values, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, Key, Value> {
        self.0.values()
    }

    /// Returns an iterator over the entries, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, Key, Value> {
        self.0.iter()
    }
}

impl IntoIterator for Dict {
    type Item = (Key, Value);
    type IntoIter = indexmap::map::IntoIter<Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Dict {
    type Item = (&'a Key, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<K: Into<Key>, V: Into<Value>> FromIterator<(K, V)> for Dict {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Dict(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
