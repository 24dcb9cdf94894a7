//! Route values: runtime key/value pairs used to find matching endpoints.
//!
//! This module provides [`RouteValue`], a typed route-parameter value, and
//! [`RouteValues`], an ordered mapping with case-insensitive keys.

use std::fmt;

/// A single route-parameter value.
///
/// Keys are compared case-insensitively throughout the crate; values compare
/// by exact equality per variant. An empty string normalizes to
/// [`RouteValue::Empty`] when signatures are formed, so an absent parameter
/// and an empty one index identically.
///
/// # Example
///
/// ```rust
/// use select_core::RouteValue;
///
/// let v: RouteValue = "Home".into();
/// assert_eq!(v, RouteValue::Str("Home".to_string()));
/// assert_ne!(v, RouteValue::Str("home".to_string()));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum RouteValue {
    /// No value; also the normalized form of an empty string.
    #[default]
    Empty,
    /// A string value, compared exactly.
    Str(String),
    /// An integer value.
    Int(i64),
    /// A boolean value.
    Bool(bool),
}

impl RouteValue {
    /// Check whether this value is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty) || matches!(self, Self::Str(s) if s.is_empty())
    }

    /// The normalized form used in signatures: empty strings become
    /// [`RouteValue::Empty`], everything else is unchanged.
    #[must_use]
    pub fn normalized(&self) -> RouteValue {
        if self.is_empty() {
            RouteValue::Empty
        } else {
            self.clone()
        }
    }
}

impl fmt::Display for RouteValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Str(s) => write!(f, "{s}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for RouteValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for RouteValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<i64> for RouteValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<bool> for RouteValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// An ordered mapping of route-parameter names to values.
///
/// Keys are ASCII-case-insensitive: inserting `Controller` replaces an
/// existing `controller` entry, and [`RouteValues::get`] matches either
/// spelling. Insertion order of distinct keys is preserved.
///
/// # Example
///
/// ```rust
/// use select_core::{RouteValue, RouteValues};
///
/// let values = RouteValues::new()
///     .with("controller", "Page")
///     .with("page", "/About");
///
/// assert_eq!(values.get("CONTROLLER"), Some(&RouteValue::from("Page")));
/// assert_eq!(values.len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RouteValues {
    pairs: Vec<(String, RouteValue)>,
}

impl RouteValues {
    /// Create an empty set of route values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing any existing case-insensitive match.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<RouteValue>) {
        let key = key.into();
        let value = value.into();
        if let Some(pair) = self
            .pairs
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(&key))
        {
            pair.1 = value;
        } else {
            self.pairs.push((key, value));
        }
    }

    /// Insert a value, chaining style.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<RouteValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Get the value for a key, matched case-insensitively.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&RouteValue> {
        self.pairs
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
    }

    /// Check whether a key is present, matched case-insensitively.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Get the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Check whether there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RouteValue)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K, V> FromIterator<(K, V)> for RouteValues
where
    K: Into<String>,
    V: Into<RouteValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = Self::new();
        for (k, v) in iter {
            values.insert(k, v);
        }
        values
    }
}
