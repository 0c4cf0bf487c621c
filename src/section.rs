//! Ordered, comment-annotated sections.
//!
//! This module provides [`Section`], the DCF object type, a wrapper around [`IndexMap`]
//! that keeps keys in first-insertion order. Every key carries an [`Entry`]: the value and
//! a header comment that belongs to the key rather than to the value, so overwriting a value
//! keeps both the key's position and its header.
//!
//! ## Examples
//!
//! ```rust
//! use serde_dcf::Section;
//!
//! let mut section = Section::new();
//! section.set("name", "server");
//! section.set("port", 8080);
//! section.set_header("port", "Listening port").unwrap();
//!
//! section.set("name", "proxy");
//! assert_eq!(section.keys(), vec!["name", "port"]);
//! assert_eq!(section.header("port").unwrap(), "Listening port");
//! ```

use crate::ser::Serializer;
use crate::{DcfOptions, Error, Result, Value};
use indexmap::map::Entry as MapEntry;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A key's header comment together with its value.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    header: String,
    value: Value,
}

impl Entry {
    fn new(header: String, value: Value) -> Self {
        Entry { header, value }
    }

    /// The header comment, empty when the key has none.
    #[must_use]
    pub fn header(&self) -> &str {
        &self.header
    }

    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// An ordered mapping from unique keys to values, each with an optional header comment.
///
/// Cloning a `Section` copies its entries. Nested sections stored in those entries are
/// [`Value::Section`] handles and stay shared until one side writes to them.
///
/// Equality is order-sensitive and compares headers as well as values.
#[derive(Debug, Clone, Default)]
pub struct Section(IndexMap<String, Entry>);

impl Section {
    /// Creates an empty `Section`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_dcf::Section;
    ///
    /// let section = Section::new();
    /// assert!(section.is_empty());
    /// assert_eq!(section.to_string(), "{}");
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Section(IndexMap::new())
    }

    /// Creates an empty `Section` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Section(IndexMap::with_capacity(capacity))
    }

    /// Returns the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if the key is absent.
    pub fn get(&self, key: &str) -> Result<&Value> {
        self.optional_get(key)
            .ok_or_else(|| Error::key_not_found(key))
    }

    /// Returns the value stored under `key` for modification.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if the key is absent.
    pub fn get_mut(&mut self, key: &str) -> Result<&mut Value> {
        self.0
            .get_mut(key)
            .map(|entry| &mut entry.value)
            .ok_or_else(|| Error::key_not_found(key))
    }

    /// Returns the value stored under `key`, or `None` if the key is absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_dcf::Section;
    ///
    /// let mut section = Section::new();
    /// section.set("debug", true);
    /// assert!(section.optional_get("debug").is_some());
    /// assert!(section.optional_get("verbose").is_none());
    /// ```
    #[must_use]
    pub fn optional_get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).map(|entry| &entry.value)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Stores `value` under `key`.
    ///
    /// An existing key keeps its position and header; a new key is appended with an empty
    /// header.
    pub fn set<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<Value>,
    {
        match self.0.entry(key.into()) {
            MapEntry::Occupied(mut slot) => slot.get_mut().value = value.into(),
            MapEntry::Vacant(slot) => {
                slot.insert(Entry::new(String::new(), value.into()));
            }
        }
    }

    /// Stores `value` and `header` under `key` in one step.
    ///
    /// An existing key keeps its position.
    pub fn set_with_header<K, H, V>(&mut self, key: K, header: H, value: V)
    where
        K: Into<String>,
        H: Into<String>,
        V: Into<Value>,
    {
        let entry = Entry::new(header.into(), value.into());
        match self.0.entry(key.into()) {
            MapEntry::Occupied(mut slot) => *slot.get_mut() = entry,
            MapEntry::Vacant(slot) => {
                slot.insert(entry);
            }
        }
    }

    /// Removes `key`, keeping the order of the remaining keys, and returns its value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key).map(|entry| entry.value)
    }

    /// Returns a snapshot of the keys in order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.0.keys().cloned().collect()
    }

    /// Replaces the header comment of `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if the key is absent.
    pub fn set_header<H: Into<String>>(&mut self, key: &str, header: H) -> Result<()> {
        let entry = self
            .0
            .get_mut(key)
            .ok_or_else(|| Error::key_not_found(key))?;
        entry.header = header.into();
        Ok(())
    }

    /// Returns the header comment of `key`, empty when it has none.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if the key is absent.
    pub fn header(&self, key: &str) -> Result<&str> {
        self.0
            .get(key)
            .map(Entry::header)
            .ok_or_else(|| Error::key_not_found(key))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over keys and values, in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.0.iter().map(|(key, entry)| (key.as_str(), &entry.value))
    }

    /// Returns an iterator over keys and their entries, in order.
    pub fn entries(&self) -> indexmap::map::Iter<'_, String, Entry> {
        self.0.iter()
    }

    /// Renders the section in canonical form with `indent` spaces per nesting level.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `indent` is negative.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_dcf::parse;
    ///
    /// let section = parse("{ a: 1, b: [true] }").unwrap();
    /// assert_eq!(
    ///     section.to_string_indented(2).unwrap(),
    ///     "{\n  a: 1,\n  b: [\n    true\n  ]\n}"
    /// );
    /// assert!(section.to_string_indented(-1).is_err());
    /// ```
    pub fn to_string_indented(&self, indent: isize) -> Result<String> {
        let options = DcfOptions::new().try_with_indent(indent)?;
        Ok(self.to_string_with_options(&options))
    }

    /// Renders the section in canonical form using `options`.
    #[must_use]
    pub fn to_string_with_options(&self, options: &DcfOptions) -> String {
        let mut serializer = Serializer::new(options.clone());
        serializer.serialize_section(self);
        serializer.into_inner()
    }
}

impl PartialEq for Section {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len() && self.0.iter().eq(other.0.iter())
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with_options(&DcfOptions::default()))
    }
}

impl Serialize for Section {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Section {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error as _;
        let value = Value::deserialize(deserializer)?;
        let kind = value.kind();
        value
            .into_section()
            .map_err(|_| D::Error::custom(format!("expected a section, found {}", kind)))
    }
}

/// Owning iterator over the keys and values of a [`Section`], in order.
pub struct IntoIter(indexmap::map::IntoIter<String, Entry>);

impl Iterator for IntoIter {
    type Item = (String, Value);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(key, entry)| (key, entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl ExactSizeIterator for IntoIter {}

impl IntoIterator for Section {
    type Item = (String, Value);
    type IntoIter = IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter(self.0.into_iter())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Section {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut section = Section::new();
        for (key, value) in iter {
            section.set(key, value);
        }
        section
    }
}
