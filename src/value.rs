//! Dynamic value representation for DCF data.
//!
//! This module provides the [`Value`] enum, the typed payload stored under every key of a
//! [`Section`], and [`ValueKind`], its type tag.
//!
//! ## Core Types
//!
//! - [`Value`]: string, boolean, 64-bit integer, double, array or nested section
//! - [`ValueKind`]: the kind of a value, used in type-mismatch errors
//!
//! ## Shared Sections
//!
//! The section arm is the only recursive one. It holds an [`Arc<Section>`], so cloning a
//! `Value::Section` shares the nested section instead of copying it. Writes through
//! [`Value::as_section_mut`] detach a shared section first (copy-on-write), so a change made
//! through one handle is never visible through another.
//!
//! ```rust
//! use serde_dcf::{Section, Value};
//!
//! let mut inner = Section::new();
//! inner.set("port", 8080);
//!
//! let original = Value::from(inner);
//! let mut copy = original.clone();
//! copy.as_section_mut().unwrap().set("port", 9090);
//!
//! let port = |v: &Value| v.as_section().unwrap().get("port").unwrap().as_int().unwrap();
//! assert_eq!(port(&original), 8080);
//! assert_eq!(port(&copy), 9090);
//! ```
//!
//! ## Extracting Values
//!
//! Accessors are strict: reading a value as a kind it does not hold is an
//! [`Error::TypeMismatch`], never a silent conversion.
//!
//! ```rust
//! use serde_dcf::Value;
//!
//! let value = Value::from(42);
//! assert_eq!(value.as_int().unwrap(), 42);
//! assert!(value.as_double().is_err());
//! ```

use crate::{Error, Result, Section};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// A dynamically-typed DCF value.
///
/// # Examples
///
/// ```rust
/// use serde_dcf::{Value, ValueKind};
///
/// let text = Value::from("hello");
/// let flag = Value::from(true);
/// let list = Value::from(vec![Value::from(1), Value::from(2.5)]);
///
/// assert_eq!(text.kind(), ValueKind::String);
/// assert!(flag.is_bool());
/// assert_eq!(list.as_array().unwrap().len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    String(String),
    Bool(bool),
    Integer(i64),
    Double(f64),
    Array(Vec<Value>),
    Section(Arc<Section>),
}

/// The type tag of a [`Value`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    String,
    Bool,
    Integer,
    Double,
    Array,
    Section,
}

impl ValueKind {
    /// Human-readable name used in error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ValueKind::String => "string",
            ValueKind::Bool => "boolean",
            ValueKind::Integer => "integer",
            ValueKind::Double => "double",
            ValueKind::Array => "array",
            ValueKind::Section => "section",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Value {
    /// Returns the kind of this value.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Value::String(_) => ValueKind::String,
            Value::Bool(_) => ValueKind::Bool,
            Value::Integer(_) => ValueKind::Integer,
            Value::Double(_) => ValueKind::Double,
            Value::Array(_) => ValueKind::Array,
            Value::Section(_) => ValueKind::Section,
        }
    }

    /// Returns `true` if the value is a string.
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns `true` if the value is a boolean.
    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Returns `true` if the value is an integer.
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Value::Integer(_))
    }

    /// Returns `true` if the value is a double.
    #[inline]
    #[must_use]
    pub const fn is_double(&self) -> bool {
        matches!(self, Value::Double(_))
    }

    /// Returns `true` if the value is an array.
    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Returns `true` if the value is a nested section.
    #[inline]
    #[must_use]
    pub const fn is_section(&self) -> bool {
        matches!(self, Value::Section(_))
    }

    fn mismatch(&self, expected: ValueKind) -> Error {
        Error::type_mismatch(expected.as_str(), self.kind().as_str())
    }

    /// Returns the string, or a type mismatch error.
    pub fn as_str(&self) -> Result<&str> {
        match self {
            Value::String(s) => Ok(s),
            _ => Err(self.mismatch(ValueKind::String)),
        }
    }

    /// Returns the boolean, or a type mismatch error.
    pub fn as_bool(&self) -> Result<bool> {
        match self {
            Value::Bool(b) => Ok(*b),
            _ => Err(self.mismatch(ValueKind::Bool)),
        }
    }

    /// Returns the integer, or a type mismatch error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_dcf::{Error, Value};
    ///
    /// assert_eq!(Value::from(-26i64).as_int().unwrap(), -26);
    /// assert!(matches!(
    ///     Value::from("26").as_int(),
    ///     Err(Error::TypeMismatch { .. })
    /// ));
    /// ```
    pub fn as_int(&self) -> Result<i64> {
        match self {
            Value::Integer(i) => Ok(*i),
            _ => Err(self.mismatch(ValueKind::Integer)),
        }
    }

    /// Returns the double, or a type mismatch error. Integers are not widened.
    pub fn as_double(&self) -> Result<f64> {
        match self {
            Value::Double(d) => Ok(*d),
            _ => Err(self.mismatch(ValueKind::Double)),
        }
    }

    /// Returns the array elements, or a type mismatch error.
    pub fn as_array(&self) -> Result<&[Value]> {
        match self {
            Value::Array(values) => Ok(values),
            _ => Err(self.mismatch(ValueKind::Array)),
        }
    }

    /// Returns the array for modification, or a type mismatch error.
    pub fn as_array_mut(&mut self) -> Result<&mut Vec<Value>> {
        match self {
            Value::Array(values) => Ok(values),
            _ => Err(self.mismatch(ValueKind::Array)),
        }
    }

    /// Returns the nested section, or a type mismatch error.
    pub fn as_section(&self) -> Result<&Section> {
        match self {
            Value::Section(section) => Ok(section),
            _ => Err(self.mismatch(ValueKind::Section)),
        }
    }

    /// Returns the nested section for modification, or a type mismatch error.
    ///
    /// If the section is shared with other values it is copied first.
    pub fn as_section_mut(&mut self) -> Result<&mut Section> {
        match self {
            Value::Section(section) => Ok(Arc::make_mut(section)),
            _ => Err(self.mismatch(ValueKind::Section)),
        }
    }

    /// Consumes the value and returns the nested section, copying it only when shared.
    pub fn into_section(self) -> Result<Section> {
        match self {
            Value::Section(section) => {
                Ok(Arc::try_unwrap(section).unwrap_or_else(|shared| (*shared).clone()))
            }
            other => Err(other.mismatch(ValueKind::Section)),
        }
    }

    /// Returns `true` if both values are sections backed by the same allocation.
    #[must_use]
    pub fn shares_section_with(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Section(a), Value::Section(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::ser::render_value(self, &crate::DcfOptions::default()))
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::String(s) => serializer.serialize_str(s),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::Double(d) => serializer.serialize_f64(*d),
            Value::Array(values) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(values.len()))?;
                for element in values {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Value::Section(section) => section.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any valid DCF value")
            }

            fn visit_bool<E>(self, value: bool) -> std::result::Result<Value, E> {
                Ok(Value::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> std::result::Result<Value, E> {
                Ok(Value::Integer(value))
            }

            fn visit_u64<E>(self, value: u64) -> std::result::Result<Value, E>
            where
                E: de::Error,
            {
                i64::try_from(value)
                    .map(Value::Integer)
                    .map_err(|_| E::custom(format!("integer {} exceeds the signed 64-bit range", value)))
            }

            fn visit_f64<E>(self, value: f64) -> std::result::Result<Value, E> {
                Ok(Value::Double(value))
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<Value, E> {
                Ok(Value::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> std::result::Result<Value, E> {
                Ok(Value::String(value))
            }

            fn visit_some<D>(self, deserializer: D) -> std::result::Result<Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut vec = Vec::new();
                while let Some(elem) = seq.next_element()? {
                    vec.push(elem);
                }
                Ok(Value::Array(vec))
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut section = Section::new();
                while let Some((key, value)) = map.next_entry::<String, Value>()? {
                    section.set(key, value);
                }
                Ok(Value::from(section))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

impl TryFrom<Value> for i64 {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        value.as_int()
    }
}

impl TryFrom<Value> for f64 {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        value.as_double()
    }
}

impl TryFrom<Value> for bool {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        value.as_bool()
    }
}

impl TryFrom<Value> for String {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(other.mismatch(ValueKind::String)),
        }
    }
}

impl TryFrom<Value> for Vec<Value> {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Array(values) => Ok(values),
            other => Err(other.mismatch(ValueKind::Array)),
        }
    }
}

impl TryFrom<Value> for Section {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        value.into_section()
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i8> for Value {
    fn from(value: i8) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<i16> for Value {
    fn from(value: i16) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<u8> for Value {
    fn from(value: u8) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<u16> for Value {
    fn from(value: u16) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Double(value as f64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<Section> for Value {
    fn from(value: Section) -> Self {
        Value::Section(Arc::new(value))
    }
}

impl From<Arc<Section>> for Value {
    fn from(value: Arc<Section>) -> Self {
        Value::Section(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::TryFrom;

    #[test]
    fn test_accessors_match_kind() {
        assert_eq!(Value::from("x").as_str().unwrap(), "x");
        assert!(Value::from(true).as_bool().unwrap());
        assert_eq!(Value::from(7u8).as_int().unwrap(), 7);
        assert_eq!(Value::from(2.5).as_double().unwrap(), 2.5);
        assert!(Value::from(vec![]).as_array().unwrap().is_empty());
        assert!(Value::from(Section::new()).as_section().unwrap().is_empty());
    }

    #[test]
    fn test_wrong_accessor_is_type_mismatch() {
        let err = Value::from(1).as_double().unwrap_err();
        assert_eq!(
            err,
            Error::TypeMismatch {
                expected: "double".to_string(),
                found: "integer".to_string(),
            }
        );
        assert!(Value::from("1").as_int().is_err());
        assert!(Value::from(1.0).as_section().is_err());
        assert!(Value::from(false).as_array().is_err());
    }

    #[test]
    fn test_clone_shares_section() {
        let mut inner = Section::new();
        inner.set("a", 1);
        let value = Value::from(inner);
        let copy = value.clone();
        assert!(value.shares_section_with(&copy));
    }

    #[test]
    fn test_section_mut_detaches_shared_copy() {
        let mut inner = Section::new();
        inner.set("a", 1);
        let value = Value::from(inner);
        let mut copy = value.clone();

        copy.as_section_mut().unwrap().set("a", 2);

        assert!(!value.shares_section_with(&copy));
        assert_eq!(value.as_section().unwrap().get("a").unwrap().as_int().unwrap(), 1);
        assert_eq!(copy.as_section().unwrap().get("a").unwrap().as_int().unwrap(), 2);
    }

    #[test]
    fn test_tryfrom_conversions() {
        assert_eq!(i64::try_from(Value::from(42)).unwrap(), 42);
        assert_eq!(f64::try_from(Value::from(3.5)).unwrap(), 3.5);
        assert!(bool::try_from(Value::from(true)).unwrap());
        assert_eq!(String::try_from(Value::from("hi")).unwrap(), "hi");
        assert!(i64::try_from(Value::from(3.5)).is_err());
        assert!(Section::try_from(Value::from(1)).is_err());
    }

    #[test]
    fn test_display_uses_literal_syntax() {
        assert_eq!(Value::from("a b").to_string(), "\"a b\"");
        assert_eq!(Value::from(-3).to_string(), "-3");
        assert_eq!(Value::from(2.0).to_string(), "2.0");
        assert_eq!(Value::from(false).to_string(), "false");
        assert_eq!(Value::from(vec![]).to_string(), "[]");
    }
}
