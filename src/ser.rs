//! DCF serialization.
//!
//! This module has two halves:
//!
//! - [`Serializer`] writes a [`Section`] tree as canonical DCF text, keeping key order and
//!   key headers.
//! - `ValueSerializer` is a serde serializer that turns any `T: Serialize` into a [`Value`],
//!   used by [`to_value`](crate::to_value), [`to_section`](crate::to_section) and
//!   [`to_string`](crate::to_string).
//!
//! ## Canonical Form
//!
//! ```rust
//! use serde_dcf::{DcfOptions, Section, Serializer, Value};
//!
//! let mut section = Section::new();
//! section.set_with_header("name", "Display name", "demo");
//! section.set("ratio", 0.5);
//! section.set("tags", vec![Value::from("a"), Value::from("b")]);
//! section.set("empty", Section::new());
//!
//! let mut serializer = Serializer::new(DcfOptions::default());
//! serializer.serialize_section(&section);
//! assert_eq!(
//!     serializer.into_inner(),
//!     "{\n    // Display name\n    name: \"demo\",\n    ratio: 0.5,\n    tags: [\n        \"a\",\n        \"b\"\n    ],\n    empty: {}\n}"
//! );
//! ```

use crate::lexer::is_key;
use crate::{DcfOptions, Error, Result, Section, Value};
use serde::{ser, Serialize};

/// Significant digits used for doubles, as in C's `%.15g`.
const DOUBLE_DIGITS: usize = 15;

/// The DCF text serializer.
///
/// Created via [`Serializer::new`]; [`Section`]'s `Display` impl and
/// [`Section::to_string_with_options`] use it under the hood.
pub struct Serializer {
    output: String,
    options: DcfOptions,
}

impl Serializer {
    pub fn new(options: DcfOptions) -> Self {
        Serializer {
            output: String::with_capacity(256),
            options,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Appends `section` as a root section.
    pub fn serialize_section(&mut self, section: &Section) {
        self.write_section(section, 1);
    }

    fn pad(&mut self, width: usize) {
        self.output.extend(std::iter::repeat(' ').take(width));
    }

    /// Writes a section whose entries sit at nesting `depth`.
    fn write_section(&mut self, section: &Section, depth: usize) {
        if section.is_empty() {
            self.output.push_str("{}");
            return;
        }

        let width = self.options.indent * depth;
        self.output.push_str("{\n");
        for (index, (key, entry)) in section.entries().enumerate() {
            if index > 0 {
                self.output.push_str(",\n");
            }
            let header = entry.header().trim();
            if !header.is_empty() {
                if index > 0 {
                    self.output.push('\n');
                }
                self.write_header(header, width);
            }
            self.pad(width);
            self.output.push_str(key);
            self.output.push_str(": ");
            self.write_value(entry.value(), depth + 1);
        }
        self.output.push('\n');
        self.pad(width - self.options.indent);
        self.output.push('}');
    }

    fn write_header(&mut self, header: &str, width: usize) {
        for line in header.lines() {
            let line = line.trim();
            self.pad(width);
            if line.is_empty() {
                self.output.push_str("//\n");
            } else {
                self.output.push_str("// ");
                self.output.push_str(line);
                self.output.push('\n');
            }
        }
    }

    /// Writes an array whose elements sit at nesting `depth`.
    fn write_array(&mut self, values: &[Value], depth: usize) {
        if values.is_empty() {
            self.output.push_str("[]");
            return;
        }

        let width = self.options.indent * depth;
        self.output.push_str("[\n");
        for (index, value) in values.iter().enumerate() {
            if index > 0 {
                self.output.push_str(",\n");
            }
            self.pad(width);
            self.write_value(value, depth + 1);
        }
        self.output.push('\n');
        self.pad(width - self.options.indent);
        self.output.push(']');
    }

    fn write_value(&mut self, value: &Value, depth: usize) {
        match value {
            Value::String(s) => {
                self.output.push('"');
                self.output.push_str(s);
                self.output.push('"');
            }
            Value::Bool(b) => self.output.push_str(if *b { "true" } else { "false" }),
            Value::Integer(i) => self.output.push_str(&i.to_string()),
            Value::Double(d) => self.output.push_str(&format_double(*d)),
            Value::Array(values) => self.write_array(values, depth),
            Value::Section(section) => self.write_section(section, depth),
        }
    }
}

/// Rejects sections holding keys that would not be read back as keys.
///
/// [`Serializer`] writes keys verbatim; the serde helpers call this first so that
/// `to_string` never produces text `from_str` refuses.
pub(crate) fn check_keys(section: &Section) -> Result<()> {
    for (key, value) in section.iter() {
        if !is_key(key) {
            return Err(Error::unsupported_type(&format!(
                "{:?} cannot be written as a DCF key",
                key
            )));
        }
        check_value_keys(value)?;
    }
    Ok(())
}

fn check_value_keys(value: &Value) -> Result<()> {
    match value {
        Value::Section(section) => check_keys(section),
        Value::Array(values) => values.iter().try_for_each(check_value_keys),
        _ => Ok(()),
    }
}

/// Renders a single value as it would appear after `key: ` in a root section.
pub(crate) fn render_value(value: &Value, options: &DcfOptions) -> String {
    let mut serializer = Serializer::new(options.clone());
    serializer.write_value(value, 1);
    serializer.into_inner()
}

/// Formats a double like `%.15g`, then makes sure the text still reads back as a double.
///
/// Non-finite values come out as `nan`, `inf` and `-inf`, which DCF cannot read back.
pub fn format_double(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    // The exponent after rounding to DOUBLE_DIGITS decides between fixed and scientific.
    let scientific = format!("{:.*e}", DOUBLE_DIGITS - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    let mut text = if exponent < -4 || exponent >= DOUBLE_DIGITS as i32 {
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            if exponent < 0 { '-' } else { '+' },
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (DOUBLE_DIGITS as i32 - 1 - exponent) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    };

    if !text.contains(|c: char| c == '.' || c == 'e') {
        text.push_str(".0");
    }
    text
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

/// Serde serializer producing [`Value`]s.
///
/// `Ok(None)` stands for values DCF has no form for (`None`, `()`, unit structs). Sections
/// drop keys holding them; anywhere else they are an error.
pub(crate) struct ValueSerializer;

pub(crate) struct SerializeVec {
    vec: Vec<Value>,
    variant: Option<&'static str>,
}

pub(crate) struct SerializeMap {
    map: Section,
    current_key: Option<String>,
    variant: Option<&'static str>,
}

/// Wraps `value` as `{ variant: value }`, the externally tagged enum form.
fn tagged(variant: &'static str, value: Value) -> Value {
    let mut section = Section::with_capacity(1);
    section.set(variant, value);
    Value::from(section)
}

fn absent(what: &str) -> Error {
    Error::unsupported_type(&format!("{} has no DCF representation", what))
}

/// Serializes an element that must be present.
pub(crate) fn to_present_value<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    value
        .serialize(ValueSerializer)?
        .ok_or_else(|| absent("null"))
}

impl ser::Serializer for ValueSerializer {
    type Ok = Option<Value>;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeVec;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeMap;

    fn serialize_bool(self, v: bool) -> Result<Option<Value>> {
        Ok(Some(Value::Bool(v)))
    }

    fn serialize_i8(self, v: i8) -> Result<Option<Value>> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i16(self, v: i16) -> Result<Option<Value>> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i32(self, v: i32) -> Result<Option<Value>> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i64(self, v: i64) -> Result<Option<Value>> {
        Ok(Some(Value::Integer(v)))
    }

    fn serialize_u8(self, v: u8) -> Result<Option<Value>> {
        self.serialize_i64(v as i64)
    }

    fn serialize_u16(self, v: u16) -> Result<Option<Value>> {
        self.serialize_i64(v as i64)
    }

    fn serialize_u32(self, v: u32) -> Result<Option<Value>> {
        self.serialize_i64(v as i64)
    }

    fn serialize_u64(self, v: u64) -> Result<Option<Value>> {
        i64::try_from(v)
            .map(|i| Some(Value::Integer(i)))
            .map_err(|_| {
                Error::unsupported_type(&format!(
                    "integer {} exceeds the signed 64-bit range",
                    v
                ))
            })
    }

    fn serialize_f32(self, v: f32) -> Result<Option<Value>> {
        self.serialize_f64(v as f64)
    }

    fn serialize_f64(self, v: f64) -> Result<Option<Value>> {
        Ok(Some(Value::Double(v)))
    }

    fn serialize_char(self, v: char) -> Result<Option<Value>> {
        Ok(Some(Value::String(v.to_string())))
    }

    fn serialize_str(self, v: &str) -> Result<Option<Value>> {
        Ok(Some(Value::String(v.to_string())))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Option<Value>> {
        let vec = v.iter().map(|&b| Value::Integer(b as i64)).collect();
        Ok(Some(Value::Array(vec)))
    }

    fn serialize_none(self) -> Result<Option<Value>> {
        Ok(None)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Option<Value>>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Option<Value>> {
        Ok(None)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Option<Value>> {
        Ok(None)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Option<Value>> {
        Ok(Some(Value::String(variant.to_string())))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Option<Value>>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Option<Value>>
    where
        T: ?Sized + Serialize,
    {
        Ok(Some(tagged(variant, to_present_value(value)?)))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len.unwrap_or(0), None))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, None))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, None))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, Some(variant)))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap::new(None))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<SerializeMap> {
        Ok(SerializeMap::new(None))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<SerializeMap> {
        Ok(SerializeMap::new(Some(variant)))
    }
}

impl SerializeVec {
    fn new(capacity: usize, variant: Option<&'static str>) -> Self {
        SerializeVec {
            vec: Vec::with_capacity(capacity),
            variant,
        }
    }

    fn push<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        self.vec.push(to_present_value(value)?);
        Ok(())
    }

    fn finish(self) -> Result<Option<Value>> {
        let array = Value::Array(self.vec);
        Ok(Some(match self.variant {
            Some(variant) => tagged(variant, array),
            None => array,
        }))
    }
}

impl SerializeMap {
    fn new(variant: Option<&'static str>) -> Self {
        SerializeMap {
            map: Section::new(),
            current_key: None,
            variant,
        }
    }

    fn insert<T: Serialize + ?Sized>(&mut self, key: String, value: &T) -> Result<()> {
        if let Some(value) = value.serialize(ValueSerializer)? {
            self.map.set(key, value);
        }
        Ok(())
    }

    fn finish(self) -> Result<Option<Value>> {
        let section = Value::from(self.map);
        Ok(Some(match self.variant {
            Some(variant) => tagged(variant, section),
            None => section,
        }))
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Option<Value>> {
        self.finish()
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Option<Value>> {
        self.finish()
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Option<Value>> {
        self.finish()
    }
}

impl ser::SerializeTupleVariant for SerializeVec {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Option<Value>> {
        self.finish()
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.current_key = Some(match to_present_value(key)? {
            Value::String(s) => s,
            Value::Integer(i) => i.to_string(),
            other => {
                return Err(Error::unsupported_type(&format!(
                    "map key of kind {}",
                    other.kind()
                )))
            }
        });
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.insert(key, value)
    }

    fn end(self) -> Result<Option<Value>> {
        self.finish()
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.insert(key.to_string(), value)
    }

    fn end(self) -> Result<Option<Value>> {
        self.finish()
    }
}

impl ser::SerializeStructVariant for SerializeMap {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.insert(key.to_string(), value)
    }

    fn end(self) -> Result<Option<Value>> {
        self.finish()
    }
}
