//! # serde_dcf
//!
//! A reader and writer for DCF, a small comment-aware configuration format, with a Serde bridge.
//!
//! ## What is DCF?
//!
//! A DCF document is one brace-delimited section of `key: value` pairs:
//!
//! ```text
//! // Listening address
//! {
//!     host: "0.0.0.0",
//!     port: 0x1F90,
//!     weights: [1, 2.5, -3e2],
//!     tls: { enabled: TRUE, home: @env("HOME") }
//! }
//! ```
//!
//! - values are strings, booleans, integers (decimal, `0x` hex, `0b` binary), doubles,
//!   arrays and nested sections
//! - `//` and `/* */` comments may appear anywhere between tokens
//! - comments placed directly before a key become that key's *header*, and are written
//!   back out when the document is serialized
//! - `@name(args)` function calls are accepted and read as empty strings
//!
//! ## Key Features
//!
//! - **Order preserving**: sections keep their keys in insertion order
//! - **Round trips**: headers survive `parse` then serialize
//! - **Serde compatible**: any `#[derive(Serialize, Deserialize)]` type converts to and from DCF
//! - **Precise errors**: lexing and parsing faults carry line and column
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_dcf::parse;
//!
//! let section = parse("{ // Server port\n port: 8080, debug: false }").unwrap();
//! assert_eq!(section.get("port").unwrap().as_int().unwrap(), 8080);
//! assert_eq!(section.header("port").unwrap(), "Server port");
//!
//! assert_eq!(
//!     section.to_string(),
//!     "{\n    // Server port\n    port: 8080,\n    debug: false\n}"
//! );
//! ```
//!
//! ### Typed Access with Serde
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_dcf::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Server {
//!     host: String,
//!     port: u16,
//!     aliases: Vec<String>,
//! }
//!
//! let server = Server {
//!     host: "localhost".to_string(),
//!     port: 8080,
//!     aliases: vec!["local".to_string()],
//! };
//!
//! let text = to_string(&server).unwrap();
//! let back: Server = from_str(&text).unwrap();
//! assert_eq!(server, back);
//! ```
//!
//! ### Dynamic Values with dcf! Macro
//!
//! ```rust
//! use serde_dcf::dcf;
//!
//! let value = dcf!({ "name": "demo", "tags": ["a", "b"] });
//! let section = value.as_section().unwrap();
//! assert_eq!(section.get("name").unwrap().as_str().unwrap(), "demo");
//! ```
//!
//! ## Logging
//!
//! The crate logs through the [`log`] facade: `debug!` summaries for tokenizing and parsing,
//! `trace!` for discarded function calls. No logger is installed by the library.
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - parse, query, and write a document
//! - **`comments.rs`** - key headers and how they survive a round trip
//! - **`dynamic_values.rs`** - building and editing `Value` trees
//! - **`custom_options.rs`** - indentation settings
//!
//! Run any example with: `cargo run --example <name>`

pub mod de;
pub mod error;
pub mod lexer;
pub mod macros;
pub mod options;
pub mod parser;
pub mod section;
pub mod ser;
pub mod value;

pub use de::ValueDeserializer;
pub use error::{Error, Result};
pub use options::{DcfOptions, DEFAULT_INDENT};
pub use section::{Entry, Section};
pub use ser::Serializer;
pub use value::{Value, ValueKind};

use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;

/// Parses DCF text into its root [`Section`].
///
/// # Examples
///
/// ```rust
/// use serde_dcf::parse;
///
/// let section = parse("{ a: -0x1A, b: 0b101, c: -3.14e2 }").unwrap();
/// assert_eq!(section.get("a").unwrap().as_int().unwrap(), -26);
/// assert_eq!(section.get("b").unwrap().as_int().unwrap(), 5);
/// assert_eq!(section.get("c").unwrap().as_double().unwrap(), -314.0);
///
/// let err = parse("{ a: }").unwrap_err();
/// assert_eq!((err.line(), err.column()), (Some(1), Some(6)));
/// ```
///
/// # Errors
///
/// Returns [`Error::Lex`] for characters no token can start with and [`Error::Parse`] for
/// token sequences outside the grammar. Both carry the offending position.
pub fn parse(text: &str) -> Result<Section> {
    let tokens = lexer::tokenize(text)?;
    let section = parser::parse_tokens(&tokens)?;
    debug!(
        "parsed root section with {} keys from {} tokens",
        section.len(),
        tokens.len()
    );
    Ok(section)
}

/// Convert any `T: Serialize` to a [`Value`].
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use serde_dcf::to_value;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert!(value.is_section());
/// ```
///
/// # Errors
///
/// Returns [`Error::UnsupportedType`] if `value` has no DCF form, e.g. `()` or `None`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    ser::to_present_value(value)
}

/// Convert any `T: Serialize` that maps onto a section (structs, maps) to a [`Section`].
///
/// # Errors
///
/// Returns [`Error::TypeMismatch`] if `value` does not serialize to a section.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_section<T>(value: &T) -> Result<Section>
where
    T: ?Sized + Serialize,
{
    to_value(value)?.into_section()
}

/// Serialize any `T: Serialize` to a DCF string.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use serde_dcf::to_string;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: f64 }
///
/// let text = to_string(&Point { x: 1, y: 2.0 }).unwrap();
/// assert_eq!(text, "{\n    x: 1,\n    y: 2.0\n}");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized or is not a section at the root.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, DcfOptions::default())
}

/// Serialize any `T: Serialize` to a DCF string with custom options.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized or is not a section at the root, and
/// [`Error::UnsupportedType`] if a key (a field name or map key) would not read back as a
/// DCF key, e.g. `_id`, `1` or `truecolor`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: DcfOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let section = to_section(value)?;
    ser::check_keys(&section)?;
    let mut serializer = Serializer::new(options);
    serializer.serialize_section(&section);
    Ok(serializer.into_inner())
}

/// Serialize any `T: Serialize` to a writer in DCF format.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, DcfOptions::default())
}

/// Serialize any `T: Serialize` to a writer in DCF format with custom options.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(mut writer: W, value: &T, options: DcfOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = to_string_with_options(value, options)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Deserialize an instance of type `T` from DCF text.
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
/// use serde_dcf::from_str;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("{ y: 2, /* later */ x: 1 }").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the text is not valid DCF or does not match `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(text: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_section(parse(text)?)
}

/// Deserialize an instance of type `T` from a parsed [`Section`].
///
/// # Errors
///
/// Returns an error if the section does not match `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_section<T>(section: Section) -> Result<T>
where
    T: DeserializeOwned,
{
    from_value(Value::from(section))
}

/// Deserialize an instance of type `T` from a [`Value`].
///
/// # Errors
///
/// Returns an error if the value does not match `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(ValueDeserializer::new(value))
}

/// Deserialize an instance of type `T` from an I/O stream of DCF.
///
/// # Errors
///
/// Returns [`Error::Io`] if reading fails, otherwise the errors of [`from_str`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}

/// Deserialize an instance of type `T` from bytes of DCF text.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, not valid DCF, or do not match `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::io::Cursor;

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct User {
        id: u32,
        name: String,
        active: bool,
        tags: Vec<String>,
        score: Option<f64>,
    }

    fn user() -> User {
        User {
            id: 123,
            name: "Alice".to_string(),
            active: true,
            tags: vec!["admin".to_string(), "user".to_string()],
            score: None,
        }
    }

    #[test]
    fn test_serialize_deserialize_user() {
        let text = to_string(&user()).unwrap();
        assert!(!text.contains("score"));
        let back: User = from_str(&text).unwrap();
        assert_eq!(back, user());
    }

    #[test]
    fn test_to_section_keeps_field_order() {
        let section = to_section(&user()).unwrap();
        assert_eq!(section.keys(), vec!["id", "name", "active", "tags"]);
    }

    #[test]
    fn test_non_section_root_is_rejected() {
        assert!(to_string(&vec![1, 2, 3]).is_err());
        assert!(to_section(&"text").is_err());
        assert_eq!(to_value(&vec![1, 2]).unwrap().as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_custom_options() {
        let text = to_string_with_options(&user(), DcfOptions::new().with_indent(1)).unwrap();
        assert!(text.starts_with("{\n id: 123,\n"));
        let back: User = from_str(&text).unwrap();
        assert_eq!(back, user());
    }

    #[test]
    fn test_reader_and_writer() {
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &user()).unwrap();
        let back: User = from_reader(Cursor::new(buffer.clone())).unwrap();
        assert_eq!(back, user());
        let back: User = from_slice(&buffer).unwrap();
        assert_eq!(back, user());
    }

    #[test]
    fn test_keys_that_cannot_be_read_back_are_rejected() {
        use std::collections::BTreeMap;

        #[derive(Serialize)]
        struct Ports {
            by_id: BTreeMap<u32, String>,
        }

        #[derive(Serialize)]
        struct Renamed {
            #[serde(rename = "_id")]
            id: u32,
        }

        let mut by_id = BTreeMap::new();
        by_id.insert(1, "one".to_string());
        let err = to_string(&Ports { by_id }).unwrap_err();
        assert!(matches!(err, Error::UnsupportedType(_)));

        assert!(to_string(&Renamed { id: 1 }).is_err());
        let mut buffer = Vec::new();
        assert!(to_writer(&mut buffer, &Renamed { id: 1 }).is_err());
        assert!(buffer.is_empty());

        let mut names = BTreeMap::new();
        names.insert("max-retries".to_string(), 3);
        let text = to_string(&names).unwrap();
        let back: BTreeMap<String, i32> = from_str(&text).unwrap();
        assert_eq!(back, names);
    }

    #[test]
    fn test_invalid_utf8_is_rejected() {
        assert!(from_slice::<User>(&[b'{', 0xff, b'}']).is_err());
    }

    #[test]
    fn test_parse_reports_lex_errors() {
        let err = parse("{\n  a: 1 ?\n}").unwrap_err();
        assert!(err.is_lex());
        assert_eq!((err.line(), err.column()), (Some(2), Some(8)));
    }
}
