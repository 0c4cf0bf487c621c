//! Error types for DCF parsing, serialization and data access.
//!
//! This module provides one error type shared by every layer of the crate, so that the
//! lexer, the parser, the data model and the serde bridge all report through the same
//! [`Error`] enum.
//!
//! ## Error Categories
//!
//! - **Lex Errors**: no token rule matches at some position of the input
//! - **Parse Errors**: the token stream violates the DCF grammar
//! - **Type Mismatches**: a [`Value`](crate::Value) was read through the wrong accessor
//! - **Missing Keys**: lookup or header access on a key that is not in the section
//! - **Invalid Configuration**: serializer options that cannot be honoured (negative indent)
//! - **I/O Errors**: reading or writing failures in the reader/writer helpers
//!
//! Lex and parse errors carry 1-based line and column numbers. Parsing is fail-fast: the
//! first error aborts the whole operation and no partial tree is returned.
//!
//! ## Examples
//!
//! ```rust
//! use serde_dcf::{parse, Error};
//!
//! let err = parse("{ a: }").unwrap_err();
//! assert!(err.is_parse());
//! assert_eq!((err.line(), err.column()), (Some(1), Some(6)));
//! assert_eq!(err.to_string(), "Expected value but got '}' at line 1, column 6");
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors produced by this crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// No lexical rule matches the input at the given position.
    #[error("{message} at line {line}, column {column}")]
    Lex {
        message: String,
        line: usize,
        column: usize,
    },

    /// The token stream does not follow the grammar.
    ///
    /// `found` is the human-readable kind of the offending token and the position is the
    /// position of that token.
    #[error("Expected {expected} but got {found} at line {line}, column {column}")]
    Parse {
        expected: String,
        found: String,
        line: usize,
        column: usize,
    },

    /// A value was accessed as a kind it does not hold.
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// Lookup or header access on a key that is not present.
    #[error("Key not found: {0}")]
    KeyNotFound(String),

    /// Options that the serializer cannot honour.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// A Rust type with no DCF representation.
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// Custom error raised through serde.
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a lex error at the given 1-based position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_dcf::Error;
    ///
    /// let err = Error::lex("Unknown token", 3, 7);
    /// assert_eq!(err.to_string(), "Unknown token at line 3, column 7");
    /// ```
    pub fn lex(message: &str, line: usize, column: usize) -> Self {
        Error::Lex {
            message: message.to_string(),
            line,
            column,
        }
    }

    /// Creates a parse error describing what was expected and what was found instead.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_dcf::Error;
    ///
    /// let err = Error::parse("':'", "string", 2, 5);
    /// assert!(err.to_string().contains("Expected ':' but got string"));
    /// ```
    pub fn parse(expected: &str, found: &str, line: usize, column: usize) -> Self {
        Error::Parse {
            expected: expected.to_string(),
            found: found.to_string(),
            line,
            column,
        }
    }

    /// Creates a type mismatch error for an accessor used on the wrong kind of value.
    pub fn type_mismatch(expected: &str, found: &str) -> Self {
        Error::TypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Creates a missing key error.
    pub fn key_not_found(key: &str) -> Self {
        Error::KeyNotFound(key.to_string())
    }

    /// Creates an invalid configuration error.
    pub fn invalid_configuration(msg: &str) -> Self {
        Error::InvalidConfiguration(msg.to_string())
    }

    /// Creates an unsupported type error for types that have no DCF form.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_dcf::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns `true` for errors raised by the lexer.
    #[must_use]
    pub const fn is_lex(&self) -> bool {
        matches!(self, Error::Lex { .. })
    }

    /// Returns `true` for errors raised by the parser.
    #[must_use]
    pub const fn is_parse(&self) -> bool {
        matches!(self, Error::Parse { .. })
    }

    /// The 1-based line of a lex or parse error.
    #[must_use]
    pub const fn line(&self) -> Option<usize> {
        match self {
            Error::Lex { line, .. } | Error::Parse { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// The 1-based column of a lex or parse error.
    #[must_use]
    pub const fn column(&self) -> Option<usize> {
        match self {
            Error::Lex { column, .. } | Error::Parse { column, .. } => Some(*column),
            _ => None,
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
