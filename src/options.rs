//! Configuration options for DCF serialization.
//!
//! ## Examples
//!
//! ```rust
//! use serde_dcf::{parse, DcfOptions};
//!
//! let section = parse("{ a: { b: 1 } }").unwrap();
//!
//! let options = DcfOptions::new().with_indent(2);
//! assert_eq!(
//!     section.to_string_with_options(&options),
//!     "{\n  a: {\n    b: 1\n  }\n}"
//! );
//! ```

use crate::{Error, Result};

/// Indentation width used when no options are given.
pub const DEFAULT_INDENT: usize = 4;

/// Configuration options for DCF serialization.
///
/// # Examples
///
/// ```rust
/// use serde_dcf::DcfOptions;
///
/// let options = DcfOptions::new();
/// assert_eq!(options.indent, 4);
///
/// assert!(DcfOptions::new().try_with_indent(-1).is_err());
/// assert_eq!(DcfOptions::new().try_with_indent(8).unwrap().indent, 8);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DcfOptions {
    /// Spaces per nesting level.
    pub indent: usize,
}

impl Default for DcfOptions {
    fn default() -> Self {
        DcfOptions {
            indent: DEFAULT_INDENT,
        }
    }
}

impl DcfOptions {
    /// Creates default options (4-space indent).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the indentation size (number of spaces per level).
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Sets the indentation size from a signed width.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `indent` is negative.
    pub fn try_with_indent(self, indent: isize) -> Result<Self> {
        let indent = usize::try_from(indent).map_err(|_| {
            Error::invalid_configuration(&format!(
                "indent cannot be smaller than zero (got {})",
                indent
            ))
        })?;
        Ok(self.with_indent(indent))
    }
}
