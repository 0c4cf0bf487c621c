//! DCF tokenizer.
//!
//! The lexer turns source text into a flat list of [`Token`]s. At every position it tries an
//! ordered list of rules and takes the **first** rule that matches, not the longest one. The
//! order is part of the grammar: booleans come before keys so `true` is never a key, and
//! decimals come before integers so `3.14` is one token.
//!
//! Whitespace is matched and dropped. Comments are kept because the parser turns them into
//! key headers. A single [`TokenKind::EndOfInput`] token closes every successful result.
//!
//! ```rust
//! use serde_dcf::lexer::{tokenize, TokenKind};
//!
//! let tokens = tokenize("{ size: 0x1F }").unwrap();
//! let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
//! assert_eq!(
//!     kinds,
//!     vec![
//!         TokenKind::LBrace,
//!         TokenKind::Key,
//!         TokenKind::Colon,
//!         TokenKind::Hex,
//!         TokenKind::RBrace,
//!         TokenKind::EndOfInput,
//!     ]
//! );
//! assert_eq!((tokens[3].line, tokens[3].column), (1, 9));
//! ```

use crate::{Error, Result};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// The kind of a lexical token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Comment,
    String,
    Boolean,
    Decimal,
    Hex,
    Binary,
    Integer,
    Key,
    Function,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Colon,
    Comma,
    EndOfInput,
}

impl TokenKind {
    /// Human-readable name used in parse errors.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            TokenKind::Comment => "comment",
            TokenKind::String => "string",
            TokenKind::Boolean => "boolean",
            TokenKind::Decimal => "decimal number",
            TokenKind::Hex => "hexadecimal number",
            TokenKind::Binary => "binary number",
            TokenKind::Integer => "integer number",
            TokenKind::Key => "key",
            TokenKind::Function => "function",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::Colon => "':'",
            TokenKind::Comma => "','",
            TokenKind::EndOfInput => "end of input",
        }
    }

    /// Returns `true` for tokens that can open a value.
    #[must_use]
    pub const fn starts_value(self) -> bool {
        matches!(
            self,
            TokenKind::String
                | TokenKind::Boolean
                | TokenKind::Decimal
                | TokenKind::Hex
                | TokenKind::Binary
                | TokenKind::Integer
                | TokenKind::LBracket
                | TokenKind::LBrace
                | TokenKind::Function
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A token and where it starts in the source.
///
/// Lines and columns are 1-based. Columns count characters, not bytes, so a multi-byte
/// character inside a string or comment advances the column by one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub line: usize,
    pub column: usize,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, text: &'a str, line: usize, column: usize) -> Self {
        Token {
            kind,
            text,
            line,
            column,
        }
    }
}

/// One entry of the rule table. `kind` is `None` for whitespace.
struct Rule {
    regex: Regex,
    kind: Option<TokenKind>,
}

impl Rule {
    /// Whitespace and comments may contain newlines; every other token is single-line.
    fn spans_lines(&self) -> bool {
        matches!(self.kind, None | Some(TokenKind::Comment))
    }
}

/// Rule patterns in priority order.
const RULE_PATTERNS: &[(&str, Option<TokenKind>)] = &[
    (r"\s+", None),
    (r"//[^\n]*|/\*(?s:.)*?\*/", Some(TokenKind::Comment)),
    (r#""[^"\n]*"|'[^'\n]*'"#, Some(TokenKind::String)),
    (r"(?i:true|false)", Some(TokenKind::Boolean)),
    (
        r"-?(?:[0-9]+\.[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?|-?[0-9]+[eE][+-]?[0-9]+",
        Some(TokenKind::Decimal),
    ),
    (r"(?i:-?0x[0-9a-f]+)", Some(TokenKind::Hex)),
    (r"(?i:-?0b[01]+)", Some(TokenKind::Binary)),
    (r"-?[0-9]+", Some(TokenKind::Integer)),
    (r"[a-zA-Z](?:[a-zA-Z0-9_-]*[a-zA-Z0-9])?", Some(TokenKind::Key)),
    (r"@[a-zA-Z]+", Some(TokenKind::Function)),
    (r"\(", Some(TokenKind::LParen)),
    (r"\)", Some(TokenKind::RParen)),
    (r"\{", Some(TokenKind::LBrace)),
    (r"\}", Some(TokenKind::RBrace)),
    (r"\[", Some(TokenKind::LBracket)),
    (r"\]", Some(TokenKind::RBracket)),
    (r":", Some(TokenKind::Colon)),
    (r",", Some(TokenKind::Comma)),
];

static KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z](?:[a-zA-Z0-9_-]*[a-zA-Z0-9])?$").unwrap());

/// Returns `true` if `text` would be read back as a single key token.
///
/// Words starting with `true` or `false` (any case) are not keys: the boolean rule claims
/// their prefix first.
#[must_use]
pub fn is_key(text: &str) -> bool {
    let lower = text.get(..5).unwrap_or(text).to_ascii_lowercase();
    KEY.is_match(text) && !lower.starts_with("true") && !lower.starts_with("false")
}

static RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    RULE_PATTERNS
        .iter()
        .map(|&(pattern, kind)| Rule {
            regex: Regex::new(&format!("^(?:{})", pattern)).unwrap(),
            kind,
        })
        .collect()
});

/// Splits `text` into tokens, ending with [`TokenKind::EndOfInput`].
///
/// # Errors
///
/// Returns [`Error::Lex`] at the first position where no rule matches.
///
/// # Examples
///
/// ```rust
/// use serde_dcf::lexer::tokenize;
///
/// let err = tokenize("{\n  a: #\n}").unwrap_err();
/// assert!(err.is_lex());
/// assert_eq!((err.line(), err.column()), (Some(2), Some(6)));
/// ```
pub fn tokenize(text: &str) -> Result<Vec<Token<'_>>> {
    let mut tokens = Vec::new();
    let mut line = 1;
    let mut column = 1;
    let mut pos = 0;
    // Just past the last non-whitespace token.
    let mut end = (1, 1);

    'scan: while pos < text.len() {
        let rest = &text[pos..];
        for rule in RULES.iter() {
            let matched = match rule.regex.find(rest) {
                Some(m) => m.as_str(),
                None => continue,
            };

            if let Some(kind) = rule.kind {
                tokens.push(Token::new(kind, matched, line, column));
            }

            if rule.spans_lines() {
                for ch in matched.chars() {
                    if ch == '\n' {
                        line += 1;
                        column = 1;
                    } else {
                        column += 1;
                    }
                }
            } else {
                column += matched.chars().count();
            }

            if rule.kind.is_some() {
                end = (line, column);
            }
            pos += matched.len();
            continue 'scan;
        }

        let found = rest.chars().next().unwrap_or_default();
        return Err(Error::lex(
            &format!("Unknown token starting with {:?}", found),
            line,
            column,
        ));
    }

    tokens.push(Token::new(TokenKind::EndOfInput, "", end.0, end.1));
    debug!("tokenized {} bytes into {} tokens", text.len(), tokens.len());
    Ok(tokens)
}
