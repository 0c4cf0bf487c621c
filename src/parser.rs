//! Recursive-descent parser from tokens to a [`Section`] tree.
//!
//! Grammar (`EOI` is the end-of-input token):
//!
//! ```text
//! Root         := Section EOI
//! Section      := '{' PairList '}'
//! PairList     := (Pair (',' Pair)*)?
//! Pair         := Comment* KEY ':' Value
//! Value        := STRING | BOOLEAN | NUM_INT | NUM_HEX | NUM_BINARY | NUM_DECIMAL
//!               | Array | Section | FunctionCall
//! Array        := '[' ValueList ']'
//! ValueList    := (Value (',' Value)*)?
//! FunctionCall := '@'NAME '(' ValueList ')'
//! ```
//!
//! Every decision looks at the next non-comment token only; the parser never backtracks and
//! stops at the first violation. Comments directly in front of a key become that key's
//! header. Comments anywhere else are skipped.
//!
//! Function calls are checked for shape but not evaluated; their value is an empty string.

use crate::lexer::{Token, TokenKind};
use crate::{Error, Result, Section, Value};
use log::trace;

/// Parses a token list produced by [`tokenize`](crate::lexer::tokenize).
///
/// # Errors
///
/// Returns [`Error::Parse`] at the first token that does not fit the grammar. A list that
/// does not end with [`TokenKind::EndOfInput`] is rejected the same way.
///
/// # Examples
///
/// ```rust
/// use serde_dcf::lexer::tokenize;
/// use serde_dcf::parser::parse_tokens;
///
/// let tokens = tokenize("{ answer: 42 }").unwrap();
/// let section = parse_tokens(&tokens).unwrap();
/// assert_eq!(section.get("answer").unwrap().as_int().unwrap(), 42);
/// ```
pub fn parse_tokens(tokens: &[Token<'_>]) -> Result<Section> {
    match tokens.last() {
        Some(last) if last.kind == TokenKind::EndOfInput => {}
        Some(last) => {
            return Err(unexpected(TokenKind::EndOfInput.describe(), last));
        }
        None => {
            return Err(Error::parse(
                TokenKind::LBrace.describe(),
                TokenKind::EndOfInput.describe(),
                1,
                1,
            ))
        }
    }
    Parser::new(tokens).parse_root()
}

fn unexpected(expected: &str, found: &Token<'_>) -> Error {
    Error::parse(expected, found.kind.describe(), found.line, found.column)
}

/// Cursor over a token list that ends with [`TokenKind::EndOfInput`].
struct Parser<'t, 'a> {
    tokens: &'t [Token<'a>],
    position: usize,
}

impl<'t, 'a> Parser<'t, 'a> {
    fn new(tokens: &'t [Token<'a>]) -> Self {
        Parser {
            tokens,
            position: 0,
        }
    }

    /// Index of the next non-comment token. The end marker stops the scan.
    fn peek_index(&self) -> usize {
        let mut index = self.position;
        while self.tokens[index].kind == TokenKind::Comment {
            index += 1;
        }
        index
    }

    fn peek(&self) -> &'t Token<'a> {
        &self.tokens[self.peek_index()]
    }

    /// Consumes and returns the next non-comment token. The end marker is never consumed.
    fn advance(&mut self) -> &'t Token<'a> {
        let index = self.peek_index();
        let token = &self.tokens[index];
        self.position = if token.kind == TokenKind::EndOfInput {
            index
        } else {
            index + 1
        };
        token
    }

    fn expect(&mut self, kind: TokenKind) -> Result<&'t Token<'a>> {
        let token = self.advance();
        if token.kind == kind {
            Ok(token)
        } else {
            Err(unexpected(kind.describe(), token))
        }
    }

    fn parse_root(&mut self) -> Result<Section> {
        let section = self.parse_section()?;
        self.expect(TokenKind::EndOfInput)?;
        Ok(section)
    }

    fn parse_section(&mut self) -> Result<Section> {
        self.expect(TokenKind::LBrace)?;
        let mut section = Section::new();
        self.parse_pair_list(&mut section)?;
        self.expect(TokenKind::RBrace)?;
        Ok(section)
    }

    fn parse_pair_list(&mut self, section: &mut Section) -> Result<()> {
        if self.peek().kind != TokenKind::Key {
            return Ok(());
        }
        loop {
            self.parse_pair(section)?;
            if self.peek().kind != TokenKind::Comma {
                return Ok(());
            }
            self.advance();
        }
    }

    fn parse_pair(&mut self, section: &mut Section) -> Result<()> {
        let header = self.take_header();
        let key = self.expect(TokenKind::Key)?;
        self.expect(TokenKind::Colon)?;
        let value = self.parse_value()?;
        section.set_with_header(key.text, header, value);
        Ok(())
    }

    /// Consumes the comments immediately ahead and joins them into header text.
    fn take_header(&mut self) -> String {
        let mut lines = Vec::new();
        while let Some(token) = self
            .tokens
            .get(self.position)
            .filter(|token| token.kind == TokenKind::Comment)
        {
            lines.extend(comment_body(token.text).split('\n').map(str::trim));
            self.position += 1;
        }
        lines.join("\n").trim().to_string()
    }

    fn parse_value(&mut self) -> Result<Value> {
        match self.peek().kind {
            TokenKind::LBracket => self.parse_array(),
            TokenKind::LBrace => self.parse_section().map(Value::from),
            TokenKind::Function => self.parse_function_call(),
            _ => {
                let token = self.advance();
                match token.kind {
                    TokenKind::String => string_literal(token).map(|s| Value::String(s.to_string())),
                    TokenKind::Boolean => Ok(Value::Bool(token.text.eq_ignore_ascii_case("true"))),
                    TokenKind::Integer | TokenKind::Hex | TokenKind::Binary => {
                        integer_literal(token).map(Value::Integer)
                    }
                    TokenKind::Decimal => decimal_literal(token).map(Value::Double),
                    _ => Err(unexpected("value", token)),
                }
            }
        }
    }

    fn parse_array(&mut self) -> Result<Value> {
        self.expect(TokenKind::LBracket)?;
        let values = self.parse_value_list()?;
        self.expect(TokenKind::RBracket)?;
        Ok(Value::Array(values))
    }

    fn parse_value_list(&mut self) -> Result<Vec<Value>> {
        let mut values = Vec::new();
        if !self.peek().kind.starts_value() {
            return Ok(values);
        }
        loop {
            values.push(self.parse_value()?);
            if self.peek().kind != TokenKind::Comma {
                return Ok(values);
            }
            self.advance();
        }
    }

    fn parse_function_call(&mut self) -> Result<Value> {
        let name = self.expect(TokenKind::Function)?;
        self.expect(TokenKind::LParen)?;
        let arguments = self.parse_value_list()?;
        self.expect(TokenKind::RParen)?;
        trace!(
            "discarding call to {} with {} argument(s) at line {}, column {}",
            name.text,
            arguments.len(),
            name.line,
            name.column
        );
        Ok(Value::String(String::new()))
    }
}

/// Text of a comment without its `//` or `/* */` delimiters.
fn comment_body(text: &str) -> &str {
    match text.strip_prefix("//") {
        Some(line) => line,
        None => text
            .strip_prefix("/*")
            .and_then(|body| body.strip_suffix("*/"))
            .unwrap_or(text),
    }
}

/// Text between the quotes, without escape processing.
fn string_literal<'a>(token: &Token<'a>) -> Result<&'a str> {
    let text = token.text;
    ['"', '\'']
        .iter()
        .find_map(|&quote| text.strip_prefix(quote)?.strip_suffix(quote))
        .ok_or_else(|| unexpected("quoted string", token))
}

fn integer_literal(token: &Token<'_>) -> Result<i64> {
    let (negative, body) = match token.text.strip_prefix('-') {
        Some(body) => (true, body),
        None => (false, token.text),
    };
    let (radix, digits) = match token.kind {
        TokenKind::Hex | TokenKind::Binary => (
            if token.kind == TokenKind::Hex { 16 } else { 2 },
            body.get(2..).unwrap_or_default(),
        ),
        _ => (10, body),
    };

    let out_of_range = || unexpected("integer within the signed 64-bit range", token);
    let magnitude = u64::from_str_radix(digits, radix).map_err(|_| out_of_range())?;

    if negative {
        if magnitude > i64::MAX as u64 + 1 {
            return Err(out_of_range());
        }
        Ok((magnitude as i64).wrapping_neg())
    } else {
        i64::try_from(magnitude).map_err(|_| out_of_range())
    }
}

fn decimal_literal(token: &Token<'_>) -> Result<f64> {
    token
        .text
        .parse::<f64>()
        .map_err(|_| unexpected("valid decimal number", token))
}
