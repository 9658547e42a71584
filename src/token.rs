//! Defines the `Token` and `TokenKind` types.
//!
//! These are the intermediate representation between the `Tokenizer`
//! and the `Parser`.

use crate::error::Position;
use std::borrow::Cow;
use std::fmt;

/// The kind of a `Token`.
///
/// This represents the smallest meaningful units of JSON grammar.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    /// `{`
    ObjectStart,
    /// `}`
    ObjectEnd,
    /// `[`
    ArrayStart,
    /// `]`
    ArrayEnd,
    /// `,`
    Comma,
    /// `:`
    Colon,
    /// A string, e.g., `"hello"`
    String,
    /// A number, e.g., `123.4`
    Number,
    /// `true` or `false`
    Boolean,
    /// The `null` literal
    Null,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TokenKind::ObjectStart => "'{'",
            TokenKind::ObjectEnd => "'}'",
            TokenKind::ArrayStart => "'['",
            TokenKind::ArrayEnd => "']'",
            TokenKind::Comma => "','",
            TokenKind::Colon => "':'",
            TokenKind::String => "string",
            TokenKind::Number => "number",
            TokenKind::Boolean => "boolean",
            TokenKind::Null => "null",
        })
    }
}

/// A single token produced by the `Tokenizer`.
///
/// `text` is the decoded payload: escapes are already resolved for
/// strings, numbers keep their literal text, and everything else holds
/// its source lexeme. It borrows from the input whenever no decoding was
/// needed.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: Cow<'a, str>,
    /// Where the token starts.
    pub position: Position,
}

impl<'a> Token<'a> {
    pub(crate) fn new(kind: TokenKind, text: impl Into<Cow<'a, str>>, position: Position) -> Self {
        Token {
            kind,
            text: text.into(),
            position,
        }
    }

    /// Detaches the token from the input it was scanned from.
    pub fn into_owned(self) -> Token<'static> {
        Token {
            kind: self.kind,
            text: Cow::Owned(self.text.into_owned()),
            position: self.position,
        }
    }
}
