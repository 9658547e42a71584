//! Error types for tokenizing, parsing, and reading values.
//!
//! Every failure carries a `Position` so callers can point the user at
//! the offending character.
use crate::value::ValueKind;
use std::fmt;
use thiserror::Error;

/// A location in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// The line number (1-indexed).
    pub line: usize,
    /// The column number (1-indexed), counted in characters.
    pub column: usize,
    /// The byte offset from the start of the input (0-indexed).
    pub offset: usize,
}

impl Position {
    /// The position of the first character of any input.
    pub const START: Position = Position {
        line: 1,
        column: 1,
        offset: 0,
    };
}

impl Default for Position {
    fn default() -> Self {
        Position::START
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Malformed token-level input: a bad string, number, literal, or a
/// character that cannot start any token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Error: {message} at {position}.")]
pub struct LexError {
    /// A description of what went wrong.
    pub message: String,
    /// Where the error was detected.
    pub position: Position,
}

/// Malformed structure built from otherwise valid tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Error: {message} at {position}.")]
pub struct ParseError {
    /// A description of what went wrong.
    pub message: String,
    /// Where the error was detected.
    pub position: Position,
}

/// The error returned by [`parse`](crate::parse).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl Error {
    pub fn message(&self) -> &str {
        match self {
            Error::Lex(e) => &e.message,
            Error::Parse(e) => &e.message,
        }
    }

    pub fn position(&self) -> Position {
        match self {
            Error::Lex(e) => e.position,
            Error::Parse(e) => e.position,
        }
    }

    pub fn is_lex(&self) -> bool {
        matches!(self, Error::Lex(_))
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, Error::Parse(_))
    }
}

/// Returned by the typed accessors on [`JsonValue`](crate::JsonValue)
/// when the value holds a different variant than the one requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("expected {expected}, found {found}")]
pub struct TypeError {
    pub expected: ValueKind,
    pub found: ValueKind,
}
