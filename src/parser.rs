//! Contains the recursive-descent `Parser`.
//!
//! The parser owns the complete token sequence of one input and builds a
//! `JsonValue` from it with a single token of lookahead. Nesting depth is
//! counted explicitly so deep inputs fail with an error instead of
//! overflowing the stack.
//!
//! ```text
//! value  = object | array | STRING | NUMBER | BOOLEAN | NULL
//! object = '{' '}' | '{' STRING ':' value (',' STRING ':' value)* '}'
//! array  = '[' ']' | '[' value (',' value)* ']'
//! ```

use crate::error::{ParseError, Position};
use crate::token::{Token, TokenKind};
use crate::value::{JsonNumber, JsonValue, Map};
use indexmap::map::Entry;
use std::iter::Peekable;
use std::vec;
use tracing::trace;

pub(crate) struct Parser<'a> {
    tokens: Peekable<vec::IntoIter<Token<'a>>>,
    /// Where the input ends, for errors raised at end of input.
    end: Position,
    /// The maximum allowed nesting depth.
    max_depth: usize,
    /// How many objects/arrays are currently open.
    depth: usize,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(tokens: Vec<Token<'a>>, end: Position, max_depth: usize) -> Self {
        Parser {
            tokens: tokens.into_iter().peekable(),
            end,
            max_depth,
            depth: 0,
        }
    }

    /// Parses exactly one JSON value spanning the whole token sequence.
    pub(crate) fn parse_document(mut self) -> Result<JsonValue, ParseError> {
        if self.tokens.peek().is_none() {
            return Err(ParseError {
                message: "Empty input".to_string(),
                position: Position::START,
            });
        }

        let root = self.parse_value()?;

        match self.tokens.next() {
            None => Ok(root),
            Some(token) => Err(ParseError {
                message: "Trailing content after JSON value".to_string(),
                position: token.position,
            }),
        }
    }

    /// Builds an "Expected X, found Y" error at `found`, or at the end of
    /// input when there is no token.
    fn unexpected(&self, expected: &str, found: Option<&Token<'a>>) -> ParseError {
        match found {
            Some(token) => ParseError {
                message: format!("{}, found {}", expected, token.kind),
                position: token.position,
            },
            None => ParseError {
                message: format!("{}, found end of input", expected),
                position: self.end,
            },
        }
    }

    fn enter(&mut self, position: Position) -> Result<(), ParseError> {
        if self.depth >= self.max_depth {
            return Err(ParseError {
                message: "Maximum nesting depth exceeded".to_string(),
                position,
            });
        }
        self.depth += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    /// Consumes the next token if it has the given kind.
    fn eat(&mut self, kind: TokenKind) -> bool {
        self.tokens.next_if(|t| t.kind == kind).is_some()
    }

    fn parse_value(&mut self) -> Result<JsonValue, ParseError> {
        let token = match self.tokens.next() {
            Some(token) => token,
            None => return Err(self.unexpected("Expected a value", None)),
        };

        match token.kind {
            TokenKind::ObjectStart => self.parse_object(token.position),
            TokenKind::ArrayStart => self.parse_array(token.position),
            TokenKind::String => Ok(JsonValue::String(token.text.into_owned())),
            TokenKind::Number => match JsonNumber::from_literal(&token.text) {
                Some(n) => Ok(JsonValue::Number(n)),
                None => Err(ParseError {
                    message: format!("Number out of range: {}", token.text),
                    position: token.position,
                }),
            },
            TokenKind::Boolean => Ok(JsonValue::Boolean(token.text == "true")),
            TokenKind::Null => Ok(JsonValue::Null),
            TokenKind::ObjectEnd | TokenKind::ArrayEnd | TokenKind::Comma | TokenKind::Colon => {
                Err(self.unexpected("Expected a value", Some(&token)))
            }
        }
    }

    /// Parses the rest of an object after its `{`.
    fn parse_object(&mut self, start: Position) -> Result<JsonValue, ParseError> {
        self.enter(start)?;
        let mut map = Map::new();

        if self.eat(TokenKind::ObjectEnd) {
            self.leave();
            return Ok(JsonValue::Object(map));
        }

        loop {
            let key = match self.tokens.next() {
                Some(token) if token.kind == TokenKind::String => token.text.into_owned(),
                other => return Err(self.unexpected("Expected a string key", other.as_ref())),
            };

            let colon = self.tokens.next();
            if colon.as_ref().map(|t| t.kind) != Some(TokenKind::Colon) {
                return Err(self.unexpected("Expected ':'", colon.as_ref()));
            }

            let value = self.parse_value()?;

            // Last write wins; the key keeps its original slot.
            match map.entry(key) {
                Entry::Occupied(mut entry) => {
                    trace!(key = %entry.key(), "duplicate object key, keeping the later value");
                    entry.insert(value);
                }
                Entry::Vacant(entry) => {
                    entry.insert(value);
                }
            }

            match self.tokens.next() {
                Some(token) if token.kind == TokenKind::Comma => continue,
                Some(token) if token.kind == TokenKind::ObjectEnd => break,
                other => return Err(self.unexpected("Expected ',' or '}'", other.as_ref())),
            }
        }

        self.leave();
        Ok(JsonValue::Object(map))
    }

    /// Parses the rest of an array after its `[`.
    fn parse_array(&mut self, start: Position) -> Result<JsonValue, ParseError> {
        self.enter(start)?;
        let mut items = Vec::new();

        if self.eat(TokenKind::ArrayEnd) {
            self.leave();
            return Ok(JsonValue::Array(items));
        }

        loop {
            items.push(self.parse_value()?);

            match self.tokens.next() {
                Some(token) if token.kind == TokenKind::Comma => continue,
                Some(token) if token.kind == TokenKind::ArrayEnd => break,
                other => return Err(self.unexpected("Expected ',' or ']'", other.as_ref())),
            }
        }

        self.leave();
        Ok(JsonValue::Array(items))
    }
}
