//! # quill-json
//!
//! `quill-json` is a small, safe JSON parser and encoder built from
//! scratch: a byte-based tokenizer, a recursive-descent parser that builds
//! an owned `JsonValue` tree, and a canonical compact encoder.
//!
//! ## Key Features
//!
//! * **Strict RFC 8259 grammar:** malformed numbers, bad escapes,
//!   misspelled literals and stray characters are errors, never skipped.
//! * **Precise errors:** every `LexError` and `ParseError` carries the
//!   line, column and byte offset where it was detected.
//! * **Bounded recursion:** nesting depth is checked against
//!   `ParserOptions::max_depth` instead of relying on the stack.
//! * **Exact integers:** integer literals stay `i64`/`u64` when they fit.
//! * **Ordered objects:** keys keep their insertion order, and a repeated
//!   key overwrites the earlier value (last write wins).
//!
//! ## Quick Start
//!
//! ```
//! use quill_json::{encode, parse};
//!
//! let task = parse(r#"{ "id": 1815, "description": "Babbage", "done": false }"#).unwrap();
//!
//! let id = task.field("id").unwrap().unwrap().as_i64().unwrap();
//! assert_eq!(id, Some(1815));
//!
//! assert_eq!(encode(&task), r#"{"id":1815,"description":"Babbage","done":false}"#);
//! ```

/// Limits applied to one parse call.
pub mod config;
/// Contains the error types for the library.
pub mod error;
/// Contains the canonical encoder.
pub mod encoder;
/// Contains the `Token` and `TokenKind` types.
pub mod token;
/// Contains the `JsonValue` and `JsonNumber` types.
pub mod value;

/// The recursive-descent parser. Private to the crate.
mod parser;
/// The byte-based tokenizer.
mod tokenizer;

pub use config::{ParserOptions, DEFAULT_MAX_DEPTH, MAX_JSON_SIZE_BYTES};
pub use encoder::{encode, encode_to};
pub use error::{Error, LexError, ParseError, Position, TypeError};
pub use token::{Token, TokenKind};
pub use tokenizer::{tokenize, Tokenizer};
pub use value::{JsonNumber, JsonValue, Map, ValueKind};

use parser::Parser;
use tracing::debug;

/// Parses a complete JSON document into a `JsonValue` using the default
/// [`ParserOptions`].
///
/// # Errors
/// Returns `Error::Lex` for malformed tokens and `Error::Parse` for
/// malformed structure, empty input, trailing content, or nesting deeper
/// than `DEFAULT_MAX_DEPTH`.
///
/// # Examples
/// ```
/// use quill_json::{parse, JsonValue};
///
/// let value = parse(r#"[1, "hello", null]"#).unwrap();
/// assert_eq!(
///     value,
///     JsonValue::array(vec![1i64.into(), "hello".into(), JsonValue::Null])
/// );
///
/// let err = parse("[1, 2,]").unwrap_err();
/// assert_eq!(err.to_string(), "Error: Expected a value, found ']' at line 1, column 7.");
/// ```
pub fn parse(input: &str) -> Result<JsonValue, Error> {
    parse_with(input, &ParserOptions::default())
}

/// Parses a complete JSON document with explicit limits.
///
/// # Errors
/// As [`parse`], plus a `ParseError` if `input` is longer than
/// `options.max_input_bytes`.
pub fn parse_with(input: &str, options: &ParserOptions) -> Result<JsonValue, Error> {
    if input.len() > options.max_input_bytes {
        return Err(ParseError {
            message: "Input exceeds maximum size limit".to_string(),
            position: Position::START,
        }
        .into());
    }
    debug!(bytes = input.len(), max_depth = options.max_depth, "parsing JSON");

    let mut tokenizer = Tokenizer::new(input);
    let tokens = match tokenizer.by_ref().collect::<Result<Vec<_>, _>>() {
        Ok(tokens) => tokens,
        Err(e) => {
            debug!(error = %e, "tokenizing failed");
            return Err(e.into());
        }
    };
    let token_count = tokens.len();

    match Parser::new(tokens, tokenizer.current_position(), options.max_depth).parse_document() {
        Ok(value) => {
            debug!(tokens = token_count, "parsed JSON");
            Ok(value)
        }
        Err(e) => {
            debug!(error = %e, "parsing failed");
            Err(e.into())
        }
    }
}
