//! The byte-based tokenizer (lexer).
//!
//! It walks the raw input as `&[u8]`, classifies bytes through a lookup
//! table, and uses `memchr` to jump over string contents. Token payloads
//! borrow from the input wherever nothing had to be decoded.

use crate::error::{LexError, Position};
use crate::token::{Token, TokenKind};
use memchr::memchr2;
use std::borrow::Cow;

// --- The Lookup Table (LUT) ---
// One entry per byte; classifying a byte is a single array lookup.
const W: u8 = 1; // Whitespace
const S: u8 = 2; // Structural
const L: u8 = 3; // Literal
const D: u8 = 4; // Digit or '-'
const Q: u8 = 5; // Quote

static BYTE_PROPERTIES: [u8; 256] = {
    let mut table = [0; 256];
    table[b' ' as usize] = W;
    table[b'\n' as usize] = W;
    table[b'\r' as usize] = W;
    table[b'\t' as usize] = W;

    table[b'{' as usize] = S;
    table[b'}' as usize] = S;
    table[b'[' as usize] = S;
    table[b']' as usize] = S;
    table[b':' as usize] = S;
    table[b',' as usize] = S;

    table[b't' as usize] = L;
    table[b'f' as usize] = L;
    table[b'n' as usize] = L;

    table[b'"' as usize] = Q;

    table[b'-' as usize] = D;
    let mut digit = b'0';
    while digit <= b'9' {
        table[digit as usize] = D;
        digit += 1;
    }

    // 0: every other byte is invalid at the start of a token
    table
};

/// Scans `input` into its full token sequence.
///
/// Stops at the first malformed token; nothing is skipped.
///
/// # Examples
/// ```
/// use quill_json::{tokenize, TokenKind};
///
/// let tokens = tokenize(r#"{"id": 7}"#).unwrap();
/// let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
/// assert_eq!(
///     kinds,
///     [TokenKind::ObjectStart, TokenKind::String, TokenKind::Colon, TokenKind::Number, TokenKind::ObjectEnd]
/// );
/// assert_eq!(tokens[3].text, "7");
/// ```
pub fn tokenize(input: &str) -> Result<Vec<Token<'_>>, LexError> {
    Tokenizer::new(input).collect()
}

/// The tokenizer state for a single pass over one input.
///
/// Yields `Result<Token, LexError>` and stops after the first error.
pub struct Tokenizer<'a> {
    input: &'a str,
    bytes: &'a [u8],
    /// Byte index of the next unread byte.
    cursor: usize,
    line: usize,
    column: usize,
    failed: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Tokenizer {
            input,
            bytes: input.as_bytes(),
            cursor: 0,
            line: 1,
            column: 1,
            failed: false,
        }
    }

    /// The position of the next unread character.
    pub fn current_position(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
            offset: self.cursor,
        }
    }

    fn error(&self, message: impl Into<String>) -> LexError {
        LexError {
            message: message.into(),
            position: self.current_position(),
        }
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.cursor).copied()
    }

    #[inline]
    fn skip_whitespace(&mut self) {
        while let Some(byte) = self.peek() {
            if BYTE_PROPERTIES[byte as usize] != W {
                break;
            }
            self.advance_byte();
        }
    }

    /// Advances the cursor by one byte, updating line/column, and returns
    /// the byte. The caller must know the cursor is not at the end.
    ///
    /// UTF-8 continuation bytes do not move the column, so columns count
    /// characters.
    #[inline]
    fn advance_byte(&mut self) -> u8 {
        let byte = self.bytes[self.cursor];
        self.cursor += 1;
        if byte == b'\n' {
            self.line += 1;
            self.column = 1;
        } else if byte & 0xC0 != 0x80 {
            self.column += 1;
        }
        byte
    }

    fn lex_literal(&mut self, expected: &'static str) -> Result<&'a str, LexError> {
        let end = self.cursor + expected.len();
        if self.bytes.get(self.cursor..end) == Some(expected.as_bytes()) {
            let input = self.input;
            let start = self.cursor;
            for _ in 0..expected.len() {
                self.advance_byte();
            }
            Ok(&input[start..end])
        } else {
            Err(self.error(format!("Invalid literal, expected '{}'", expected)))
        }
    }

    /// Consumes `len` bytes of string content that contain no quote or
    /// backslash, rejecting raw control characters.
    fn consume_string_run(&mut self, len: usize) -> Result<(), LexError> {
        let end = self.cursor + len;
        while self.cursor < end {
            if self.bytes[self.cursor] < 0x20 {
                return Err(self.error("Unescaped control character in string"));
            }
            self.advance_byte();
        }
        Ok(())
    }

    /// Scans a string starting at its opening quote and returns the
    /// decoded contents.
    fn lex_string(&mut self) -> Result<Cow<'a, str>, LexError> {
        let (input, bytes) = (self.input, self.bytes);
        self.advance_byte(); // opening '"'

        // Only allocated once the first escape shows up.
        let mut decoded: Option<String> = None;

        loop {
            let run_start = self.cursor;
            let stop = match memchr2(b'"', b'\\', &bytes[run_start..]) {
                Some(i) => i,
                None => {
                    self.consume_string_run(bytes.len() - run_start)?;
                    return Err(self.error("Unterminated string"));
                }
            };
            self.consume_string_run(stop)?;
            let run = &input[run_start..self.cursor];

            if self.advance_byte() == b'"' {
                return Ok(match decoded {
                    Some(mut s) => {
                        s.push_str(run);
                        Cow::Owned(s)
                    }
                    None => Cow::Borrowed(run),
                });
            }

            let s = decoded.get_or_insert_with(|| String::with_capacity(run.len() + 8));
            s.push_str(run);
            self.lex_escape(s)?;
        }
    }

    /// Decodes one escape sequence; the backslash is already consumed.
    fn lex_escape(&mut self, out: &mut String) -> Result<(), LexError> {
        let byte = match self.peek() {
            Some(b) => b,
            None => return Err(self.error("Unterminated escape sequence")),
        };
        let c = match byte {
            b'"' => '"',
            b'\\' => '\\',
            b'/' => '/',
            b'b' => '\u{0008}',
            b'f' => '\u{000C}',
            b'n' => '\n',
            b'r' => '\r',
            b't' => '\t',
            b'u' => {
                self.advance_byte();
                let c = self.lex_unicode_escape()?;
                out.push(c);
                return Ok(());
            }
            _ => return Err(self.error("Invalid escape sequence")),
        };
        self.advance_byte();
        out.push(c);
        Ok(())
    }

    /// Decodes the `XXXX` of a `\uXXXX` escape, joining a UTF-16
    /// surrogate pair written as two consecutive escapes.
    fn lex_unicode_escape(&mut self) -> Result<char, LexError> {
        let escape_start = self.current_position();
        let unpaired = || LexError {
            message: "Invalid Unicode escape: unpaired surrogate".to_string(),
            position: escape_start,
        };

        let unit = self.lex_hex4()?;
        let code = match unit {
            0xD800..=0xDBFF => {
                if self.bytes.get(self.cursor..self.cursor + 2) != Some(b"\\u".as_slice()) {
                    return Err(unpaired());
                }
                self.advance_byte();
                self.advance_byte();
                let low = self.lex_hex4()?;
                if !(0xDC00..=0xDFFF).contains(&low) {
                    return Err(unpaired());
                }
                0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00)
            }
            0xDC00..=0xDFFF => return Err(unpaired()),
            _ => unit,
        };
        char::from_u32(code).ok_or_else(|| self.error("Invalid Unicode code point"))
    }

    fn lex_hex4(&mut self) -> Result<u32, LexError> {
        let mut code = 0;
        for _ in 0..4 {
            let digit = match self.peek() {
                Some(b) => (b as char)
                    .to_digit(16)
                    .ok_or_else(|| self.error("Non-hex character in Unicode escape"))?,
                None => return Err(self.error("Incomplete Unicode escape")),
            };
            self.advance_byte();
            code = code * 16 + digit;
        }
        Ok(code)
    }

    fn skip_digits(&mut self) {
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.advance_byte();
        }
    }

    /// Requires at least one digit at the cursor, then consumes the run.
    fn expect_digits(&mut self, message: &str) -> Result<(), LexError> {
        if !matches!(self.peek(), Some(b'0'..=b'9')) {
            return Err(self.error(message));
        }
        self.skip_digits();
        Ok(())
    }

    /// Scans a number literal against
    /// `-? (0 | [1-9][0-9]*) (\.[0-9]+)? ([eE][+-]?[0-9]+)?`
    /// and returns its text unconverted.
    fn lex_number(&mut self) -> Result<&'a str, LexError> {
        let input = self.input;
        let start = self.cursor;

        if self.peek() == Some(b'-') {
            self.advance_byte();
        }
        match self.peek() {
            Some(b'0') => {
                self.advance_byte();
                if matches!(self.peek(), Some(b'0'..=b'9')) {
                    return Err(self.error("Invalid number: leading zeros not allowed"));
                }
            }
            Some(b'1'..=b'9') => self.skip_digits(),
            _ => return Err(self.error("Invalid number: expected a digit")),
        }

        if self.peek() == Some(b'.') {
            self.advance_byte();
            self.expect_digits("Invalid number: expected a digit after the decimal point")?;
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            self.advance_byte();
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.advance_byte();
            }
            self.expect_digits("Invalid number: expected a digit in the exponent")?;
        }

        Ok(&input[start..self.cursor])
    }

    fn lex_token(&mut self, byte: u8) -> Result<Token<'a>, LexError> {
        let start = self.current_position();
        match BYTE_PROPERTIES[byte as usize] {
            S => {
                self.advance_byte();
                let kind = match byte {
                    b'{' => TokenKind::ObjectStart,
                    b'}' => TokenKind::ObjectEnd,
                    b'[' => TokenKind::ArrayStart,
                    b']' => TokenKind::ArrayEnd,
                    b':' => TokenKind::Colon,
                    _ => TokenKind::Comma,
                };
                let text = &self.input[start.offset..self.cursor];
                Ok(Token::new(kind, text, start))
            }
            L => {
                let (expected, kind) = match byte {
                    b't' => ("true", TokenKind::Boolean),
                    b'f' => ("false", TokenKind::Boolean),
                    _ => ("null", TokenKind::Null),
                };
                let text = self.lex_literal(expected)?;
                Ok(Token::new(kind, text, start))
            }
            D => {
                let text = self.lex_number()?;
                Ok(Token::new(TokenKind::Number, text, start))
            }
            Q => {
                let text = self.lex_string()?;
                Ok(Token::new(TokenKind::String, text, start))
            }
            _ => {
                let c = self.input[self.cursor..].chars().next().unwrap_or('\u{FFFD}');
                Err(self.error(format!("Unexpected character '{}'", c.escape_debug())))
            }
        }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<Token<'a>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        self.skip_whitespace();
        let byte = self.peek()?;

        let result = self.lex_token(byte);
        self.failed = result.is_err();
        Some(result)
    }
}

impl std::iter::FusedIterator for Tokenizer<'_> {}
