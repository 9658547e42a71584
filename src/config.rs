//! Limits applied to a single parse call.

/// The default maximum nesting depth (e.g., `[[[]]]`) to prevent stack overflows.
pub const DEFAULT_MAX_DEPTH: usize = 256;
/// The default maximum size of an input JSON (10MB).
pub const MAX_JSON_SIZE_BYTES: usize = 10 * 1024 * 1024;

/// Options for [`parse_with`](crate::parse_with).
///
/// ```
/// use quill_json::{parse_with, ParserOptions};
///
/// let options = ParserOptions::default().with_max_depth(2);
/// assert!(parse_with("[[1]]", &options).is_ok());
/// assert!(parse_with("[[[1]]]", &options).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// How many objects/arrays may be open at once.
    pub max_depth: usize,
    /// Inputs longer than this many bytes are rejected before tokenizing.
    pub max_input_bytes: usize,
}

impl ParserOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_input_bytes(mut self, max_input_bytes: usize) -> Self {
        self.max_input_bytes = max_input_bytes;
        self
    }
}

impl Default for ParserOptions {
    fn default() -> Self {
        ParserOptions {
            max_depth: DEFAULT_MAX_DEPTH,
            max_input_bytes: MAX_JSON_SIZE_BYTES,
        }
    }
}
