//! Contains the `JsonValue` enum, a native Rust representation of any
//! valid JSON value, and `JsonNumber`, which keeps integers exact.
use crate::error::{Error, TypeError};
use indexmap::IndexMap;
use std::fmt;

/// The map type backing `JsonValue::Object`. Iterates in the order keys
/// were first inserted.
pub type Map = IndexMap<String, JsonValue>;

/// A JSON number.
///
/// Integer literals stay exact as long as they fit `i64` or `u64`;
/// anything larger, and any literal with a fraction or exponent, is an
/// `f64`.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum JsonNumber {
    /// A signed integer that fits `i64`.
    Int(i64),
    /// A positive integer above `i64::MAX` that fits `u64`.
    UInt(u64),
    /// A floating-point number.
    Float(f64),
}

impl JsonNumber {
    /// Converts the text of a number literal.
    ///
    /// `literal` is expected to already match the JSON number grammar, as
    /// every `Number` token from the tokenizer does. This function does not
    /// check the grammar itself: Rust's own number syntax is a superset, so
    /// text such as `+5` or `5.` still converts. Use [`parse`](crate::parse)
    /// to validate untrusted text.
    ///
    /// Returns `None` if the text does not convert at all or if a float
    /// literal overflows to infinity (e.g. `1e400`).
    ///
    /// ```
    /// use quill_json::JsonNumber;
    ///
    /// assert_eq!(JsonNumber::from_literal("30"), Some(JsonNumber::Int(30)));
    /// assert_eq!(JsonNumber::from_literal("-0.5e+10"), Some(JsonNumber::Float(-5e9)));
    /// assert_eq!(JsonNumber::from_literal("1e400"), None);
    /// ```
    pub fn from_literal(literal: &str) -> Option<JsonNumber> {
        let is_float = literal.bytes().any(|b| matches!(b, b'.' | b'e' | b'E'));
        if !is_float {
            if let Ok(n) = literal.parse::<i64>() {
                return Some(JsonNumber::Int(n));
            }
            if let Ok(n) = literal.parse::<u64>() {
                return Some(JsonNumber::UInt(n));
            }
        }
        // Out-of-range integers fall through to a (lossy) f64.
        match literal.parse::<f64>() {
            Ok(f) if f.is_finite() => Some(JsonNumber::Float(f)),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            JsonNumber::Int(n) => Some(n),
            JsonNumber::UInt(n) => i64::try_from(n).ok(),
            JsonNumber::Float(_) => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            JsonNumber::Int(n) => u64::try_from(n).ok(),
            JsonNumber::UInt(n) => Some(n),
            JsonNumber::Float(_) => None,
        }
    }

    /// Every number has an `f64` approximation.
    pub fn as_f64(&self) -> f64 {
        match *self {
            JsonNumber::Int(n) => n as f64,
            JsonNumber::UInt(n) => n as f64,
            JsonNumber::Float(f) => f,
        }
    }

    pub fn is_integer(&self) -> bool {
        !matches!(self, JsonNumber::Float(_))
    }
}

impl From<i64> for JsonNumber {
    fn from(n: i64) -> Self {
        JsonNumber::Int(n)
    }
}

impl From<u64> for JsonNumber {
    fn from(n: u64) -> Self {
        match i64::try_from(n) {
            Ok(n) => JsonNumber::Int(n),
            Err(_) => JsonNumber::UInt(n),
        }
    }
}

impl From<f64> for JsonNumber {
    fn from(f: f64) -> Self {
        JsonNumber::Float(f)
    }
}

impl fmt::Display for JsonNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::encoder::write_number(*self, f)
    }
}

/// The variant tag of a `JsonValue`, used in `TypeError`s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueKind::Null => "null",
            ValueKind::Boolean => "boolean",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        })
    }
}

/// A native Rust representation of any valid JSON value.
///
/// Each node exclusively owns its children.
#[derive(Debug, PartialEq, Clone)]
pub enum JsonValue {
    /// Represents a JSON `null`.
    Null,
    /// Represents a JSON `true` or `false`.
    Boolean(bool),
    /// Represents a JSON number.
    Number(JsonNumber),
    /// Represents a JSON string.
    String(String),
    /// Represents a JSON array (list).
    Array(Vec<JsonValue>),
    /// Represents a JSON object. Keys are unique.
    Object(Map),
}

// --- Constructors ---
impl JsonValue {
    /// Parses a JSON string into a `JsonValue` using the default options.
    ///
    /// Shorthand for [`crate::parse`].
    pub fn parse(input: &str) -> Result<JsonValue, Error> {
        crate::parse(input)
    }

    pub fn object(map: Map) -> JsonValue {
        JsonValue::Object(map)
    }

    pub fn array(items: Vec<JsonValue>) -> JsonValue {
        JsonValue::Array(items)
    }

    pub fn string(s: impl Into<String>) -> JsonValue {
        JsonValue::String(s.into())
    }

    pub fn number(n: impl Into<JsonNumber>) -> JsonValue {
        JsonValue::Number(n.into())
    }

    pub fn boolean(b: bool) -> JsonValue {
        JsonValue::Boolean(b)
    }

    pub fn null() -> JsonValue {
        JsonValue::Null
    }
}

// --- Accessors ---
impl JsonValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            JsonValue::Null => ValueKind::Null,
            JsonValue::Boolean(_) => ValueKind::Boolean,
            JsonValue::Number(_) => ValueKind::Number,
            JsonValue::String(_) => ValueKind::String,
            JsonValue::Array(_) => ValueKind::Array,
            JsonValue::Object(_) => ValueKind::Object,
        }
    }

    fn type_error(&self, expected: ValueKind) -> TypeError {
        TypeError {
            expected,
            found: self.kind(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    pub fn as_object(&self) -> Result<&Map, TypeError> {
        match self {
            JsonValue::Object(map) => Ok(map),
            other => Err(other.type_error(ValueKind::Object)),
        }
    }

    pub fn as_object_mut(&mut self) -> Result<&mut Map, TypeError> {
        match self {
            JsonValue::Object(map) => Ok(map),
            other => Err(other.type_error(ValueKind::Object)),
        }
    }

    pub fn as_array(&self) -> Result<&[JsonValue], TypeError> {
        match self {
            JsonValue::Array(items) => Ok(items.as_slice()),
            other => Err(other.type_error(ValueKind::Array)),
        }
    }

    pub fn as_array_mut(&mut self) -> Result<&mut Vec<JsonValue>, TypeError> {
        match self {
            JsonValue::Array(items) => Ok(items),
            other => Err(other.type_error(ValueKind::Array)),
        }
    }

    pub fn as_str(&self) -> Result<&str, TypeError> {
        match self {
            JsonValue::String(s) => Ok(s.as_str()),
            other => Err(other.type_error(ValueKind::String)),
        }
    }

    pub fn as_number(&self) -> Result<JsonNumber, TypeError> {
        match self {
            JsonValue::Number(n) => Ok(*n),
            other => Err(other.type_error(ValueKind::Number)),
        }
    }

    pub fn as_bool(&self) -> Result<bool, TypeError> {
        match self {
            JsonValue::Boolean(b) => Ok(*b),
            other => Err(other.type_error(ValueKind::Boolean)),
        }
    }

    /// The value as an `i64`, or `Ok(None)` if it is a number that has no
    /// exact `i64` form (a float, or an integer above `i64::MAX`).
    pub fn as_i64(&self) -> Result<Option<i64>, TypeError> {
        self.as_number().map(|n| n.as_i64())
    }

    pub fn as_f64(&self) -> Result<f64, TypeError> {
        self.as_number().map(|n| n.as_f64())
    }

    /// Looks up `key` in an object.
    ///
    /// `Err` means this value is not an object at all; `Ok(None)` means
    /// it is an object without that key.
    ///
    /// ```
    /// use quill_json::{parse, ValueKind};
    ///
    /// let task = parse(r#"{"id": 1, "status": "todo"}"#).unwrap();
    /// assert_eq!(task.field("status").unwrap().unwrap().as_str(), Ok("todo"));
    /// assert_eq!(task.field("updatedAt"), Ok(None));
    ///
    /// let err = parse("[]").unwrap().field("id").unwrap_err();
    /// assert_eq!(err.found, ValueKind::Array);
    /// ```
    pub fn field(&self, key: &str) -> Result<Option<&JsonValue>, TypeError> {
        self.as_object().map(|map| map.get(key))
    }

    /// Looks up element `index` in an array, with the same result shape
    /// as [`JsonValue::field`].
    pub fn get_index(&self, index: usize) -> Result<Option<&JsonValue>, TypeError> {
        self.as_array().map(|items| items.get(index))
    }
}

// --- Conversions ---
impl From<bool> for JsonValue {
    fn from(b: bool) -> Self {
        JsonValue::Boolean(b)
    }
}

impl From<i64> for JsonValue {
    fn from(n: i64) -> Self {
        JsonValue::Number(n.into())
    }
}

impl From<i32> for JsonValue {
    fn from(n: i32) -> Self {
        JsonValue::Number(JsonNumber::Int(n.into()))
    }
}

impl From<u64> for JsonValue {
    fn from(n: u64) -> Self {
        JsonValue::Number(n.into())
    }
}

impl From<f64> for JsonValue {
    fn from(f: f64) -> Self {
        JsonValue::Number(f.into())
    }
}

impl From<JsonNumber> for JsonValue {
    fn from(n: JsonNumber) -> Self {
        JsonValue::Number(n)
    }
}

impl From<&str> for JsonValue {
    fn from(s: &str) -> Self {
        JsonValue::String(s.to_string())
    }
}

impl From<String> for JsonValue {
    fn from(s: String) -> Self {
        JsonValue::String(s)
    }
}

impl From<Vec<JsonValue>> for JsonValue {
    fn from(items: Vec<JsonValue>) -> Self {
        JsonValue::Array(items)
    }
}

impl From<Map> for JsonValue {
    fn from(map: Map) -> Self {
        JsonValue::Object(map)
    }
}

impl<T: Into<JsonValue>> From<Option<T>> for JsonValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(JsonValue::Null, Into::into)
    }
}

impl FromIterator<JsonValue> for JsonValue {
    fn from_iter<I: IntoIterator<Item = JsonValue>>(iter: I) -> Self {
        JsonValue::Array(iter.into_iter().collect())
    }
}

/// Later pairs overwrite earlier ones with the same key.
impl<K: Into<String>> FromIterator<(K, JsonValue)> for JsonValue {
    fn from_iter<I: IntoIterator<Item = (K, JsonValue)>>(iter: I) -> Self {
        JsonValue::Object(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Writes the canonical compact encoding.
impl fmt::Display for JsonValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::encoder::encode_to(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_from_literal() {
        assert_eq!(JsonNumber::from_literal("0"), Some(JsonNumber::Int(0)));
        assert_eq!(JsonNumber::from_literal("-0"), Some(JsonNumber::Int(0)));
        assert_eq!(JsonNumber::from_literal("-42"), Some(JsonNumber::Int(-42)));
        assert_eq!(JsonNumber::from_literal("1.5"), Some(JsonNumber::Float(1.5)));
        assert_eq!(JsonNumber::from_literal("1E3"), Some(JsonNumber::Float(1000.0)));
        assert_eq!(
            JsonNumber::from_literal("-0.5e+10"),
            Some(JsonNumber::Float(-5e9))
        );
    }

    #[test]
    fn test_number_integer_range_fallbacks() {
        assert_eq!(
            JsonNumber::from_literal("9223372036854775807"),
            Some(JsonNumber::Int(i64::MAX))
        );
        assert_eq!(
            JsonNumber::from_literal("-9223372036854775808"),
            Some(JsonNumber::Int(i64::MIN))
        );
        assert_eq!(
            JsonNumber::from_literal("9223372036854775808"),
            Some(JsonNumber::UInt(9_223_372_036_854_775_808))
        );
        assert_eq!(
            JsonNumber::from_literal("18446744073709551615"),
            Some(JsonNumber::UInt(u64::MAX))
        );
        assert_eq!(
            JsonNumber::from_literal("18446744073709551616"),
            Some(JsonNumber::Float(18446744073709551616.0))
        );
        assert_eq!(
            JsonNumber::from_literal("-9223372036854775809"),
            Some(JsonNumber::Float(-9223372036854775809.0))
        );
    }

    #[test]
    fn test_number_overflow_is_rejected() {
        assert_eq!(JsonNumber::from_literal("1e400"), None);
        assert_eq!(JsonNumber::from_literal("-1e400"), None);
        // Underflow rounds to zero, which is still a finite number.
        assert_eq!(JsonNumber::from_literal("1e-400"), Some(JsonNumber::Float(0.0)));
    }

    #[test]
    fn test_number_grammar_is_checked_by_the_tokenizer() {
        // from_literal is lenient; only the tokenizer enforces the grammar.
        assert_eq!(JsonNumber::from_literal("+5"), Some(JsonNumber::Int(5)));
        assert_eq!(JsonNumber::from_literal("5."), Some(JsonNumber::Float(5.0)));
        assert_eq!(JsonNumber::from_literal("abc"), None);
        for text in ["+5", "5.", ".5"] {
            assert!(crate::parse(text).unwrap_err().is_lex(), "{:?}", text);
        }
    }

    #[test]
    fn test_number_conversions() {
        assert_eq!(JsonNumber::Int(-1).as_u64(), None);
        assert_eq!(JsonNumber::UInt(u64::MAX).as_i64(), None);
        assert_eq!(JsonNumber::UInt(5).as_i64(), Some(5));
        assert_eq!(JsonNumber::Float(2.0).as_i64(), None);
        assert_eq!(JsonNumber::Int(3).as_f64(), 3.0);
        assert!(JsonNumber::from(7u64).is_integer());
        assert_eq!(JsonNumber::from(7u64), JsonNumber::Int(7));
        assert_eq!(JsonNumber::from(u64::MAX), JsonNumber::UInt(u64::MAX));
    }

    #[test]
    fn test_accessors_report_wrong_type() {
        let value = JsonValue::string("hello");
        assert_eq!(value.as_str(), Ok("hello"));
        assert_eq!(
            value.as_bool(),
            Err(TypeError {
                expected: ValueKind::Boolean,
                found: ValueKind::String
            })
        );
        assert_eq!(value.as_number().unwrap_err().expected, ValueKind::Number);
        assert_eq!(value.as_array().unwrap_err().expected, ValueKind::Array);
        assert_eq!(value.as_object().unwrap_err().expected, ValueKind::Object);
        assert_eq!(JsonValue::Null.as_str().unwrap_err().found, ValueKind::Null);
    }

    #[test]
    fn test_field_distinguishes_absent_from_wrong_type() {
        let mut map = Map::new();
        map.insert("note".to_string(), JsonValue::Null);
        let obj = JsonValue::object(map);

        // Present, holding null
        assert_eq!(obj.field("note"), Ok(Some(&JsonValue::Null)));
        // Absent
        assert_eq!(obj.field("missing"), Ok(None));
        // Not an object
        let arr = JsonValue::array(vec![]);
        assert_eq!(
            arr.field("note"),
            Err(TypeError {
                expected: ValueKind::Object,
                found: ValueKind::Array
            })
        );
    }

    #[test]
    fn test_get_index() {
        let arr: JsonValue = vec![JsonValue::from(1i64), JsonValue::from("x")].into();
        assert_eq!(arr.get_index(1), Ok(Some(&JsonValue::from("x"))));
        assert_eq!(arr.get_index(2), Ok(None));
        assert!(JsonValue::from(true).get_index(0).is_err());
    }

    #[test]
    fn test_numeric_accessors() {
        let n = JsonValue::from(30i64);
        assert_eq!(n.as_i64(), Ok(Some(30)));
        assert_eq!(n.as_f64(), Ok(30.0));
        assert_eq!(JsonValue::from(0.5).as_i64(), Ok(None));
        assert!(JsonValue::from("30").as_i64().is_err());
    }

    #[test]
    fn test_from_iterator_last_write_wins() {
        let obj: JsonValue = vec![
            ("a", JsonValue::from(1i64)),
            ("b", JsonValue::from(2i64)),
            ("a", JsonValue::from(3i64)),
        ]
        .into_iter()
        .collect();
        let map = obj.as_object().unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["a"], JsonValue::from(3i64));
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(JsonValue::from(None::<i64>), JsonValue::Null);
        assert_eq!(JsonValue::from(Some("x")), JsonValue::from("x"));
    }

    #[test]
    fn test_kind_and_mutation() {
        let mut value = JsonValue::array(vec![]);
        assert_eq!(value.kind(), ValueKind::Array);
        value.as_array_mut().unwrap().push(JsonValue::null());
        assert_eq!(value.as_array().unwrap().len(), 1);
        assert!(value.as_array().unwrap()[0].is_null());
        assert!(value.as_object_mut().is_err());
    }
}
