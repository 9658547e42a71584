//! Serializes a `JsonValue` back into canonical, compact JSON text.
//!
//! The output is always valid JSON: objects keep insertion order, strings
//! get only the escapes JSON requires, and floats always carry a `.` or
//! an exponent so they parse back as floats.
use crate::value::{JsonNumber, JsonValue, Map};
use std::fmt::{self, Write};

/// Serializes `value` into a compact JSON string.
///
/// Encoding recurses once per level of nesting. Trees from `parse` are at
/// most `ParserOptions::max_depth` deep, but a tree built in code has no
/// such bound, and one nested tens of thousands of levels deep can
/// overflow the stack.
///
/// ```
/// use quill_json::{encode, parse};
///
/// let value = parse(r#"{ "b": [1, 2.5, "x\ty"], "a": null }"#).unwrap();
/// assert_eq!(encode(&value), r#"{"b":[1,2.5,"x\ty"],"a":null}"#);
/// ```
pub fn encode(value: &JsonValue) -> String {
    let mut output = String::new();
    // Writing to a String never fails, and nothing below returns an error
    // of its own.
    let _ = encode_to(value, &mut output);
    output
}

/// Writes the compact encoding of `value` to any `fmt::Write` sink.
pub fn encode_to<W: Write>(value: &JsonValue, w: &mut W) -> fmt::Result {
    write_value(value, w)
}

fn write_value<W: Write>(value: &JsonValue, w: &mut W) -> fmt::Result {
    match value {
        JsonValue::Null => w.write_str("null"),
        JsonValue::Boolean(b) => w.write_str(if *b { "true" } else { "false" }),
        JsonValue::Number(n) => write_number(*n, w),
        JsonValue::String(s) => write_string(s, w),
        JsonValue::Array(a) => write_array(a, w),
        JsonValue::Object(o) => write_object(o, w),
    }
}

/// Writes a number in its canonical decimal form.
///
/// Non-finite floats have no JSON form and are written as `null`.
pub(crate) fn write_number<W: Write>(n: JsonNumber, w: &mut W) -> fmt::Result {
    match n {
        JsonNumber::Int(i) => write!(w, "{}", i),
        JsonNumber::UInt(u) => write!(w, "{}", u),
        JsonNumber::Float(f) if !f.is_finite() => w.write_str("null"),
        JsonNumber::Float(f) => {
            // `{:?}` is the shortest text that reads back as the same f64,
            // and switches to exponent form for very large or small values.
            let text = format!("{:?}", f);
            w.write_str(&text)?;
            if !text.contains(['.', 'e', 'E']) {
                w.write_str(".0")?;
            }
            Ok(())
        }
    }
}

fn write_array<W: Write>(arr: &[JsonValue], w: &mut W) -> fmt::Result {
    w.write_char('[')?;
    for (i, val) in arr.iter().enumerate() {
        if i > 0 {
            w.write_char(',')?;
        }
        write_value(val, w)?;
    }
    w.write_char(']')
}

fn write_object<W: Write>(obj: &Map, w: &mut W) -> fmt::Result {
    w.write_char('{')?;
    for (i, (key, val)) in obj.iter().enumerate() {
        if i > 0 {
            w.write_char(',')?;
        }
        write_string(key, w)?;
        w.write_char(':')?;
        write_value(val, w)?;
    }
    w.write_char('}')
}

/// Writes an escaped JSON string.
fn write_string<W: Write>(s: &str, w: &mut W) -> fmt::Result {
    w.write_char('"')?;
    // Copy unescaped runs in one go.
    let mut run_start = 0;
    for (i, c) in s.char_indices() {
        let escape = match c {
            '"' => "\\\"",
            '\\' => "\\\\",
            '\u{0008}' => "\\b",
            '\u{000C}' => "\\f",
            '\n' => "\\n",
            '\r' => "\\r",
            '\t' => "\\t",
            '\u{0000}'..='\u{001F}' => "",
            _ => continue,
        };
        w.write_str(&s[run_start..i])?;
        if escape.is_empty() {
            write!(w, "\\u{:04x}", c as u32)?;
        } else {
            w.write_str(escape)?;
        }
        run_start = i + c.len_utf8();
    }
    w.write_str(&s[run_start..])?;
    w.write_char('"')
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value as SerdeValue;

    fn obj(pairs: Vec<(&str, JsonValue)>) -> JsonValue {
        pairs.into_iter().collect()
    }

    #[test]
    fn test_encode_basic() {
        let value = obj(vec![
            ("key", JsonValue::from("value")),
            (
                "items",
                JsonValue::array(vec![JsonValue::from(1i64), JsonValue::Null]),
            ),
        ]);
        let output = encode(&value);
        assert_eq!(output, r#"{"key":"value","items":[1,null]}"#);

        // The output must be valid JSON for an independent parser too.
        let parsed: SerdeValue =
            serde_json::from_str(&output).expect("encoder output should be valid JSON");
        assert_eq!(parsed, serde_json::json!({"key": "value", "items": [1, null]}));

        let s = JsonValue::from("a \"quoted\" \\ string");
        assert_eq!(encode(&s), r#""a \"quoted\" \\ string""#);
    }

    #[test]
    fn test_encode_all_types() {
        assert_eq!(encode(&JsonValue::Null), "null");
        assert_eq!(encode(&JsonValue::Boolean(true)), "true");
        assert_eq!(encode(&JsonValue::Boolean(false)), "false");
        assert_eq!(encode(&JsonValue::from(123.45)), "123.45");
        assert_eq!(encode(&JsonValue::from(-0.5)), "-0.5");
        assert_eq!(encode(&JsonValue::from(-17i64)), "-17");
        assert_eq!(encode(&JsonValue::from(u64::MAX)), "18446744073709551615");

        assert_eq!(encode(&JsonValue::array(vec![])), "[]");
        assert_eq!(encode(&JsonValue::object(Map::new())), "{}");

        let arr = JsonValue::array(vec![
            JsonValue::from(1i64),
            JsonValue::from("test"),
            JsonValue::Boolean(true),
            JsonValue::Null,
            JsonValue::object(Map::new()),
        ]);
        assert_eq!(encode(&arr), r#"[1,"test",true,null,{}]"#);
    }

    #[test]
    fn test_encode_floats_stay_floats() {
        assert_eq!(encode(&JsonValue::from(1000.0)), "1000.0");
        assert_eq!(encode(&JsonValue::from(-5e9)), "-5000000000.0");
        assert_eq!(encode(&JsonValue::from(0.0)), "0.0");
        assert_eq!(encode(&JsonValue::from(1e300)), "1e300");
        assert_eq!(encode(&JsonValue::from(1.5e-10)), "1.5e-10");
    }

    #[test]
    fn test_encode_non_finite_as_null() {
        assert_eq!(encode(&JsonValue::from(f64::NAN)), "null");
        assert_eq!(
            encode(&JsonValue::array(vec![JsonValue::from(f64::INFINITY)])),
            "[null]"
        );
    }

    #[test]
    fn test_encode_string_escapes() {
        let s = JsonValue::from("\" \\ / \u{0008} \u{000C} \n \r \t");
        assert_eq!(encode(&s), r#""\" \\ / \b \f \n \r \t""#);

        let s_control = JsonValue::from("hello\u{0001}world\u{001f}");
        assert_eq!(encode(&s_control), r#""hello\u0001world\u001f""#);

        // Non-ASCII is written as-is.
        let s_unicode = JsonValue::from("日本 😀");
        assert_eq!(encode(&s_unicode), "\"日本 😀\"");
    }

    #[test]
    fn test_encode_keeps_insertion_order() {
        let value = obj(vec![
            ("zeta", JsonValue::from(1i64)),
            ("alpha", JsonValue::from(2i64)),
            ("mid", JsonValue::from(3i64)),
        ]);
        assert_eq!(encode(&value), r#"{"zeta":1,"alpha":2,"mid":3}"#);
    }

    #[test]
    fn test_display_matches_encode() {
        let value = obj(vec![("a", JsonValue::array(vec![JsonValue::from(2.5)]))]);
        assert_eq!(value.to_string(), encode(&value));
        assert_eq!(JsonNumber::Float(3.0).to_string(), "3.0");
    }

    #[test]
    fn test_encode_deepest_parsable_tree() {
        let depth = crate::DEFAULT_MAX_DEPTH;
        let input = "[".repeat(depth) + &"]".repeat(depth);
        let value = crate::parse(&input).unwrap();
        assert_eq!(encode(&value), input);
    }
}
