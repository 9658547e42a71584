#![no_main]
use libfuzzer_sys::fuzz_target;

use quill_json::{encode, parse};

fuzz_target!(|data: &[u8]| {
    // The parser takes `&str`, so only valid UTF-8 is interesting.
    if let Ok(s) = std::str::from_utf8(data) {
        // Any input may fail, but none may panic. Whatever parses must
        // survive an encode/parse round trip unchanged.
        if let Ok(value) = parse(s) {
            let encoded = encode(&value);
            let reparsed = parse(&encoded).expect("encoder output must parse");
            assert_eq!(reparsed, value);
        }
    }
});
