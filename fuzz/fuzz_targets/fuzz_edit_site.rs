//! Fuzz target for edit-site marker matching
//!
//! Exercises the byte-offset marker checks with arbitrary UTF-8.

#![no_main]

use ferro_protchange::{NotationParser, ParseConfig};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if input.len() > 1000 {
            return;
        }

        let strict = NotationParser::with_config(ParseConfig::edit_site()).parse(input);
        if strict.category().is_indel() {
            assert!(ferro_protchange::parse_notation(input).category().is_indel());
        }
    }
});
