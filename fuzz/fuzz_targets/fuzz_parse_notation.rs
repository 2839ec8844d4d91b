//! Fuzz target for the notation parser entry point
//!
//! Feeds arbitrary byte strings to the parser. Parsing is total, so any
//! panic is a bug.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Don't fuzz extremely long inputs - diminishing returns
        if input.len() > 1000 {
            return;
        }

        let notation = ferro_protchange::parse_notation(input);
        assert_eq!(notation.raw(), input);
        assert!(notation.positions().len() <= notation.initial_residues().len());
    }
});
