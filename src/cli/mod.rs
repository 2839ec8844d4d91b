//! CLI utilities for ferro-protchange
//!
//! This module provides testable functions used by the CLI binary.
//! By extracting pure functions and I/O-abstracted functions to the library,
//! we enable unit testing without requiring end-to-end CLI tests.

pub mod format;

use std::num::NonZeroU32;

use crate::error::ProtChangeError;

pub use format::{write_record, write_tsv_header, OutputFormat};

/// UTF-8 BOM (Byte Order Mark) constant
const UTF8_BOM: &str = "\u{feff}";

/// Strip UTF-8 BOM from the beginning of a string if present.
///
/// This is common when mutation tables are exported from spreadsheets.
///
/// # Examples
///
/// ```
/// use ferro_protchange::cli::strip_bom;
///
/// assert_eq!(strip_bom("\u{feff}p.A267C"), "p.A267C");
/// assert_eq!(strip_bom("p.A267C"), "p.A267C");
/// ```
pub fn strip_bom(s: &str) -> &str {
    s.strip_prefix(UTF8_BOM).unwrap_or(s)
}

/// Strip inline comments from an input line.
///
/// Comments start with `#` and extend to the end of the line.
/// Leading/trailing whitespace is also trimmed.
///
/// # Examples
///
/// ```
/// use ferro_protchange::cli::strip_inline_comment;
///
/// assert_eq!(strip_inline_comment("p.G12del  # KRAS"), "p.G12del");
/// assert_eq!(strip_inline_comment("# full line comment"), "");
/// ```
pub fn strip_inline_comment(s: &str) -> &str {
    match s.find('#') {
        Some(pos) => s[..pos].trim(),
        None => s.trim(),
    }
}

/// Process an input line: trim whitespace, strip BOM (for first line), and strip inline comments.
///
/// Returns None if the line is empty or a comment-only line.
pub fn process_input_line(line: &str, is_first_line: bool) -> Option<&str> {
    let line = line.trim();
    let line = if is_first_line { strip_bom(line) } else { line };
    let line = strip_inline_comment(line);

    if line.is_empty() {
        None
    } else {
        Some(line)
    }
}

/// Split a processed input line into the notation and its occurrence weight.
///
/// Lines are `notation` or `notation<TAB>weight`. A missing weight is one.
///
/// # Examples
///
/// ```
/// use ferro_protchange::cli::split_weighted_line;
///
/// let (notation, weight) = split_weighted_line("p.V600E\t12", 1).unwrap();
/// assert_eq!(notation, "p.V600E");
/// assert_eq!(weight.get(), 12);
///
/// let (_, weight) = split_weighted_line("p.V600E", 2).unwrap();
/// assert_eq!(weight.get(), 1);
///
/// assert!(split_weighted_line("p.V600E\t0", 3).is_err());
/// ```
pub fn split_weighted_line(
    line: &str,
    line_number: usize,
) -> Result<(&str, NonZeroU32), ProtChangeError> {
    match line.split_once('\t') {
        None => Ok((line, NonZeroU32::MIN)),
        Some((notation, weight)) => {
            let weight = weight.trim();
            let parsed = weight
                .parse::<NonZeroU32>()
                .map_err(|_| ProtChangeError::InvalidWeight {
                    line: line_number,
                    value: weight.to_string(),
                })?;
            Ok((notation.trim_end(), parsed))
        }
    }
}
