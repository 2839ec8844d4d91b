//! Category-specific field extraction
//!
//! Each category reads its structural fields from the normalized body. A
//! missense or frameshift branch that cannot read a position returns `None`,
//! which the parser turns into an `Invalid` record. Nonsense keeps its
//! category and leaves `positions` empty instead (`W*`, `?*`).

use memchr::memmem;
use nom::{
    bytes::complete::take_while,
    character::complete::{digit1, satisfy},
    combinator::all_consuming,
    IResult, Parser,
};
use tracing::trace;

use super::classify::Classification;
use crate::notation::category::MutationCategory;
use crate::notation::record::{EvidenceStatus, Extracted};

/// Insertion notation names the residues flanking the insertion site.
const INSERTION_FLANK_LIMIT: usize = 2;

/// Extract the fields for `category` from `body`.
///
/// Returns the final category (missense may be refined to synonymous) and the
/// fields, or `None` when the body cannot support the category.
pub(crate) fn extract(
    category: MutationCategory,
    body: &str,
    flags: &Classification,
    evidence: &EvidenceStatus,
) -> Option<(MutationCategory, Extracted)> {
    match category {
        MutationCategory::Missense => extract_missense(body),
        MutationCategory::Insertion if evidence.missing_info => {
            Some((category, Extracted::default()))
        }
        MutationCategory::Insertion => Some((category, extract_insertion(body))),
        MutationCategory::Deletion if evidence.missing_info => {
            Some((category, Extracted::default()))
        }
        MutationCategory::Deletion => Some((category, extract_deletion(body))),
        MutationCategory::Nonsense => extract_nonsense(body),
        MutationCategory::Frameshift => extract_frameshift(body, flags.premature_stop),
        _ => None,
    }
}

/// Split off the first and last characters of `body`.
fn ends(body: &str) -> Option<(char, &str, char)> {
    let mut chars = body.chars();
    let first = chars.next()?;
    let last = chars.next_back()?;
    Some((first, chars.as_str(), last))
}

fn extract_missense(body: &str) -> Option<(MutationCategory, Extracted)> {
    let (initial, digits, mutated) = ends(body)?;
    let position = parse_position(digits)?;
    let category = if initial == mutated {
        MutationCategory::Synonymous
    } else {
        MutationCategory::Missense
    };
    Some((
        category,
        Extracted {
            positions: vec![position],
            initial_residues: vec![initial],
            mutated_residues: mutated.to_string(),
            stop_offset: None,
        },
    ))
}

fn extract_insertion(body: &str) -> Extracted {
    let (initial_residues, positions) = scan_residue_positions(body, Some(INSERTION_FLANK_LIMIT));
    let inserted = first_nonempty_run_after(body, b"INS", |c| {
        c.is_ascii_uppercase() || c.is_ascii_digit() || c == '?'
    });
    Extracted {
        positions,
        initial_residues,
        mutated_residues: inserted.trim_matches('?').to_string(),
        stop_offset: None,
    }
}

fn extract_deletion(body: &str) -> Extracted {
    let (initial_residues, positions) = scan_residue_positions(body, None);
    let replacement = run_after_first(body, b"DEL", |c| c.is_ascii_uppercase());
    Extracted {
        positions,
        initial_residues,
        mutated_residues: replacement.to_string(),
        stop_offset: None,
    }
}

/// The stop always sits at the mutated residue, so a nonsense record stays
/// valid even when no position can be read.
fn extract_nonsense(body: &str) -> Option<(MutationCategory, Extracted)> {
    let (initial, middle, _) = ends(body)?;
    let position = parse_position(middle).or_else(|| leading_position(middle));
    Some((
        MutationCategory::Nonsense,
        Extracted {
            positions: position.into_iter().collect(),
            initial_residues: vec![initial],
            mutated_residues: String::new(),
            stop_offset: Some(0),
        },
    ))
}

fn extract_frameshift(body: &str, premature_stop: bool) -> Option<(MutationCategory, Extracted)> {
    let initial = body.chars().next()?;
    let (_, positions) = scan_residue_positions(body, Some(1));
    let position = *positions.first()?;
    let stop_offset = if premature_stop {
        trailing_stop_offset(body)
    } else {
        None
    };
    Some((
        MutationCategory::Frameshift,
        Extracted {
            positions: vec![position],
            initial_residues: vec![initial],
            mutated_residues: String::new(),
            stop_offset,
        },
    ))
}

/// Parse a purely numeric position. Overflow is treated as unreadable.
fn parse_position(digits: &str) -> Option<u64> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    match digits.parse() {
        Ok(position) => Some(position),
        Err(_) => {
            trace!(digits, "position does not fit in u64");
            None
        }
    }
}

fn leading_digits(input: &str) -> IResult<&str, &str> {
    digit1(input)
}

fn leading_position(input: &str) -> Option<u64> {
    let (_, digits) = leading_digits(input).ok()?;
    parse_position(digits)
}

fn residue_position(input: &str) -> IResult<&str, (char, &str)> {
    (satisfy(|c: char| c.is_ascii_uppercase()), digit1).parse(input)
}

/// Collect non-overlapping "residue letter immediately followed by digits"
/// pairs, left to right, stopping after `limit` pairs.
///
/// A pair whose digits overflow is dropped whole so residues and positions
/// stay aligned.
pub(crate) fn scan_residue_positions(body: &str, limit: Option<usize>) -> (Vec<char>, Vec<u64>) {
    let mut residues = Vec::new();
    let mut positions = Vec::new();
    let mut rest = body;

    while !rest.is_empty() && limit.is_none_or(|max| residues.len() < max) {
        match residue_position(rest) {
            Ok((remaining, (residue, digits))) => {
                if let Some(position) = parse_position(digits) {
                    residues.push(residue);
                    positions.push(position);
                }
                rest = remaining;
            }
            Err(_) => {
                let mut chars = rest.chars();
                chars.next();
                rest = chars.as_str();
            }
        }
    }

    (residues, positions)
}

fn take_run<F>(input: &str, accept: F) -> &str
where
    F: Fn(char) -> bool,
{
    let parsed: IResult<&str, &str> = take_while(accept).parse(input);
    parsed.map(|(_, run)| run).unwrap_or("")
}

/// Run of accepted characters right after the first `marker`; may be empty.
fn run_after_first<'a, F>(body: &'a str, marker: &[u8], accept: F) -> &'a str
where
    F: Fn(char) -> bool,
{
    memmem::find(body.as_bytes(), marker)
        .map(|idx| take_run(&body[idx + marker.len()..], accept))
        .unwrap_or("")
}

/// First non-empty run of accepted characters following any `marker`.
fn first_nonempty_run_after<'a, F>(body: &'a str, marker: &[u8], accept: F) -> &'a str
where
    F: Fn(char) -> bool + Copy,
{
    memmem::find_iter(body.as_bytes(), marker)
        .map(|idx| take_run(&body[idx + marker.len()..], accept))
        .find(|run| !run.is_empty())
        .unwrap_or("")
}

fn stop_digits(input: &str) -> IResult<&str, &str> {
    all_consuming(digit1).parse(input)
}

/// Digits after the final `*`.
///
/// Only reached when the premature-stop rule held, which already requires
/// nothing but digits after that `*`; `*>13` never gets here.
fn trailing_stop_offset(body: &str) -> Option<u64> {
    let star = body.rfind('*')?;
    let (_, digits) = stop_digits(&body[star + 1..]).ok()?;
    parse_position(digits)
}
