//! Category classification
//!
//! Four independent rules are evaluated against a normalized notation and
//! recorded as flags in a [`Classification`]. The flags are then resolved
//! into exactly one [`MutationCategory`] by a fixed priority order:
//!
//! 1. insertion / deletion
//! 2. nonsense
//! 3. frameshift
//! 4. missense
//! 5. invalid
//!
//! The order matters: `R97FS*` satisfies both the frameshift and the
//! trailing-stop rules and resolves to nonsense.

use memchr::memmem;
use nom::{
    character::complete::{digit1, satisfy},
    combinator::all_consuming,
    IResult, Parser,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::normalize::NormalizedNotation;
use crate::notation::category::MutationCategory;

const INSERTION_MARKER: &[u8] = b"INS";
const DELETION_MARKER: &[u8] = b"DEL";
const FRAMESHIFT_MARKER: &[u8] = b"FS";

/// How the `INS`, `DEL` and `FS` markers are located.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkerMatching {
    /// Marker anywhere in the upper-cased input counts.
    ///
    /// This is how the mutation tables have always been read. It misfires on
    /// inputs that merely contain the letters, e.g. a residue run spelling
    /// `DEL`.
    #[default]
    Substring,
    /// Marker only counts at an edit site: right after a position (`G12DEL`,
    /// `?DEL`), `INS` right after such a `DEL`, and `FS` also after a single
    /// alternate residue (`R97AFS*13`).
    EditSite,
}

impl fmt::Display for MarkerMatching {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkerMatching::Substring => write!(f, "substring"),
            MarkerMatching::EditSite => write!(f, "edit-site"),
        }
    }
}

impl FromStr for MarkerMatching {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "substring" | "loose" => Ok(MarkerMatching::Substring),
            "edit-site" | "edit_site" | "strict" => Ok(MarkerMatching::EditSite),
            other => Err(format!(
                "unknown marker matching mode '{}' (expected substring or edit-site)",
                other
            )),
        }
    }
}

/// Raw rule outcomes for one notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Classification {
    /// Body is exactly `[A-Z?][0-9]+[A-Z?]`.
    pub missense: bool,
    /// `INS` marker found.
    pub insertion: bool,
    /// `DEL` marker found and no `INS` marker.
    pub deletion: bool,
    /// Body ends in `*` optionally followed by digits, with something before
    /// the `*`.
    pub premature_stop: bool,
    /// Premature stop with nothing after the `*`.
    pub nonsense: bool,
    /// `FS` marker found.
    pub frameshift: bool,
}

impl Classification {
    pub fn is_indel(&self) -> bool {
        self.insertion || self.deletion
    }

    /// Resolve the flags into a single category.
    ///
    /// Missense is returned unrefined; the synonymous check needs the
    /// extracted residues.
    pub fn category(&self) -> MutationCategory {
        if self.insertion {
            MutationCategory::Insertion
        } else if self.deletion {
            MutationCategory::Deletion
        } else if self.nonsense {
            MutationCategory::Nonsense
        } else if self.frameshift {
            MutationCategory::Frameshift
        } else if self.missense {
            MutationCategory::Missense
        } else {
            MutationCategory::Invalid
        }
    }
}

/// Evaluate every classification rule against a normalized notation.
///
/// # Examples
///
/// ```
/// use ferro_protchange::notation::parser::{classify, normalize, MarkerMatching};
/// use ferro_protchange::MutationCategory;
///
/// let flags = classify(&normalize("p.R97fs*13"), MarkerMatching::Substring);
/// assert!(flags.frameshift);
/// assert!(flags.premature_stop);
/// assert!(!flags.nonsense);
/// assert_eq!(flags.category(), MutationCategory::Frameshift);
/// ```
pub fn classify(notation: &NormalizedNotation, matching: MarkerMatching) -> Classification {
    let body = notation.body();

    let (insertion, deletion, frameshift) = match matching {
        MarkerMatching::Substring => {
            let full = notation.full().as_bytes();
            (
                contains(full, INSERTION_MARKER),
                contains(full, DELETION_MARKER),
                contains(full, FRAMESHIFT_MARKER),
            )
        }
        MarkerMatching::EditSite => {
            let bytes = body.as_bytes();
            (
                insertion_at_edit_site(bytes),
                marker_at_edit_site(bytes, DELETION_MARKER),
                frameshift_at_edit_site(bytes),
            )
        }
    };

    let premature_stop = is_premature_stop(body);

    Classification {
        missense: is_missense_shape(body),
        insertion,
        deletion: deletion && !insertion,
        premature_stop,
        nonsense: premature_stop && body.ends_with('*'),
        frameshift,
    }
}

/// Residue letter or the `?` placeholder.
pub(crate) fn is_residue_code(c: char) -> bool {
    c.is_ascii_uppercase() || c == '?'
}

fn missense_shape(input: &str) -> IResult<&str, (char, &str, char)> {
    all_consuming((satisfy(is_residue_code), digit1, satisfy(is_residue_code))).parse(input)
}

fn is_missense_shape(body: &str) -> bool {
    missense_shape(body).is_ok()
}

/// `.+\*\d*$`: only the last `*` can be followed by nothing but digits.
fn is_premature_stop(body: &str) -> bool {
    match body.rfind('*') {
        Some(star) => star > 0 && body[star + 1..].bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}

fn contains(haystack: &[u8], marker: &[u8]) -> bool {
    memmem::find(haystack, marker).is_some()
}

/// The byte before `idx` closes a position (`12`, `?`).
fn follows_position(bytes: &[u8], idx: usize) -> bool {
    idx > 0 && (bytes[idx - 1].is_ascii_digit() || bytes[idx - 1] == b'?')
}

fn marker_at_edit_site(bytes: &[u8], marker: &[u8]) -> bool {
    memmem::find_iter(bytes, marker).any(|idx| follows_position(bytes, idx))
}

fn insertion_at_edit_site(bytes: &[u8]) -> bool {
    memmem::find_iter(bytes, INSERTION_MARKER).any(|idx| {
        follows_position(bytes, idx)
            || (idx >= DELETION_MARKER.len()
                && &bytes[idx - DELETION_MARKER.len()..idx] == DELETION_MARKER
                && follows_position(bytes, idx - DELETION_MARKER.len()))
    })
}

fn frameshift_at_edit_site(bytes: &[u8]) -> bool {
    memmem::find_iter(bytes, FRAMESHIFT_MARKER).any(|idx| {
        follows_position(bytes, idx)
            || (idx >= 2 && bytes[idx - 1].is_ascii_uppercase() && follows_position(bytes, idx - 1))
    })
}
