//! Protein change notation parser
//!
//! Parsing is a total function: every input, however malformed, produces a
//! [`MutationNotation`]. Inputs that match no structural rule are tagged
//! [`MutationCategory::Invalid`] and keep their raw text for diagnostics.
//!
//! The pipeline is:
//!
//! 1. [`normalize`]: upper-case and split off the `p.` prefix
//! 2. [`detect_evidence`]: unknown-effect, missing-info and no-protein flags
//! 3. [`classify`]: ordered rule cascade, first match wins
//! 4. field extraction for the winning category
//!
//! # Marker Matching
//!
//! The `INS`, `DEL` and `FS` markers are found by plain substring search by
//! default. [`MarkerMatching::EditSite`] only accepts them where an edit
//! actually starts. Use [`NotationParser::with_config`] to select it.

mod classify;
mod evidence;
mod extract;
mod normalize;

pub use classify::{classify, Classification, MarkerMatching};
pub use evidence::detect_evidence;
pub use normalize::{normalize, NormalizedNotation};

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::notation::category::MutationCategory;
use crate::notation::record::{EvidenceStatus, Extracted, MutationNotation};

/// Parser settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ParseConfig {
    /// How indel and frameshift markers are located.
    pub marker_matching: MarkerMatching,
}

impl ParseConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only accept markers at edit sites.
    pub fn edit_site() -> Self {
        Self {
            marker_matching: MarkerMatching::EditSite,
        }
    }

    pub fn with_marker_matching(mut self, marker_matching: MarkerMatching) -> Self {
        self.marker_matching = marker_matching;
        self
    }
}

/// Intermediate results of one parse, kept for diagnostics.
#[derive(Debug, Clone)]
pub(crate) struct ParseSteps {
    pub normalized: NormalizedNotation,
    pub evidence: EvidenceStatus,
    pub rules: Classification,
}

/// Classifier for protein change notation.
///
/// Holds only its configuration; share it freely across threads.
///
/// # Example
///
/// ```
/// use ferro_protchange::{MutationCategory, NotationParser};
///
/// let parser = NotationParser::new();
/// let notation = parser.parse("p.R97fs*13");
/// assert_eq!(notation.category(), MutationCategory::Frameshift);
/// assert_eq!(notation.positions(), &[97]);
/// assert_eq!(notation.stop_offset(), Some(13));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NotationParser {
    config: ParseConfig,
}

impl NotationParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParseConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParseConfig {
        &self.config
    }

    /// Classify a notation with an occurrence count of one.
    pub fn parse(&self, input: &str) -> MutationNotation {
        self.parse_weighted(input, NonZeroU32::MIN)
    }

    /// Classify a notation observed `multiplicity` times.
    pub fn parse_weighted(&self, input: &str, multiplicity: NonZeroU32) -> MutationNotation {
        self.parse_with_steps(input, multiplicity).0
    }

    /// Classify a notation and return the intermediate steps alongside.
    pub(crate) fn parse_with_steps(
        &self,
        input: &str,
        multiplicity: NonZeroU32,
    ) -> (MutationNotation, ParseSteps) {
        let normalized = normalize(input);
        let body = normalized.body();
        let evidence = detect_evidence(body);
        let flags = classify(&normalized, self.config.marker_matching);

        let (category, fields) = match extract::extract(flags.category(), body, &flags, &evidence)
        {
            Some(extracted) => extracted,
            None => {
                if flags.category() != MutationCategory::Invalid {
                    debug!(
                        input,
                        rule = %flags.category(),
                        "notation matched a rule but its fields could not be read"
                    );
                }
                (MutationCategory::Invalid, Extracted::default())
            }
        };

        let record = MutationNotation::new(input, category, evidence, fields, multiplicity);
        let steps = ParseSteps {
            normalized,
            evidence,
            rules: flags,
        };
        (record, steps)
    }

    /// Classify an optional notation; an absent value reads as empty.
    pub fn parse_optional(&self, input: Option<&str>) -> MutationNotation {
        self.parse(input.unwrap_or_default())
    }
}

/// Classify a notation with the default configuration.
///
/// # Example
///
/// ```
/// use ferro_protchange::{parse_notation, MutationCategory};
///
/// let notation = parse_notation("p.A267C");
/// assert_eq!(notation.category(), MutationCategory::Missense);
/// assert_eq!(notation.positions(), &[267]);
/// assert_eq!(notation.initial_residues(), &['A']);
/// assert_eq!(notation.mutated_residues(), "C");
/// ```
pub fn parse_notation(input: &str) -> MutationNotation {
    NotationParser::new().parse(input)
}

/// Classify a notation observed `multiplicity` times.
pub fn parse_notation_weighted(input: &str, multiplicity: NonZeroU32) -> MutationNotation {
    NotationParser::new().parse_weighted(input, multiplicity)
}

/// Classify an optional notation; `None` is treated as the empty string.
pub fn parse_optional_notation(input: Option<&str>) -> MutationNotation {
    NotationParser::new().parse_optional(input)
}
