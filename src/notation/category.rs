//! Mutation category tags
//!
//! Every parsed notation carries exactly one [`MutationCategory`]. The tag is
//! a plain sum type so downstream tallies can `match` on it exhaustively.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category assigned to a protein change notation.
///
/// `Synonymous` and `Nonsense` are refinements of the missense and
/// premature-stop rules. `UnknownEffect` and `NoProtein` are never assigned by
/// the classifier itself; they only appear through
/// [`MutationNotation::reported_category`](crate::MutationNotation::reported_category).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationCategory {
    /// Single residue substitution (`A267C`)
    Missense,
    /// Missense-shaped notation with identical residues (`R97R`)
    Synonymous,
    /// Inserted residues, including delins (`K2_L3insQS`)
    Insertion,
    /// Deleted residues (`G12del`)
    Deletion,
    /// Frameshift, optionally with a downstream stop (`R97fs*13`)
    Frameshift,
    /// Stop codon at the mutated position (`W25*`)
    Nonsense,
    /// Functional consequence flagged as unresolved (`?`, `(=)`)
    UnknownEffect,
    /// No protein product (`0`, `0?`)
    NoProtein,
    /// Nothing structural matched
    Invalid,
}

impl MutationCategory {
    /// All categories in declaration order.
    pub const ALL: [MutationCategory; 9] = [
        MutationCategory::Missense,
        MutationCategory::Synonymous,
        MutationCategory::Insertion,
        MutationCategory::Deletion,
        MutationCategory::Frameshift,
        MutationCategory::Nonsense,
        MutationCategory::UnknownEffect,
        MutationCategory::NoProtein,
        MutationCategory::Invalid,
    ];

    /// Stable lowercase label used for serialization and display.
    pub fn label(&self) -> &'static str {
        match self {
            MutationCategory::Missense => "missense",
            MutationCategory::Synonymous => "synonymous",
            MutationCategory::Insertion => "insertion",
            MutationCategory::Deletion => "deletion",
            MutationCategory::Frameshift => "frameshift",
            MutationCategory::Nonsense => "nonsense",
            MutationCategory::UnknownEffect => "unknown_effect",
            MutationCategory::NoProtein => "no_protein",
            MutationCategory::Invalid => "invalid",
        }
    }

    /// Categories describing a change at a single residue.
    pub fn is_point(&self) -> bool {
        matches!(
            self,
            MutationCategory::Missense
                | MutationCategory::Synonymous
                | MutationCategory::Nonsense
                | MutationCategory::Frameshift
        )
    }

    /// Insertion or deletion.
    pub fn is_indel(&self) -> bool {
        matches!(self, MutationCategory::Insertion | MutationCategory::Deletion)
    }

    /// Categories that change the protein sequence.
    pub fn is_non_silent(&self) -> bool {
        matches!(
            self,
            MutationCategory::Missense
                | MutationCategory::Insertion
                | MutationCategory::Deletion
                | MutationCategory::Frameshift
                | MutationCategory::Nonsense
        )
    }

    /// Missense-shaped categories, the ones grouped into recurrence histograms.
    pub fn is_substitution(&self) -> bool {
        matches!(self, MutationCategory::Missense | MutationCategory::Synonymous)
    }
}

impl fmt::Display for MutationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a category label is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown mutation category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for MutationCategory {
    type Err = UnknownCategory;

    /// Parse a category label. Accepts the snake_case labels plus a few
    /// spellings seen in mutation tables (`frame_shift`, `silent`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        let category = match normalized.as_str() {
            "missense" => MutationCategory::Missense,
            "synonymous" | "silent" => MutationCategory::Synonymous,
            "insertion" => MutationCategory::Insertion,
            "deletion" => MutationCategory::Deletion,
            "frameshift" | "frame_shift" => MutationCategory::Frameshift,
            "nonsense" => MutationCategory::Nonsense,
            "unknown_effect" => MutationCategory::UnknownEffect,
            "no_protein" => MutationCategory::NoProtein,
            "invalid" => MutationCategory::Invalid,
            _ => return Err(UnknownCategory(s.to_string())),
        };
        Ok(category)
    }
}
