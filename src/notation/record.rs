//! Parsed notation record
//!
//! A [`MutationNotation`] is produced once by the parser and never mutated
//! afterwards. The only way to attach an occurrence count after parsing is
//! the consuming [`MutationNotation::with_multiplicity`] builder.

use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

use super::category::MutationCategory;

/// Evidence flags computed independently of the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct EvidenceStatus {
    /// The notation flags its consequence as unresolved (`?`, `=`, `(=)`, or
    /// any parenthesized prediction).
    pub unknown_effect: bool,
    /// The body contains a `?` placeholder for data the source could not
    /// resolve.
    pub missing_info: bool,
    /// Explicit "no protein product" marker (`0`, `0?`).
    pub no_protein: bool,
}

/// Structural fields extracted for one category.
///
/// Crate-internal; records expose these through accessors only.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct Extracted {
    pub positions: Vec<u64>,
    pub initial_residues: Vec<char>,
    pub mutated_residues: String,
    pub stop_offset: Option<u64>,
}

/// A classified protein change notation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationNotation {
    raw: String,
    category: MutationCategory,
    #[serde(flatten)]
    evidence: EvidenceStatus,
    positions: Vec<u64>,
    initial_residues: Vec<char>,
    mutated_residues: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    stop_offset: Option<u64>,
    multiplicity: NonZeroU32,
}

impl MutationNotation {
    pub(crate) fn new(
        raw: impl Into<String>,
        category: MutationCategory,
        evidence: EvidenceStatus,
        fields: Extracted,
        multiplicity: NonZeroU32,
    ) -> Self {
        Self {
            raw: raw.into(),
            category,
            evidence,
            positions: fields.positions,
            initial_residues: fields.initial_residues,
            mutated_residues: fields.mutated_residues,
            stop_offset: fields.stop_offset,
            multiplicity,
        }
    }

    /// Return this record with a different occurrence count.
    pub fn with_multiplicity(mut self, multiplicity: NonZeroU32) -> Self {
        self.multiplicity = multiplicity;
        self
    }

    /// The input exactly as given to the parser.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn category(&self) -> MutationCategory {
        self.category
    }

    pub fn evidence(&self) -> EvidenceStatus {
        self.evidence
    }

    pub fn is_missing_info(&self) -> bool {
        self.evidence.missing_info
    }

    pub fn is_unknown_effect(&self) -> bool {
        self.evidence.unknown_effect
    }

    pub fn is_no_protein(&self) -> bool {
        self.evidence.no_protein
    }

    /// Residue positions in notation order.
    pub fn positions(&self) -> &[u64] {
        &self.positions
    }

    /// One-letter codes of the residues before the change.
    pub fn initial_residues(&self) -> &[char] {
        &self.initial_residues
    }

    /// Resulting residue sequence; empty for deletions without a
    /// replacement, nonsense and frameshift changes.
    pub fn mutated_residues(&self) -> &str {
        &self.mutated_residues
    }

    /// Distance from the frameshift start to the new stop codon. `Some(0)`
    /// for nonsense changes.
    pub fn stop_offset(&self) -> Option<u64> {
        self.stop_offset
    }

    pub fn multiplicity(&self) -> NonZeroU32 {
        self.multiplicity
    }

    /// First position, the key for recurrence histograms.
    pub fn primary_position(&self) -> Option<u64> {
        self.positions.first().copied()
    }

    pub fn is_valid(&self) -> bool {
        self.category != MutationCategory::Invalid
    }

    pub fn is_non_silent(&self) -> bool {
        self.category.is_non_silent()
    }

    /// Label of the assigned category (`"missense"`, `"frameshift"`, ...).
    pub fn mutation_type(&self) -> &'static str {
        self.category.label()
    }

    /// Category for reporting purposes.
    ///
    /// Structurally invalid notations that carry a no-protein or
    /// unknown-effect marker report those tags instead of `Invalid`.
    pub fn reported_category(&self) -> MutationCategory {
        match self.category {
            MutationCategory::Invalid if self.evidence.no_protein => MutationCategory::NoProtein,
            MutationCategory::Invalid if self.evidence.unknown_effect => {
                MutationCategory::UnknownEffect
            }
            other => other,
        }
    }

    /// `(initial, mutated)` residues for change matrices.
    ///
    /// Only trusted when the notation is valid and complete.
    pub fn residue_change(&self) -> Option<(String, String)> {
        if !self.is_valid() || self.evidence.missing_info {
            return None;
        }
        let initial: String = self.initial_residues.iter().collect();
        Some((initial, self.mutated_residues.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(category: MutationCategory, evidence: EvidenceStatus) -> MutationNotation {
        MutationNotation::new("p.X", category, evidence, Extracted::default(), NonZeroU32::MIN)
    }

    #[test]
    fn test_with_multiplicity_consumes() {
        let rec = record(MutationCategory::Invalid, EvidenceStatus::default());
        assert_eq!(rec.multiplicity().get(), 1);
        let rec = rec.with_multiplicity(NonZeroU32::new(7).unwrap());
        assert_eq!(rec.multiplicity().get(), 7);
    }

    #[test]
    fn test_reported_category() {
        let no_protein = EvidenceStatus {
            no_protein: true,
            ..Default::default()
        };
        assert_eq!(
            record(MutationCategory::Invalid, no_protein).reported_category(),
            MutationCategory::NoProtein
        );

        let unknown = EvidenceStatus {
            unknown_effect: true,
            ..Default::default()
        };
        assert_eq!(
            record(MutationCategory::Invalid, unknown).reported_category(),
            MutationCategory::UnknownEffect
        );
        assert_eq!(
            record(MutationCategory::Missense, unknown).reported_category(),
            MutationCategory::Missense
        );
    }

    #[test]
    fn test_residue_change_requires_complete_notation() {
        let fields = Extracted {
            positions: vec![267],
            initial_residues: vec!['A'],
            mutated_residues: "C".to_string(),
            stop_offset: None,
        };
        let rec = MutationNotation::new(
            "p.A267C",
            MutationCategory::Missense,
            EvidenceStatus::default(),
            fields,
            NonZeroU32::MIN,
        );
        assert_eq!(rec.residue_change(), Some(("A".to_string(), "C".to_string())));
        assert_eq!(rec.primary_position(), Some(267));

        let missing = EvidenceStatus {
            missing_info: true,
            ..Default::default()
        };
        assert_eq!(record(MutationCategory::Deletion, missing).residue_change(), None);
        assert_eq!(
            record(MutationCategory::Invalid, EvidenceStatus::default()).residue_change(),
            None
        );
    }

    #[test]
    fn test_serialize_flattens_evidence() {
        let rec = record(MutationCategory::Invalid, EvidenceStatus::default());
        let value = serde_json::to_value(&rec).unwrap();
        assert_eq!(value["category"], "invalid");
        assert_eq!(value["missing_info"], false);
        assert!(value.get("stop_offset").is_none());
        assert_eq!(value["multiplicity"], 1);
    }
}
