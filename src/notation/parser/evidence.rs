//! Evidence-status flags
//!
//! HGVS marks unresolved consequences with `?`, `=` and parentheses, and the
//! mutation database additionally uses `?` as a placeholder inside otherwise
//! structured indels (`?_?ins?`, `?del`). These flags are computed on the
//! variant body and never influence the category.

use crate::notation::record::EvidenceStatus;

/// Whole-body tokens meaning "effect unknown".
const UNKNOWN_EFFECT_TOKENS: [&str; 3] = ["?", "(=)", "="];

/// Whole-body tokens meaning "no protein produced".
const NO_PROTEIN_TOKENS: [&str; 2] = ["0", "0?"];

/// Compute the evidence flags for a normalized body.
///
/// # Examples
///
/// ```
/// use ferro_protchange::notation::parser::detect_evidence;
///
/// let evidence = detect_evidence("?_?INS?");
/// assert!(evidence.missing_info);
/// assert!(!evidence.unknown_effect);
///
/// assert!(detect_evidence("(=)").unknown_effect);
/// assert!(detect_evidence("0?").no_protein);
/// ```
pub fn detect_evidence(body: &str) -> EvidenceStatus {
    EvidenceStatus {
        unknown_effect: UNKNOWN_EFFECT_TOKENS.contains(&body) || body.contains('('),
        missing_info: body.contains('?'),
        no_protein: NO_PROTEIN_TOKENS.contains(&body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_effect_tokens() {
        for token in ["?", "(=)", "="] {
            assert!(detect_evidence(token).unknown_effect, "{token}");
        }
        assert!(!detect_evidence("A267C").unknown_effect);
    }

    #[test]
    fn test_parenthesis_means_predicted() {
        let evidence = detect_evidence("(R97C)");
        assert!(evidence.unknown_effect);
        assert!(!evidence.missing_info);
    }

    #[test]
    fn test_missing_info_anywhere() {
        assert!(detect_evidence("?45A").missing_info);
        assert!(detect_evidence("K2_?INSA").missing_info);
        assert!(detect_evidence("?").missing_info);
        assert!(!detect_evidence("G12DEL").missing_info);
    }

    #[test]
    fn test_no_protein_is_exact() {
        assert!(detect_evidence("0").no_protein);
        assert!(detect_evidence("0?").no_protein);
        assert!(!detect_evidence("0A").no_protein);
        assert!(!detect_evidence("").no_protein);
    }

    #[test]
    fn test_equals_only_whole_token() {
        assert!(!detect_evidence("R97=").unknown_effect);
    }
}
