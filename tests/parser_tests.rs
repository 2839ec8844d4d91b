//! Parser tests using rstest parameterized tests
//!
//! Test categories:
//! - Fixture cases: real-world notations from mutation tables with expected fields
//! - Cascade priority: notations matching more than one rule
//! - Evidence flags: placeholders and unknown-effect markers
//! - Marker matching: loose substring vs edit-site markers

use ferro_protchange::{
    parse_notation, parse_optional_notation, MarkerMatching, MutationCategory, NotationParser,
    ParseConfig,
};
use rstest::rstest;
use serde::Deserialize;
use std::fs;

// =============================================================================
// Fixture-based tests
// =============================================================================

#[derive(Debug, Deserialize)]
struct NotationFixtures {
    notations: Vec<NotationTestCase>,
}

#[derive(Debug, Deserialize)]
struct NotationTestCase {
    input: String,
    category: MutationCategory,
    positions: Vec<u64>,
    initial: String,
    mutated: String,
    stop_offset: Option<u64>,
    missing_info: bool,
    unknown_effect: bool,
    no_protein: bool,
    description: String,
}

fn load_notation_fixtures() -> NotationFixtures {
    let content = fs::read_to_string("tests/fixtures/notations.json")
        .expect("Failed to read notation fixtures");
    serde_json::from_str(&content).expect("Failed to parse fixtures JSON")
}

#[test]
fn test_notations_from_fixtures() {
    let fixtures = load_notation_fixtures();
    assert!(!fixtures.notations.is_empty());

    for case in fixtures.notations {
        let n = parse_notation(&case.input);
        let context = format!("'{}' ({})", case.input, case.description);

        assert_eq!(n.raw(), case.input, "raw for {}", context);
        assert_eq!(n.category(), case.category, "category for {}", context);
        assert_eq!(n.positions(), case.positions.as_slice(), "positions for {}", context);
        assert_eq!(
            n.initial_residues().iter().collect::<String>(),
            case.initial,
            "initial residues for {}",
            context
        );
        assert_eq!(n.mutated_residues(), case.mutated, "mutated for {}", context);
        assert_eq!(n.stop_offset(), case.stop_offset, "stop offset for {}", context);
        assert_eq!(n.is_missing_info(), case.missing_info, "missing info for {}", context);
        assert_eq!(
            n.is_unknown_effect(),
            case.unknown_effect,
            "unknown effect for {}",
            context
        );
        assert_eq!(n.is_no_protein(), case.no_protein, "no protein for {}", context);
    }
}

#[test]
fn test_fixture_records_serialize() {
    let fixtures = load_notation_fixtures();
    for case in fixtures.notations {
        let n = parse_notation(&case.input);
        let json = serde_json::to_value(&n).unwrap();
        assert_eq!(json["category"], case.category.label(), "{}", case.input);
        assert_eq!(json["missing_info"], case.missing_info, "{}", case.input);
    }
}

// =============================================================================
// Category scenarios
// =============================================================================

#[rstest]
#[case("p.A267C", MutationCategory::Missense)]
#[case("p.R97R", MutationCategory::Synonymous)]
#[case("p.G12del", MutationCategory::Deletion)]
#[case("p.?_?ins?", MutationCategory::Insertion)]
#[case("p.R97fs*13", MutationCategory::Frameshift)]
#[case("p.W25*", MutationCategory::Nonsense)]
#[case("p.(=)", MutationCategory::Invalid)]
#[case("p.?", MutationCategory::Invalid)]
#[case("p.=", MutationCategory::Invalid)]
#[case("", MutationCategory::Invalid)]
#[case("not a mutation", MutationCategory::Invalid)]
fn test_category(#[case] input: &str, #[case] expected: MutationCategory) {
    assert_eq!(parse_notation(input).category(), expected, "{}", input);
}

// =============================================================================
// Cascade priority
// =============================================================================

#[rstest]
#[case::insertion_over_deletion("p.E5_K6delinsQ", MutationCategory::Insertion)]
#[case::indel_over_nonsense("p.G12del*", MutationCategory::Deletion)]
#[case::indel_over_frameshift("p.G12delfs", MutationCategory::Deletion)]
#[case::nonsense_over_frameshift("p.R97fs*", MutationCategory::Nonsense)]
#[case::nonsense_without_position("p.W*", MutationCategory::Nonsense)]
#[case::placeholder_nonsense("p.?*", MutationCategory::Nonsense)]
#[case::separated_fs_letters_stay_missense("p.F5S", MutationCategory::Missense)]
#[case::frameshift_after_position("p.F5FS", MutationCategory::Frameshift)]
fn test_cascade_priority(#[case] input: &str, #[case] expected: MutationCategory) {
    assert_eq!(parse_notation(input).category(), expected, "{}", input);
}

#[rstest]
#[case("p.W*")]
#[case("p.X*")]
#[case("p.?*")]
fn test_nonsense_without_position(#[case] input: &str) {
    let n = parse_notation(input);
    assert_eq!(n.category(), MutationCategory::Nonsense, "{}", input);
    assert!(n.positions().is_empty(), "{}", input);
    assert_eq!(n.initial_residues().len(), 1, "{}", input);
    assert_eq!(n.stop_offset(), Some(0), "{}", input);
    assert_eq!(n.mutated_residues(), "");
}

#[test]
fn test_arrow_stop_is_not_a_stop_offset() {
    let n = parse_notation("p.L10fs*>5");
    assert_eq!(n.category(), MutationCategory::Frameshift);
    assert_eq!(n.positions(), &[10]);
    assert_eq!(n.stop_offset(), None);
}

// =============================================================================
// Evidence flags
// =============================================================================

#[rstest]
#[case("p.?_?ins?", true)]
#[case("p.?", true)]
#[case("p.M1?", true)]
#[case("p.K5?del", true)]
#[case("p.0?", true)]
#[case("p.A267C", false)]
#[case("p.(=)", false)]
fn test_missing_info(#[case] input: &str, #[case] expected: bool) {
    assert_eq!(parse_notation(input).is_missing_info(), expected, "{}", input);
}

#[rstest]
#[case("p.(=)", MutationCategory::UnknownEffect)]
#[case("p.?", MutationCategory::UnknownEffect)]
#[case("p.(R97C)", MutationCategory::UnknownEffect)]
#[case("p.0", MutationCategory::NoProtein)]
#[case("p.0?", MutationCategory::NoProtein)]
#[case("p.A267C", MutationCategory::Missense)]
#[case("garbage", MutationCategory::Invalid)]
fn test_reported_category(#[case] input: &str, #[case] expected: MutationCategory) {
    assert_eq!(parse_notation(input).reported_category(), expected, "{}", input);
}

#[rstest]
#[case("p.A267C", true)]
#[case("p.R97R", false)]
#[case("p.G12del", true)]
#[case("p.K2_L3insQS", true)]
#[case("p.R97fs*13", true)]
#[case("p.W25*", true)]
#[case("p.?", false)]
fn test_is_non_silent(#[case] input: &str, #[case] expected: bool) {
    assert_eq!(parse_notation(input).is_non_silent(), expected, "{}", input);
}

// =============================================================================
// Residue change counting
// =============================================================================

#[rstest]
#[case("p.A267C", Some(("A", "C")))]
#[case("p.G12del", Some(("G", "")))]
#[case("p.K2_L3insQS", Some(("KL", "QS")))]
#[case("p.?_?ins?", None)]
#[case("junk", None)]
fn test_residue_change(#[case] input: &str, #[case] expected: Option<(&str, &str)>) {
    let expected = expected.map(|(a, b)| (a.to_string(), b.to_string()));
    assert_eq!(parse_notation(input).residue_change(), expected, "{}", input);
}

// =============================================================================
// Marker matching
// =============================================================================

#[rstest]
#[case("p.G12del", MutationCategory::Deletion, MutationCategory::Deletion)]
#[case("p.?del", MutationCategory::Deletion, MutationCategory::Deletion)]
#[case("p.E5_K6delinsQ", MutationCategory::Insertion, MutationCategory::Insertion)]
#[case("p.R97Afs*13", MutationCategory::Frameshift, MutationCategory::Frameshift)]
#[case("p.DEL1A", MutationCategory::Deletion, MutationCategory::Invalid)]
#[case("p.INS1A", MutationCategory::Insertion, MutationCategory::Invalid)]
fn test_marker_matching_modes(
    #[case] input: &str,
    #[case] substring: MutationCategory,
    #[case] edit_site: MutationCategory,
) {
    let loose = NotationParser::new();
    let strict = NotationParser::with_config(
        ParseConfig::new().with_marker_matching(MarkerMatching::EditSite),
    );
    assert_eq!(loose.parse(input).category(), substring, "substring {}", input);
    assert_eq!(strict.parse(input).category(), edit_site, "edit-site {}", input);
}

// =============================================================================
// Absent input
// =============================================================================

#[test]
fn test_absent_input_is_empty() {
    let absent = parse_optional_notation(None);
    let empty = parse_notation("");
    assert_eq!(absent, empty);
    assert!(!absent.is_valid());
    assert_eq!(absent.mutation_type(), "invalid");
}
