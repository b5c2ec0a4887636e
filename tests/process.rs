//! End-to-end pipeline scenarios from spec.md §8: the concrete
//! input/output table plus the listed boundary conditions.

use ens_normalize::{process, CurableError, DisallowedSequence, Error};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case("HELLO.eth", "hello.eth", "hello.eth")]
#[case("Nick.ETH", "nick.eth", "nick.eth")]
#[case("\u{BD}.eth", "1\u{2044}2.eth", "1\u{2044}2.eth")]
#[case("\u{3BE}.eth", "\u{3BE}.eth", "\u{3BE}.eth")]
fn concrete_scenarios_match(#[case] input: &str, #[case] normalized: &str, #[case] beautified: &str) {
    let result = process(input).unwrap();
    assert_eq!(result.normalized, normalized);
    assert_eq!(result.beautified, beautified);
}

#[test]
fn xi_inside_ascii_context_is_illegal_mixture() {
    let err = process("\u{3BE}abc.eth").unwrap_err();
    assert!(matches!(
        err,
        Error::Disallowed(DisallowedSequence::IllegalMixture { .. })
    ));
}

#[test]
fn underscore_in_middle_fails() {
    let err = process("a_b.eth").unwrap_err();
    assert!(matches!(
        err,
        Error::Curable(CurableError::UnderscoreInMiddle { .. })
    ));
}

#[test]
fn label_extension_hyphens_fail() {
    let err = process("ab--cd.eth").unwrap_err();
    assert!(matches!(
        err,
        Error::Curable(CurableError::InvalidLabelExtension { .. })
    ));
}

#[test]
fn emoji_without_fe0f_round_trips_and_beautifies() {
    let result = process("\u{1F44D}.eth").unwrap();
    assert_eq!(result.normalized, "\u{1F44D}.eth");
    assert_eq!(result.beautified, "\u{1F44D}\u{FE0F}.eth");
}

#[test]
fn empty_input_is_an_empty_label() {
    let err = process("").unwrap_err();
    assert!(matches!(
        err,
        Error::Disallowed(DisallowedSequence::EmptyLabel)
    ));
}

#[test]
fn single_stop_is_two_empty_labels() {
    let err = process(".").unwrap_err();
    assert!(matches!(
        err,
        Error::Disallowed(DisallowedSequence::EmptyLabel)
    ));
}

#[test]
fn leading_stop_is_rejected() {
    let err = process(".eth").unwrap_err();
    assert!(matches!(
        err,
        Error::Disallowed(DisallowedSequence::EmptyLabel)
    ));
}

#[test]
fn trailing_stop_is_rejected() {
    let err = process("eth.").unwrap_err();
    assert!(matches!(
        err,
        Error::Disallowed(DisallowedSequence::EmptyLabel)
    ));
}

#[test]
fn adjacent_stops_are_rejected() {
    let err = process("a..b").unwrap_err();
    assert!(matches!(
        err,
        Error::Disallowed(DisallowedSequence::EmptyLabel)
    ));
}

#[test]
fn four_char_ascii_label_with_hyphens_at_three_four_fails() {
    let err = process("ab--").unwrap_err();
    assert!(matches!(
        err,
        Error::Curable(CurableError::InvalidLabelExtension { .. })
    ));
}

#[test]
fn four_char_ascii_label_with_single_hyphen_at_three_succeeds() {
    assert_eq!(process("ab-d").unwrap().normalized, "ab-d");
}

#[test]
fn fenced_character_as_sole_leading_character_fails() {
    // U+2019 (right single quote, table-registered fenced apostrophe) leading a label.
    let err = process("\u{2019}abc").unwrap_err();
    assert!(matches!(
        err,
        Error::Curable(CurableError::FencedLeading { .. })
    ));
}

#[test]
fn fenced_character_as_trailing_character_fails() {
    let err = process("abc\u{2019}").unwrap_err();
    assert!(matches!(
        err,
        Error::Curable(CurableError::FencedTrailing { .. })
    ));
}

#[test]
fn adjacent_fenced_characters_in_the_middle_fail() {
    let err = process("a\u{2019}\u{2019}b").unwrap_err();
    assert!(matches!(
        err,
        Error::Curable(CurableError::FencedAdjacent { .. })
    ));
}

#[test]
fn single_non_adjacent_fenced_character_succeeds() {
    assert_eq!(process("a\u{2019}b").unwrap().normalized, "a\u{2019}b");
}

#[test]
fn combining_mark_cannot_lead_a_label() {
    // Combining acute accent (U+0301) opening a label.
    let err = process("\u{301}a").unwrap_err();
    assert!(matches!(
        err,
        Error::Curable(CurableError::LeadingCombiningMark { .. })
    ));
}

#[test]
fn combining_mark_cannot_follow_an_emoji() {
    let err = process("\u{1F600}\u{301}").unwrap_err();
    assert!(matches!(
        err,
        Error::Curable(CurableError::CombiningMarkAfterEmoji { .. })
    ));
}

#[test]
fn longest_registered_emoji_sequence_at_end_of_input_matches_whole() {
    // man-technologist ZWJ sequence, a multi-code-point registered emoji.
    let result = process("a.\u{1F468}\u{200D}\u{1F4BB}").unwrap();
    assert!(result.normalized.ends_with("\u{1F468}\u{200D}\u{1F4BB}"));
}

#[test]
fn mixed_script_label_reports_illegal_mixture() {
    let err = process("a\u{3BE}").unwrap_err();
    assert!(matches!(
        err,
        Error::Disallowed(DisallowedSequence::IllegalMixture { .. })
    ));
}

#[test]
fn disallowed_control_character_is_rejected() {
    let err = process("a\u{1}b").unwrap_err();
    assert!(matches!(
        err,
        Error::Disallowed(DisallowedSequence::DisallowedCharacter { .. })
    ));
}

#[test]
fn two_distinct_confusable_sets_fail() {
    // Cyrillic а (0x430) and ѕ (0x455), each the "confused" half of a
    // distinct whole-script confusable target.
    let err = process("\u{430}\u{455}").unwrap_err();
    assert!(matches!(
        err,
        Error::Disallowed(DisallowedSequence::WholeScriptConfusable { .. })
    ));
}

#[test]
fn process_output_is_nfc() {
    // a + combining macron decomposed input normalizes to the precomposed form.
    let result = process("a\u{304}").unwrap();
    assert_eq!(result.normalized, "\u{101}");
}

#[test]
fn hebrew_nsm_run_at_exactly_the_cap_succeeds() {
    // Hebrew caps non-spacing marks at 2 per run; aleph + two niqqud points.
    let result = process("\u{5D0}\u{5B0}\u{5B1}").unwrap();
    assert_eq!(result.normalized, "\u{5D0}\u{5B0}\u{5B1}");
}

#[test]
fn hebrew_nsm_run_over_the_cap_fails() {
    let err = process("\u{5D0}\u{5B0}\u{5B1}\u{5B2}").unwrap_err();
    assert!(matches!(err, Error::Curable(CurableError::ExcessiveNsm { .. })));
}

#[test]
fn nsm_directly_after_a_fenced_character_fails() {
    // Hebrew geresh (U+05F3) is both a valid Hebrew letter and fenced;
    // a niqqud point right after it has no base to attach to.
    let err = process("\u{5D0}\u{5F3}\u{5B0}").unwrap_err();
    assert!(matches!(err, Error::Curable(CurableError::NsmAfterFenced { .. })));
}

#[test]
fn normalize_twice_is_idempotent() {
    let first = process("Nick.ETH").unwrap().normalized;
    let second = process(&first).unwrap().normalized;
    assert_eq!(first, second);
}
