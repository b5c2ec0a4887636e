//! Script-group resolution and whole-script confusable detection
//! (spec.md §4.4, steps 8 and 10), generalizing the reference
//! `groups_for_cps`/`check_whole` iterative-intersection approach.

use crate::error::DisallowedSequence;
use crate::tables::{self, Group};
use crate::types::CodePoint;

/// Resolves the single script group that admits every code point in `cps`,
/// narrowing a candidate set one code point at a time.
///
/// The first code point that belongs to no group at all is a
/// `DisallowedCharacter`. A later code point that *does* belong to some
/// group, but not to any group still in the surviving candidate set, is an
/// `IllegalMixture` between the group the label had committed to and the
/// group that code point actually belongs to.
pub fn resolve_group(cps: &[CodePoint]) -> Result<&'static Group, DisallowedSequence> {
    let groups = &tables::spec().groups;
    let mut candidates: Vec<&'static Group> = groups.iter().collect();

    for (index, cp) in cps.iter().enumerate() {
        let owning: Vec<&'static Group> = groups.iter().filter(|g| g.valid.contains(cp)).collect();
        if owning.is_empty() {
            return Err(DisallowedSequence::DisallowedCharacter { cp: *cp, index });
        }

        let narrowed: Vec<&'static Group> = candidates
            .iter()
            .copied()
            .filter(|g| g.valid.contains(cp))
            .collect();

        if narrowed.is_empty() {
            return Err(DisallowedSequence::IllegalMixture {
                group1: candidates[0].name.clone(),
                group2: owning[0].name.clone(),
                cp: *cp,
            });
        }
        candidates = narrowed;
    }

    // An empty `cps` (all-ignored label) resolves to nothing meaningful;
    // callers only reach here with at least one code point (non_empty has
    // already run).
    candidates
        .into_iter()
        .next()
        .ok_or(DisallowedSequence::EmptyLabel)
}

/// Detects whole-script confusables: a label is confusable if its unique
/// code points touch (via either half) two or more distinct confusable
/// sets, and at least one of those touches lands in a "confused" half —
/// since that's what lets the label be read as two different familiar
/// words depending on which script the reader assumes. A set counts as
/// touched through its `valid` half too: sharing a "looks like Latin a"
/// member of one set and a confused member of a second set is exactly the
/// ambiguity this rule exists to catch, not just two confused-half hits.
pub fn check_whole_confusable(unique_cps: &[CodePoint]) -> Result<(), DisallowedSequence> {
    let mut touched: Vec<&str> = Vec::new();
    let mut any_confused = false;
    for (target, valid, confused) in &tables::spec().wholes {
        let touches_confused = unique_cps.iter().any(|cp| confused.contains(cp));
        let touches_valid = unique_cps.iter().any(|cp| valid.contains(cp));
        if touches_confused || touches_valid {
            touched.push(target.as_str());
            any_confused |= touches_confused;
        }
    }
    if touched.len() >= 2 && any_confused {
        return Err(DisallowedSequence::WholeScriptConfusable {
            set1: touched[0].to_string(),
            set2: touched[1].to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_pure_latin_label() {
        let cps: Vec<CodePoint> = "hello".chars().map(|c| c as CodePoint).collect();
        let group = resolve_group(&cps).unwrap();
        assert_eq!(group.name, "Latin");
    }

    #[test]
    fn unassigned_codepoint_is_disallowed() {
        let err = resolve_group(&[0x0001]).unwrap_err();
        assert_eq!(
            err,
            DisallowedSequence::DisallowedCharacter {
                cp: 0x0001,
                index: 0
            }
        );
    }

    #[test]
    fn mixing_latin_and_greek_is_illegal_mixture() {
        // 'a' (Latin) then Greek xi 0x3BE.
        let err = resolve_group(&[0x61, 0x3BE]).unwrap_err();
        match err {
            DisallowedSequence::IllegalMixture { group1, group2, cp } => {
                assert_eq!(group1, "Latin");
                assert_eq!(group2, "Greek");
                assert_eq!(cp, 0x3BE);
            }
            other => panic!("expected IllegalMixture, got {other:?}"),
        }
    }

    #[test]
    fn single_confusable_letter_passes() {
        // Cyrillic е (0x435) alone intersects only the "e" confusable set.
        assert!(check_whole_confusable(&[0x435]).is_ok());
    }

    #[test]
    fn two_confusable_letters_from_distinct_sets_fail() {
        // Cyrillic а (0x430, "a") and ѕ (0x455, "s") together hit two sets.
        let err = check_whole_confusable(&[0x430, 0x455]).unwrap_err();
        assert!(matches!(
            err,
            DisallowedSequence::WholeScriptConfusable { .. }
        ));
    }

    #[test]
    fn valid_half_of_one_set_plus_confused_half_of_another_fails() {
        // ASCII 'a' (0x61) is the *valid* half of the "a" set; Cyrillic ѕ
        // (0x455) is the *confused* half of the "s" set. Two distinct sets
        // touched, one of them through its confused half.
        let err = check_whole_confusable(&[0x61, 0x455]).unwrap_err();
        assert!(matches!(
            err,
            DisallowedSequence::WholeScriptConfusable { .. }
        ));
    }

    #[test]
    fn single_set_touched_through_both_halves_still_passes() {
        // ASCII 'a' (valid half of "a") plus Cyrillic а (confused half of
        // the *same* "a" set) — only one set is touched, so this is fine.
        assert!(check_whole_confusable(&[0x61, 0x430]).is_ok());
    }
}
