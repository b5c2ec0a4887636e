//! The fixed-order label validation chain (spec.md §4.4), generalizing the
//! reference `validate_label` pipeline: empty check, emoji shortcut,
//! underscore rule, ASCII shortcut + label-extension rule, fenced rule,
//! combining-mark positional rules, script-group resolution, per-script
//! NSM caps, and whole-script confusable detection.

use crate::error::{CurableError, DisallowedSequence, Error};
use crate::groups;
use crate::label::Label;
use crate::nfc;
use crate::tables::{self, Group};
use crate::tokenizer::Token;
use crate::types::{cps_to_string, CodePoint};

const UNDERSCORE: CodePoint = 0x5F;
const HYPHEN: CodePoint = 0x2D;

/// The script-group identity a label was resolved to, kept `pub(crate)` so
/// the emitter and tests can distinguish labels without re-tokenizing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelType {
    Ascii,
    Emoji,
    Group(String),
}

#[derive(Debug, Clone)]
pub struct ValidatedLabel {
    pub tokens: Vec<Token>,
    pub label_type: LabelType,
}

pub fn validate_label(label: &Label<'_>) -> Result<ValidatedLabel, Error> {
    if !label.has_content() {
        return Err(Error::Disallowed(DisallowedSequence::EmptyLabel));
    }

    check_disallowed(label)?;

    if label.is_fully_emoji() {
        return Ok(ValidatedLabel {
            tokens: label.tokens.to_vec(),
            label_type: LabelType::Emoji,
        });
    }

    let expanded = expand(label);
    check_underscore(&expanded)?;

    if label.is_fully_ascii() {
        check_label_extension(&expanded)?;
        return Ok(ValidatedLabel {
            tokens: label.tokens.to_vec(),
            label_type: LabelType::Ascii,
        });
    }

    check_fenced(&expanded)?;
    check_cm_position(label)?;

    let cps: Vec<CodePoint> = expanded.iter().map(|(cp, _)| *cp).collect();
    let group = groups::resolve_group(&cps).map_err(Error::Disallowed)?;

    check_cm_allowed(&expanded, group)?;
    check_nsm(label, group)?;

    let mut unique = cps.clone();
    unique.sort_unstable();
    unique.dedup();
    groups::check_whole_confusable(&unique).map_err(Error::Disallowed)?;

    Ok(ValidatedLabel {
        tokens: label.tokens.to_vec(),
        label_type: LabelType::Group(group.name.clone()),
    })
}

/// Expands a label's tokens into `(code point, original-input index)`
/// pairs. Every code point a token produces (through mapping or NFC) is
/// attributed to that token's own origin, since finer-grained attribution
/// isn't recoverable once a token has expanded or merged input code points.
fn expand(label: &Label<'_>) -> Vec<(CodePoint, usize)> {
    label
        .tokens
        .iter()
        .flat_map(|t| {
            let origin = t.origin();
            t.cps().into_iter().map(move |cp| (cp, origin))
        })
        .collect()
}

/// Any `Token::Disallowed` fails the label outright (spec.md §4.4 step 2),
/// ahead of the emoji and ASCII shortcuts — a disallowed code point can be
/// ASCII (a control character, `!`, a space) and must not slip through
/// `is_fully_ascii`'s "every code point is < 0x80" check, which says
/// nothing about whether those code points are actually allowed.
fn check_disallowed(label: &Label<'_>) -> Result<(), Error> {
    for token in label.tokens {
        if let Token::Disallowed(t) = token {
            return Err(Error::Disallowed(DisallowedSequence::DisallowedCharacter {
                cp: t.cp,
                index: t.origin,
            }));
        }
    }
    Ok(())
}

fn check_underscore(expanded: &[(CodePoint, usize)]) -> Result<(), Error> {
    let leading = expanded
        .iter()
        .take_while(|(cp, _)| *cp == UNDERSCORE)
        .count();
    if let Some((_, index)) = expanded[leading..].iter().find(|(cp, _)| *cp == UNDERSCORE) {
        return Err(Error::Curable(CurableError::UnderscoreInMiddle {
            index: *index,
        }));
    }
    Ok(())
}

fn check_label_extension(expanded: &[(CodePoint, usize)]) -> Result<(), Error> {
    if expanded.get(2).map(|(cp, _)| *cp) == Some(HYPHEN)
        && expanded.get(3).map(|(cp, _)| *cp) == Some(HYPHEN)
    {
        return Err(Error::Curable(CurableError::InvalidLabelExtension {
            index: expanded[2].1,
        }));
    }
    Ok(())
}

fn check_fenced(expanded: &[(CodePoint, usize)]) -> Result<(), Error> {
    let fenced = &tables::spec().fenced;

    if let Some((cp, index)) = expanded.first() {
        if fenced.contains_key(cp) {
            return Err(Error::Curable(CurableError::FencedLeading {
                index: *index,
                sequence: cps_to_string(&[*cp]),
            }));
        }
    }
    if let Some((cp, index)) = expanded.last() {
        if fenced.contains_key(cp) {
            return Err(Error::Curable(CurableError::FencedTrailing {
                index: *index,
                sequence: cps_to_string(&[*cp]),
            }));
        }
    }
    for window in expanded.windows(2) {
        let (one, two) = (window[0].0, window[1].0);
        if fenced.contains_key(&one) && fenced.contains_key(&two) {
            return Err(Error::Curable(CurableError::FencedAdjacent {
                index: window[0].1,
                sequence: cps_to_string(&[one, two]),
            }));
        }
    }
    Ok(())
}

/// A combining mark may not open a label, and may not immediately follow
/// an emoji token (no visual base character to attach to in either case).
fn check_cm_position(label: &Label<'_>) -> Result<(), Error> {
    let cm = &tables::spec().cm;
    for (i, token) in label.tokens.iter().enumerate() {
        if matches!(token, Token::Emoji(_) | Token::Stop(_) | Token::Ignored(_)) {
            continue;
        }
        let Some(first_cp) = token.cps().first().copied() else {
            continue;
        };
        if !cm.contains(&first_cp) {
            continue;
        }
        if i == 0 {
            return Err(Error::Curable(CurableError::LeadingCombiningMark {
                index: token.origin(),
                sequence: cps_to_string(&[first_cp]),
            }));
        }
        if label.tokens[i - 1].is_emoji() {
            return Err(Error::Curable(CurableError::CombiningMarkAfterEmoji {
                index: token.origin(),
                sequence: cps_to_string(&[first_cp]),
            }));
        }
    }
    Ok(())
}

/// A combining mark outside the resolved group's allowed set is disallowed
/// for that script, even though it's a combining mark in general.
fn check_cm_allowed(expanded: &[(CodePoint, usize)], group: &Group) -> Result<(), Error> {
    let cm = &tables::spec().cm;
    for (cp, index) in expanded {
        if cm.contains(cp) && !group.cm.contains(cp) {
            return Err(Error::Curable(CurableError::DisallowedCombiningMark {
                index: *index,
                sequence: cps_to_string(&[*cp]),
            }));
        }
    }
    Ok(())
}

/// Which kind of token immediately preceded a decomposed run's first code
/// point, for the "NSM must not follow an emoji or fenced character" rule.
#[derive(Clone, Copy, PartialEq, Eq)]
enum PrecedingToken {
    None,
    Emoji,
    Fenced,
}

/// Non-spacing mark count/duplication/position rules (spec.md §4.4 step 9),
/// applied to the label's NFD-decomposed code points (so a precomposed
/// character's underlying marks are checked too) while still tracking, per
/// original code point, whether it came from an emoji token or is itself a
/// fenced character — consecutive Valid/Mapped tokens are coalesced upstream
/// into one multi-codepoint token, so this can't be answered at the token
/// granularity alone. Indices here are positions within the decomposed
/// sequence, not the original input, since decomposition can introduce or
/// reorder marks with no 1:1 input correspondence.
/// Devanagari matras and Thai vowel signs are dependent marks that must
/// attach to a preceding consonant, unlike the generic non-spacing marks
/// of other scripts (spec.md §4.4 step 7).
fn requires_consonant_base(group_name: &str) -> bool {
    matches!(group_name, "Devanagari" | "Thai")
}

fn check_nsm(label: &Label<'_>, group: &Group) -> Result<(), Error> {
    let nsm = &tables::spec().nsm;
    let fenced = &tables::spec().fenced;
    let cap = group.nsm_max.unwrap_or(tables::spec().nsm_max);

    // Tracked per *original* code point, not per token: the tokenizer
    // coalesces consecutive Valid/Mapped tokens into one multi-codepoint
    // token, so a fenced character and a following mark can share a single
    // token even though they're logically adjacent input characters.
    let mut decomposed: Vec<CodePoint> = Vec::new();
    let mut preceding: Vec<PrecedingToken> = Vec::new();
    let mut prev = PrecedingToken::None;

    for token in label.tokens {
        if matches!(token, Token::Stop(_) | Token::Ignored(_)) {
            continue;
        }
        let is_emoji = token.is_emoji();
        for cp in token.cps() {
            let nfd = nfc::to_nfd(&[cp]);
            for (i, out) in nfd.iter().enumerate() {
                decomposed.push(*out);
                preceding.push(if i == 0 { prev } else { PrecedingToken::None });
            }
            prev = if is_emoji {
                PrecedingToken::Emoji
            } else if fenced.contains_key(&cp) {
                PrecedingToken::Fenced
            } else {
                PrecedingToken::None
            };
        }
    }

    let mut i = 0;
    while i < decomposed.len() {
        if nsm.contains(&decomposed[i]) {
            if i == 0 {
                return Err(Error::Curable(CurableError::LeadingNsm { index: i }));
            }
            match preceding[i] {
                PrecedingToken::Emoji => {
                    return Err(Error::Curable(CurableError::NsmAfterEmoji { index: i }))
                }
                PrecedingToken::Fenced => {
                    return Err(Error::Curable(CurableError::NsmAfterFenced { index: i }))
                }
                PrecedingToken::None => {}
            }
            if requires_consonant_base(&group.name) && !group.primary.contains(&decomposed[i - 1])
            {
                return Err(Error::Curable(CurableError::NsmNotAfterConsonant {
                    index: i,
                    sequence: cps_to_string(&[decomposed[i]]),
                }));
            }
            let mut j = i;
            while j < decomposed.len() && nsm.contains(&decomposed[j]) {
                if j - i + 1 > cap {
                    return Err(Error::Curable(CurableError::ExcessiveNsm { index: i }));
                }
                if !group.cm.contains(&decomposed[j]) {
                    return Err(Error::Curable(CurableError::DisallowedNsmScript {
                        index: j,
                        sequence: cps_to_string(&[decomposed[j]]),
                    }));
                }
                for k in i..j {
                    if decomposed[k] == decomposed[j] {
                        return Err(Error::Curable(CurableError::DuplicateNsm {
                            index: j,
                            sequence: cps_to_string(&[decomposed[j]]),
                        }));
                    }
                }
                j += 1;
            }
            i = j;
        } else {
            i += 1;
        }
    }
    Ok(())
}
