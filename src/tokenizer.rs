//! Splits raw input into a flat token stream: stop markers, valid/mapped
//! text runs, ignored characters, disallowed characters, emoji, and NFC
//! runs — generalizing the token model and pipeline shape of the
//! ENSIP-15 reference tokenizer (longest-match emoji first, then per-code-point
//! classification, then an optional NFC pass, then adjacent-Valid coalescing).

use crate::emoji::EmojiTrie;
use crate::nfc;
use crate::tables;
use crate::types::CodePoint;
use lazy_static::lazy_static;

const STOP: CodePoint = 0x2E; // '.'

lazy_static! {
    static ref EMOJI_TRIE: EmojiTrie = EmojiTrie::from_sequences(tables::spec().emoji.iter());
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenValid {
    pub cps: Vec<CodePoint>,
    pub origin: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenMapped {
    pub cp: CodePoint,
    pub cps: Vec<CodePoint>,
    pub origin: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenIgnored {
    pub cp: CodePoint,
    pub origin: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenDisallowed {
    pub cp: CodePoint,
    pub origin: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenStop {
    pub origin: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenEmoji {
    /// The raw input code points (FE0F as typed by the caller).
    pub input: Vec<CodePoint>,
    /// The canonical, FE0F-bearing form — used for beautify.
    pub canonical: Vec<CodePoint>,
    /// The canonical form with FE0F stripped — used for normalize.
    pub no_fe0f: Vec<CodePoint>,
    pub origin: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenNfc {
    pub input: Vec<CodePoint>,
    pub cps: Vec<CodePoint>,
    pub origin: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Valid(TokenValid),
    Mapped(TokenMapped),
    Ignored(TokenIgnored),
    Disallowed(TokenDisallowed),
    Stop(TokenStop),
    Emoji(TokenEmoji),
    Nfc(TokenNfc),
}

impl Token {
    /// The code points this token contributes to a normalized/validated
    /// label. Ignored tokens contribute nothing; Disallowed and Stop carry
    /// their code point only for diagnostics, not for emission.
    pub fn cps(&self) -> Vec<CodePoint> {
        match self {
            Token::Valid(t) => t.cps.clone(),
            Token::Mapped(t) => t.cps.clone(),
            Token::Ignored(_) => vec![],
            Token::Disallowed(t) => vec![t.cp],
            Token::Stop(_) => vec![STOP],
            Token::Emoji(t) => t.no_fe0f.clone(),
            Token::Nfc(t) => t.cps.clone(),
        }
    }

    /// 0-based code-point index into the *original* input at which this
    /// token begins, used for error reporting.
    pub fn origin(&self) -> usize {
        match self {
            Token::Valid(t) => t.origin,
            Token::Mapped(t) => t.origin,
            Token::Ignored(t) => t.origin,
            Token::Disallowed(t) => t.origin,
            Token::Stop(t) => t.origin,
            Token::Emoji(t) => t.origin,
            Token::Nfc(t) => t.origin,
        }
    }

    pub fn is_stop(&self) -> bool {
        matches!(self, Token::Stop(_))
    }

    pub fn is_emoji(&self) -> bool {
        matches!(self, Token::Emoji(_))
    }

    pub fn is_disallowed(&self) -> bool {
        matches!(self, Token::Disallowed(_))
    }
}

/// Tokenizes a whole name (the full caller-supplied string, dots included).
pub fn tokenize(cps: &[CodePoint], apply_nfc: bool) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < cps.len() {
        if let Some(m) = EMOJI_TRIE.longest_match(&cps[i..]) {
            tokens.push(Token::Emoji(TokenEmoji {
                input: cps[i..i + m.consumed].to_vec(),
                canonical: m.canonical,
                no_fe0f: m.no_fe0f,
                origin: i,
            }));
            i += m.consumed;
        } else {
            tokens.push(classify(cps[i], i));
            i += 1;
        }
    }
    if apply_nfc {
        apply_nfc_pass(&mut tokens);
    }
    coalesce_valid(&mut tokens);
    tokens
}

fn classify(cp: CodePoint, origin: usize) -> Token {
    let spec = tables::spec();
    if cp == STOP {
        Token::Stop(TokenStop { origin })
    } else if (0x41..=0x5A).contains(&cp) {
        // ASCII uppercase is a fast-path mapping to lowercase; it never
        // needs a table lookup.
        Token::Mapped(TokenMapped {
            cp,
            cps: vec![cp + 0x20],
            origin,
        })
    } else if let Some(to) = spec.mapped.get(&cp) {
        Token::Mapped(TokenMapped {
            cp,
            cps: to.clone(),
            origin,
        })
    } else if spec.ignored.contains(&cp) {
        Token::Ignored(TokenIgnored { cp, origin })
    } else if spec.valid.contains(&cp) {
        Token::Valid(TokenValid {
            cps: vec![cp],
            origin,
        })
    } else {
        Token::Disallowed(TokenDisallowed { cp, origin })
    }
}

/// Finds maximal runs of Valid/Mapped tokens that need NFC normalization —
/// including the run's leading tokens that don't themselves need checking,
/// since a preceding base character plus a following combining mark must be
/// composed together — and splices each such run into a single `Nfc` token
/// when normalizing it actually changes anything. Ignored tokens inside a
/// run are dropped from the composed input but don't break the run.
fn apply_nfc_pass(tokens: &mut Vec<Token>) {
    let mut i = 0;
    let mut start: Option<usize> = None;
    while i < tokens.len() {
        let cps = match &tokens[i] {
            Token::Valid(t) => Some(&t.cps),
            Token::Mapped(t) => Some(&t.cps),
            Token::Ignored(_) => None,
            _ => {
                start = None;
                i += 1;
                continue;
            }
        };
        let Some(cps) = cps else {
            // Ignored token: leave `start` as-is, it doesn't break a run.
            i += 1;
            continue;
        };

        if !nfc::requires_nfc_check(cps) {
            start = Some(i);
            i += 1;
            continue;
        }

        let s = start.unwrap_or(i);
        let mut end = i + 1;
        while matches!(
            tokens.get(end),
            Some(Token::Valid(_)) | Some(Token::Mapped(_)) | Some(Token::Ignored(_))
        ) {
            end += 1;
        }
        while end > s && matches!(tokens.get(end - 1), Some(Token::Ignored(_))) {
            end -= 1;
        }

        let origin = tokens[s].origin();
        let input: Vec<CodePoint> = tokens[s..end]
            .iter()
            .filter(|t| !matches!(t, Token::Ignored(_)))
            .flat_map(|t| t.cps())
            .collect();
        let composed = nfc::to_nfc(&input);
        start = None;
        if composed == input {
            i = end;
            continue;
        }
        tokens.splice(
            s..end,
            [Token::Nfc(TokenNfc {
                input,
                cps: composed,
                origin,
            })],
        );
        i = s + 1;
    }
}

fn coalesce_valid(tokens: &mut Vec<Token>) {
    let mut i = 0;
    while i < tokens.len() {
        if let Token::Valid(first) = &tokens[i] {
            let mut j = i + 1;
            let mut cps = first.cps.clone();
            let origin = first.origin;
            while let Some(Token::Valid(next)) = tokens.get(j) {
                cps.extend(next.cps.iter());
                j += 1;
            }
            if j > i + 1 {
                tokens.splice(i..j, [Token::Valid(TokenValid { cps, origin })]);
            }
        }
        i += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::str_to_cps;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn tok(input: &str, apply_nfc: bool) -> Vec<Token> {
        tokenize(&str_to_cps(input), apply_nfc)
    }

    #[rstest]
    fn uppercase_is_mapped() {
        let tokens = tok("HELLO", true);
        // Each uppercase letter is its own Mapped token; only Valid runs
        // coalesce, so the text is not merged into one token here.
        assert_eq!(tokens.len(), 5);
        let joined: Vec<CodePoint> = tokens.iter().flat_map(|t| t.cps()).collect();
        assert_eq!(joined, str_to_cps("hello"));
    }

    #[rstest]
    fn single_cp_emoji_without_fe0f() {
        let tokens = tok("\u{1F44D}", true);
        assert_eq!(tokens.len(), 1);
        match &tokens[0] {
            Token::Emoji(t) => {
                assert_eq!(t.no_fe0f, vec![0x1F44D]);
                assert_eq!(t.canonical, vec![0x1F44D, 0xFE0F]);
            }
            other => panic!("expected Emoji token, got {other:?}"),
        }
    }

    #[rstest]
    fn stop_splits_are_preserved_as_tokens() {
        let tokens = tok("a.b", true);
        assert!(tokens.iter().any(|t| t.is_stop()));
    }

    #[rstest]
    fn disallowed_codepoint_is_tagged() {
        // U+0001, a control character belonging to no group and not mapped/ignored.
        let tokens = tok("\u{0001}", true);
        assert_eq!(tokens.len(), 1);
        assert!(tokens[0].is_disallowed());
    }

    #[rstest]
    fn nfc_pass_composes_decomposed_latin() {
        let tokens = tok("a\u{0304}", true);
        assert_eq!(tokens.len(), 1);
        match &tokens[0] {
            Token::Nfc(t) => assert_eq!(t.cps, vec![0x101]),
            other => panic!("expected Nfc token, got {other:?}"),
        }
    }

    #[rstest]
    fn without_nfc_pass_decomposed_latin_stays_as_valid_tokens() {
        let tokens = tok("a\u{0304}", false);
        assert_eq!(tokens.len(), 1);
        match &tokens[0] {
            Token::Valid(t) => assert_eq!(t.cps, vec![0x61, 0x304]),
            other => panic!("expected coalesced Valid token, got {other:?}"),
        }
    }
}
