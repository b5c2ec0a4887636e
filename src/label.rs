//! Splits a tokenized name into labels on `Stop` tokens, generalizing the
//! reference `TokenizedName::iter_labels`/`TokenizedLabel` shape.

use crate::tokenizer::Token;
use crate::types::CodePoint;

/// A borrowed slice of one label's tokens — the tokens between two `Stop`
/// tokens, or between an edge of the name and the nearest `Stop`.
#[derive(Debug, Clone, Copy)]
pub struct Label<'a> {
    pub tokens: &'a [Token],
}

impl<'a> Label<'a> {
    pub fn is_fully_emoji(&self) -> bool {
        !self.tokens.is_empty() && self.tokens.iter().all(Token::is_emoji)
    }

    pub fn is_fully_ascii(&self) -> bool {
        self.cps().iter().all(|cp| *cp < 0x80)
    }

    /// Every code point this label contributes once mapping/NFC/emoji
    /// resolution are applied — Ignored tokens contribute nothing.
    pub fn cps(&self) -> Vec<CodePoint> {
        self.tokens.iter().flat_map(Token::cps).collect()
    }

    /// True if the label has at least one token that isn't purely ignored
    /// (an all-ignored-characters label is still "empty" per spec.md §4.4).
    pub fn has_content(&self) -> bool {
        self.tokens.iter().any(|t| !matches!(t, Token::Ignored(_)))
    }

    /// 0-based code-point index, in the *original* input, of this label's
    /// first token — used to make per-label error indices absolute.
    pub fn origin(&self) -> usize {
        self.tokens.first().map(Token::origin).unwrap_or(0)
    }
}

/// Splits a whole tokenized name into its labels on `Stop` tokens.
pub fn split_into_labels(tokens: &[Token]) -> Vec<Label<'_>> {
    tokens
        .split(|t| t.is_stop())
        .map(|tokens| Label { tokens })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;
    use crate::types::str_to_cps;

    #[test]
    fn splits_on_dots() {
        let tokens = tokenize(&str_to_cps("eth.foo"), true);
        let labels = split_into_labels(&tokens);
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].cps(), str_to_cps("eth"));
        assert_eq!(labels[1].cps(), str_to_cps("foo"));
    }

    #[test]
    fn leading_and_trailing_dots_produce_empty_labels() {
        let tokens = tokenize(&str_to_cps(".a."), true);
        let labels = split_into_labels(&tokens);
        assert_eq!(labels.len(), 3);
        assert!(!labels[0].has_content());
        assert!(labels[1].has_content());
        assert!(!labels[2].has_content());
    }
}
