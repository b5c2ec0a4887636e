//! The error taxonomy produced by the validator (spec.md §7).
//!
//! Errors are not recovered internally: the first failure wins and the
//! pipeline aborts. The position reported in `index` is the code-point
//! index within the original input, after UTF-8 decoding but before
//! mapping/NFC.

use thiserror::Error;

/// A curable, positional defect: a local problem with a specific
/// subsequence of the label, reported with its offending index.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurableError {
    #[error("underscore follows a non-underscore character at position {index}")]
    UnderscoreInMiddle { index: usize },

    #[error("ASCII label has '-' at positions 3 and 4")]
    InvalidLabelExtension { index: usize },

    #[error("fenced character '{sequence}' may not lead a label")]
    FencedLeading { index: usize, sequence: String },

    #[error("fenced character '{sequence}' may not trail a label")]
    FencedTrailing { index: usize, sequence: String },

    #[error("fenced characters '{sequence}' may not be adjacent")]
    FencedAdjacent { index: usize, sequence: String },

    #[error("combining mark '{sequence}' may not begin a label")]
    LeadingCombiningMark { index: usize, sequence: String },

    #[error("combining mark '{sequence}' may not follow an emoji")]
    CombiningMarkAfterEmoji { index: usize, sequence: String },

    #[error("combining mark '{sequence}' is not allowed in this script group")]
    DisallowedCombiningMark { index: usize, sequence: String },

    #[error("more than the allowed number of non-spacing marks at position {index}")]
    ExcessiveNsm { index: usize },

    #[error("duplicate non-spacing mark '{sequence}' at position {index}")]
    DuplicateNsm { index: usize, sequence: String },

    #[error("a non-spacing mark may not begin a label")]
    LeadingNsm { index: usize },

    #[error("a non-spacing mark may not follow an emoji")]
    NsmAfterEmoji { index: usize },

    #[error("a non-spacing mark may not follow a fenced character")]
    NsmAfterFenced { index: usize },

    #[error("non-spacing mark '{sequence}' is not allowed in this script group")]
    DisallowedNsmScript { index: usize, sequence: String },

    #[error("dependent vowel sign '{sequence}' must follow a consonant")]
    NsmNotAfterConsonant { index: usize, sequence: String },
}

/// A structural defect in the whole name/label, not tied to a single
/// offending character.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisallowedSequence {
    #[error("label is empty")]
    EmptyLabel,

    #[error("code point U+{cp:04X} at position {index} belongs to no script group")]
    DisallowedCharacter { cp: u32, index: usize },

    #[error("illegal mixture of {group1} and {group2} at U+{cp:04X}")]
    IllegalMixture {
        group1: String,
        group2: String,
        cp: u32,
    },

    #[error("whole-script confusable between {set1} and {set2}")]
    WholeScriptConfusable { set1: String, set2: String },
}

/// The top-level error returned by `normalize`, `beautify`, and `process`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Curable(#[from] CurableError),

    #[error(transparent)]
    Disallowed(#[from] DisallowedSequence),

    #[error("invalid UTF-8 at byte {0}")]
    InvalidUtf8(usize),
}

pub type Result<T> = std::result::Result<T, Error>;
