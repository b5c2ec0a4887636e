//! ENSIP-15 Ethereum Name Service name normalization.
//!
//! Three pure operations over UTF-8 input: [`normalize`], [`beautify`],
//! and [`process`] (which computes both from a single pipeline run). The
//! pipeline is tokenize → NFC → split into labels → validate each label →
//! emit. See [`ffi`] for the C ABI used to embed this outside Rust.

mod emit;
mod error;
pub mod ffi;
mod groups;
mod label;
mod emoji;
mod nfc;
mod tables;
mod tokenizer;
mod types;
mod validate;

pub use error::{CurableError, DisallowedSequence, Error};
pub use types::CodePoint;

use label::split_into_labels;
use tokenizer::tokenize;
use types::str_to_cps;
use validate::{validate_label, ValidatedLabel};

/// Both outputs of one pipeline run over a single input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Processed {
    pub normalized: String,
    pub beautified: String,
}

/// Tunes pipeline behaviour without growing the three-function public API
/// into a pile of boolean parameters. The only caller-visible knob today
/// is `apply_nfc`, which the tokenizer's NFC pass takes directly — useful
/// for exercising tokenization in isolation in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingConfig {
    pub apply_nfc: bool,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        ProcessingConfig { apply_nfc: true }
    }
}

struct Pipeline;

impl Pipeline {
    fn run_with(config: &ProcessingConfig, input: &str) -> Result<Processed, Error> {
        let cps = str_to_cps(input);
        let tokens = tokenize(&cps, config.apply_nfc);
        tracing::trace!(token_count = tokens.len(), "tokenized input");

        let labels = split_into_labels(&tokens);
        tracing::trace!(label_count = labels.len(), "split into labels");

        let validated: Vec<ValidatedLabel> = labels
            .iter()
            .map(validate_label)
            .collect::<Result<_, _>>()
            .inspect_err(|err| tracing::debug!(%err, "label validation failed"))?;

        let normalized = emit::emit_normalized(&validated);
        let beautified = emit::emit_beautified(&validated);
        tracing::debug!(%normalized, "processed name");
        Ok(Processed {
            normalized,
            beautified,
        })
    }
}

/// Normalizes `input` to its canonical ENS form.
#[tracing::instrument(skip(input), fields(len = input.len()))]
pub fn normalize(input: &str) -> Result<String, Error> {
    Pipeline::run_with(&ProcessingConfig::default(), input).map(|p| p.normalized)
}

/// Produces a display variant of `input`: emoji keep their FE0F variation
/// selector and small-xi is shown as capital-Xi outside Greek labels.
#[tracing::instrument(skip(input), fields(len = input.len()))]
pub fn beautify(input: &str) -> Result<String, Error> {
    Pipeline::run_with(&ProcessingConfig::default(), input).map(|p| p.beautified)
}

/// Computes both `normalize` and `beautify` from a single pipeline run.
#[tracing::instrument(skip(input), fields(len = input.len()))]
pub fn process(input: &str) -> Result<Processed, Error> {
    Pipeline::run_with(&ProcessingConfig::default(), input)
}
