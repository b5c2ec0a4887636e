//! Joins validated labels back into output strings (spec.md §4.5):
//! `normalize` uses each token's plain normalized form (emoji without
//! FE0F); `beautify` reinserts FE0F into emoji and substitutes small-xi
//! for capital-Xi in any label whose script group isn't Greek.

use crate::tokenizer::Token;
use crate::types::{cps_to_string, CodePoint};
use crate::validate::{LabelType, ValidatedLabel};

const SMALL_XI: CodePoint = 0x3BE;
const CAPITAL_XI: CodePoint = 0x39E;
const STOP: CodePoint = 0x2E;

pub fn emit_normalized(labels: &[ValidatedLabel]) -> String {
    let parts: Vec<String> = labels
        .iter()
        .map(|label| {
            let cps: Vec<CodePoint> = label.tokens.iter().flat_map(Token::cps).collect();
            cps_to_string(&cps)
        })
        .collect();
    parts.join(&cps_to_string(&[STOP]))
}

pub fn emit_beautified(labels: &[ValidatedLabel]) -> String {
    let parts: Vec<String> = labels
        .iter()
        .map(|label| {
            let substitute_xi = !matches!(&label.label_type, LabelType::Group(name) if name == "Greek");
            let cps: Vec<CodePoint> = label
                .tokens
                .iter()
                .flat_map(|t| beautify_token_cps(t, substitute_xi))
                .collect();
            cps_to_string(&cps)
        })
        .collect();
    parts.join(&cps_to_string(&[STOP]))
}

fn beautify_token_cps(token: &Token, substitute_xi: bool) -> Vec<CodePoint> {
    if let Token::Emoji(t) = token {
        return t.canonical.clone();
    }
    let mut cps = token.cps();
    if substitute_xi {
        for cp in cps.iter_mut() {
            if *cp == SMALL_XI {
                *cp = CAPITAL_XI;
            }
        }
    }
    cps
}
