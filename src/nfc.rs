//! Canonical Unicode normalization (NFD/NFC), generalized from the table
//! lookups of `tables::nfc()` plus the algorithmic Hangul syllable
//! (de)composition of UAX #15 that a table-driven approach can't express
//! (the Hangul syllable space is too large to enumerate).

use crate::tables::{self, HangulConstants};
use crate::types::CodePoint;
use std::cmp::min;

fn combining_class(cp: CodePoint) -> u8 {
    tables::nfc().combining_class.get(&cp).copied().unwrap_or(0)
}

fn is_starter(cp: CodePoint) -> bool {
    combining_class(cp) == 0
}

fn hangul_decompose(cp: CodePoint, h: &HangulConstants) -> Option<[CodePoint; 3]> {
    if cp < h.s_base {
        return None;
    }
    let s_index = cp.checked_sub(h.s_base)?;
    if s_index >= h.l_count * h.v_count_t_count() {
        return None;
    }
    let l = h.l_base + s_index / h.v_count_t_count();
    let v = h.v_base + (s_index % h.v_count_t_count()) / h.t_count;
    let t_index = s_index % h.t_count;
    if t_index == 0 {
        Some([l, v, 0])
    } else {
        Some([l, v, h.t_base + t_index])
    }
}

fn hangul_compose_lv(l: CodePoint, v: CodePoint, h: &HangulConstants) -> Option<CodePoint> {
    if l < h.l_base || l >= h.l_base + h.l_count {
        return None;
    }
    if v < h.v_base || v >= h.v_base + h.v_count {
        return None;
    }
    let l_index = l - h.l_base;
    let v_index = v - h.v_base;
    Some(h.s_base + (l_index * h.v_count + v_index) * h.t_count)
}

fn hangul_compose_lvt(lv: CodePoint, t: CodePoint, h: &HangulConstants) -> Option<CodePoint> {
    if t <= h.t_base || t >= h.t_base + h.t_count {
        return None;
    }
    if lv < h.s_base {
        return None;
    }
    let s_index = lv - h.s_base;
    if s_index % h.t_count != 0 || s_index >= h.l_count * h.v_count_t_count() {
        return None;
    }
    Some(lv + (t - h.t_base))
}

/// Recursively decomposes a single code point into its canonical
/// decomposition, table-driven for everything but Hangul syllables, which
/// expand algorithmically.
pub fn decompose(cp: CodePoint) -> Vec<CodePoint> {
    let h = &tables::nfc().hangul;
    if let Some(jamo) = hangul_decompose(cp, h) {
        return jamo.into_iter().filter(|cp| *cp != 0).collect();
    }
    match tables::nfc().decomp.get(&cp) {
        None => vec![cp],
        Some(mapping) => mapping.iter().copied().flat_map(decompose).collect(),
    }
}

/// Decomposes and canonically reorders a code-point sequence (NFD).
/// Reordering is a stable sort of each maximal run of non-starters by
/// combining class (UAX #15 canonical ordering).
pub fn to_nfd(cps: &[CodePoint]) -> Vec<CodePoint> {
    let mut decomposed: Vec<CodePoint> = cps.iter().copied().flat_map(decompose).collect();
    let mut pos = 0;
    while pos < decomposed.len() {
        let next_starter_offset = decomposed[pos..]
            .iter()
            .skip(1)
            .position(|cp| is_starter(*cp))
            .map(|offset| offset + 1)
            .unwrap_or(decomposed.len() - pos);
        decomposed[pos..(pos + next_starter_offset)]
            .sort_by(|a, b| combining_class(*a).cmp(&combining_class(*b)));
        pos += next_starter_offset;
    }
    decomposed
}

/// Canonically composes a code-point sequence (NFC): decompose to NFD, then
/// greedily recombine starter/combining-mark pairs that aren't blocked by an
/// intervening mark of equal or higher combining class.
pub fn to_nfc(cps: &[CodePoint]) -> Vec<CodePoint> {
    let h = &tables::nfc().hangul;
    let composites = &tables::nfc().composites;
    let mut nfd = to_nfd(cps);
    let mut pos = 0;
    let mut try_compose = true;
    loop {
        if try_compose {
            try_compose = false;
            let char_seq_end = nfd[pos..]
                .iter()
                .skip(1)
                .position(|cp| is_starter(*cp))
                .map(|offset| min(offset + 2, nfd.len() - pos))
                .unwrap_or(nfd.len() - pos);

            let mut last_ccc = 0;
            for i in 1..char_seq_end {
                let ccc = combining_class(nfd[pos + i]);
                let composite = hangul_compose_lv(nfd[pos], nfd[pos + i], h)
                    .or_else(|| hangul_compose_lvt(nfd[pos], nfd[pos + i], h))
                    .or_else(|| composites.get(&(nfd[pos], nfd[pos + i])).copied());
                if let Some(composite) = composite {
                    if ccc > 0 && ccc == last_ccc {
                        break;
                    }
                    if ccc < last_ccc {
                        break;
                    }
                    nfd[pos] = composite;
                    nfd.remove(pos + i);
                    try_compose = true;
                    break;
                } else {
                    last_ccc = ccc;
                }
            }
        } else {
            match nfd[pos..]
                .iter()
                .skip(1)
                .position(|cp| is_starter(*cp))
                .map(|offset| offset + 1)
            {
                Some(offset) => {
                    pos += offset;
                    try_compose = true;
                }
                None => break,
            }
        }
    }
    nfd
}

/// Whether a run of code points contains anything that might not already be
/// in NFC — the cheap pre-check that lets the tokenizer skip the NFC pass
/// for runs of plain ASCII/Valid code points.
pub fn requires_nfc_check(cps: &[CodePoint]) -> bool {
    cps.iter().any(|cp| tables::spec().nfc_check.contains(cp))
}
