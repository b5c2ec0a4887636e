//! Compiled-in lookup tables: the "spec table" and the "NFC table" of
//! spec.md §6, embedded at compile time via `include_str!` so the library
//! needs no filesystem access at runtime.
//!
//! This generalises the `ucd.rs` pattern of one `lazy_static!` per table,
//! each deserialised from JSON, to data embedded directly in the binary.

use lazy_static::lazy_static;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};

const SPEC_JSON: &str = include_str!("spec_data.json");
const NFC_JSON: &str = include_str!("nfc_data.json");

#[derive(Debug, Deserialize)]
struct RawMapped {
    from: u32,
    to: Vec<u32>,
}

#[derive(Debug, Deserialize)]
struct RawFenced {
    cp: u32,
    label: String,
}

#[derive(Debug, Deserialize)]
struct RawGroup {
    name: String,
    primary: Vec<u32>,
    secondary: Vec<u32>,
    cm: Vec<u32>,
    #[serde(default)]
    nsm_max: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RawWhole {
    target: String,
    valid: Vec<u32>,
    confused: Vec<u32>,
}

#[derive(Debug, Deserialize)]
struct RawSpecTable {
    mapped: Vec<RawMapped>,
    ignored: Vec<u32>,
    fenced: Vec<RawFenced>,
    groups: Vec<RawGroup>,
    nsm: Vec<u32>,
    nsm_max: usize,
    cm: Vec<u32>,
    nfc_check: Vec<u32>,
    emoji: Vec<Vec<u32>>,
    wholes: Vec<RawWhole>,
}

#[derive(Debug, Deserialize)]
struct RawDecomp {
    cp: u32,
    to: Vec<u32>,
}

#[derive(Debug, Deserialize)]
struct RawHangul {
    l_base: u32,
    l_count: u32,
    v_base: u32,
    v_count: u32,
    t_base: u32,
    t_count: u32,
    s_base: u32,
}

#[derive(Debug, Deserialize)]
struct RawNfcTable {
    exclusions: Vec<u32>,
    decomp: Vec<RawDecomp>,
    ranks: Vec<(u8, Vec<u32>)>,
    hangul: RawHangul,
}

/// A resolved script group: the union of code points it admits (`valid`,
/// primary ∪ secondary) and the combining marks it permits on top of that.
pub struct Group {
    pub name: String,
    pub valid: HashSet<u32>,
    /// The group's base letters (consonants, in abugida scripts), kept
    /// separate from `valid` so a dependent vowel sign can be checked for
    /// a consonant immediately before it (spec.md §4.4 step 7: Devanagari
    /// matras and Thai vowel signs must follow a consonant).
    pub primary: HashSet<u32>,
    pub cm: HashSet<u32>,
    /// Overrides the spec table's global `nsm_max` for this script (e.g.
    /// Arabic caps at 3, Hebrew and Devanagari at 2); `None` means the
    /// global default applies.
    pub nsm_max: Option<usize>,
}

/// Hangul syllable algorithmic composition/decomposition constants (UAX #15).
pub struct HangulConstants {
    pub l_base: u32,
    pub l_count: u32,
    pub v_base: u32,
    pub v_count: u32,
    pub t_base: u32,
    pub t_count: u32,
    pub s_base: u32,
}

impl HangulConstants {
    pub fn v_count_t_count(&self) -> u32 {
        self.v_count * self.t_count
    }
}

pub struct SpecTable {
    pub mapped: HashMap<u32, Vec<u32>>,
    pub ignored: HashSet<u32>,
    pub fenced: HashMap<u32, String>,
    pub groups: Vec<Group>,
    /// The union of every group's valid set — a code point outside this set
    /// cannot belong to any script group and is disallowed outright.
    pub valid: HashSet<u32>,
    pub nsm: HashSet<u32>,
    pub nsm_max: usize,
    pub cm: HashSet<u32>,
    pub nfc_check: HashSet<u32>,
    /// Emoji sequences, pre-sorted longest-first for greedy longest-match.
    pub emoji: Vec<Vec<u32>>,
    pub wholes: Vec<(String, HashSet<u32>, HashSet<u32>)>,
}

pub struct NfcTable {
    pub exclusions: HashSet<u32>,
    pub decomp: HashMap<u32, Vec<u32>>,
    pub composites: HashMap<(u32, u32), u32>,
    pub combining_class: HashMap<u32, u8>,
    pub hangul: HangulConstants,
}

lazy_static! {
    static ref SPEC: SpecTable = {
        let raw: RawSpecTable =
            serde_json::from_str(SPEC_JSON).expect("embedded spec_data.json must parse");

        let mapped = raw
            .mapped
            .into_iter()
            .map(|m| (m.from, m.to))
            .collect::<HashMap<_, _>>();

        let fenced = raw
            .fenced
            .into_iter()
            .map(|f| (f.cp, f.label))
            .collect::<HashMap<_, _>>();

        let groups: Vec<Group> = raw
            .groups
            .into_iter()
            .map(|g| {
                let cm: HashSet<u32> = g.cm.into_iter().collect();
                let primary: HashSet<u32> = g.primary.iter().copied().collect();
                // A group's combining marks are themselves valid members of
                // that group for tokenizer purposes; their count/position
                // legality is checked later, during label validation.
                let valid: HashSet<u32> = g
                    .primary
                    .into_iter()
                    .chain(g.secondary)
                    .chain(cm.iter().copied())
                    .collect();
                Group {
                    name: g.name,
                    valid,
                    primary,
                    cm,
                    nsm_max: g.nsm_max,
                }
            })
            .collect();

        let wholes = raw
            .wholes
            .into_iter()
            .map(|w| {
                (
                    w.target,
                    w.valid.into_iter().collect::<HashSet<_>>(),
                    w.confused.into_iter().collect::<HashSet<_>>(),
                )
            })
            .collect();

        let mut emoji = raw.emoji;
        emoji.sort_by(|a, b| b.len().cmp(&a.len()));

        // A code point is tokenizer-Valid if it belongs to some group's
        // primary/secondary/cm set (positional/count legality of combining
        // marks is checked later, during label validation, not here).
        let valid: HashSet<u32> = groups
            .iter()
            .flat_map(|g: &Group| g.valid.iter().copied())
            .collect();

        SpecTable {
            mapped,
            ignored: raw.ignored.into_iter().collect(),
            fenced,
            groups,
            valid,
            nsm: raw.nsm.into_iter().collect(),
            nsm_max: raw.nsm_max,
            cm: raw.cm.into_iter().collect(),
            nfc_check: raw.nfc_check.into_iter().collect(),
            emoji,
            wholes,
        }
    };

    static ref NFC: NfcTable = {
        let raw: RawNfcTable =
            serde_json::from_str(NFC_JSON).expect("embedded nfc_data.json must parse");

        let decomp = raw
            .decomp
            .iter()
            .map(|d| (d.cp, d.to.clone()))
            .collect::<HashMap<_, _>>();

        let exclusions: HashSet<u32> = raw.exclusions.into_iter().collect();

        // D114: primary composites are canonical decompositions of length two,
        // minus the full composition exclusions.
        let composites = raw
            .decomp
            .into_iter()
            .filter(|d| d.to.len() == 2 && !exclusions.contains(&d.cp))
            .map(|d| ((d.to[0], d.to[1]), d.cp))
            .collect::<HashMap<_, _>>();

        let mut combining_class = HashMap::new();
        for (ccc, cps) in raw.ranks {
            for cp in cps {
                combining_class.insert(cp, ccc);
            }
        }

        NfcTable {
            exclusions,
            decomp,
            composites,
            combining_class,
            hangul: HangulConstants {
                l_base: raw.hangul.l_base,
                l_count: raw.hangul.l_count,
                v_base: raw.hangul.v_base,
                v_count: raw.hangul.v_count,
                t_base: raw.hangul.t_base,
                t_count: raw.hangul.t_count,
                s_base: raw.hangul.s_base,
            },
        }
    };
}

/// Accessor for the spec table (mappings, ignorables, fenced set, script
/// groups, NSM/CM rules, emoji set, whole-script confusables).
pub fn spec() -> &'static SpecTable {
    &SPEC
}

/// Accessor for the NFC table (decompositions, composites, combining
/// classes, Hangul constants).
pub fn nfc() -> &'static NfcTable {
    &NFC
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_table_loads() {
        let t = spec();
        assert!(!t.groups.is_empty());
        assert!(t.mapped.contains_key(&0xBD));
        assert!(t.ignored.contains(&0xFE0F));
    }

    #[test]
    fn nfc_table_loads() {
        let t = nfc();
        assert_eq!(t.decomp.get(&0xE9), Some(&vec![0x65, 0x301]));
        assert_eq!(t.composites.get(&(0x65, 0x301)), Some(&0xE9));
        assert_eq!(*t.combining_class.get(&0x300).unwrap(), 230);
    }
}
