//! Longest-match lookup over the table's emoji sequences.
//!
//! Generalizes the byte-chunked key trie of `trie.rs` to a trie keyed
//! directly on code points, with a `longest_match` walk instead of a single
//! exact `get`. The trie is keyed on each sequence's FE0F-stripped form,
//! since FE0F (the emoji presentation selector) is optional in input text —
//! matching walks the raw input but skips over any FE0F it meets between
//! two required components, exactly as the table's canonical form allows.

use crate::types::CodePoint;
use std::collections::HashMap;

const FE0F: CodePoint = 0xFE0F;

struct Node {
    children: HashMap<CodePoint, Node>,
    /// The full canonical (FE0F-bearing) form, set when a sequence ends here.
    canonical: Option<Vec<CodePoint>>,
}

impl Node {
    fn empty() -> Self {
        Node {
            children: HashMap::new(),
            canonical: None,
        }
    }
}

/// The result of matching an emoji sequence against a prefix of the input.
pub struct EmojiMatch {
    /// How many raw input code points (including any skipped FE0F) the
    /// match consumed.
    pub consumed: usize,
    /// The canonical, FE0F-bearing form — the beautify/"pretty" rendering.
    pub canonical: Vec<CodePoint>,
    /// The canonical form with FE0F stripped — the normalize rendering and
    /// the key used to look up this entry.
    pub no_fe0f: Vec<CodePoint>,
}

pub struct EmojiTrie {
    root: Node,
}

impl EmojiTrie {
    pub fn from_sequences<'a>(sequences: impl IntoIterator<Item = &'a Vec<CodePoint>>) -> Self {
        let mut root = Node::empty();
        for seq in sequences {
            let no_fe0f: Vec<CodePoint> = seq.iter().copied().filter(|cp| *cp != FE0F).collect();
            let mut node = &mut root;
            for cp in &no_fe0f {
                node = node.children.entry(*cp).or_insert_with(Node::empty);
            }
            node.canonical = Some(seq.clone());
        }
        EmojiTrie { root }
    }

    /// Finds the longest registered emoji sequence matching a prefix of
    /// `cps`, treating any FE0F encountered as optionally skippable.
    pub fn longest_match(&self, cps: &[CodePoint]) -> Option<EmojiMatch> {
        let mut node = &self.root;
        let mut i = 0;
        let mut best: Option<(usize, &Vec<CodePoint>)> = node.canonical.as_ref().map(|c| (0, c));
        loop {
            if i < cps.len() && cps[i] == FE0F {
                // An FE0F here only counts toward a match if skipping it
                // still leads somewhere; otherwise it belongs to the
                // Ignored/standalone path and we must not consume it.
                if let Some((len, canonical)) = self.try_skip_fe0f(node, cps, i) {
                    best = Some((len, canonical));
                }
                i += 1;
                continue;
            }
            match cps.get(i).and_then(|cp| node.children.get(cp)) {
                Some(next) => {
                    node = next;
                    i += 1;
                    if let Some(canonical) = &node.canonical {
                        best = Some((i, canonical));
                    }
                }
                None => break,
            }
        }
        best.map(|(consumed, canonical)| EmojiMatch {
            consumed,
            canonical: canonical.clone(),
            no_fe0f: canonical.iter().copied().filter(|cp| *cp != FE0F).collect(),
        })
    }

    /// Looks ahead past a run of FE0F to see whether the trie continues to
    /// a (possibly longer) match; used to decide whether an encountered
    /// FE0F is part of the current emoji sequence.
    fn try_skip_fe0f<'a>(
        &'a self,
        node: &'a Node,
        cps: &[CodePoint],
        mut i: usize,
    ) -> Option<(usize, &'a Vec<CodePoint>)> {
        while i < cps.len() && cps[i] == FE0F {
            i += 1;
        }
        let next = node.children.get(cps.get(i)?)?;
        next.canonical.as_ref().map(|c| (i + 1, c))
    }
}
