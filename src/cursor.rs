// Copyright (C) 2020-2026 Andy Kurnia.

use super::dawg;

// Position reached in the automaton after consuming some letters from `start`.
// Transitions produce new cursors; an existing cursor never changes.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Cursor {
    start: u32,
    edges: Vec<u32>, // indexes into the automaton's edge table
    valid: bool,
}

impl Cursor {
    #[inline(always)]
    pub fn at(start: u32) -> Self {
        Self {
            start,
            edges: Vec::new(),
            valid: true,
        }
    }

    #[inline(always)]
    pub fn invalid() -> Self {
        Self {
            start: 0,
            edges: Vec::new(),
            valid: false,
        }
    }

    #[inline(always)]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    #[inline(always)]
    pub fn start(&self) -> u32 {
        self.start
    }

    #[inline(always)]
    pub fn edges(&self) -> &[u32] {
        &self.edges
    }

    // number of letters consumed
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    #[inline(always)]
    pub fn last_edge(&self) -> Option<u32> {
        self.edges.last().copied()
    }

    pub(crate) fn extended(&self, edge: u32) -> Self {
        let mut edges = Vec::with_capacity(self.edges.len() + 1);
        edges.extend_from_slice(&self.edges);
        edges.push(edge);
        Self {
            start: self.start,
            edges,
            valid: true,
        }
    }

    // None for invalid cursors
    #[inline(always)]
    pub fn node(&self, dawg: &dawg::Dawg) -> Option<u32> {
        if !self.valid {
            None
        } else {
            Some(match self.last_edge() {
                Some(e) => dawg.edge(e).dest(),
                None => self.start,
            })
        }
    }

    // true iff the last edge taken completes a word
    #[inline(always)]
    pub fn accepts(&self, dawg: &dawg::Dawg) -> bool {
        self.valid
            && match self.last_edge() {
                Some(e) => dawg.edge(e).accepts(),
                None => false,
            }
    }

    pub fn letters(&self, dawg: &dawg::Dawg) -> Vec<u8> {
        self.edges.iter().map(|&e| dawg.edge(e).letter()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::super::{alphabet, build};

    #[test]
    fn transitions_never_mutate_the_source() {
        let alphabet = alphabet::make_english_alphabet();
        let dawg = build::build_from_strs(&alphabet, &["CAT"]).unwrap();
        let root = dawg.root_cursor();
        let c = dawg.transition(&root, 3);
        assert!(root.is_empty());
        assert_eq!(c.len(), 1);
        let ca = dawg.transition(&c, 1);
        assert_eq!(c.len(), 1);
        assert_eq!(ca.letters(&dawg), vec![3, 1]);
        assert!(!ca.accepts(&dawg));
        assert!(dawg.transition(&ca, 20).accepts(&dawg));
    }

    #[test]
    fn invalid_is_terminal() {
        let alphabet = alphabet::make_english_alphabet();
        let dawg = build::build_from_strs(&alphabet, &["CAT"]).unwrap();
        let bad = dawg.transition(&dawg.root_cursor(), 2);
        assert!(!bad.is_valid());
        assert_eq!(bad.node(&dawg), None);
        assert!(!dawg.transition(&bad, 1).is_valid());
        assert!(!bad.accepts(&dawg));
    }
}
