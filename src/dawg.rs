// Copyright (C) 2020-2026 Andy Kurnia.

use super::{cursor, letter_set};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
    letter: u8,
    accepts: bool,
    dest: u32,
}

impl Edge {
    #[inline(always)]
    pub(crate) fn new(letter: u8, accepts: bool, dest: u32) -> Self {
        Self {
            letter,
            accepts,
            dest,
        }
    }

    #[inline(always)]
    pub fn letter(&self) -> u8 {
        self.letter
    }

    // following this edge completes a word
    #[inline(always)]
    pub fn accepts(&self) -> bool {
        self.accepts
    }

    #[inline(always)]
    pub fn dest(&self) -> u32 {
        self.dest
    }
}

// Edges of a node are contiguous in the edge table, sorted by letter.
#[derive(Clone, Copy, Debug)]
pub struct Node {
    first_edge: u32,
    num_edges: u8,
}

pub const ROOT: u32 = 0;
pub const SINK: u32 = 1;

// Frozen automaton. Never mutated after the builder hands it over.
pub struct Dawg {
    nodes: Box<[Node]>,
    edges: Box<[Edge]>,
    last_letter: u8,
    num_registered: usize,
}

impl Dawg {
    // nodes[ROOT] is the root and nodes[SINK] has no edges.
    pub(crate) fn from_parts(
        node_edges: Vec<Vec<Edge>>,
        last_letter: u8,
        num_registered: usize,
    ) -> Self {
        let mut nodes = Vec::with_capacity(node_edges.len());
        let mut edges = Vec::with_capacity(node_edges.iter().map(|v| v.len()).sum());
        for these_edges in node_edges {
            nodes.push(Node {
                first_edge: edges.len() as u32,
                num_edges: these_edges.len() as u8,
            });
            edges.extend(these_edges);
        }
        Self {
            nodes: nodes.into_boxed_slice(),
            edges: edges.into_boxed_slice(),
            last_letter,
            num_registered,
        }
    }

    #[inline(always)]
    pub fn edge(&self, e: u32) -> &Edge {
        &self.edges[e as usize]
    }

    #[inline(always)]
    pub fn edge_range(&self, node: u32) -> std::ops::Range<u32> {
        let n = self.nodes[node as usize];
        n.first_edge..n.first_edge + n.num_edges as u32
    }

    #[inline(always)]
    pub fn edges_of(&self, node: u32) -> &[Edge] {
        let r = self.edge_range(node);
        &self.edges[r.start as usize..r.end as usize]
    }

    // edge index labeled `letter` out of `node`
    #[inline(always)]
    pub fn seek(&self, node: u32, letter: u8) -> Option<u32> {
        self.edge_range(node)
            .find(|&e| self.edges[e as usize].letter == letter)
    }

    #[inline(always)]
    pub fn last_letter(&self) -> u8 {
        self.last_letter
    }

    #[inline(always)]
    pub fn root_cursor(&self) -> cursor::Cursor {
        cursor::Cursor::at(ROOT)
    }

    pub fn transition(&self, cursor: &cursor::Cursor, letter: u8) -> cursor::Cursor {
        match cursor.node(self) {
            Some(node) => match self.seek(node, letter) {
                Some(e) => cursor.extended(e),
                None => cursor::Cursor::invalid(),
            },
            None => cursor::Cursor::invalid(),
        }
    }

    pub fn transitions(&self, cursor: &cursor::Cursor, word: &[u8]) -> cursor::Cursor {
        let mut ret = cursor.clone();
        for &letter in word {
            ret = self.transition(&ret, letter);
            if !ret.is_valid() {
                break;
            }
        }
        ret
    }

    pub fn matches_word(&self, word: &[u8]) -> bool {
        let c = self.transitions(&self.root_cursor(), word);
        c.len() == word.len() && c.accepts(self)
    }

    // may be shorter than word, never invalid
    pub fn longest_matching_prefix(&self, word: &[u8]) -> cursor::Cursor {
        let mut ret = self.root_cursor();
        for &letter in word {
            let next = self.transition(&ret, letter);
            if !next.is_valid() {
                break;
            }
            ret = next;
        }
        ret
    }

    // Letters L out of the cursor's node such that L followed by at least one
    // of required_suffixes completes a word. No suffixes means L itself must
    // complete a word.
    pub fn valid_continuations(
        &self,
        cursor: &cursor::Cursor,
        required_suffixes: &[&[u8]],
    ) -> letter_set::LetterSet {
        let mut ret = letter_set::LetterSet::EMPTY;
        let Some(node) = cursor.node(self) else {
            return ret;
        };
        for edge in self.edges_of(node) {
            let ok = if required_suffixes.is_empty() {
                edge.accepts
            } else {
                required_suffixes
                    .iter()
                    .any(|suffix| self.completes(edge, suffix))
            };
            if ok {
                ret.set(edge.letter);
            }
        }
        ret
    }

    fn completes(&self, edge: &Edge, suffix: &[u8]) -> bool {
        let mut accepts = edge.accepts;
        let mut node = edge.dest;
        for &letter in suffix {
            match self.seek(node, letter) {
                Some(e) => {
                    accepts = self.edges[e as usize].accepts;
                    node = self.edges[e as usize].dest;
                }
                None => return false,
            }
        }
        accepts
    }

    #[inline(always)]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[inline(always)]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    // size of the registration table when construction finished
    #[inline(always)]
    pub fn num_registered(&self) -> usize {
        self.num_registered
    }

    fn count_words_at(&self, word_counts: &mut [u32], node: u32) -> u32 {
        if word_counts[node as usize] == !0 {
            let mut total = 0;
            for e in self.edge_range(node) {
                let edge = self.edges[e as usize];
                total += edge.accepts as u32 + self.count_words_at(word_counts, edge.dest);
            }
            word_counts[node as usize] = total;
        }
        word_counts[node as usize]
    }

    pub fn word_count(&self) -> u32 {
        let mut word_counts = vec![!0u32; self.nodes.len()];
        self.count_words_at(&mut word_counts, ROOT)
    }

    // lexicographic order
    pub fn for_each_word<F: FnMut(&[u8])>(&self, mut f: F) {
        struct Env<'a, F: FnMut(&[u8])> {
            dawg: &'a Dawg,
            word: Vec<u8>,
            f: &'a mut F,
        }
        fn iter<F: FnMut(&[u8])>(env: &mut Env<'_, F>, node: u32) {
            for e in env.dawg.edge_range(node) {
                let edge = *env.dawg.edge(e);
                env.word.push(edge.letter);
                if edge.accepts {
                    (env.f)(&env.word);
                }
                iter(env, edge.dest);
                env.word.pop();
            }
        }
        iter(
            &mut Env {
                dawg: self,
                word: Vec::new(),
                f: &mut f,
            },
            ROOT,
        );
    }

    pub fn words(&self) -> Vec<Box<[u8]>> {
        let mut ret = Vec::new();
        self.for_each_word(|w| ret.push(w.into()));
        ret
    }
}

#[cfg(test)]
mod tests {
    use super::super::{alphabet, build};
    use super::*;

    fn english_dawg(words: &[&str]) -> Dawg {
        build::build_from_strs(&alphabet::make_english_alphabet(), words).unwrap()
    }

    #[test]
    fn matches_whole_words_only() {
        let dawg = english_dawg(&["CAT", "CATS", "DOG"]);
        assert!(dawg.matches_word(&[3, 1, 20]));
        assert!(dawg.matches_word(&[3, 1, 20, 19]));
        assert!(!dawg.matches_word(&[3, 1]));
        assert!(!dawg.matches_word(&[3, 1, 20, 19, 19]));
        assert!(!dawg.matches_word(&[]));
    }

    #[test]
    fn longest_prefix_stops_at_first_mismatch() {
        let dawg = english_dawg(&["CAT", "DOG"]);
        let c = dawg.longest_matching_prefix(&[3, 1, 18, 20]);
        assert!(c.is_valid());
        assert_eq!(c.letters(&dawg), vec![3, 1]);
        assert!(dawg.longest_matching_prefix(&[26]).is_empty());
    }

    #[test]
    fn continuations_with_and_without_suffixes() {
        let dawg = english_dawg(&["CAT", "COT", "CUB", "CUT"]);
        let c = dawg.transition(&dawg.root_cursor(), 3);
        let with_t = dawg.valid_continuations(&c, &[&[20]]);
        assert_eq!(with_t.iter().collect::<Vec<_>>(), vec![1, 15, 21]);
        let with_b = dawg.valid_continuations(&c, &[&[2]]);
        assert_eq!(with_b.iter().collect::<Vec<_>>(), vec![21]);
        let cu = dawg.transition(&c, 21);
        let ends = dawg.valid_continuations(&cu, &[]);
        assert_eq!(ends.iter().collect::<Vec<_>>(), vec![2, 20]);
        let either = dawg.valid_continuations(&c, &[&[2], &[20]]);
        assert_eq!(either.len(), 3);
    }

    #[test]
    fn statistics() {
        let dawg = english_dawg(&["CAT", "CATS", "DOG", "DOGS"]);
        assert_eq!(dawg.word_count(), 4);
        assert_eq!(
            dawg.words(),
            vec![
                Box::from(&[3u8, 1, 20][..]),
                Box::from(&[3u8, 1, 20, 19][..]),
                Box::from(&[4u8, 15, 7][..]),
                Box::from(&[4u8, 15, 7, 19][..]),
            ]
        );
        // root, C, CA, D, DO, sink, and the node after CAT or DOG
        assert_eq!(dawg.node_count(), 7);
    }
}
