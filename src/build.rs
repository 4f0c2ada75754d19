// Copyright (C) 2020-2026 Andy Kurnia.

use super::error::BuildError;
use super::{alphabet, dawg, error};

// Fast insecure non-cryptographic checksum for node fingerprints.
struct Fingerprinter(u64);

impl std::hash::Hasher for Fingerprinter {
    fn finish(&self) -> u64 {
        self.0
    }
    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 = (std::num::Wrapping(self.0) * std::num::Wrapping(3467)).0 ^ (!b as u64);
        }
    }
}

impl Default for Fingerprinter {
    fn default() -> Fingerprinter {
        Fingerprinter(0)
    }
}

type FingerprinterDefault = std::hash::BuildHasherDefault<Fingerprinter>;

// Unfrozen edges. Destinations of all but the last edge of a node are
// registered by the time a new word diverges from that node.
#[derive(Clone, Copy, PartialEq, Eq)]
struct BuildEdge {
    letter: u8,
    accepts: bool,
    dest: u32, // Refers to nodes.
}

struct BuildNode {
    edges: Vec<BuildEdge>,
    frozen: bool,
    fingerprint: Option<u64>,
}

impl BuildNode {
    fn new() -> Self {
        Self {
            edges: Vec::new(),
            frozen: false,
            fingerprint: None,
        }
    }
}

const BUILD_ROOT: u32 = 0;
const BUILD_SINK: u32 = 1;

struct StateMaker {
    nodes: Vec<BuildNode>,
    // fingerprint -> registered nodes with that fingerprint
    registry: std::collections::HashMap<u64, Vec<u32>, FingerprinterDefault>,
    num_registered: usize,
    last_letter: u8,
    prev_word: Vec<u8>,
}

impl StateMaker {
    fn new(last_letter: u8) -> Result<Self, BuildError> {
        let mut ret = Self {
            nodes: vec![BuildNode::new(), BuildNode::new()],
            registry: Default::default(),
            num_registered: 0,
            last_letter,
            prev_word: Vec::new(),
        };
        // The sink state always exists.
        ret.register(BUILD_SINK)?;
        Ok(ret)
    }

    fn new_node(&mut self) -> u32 {
        self.nodes.push(BuildNode::new());
        (self.nodes.len() - 1) as u32
    }

    fn add_edge(&mut self, p: u32, letter: u8, accepts: bool, dest: u32) -> Result<(), BuildError> {
        let node = &mut self.nodes[p as usize];
        if node.frozen {
            return Err(BuildError::FrozenNode { node: p, letter });
        }
        if node.edges.iter().any(|e| e.letter == letter) {
            return Err(BuildError::DuplicateEdge { node: p, letter });
        }
        node.edges.push(BuildEdge {
            letter,
            accepts,
            dest,
        });
        Ok(())
    }

    #[inline(always)]
    fn find_edge(&self, p: u32, letter: u8) -> Option<usize> {
        self.nodes[p as usize]
            .edges
            .iter()
            .position(|e| e.letter == letter)
    }

    // Checksum over edge letters, final flags and destination fingerprints.
    // Destinations are registered so their fingerprints are already cached.
    fn fingerprint(&mut self, p: u32) -> u64 {
        if let Some(fp) = self.nodes[p as usize].fingerprint {
            return fp;
        }
        use std::hash::Hasher;
        let mut hasher = Fingerprinter::default();
        let edges = std::mem::take(&mut self.nodes[p as usize].edges);
        for edge in &edges {
            let dest_fp = self.fingerprint(edge.dest);
            hasher.write_u8(edge.letter);
            hasher.write_u8(edge.accepts as u8);
            hasher.write_u64(dest_fp);
        }
        hasher.write_usize(edges.len());
        self.nodes[p as usize].edges = edges;
        let fp = hasher.finish();
        self.nodes[p as usize].fingerprint = Some(fp);
        fp
    }

    fn register(&mut self, p: u32) -> Result<(), BuildError> {
        if self.nodes[p as usize].frozen {
            return Err(BuildError::DuplicateRegistration { node: p });
        }
        let fp = self.fingerprint(p);
        self.nodes[p as usize].frozen = true;
        self.registry.entry(fp).or_default().push(p);
        self.num_registered += 1;
        Ok(())
    }

    // registered node equal to p, registering p if there is none
    fn canonicalize(&mut self, p: u32) -> Result<u32, BuildError> {
        let fp = self.fingerprint(p);
        if let Some(candidates) = self.registry.get(&fp) {
            for &q in candidates {
                if q == p {
                    return Err(BuildError::DuplicateRegistration { node: p });
                }
                if self.nodes[q as usize].edges == self.nodes[p as usize].edges {
                    return Ok(q);
                }
            }
        }
        self.register(p)?;
        Ok(p)
    }

    // Registers the rightmost chain below p, deepest first, redirecting each
    // edge to an equal registered node where one exists.
    fn freeze_last_child(&mut self, p: u32) -> Result<(), BuildError> {
        let Some(&last) = self.nodes[p as usize].edges.last() else {
            return Ok(());
        };
        if self.nodes[last.dest as usize].frozen {
            return Ok(());
        }
        self.freeze_last_child(last.dest)?;
        let canonical = self.canonicalize(last.dest)?;
        if canonical != last.dest {
            if self.nodes[p as usize].frozen {
                return Err(BuildError::FrozenNode {
                    node: p,
                    letter: last.letter,
                });
            }
            if let Some(edge) = self.nodes[p as usize].edges.last_mut() {
                edge.dest = canonical;
            }
        }
        Ok(())
    }

    fn add_word(&mut self, word: &[u8]) -> Result<(), BuildError> {
        if let Some(&letter) = word
            .iter()
            .find(|&&letter| letter == 0 || letter > self.last_letter)
        {
            return Err(BuildError::InvalidLetter {
                letter,
                word: word.into(),
            });
        }
        if word < &self.prev_word[..] {
            return Err(BuildError::Unsorted {
                prev: self.prev_word[..].into(),
                word: word.into(),
            });
        }
        if word.is_empty() || word == &self.prev_word[..] {
            return Ok(());
        }

        // longest prefix already present, walking from the root
        let mut path = vec![BUILD_ROOT];
        for &letter in word {
            let p = path[path.len() - 1];
            match self.find_edge(p, letter) {
                Some(ei) => path.push(self.nodes[p as usize].edges[ei].dest),
                None => break,
            }
        }
        let prefix_len = path.len() - 1;
        let mut p = path[prefix_len];

        self.freeze_last_child(p)?;

        if p == BUILD_SINK {
            // the previous word ended here; give it a private node to grow
            let parent = path[prefix_len - 1];
            let fresh = self.new_node();
            if let Some(ei) = self.find_edge(parent, word[prefix_len - 1]) {
                self.nodes[parent as usize].edges[ei].dest = fresh;
            }
            p = fresh;
        }

        let suffix = &word[prefix_len..];
        for (i, &letter) in suffix.iter().enumerate() {
            let is_last = i + 1 == suffix.len();
            let dest = if is_last && suffix.len() == 1 {
                BUILD_SINK
            } else {
                self.new_node()
            };
            self.add_edge(p, letter, is_last, dest)?;
            p = dest;
        }

        self.prev_word.clear();
        self.prev_word.extend_from_slice(word);
        Ok(())
    }

    // Renumbers reachable nodes so the root is 0 and the sink is 1.
    fn finish(mut self) -> Result<dawg::Dawg, BuildError> {
        self.freeze_last_child(BUILD_ROOT)?;

        let mut destination = vec![!0u32; self.nodes.len()];
        destination[BUILD_ROOT as usize] = dawg::ROOT;
        destination[BUILD_SINK as usize] = dawg::SINK;
        let mut order = vec![BUILD_ROOT, BUILD_SINK];
        let mut i = 0;
        while i < order.len() {
            let p = order[i];
            for edge in &self.nodes[p as usize].edges {
                if destination[edge.dest as usize] == !0 {
                    destination[edge.dest as usize] = order.len() as u32;
                    order.push(edge.dest);
                }
            }
            i += 1;
        }
        if order.len() > 0x7fffffff {
            return Err(BuildError::TooManyNodes(order.len()));
        }

        let node_edges = order
            .iter()
            .map(|&p| {
                self.nodes[p as usize]
                    .edges
                    .iter()
                    .map(|e| dawg::Edge::new(e.letter, e.accepts, destination[e.dest as usize]))
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();
        Ok(dawg::Dawg::from_parts(
            node_edges,
            self.last_letter,
            self.num_registered,
        ))
    }
}

// Words must be sorted. Repeated and empty words are skipped.
pub fn build<W: AsRef<[u8]>>(
    alphabet: &alphabet::Alphabet,
    sorted_machine_words: &[W],
) -> Result<dawg::Dawg, BuildError> {
    if alphabet.is_empty() {
        return Err(BuildError::EmptyAlphabet);
    }
    let mut state_maker = StateMaker::new(alphabet.last_letter())?;
    for word in sorted_machine_words {
        state_maker.add_word(word.as_ref())?;
    }
    let num_words = sorted_machine_words.len();
    let ret = state_maker.finish()?;
    tracing::debug!(
        num_words,
        nodes = ret.node_count(),
        edges = ret.edge_count(),
        registered = ret.num_registered(),
        "built dawg"
    );
    Ok(ret)
}

// Convenience for fixtures: sorts and dedups the readable words first.
pub fn build_from_strs(alphabet: &alphabet::Alphabet, words: &[&str]) -> error::Returns<dawg::Dawg> {
    let reader = alphabet::AlphabetReader::new_for_words(alphabet);
    let mut machine_words = words
        .iter()
        .map(|w| reader.read(w))
        .collect::<Result<Vec<_>, _>>()?;
    machine_words.sort_unstable();
    machine_words.dedup();
    Ok(build(alphabet, &machine_words)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn english() -> alphabet::Alphabet {
        alphabet::make_english_alphabet()
    }

    fn words(alphabet: &alphabet::Alphabet, strs: &[&str]) -> Vec<Vec<u8>> {
        let reader = alphabet::AlphabetReader::new_for_words(alphabet);
        strs.iter().map(|s| reader.read(s).unwrap()).collect()
    }

    #[test]
    fn shared_suffix_is_one_node() {
        let alphabet = english();
        let dawg = build(&alphabet, &words(&alphabet, &["BAT", "CAT"])).unwrap();
        let root = dawg.root_cursor();
        let ba = dawg.transitions(&root, &[2, 1]);
        let ca = dawg.transitions(&root, &[3, 1]);
        assert_eq!(ba.node(&dawg), ca.node(&dawg));
        let b = dawg.transition(&root, 2);
        let c = dawg.transition(&root, 3);
        assert_eq!(b.node(&dawg), c.node(&dawg));
        // root, after B or C, after BA or CA, sink
        assert_eq!(dawg.node_count(), 4);
    }

    #[test]
    fn graph_shares_nodes() {
        let alphabet = english();
        let one = build(&alphabet, &words(&alphabet, &["ABCDEF"])).unwrap();
        let many = build(
            &alphabet,
            &words(&alphabet, &["ABCDEF", "ABDEF", "ABEF", "AF"]),
        )
        .unwrap();
        assert_eq!(one.node_count(), many.node_count());
    }

    #[test]
    fn word_extending_a_single_letter_suffix() {
        // CB ends on the sink, CBS must not grow the sink
        let alphabet = english();
        let dawg = build(&alphabet, &words(&alphabet, &["CA", "CB", "CBS"])).unwrap();
        assert_eq!(dawg.word_count(), 3);
        assert!(dawg.matches_word(&[3, 2]));
        assert!(dawg.matches_word(&[3, 2, 19]));
        assert!(!dawg.matches_word(&[3, 1, 19]));
        assert!(dawg.edges_of(dawg::SINK).is_empty());
    }

    #[test]
    fn unsorted_input_is_rejected() {
        let alphabet = english();
        let err = build(&alphabet, &words(&alphabet, &["DOG", "CAT"]))
            .err()
            .unwrap();
        assert_eq!(
            err,
            BuildError::Unsorted {
                prev: vec![4, 15, 7].into(),
                word: vec![3, 1, 20].into(),
            }
        );
    }

    #[test]
    fn duplicates_are_skipped() {
        let alphabet = english();
        let dawg = build(&alphabet, &words(&alphabet, &["CAT", "CAT", "CATS"])).unwrap();
        assert_eq!(dawg.word_count(), 2);
    }

    #[test]
    fn empty_alphabet_is_rejected() {
        let alphabet = alphabet::Alphabet::new(vec![alphabet::Tile {
            label: "?".into(),
            blank_label: "?".into(),
            freq: 2,
            score: 0,
        }])
        .unwrap();
        assert_eq!(
            build::<Vec<u8>>(&alphabet, &[]).err(),
            Some(BuildError::EmptyAlphabet)
        );
    }

    #[test]
    fn letters_outside_alphabet_are_rejected() {
        let alphabet = english();
        assert!(matches!(
            build(&alphabet, &[vec![1u8, 27]]),
            Err(BuildError::InvalidLetter { letter: 27, .. })
        ));
        assert!(matches!(
            build(&alphabet, &[vec![0u8, 1]]),
            Err(BuildError::InvalidLetter { letter: 0, .. })
        ));
    }

    #[test]
    fn empty_lexicon_has_root_and_sink() {
        let alphabet = english();
        let dawg = build::<Vec<u8>>(&alphabet, &[]).unwrap();
        assert_eq!(dawg.node_count(), 2);
        assert_eq!(dawg.word_count(), 0);
        assert!(!dawg.matches_word(&[1]));
    }

    #[test]
    fn registration_is_checked() {
        let mut state_maker = StateMaker::new(26).unwrap();
        assert_eq!(
            state_maker.register(BUILD_SINK),
            Err(BuildError::DuplicateRegistration { node: BUILD_SINK })
        );
        assert_eq!(
            state_maker.add_edge(BUILD_SINK, 1, true, BUILD_SINK),
            Err(BuildError::FrozenNode {
                node: BUILD_SINK,
                letter: 1
            })
        );
        state_maker.add_edge(BUILD_ROOT, 1, true, BUILD_SINK).unwrap();
        assert_eq!(
            state_maker.add_edge(BUILD_ROOT, 1, false, BUILD_SINK),
            Err(BuildError::DuplicateEdge {
                node: BUILD_ROOT,
                letter: 1
            })
        );
    }
}
