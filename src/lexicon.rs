// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, build, dawg, error};

// Sorted, deduplicated words in machine letters.
#[derive(Clone, Debug, Default)]
pub struct Lexicon {
    words: Box<[Box<[u8]>]>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LexiconStats {
    pub num_words: usize,
    pub min_len: usize,
    pub max_len: usize,
    pub mean_len: f64,
}

impl Lexicon {
    pub fn from_machine_words(mut machine_words: Vec<Box<[u8]>>) -> Self {
        machine_words.retain(|w| !w.is_empty());
        machine_words.sort_unstable();
        machine_words.dedup();
        Self {
            words: machine_words.into_boxed_slice(),
        }
    }

    // One word per line. Blank lines are skipped.
    pub fn from_text(alphabet: &alphabet::Alphabet, giant_string: &str) -> error::Returns<Self> {
        let alphabet_reader = alphabet::AlphabetReader::new_for_words(alphabet);
        let mut machine_words = Vec::new();
        for s in giant_string.lines() {
            let s = s.trim();
            if s.is_empty() {
                continue;
            }
            machine_words.push(alphabet_reader.read(s)?.into_boxed_slice());
        }
        Ok(Self::from_machine_words(machine_words))
    }

    pub fn from_strs(alphabet: &alphabet::Alphabet, words: &[&str]) -> error::Returns<Self> {
        Self::from_text(alphabet, &words.join("\n"))
    }

    pub fn load<P: AsRef<std::path::Path>>(
        alphabet: &alphabet::Alphabet,
        path: P,
    ) -> error::Returns<Self> {
        let giant_string = std::fs::read_to_string(path.as_ref())?;
        let ret = Self::from_text(alphabet, &giant_string)?;
        tracing::debug!(path = %path.as_ref().display(), num_words = ret.len(), "read lexicon");
        Ok(ret)
    }

    #[inline(always)]
    pub fn words(&self) -> &[Box<[u8]>] {
        &self.words
    }

    pub fn iter(&self) -> impl Iterator<Item = &[u8]> {
        self.words.iter().map(|w| &w[..])
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &[u8]) -> bool {
        self.words.binary_search_by(|w| (**w).cmp(word)).is_ok()
    }

    pub fn stats(&self) -> LexiconStats {
        if self.words.is_empty() {
            return LexiconStats::default();
        }
        let lens = self.words.iter().map(|w| w.len());
        let total = lens.clone().sum::<usize>();
        LexiconStats {
            num_words: self.words.len(),
            min_len: lens.clone().min().unwrap_or(0),
            max_len: lens.max().unwrap_or(0),
            mean_len: total as f64 / self.words.len() as f64,
        }
    }

    pub fn build_dawg(&self, alphabet: &alphabet::Alphabet) -> Result<dawg::Dawg, error::BuildError> {
        build::build(alphabet, &self.words)
    }
}
