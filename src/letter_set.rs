// Copyright (C) 2020-2026 Andy Kurnia.

// Bitset over letters. Bit n is letter n; bit 0 (the joker slot) is never set
// for a board square.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LetterSet(u32);

impl LetterSet {
    pub const EMPTY: LetterSet = LetterSet(0);

    #[inline(always)]
    pub fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    // every letter 1..=last_letter
    #[inline(always)]
    pub fn full(last_letter: u8) -> Self {
        Self((((1u64 << (last_letter as u32 + 1)) - 1) as u32) & !1)
    }

    #[inline(always)]
    pub fn bits(&self) -> u32 {
        self.0
    }

    #[inline(always)]
    pub fn contains(&self, letter: u8) -> bool {
        letter < 32 && self.0 & (1 << letter) != 0
    }

    #[inline(always)]
    pub fn set(&mut self, letter: u8) {
        self.0 |= 1 << letter;
    }

    #[inline(always)]
    pub fn unset(&mut self, letter: u8) {
        self.0 &= !(1 << letter);
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    #[inline(always)]
    pub fn len(&self) -> u32 {
        self.0.count_ones()
    }

    #[inline(always)]
    pub fn intersect(self, other: LetterSet) -> LetterSet {
        LetterSet(self.0 & other.0)
    }

    // ascending letter order
    pub fn iter(&self) -> LetterSetIter {
        LetterSetIter(self.0)
    }
}

pub struct LetterSetIter(u32);

impl Iterator for LetterSetIter {
    type Item = u8;

    #[inline(always)]
    fn next(&mut self) -> Option<u8> {
        if self.0 == 0 {
            None
        } else {
            let letter = self.0.trailing_zeros() as u8;
            self.0 &= self.0 - 1;
            Some(letter)
        }
    }
}

impl FromIterator<u8> for LetterSet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut ret = LetterSet::EMPTY;
        for letter in iter {
            ret.set(letter);
        }
        ret
    }
}

impl std::fmt::Debug for LetterSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_unset_and_iterate_in_order() {
        let mut s = LetterSet::EMPTY;
        s.set(20);
        s.set(1);
        s.set(3);
        assert!(s.contains(3));
        assert!(!s.contains(2));
        s.unset(3);
        assert_eq!(s.iter().collect::<Vec<_>>(), vec![1, 20]);
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn full_excludes_sentinel() {
        let s = LetterSet::full(26);
        assert_eq!(s.len(), 26);
        assert!(!s.contains(0));
        assert!(s.contains(26));
        assert!(!s.contains(27));
        assert_eq!(LetterSet::full(31).len(), 31);
    }
}
