// Copyright (C) 2020-2026 Andy Kurnia.

use super::{dawg, letter_set, matrix};
use std::sync::OnceLock;

// Letters allowed on an empty square when placing in direction `down`,
// judged only by the perpendicular word the letter would join.
pub fn compute_cross_check(
    board_tiles: &[u8],
    dim: matrix::Dim,
    dawg: &dawg::Dawg,
    down: bool,
    idx: usize,
) -> letter_set::LetterSet {
    let (row, col) = dim.row_col(idx);
    let (lane, pos) = dim.lane_idx(!down, row, col);
    let strider = dim.lane(!down, lane);
    let mut start = pos;
    while start > 0 && board_tiles[strider.at(start - 1)] != 0 {
        start -= 1;
    }
    let mut end = pos + 1;
    while end < strider.len() && board_tiles[strider.at(end)] != 0 {
        end += 1;
    }
    if start == pos && end == pos + 1 {
        return letter_set::LetterSet::full(dawg.last_letter());
    }
    let prefix = (start..pos)
        .map(|i| board_tiles[strider.at(i)] & 0x7f)
        .collect::<Vec<_>>();
    let suffix = (pos + 1..end)
        .map(|i| board_tiles[strider.at(i)] & 0x7f)
        .collect::<Vec<_>>();
    let cursor = dawg.transitions(&dawg.root_cursor(), &prefix);
    if suffix.is_empty() {
        dawg.valid_continuations(&cursor, &[])
    } else {
        dawg.valid_continuations(&cursor, &[&suffix])
    }
}

// Lazily filled per board snapshot. Across entries first, then down entries.
pub struct CrossChecks {
    dim: matrix::Dim,
    cells: Box<[OnceLock<letter_set::LetterSet>]>,
}

impl CrossChecks {
    pub fn new(dim: matrix::Dim) -> Self {
        Self {
            dim,
            cells: (0..2 * dim.num_squares()).map(|_| OnceLock::new()).collect(),
        }
    }

    #[inline(always)]
    fn slot(&self, down: bool, idx: usize) -> usize {
        (down as usize) * self.dim.num_squares() + idx
    }

    #[inline(always)]
    pub fn dim(&self) -> matrix::Dim {
        self.dim
    }

    pub fn get(
        &self,
        board_tiles: &[u8],
        dawg: &dawg::Dawg,
        down: bool,
        idx: usize,
    ) -> letter_set::LetterSet {
        *self.cells[self.slot(down, idx)]
            .get_or_init(|| compute_cross_check(board_tiles, self.dim, dawg, down, idx))
    }

    #[inline(always)]
    pub fn is_cached(&self, down: bool, idx: usize) -> bool {
        self.cells[self.slot(down, idx)].get().is_some()
    }

    pub fn num_cached(&self) -> usize {
        self.cells.iter().filter(|c| c.get().is_some()).count()
    }

    // Cache for the board after tiles land on `placed`. An across entry looks
    // along its column and a down entry along its row, so only those lanes
    // through a placed square are dropped.
    pub fn derive(&self, placed: &[usize]) -> Self {
        let mut stale_cols = vec![false; self.dim.cols as usize];
        let mut stale_rows = vec![false; self.dim.rows as usize];
        for &idx in placed {
            let (row, col) = self.dim.row_col(idx);
            stale_rows[row as usize] = true;
            stale_cols[col as usize] = true;
        }
        let ret = Self::new(self.dim);
        for idx in 0..self.dim.num_squares() {
            let (row, col) = self.dim.row_col(idx);
            for (down, stale) in [(false, stale_cols[col as usize]), (true, stale_rows[row as usize])] {
                if stale {
                    continue;
                }
                if let Some(&v) = self.cells[self.slot(down, idx)].get() {
                    let _ = ret.cells[ret.slot(down, idx)].set(v);
                }
            }
        }
        ret
    }
}

#[cfg(test)]
mod tests {
    use super::super::{alphabet, build};
    use super::*;

    fn c_over_t() -> (matrix::Dim, Vec<u8>) {
        let dim = matrix::Dim { rows: 3, cols: 3 };
        let mut board = vec![0u8; 9];
        board[dim.at_row_col(0, 1)] = 3;
        board[dim.at_row_col(2, 1)] = 20;
        (dim, board)
    }

    #[test]
    fn gap_between_c_and_t() {
        let alphabet = alphabet::make_english_alphabet();
        let dawg = build::build_from_strs(&alphabet, &["CAT", "COT", "CUTE"]).unwrap();
        let (dim, board) = c_over_t();
        let across = compute_cross_check(&board, dim, &dawg, false, dim.at_row_col(1, 1));
        assert!(across.contains(1));
        assert!(across.contains(15));
        assert!(!across.contains(9));
        assert!(!across.contains(21));
        // no horizontal neighbors at all
        let down = compute_cross_check(&board, dim, &dawg, true, dim.at_row_col(1, 1));
        assert_eq!(down, letter_set::LetterSet::full(26));
    }

    #[test]
    fn only_prefix_or_only_suffix() {
        let alphabet = alphabet::make_english_alphabet();
        let dawg = build::build_from_strs(&alphabet, &["AT", "CAT", "TA"]).unwrap();
        let dim = matrix::Dim { rows: 3, cols: 1 };
        let board = vec![0, 20, 0];
        let above = compute_cross_check(&board, dim, &dawg, false, 0);
        assert_eq!(above.iter().collect::<Vec<_>>(), vec![1]);
        let below = compute_cross_check(&board, dim, &dawg, false, 2);
        assert_eq!(below.iter().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn jokers_on_board_read_as_letters() {
        let alphabet = alphabet::make_english_alphabet();
        let dawg = build::build_from_strs(&alphabet, &["CAT"]).unwrap();
        let (dim, mut board) = c_over_t();
        board[dim.at_row_col(0, 1)] = 3 | 0x80;
        let across = compute_cross_check(&board, dim, &dawg, false, dim.at_row_col(1, 1));
        assert_eq!(across.iter().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn cached_entries_are_stable() {
        let alphabet = alphabet::make_english_alphabet();
        let dawg = build::build_from_strs(&alphabet, &["CAT", "CIT"]).unwrap();
        let (dim, board) = c_over_t();
        let cache = CrossChecks::new(dim);
        let idx = dim.at_row_col(1, 1);
        assert!(!cache.is_cached(false, idx));
        let first = cache.get(&board, &dawg, false, idx);
        assert!(cache.is_cached(false, idx));
        assert!(!cache.is_cached(true, idx));
        let second = cache.get(&board, &dawg, false, idx);
        assert_eq!(first, second);
        assert_eq!(first, compute_cross_check(&board, dim, &dawg, false, idx));
        assert_eq!(cache.num_cached(), 1);
    }

    #[test]
    fn derive_drops_only_affected_lanes() {
        let alphabet = alphabet::make_english_alphabet();
        let dawg = build::build_from_strs(&alphabet, &["CAT"]).unwrap();
        let (dim, board) = c_over_t();
        let cache = CrossChecks::new(dim);
        for idx in 0..dim.num_squares() {
            cache.get(&board, &dawg, false, idx);
            cache.get(&board, &dawg, true, idx);
        }
        // a tile lands on (1, 1)
        let next = cache.derive(&[dim.at_row_col(1, 1)]);
        assert!(!next.is_cached(false, dim.at_row_col(2, 1)));
        assert!(next.is_cached(true, dim.at_row_col(2, 1)));
        assert!(!next.is_cached(true, dim.at_row_col(1, 0)));
        assert!(next.is_cached(false, dim.at_row_col(1, 0)));
        assert!(next.is_cached(false, dim.at_row_col(0, 0)));
        assert_eq!(next.num_cached(), 18 - 3 - 3);
    }
}
