// Copyright (C) 2020-2026 Andy Kurnia.

// One row or column of the board, addressed by position along the lane.
#[derive(Clone, Copy, Debug)]
pub struct Strider {
    base: i16,
    step: i8,
    len: i8,
}

impl Strider {
    #[inline(always)]
    pub fn base(&self) -> i16 {
        self.base
    }

    #[inline(always)]
    pub fn step(&self) -> i8 {
        self.step
    }

    #[inline(always)]
    pub fn len(&self) -> i8 {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline(always)]
    pub fn at(&self, idx: i8) -> usize {
        ((self.base as isize) + (idx as isize) * (self.step as isize)) as usize
    }

    // idx may be out of range
    #[inline(always)]
    pub fn contains(&self, idx: i8) -> bool {
        idx >= 0 && idx < self.len
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Dim {
    pub rows: i8,
    pub cols: i8,
}

impl Dim {
    #[inline(always)]
    pub fn across(&self, row: i8) -> Strider {
        Strider {
            base: (row as i16) * (self.cols as i16),
            step: 1,
            len: self.cols,
        }
    }

    #[inline(always)]
    pub fn down(&self, col: i8) -> Strider {
        Strider {
            base: col as i16,
            step: self.cols,
            len: self.rows,
        }
    }

    #[inline(always)]
    pub fn lane(&self, down: bool, lane: i8) -> Strider {
        if down {
            self.down(lane)
        } else {
            self.across(lane)
        }
    }

    // number of lanes in the given direction
    #[inline(always)]
    pub fn num_lanes(&self, down: bool) -> i8 {
        if down { self.cols } else { self.rows }
    }

    #[inline(always)]
    pub fn at_row_col(&self, row: i8, col: i8) -> usize {
        (((row as isize) * (self.cols as isize)) + (col as isize)) as usize
    }

    #[inline(always)]
    pub fn row_col(&self, idx: usize) -> (i8, i8) {
        (
            (idx / self.cols as usize) as i8,
            (idx % self.cols as usize) as i8,
        )
    }

    #[inline(always)]
    pub fn num_squares(&self) -> usize {
        (self.rows as usize) * (self.cols as usize)
    }

    // (lane, idx) of a square when reading in the given direction
    #[inline(always)]
    pub fn lane_idx(&self, down: bool, row: i8, col: i8) -> (i8, i8) {
        if down { (col, row) } else { (row, col) }
    }

    pub fn orthogonal_neighbors(&self, row: i8, col: i8) -> impl Iterator<Item = usize> + '_ {
        [(-1i8, 0i8), (1, 0), (0, -1), (0, 1)]
            .into_iter()
            .map(move |(dr, dc)| (row + dr, col + dc))
            .filter(move |&(r, c)| r >= 0 && r < self.rows && c >= 0 && c < self.cols)
            .map(move |(r, c)| self.at_row_col(r, c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lanes_address_the_same_squares() {
        let dim = Dim { rows: 3, cols: 4 };
        assert_eq!(dim.across(1).at(2), 6);
        assert_eq!(dim.down(2).at(1), 6);
        assert_eq!(dim.row_col(6), (1, 2));
        assert_eq!(dim.lane_idx(true, 1, 2), (2, 1));
        assert_eq!(dim.num_lanes(true), 4);
        assert!(!dim.across(0).contains(4));
    }

    #[test]
    fn corner_has_two_neighbors() {
        let dim = Dim { rows: 3, cols: 3 };
        assert_eq!(dim.orthogonal_neighbors(0, 0).collect::<Vec<_>>(), vec![3, 1]);
        assert_eq!(dim.orthogonal_neighbors(1, 1).count(), 4);
    }
}
