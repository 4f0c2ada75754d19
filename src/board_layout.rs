// Copyright (C) 2020-2026 Andy Kurnia.

use super::{error, matrix};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Premium {
    pub word_multiplier: i8,
    pub tile_multiplier: i8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SquareKind {
    Plain,
    DoubleLetter,
    TripleLetter,
    DoubleWord,
    TripleWord,
    Center,
}

impl SquareKind {
    #[inline(always)]
    pub fn premium(self) -> Premium {
        let (word_multiplier, tile_multiplier) = match self {
            SquareKind::Plain => (1, 1),
            SquareKind::DoubleLetter => (1, 2),
            SquareKind::TripleLetter => (1, 3),
            SquareKind::DoubleWord => (2, 1),
            SquareKind::TripleWord => (3, 1),
            // the star doubles the opening word
            SquareKind::Center => (2, 1),
        };
        Premium {
            word_multiplier,
            tile_multiplier,
        }
    }

    // same glyphs as the board display
    pub fn from_glyph(c: char) -> Option<SquareKind> {
        match c {
            ' ' | '.' => Some(SquareKind::Plain),
            '\'' => Some(SquareKind::DoubleLetter),
            '"' => Some(SquareKind::TripleLetter),
            '-' => Some(SquareKind::DoubleWord),
            '=' => Some(SquareKind::TripleWord),
            '*' => Some(SquareKind::Center),
            _ => None,
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            SquareKind::Plain => " ",
            SquareKind::DoubleLetter => "'",
            SquareKind::TripleLetter => "\"",
            SquareKind::DoubleWord => "-",
            SquareKind::TripleWord => "=",
            SquareKind::Center => "*",
        }
    }
}

#[derive(Clone, Debug)]
pub struct BoardLayout {
    kinds: Box<[SquareKind]>,
    premiums: Box<[Premium]>,
    dim: matrix::Dim,
    star_row: i8,
    star_col: i8,
}

impl BoardLayout {
    // One string per row. Exactly one '*' marks the opening square.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> error::Returns<BoardLayout> {
        let num_rows = rows.len();
        if num_rows == 0 || num_rows > 64 {
            return_error!(format!("board cannot have {} rows", num_rows));
        }
        let mut kinds = Vec::new();
        let mut num_cols = None;
        let mut star = None;
        for (r, row) in rows.iter().enumerate() {
            let mut this_cols = 0;
            for c in row.as_ref().chars() {
                let Some(kind) = SquareKind::from_glyph(c) else {
                    return_error!(format!("invalid square {:?} in row {}", c, r + 1));
                };
                if kind == SquareKind::Center {
                    if star.is_some() {
                        return_error!("board has more than one star".into());
                    }
                    star = Some((r as i8, this_cols as i8));
                }
                kinds.push(kind);
                this_cols += 1;
            }
            match num_cols {
                None => num_cols = Some(this_cols),
                Some(n) if n != this_cols => {
                    return_error!(format!("row {} has {} squares, expected {}", r + 1, this_cols, n));
                }
                _ => {}
            }
        }
        let num_cols = num_cols.unwrap_or(0);
        if num_cols == 0 || num_cols > 64 {
            return_error!(format!("board cannot have {} columns", num_cols));
        }
        let Some((star_row, star_col)) = star else {
            return_error!("board has no star".into());
        };
        let premiums = kinds.iter().map(|k| k.premium()).collect();
        Ok(BoardLayout {
            kinds: kinds.into_boxed_slice(),
            premiums,
            dim: matrix::Dim {
                rows: num_rows as i8,
                cols: num_cols as i8,
            },
            star_row,
            star_col,
        })
    }

    #[inline(always)]
    pub fn dim(&self) -> matrix::Dim {
        self.dim
    }

    #[inline(always)]
    pub fn star_row(&self) -> i8 {
        self.star_row
    }

    #[inline(always)]
    pub fn star_col(&self) -> i8 {
        self.star_col
    }

    #[inline(always)]
    pub fn premiums(&self) -> &[Premium] {
        &self.premiums
    }

    #[inline(always)]
    pub fn kind_at(&self, idx: usize) -> SquareKind {
        self.kinds[idx]
    }

    #[inline(always)]
    pub fn premium_at(&self, row: i8, col: i8) -> Premium {
        self.premiums[self.dim.at_row_col(row, col)]
    }
}

pub static STANDARD_ROWS: [&str; 15] = [
    "=  '   =   '  =",
    " -   \"   \"   - ",
    "  -   ' '   -  ",
    "'  -   '   -  '",
    "    -     -    ",
    " \"   \"   \"   \" ",
    "  '   ' '   '  ",
    "=  '   *   '  =",
    "  '   ' '   '  ",
    " \"   \"   \"   \" ",
    "    -     -    ",
    "'  -   '   -  '",
    "  -   ' '   -  ",
    " -   \"   \"   - ",
    "=  '   =   '  =",
];

pub fn make_standard_board_layout() -> BoardLayout {
    match BoardLayout::from_rows(&STANDARD_ROWS) {
        Ok(x) => x,
        Err(e) => unreachable!("standard layout: {}", e),
    }
}
