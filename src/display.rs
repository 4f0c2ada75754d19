// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, board_layout, cursor, dawg, error, matrix, movegen, play_scorer};
use std::fmt::Write;

#[inline(always)]
pub fn empty_label(board_layout: &board_layout::BoardLayout, row: i8, col: i8) -> &'static str {
    board_layout
        .kind_at(board_layout.dim().at_row_col(row, col))
        .glyph()
}

#[inline(always)]
pub fn board_label<'a>(
    alphabet: &'a alphabet::Alphabet,
    board_layout: &board_layout::BoardLayout,
    board_tiles: &[u8],
    row: i8,
    col: i8,
) -> &'a str {
    alphabet
        .from_board(board_tiles[board_layout.dim().at_row_col(row, col)])
        .unwrap_or_else(|| empty_label(board_layout, row, col))
}

#[inline(always)]
fn column_label(col: i8) -> char {
    ((col as u8) + 0x41) as char
}

fn write_column_labels(s: &mut String, cols: i8) {
    s.push_str("  ");
    for c in 0..cols {
        s.push(' ');
        s.push(column_label(c));
    }
    s.push('\n');
}

fn write_border(s: &mut String, cols: i8) {
    s.push_str("  +");
    for _ in 1..cols {
        s.push_str("--");
    }
    s.push_str("-+\n");
}

pub fn board_to_string(
    alphabet: &alphabet::Alphabet,
    board_layout: &board_layout::BoardLayout,
    board_tiles: &[u8],
) -> String {
    let dim = board_layout.dim();
    let mut s = String::new();
    write_column_labels(&mut s, dim.cols);
    write_border(&mut s, dim.cols);
    for r in 0..dim.rows {
        let _ = write!(s, "{:2}|", r + 1);
        for c in 0..dim.cols {
            if c > 0 {
                s.push(' ');
            }
            s.push_str(board_label(alphabet, board_layout, board_tiles, r, c));
        }
        let _ = writeln!(s, "|{}", r + 1);
    }
    write_border(&mut s, dim.cols);
    write_column_labels(&mut s, dim.cols);
    s
}

pub fn print_board(
    alphabet: &alphabet::Alphabet,
    board_layout: &board_layout::BoardLayout,
    board_tiles: &[u8],
) {
    print!("{}", board_to_string(alphabet, board_layout, board_tiles));
}

// One line per row, one label per square. Any premium glyph or '.' is empty.
pub fn parse_board(
    alphabet: &alphabet::Alphabet,
    board_layout: &board_layout::BoardLayout,
    text: &str,
) -> error::Returns<Vec<u8>> {
    let dim = board_layout.dim();
    let alphabet_reader = alphabet::AlphabetReader::new_for_plays(alphabet);
    let mut board_tiles = Vec::with_capacity(dim.num_squares());
    let lines = text.lines().collect::<Vec<_>>();
    let num_lines = lines
        .iter()
        .rposition(|line| !line.trim().is_empty())
        .map_or(0, |p| p + 1);
    if num_lines != dim.rows as usize {
        return_error!(format!("expected {} rows, got {}", dim.rows, num_lines));
    }
    for (r, line) in lines[..num_lines].iter().enumerate() {
        let sb = line.as_bytes();
        let mut ix = 0;
        let mut num_cols = 0;
        while ix < sb.len() {
            if board_layout::SquareKind::from_glyph(sb[ix] as char).is_some() {
                board_tiles.push(0);
                ix += 1;
            } else if let Some((tile, end_ix)) = alphabet_reader.next_tile(sb, ix) {
                board_tiles.push(tile);
                ix = end_ix;
            } else {
                return_error!(format!("invalid tile in row {}: {:?}", r + 1, line));
            }
            num_cols += 1;
        }
        // short rows are padded with empty squares
        while num_cols < dim.cols as usize {
            board_tiles.push(0);
            num_cols += 1;
        }
        if num_cols != dim.cols as usize {
            return_error!(format!("row {} has {} squares, expected {}", r + 1, num_cols, dim.cols));
        }
    }
    Ok(board_tiles)
}

// 8H for across from row 8 column H, H8 for down. Board tiles are parenthesized.
pub fn fmt_play(
    alphabet: &alphabet::Alphabet,
    dim: matrix::Dim,
    board_tiles: &[u8],
    play: &movegen::Play,
) -> String {
    let mut s = String::new();
    match play {
        movegen::Play::Exchange { tiles } => {
            if tiles.is_empty() {
                s.push_str("pass");
            } else {
                let _ = write!(s, "xchg {}", alphabet.fmt_rack(tiles));
            }
        }
        movegen::Play::Place {
            down,
            lane,
            idx,
            word,
            score,
        } => {
            let strider = dim.lane(*down, *lane);
            if *down {
                let _ = write!(s, "{}{} ", column_label(*lane), idx + 1);
            } else {
                let _ = write!(s, "{}{} ", lane + 1, column_label(*idx));
            }
            let mut inside = false;
            for (i, &w) in (*idx..).zip(word.iter()) {
                if w == 0 {
                    if !inside {
                        s.push('(');
                        inside = true;
                    }
                    s.push_str(alphabet.from_board(board_tiles[strider.at(i)]).unwrap_or("?"));
                } else {
                    if inside {
                        s.push(')');
                        inside = false;
                    }
                    s.push_str(alphabet.from_board(w).unwrap_or("?"));
                }
            }
            if inside {
                s.push(')');
            }
            let _ = write!(s, " {}", score);
        }
    }
    s
}

pub fn dump_cursor(alphabet: &alphabet::Alphabet, dawg: &dawg::Dawg, cursor: &cursor::Cursor) -> String {
    match cursor.node(dawg) {
        None => "invalid cursor".into(),
        Some(node) => format!(
            "cursor {:?} from node {} at node {}{} via edges {:?}",
            alphabet.fmt_word(&cursor.letters(dawg)).to_string(),
            cursor.start(),
            node,
            if cursor.accepts(dawg) { " (word)" } else { "" },
            cursor.edges(),
        ),
    }
}

pub fn dump_partial_move(alphabet: &alphabet::Alphabet, pm: &movegen::PartialMove) -> String {
    let mut s = format!(
        "{} lane {} anchor {} squares {}..{}:",
        if pm.down { "down" } else { "across" },
        pm.lane,
        pm.anchor,
        pm.start,
        pm.end
    );
    for t in &pm.tiles {
        let _ = write!(
            s,
            " {}@{}{}",
            alphabet.from_board(t.tile).unwrap_or("?"),
            t.idx,
            if t.is_new { "" } else { "*" }
        );
    }
    let _ = write!(s, " rack {}", alphabet.fmt_rack(pm.rack.tiles()));
    s
}

pub fn dump_score(breakdown: &play_scorer::ScoreBreakdown) -> String {
    let mut s = format!("main {}", breakdown.main);
    for cross in &breakdown.cross {
        let _ = write!(s, " + cross {}", cross);
    }
    if breakdown.bonus != 0 {
        let _ = write!(s, " + bonus {}", breakdown.bonus);
    }
    let _ = write!(s, " = {}", breakdown.total);
    s
}

pub fn dump_dawg_stats(dawg: &dawg::Dawg) -> String {
    format!(
        "{} words, {} nodes, {} edges, {} registered",
        dawg.word_count(),
        dawg.node_count(),
        dawg.edge_count(),
        dawg.num_registered()
    )
}

pub fn print_dawg_words(alphabet: &alphabet::Alphabet, dawg: &dawg::Dawg) {
    dawg.for_each_word(|word| println!("{}", alphabet.fmt_word(word)));
}

#[cfg(test)]
mod tests {
    use super::super::{build, rack};
    use super::*;

    fn small_layout() -> board_layout::BoardLayout {
        board_layout::BoardLayout::from_rows(&["=  ", " * ", "  '"]).unwrap()
    }

    #[test]
    fn renders_tiles_over_premiums() {
        let alphabet = alphabet::make_english_alphabet();
        let layout = small_layout();
        let board_tiles = [0, 0, 0, 1, 20 | 0x80, 0, 0, 0, 0];
        assert_eq!(
            board_to_string(&alphabet, &layout, &board_tiles),
            "   A B C\n  +-----+\n 1|=    |1\n 2|A t  |2\n 3|    '|3\n  +-----+\n   A B C\n"
        );
    }

    #[test]
    fn parses_what_it_shows() {
        let alphabet = alphabet::make_english_alphabet();
        let layout = small_layout();
        let board_tiles = parse_board(&alphabet, &layout, "=..\nAt\n..'\n\n").unwrap();
        assert_eq!(board_tiles, vec![0, 0, 0, 1, 20 | 0x80, 0, 0, 0, 0]);
        assert!(parse_board(&alphabet, &layout, "...\n...\n").is_err());
        assert!(parse_board(&alphabet, &layout, "....\n...\n...").is_err());
        assert!(parse_board(&alphabet, &layout, "..1\n...\n...").is_err());
    }

    #[test]
    fn play_notation() {
        let alphabet = alphabet::make_english_alphabet();
        let dim = matrix::Dim { rows: 3, cols: 3 };
        let board_tiles = [0, 0, 0, 1, 0, 0, 0, 0, 0];
        let across = movegen::Play::Place {
            down: false,
            lane: 1,
            idx: 0,
            word: vec![0, 20, 19 | 0x80].into_boxed_slice(),
            score: 3,
        };
        assert_eq!(fmt_play(&alphabet, dim, &board_tiles, &across), "2A (A)Ts 3");
        let down = movegen::Play::Place {
            down: true,
            lane: 2,
            idx: 0,
            word: vec![1, 20].into_boxed_slice(),
            score: 2,
        };
        assert_eq!(fmt_play(&alphabet, dim, &board_tiles, &down), "C1 AT 2");
        let xchg = movegen::Play::Exchange {
            tiles: vec![0, 17].into_boxed_slice(),
        };
        assert_eq!(fmt_play(&alphabet, dim, &board_tiles, &xchg), "xchg ?Q");
    }

    #[test]
    fn diagnostic_dumps() {
        let alphabet = alphabet::make_english_alphabet();
        let dawg = build::build_from_strs(&alphabet, &["AT"]).unwrap();
        let at = dawg.transitions(&dawg.root_cursor(), &[1, 20]);
        assert!(dump_cursor(&alphabet, &dawg, &at).contains("\"AT\""));
        assert!(dump_cursor(&alphabet, &dawg, &at).contains("(word)"));
        assert_eq!(dump_cursor(&alphabet, &dawg, &dawg.transition(&at, 1)), "invalid cursor");
        let breakdown = play_scorer::ScoreBreakdown {
            main: 10,
            cross: vec![4],
            bonus: 50,
            total: 64,
        };
        assert_eq!(dump_score(&breakdown), "main 10 + cross 4 + bonus 50 = 64");
        assert_eq!(dump_dawg_stats(&dawg), "1 words, 3 nodes, 2 edges, 2 registered");
        let pm = movegen::PartialMove {
            anchor: 1,
            down: false,
            lane: 0,
            start: 0,
            end: 2,
            rack: rack::Rack::new(&[0]),
            cursor: at,
            tiles: vec![
                movegen::PlacedTile {
                    tile: 1,
                    idx: 0,
                    is_new: false,
                },
                movegen::PlacedTile {
                    tile: 20,
                    idx: 1,
                    is_new: true,
                },
            ],
        };
        assert_eq!(
            dump_partial_move(&alphabet, &pm),
            "across lane 0 anchor 1 squares 0..2: A@0* T@1 rack ?"
        );
    }
}
