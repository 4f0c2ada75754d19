// Copyright (C) 2020-2026 Andy Kurnia.

use super::{matrix, movegen};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScoreBreakdown {
    pub main: i16,
    // one per perpendicular word, in placement order
    pub cross: Vec<i16>,
    pub bonus: i16,
    pub total: i16,
}

// Start and end (exclusive) of the run of tiles through idx along strider,
// where idx itself is treated as occupied.
fn run_around(board_tiles: &[u8], strider: matrix::Strider, idx: i8) -> (i8, i8) {
    let mut start = idx;
    while start > 0 && board_tiles[strider.at(start - 1)] != 0 {
        start -= 1;
    }
    let mut end = idx + 1;
    while end < strider.len() && board_tiles[strider.at(end)] != 0 {
        end += 1;
    }
    (start, end)
}

#[inline(always)]
fn saturate(v: i32) -> i16 {
    v.clamp(i16::MIN as i32, i16::MAX as i32) as i16
}

// Assume play is legal. The score stored in the play is ignored.
// Sums are kept in i32 and saturate into the i16 breakdown.
pub fn compute_score(
    board_snapshot: &movegen::BoardSnapshot,
    play: &movegen::Play,
) -> ScoreBreakdown {
    let mut ret = ScoreBreakdown::default();
    let movegen::Play::Place {
        down,
        lane,
        idx,
        word,
        ..
    } = play
    else {
        return ret;
    };
    let game_config = board_snapshot.game_config;
    let alphabet = game_config.alphabet();
    let board_layout = game_config.board_layout();
    let premiums = board_layout.premiums();
    let dim = board_layout.dim();
    let strider = dim.lane(*down, *lane);
    let mut num_played = 0;

    let main = {
        let mut word_multiplier = 1;
        let mut word_score = 0i32;
        for (i, &tile) in (*idx..).zip(word.iter()) {
            let strider_at_i = strider.at(i);
            if tile != 0 {
                let premium = premiums[strider_at_i];
                num_played += 1;
                word_multiplier = word_multiplier.max(premium.word_multiplier);
                word_score += alphabet.score(tile) as i32 * premium.tile_multiplier as i32;
            } else {
                word_score += alphabet.score(board_snapshot.board_tiles[strider_at_i]) as i32;
            }
        }
        word_score * word_multiplier as i32
    };
    let mut total = main;
    ret.main = saturate(main);

    for (i, &tile) in (*idx..).zip(word.iter()) {
        if tile == 0 {
            continue;
        }
        let perpendicular_strider = dim.lane(!*down, i);
        let (start, end) = run_around(board_snapshot.board_tiles, perpendicular_strider, *lane);
        if end - start < 2 {
            // no perpendicular tile
            continue;
        }
        let premium = premiums[perpendicular_strider.at(*lane)];
        let mut word_score = alphabet.score(tile) as i32 * premium.tile_multiplier as i32;
        for j in (start..end).filter(|&j| j != *lane) {
            word_score +=
                alphabet.score(board_snapshot.board_tiles[perpendicular_strider.at(j)]) as i32;
        }
        let cross = word_score * premium.word_multiplier as i32;
        total += cross;
        ret.cross.push(saturate(cross));
    }

    ret.bonus = game_config.num_played_bonus(num_played);
    ret.total = saturate(total + ret.bonus as i32);
    ret
}

// Every word the play forms, main word first, as plain letters.
pub fn words_formed(board_snapshot: &movegen::BoardSnapshot, play: &movegen::Play) -> Vec<Vec<u8>> {
    let movegen::Play::Place {
        down,
        lane,
        idx,
        word,
        ..
    } = play
    else {
        return Vec::new();
    };
    let dim = board_snapshot.game_config.board_layout().dim();
    let strider = dim.lane(*down, *lane);
    let mut board_tiles = board_snapshot.board_tiles.to_vec();
    for (i, &tile) in (*idx..).zip(word.iter()) {
        if tile != 0 {
            board_tiles[strider.at(i)] = tile;
        }
    }
    let read = |strider: matrix::Strider, start: i8, end: i8| {
        (start..end)
            .map(|j| board_tiles[strider.at(j)] & 0x7f)
            .collect::<Vec<_>>()
    };
    let mut ret = Vec::new();
    let (start, end) = run_around(&board_tiles, strider, *idx);
    ret.push(read(strider, start, end));
    for (i, &tile) in (*idx..).zip(word.iter()) {
        if tile == 0 {
            continue;
        }
        let perpendicular_strider = dim.lane(!*down, i);
        let (start, end) = run_around(&board_tiles, perpendicular_strider, *lane);
        if end - start >= 2 {
            ret.push(read(perpendicular_strider, start, end));
        }
    }
    ret
}

// Every word formed is in the lexicon, the main word has at least two letters,
// and the play spans the whole main word.
pub fn play_is_valid(board_snapshot: &movegen::BoardSnapshot, play: &movegen::Play) -> bool {
    match play {
        movegen::Play::Exchange { .. } => true,
        movegen::Play::Place { word, .. } => {
            let words = words_formed(board_snapshot, play);
            words
                .first()
                .is_some_and(|w| w.len() >= 2 && w.len() == word.len())
                && words.iter().all(|w| board_snapshot.dawg.matches_word(w))
        }
    }
}

// Some new tile touches the board, or covers the star when the board is empty.
pub fn play_is_connected(board_snapshot: &movegen::BoardSnapshot, play: &movegen::Play) -> bool {
    let movegen::Play::Place {
        down,
        lane,
        idx,
        word,
        ..
    } = play
    else {
        return true;
    };
    let board_layout = board_snapshot.game_config.board_layout();
    let dim = board_layout.dim();
    let strider = dim.lane(*down, *lane);
    let star = dim.at_row_col(board_layout.star_row(), board_layout.star_col());
    let board_is_empty = board_snapshot.is_empty();
    (*idx..).zip(word.iter()).any(|(i, &tile)| {
        tile != 0
            && if board_is_empty {
                strider.at(i) == star
            } else {
                board_snapshot.is_anchor(strider.at(i))
            }
    })
}

#[cfg(test)]
mod tests {
    use super::super::{alphabet, board_layout, build, cross_check, game_config};
    use super::*;

    fn config() -> game_config::GameConfig {
        // row 0: DL DW plain, row 1: TW TL star, row 2 plain
        let layout = board_layout::BoardLayout::from_rows(&["'- ", "=\"*", "   "]).unwrap();
        game_config::make_game_config(alphabet::make_english_alphabet(), layout, 3, 50)
    }

    fn place(down: bool, lane: i8, idx: i8, word: &[u8]) -> movegen::Play {
        movegen::Play::Place {
            down,
            lane,
            idx,
            word: word.into(),
            score: 0,
        }
    }

    #[test]
    fn letter_and_word_premiums() {
        let game_config = config();
        let dawg = build::build_from_strs(game_config.alphabet(), &["BA"]).unwrap();
        let board_tiles = [0u8; 9];
        let cross_checks = cross_check::CrossChecks::new(game_config.board_layout().dim());
        let board_snapshot = movegen::BoardSnapshot {
            board_tiles: &board_tiles,
            game_config: &game_config,
            dawg: &dawg,
            cross_checks: &cross_checks,
        };
        // B (3) on double letter, A (1) on double word
        let score = compute_score(&board_snapshot, &place(false, 0, 0, &[2, 1]));
        assert_eq!(score.main, (3 * 2 + 1) * 2);
        assert!(score.cross.is_empty());
        assert_eq!(score.total, 14);
    }

    #[test]
    fn joker_is_worth_nothing_even_on_premiums() {
        let game_config = config();
        let dawg = build::build_from_strs(game_config.alphabet(), &["ZA"]).unwrap();
        let board_tiles = [0u8; 9];
        let cross_checks = cross_check::CrossChecks::new(game_config.board_layout().dim());
        let board_snapshot = movegen::BoardSnapshot {
            board_tiles: &board_tiles,
            game_config: &game_config,
            dawg: &dawg,
            cross_checks: &cross_checks,
        };
        let score = compute_score(&board_snapshot, &place(false, 0, 0, &[26 | 0x80, 1]));
        assert_eq!(score.main, 2);
        let score = compute_score(&board_snapshot, &place(false, 1, 0, &[26 | 0x80, 1]));
        // joker on triple word, A on triple letter
        assert_eq!(score.main, 3 * 3);
    }

    #[test]
    fn cross_words_and_bingo() {
        let game_config = config();
        let dawg = build::build_from_strs(game_config.alphabet(), &["AB", "BAA", "AA"]).unwrap();
        let dim = game_config.board_layout().dim();
        let mut board_tiles = [0u8; 9];
        // A sits at (2, 0)
        board_tiles[dim.at_row_col(2, 0)] = 1;
        let cross_checks = cross_check::CrossChecks::new(dim);
        let board_snapshot = movegen::BoardSnapshot {
            board_tiles: &board_tiles,
            game_config: &game_config,
            dawg: &dawg,
            cross_checks: &cross_checks,
        };
        // BAA across row 1: B on TW, A on TL, A on star.
        let play = place(false, 1, 0, &[2, 1, 1]);
        let score = compute_score(&board_snapshot, &play);
        assert_eq!(score.main, (3 + 3 + 1) * 3);
        // BA down column 0 is not a word here but still scores as formed
        assert_eq!(score.cross, vec![(3 + 1) * 3]);
        assert_eq!(score.bonus, 50);
        assert_eq!(score.total, 21 + 12 + 50);
        assert!(!play_is_valid(&board_snapshot, &play));
        let words = words_formed(&board_snapshot, &play);
        assert_eq!(words, vec![vec![2, 1, 1], vec![2, 1]]);
    }

    #[test]
    fn board_tiles_count_face_value() {
        let game_config = config();
        let dawg = build::build_from_strs(game_config.alphabet(), &["AB"]).unwrap();
        let dim = game_config.board_layout().dim();
        let mut board_tiles = [0u8; 9];
        board_tiles[dim.at_row_col(0, 0)] = 1;
        let cross_checks = cross_check::CrossChecks::new(dim);
        let board_snapshot = movegen::BoardSnapshot {
            board_tiles: &board_tiles,
            game_config: &game_config,
            dawg: &dawg,
            cross_checks: &cross_checks,
        };
        let play = place(false, 0, 0, &[0, 2]);
        let score = compute_score(&board_snapshot, &play);
        assert_eq!(score.main, (1 + 3) * 2);
        assert_eq!(score.bonus, 0);
        assert!(play_is_valid(&board_snapshot, &play));
    }

    #[test]
    fn play_must_cover_the_whole_run() {
        let game_config = config();
        let dawg = build::build_from_strs(game_config.alphabet(), &["AT", "ATE"]).unwrap();
        let dim = game_config.board_layout().dim();
        let mut board_tiles = [0u8; 9];
        board_tiles[dim.at_row_col(2, 0)] = 1;
        board_tiles[dim.at_row_col(2, 1)] = 20;
        let cross_checks = cross_check::CrossChecks::new(dim);
        let board_snapshot = movegen::BoardSnapshot {
            board_tiles: &board_tiles,
            game_config: &game_config,
            dawg: &dawg,
            cross_checks: &cross_checks,
        };
        assert!(!play_is_valid(&board_snapshot, &place(false, 2, 2, &[5])));
        assert!(play_is_valid(&board_snapshot, &place(false, 2, 0, &[0, 0, 5])));
        assert!(play_is_connected(&board_snapshot, &place(false, 2, 0, &[0, 0, 5])));
        // row 0 does not touch row 2
        assert!(!play_is_connected(&board_snapshot, &place(false, 0, 0, &[1, 20])));
        assert!(play_is_connected(&board_snapshot, &place(false, 1, 0, &[1, 20])));
    }

    #[test]
    fn opening_must_cover_the_star() {
        let game_config = config();
        let dawg = build::build_from_strs(game_config.alphabet(), &["AT"]).unwrap();
        let board_tiles = [0u8; 9];
        let cross_checks = cross_check::CrossChecks::new(game_config.board_layout().dim());
        let board_snapshot = movegen::BoardSnapshot {
            board_tiles: &board_tiles,
            game_config: &game_config,
            dawg: &dawg,
            cross_checks: &cross_checks,
        };
        assert!(!play_is_connected(&board_snapshot, &place(false, 0, 0, &[1, 20])));
        assert!(play_is_connected(&board_snapshot, &place(false, 1, 1, &[1, 20])));
        assert!(play_is_connected(&board_snapshot, &place(true, 2, 0, &[1, 20])));
    }

    #[test]
    fn huge_scores_saturate() {
        let alphabet = alphabet::Alphabet::new(vec![
            alphabet::Tile {
                label: "?".into(),
                blank_label: "?".into(),
                freq: 0,
                score: 0,
            },
            alphabet::Tile {
                label: "Z".into(),
                blank_label: "z".into(),
                freq: 64,
                score: i8::MAX,
            },
        ])
        .unwrap();
        // triple word then 63 triple letters across the top, star below
        let mut rows = vec![format!("={}", "\"".repeat(63)), format!("*{}", " ".repeat(63))];
        rows.resize(64, " ".repeat(64));
        let layout = board_layout::BoardLayout::from_rows(&rows).unwrap();
        let game_config = game_config::make_game_config(alphabet, layout, 7, 50);
        let dawg = build::build(game_config.alphabet(), &[vec![1u8; 64]]).unwrap();
        let board_tiles = vec![0u8; 64 * 64];
        let cross_checks = cross_check::CrossChecks::new(game_config.board_layout().dim());
        let board_snapshot = movegen::BoardSnapshot {
            board_tiles: &board_tiles,
            game_config: &game_config,
            dawg: &dawg,
            cross_checks: &cross_checks,
        };
        let score = compute_score(&board_snapshot, &place(false, 0, 0, &[1u8; 64]));
        assert_eq!(score.main, i16::MAX);
        assert_eq!(score.bonus, 50);
        assert_eq!(score.total, i16::MAX);
    }
}
