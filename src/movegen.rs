// Copyright (C) 2020-2026 Andy Kurnia.

use super::{cross_check, cursor, dawg, error, game_config, letter_set, matrix, play_scorer, rack};

// In a Place, word has 0 for tiles already on the board.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Play {
    Exchange {
        tiles: Box<[u8]>,
    },
    Place {
        down: bool,
        lane: i8,
        idx: i8,
        word: Box<[u8]>,
        score: i16,
    },
}

impl Play {
    #[inline(always)]
    pub fn score(&self) -> i16 {
        match self {
            Play::Exchange { .. } => 0,
            Play::Place { score, .. } => *score,
        }
    }

    // tiles leaving the rack, jokers as placed
    pub fn tiles_played(&self) -> Vec<u8> {
        match self {
            Play::Exchange { tiles } => tiles.to_vec(),
            Play::Place { word, .. } => word.iter().copied().filter(|&t| t != 0).collect(),
        }
    }
}

pub struct BoardSnapshot<'a> {
    pub board_tiles: &'a [u8],
    pub game_config: &'a game_config::GameConfig,
    pub dawg: &'a dawg::Dawg,
    pub cross_checks: &'a cross_check::CrossChecks,
}

impl BoardSnapshot<'_> {
    #[inline(always)]
    pub fn cross_check(&self, down: bool, idx: usize) -> letter_set::LetterSet {
        self.cross_checks
            .get(self.board_tiles, self.dawg, down, idx)
    }

    pub fn is_empty(&self) -> bool {
        self.board_tiles.iter().all(|&t| t == 0)
    }

    // empty square touching a tile
    pub fn is_anchor(&self, idx: usize) -> bool {
        if self.board_tiles[idx] != 0 {
            return false;
        }
        let dim = self.game_config.board_layout().dim();
        let (row, col) = dim.row_col(idx);
        dim.orthogonal_neighbors(row, col)
            .any(|i| self.board_tiles[i] != 0)
    }

    // Positions along the lane. An empty board only opens the star, and only across.
    pub fn anchors(&self, down: bool, lane: i8) -> Vec<i8> {
        let board_layout = self.game_config.board_layout();
        let dim = board_layout.dim();
        if self.is_empty() {
            return if !down && lane == board_layout.star_row() {
                vec![board_layout.star_col()]
            } else {
                Vec::new()
            };
        }
        let strider = dim.lane(down, lane);
        (0..strider.len())
            .filter(|&i| self.is_anchor(strider.at(i)))
            .collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacedTile {
    pub tile: u8,
    pub idx: usize,
    pub is_new: bool,
}

// A placement being grown along one lane. Squares start..end are covered.
#[derive(Clone, Debug)]
pub struct PartialMove {
    pub anchor: i8,
    pub down: bool,
    pub lane: i8,
    pub start: i8,
    pub end: i8,
    pub rack: rack::Rack,
    pub cursor: cursor::Cursor,
    pub tiles: Vec<PlacedTile>,
}

impl PartialMove {
    fn new(down: bool, lane: i8, anchor: i8, start: i8, rack: rack::Rack, cursor: cursor::Cursor) -> Self {
        Self {
            anchor,
            down,
            lane,
            start,
            end: start,
            rack,
            cursor,
            tiles: Vec::new(),
        }
    }

    fn placed(&self, tile: PlacedTile, rack: rack::Rack, cursor: cursor::Cursor) -> Self {
        let mut tiles = Vec::with_capacity(self.tiles.len() + 1);
        tiles.extend_from_slice(&self.tiles);
        tiles.push(tile);
        Self {
            anchor: self.anchor,
            down: self.down,
            lane: self.lane,
            start: self.start,
            end: self.end + 1,
            rack,
            cursor,
            tiles,
        }
    }

    pub fn num_played(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_new).count()
    }

    pub fn to_play(&self, score: i16) -> Play {
        Play::Place {
            down: self.down,
            lane: self.lane,
            idx: self.start,
            word: self
                .tiles
                .iter()
                .map(|t| if t.is_new { t.tile } else { 0 })
                .collect(),
            score,
        }
    }
}

struct Env<'a, F: FnMut(&PartialMove)> {
    board_snapshot: &'a BoardSnapshot<'a>,
    strider: matrix::Strider,
    down: bool,
    anchor: i8,
    found: &'a mut F,
}

// (rack index, tile to place) pairs that keep the cursor valid and satisfy the
// square's cross-check. Jokers branch into every letter that fits.
fn choices<F: FnMut(&PartialMove)>(env: &Env<'_, F>, pm: &PartialMove) -> Vec<(usize, u8)> {
    let dawg = env.board_snapshot.dawg;
    let Some(node) = pm.cursor.node(dawg) else {
        return Vec::new();
    };
    let cross = env
        .board_snapshot
        .cross_check(env.down, env.strider.at(pm.end));
    let mut ret = Vec::new();
    for i in pm.rack.distinct_indices() {
        let tile = pm.rack.tiles()[i];
        if tile == 0 {
            for edge in dawg.edges_of(node) {
                if cross.contains(edge.letter()) {
                    ret.push((i, edge.letter() | 0x80));
                }
            }
        } else if cross.contains(tile) && dawg.seek(node, tile).is_some() {
            ret.push((i, tile));
        }
    }
    ret
}

fn place_from_rack<F: FnMut(&PartialMove)>(
    env: &Env<'_, F>,
    pm: &PartialMove,
    rack_idx: usize,
    tile: u8,
) -> PartialMove {
    let cursor = env.board_snapshot.dawg.transition(&pm.cursor, tile & 0x7f);
    pm.placed(
        PlacedTile {
            tile,
            idx: env.strider.at(pm.end),
            is_new: true,
        },
        pm.rack.without(rack_idx),
        cursor,
    )
}

// left of the anchor, read left to right
fn gen_prefix<F: FnMut(&PartialMove)>(env: &mut Env<'_, F>, pm: PartialMove, remaining: i8) {
    if remaining == 0 {
        extend_right(env, pm);
        return;
    }
    for (rack_idx, tile) in choices(env, &pm) {
        let next = place_from_rack(env, &pm, rack_idx, tile);
        gen_prefix(env, next, remaining - 1);
    }
}

fn has_across_neighbor(board_snapshot: &BoardSnapshot, idx: usize) -> bool {
    let dim = board_snapshot.game_config.board_layout().dim();
    let (row, col) = dim.row_col(idx);
    (col > 0 && board_snapshot.board_tiles[dim.at_row_col(row, col - 1)] != 0)
        || (col + 1 < dim.cols && board_snapshot.board_tiles[dim.at_row_col(row, col + 1)] != 0)
}

fn extend_right<F: FnMut(&PartialMove)>(env: &mut Env<'_, F>, pm: PartialMove) {
    let len = env.strider.len();
    let pos = pm.end;
    if pos < len {
        let b = env.board_snapshot.board_tiles[env.strider.at(pos)];
        if b != 0 {
            let cursor = env.board_snapshot.dawg.transition(&pm.cursor, b & 0x7f);
            if !cursor.is_valid() {
                return;
            }
            let next = pm.placed(
                PlacedTile {
                    tile: b,
                    idx: env.strider.at(pos),
                    is_new: false,
                },
                pm.rack.clone(),
                cursor,
            );
            extend_right(env, next);
            return;
        }
    }
    // pos is empty or off the board, so the word ends here
    if pos > env.anchor && pos - pm.start >= 2 && pm.cursor.accepts(env.board_snapshot.dawg) {
        // a lone tile with across neighbors was already reported across
        let duplicate = env.down
            && pm.num_played() == 1
            && pm
                .tiles
                .iter()
                .any(|t| t.is_new && has_across_neighbor(env.board_snapshot, t.idx));
        if !duplicate {
            (env.found)(&pm);
        }
    }
    if pos >= len || pm.rack.is_empty() {
        return;
    }
    for (rack_idx, tile) in choices(env, &pm) {
        let next = place_from_rack(env, &pm, rack_idx, tile);
        extend_right(env, next);
    }
}

// Completed placements along one lane, in anchor order.
pub fn gen_lane_moves<F: FnMut(&PartialMove)>(
    board_snapshot: &BoardSnapshot,
    rack: &rack::Rack,
    down: bool,
    lane: i8,
    found: &mut F,
) -> Result<(), error::SearchError> {
    if rack.is_empty() {
        return Ok(());
    }
    let dim = board_snapshot.game_config.board_layout().dim();
    let strider = dim.lane(down, lane);
    let anchors = board_snapshot.anchors(down, lane);
    let dawg = board_snapshot.dawg;
    let mut env = Env {
        board_snapshot,
        strider,
        down,
        anchor: 0,
        found,
    };
    for &anchor in &anchors {
        env.anchor = anchor;
        if anchor > 0 && board_snapshot.board_tiles[strider.at(anchor - 1)] != 0 {
            // the prefix is already on the board
            let mut start = anchor - 1;
            while start > 0 && board_snapshot.board_tiles[strider.at(start - 1)] != 0 {
                start -= 1;
            }
            let mut pm = PartialMove::new(down, lane, anchor, start, rack.clone(), dawg.root_cursor());
            for i in start..anchor {
                let b = board_snapshot.board_tiles[strider.at(i)];
                let cursor = dawg.transition(&pm.cursor, b & 0x7f);
                pm = pm.placed(
                    PlacedTile {
                        tile: b,
                        idx: strider.at(i),
                        is_new: false,
                    },
                    pm.rack.clone(),
                    cursor,
                );
            }
            if !pm.cursor.is_valid() {
                if anchor - start >= 2 {
                    return Err(error::SearchError::BoardWordRejected {
                        square: strider.at(anchor),
                        word: pm.tiles.iter().map(|t| t.tile & 0x7f).collect(),
                    });
                }
                continue;
            }
            extend_right(&mut env, pm);
        } else {
            let mut budget = 0;
            while anchor - budget > 0 {
                let idx = strider.at(anchor - budget - 1);
                if board_snapshot.board_tiles[idx] != 0 || anchors.contains(&(anchor - budget - 1)) {
                    break;
                }
                budget += 1;
            }
            let budget = budget.min(rack.len().saturating_sub(1).min(i8::MAX as usize) as i8);
            for prefix_len in 0..=budget {
                let pm = PartialMove::new(
                    down,
                    lane,
                    anchor,
                    anchor - prefix_len,
                    rack.clone(),
                    dawg.root_cursor(),
                );
                gen_prefix(&mut env, pm, prefix_len);
            }
        }
    }
    Ok(())
}

// Across lanes top to bottom, then down lanes left to right.
pub fn lane_order(dim: matrix::Dim) -> Vec<(bool, i8)> {
    (0..dim.rows)
        .map(|row| (false, row))
        .chain((0..dim.cols).map(|col| (true, col)))
        .collect()
}

fn gen_lane_plays(
    board_snapshot: &BoardSnapshot,
    rack: &rack::Rack,
    down: bool,
    lane: i8,
) -> Result<Vec<Play>, error::SearchError> {
    let mut plays = Vec::new();
    gen_lane_moves(board_snapshot, rack, down, lane, &mut |pm: &PartialMove| {
        let play = pm.to_play(0);
        let score = play_scorer::compute_score(board_snapshot, &play).total;
        plays.push(pm.to_play(score));
    })?;
    Ok(plays)
}

pub fn generate_all_moves(
    board_snapshot: &BoardSnapshot,
    rack: &rack::Rack,
) -> Result<Vec<Play>, error::SearchError> {
    let dim = board_snapshot.game_config.board_layout().dim();
    let mut plays = Vec::new();
    for (down, lane) in lane_order(dim) {
        plays.extend(gen_lane_plays(board_snapshot, rack, down, lane)?);
    }
    tracing::debug!(
        num_plays = plays.len(),
        best = plays.iter().map(|p| p.score()).max(),
        cached_cross_checks = board_snapshot.cross_checks.num_cached(),
        "generated moves"
    );
    Ok(plays)
}

// first play with the strictly highest score
pub fn best_move(
    board_snapshot: &BoardSnapshot,
    rack: &rack::Rack,
) -> Result<Option<Play>, error::SearchError> {
    let mut best: Option<Play> = None;
    for play in generate_all_moves(board_snapshot, rack)? {
        if best.as_ref().is_none_or(|b| play.score() > b.score()) {
            best = Some(play);
        }
    }
    Ok(best)
}

// Same result as generate_all_moves. Lanes are handed out to worker threads.
pub fn generate_all_moves_parallel(
    board_snapshot: &BoardSnapshot,
    rack: &rack::Rack,
    num_threads: usize,
) -> Result<Vec<Play>, error::SearchError> {
    let lanes = lane_order(board_snapshot.game_config.board_layout().dim());
    let num_threads = num_threads.clamp(1, lanes.len().max(1));
    let next_lane = std::sync::atomic::AtomicUsize::new(0);
    let (tx, rx) = std::sync::mpsc::channel();
    std::thread::scope(|s| {
        for _ in 0..num_threads {
            let tx = tx.clone();
            let lanes = &lanes;
            let next_lane = &next_lane;
            s.spawn(move || {
                loop {
                    let i = next_lane.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
                    if i >= lanes.len() {
                        break;
                    }
                    let (down, lane) = lanes[i];
                    if tx
                        .send((i, gen_lane_plays(board_snapshot, rack, down, lane)))
                        .is_err()
                    {
                        break;
                    }
                }
            });
        }
    });
    drop(tx);
    let mut results = (0..lanes.len()).map(|_| None).collect::<Vec<_>>();
    for (i, result) in rx {
        results[i] = Some(result);
    }
    let mut plays = Vec::new();
    for result in results.into_iter().flatten() {
        plays.extend(result?);
    }
    tracing::debug!(num_plays = plays.len(), num_threads, "generated moves in parallel");
    Ok(plays)
}
