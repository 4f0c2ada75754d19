// Copyright (C) 2020-2026 Andy Kurnia.

use super::{bag, cross_check, dawg, error, game_config, movegen, play_scorer, rack};
use rand::prelude::*;
use std::sync::Arc;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GamePlayer {
    pub score: i16,
    pub rack: rack::Rack,
}

// One turn's worth of game. Never modified once made; play() makes the next one.
pub struct GameState {
    pub game_config: Arc<game_config::GameConfig>,
    pub players: Box<[GamePlayer]>,
    pub board_tiles: Box<[u8]>,
    pub bag: bag::Bag,
    pub turn: u8,
    pub prev: Option<Arc<GameState>>,
    pub last_play: Option<movegen::Play>,
    pub cross_checks: cross_check::CrossChecks,
}

impl GameState {
    // empty board, full bag, empty racks
    pub fn new(game_config: Arc<game_config::GameConfig>) -> Self {
        let dim = game_config.board_layout().dim();
        Self {
            players: (0..game_config.num_players())
                .map(|_| GamePlayer::default())
                .collect(),
            board_tiles: vec![0u8; dim.num_squares()].into_boxed_slice(),
            bag: bag::Bag::new(game_config.alphabet()),
            turn: 0,
            prev: None,
            last_play: None,
            cross_checks: cross_check::CrossChecks::new(dim),
            game_config,
        }
    }

    // shuffles the bag and fills every rack
    pub fn new_game(game_config: Arc<game_config::GameConfig>, rng: &mut dyn RngCore) -> Arc<Self> {
        let mut state = Self::new(game_config);
        state.bag.shuffle(rng);
        let rack_size = state.game_config.rack_size() as usize;
        for player in state.players.iter_mut() {
            player.rack = state.bag.replenish(&player.rack, rack_size);
        }
        Arc::new(state)
    }

    #[inline(always)]
    pub fn current_player(&self) -> &GamePlayer {
        &self.players[self.turn as usize]
    }

    #[inline(always)]
    pub fn next_turn(&self) -> u8 {
        let num_players = self.players.len() as u8;
        let turn = self.turn + 1;
        turn - (num_players & -((turn >= num_players) as i8) as u8)
    }

    pub fn board_snapshot<'a>(&'a self, dawg: &'a dawg::Dawg) -> movegen::BoardSnapshot<'a> {
        movegen::BoardSnapshot {
            board_tiles: &self.board_tiles,
            game_config: &self.game_config,
            dawg,
            cross_checks: &self.cross_checks,
        }
    }

    // this snapshot first, then each earlier one
    pub fn history(&self) -> impl Iterator<Item = &GameState> {
        std::iter::successors(Some(self), |s| s.prev.as_deref())
    }

    // Checks the play against the board and lexicon, then returns the next snapshot.
    pub fn play(
        self: &Arc<Self>,
        dawg: &dawg::Dawg,
        rng: &mut dyn RngCore,
        play: &movegen::Play,
    ) -> error::Returns<Arc<GameState>> {
        let rack_size = self.game_config.rack_size() as usize;
        let mut players = self.players.clone();
        let mut board_tiles = self.board_tiles.clone();
        let mut bag = self.bag.clone();
        let mut placed = Vec::new();
        let current_player = &mut players[self.turn as usize];
        let recorded_play;
        match play {
            movegen::Play::Exchange { tiles } => {
                if bag.len() < rack_size {
                    return_error!(format!("cannot exchange with {} tiles in the bag", bag.len()));
                }
                let kept = current_player.rack.without_tiles(tiles.iter().copied())?;
                current_player.rack = bag.replenish(&kept, rack_size);
                bag.put_back(rng, tiles);
                recorded_play = play.clone();
            }
            movegen::Play::Place {
                down,
                lane,
                idx,
                word,
                ..
            } => {
                let dim = self.game_config.board_layout().dim();
                let strider = dim.lane(*down, *lane);
                if *idx < 0 || (*idx as usize) + word.len() > strider.len() as usize {
                    return_error!("play goes off the board".into());
                }
                for (i, &tile) in (*idx..).zip(word.iter()) {
                    let occupied = self.board_tiles[strider.at(i)] != 0;
                    if occupied != (tile == 0) {
                        return_error!(format!("square {} does not match the play", i));
                    }
                }
                let board_snapshot = self.board_snapshot(dawg);
                if !play_scorer::play_is_connected(&board_snapshot, play) {
                    return_error!("play does not touch the board or cover the star".into());
                }
                if !play_scorer::play_is_valid(&board_snapshot, play) {
                    return_error!("play does not span its word, or forms a word not in the lexicon".into());
                }
                let score = play_scorer::compute_score(&board_snapshot, play).total;
                let kept = current_player.rack.without_tiles(play.tiles_played())?;
                for (i, &tile) in (*idx..).zip(word.iter()) {
                    if tile != 0 {
                        board_tiles[strider.at(i)] = tile;
                        placed.push(strider.at(i));
                    }
                }
                current_player.score = current_player.score.saturating_add(score);
                current_player.rack = bag.replenish(&kept, rack_size);
                recorded_play = movegen::Play::Place {
                    down: *down,
                    lane: *lane,
                    idx: *idx,
                    word: word.clone(),
                    score,
                };
            }
        }
        Ok(Arc::new(GameState {
            game_config: Arc::clone(&self.game_config),
            players,
            board_tiles,
            bag,
            turn: self.next_turn(),
            prev: Some(Arc::clone(self)),
            last_play: Some(recorded_play),
            cross_checks: self.cross_checks.derive(&placed),
        }))
    }
}
