// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, board_layout, error};

pub struct StaticGameConfig {
    alphabet: alphabet::Alphabet,
    board_layout: board_layout::BoardLayout,
    rack_size: i8,
    num_players: u8,
    bingo_bonus: i16,
}

pub enum GameConfig {
    Static(StaticGameConfig),
}

impl GameConfig {
    #[inline(always)]
    pub fn alphabet(&self) -> &alphabet::Alphabet {
        match self {
            GameConfig::Static(x) => &x.alphabet,
        }
    }

    #[inline(always)]
    pub fn board_layout(&self) -> &board_layout::BoardLayout {
        match self {
            GameConfig::Static(x) => &x.board_layout,
        }
    }

    #[inline(always)]
    pub fn rack_size(&self) -> i8 {
        match self {
            GameConfig::Static(x) => x.rack_size,
        }
    }

    #[inline(always)]
    pub fn num_players(&self) -> u8 {
        match self {
            GameConfig::Static(x) => x.num_players,
        }
    }

    #[inline(always)]
    pub fn bingo_bonus(&self) -> i16 {
        match self {
            GameConfig::Static(x) => x.bingo_bonus,
        }
    }

    #[inline(always)]
    pub fn num_played_bonus(&self, num_played: i8) -> i16 {
        match self {
            GameConfig::Static(x) => {
                // branchless
                x.bingo_bonus & -((num_played >= x.rack_size) as i16)
            }
        }
    }

    pub fn from_json(s: &str) -> error::Returns<GameConfig> {
        let json = serde_json::from_str::<GameConfigJson>(s)?;
        json.into_game_config()
    }
}

// Every field is optional and falls back to the English defaults.
#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
#[serde(deny_unknown_fields)]
pub struct GameConfigJson {
    #[serde(default)]
    pub alphabet: Option<Vec<alphabet::Tile>>,
    #[serde(default)]
    pub board: Option<Vec<String>>,
    #[serde(default)]
    pub rack_size: Option<i8>,
    #[serde(default)]
    pub num_players: Option<u8>,
    #[serde(default)]
    pub bingo_bonus: Option<i16>,
}

impl GameConfigJson {
    pub fn into_game_config(self) -> error::Returns<GameConfig> {
        let alphabet = match self.alphabet {
            Some(tiles) => alphabet::Alphabet::new(tiles)?,
            None => alphabet::make_english_alphabet(),
        };
        let board_layout = match self.board {
            Some(rows) => board_layout::BoardLayout::from_rows(&rows)?,
            None => board_layout::make_standard_board_layout(),
        };
        let rack_size = self.rack_size.unwrap_or(7);
        if rack_size < 1 {
            return_error!(format!("rack size {} is too small", rack_size));
        }
        let num_players = self.num_players.unwrap_or(2);
        if num_players < 1 {
            return_error!("need at least one player".into());
        }
        Ok(GameConfig::Static(StaticGameConfig {
            alphabet,
            board_layout,
            rack_size,
            num_players,
            bingo_bonus: self.bingo_bonus.unwrap_or(50),
        }))
    }
}

pub fn make_english_game_config() -> GameConfig {
    GameConfig::Static(StaticGameConfig {
        alphabet: alphabet::make_english_alphabet(),
        board_layout: board_layout::make_standard_board_layout(),
        rack_size: 7,
        num_players: 2,
        bingo_bonus: 50,
    })
}

pub fn make_game_config(
    alphabet: alphabet::Alphabet,
    board_layout: board_layout::BoardLayout,
    rack_size: i8,
    bingo_bonus: i16,
) -> GameConfig {
    GameConfig::Static(StaticGameConfig {
        alphabet,
        board_layout,
        rack_size,
        num_players: 2,
        bingo_bonus,
    })
}
