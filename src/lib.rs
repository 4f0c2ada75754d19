// Copyright (C) 2020-2026 Andy Kurnia.

#[macro_use]
pub mod error;

pub mod alphabet;
pub mod bag;
pub mod board_layout;
pub mod build;
pub mod cross_check;
pub mod cursor;
pub mod dawg;
pub mod display;
pub mod game_config;
pub mod game_state;
pub mod letter_set;
pub mod lexicon;
pub mod lexicon_cache;
pub mod matrix;
pub mod movegen;
pub mod play_scorer;
pub mod rack;
