// Copyright (C) 2020-2026 Andy Kurnia.

use dawgmove::{
    alphabet, cross_check, display, error, game_config, lexicon, lexicon_cache, movegen,
    play_scorer, rack,
};

fn usage(program: &str) -> String {
    format!(
        "usage:
  {program} moves WORDLIST RACK [BOARD]
    all moves for RACK, BOARD defaults to an empty board
  {program} best WORDLIST RACK [BOARD]
    highest scoring move with its score breakdown
  {program} words WORDLIST
    automaton statistics and every accepted word
  --config FILE.json anywhere overrides the default English game"
    )
}

// --config is taken out, the rest stay in order.
fn split_config_arg(args: &[String]) -> error::Returns<(Option<String>, Vec<String>)> {
    let mut config_path = None;
    let mut rest = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--config" {
            match iter.next() {
                Some(path) => config_path = Some(path.clone()),
                None => {
                    dawgmove::return_error!("--config needs a file".into());
                }
            }
        } else {
            rest.push(arg.clone());
        }
    }
    Ok((config_path, rest))
}

fn read_board(game_config: &game_config::GameConfig, path: Option<&str>) -> error::Returns<Vec<u8>> {
    match path {
        Some(path) => display::parse_board(
            game_config.alphabet(),
            game_config.board_layout(),
            &std::fs::read_to_string(path)?,
        ),
        None => Ok(vec![0u8; game_config.board_layout().dim().num_squares()]),
    }
}

pub fn main() -> error::Returns<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = std::env::args().collect::<Vec<_>>();
    let program = args.first().map_or("genmoves", |s| s.as_str()).to_string();
    let (config_path, args) = split_config_arg(args.get(1..).unwrap_or(&[]))?;
    let game_config = match config_path {
        Some(path) => game_config::GameConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => game_config::make_english_game_config(),
    };
    let alphabet = game_config.alphabet();
    let lexicons = lexicon_cache::LexiconCache::<std::path::PathBuf>::new(1);

    let t0 = std::time::Instant::now();
    let args = args.iter().map(|s| s.as_str()).collect::<Vec<_>>();
    match args[..] {
        ["words", wordlist] => {
            let lexicon = lexicon::Lexicon::load(alphabet, wordlist)?;
            let stats = lexicon.stats();
            let dawg = lexicon.build_dawg(alphabet)?;
            println!(
                "{} ({} to {} letters, mean {:.2})",
                display::dump_dawg_stats(&dawg),
                stats.min_len,
                stats.max_len,
                stats.mean_len
            );
            display::print_dawg_words(alphabet, &dawg);
        }
        [cmd @ ("moves" | "best"), wordlist, rack_str, ref board_path @ ..] if board_path.len() <= 1 => {
            let dawg = lexicons.get_or_load(alphabet, wordlist)?;
            let board_tiles = read_board(&game_config, board_path.first().copied())?;
            let rack = rack::Rack::new(&alphabet::AlphabetReader::new_for_racks(alphabet).read(rack_str)?);
            if rack.len() > game_config.rack_size() as usize {
                dawgmove::return_error!(format!(
                    "rack {} has more than {} tiles",
                    rack_str,
                    game_config.rack_size()
                ));
            }
            let cross_checks = cross_check::CrossChecks::new(game_config.board_layout().dim());
            let board_snapshot = movegen::BoardSnapshot {
                board_tiles: &board_tiles,
                game_config: &game_config,
                dawg: &dawg,
                cross_checks: &cross_checks,
            };
            display::print_board(alphabet, game_config.board_layout(), &board_tiles);
            println!("rack: {}", alphabet.fmt_rack(rack.tiles()));
            let dim = game_config.board_layout().dim();
            if cmd == "best" {
                match movegen::best_move(&board_snapshot, &rack)? {
                    Some(play) => {
                        println!("{}", display::fmt_play(alphabet, dim, &board_tiles, &play));
                        println!(
                            "{}",
                            display::dump_score(&play_scorer::compute_score(&board_snapshot, &play))
                        );
                    }
                    None => println!("no moves"),
                }
            } else {
                let plays = movegen::generate_all_moves_parallel(&board_snapshot, &rack, num_cpus::get())?;
                for play in &plays {
                    println!("{}", display::fmt_play(alphabet, dim, &board_tiles, play));
                }
                println!("{} moves", plays.len());
            }
        }
        _ => {
            println!("{}", usage(&program));
            return Ok(());
        }
    }
    tracing::info!(elapsed_ms = t0.elapsed().as_millis() as u64, "done");

    Ok(())
}
