//! Plays random games through the Teams gate and prints their PGN4.
//!
//! Run with:
//! `cargo run --release --bin random_playout`
//! `cargo run --release --bin random_playout -- --games 3 --moves 60 --seed 42`

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use four_chess::engine::game_engine::GameEngine;
use four_chess::errors::ChessError;
use four_chess::utils::random_playout::random_playout;

struct Options {
    games: usize,
    moves: usize,
    seed: u64,
}

fn parse_options() -> Result<Options, String> {
    let mut options = Options {
        games: 1,
        moves: 40,
        seed: 1234,
    };
    let mut args = std::env::args().skip(1);
    while let Some(flag) = args.next() {
        let value = args
            .next()
            .ok_or_else(|| format!("{flag} needs a value"))?;
        let parsed = value
            .parse::<u64>()
            .map_err(|_| format!("{flag} expects a number, got '{value}'"))?;
        match flag.as_str() {
            "--games" => options.games = parsed as usize,
            "--moves" => options.moves = parsed as usize,
            "--seed" => options.seed = parsed,
            other => return Err(format!("unknown option {other}")),
        }
    }
    Ok(options)
}

fn main() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let options = parse_options()?;
    let mut rng = StdRng::seed_from_u64(options.seed);

    for game in 0..options.games {
        let pgn4 = play_one(&mut rng, options.moves).map_err(|err| err.to_string())?;
        if game > 0 {
            println!();
        }
        println!("{pgn4}");
    }
    Ok(())
}

fn play_one(rng: &mut StdRng, moves: usize) -> Result<String, ChessError> {
    let mut engine = GameEngine::new();
    engine.new_game()?;
    let played = random_playout(&mut engine, rng, moves);
    tracing::info!(plies = played.len(), "playout finished");
    engine.generate_pgn4()
}
