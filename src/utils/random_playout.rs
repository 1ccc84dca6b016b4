//! Random move driver.
//!
//! Picks uniformly among the moves the variant gate accepts: any of the mover's
//! pieces to any playable square that does not hold a friendly piece, plus
//! castling onto the mover's own rooks. Used for smoke tests, benches, and the
//! `random_playout` binary.

use rand::prelude::IndexedRandom;
use rand::Rng;

use crate::engine::game_engine::GameEngine;
use crate::game_state::chess_types::Square;
use crate::utils::move_token::MoveRecord;

/// Every (from, to) pair the engine's variant would accept right now.
pub fn candidate_moves(engine: &GameEngine) -> Vec<(Square, Square)> {
    let state = engine.state();
    let board = &state.board;
    let Some(player) = state.current_player else {
        return Vec::new();
    };
    let rules = engine.rules();

    let sources: Vec<Square> = board
        .pieces()
        .filter(|(_, piece)| piece.player == player)
        .map(|(square, _)| square)
        .collect();

    let mut moves = Vec::new();
    for &from in &sources {
        for rank in 0..board.ranks() {
            for file in 0..board.files() {
                let to = Square::new(file, rank);
                if to != from
                    && rules
                        .validate_move(board, Some(player), from, to)
                        .is_ok()
                {
                    moves.push((from, to));
                }
            }
        }
    }
    moves
}

/// Play up to `max_moves` random accepted moves. Stops early when nothing is
/// playable. Returns the moves in the order they were made.
pub fn random_playout<R: Rng + ?Sized>(
    engine: &mut GameEngine,
    rng: &mut R,
    max_moves: usize,
) -> Vec<MoveRecord> {
    let mut played = Vec::with_capacity(max_moves);
    for _ in 0..max_moves {
        let candidates = candidate_moves(engine);
        let Some(&(from, to)) = candidates.choose(rng) else {
            break;
        };
        match engine.try_apply_move(from, to) {
            Ok(record) => played.push(record),
            Err(_) => break,
        }
    }
    played
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::{candidate_moves, random_playout};
    use crate::engine::config::EngineConfig;
    use crate::engine::game_engine::GameEngine;
    use crate::variants::variant_trait::Variant;

    #[test]
    fn starting_position_offers_every_empty_playable_square_to_each_piece() {
        let mut engine = GameEngine::new();
        engine.new_game().expect("starting position should load");

        // 160 playable squares, 64 occupied by pieces, 32 of them by the
        // opposing team: 128 targets per piece, plus two castling moves.
        let moves = candidate_moves(&engine);
        assert_eq!(moves.len(), 16 * 128 + 2);
    }

    #[test]
    fn same_seed_same_game() {
        let play = |seed: u64| {
            let mut engine = GameEngine::new();
            engine.new_game().expect("starting position should load");
            let mut rng = StdRng::seed_from_u64(seed);
            random_playout(&mut engine, &mut rng, 12)
        };
        let first = play(11);
        assert_eq!(first.len(), 12);
        assert_eq!(first, play(11));
    }

    #[test]
    fn free_for_all_has_nothing_to_play() {
        let mut engine = GameEngine::with_config(EngineConfig::with_variant(Variant::FreeForAll));
        engine.new_game().expect("starting position should load");
        let mut rng = StdRng::seed_from_u64(1);
        assert!(random_playout(&mut engine, &mut rng, 5).is_empty());
    }
}
