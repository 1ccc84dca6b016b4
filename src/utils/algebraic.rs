//! Square conversions for algebraic coordinates.
//!
//! Converts between human-readable coordinates (e.g., `h1`, `k14`) and
//! internal squares, reused by move tokens, FEN4, and the console.

use crate::errors::ChessError;
use crate::game_state::chess_rules::{BOARD_FILES, BOARD_RANKS};
use crate::game_state::chess_types::Square;

/// Convert an algebraic coordinate (for example: "e4" or "n14") to a square.
///
/// The rank may have one or two digits.
pub fn algebraic_to_square(square: &str) -> Result<Square, ChessError> {
    let mut chars = square.chars();
    let file = chars
        .next()
        .ok_or_else(|| ChessError::malformed("empty square coordinate"))?;
    let rank_part = chars.as_str();

    if !file.is_ascii_lowercase() || (file as u8 - b'a') >= BOARD_FILES {
        return Err(ChessError::malformed(format!("invalid file in square '{square}'")));
    }
    if rank_part.is_empty() || rank_part.len() > 2 || !rank_part.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(ChessError::malformed(format!("invalid rank in square '{square}'")));
    }

    let rank = rank_part
        .parse::<u8>()
        .map_err(|_| ChessError::malformed(format!("invalid rank in square '{square}'")))?;
    if rank == 0 || rank > BOARD_RANKS {
        return Err(ChessError::malformed(format!("rank out of bounds in square '{square}'")));
    }

    Ok(Square::new(file as u8 - b'a', rank - 1))
}

/// Convert a square to its algebraic coordinate (for example: "e4").
#[inline]
pub fn square_to_algebraic(square: Square) -> String {
    square.to_string()
}
