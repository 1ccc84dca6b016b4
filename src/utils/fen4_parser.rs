//! FEN4-to-board parser.
//!
//! Reads the board field of a FEN4 string into a flat cell grid. Ranks are
//! read from the highest to the lowest, files ascending. Empty runs are one or
//! two digits (greedily combined); pieces are two-character codes. Every rank
//! must be followed by `/` or a space.

use crate::errors::ChessError;
use crate::game_state::chess_types::{Piece, Player};

/// Parse the board field of `fen4` into cells indexed `file + rank * files`.
///
/// Trailing fields after the board are not inspected.
pub fn parse_board_field(
    fen4: &str,
    files: u8,
    ranks: u8,
) -> Result<Vec<Option<Piece>>, ChessError> {
    let chars: Vec<char> = fen4.chars().collect();
    let files = usize::from(files);
    let mut cells = vec![None; files * usize::from(ranks)];
    let mut index = 0usize;
    let mut skip = 0usize;

    for rank in (0..usize::from(ranks)).rev() {
        for file in 0..files {
            if skip > 0 {
                skip -= 1;
                continue;
            }

            let ch = next_char(&chars, &mut index)?;
            if let Some(first) = ch.to_digit(10) {
                let mut run = first as usize;
                if let Some(second) = chars.get(index).and_then(|c| c.to_digit(10)) {
                    run = run * 10 + second as usize;
                    index += 1;
                }
                if run == 0 {
                    return Err(ChessError::malformed(format!(
                        "empty-square run of zero at position {index}"
                    )));
                }
                // This square is the first of the run.
                skip = run - 1;
            } else {
                let second = next_char(&chars, &mut index)?;
                let code: String = [ch, second].iter().collect();
                let piece = Piece::from_code(&code).ok_or_else(|| {
                    ChessError::malformed(format!("invalid piece code '{code}' in FEN4"))
                })?;
                cells[file + rank * files] = Some(piece);
            }
        }

        if skip > 0 {
            return Err(ChessError::malformed(format!(
                "empty-square run overflows rank {}",
                rank + 1
            )));
        }

        match chars.get(index) {
            Some('/') | Some(' ') => index += 1,
            Some(other) => {
                return Err(ChessError::malformed(format!(
                    "expected '/' after rank {} but found '{other}'",
                    rank + 1
                )))
            }
            None => {
                return Err(ChessError::malformed(format!(
                    "FEN4 ended after rank {}",
                    rank + 1
                )))
            }
        }
    }

    Ok(cells)
}

/// Side-to-move letter from the second space-separated field.
pub fn parse_turn_field(fen4: &str) -> Option<Player> {
    let field = fen4.split(' ').nth(1)?;
    let mut chars = field.chars();
    let letter = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    Player::from_letter(letter)
}

fn next_char(chars: &[char], index: &mut usize) -> Result<char, ChessError> {
    let ch = chars
        .get(*index)
        .copied()
        .ok_or_else(|| ChessError::malformed("FEN4 ended in the middle of a rank"))?;
    *index += 1;
    Ok(ch)
}
