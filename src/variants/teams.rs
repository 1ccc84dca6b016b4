//! Teams variant: Red partners Yellow, Blue partners Green.
//!
//! Only ownership, board bounds, the corners, and friendly fire are checked.
//! Piece movement patterns, check, and mate are not.

use crate::errors::{ChessError, IllegalMove};
use crate::game_state::board::Board;
use crate::game_state::chess_types::{Player, Square};
use crate::utils::move_token::MoveRecord;
use crate::variants::variant_trait::{Variant, VariantRules};

#[derive(Debug, Clone, Copy, Default)]
pub struct Teams;

impl VariantRules for Teams {
    fn variant(&self) -> Variant {
        Variant::Teams
    }

    fn validate_move(
        &self,
        board: &Board,
        current_player: Option<Player>,
        from: Square,
        to: Square,
    ) -> Result<MoveRecord, ChessError> {
        let player = current_player.ok_or(IllegalMove::NoCurrentPlayer)?;

        let piece = match board.get(from) {
            Ok(Some(piece)) if piece.player == player => piece,
            _ => return Err(IllegalMove::NotOwnPiece { player, from }.into()),
        };

        if !board.is_playable(to) {
            return Err(ChessError::OutOfRange {
                file: to.file,
                rank: to.rank,
            });
        }

        let captured = board.get(to)?;
        let record = MoveRecord::new(piece, from, captured, to);
        if let Some(target) = captured {
            if target.player.is_friend_of(player) && !record.is_king_onto_own_rook() {
                return Err(IllegalMove::FriendlyFire { player, to }.into());
            }
        }
        Ok(record)
    }
}
