use crate::errors::ChessError;
use crate::game_state::board::Board;
use crate::game_state::chess_types::{Player, Square};
use crate::utils::move_token::MoveRecord;
use crate::variants::variant_trait::{Variant, VariantRules};

/// Every player for themselves. Move rules are not implemented, so every
/// request is refused.
#[derive(Debug, Clone, Copy, Default)]
pub struct FreeForAll;

impl VariantRules for FreeForAll {
    fn variant(&self) -> Variant {
        Variant::FreeForAll
    }

    fn validate_move(
        &self,
        _board: &Board,
        _current_player: Option<Player>,
        _from: Square,
        _to: Square,
    ) -> Result<MoveRecord, ChessError> {
        Err(ChessError::UnsupportedVariant(Variant::FreeForAll.name()))
    }
}
