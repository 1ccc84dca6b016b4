//! Variant abstraction used by the game engine.
//!
//! A variant supplies its starting position, the name written into PGN4
//! headers, and the gate every move request passes before it is played.

use crate::errors::ChessError;
use crate::game_state::board::Board;
use crate::game_state::chess_rules::STARTING_POSITION_FEN4;
use crate::game_state::chess_types::{Player, Square};
use crate::utils::move_token::MoveRecord;
use crate::variants::free_for_all::FreeForAll;
use crate::variants::teams::Teams;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Variant {
    #[default]
    Teams,
    FreeForAll,
}

impl Variant {
    pub fn rules(self) -> Box<dyn VariantRules> {
        match self {
            Variant::Teams => Box::new(Teams),
            Variant::FreeForAll => Box::new(FreeForAll),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Variant::Teams => "Teams",
            Variant::FreeForAll => "Free-For-All",
        }
    }
}

pub trait VariantRules: std::fmt::Debug {
    fn variant(&self) -> Variant;

    /// Suffix of the PGN4 `Event` tag.
    fn event_name(&self) -> &'static str {
        self.variant().name()
    }

    fn starting_fen4(&self) -> &'static str {
        STARTING_POSITION_FEN4
    }

    /// Check a move request against the board and describe the move to play.
    fn validate_move(
        &self,
        board: &Board,
        current_player: Option<Player>,
        from: Square,
        to: Square,
    ) -> Result<MoveRecord, ChessError>;
}
