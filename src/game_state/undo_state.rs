use crate::errors::ChessError;
use crate::game_state::board::Board;
use crate::game_state::chess_types::{Piece, Square};
use crate::utils::move_token::MoveRecord;

/// Board contents a move overwrote, captured just before it was played.
///
/// Castling on the big board can land king and rook on occupied squares, so
/// the move token alone cannot always restore the prior position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoState {
    pub record: MoveRecord,
    pub prior_cells: Vec<(Square, Option<Piece>)>,
}

impl UndoState {
    /// Snapshot every square `record` is about to touch.
    pub fn capture(board: &Board, record: MoveRecord) -> Result<Self, ChessError> {
        let mut prior_cells = Vec::with_capacity(4);
        for square in record.touched_squares() {
            if prior_cells.iter().any(|(seen, _)| *seen == square) {
                continue;
            }
            prior_cells.push((square, board.get(square)?));
        }
        Ok(Self {
            record,
            prior_cells,
        })
    }

    /// Put back everything the move changed.
    pub fn restore(&self, board: &mut Board) -> Result<(), ChessError> {
        for &(square, cell) in self.prior_cells.iter().rev() {
            board.set(square, cell)?;
        }
        Ok(())
    }
}

/// Play `record` on `board`, castling relocation included.
pub fn play_record(board: &mut Board, record: &MoveRecord) -> Result<(), ChessError> {
    for (from, to) in record.relocations() {
        board.move_piece(from, to)?;
    }
    Ok(())
}
