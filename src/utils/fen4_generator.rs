use crate::game_state::board::Board;
use crate::game_state::chess_types::{player_letter, Player, Square};

/// Full FEN4 for a position. Castling and en-passant fields are always `-`.
pub fn generate_fen4(board: &Board, side_to_move: Option<Player>, quarter_moves: usize) -> String {
    format!(
        "{}{} - - {} {}",
        generate_board_field(board),
        player_letter(side_to_move),
        quarter_moves,
        quarter_moves / 4 + 1
    )
}

/// Board field with `/` between ranks and a single trailing space.
pub fn generate_board_field(board: &Board) -> String {
    let mut out = String::new();

    for rank in (0..board.ranks()).rev() {
        let mut empty_count = 0usize;

        for file in 0..board.files() {
            match board.get(Square::new(file, rank)).ok().flatten() {
                Some(piece) => {
                    if empty_count > 0 {
                        out.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    out.push(piece.player.letter());
                    out.push(piece.kind.letter());
                }
                None => empty_count += 1,
            }
        }

        if empty_count > 0 {
            out.push_str(&empty_count.to_string());
        }

        out.push(if rank == 0 { ' ' } else { '/' });
    }

    out
}
