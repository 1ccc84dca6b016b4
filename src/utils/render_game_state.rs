//! Terminal-oriented board renderer.
//!
//! Draws the 14×14 board with two-character piece codes, `··` for empty
//! playable squares, and blanks for the cut-off corners. Highest rank first.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{player_letter, Square};
use crate::game_state::game_state::GameState;

/// Render the board plus a status line for terminal output.
pub fn render_game_state(game_state: &GameState) -> String {
    let mut out = render_board(&game_state.board);
    out.push('\n');
    out.push_str(&format!(
        "to move: {}  ply: {}  result: {}",
        player_letter(game_state.current_player),
        game_state.move_number,
        game_state.result
    ));
    out
}

pub fn render_board(board: &Board) -> String {
    let mut out = String::new();
    let header = file_header(board.files());

    out.push_str(&header);
    out.push('\n');

    for rank in (0..board.ranks()).rev() {
        out.push_str(&format!("{:>2} ", u32::from(rank) + 1));

        for file in 0..board.files() {
            let square = Square::new(file, rank);
            if !board.is_playable(square) {
                out.push_str("  ");
            } else {
                match board.get(square).ok().flatten() {
                    Some(piece) => out.push_str(&piece.code()),
                    None => out.push_str("··"),
                }
            }

            if file + 1 < board.files() {
                out.push(' ');
            }
        }

        out.push_str(&format!(" {}", u32::from(rank) + 1));
        out.push('\n');
    }

    out.push_str(&header);
    out
}

fn file_header(files: u8) -> String {
    let letters: Vec<String> = (0..files)
        .map(|file| format!("{} ", char::from(b'a' + file)))
        .collect();
    format!("   {}", letters.join(" ").trim_end())
}
