//! PGN4 transcript writer.
//!
//! Headers follow the four-player convention used by chess.com; the movetext
//! is built from the linearized move tree, with variations in parentheses.

use chrono::NaiveDate;

use crate::errors::ChessError;
use crate::game_state::chess_rules::{PGN4_EVENT_PREFIX, PGN4_MODE, PGN4_SITE, PGN4_TIME_CONTROL};
use crate::game_state::chess_types::{GameResult, Player};
use crate::game_state::game_state::GameState;
use crate::move_tree::linearize::LinearMove;
use crate::utils::fen4_generator::generate_fen4;
use crate::utils::move_token::to_algebraic;

/// Full PGN4 text for `state`, dated `date`.
pub fn generate_pgn4(state: &GameState, event_name: &str, date: NaiveDate) -> Result<String, ChessError> {
    let mut out = String::new();

    push_tag(&mut out, "Event", &format!("{PGN4_EVENT_PREFIX} {event_name}"));
    push_tag(&mut out, "Site", PGN4_SITE);
    push_tag(&mut out, "Date", &date.format("%Y.%m.%d").to_string());
    for player in Player::ALL {
        push_tag(&mut out, player.name(), state.player_name(player));
    }
    push_tag(&mut out, "Result", state.result.as_str());
    push_tag(&mut out, "PlyCount", &state.move_number.to_string());
    push_tag(&mut out, "TimeControl", PGN4_TIME_CONTROL);
    push_tag(&mut out, "Mode", PGN4_MODE);
    push_tag(
        &mut out,
        "CurrentPosition",
        &generate_fen4(&state.board, state.current_player, state.move_number),
    );
    out.push('\n');

    out.push_str(&generate_movetext(
        state.move_tree.linear_moves(),
        state.result,
        to_algebraic,
    )?);
    Ok(out)
}

/// Movetext for a linearized move list, each token passed through `render`.
///
/// Move numbers appear on Red's plies. A variation opens with `(`, its move
/// number, and one dot per player already moved in that round; each level
/// closed is one `)` glued to the previous move. Variations still open at the
/// end are closed before the result.
pub fn generate_movetext<F>(moves: &[LinearMove], result: GameResult, render: F) -> Result<String, ChessError>
where
    F: Fn(&str) -> Result<String, ChessError>,
{
    let mut items: Vec<String> = Vec::with_capacity(moves.len() + 1);
    let mut previous = 0usize;

    for entry in moves {
        let san = render(&entry.token)?;
        let round = entry.ply.saturating_sub(1) / 4 + 1;
        let seat = entry.ply.saturating_sub(1) % 4;

        if entry.variation > previous {
            let dots = ["", ". ", ".. ", "... "][seat];
            items.push(format!("({round}. {dots}{san} "));
        } else {
            if entry.variation < previous {
                close_variations(&mut items, previous - entry.variation);
            }
            if seat == 0 {
                items.push(format!("{round}. {san} "));
            } else {
                items.push(format!("{san} "));
            }
        }
        previous = entry.variation;
    }

    if previous > 0 {
        close_variations(&mut items, previous);
    }

    let mut out: String = items.concat();
    out.push_str(result.as_str());
    Ok(out)
}

fn close_variations(items: &mut [String], levels: usize) {
    if let Some(last) = items.last_mut() {
        if last.ends_with(' ') {
            last.pop();
        }
        last.push_str(&") ".repeat(levels));
    }
}

fn push_tag(out: &mut String, key: &str, value: &str) {
    out.push_str(&format!("[{} \"{}\"]\n", key, escape_pgn4_value(value)));
}

fn escape_pgn4_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
