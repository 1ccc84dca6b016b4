//! Canonical four-player chess constants.
//!
//! Board geometry, the starting position, turn order, and the fixed literals
//! written into every PGN4 header.

use crate::game_state::chess_types::Player;

/// Files and ranks of the standard four-player board.
pub const BOARD_FILES: u8 = 14;
pub const BOARD_RANKS: u8 = 14;

/// Width of the unplayable band in each corner.
pub const CORNER_SIZE: u8 = 3;

/// Four-player starting position in FEN4.
pub const STARTING_POSITION_FEN4: &str = "3yRyNyByKyQyByNyR3/3yPyPyPyPyPyPyPyP3/14/\
bRbP10gPgR/bNbP10gPgN/bBbP10gPgB/bKbP10gPgQ/bQbP10gPgK/bBbP10gPgB/bNbP10gPgN/bRbP10gPgR/\
14/3rPrPrPrPrPrPrPrP3/3rRrNrBrQrKrBrNrR3 r rKrQbKbQyKyQgKgQ - 0 1";

/// Fixed rotation of the four seats.
pub const TURN_ORDER: [Player; 4] = [Player::Red, Player::Blue, Player::Yellow, Player::Green];

/// Name used when a seat has no player name.
pub const UNKNOWN_NAME: &str = "?";

/// Placeholder text a front-end shows in an untouched name field.
pub const PLACEHOLDER_NAME: &str = "Player Name";

/// Name of the sentinel node at the top of every move tree.
pub const ROOT_NODE_NAME: &str = "root";

pub const PGN4_EVENT_PREFIX: &str = "Four-Player Chess";
pub const PGN4_SITE: &str = "chess.com";
/// 60 seconds sudden death with a 15 second delay per move.
pub const PGN4_TIME_CONTROL: &str = "60 d15";
/// Internet Chess Server.
pub const PGN4_MODE: &str = "ICS";
