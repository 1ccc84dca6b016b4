//! Error types shared by the board, notation codecs, and the game engine.
//!
//! Every failure in this crate is local and recoverable: a rejected move leaves
//! the game untouched, and a malformed FEN4 import leaves an empty board.

use thiserror::Error;

use crate::game_state::chess_types::{GameResult, Player, Square};

/// Reason a move request failed the variant legality gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IllegalMove {
    /// No player is on move (no game has been started).
    NoCurrentPlayer,
    /// The source square is empty or holds another player's piece.
    NotOwnPiece { player: Player, from: Square },
    /// The destination holds a piece of the mover's own team.
    FriendlyFire { player: Player, to: Square },
}

impl std::fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalMove::NoCurrentPlayer => write!(f, "no player is on move"),
            IllegalMove::NotOwnPiece { player, from } => {
                write!(f, "{} has no piece on {}", player, from)
            }
            IllegalMove::FriendlyFire { player, to } => {
                write!(f, "{} cannot capture a friendly piece on {}", player, to)
            }
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    #[error("square ({file}, {rank}) is outside the playable area")]
    OutOfRange { file: u8, rank: u8 },

    #[error("illegal move: {0}")]
    IllegalMove(IllegalMove),

    #[error("malformed notation: {0}")]
    MalformedNotation(String),

    #[error("variant {0} has no move rules yet")]
    UnsupportedVariant(&'static str),

    #[error("game is over ({0})")]
    GameOver(GameResult),

    #[error("could not write transcript: {0}")]
    Io(String),
}

impl From<IllegalMove> for ChessError {
    fn from(reason: IllegalMove) -> Self {
        ChessError::IllegalMove(reason)
    }
}

impl From<std::io::Error> for ChessError {
    fn from(err: std::io::Error) -> Self {
        ChessError::Io(err.to_string())
    }
}

impl ChessError {
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        ChessError::MalformedNotation(msg.into())
    }
}
