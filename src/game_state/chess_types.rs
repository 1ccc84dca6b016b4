//! Core value types for four-player chess: players, teams, pieces, squares,
//! and game results.

use std::fmt;
use std::str::FromStr;

use crate::errors::ChessError;

/// A seat at the board. Turn order is Red, Blue, Yellow, Green.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Player {
    Red,
    Blue,
    Yellow,
    Green,
}

/// Partnerships in the Teams variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Team {
    /// Red and Yellow.
    RedYellow,
    /// Blue and Green.
    BlueGreen,
}

impl Player {
    pub const ALL: [Player; 4] = [Player::Red, Player::Blue, Player::Yellow, Player::Green];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Player::Red => 0,
            Player::Blue => 1,
            Player::Yellow => 2,
            Player::Green => 3,
        }
    }

    #[inline]
    pub const fn letter(self) -> char {
        match self {
            Player::Red => 'r',
            Player::Blue => 'b',
            Player::Yellow => 'y',
            Player::Green => 'g',
        }
    }

    #[inline]
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'r' => Some(Player::Red),
            'b' => Some(Player::Blue),
            'y' => Some(Player::Yellow),
            'g' => Some(Player::Green),
            _ => None,
        }
    }

    #[inline]
    pub const fn team(self) -> Team {
        match self {
            Player::Red | Player::Yellow => Team::RedYellow,
            Player::Blue | Player::Green => Team::BlueGreen,
        }
    }

    /// True for the player itself and for its partner.
    #[inline]
    pub fn is_friend_of(self, other: Player) -> bool {
        self.team() == other.team()
    }

    pub const fn name(self) -> &'static str {
        match self {
            Player::Red => "Red",
            Player::Blue => "Blue",
            Player::Yellow => "Yellow",
            Player::Green => "Green",
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Letter used in FEN4 for the side to move; `?` when nobody is on move.
pub fn player_letter(player: Option<Player>) -> char {
    player.map_or('?', Player::letter)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    #[inline]
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    #[inline]
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }
}

/// A colored piece, written as a two-character code such as `rK` or `gP`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub player: Player,
    pub kind: PieceKind,
}

impl Piece {
    #[inline]
    pub const fn new(player: Player, kind: PieceKind) -> Self {
        Self { player, kind }
    }

    pub fn code(self) -> String {
        let mut out = String::with_capacity(2);
        out.push(self.player.letter());
        out.push(self.kind.letter());
        out
    }

    /// Parse a two-character piece code.
    pub fn from_code(code: &str) -> Option<Self> {
        let mut chars = code.chars();
        let player = Player::from_letter(chars.next()?)?;
        let kind = PieceKind::from_letter(chars.next()?)?;
        if chars.next().is_some() {
            return None;
        }
        Some(Self { player, kind })
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.player.letter(), self.kind.letter())
    }
}

/// Board coordinate. Files are lettered from `a`, ranks are printed 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    pub file: u8,
    pub rank: u8,
}

impl Square {
    #[inline]
    pub const fn new(file: u8, rank: u8) -> Self {
        Self { file, rank }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", char::from(b'a' + self.file), u32::from(self.rank) + 1)
    }
}

impl FromStr for Square {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::utils::algebraic::algebraic_to_square(s)
    }
}

/// Game outcome as written in the PGN4 `Result` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameResult {
    #[default]
    NoResult,
    /// Red and Yellow win.
    Team1Wins,
    /// Blue and Green win.
    Team2Wins,
    Draw,
}

impl GameResult {
    pub const fn as_str(self) -> &'static str {
        match self {
            GameResult::NoResult => "*",
            GameResult::Team1Wins => "1-0",
            GameResult::Team2Wins => "0-1",
            GameResult::Draw => "1/2-1/2",
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameResult {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "*" => Ok(GameResult::NoResult),
            "1-0" => Ok(GameResult::Team1Wins),
            "0-1" => Ok(GameResult::Team2Wins),
            "1/2-1/2" => Ok(GameResult::Draw),
            _ => Err(ChessError::malformed(format!("unknown result '{s}'"))),
        }
    }
}
