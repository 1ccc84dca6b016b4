//! Move tokens and their algebraic rendering.
//!
//! A move is stored in the move tree as a token `"<piece> <from> [<captured>] <to>"`,
//! e.g. `rP e2 e4` or `rK h1 rR k1`. The token carries enough to replay the
//! move on the board, including the two-piece castling relocation.

use std::fmt;
use std::str::FromStr;

use crate::errors::ChessError;
use crate::game_state::chess_types::{Piece, PieceKind, Square};
use crate::utils::algebraic::algebraic_to_square;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    /// King and rook three squares apart.
    Kingside,
    /// King and rook four squares apart.
    Queenside,
}

/// Where king and rook land when a king is moved onto its own rook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Castling {
    pub side: CastleSide,
    pub king_to: Square,
    pub rook_to: Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveRecord {
    pub piece: Piece,
    pub from: Square,
    pub captured: Option<Piece>,
    pub to: Square,
}

impl MoveRecord {
    pub fn new(piece: Piece, from: Square, captured: Option<Piece>, to: Square) -> Self {
        Self {
            piece,
            from,
            captured,
            to,
        }
    }

    pub fn to_token(&self) -> String {
        encode_move_token(self.piece, self.from, self.captured, self.to)
    }

    pub fn from_token(token: &str) -> Result<Self, ChessError> {
        let parts: Vec<&str> = token.split_whitespace().collect();
        let (piece, from, captured, to) = match parts.as_slice() {
            [piece, from, to] => (*piece, *from, None, *to),
            [piece, from, captured, to] => (*piece, *from, Some(*captured), *to),
            _ => return Err(ChessError::malformed(format!("invalid move token '{token}'"))),
        };

        let parse_piece = |code: &str| {
            Piece::from_code(code)
                .ok_or_else(|| ChessError::malformed(format!("invalid piece '{code}' in '{token}'")))
        };

        Ok(Self {
            piece: parse_piece(piece)?,
            from: algebraic_to_square(from)?,
            captured: captured.map(parse_piece).transpose()?,
            to: algebraic_to_square(to)?,
        })
    }

    /// A king moved onto a rook of its own color, at any distance.
    pub fn is_king_onto_own_rook(&self) -> bool {
        self.piece.kind == PieceKind::King
            && self
                .captured
                .is_some_and(|rook| rook.kind == PieceKind::Rook && rook.player == self.piece.player)
    }

    /// Castling geometry when this is a king landing on a rook of its own
    /// color three or four squares away along a rank or a file.
    pub fn castling(&self) -> Option<Castling> {
        if !self.is_king_onto_own_rook() {
            return None;
        }

        let along_rank = self.from.rank == self.to.rank;
        let along_file = self.from.file == self.to.file;
        let (from_axis, to_axis) = if along_rank && !along_file {
            (self.from.file, self.to.file)
        } else if along_file && !along_rank {
            (self.from.rank, self.to.rank)
        } else {
            return None;
        };

        let from_axis = i16::from(from_axis);
        let to_axis = i16::from(to_axis);
        let dir = (to_axis - from_axis).signum();
        let (side, king_axis) = match (to_axis - from_axis).abs() {
            3 => (CastleSide::Kingside, to_axis - dir),
            4 => (CastleSide::Queenside, to_axis - 2 * dir),
            _ => return None,
        };
        let rook_axis = from_axis + dir;

        let place = |axis: i16| {
            let axis = axis as u8;
            if along_rank {
                Square::new(axis, self.from.rank)
            } else {
                Square::new(self.from.file, axis)
            }
        };

        Some(Castling {
            side,
            king_to: place(king_axis),
            rook_to: place(rook_axis),
        })
    }

    /// Piece relocations that play this move, in order. A king onto its own
    /// rook outside the castling offsets moves nothing.
    pub fn relocations(&self) -> Vec<(Square, Square)> {
        match self.castling() {
            Some(castling) => vec![(self.from, castling.king_to), (self.to, castling.rook_to)],
            None if self.is_king_onto_own_rook() => Vec::new(),
            None => vec![(self.from, self.to)],
        }
    }

    /// Every square whose contents playing this move can change.
    pub fn touched_squares(&self) -> Vec<Square> {
        let mut squares = vec![self.from, self.to];
        if let Some(castling) = self.castling() {
            squares.push(castling.king_to);
            squares.push(castling.rook_to);
        }
        squares
    }

    pub fn to_algebraic(&self) -> String {
        if let Some(castling) = self.castling() {
            return match castling.side {
                CastleSide::Kingside => "O-O".to_owned(),
                CastleSide::Queenside => "O-O-O".to_owned(),
            };
        }

        let capture = if self.captured.is_some() { "x" } else { "" };
        if self.piece.kind == PieceKind::Pawn {
            if self.captured.is_some() {
                let file = char::from(b'a' + self.from.file);
                return format!("{file}x{}", self.to);
            }
            return self.to.to_string();
        }

        format!("{}{capture}{}", self.piece.kind.letter(), self.to)
    }
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_token())
    }
}

impl FromStr for MoveRecord {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s)
    }
}

/// Space-joined `piece from [captured] to`.
pub fn encode_move_token(piece: Piece, from: Square, captured: Option<Piece>, to: Square) -> String {
    match captured {
        Some(captured) => format!("{piece} {from} {captured} {to}"),
        None => format!("{piece} {from} {to}"),
    }
}

/// Algebraic rendering of a move token (`e4`, `exf5`, `Nf3`, `Qxd7`, `O-O`).
pub fn to_algebraic(token: &str) -> Result<String, ChessError> {
    Ok(MoveRecord::from_token(token)?.to_algebraic())
}
