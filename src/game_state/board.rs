//! Cell grid for the four-player board.
//!
//! The board stores one `Option<Piece>` per square, indexed
//! `file + rank * files`, and announces every effective change on its
//! event bus. It knows nothing about turns or legality.

use tracing::warn;

use crate::engine::events::{EventBus, GameEvent};
use crate::errors::ChessError;
use crate::game_state::chess_rules::{BOARD_FILES, BOARD_RANKS, CORNER_SIZE};
use crate::game_state::chess_types::{Piece, Square};
use crate::utils::fen4_generator::generate_board_field;
use crate::utils::fen4_parser::parse_board_field;

#[derive(Debug)]
pub struct Board {
    files: u8,
    ranks: u8,
    cells: Vec<Option<Piece>>,
    events: EventBus,
}

/// A copy gets its own unobserved event bus, so editing it signals nobody.
impl Clone for Board {
    fn clone(&self) -> Self {
        Self {
            files: self.files,
            ranks: self.ranks,
            cells: self.cells.clone(),
            events: EventBus::new(),
        }
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.files == other.files && self.ranks == other.ranks && self.cells == other.cells
    }
}

impl Eq for Board {}

impl Board {
    /// Empty board with its own, unobserved event bus.
    pub fn new(files: u8, ranks: u8) -> Self {
        Self::with_events(files, ranks, EventBus::new())
    }

    /// Empty 14×14 board.
    pub fn standard() -> Self {
        Self::new(BOARD_FILES, BOARD_RANKS)
    }

    pub fn with_events(files: u8, ranks: u8, events: EventBus) -> Self {
        Self {
            files,
            ranks,
            cells: vec![None; usize::from(files) * usize::from(ranks)],
            events,
        }
    }

    #[inline]
    pub fn files(&self) -> u8 {
        self.files
    }

    #[inline]
    pub fn ranks(&self) -> u8 {
        self.ranks
    }

    #[inline]
    pub fn cells(&self) -> &[Option<Piece>] {
        &self.cells
    }

    #[inline]
    pub fn contains(&self, square: Square) -> bool {
        square.file < self.files && square.rank < self.ranks
    }

    /// On the board and outside the four corner bands.
    pub fn is_playable(&self, square: Square) -> bool {
        let in_band = |x: u8, size: u8| x < CORNER_SIZE || x >= size.saturating_sub(CORNER_SIZE);
        self.contains(square) && !(in_band(square.file, self.files) && in_band(square.rank, self.ranks))
    }

    fn index(&self, square: Square) -> Result<usize, ChessError> {
        if !self.contains(square) {
            return Err(ChessError::OutOfRange {
                file: square.file,
                rank: square.rank,
            });
        }
        Ok(usize::from(square.file) + usize::from(square.rank) * usize::from(self.files))
    }

    pub fn get(&self, square: Square) -> Result<Option<Piece>, ChessError> {
        Ok(self.cells[self.index(square)?])
    }

    /// Store `cell` on `square`. Returns whether anything changed; unchanged
    /// writes emit nothing.
    pub fn set(&mut self, square: Square, cell: Option<Piece>) -> Result<bool, ChessError> {
        let index = self.index(square)?;
        if self.cells[index] == cell {
            return Ok(false);
        }
        self.cells[index] = cell;
        self.events.emit(GameEvent::CellChanged { square });
        Ok(true)
    }

    /// Relocate whatever is on `from` to `to`, leaving `from` empty.
    pub fn move_piece(&mut self, from: Square, to: Square) -> Result<(), ChessError> {
        let piece = self.get(from)?;
        self.index(to)?;
        self.set(to, piece)?;
        self.set(from, None)?;
        Ok(())
    }

    /// Empty every square and announce a reset.
    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = None);
        self.events.emit(GameEvent::BoardReset);
    }

    /// Replace the position with the board field of `fen4`.
    ///
    /// Import is all-or-nothing: on any parse error the board is left empty.
    pub fn import_fen4(&mut self, fen4: &str) -> Result<(), ChessError> {
        match parse_board_field(fen4, self.files, self.ranks) {
            Ok(cells) => {
                self.cells = cells;
                self.events.emit(GameEvent::BoardReset);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "FEN4 import failed, clearing board");
                self.clear();
                Err(err)
            }
        }
    }

    pub fn export_fen4(&self) -> String {
        generate_board_field(self)
    }

    /// Occupied squares in index order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        let files = usize::from(self.files);
        self.cells.iter().enumerate().filter_map(move |(index, cell)| {
            cell.map(|piece| {
                let square = Square::new((index % files) as u8, (index / files) as u8);
                (square, piece)
            })
        })
    }
}
