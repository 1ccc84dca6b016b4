//! Everything that makes up one game in progress.
//!
//! `GameState` holds the board, the move tree with a pointer to the move
//! currently shown, the turn queue and counters, the result, and the four
//! player names. It is plain data; the engine is what keeps it consistent.

use std::collections::{HashMap, VecDeque};

use crate::engine::events::EventBus;
use crate::game_state::board::Board;
use crate::game_state::chess_rules::{BOARD_FILES, BOARD_RANKS, TURN_ORDER, UNKNOWN_NAME};
use crate::game_state::chess_types::{GameResult, Player};
use crate::game_state::undo_state::UndoState;
use crate::move_tree::move_tree::{MoveTree, NodeId};

#[derive(Debug, Clone)]
pub struct GameState {
    pub board: Board,

    // --- Move history ---
    pub move_tree: MoveTree,
    pub current_move: NodeId,
    /// Squares each played node overwrote, keyed by the node.
    pub undo_log: HashMap<NodeId, UndoState>,

    // --- Turn tracking ---
    pub current_player: Option<Player>,
    /// Front is the player on move.
    pub player_queue: VecDeque<Player>,
    /// Quarter moves from the root to `current_move`.
    pub move_number: usize,

    pub result: GameResult,
    /// Indexed by [`Player::index`].
    pub player_names: [String; 4],
}

impl GameState {
    /// Empty board on `events`, nobody on move, no moves played.
    pub fn new(events: EventBus) -> Self {
        let board = Board::with_events(BOARD_FILES, BOARD_RANKS, events);
        let move_tree = MoveTree::new();
        let current_move = move_tree.root();
        Self {
            board,
            move_tree,
            current_move,
            undo_log: HashMap::new(),
            current_player: None,
            player_queue: VecDeque::from(TURN_ORDER),
            move_number: 0,
            result: GameResult::NoResult,
            player_names: std::array::from_fn(|_| UNKNOWN_NAME.to_owned()),
        }
    }

    pub fn player_name(&self, player: Player) -> &str {
        &self.player_names[player.index()]
    }

    /// Drop the move history, keeping the board as it is.
    pub fn reset_history(&mut self) {
        self.move_tree = MoveTree::new();
        self.current_move = self.move_tree.root();
        self.undo_log.clear();
        self.move_number = 0;
    }

    /// Rotate the queue until `player` is at the front.
    pub fn rotate_queue_to(&mut self, player: Player) {
        if let Some(offset) = self.player_queue.iter().position(|&p| p == player) {
            self.player_queue.rotate_left(offset);
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(EventBus::new())
    }
}

#[cfg(test)]
mod tests {
    use super::GameState;
    use crate::game_state::chess_types::{GameResult, Player};

    #[test]
    fn fresh_state_has_no_player_and_unknown_names() {
        let state = GameState::default();
        assert_eq!(state.current_player, None);
        assert_eq!(state.result, GameResult::NoResult);
        assert_eq!(state.move_number, 0);
        assert!(state.move_tree.is_empty());
        for player in Player::ALL {
            assert_eq!(state.player_name(player), "?");
        }
        assert_eq!(state.board.pieces().count(), 0);
    }

    #[test]
    fn rotate_queue_to_brings_the_player_to_the_front() {
        let mut state = GameState::default();
        state.rotate_queue_to(Player::Yellow);
        assert_eq!(
            state.player_queue.iter().copied().collect::<Vec<_>>(),
            vec![Player::Yellow, Player::Green, Player::Red, Player::Blue]
        );
        state.rotate_queue_to(Player::Red);
        assert_eq!(state.player_queue.front(), Some(&Player::Red));
    }
}
