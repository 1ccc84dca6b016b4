//! Game controller tying the board, move tree, and variant rules together.
//!
//! Front-ends drive a [`GameEngine`] through its boundary methods (moves,
//! navigation, position import, names, notation export) and observe it by
//! subscribing to its [`EventBus`]. Every change is announced synchronously
//! while the method that caused it is still running.

use std::fs;
use std::path::Path;

use chrono::{Local, NaiveDate};
use tracing::{debug, info, warn};

use crate::engine::config::EngineConfig;
use crate::engine::events::{EventBus, GameEvent};
use crate::errors::ChessError;
use crate::game_state::chess_rules::{PLACEHOLDER_NAME, UNKNOWN_NAME};
use crate::game_state::chess_types::{GameResult, Player, Square};
use crate::game_state::game_state::GameState;
use crate::game_state::undo_state::{play_record, UndoState};
use crate::move_tree::move_tree::{NodeId, TreeSnapshot};
use crate::utils::fen4_generator::generate_fen4;
use crate::utils::fen4_parser::parse_turn_field;
use crate::utils::move_token::{to_algebraic, MoveRecord};
use crate::utils::pgn4::generate_pgn4;
use crate::variants::variant_trait::{Variant, VariantRules};

/// Direction for [`GameEngine::navigate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Prev,
    Next,
    First,
    Last,
}

#[derive(Debug)]
pub struct GameEngine {
    config: EngineConfig,
    rules: Box<dyn VariantRules>,
    events: EventBus,
    state: GameState,
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GameEngine {
    /// Teams engine with an empty board. Call [`GameEngine::new_game`] to set
    /// up the starting position.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        let events = EventBus::new();
        Self {
            config,
            rules: config.variant.rules(),
            state: GameState::new(events.clone()),
            events,
        }
    }

    pub fn subscribe(&self, listener: impl FnMut(&GameEvent) + 'static) {
        self.events.subscribe(listener);
    }

    #[inline]
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    pub fn variant(&self) -> Variant {
        self.rules.variant()
    }

    #[inline]
    pub fn rules(&self) -> &dyn VariantRules {
        self.rules.as_ref()
    }

    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[inline]
    pub fn current_player(&self) -> Option<Player> {
        self.state.current_player
    }

    #[inline]
    pub fn move_number(&self) -> usize {
        self.state.move_number
    }

    #[inline]
    pub fn result(&self) -> GameResult {
        self.state.result
    }

    #[inline]
    pub fn current_move(&self) -> NodeId {
        self.state.current_move
    }

    /// Reset to the variant's starting position with Red on move and an
    /// empty move history.
    pub fn new_game(&mut self) -> Result<(), ChessError> {
        self.state.board.import_fen4(self.rules.starting_fen4())?;
        self.set_result(GameResult::NoResult);
        self.set_current_player(Some(Player::Red));
        self.state.rotate_queue_to(Player::Red);
        self.state.reset_history();
        info!(variant = self.rules.event_name(), "new game");
        Ok(())
    }

    /// [`GameEngine::try_apply_move`], reporting only whether the move was
    /// accepted.
    pub fn apply_move(&mut self, from: Square, to: Square) -> bool {
        self.try_apply_move(from, to).is_ok()
    }

    /// Validate and play a move for the player on move.
    ///
    /// A move already recorded under the current node is followed instead of
    /// being added again, so replaying a known line keeps its variations.
    pub fn try_apply_move(&mut self, from: Square, to: Square) -> Result<MoveRecord, ChessError> {
        if self.config.block_moves_after_result && self.state.result != GameResult::NoResult {
            debug!(%from, %to, result = %self.state.result, "move refused after game end");
            return Err(ChessError::GameOver(self.state.result));
        }

        let record = self
            .rules
            .validate_move(&self.state.board, self.state.current_player, from, to)
            .inspect_err(|err| debug!(%from, %to, error = %err, "move rejected"))?;
        let undo = UndoState::capture(&self.state.board, record)?;

        let token = record.to_token();
        let parent = self.state.current_move;
        let node = match self.state.move_tree.find_child(parent, &token) {
            Some(existing) => existing,
            None => {
                let node = self.state.move_tree.add(parent, token.as_str());
                self.state.move_tree.linearize();
                self.events
                    .emit(GameEvent::MoveTreeChanged(self.tree_snapshot()));
                node
            }
        };

        debug!(%token, ply = self.state.move_number + 1, "move accepted");
        self.play_node(node, undo)?;
        Ok(record)
    }

    /// Step back one move. Returns `false` at the root.
    pub fn prev_move(&mut self) -> bool {
        let current = self.state.current_move;
        let Some(parent) = self.state.move_tree.parent(current) else {
            return false;
        };

        // Every node is entered through `play_node`, which logs its undo state.
        let Some(undo) = self.state.undo_log.get(&current) else {
            warn!(node = ?current, "no undo state for the current move");
            return false;
        };
        if let Err(err) = undo.restore(&mut self.state.board) {
            warn!(error = %err, "could not take back move");
            return false;
        }

        self.state.current_move = parent;
        self.state.move_number = self.state.move_number.saturating_sub(1);
        self.state.player_queue.rotate_right(1);
        self.set_current_player(self.state.player_queue.front().copied());
        self.events
            .emit(GameEvent::RemoveHighlights(self.state.current_player));
        debug!(ply = self.state.move_number, "stepped back");
        true
    }

    /// Step forward along the most recent variation. Returns `false` at a leaf.
    pub fn next_move(&mut self) -> bool {
        let Some(child) = self.state.move_tree.last_child(self.state.current_move) else {
            return false;
        };

        if let Err(err) = self.replay_child(child) {
            warn!(error = %err, "could not replay move");
            return false;
        }
        debug!(ply = self.state.move_number, "stepped forward");
        true
    }

    /// Rewind to the root. Returns whether any move was taken back.
    pub fn first_move(&mut self) -> bool {
        let mut moved = false;
        while self.prev_move() {
            moved = true;
        }
        moved
    }

    /// Follow the most recent variation to its end.
    pub fn last_move(&mut self) -> bool {
        let mut moved = false;
        while self.next_move() {
            moved = true;
        }
        moved
    }

    pub fn navigate(&mut self, direction: Navigation) -> bool {
        match direction {
            Navigation::Prev => self.prev_move(),
            Navigation::Next => self.next_move(),
            Navigation::First => self.first_move(),
            Navigation::Last => self.last_move(),
        }
    }

    /// Store the result. Only the first change away from `*` is announced.
    pub fn set_result(&mut self, value: GameResult) {
        let previous = self.state.result;
        if previous == value {
            return;
        }
        self.state.result = value;
        if previous == GameResult::NoResult {
            info!(result = %value, "game over");
            self.events.emit(GameEvent::GameOver(value));
        }
    }

    /// Load a pasted FEN4. The board field replaces the position and a valid
    /// turn letter sets the player on move; counters are ignored. An empty
    /// string does nothing.
    ///
    /// The move tree and undo log are kept, so navigating afterwards replays
    /// recorded moves onto the pasted board. Call [`GameEngine::new_game`]
    /// first for a clean history.
    pub fn set_position(&mut self, fen4: &str) -> Result<(), ChessError> {
        if fen4.is_empty() {
            return Ok(());
        }
        self.state.board.import_fen4(fen4)?;
        if let Some(player) = parse_turn_field(fen4) {
            self.set_current_player(Some(player));
        }
        Ok(())
    }

    /// Names in seat order Red, Blue, Yellow, Green. Blank names and the
    /// input placeholder are stored as `?`.
    pub fn set_player_names(&mut self, names: [&str; 4]) {
        for (slot, name) in self.state.player_names.iter_mut().zip(names) {
            *slot = normalize_player_name(name);
        }
    }

    pub fn player_names(&self) -> &[String; 4] {
        &self.state.player_names
    }

    /// FEN4 of the position on the board.
    pub fn generate_fen4(&self) -> String {
        let fen4 = generate_fen4(
            &self.state.board,
            self.state.current_player,
            self.state.move_number,
        );
        self.events.emit(GameEvent::Fen4Generated(fen4.clone()));
        fen4
    }

    /// PGN4 transcript dated today.
    pub fn generate_pgn4(&self) -> Result<String, ChessError> {
        self.generate_pgn4_dated(Local::now().date_naive())
    }

    pub fn generate_pgn4_dated(&self, date: NaiveDate) -> Result<String, ChessError> {
        self.generate_fen4();
        let pgn4 = generate_pgn4(&self.state, self.rules.event_name(), date)?;
        self.events.emit(GameEvent::Pgn4Generated(pgn4.clone()));
        Ok(pgn4)
    }

    pub fn save_pgn4(&self, path: impl AsRef<Path>) -> Result<(), ChessError> {
        let pgn4 = self.generate_pgn4()?;
        fs::write(path.as_ref(), pgn4)?;
        info!(path = %path.as_ref().display(), "saved PGN4");
        Ok(())
    }

    /// Whole move tree with moves in algebraic notation.
    pub fn tree_snapshot(&self) -> TreeSnapshot {
        let tree = &self.state.move_tree;
        tree.snapshot(tree.root(), &|token: &str| {
            to_algebraic(token).unwrap_or_else(|_| token.to_owned())
        })
    }

    fn set_current_player(&mut self, player: Option<Player>) {
        if self.state.current_player == player {
            return;
        }
        self.state.current_player = player;
        if let Some(player) = player {
            self.state.rotate_queue_to(player);
        }
        self.events.emit(GameEvent::CurrentPlayerChanged(player));
    }

    fn replay_child(&mut self, child: NodeId) -> Result<(), ChessError> {
        let record = MoveRecord::from_token(self.state.move_tree.name(child))?;
        let undo = UndoState::capture(&self.state.board, record)?;
        self.play_node(child, undo)
    }

    /// Play the move stored at `node` (a child of the current node) and hand
    /// the turn on.
    fn play_node(&mut self, node: NodeId, undo: UndoState) -> Result<(), ChessError> {
        let record = undo.record;
        play_record(&mut self.state.board, &record)?;
        self.state.undo_log.insert(node, undo);
        self.state.current_move = node;
        self.state.move_number += 1;

        self.events.emit(GameEvent::AddHighlight {
            from: record.from,
            to: record.to,
            player: record.piece.player,
        });
        self.state.player_queue.rotate_left(1);
        self.set_current_player(self.state.player_queue.front().copied());
        self.events
            .emit(GameEvent::RemoveHighlights(self.state.current_player));
        Ok(())
    }
}

fn normalize_player_name(name: &str) -> String {
    if name.is_empty() || name == PLACEHOLDER_NAME {
        UNKNOWN_NAME.to_owned()
    } else {
        name.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::{GameEngine, Navigation};
    use crate::engine::config::EngineConfig;
    use crate::engine::events::GameEvent;
    use crate::errors::{ChessError, IllegalMove};
    use crate::game_state::board::Board;
    use crate::game_state::chess_rules::{STARTING_POSITION_FEN4, TURN_ORDER};
    use crate::game_state::chess_types::{GameResult, Piece, PieceKind, Player, Square};
    use crate::utils::random_playout::random_playout;
    use crate::variants::variant_trait::Variant;

    fn sq(name: &str) -> Square {
        name.parse().expect("test square should parse")
    }

    fn started() -> GameEngine {
        let mut engine = GameEngine::new();
        engine.new_game().expect("starting position should load");
        engine
    }

    /// One pawn push per seat, in turn order.
    const FIRST_ROUND: [(&str, &str); 4] = [("e2", "e4"), ("b5", "d5"), ("e13", "e11"), ("m10", "k10")];

    #[test]
    fn new_game_sets_up_red_to_move() {
        let mut engine = GameEngine::new();
        let log = engine.events().record();
        engine.new_game().expect("starting position should load");

        assert_eq!(engine.current_player(), Some(Player::Red));
        assert_eq!(engine.move_number(), 0);
        assert_eq!(engine.state().board.pieces().count(), 64);
        assert_eq!(
            log.drain(),
            vec![
                GameEvent::BoardReset,
                GameEvent::CurrentPlayerChanged(Some(Player::Red))
            ]
        );
    }

    #[test]
    fn moves_hand_the_turn_on_in_seat_order() {
        let mut engine = started();
        for (n, (from, to)) in FIRST_ROUND.iter().enumerate() {
            assert_eq!(engine.current_player(), Some(TURN_ORDER[n % 4]));
            assert!(engine.apply_move(sq(from), sq(to)), "{from}-{to}");
            assert_eq!(engine.move_number(), n + 1);
        }
        assert_eq!(engine.current_player(), Some(Player::Red));
        assert_eq!(
            engine.state().player_queue.iter().copied().collect::<Vec<_>>(),
            TURN_ORDER.to_vec()
        );
    }

    #[test]
    fn accepted_move_emits_tree_then_board_then_turn_events() {
        let mut engine = started();
        let log = engine.events().record();

        assert!(engine.apply_move(sq("e2"), sq("e4")));

        let events = log.drain();
        assert!(matches!(&events[0], GameEvent::MoveTreeChanged(tree) if tree.children[0].name == "e4"));
        assert_eq!(
            events[1..].to_vec(),
            vec![
                GameEvent::CellChanged { square: sq("e4") },
                GameEvent::CellChanged { square: sq("e2") },
                GameEvent::AddHighlight {
                    from: sq("e2"),
                    to: sq("e4"),
                    player: Player::Red
                },
                GameEvent::CurrentPlayerChanged(Some(Player::Blue)),
                GameEvent::RemoveHighlights(Some(Player::Blue)),
            ]
        );
    }

    #[test]
    fn rejected_moves_change_nothing() {
        let mut engine = started();
        let before = engine.state().board.clone();
        let log = engine.events().record();

        // Blue piece on Red's turn.
        assert!(!engine.apply_move(sq("b5"), sq("c5")));
        // Corner destination.
        assert_eq!(
            engine.try_apply_move(sq("d2"), sq("c2")),
            Err(ChessError::OutOfRange { file: 2, rank: 1 })
        );
        // Own piece on the destination.
        assert!(matches!(
            engine.try_apply_move(sq("d1"), sq("d2")),
            Err(ChessError::IllegalMove(IllegalMove::FriendlyFire { .. }))
        ));

        assert!(log.is_empty());
        assert_eq!(engine.state().board, before);
        assert_eq!(engine.move_number(), 0);
        assert_eq!(engine.current_player(), Some(Player::Red));
        assert!(engine.state().move_tree.is_empty());
    }

    #[test]
    fn nothing_moves_before_a_game_is_started() {
        let mut engine = GameEngine::new();
        assert_eq!(
            engine.try_apply_move(sq("e2"), sq("e4")),
            Err(ChessError::IllegalMove(IllegalMove::NoCurrentPlayer))
        );
    }

    #[test]
    fn red_may_capture_blue_but_not_yellow() {
        let mut engine = started();
        let mut board = Board::standard();
        board
            .import_fen4(STARTING_POSITION_FEN4)
            .expect("starting FEN4 should import");
        board
            .set(sq("e3"), Some(Piece::new(Player::Yellow, PieceKind::Pawn)))
            .expect("e3 is on the board");
        board
            .set(sq("f3"), Some(Piece::new(Player::Blue, PieceKind::Pawn)))
            .expect("f3 is on the board");
        engine
            .set_position(&format!("{}r - - 0 1", board.export_fen4()))
            .expect("edited position should import");

        assert!(!engine.apply_move(sq("e2"), sq("e3")));
        let record = engine
            .try_apply_move(sq("e2"), sq("f3"))
            .expect("capturing Blue is allowed");
        assert_eq!(record.to_algebraic(), "exf3");
    }

    #[test]
    fn kingside_castling_relocates_both_pieces() {
        let mut engine = started();
        let log = engine.events().record();

        let record = engine
            .try_apply_move(sq("h1"), sq("k1"))
            .expect("castling pattern should be accepted");

        assert_eq!(record.to_token(), "rK h1 rR k1");
        assert_eq!(record.to_algebraic(), "O-O");
        let board = &engine.state().board;
        assert_eq!(board.get(sq("j1")), Ok(Some(Piece::new(Player::Red, PieceKind::King))));
        assert_eq!(board.get(sq("i1")), Ok(Some(Piece::new(Player::Red, PieceKind::Rook))));
        assert_eq!(board.get(sq("h1")), Ok(None));
        assert_eq!(board.get(sq("k1")), Ok(None));

        let tree = match &log.drain()[0] {
            GameEvent::MoveTreeChanged(tree) => tree.clone(),
            other => panic!("expected a tree change first, got {other:?}"),
        };
        assert_eq!(tree.children[0].name, "O-O");
        assert_eq!(engine.state().move_tree.linear_moves()[0].token, "rK h1 rR k1");
    }

    #[test]
    fn prev_move_restores_the_board_after_castling() {
        let mut engine = started();
        let before = engine.state().board.clone();

        assert!(engine.apply_move(sq("h1"), sq("d1")));
        assert_ne!(engine.state().board, before);

        assert!(engine.prev_move());
        assert_eq!(engine.state().board, before);
        assert_eq!(engine.move_number(), 0);
        assert_eq!(engine.current_player(), Some(Player::Red));
        assert!(!engine.prev_move());
    }

    #[test]
    fn replaying_a_known_move_reuses_the_node() {
        let mut engine = started();
        assert!(engine.apply_move(sq("e2"), sq("e4")));
        let first = engine.current_move();
        assert!(engine.prev_move());

        let log = engine.events().record();
        assert!(engine.apply_move(sq("e2"), sq("e4")));

        assert_eq!(engine.current_move(), first);
        assert_eq!(engine.state().move_tree.len(), 2);
        assert!(!log
            .drain()
            .iter()
            .any(|event| matches!(event, GameEvent::MoveTreeChanged(_))));
    }

    #[test]
    fn navigation_replays_the_same_positions() {
        let mut engine = started();
        let mut positions = vec![engine.state().board.clone()];
        for (from, to) in FIRST_ROUND {
            assert!(engine.apply_move(sq(from), sq(to)));
            positions.push(engine.state().board.clone());
        }

        assert!(engine.navigate(Navigation::First));
        assert_eq!(engine.state().board, positions[0]);
        assert_eq!(engine.move_number(), 0);

        for (n, expected) in positions.iter().enumerate().skip(1) {
            assert!(engine.navigate(Navigation::Next));
            assert_eq!(&engine.state().board, expected);
            assert_eq!(engine.move_number(), n);
            assert_eq!(engine.current_player(), Some(TURN_ORDER[n % 4]));
        }
        assert!(!engine.navigate(Navigation::Next));

        assert!(engine.navigate(Navigation::First));
        assert!(engine.navigate(Navigation::Last));
        assert_eq!(engine.state().board, positions[4]);
        assert!(!engine.navigate(Navigation::Last));
    }

    #[test]
    fn next_move_follows_the_most_recent_variation() {
        let mut engine = started();
        assert!(engine.apply_move(sq("e2"), sq("e4")));
        assert!(engine.prev_move());
        assert!(engine.apply_move(sq("f2"), sq("f4")));
        assert!(engine.prev_move());

        assert!(engine.next_move());
        assert_eq!(
            engine.state().board.get(sq("f4")),
            Ok(Some(Piece::new(Player::Red, PieceKind::Pawn)))
        );
        assert_eq!(engine.state().board.get(sq("e4")), Ok(None));
    }

    #[test]
    fn random_games_count_moves_and_rewind_to_the_start() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..5 {
            let mut engine = started();
            let start = engine.state().board.clone();

            let played = random_playout(&mut engine, &mut rng, 40);
            assert_eq!(engine.move_number(), played.len());
            assert_eq!(
                engine.current_player(),
                Some(TURN_ORDER[played.len() % 4])
            );

            let end = engine.state().board.clone();
            let mut copy = Board::standard();
            copy.import_fen4(&end.export_fen4())
                .expect("exported FEN4 should import");
            assert_eq!(copy, end);

            engine.first_move();
            assert_eq!(engine.state().board, start);
            engine.last_move();
            assert_eq!(engine.state().board, end);
        }
    }

    #[test]
    fn missing_rank_separator_empties_the_board() {
        let mut engine = started();
        let log = engine.events().record();
        let broken = STARTING_POSITION_FEN4.replacen("P3/3rR", "P33rR", 1);

        assert!(matches!(
            engine.set_position(&broken),
            Err(ChessError::MalformedNotation(_))
        ));
        assert_eq!(engine.state().board.pieces().count(), 0);
        assert!(log.drain().contains(&GameEvent::BoardReset));
    }

    #[test]
    fn set_position_takes_the_turn_letter() {
        let mut engine = started();
        let board_field = engine.state().board.export_fen4();

        engine
            .set_position(&format!("{board_field}y - - 0 1"))
            .expect("position should import");
        assert_eq!(engine.current_player(), Some(Player::Yellow));
        assert_eq!(engine.state().player_queue.front(), Some(&Player::Yellow));

        engine.set_position("").expect("empty input is ignored");
        assert_eq!(engine.current_player(), Some(Player::Yellow));
        assert_eq!(engine.state().board.pieces().count(), 64);
    }

    #[test]
    fn result_is_announced_once() {
        let mut engine = started();
        let log = engine.events().record();

        engine.set_result(GameResult::Team1Wins);
        engine.set_result(GameResult::Team1Wins);
        engine.set_result(GameResult::Draw);

        assert_eq!(log.drain(), vec![GameEvent::GameOver(GameResult::Team1Wins)]);
        assert_eq!(engine.result(), GameResult::Draw);
    }

    #[test]
    fn blocking_after_a_result_is_opt_in() {
        let mut engine = started();
        engine.set_result(GameResult::Team2Wins);
        assert!(engine.apply_move(sq("e2"), sq("e4")));

        let mut engine = GameEngine::with_config(EngineConfig {
            block_moves_after_result: true,
            ..EngineConfig::default()
        });
        engine.new_game().expect("starting position should load");
        engine.set_result(GameResult::Team2Wins);
        assert_eq!(
            engine.try_apply_move(sq("e2"), sq("e4")),
            Err(ChessError::GameOver(GameResult::Team2Wins))
        );
    }

    #[test]
    fn free_for_all_refuses_every_move() {
        let mut engine = GameEngine::with_config(EngineConfig::with_variant(Variant::FreeForAll));
        engine.new_game().expect("starting position should load");
        assert_eq!(
            engine.try_apply_move(sq("e2"), sq("e4")),
            Err(ChessError::UnsupportedVariant("Free-For-All"))
        );
    }

    #[test]
    fn player_names_are_normalized() {
        let mut engine = GameEngine::new();
        engine.set_player_names(["Ann", "", "Player Name", "Bo"]);
        assert_eq!(engine.player_names(), &["Ann", "?", "?", "Bo"].map(String::from));
    }

    #[test]
    fn fen4_reports_turn_and_counters() {
        let mut engine = started();
        let log = engine.events().record();
        let board_field = engine.state().board.export_fen4();

        assert_eq!(engine.generate_fen4(), format!("{board_field}r - - 0 1"));
        for (from, to) in FIRST_ROUND {
            assert!(engine.apply_move(sq(from), sq(to)));
        }
        assert!(engine.generate_fen4().ends_with("r - - 4 2"));
        assert!(matches!(log.drain()[0], GameEvent::Fen4Generated(_)));
    }

    #[test]
    fn pgn4_is_announced_after_its_position() {
        let mut engine = started();
        engine.set_player_names(["Ann", "Ben", "Cy", "Di"]);
        assert!(engine.apply_move(sq("h1"), sq("k1")));
        let log = engine.events().record();

        let date = chrono::NaiveDate::from_ymd_opt(2025, 1, 2).expect("valid date");
        let pgn4 = engine.generate_pgn4_dated(date).expect("tokens are valid");

        assert!(pgn4.starts_with("[Event \"Four-Player Chess Teams\"]\n"));
        assert!(pgn4.contains("[Red \"Ann\"]\n"));
        assert!(pgn4.contains("[PlyCount \"1\"]\n"));
        assert!(pgn4.ends_with("\n\n1. O-O *"));
        let events = log.drain();
        assert!(matches!(events[0], GameEvent::Fen4Generated(_)));
        assert_eq!(events[1], GameEvent::Pgn4Generated(pgn4));
    }

    #[test]
    fn save_pgn4_writes_the_transcript() {
        let mut engine = started();
        assert!(engine.apply_move(sq("e2"), sq("e4")));
        let path = std::env::temp_dir().join(format!("four_chess_{}.pgn4", std::process::id()));

        engine.save_pgn4(&path).expect("temp dir should be writable");
        let written = std::fs::read_to_string(&path).expect("file was just written");
        std::fs::remove_file(&path).ok();

        assert!(written.ends_with("1. e4 *"));
    }

    #[test]
    fn king_onto_own_rook_outside_castling_range_only_passes_the_turn() {
        let mut board = Board::standard();
        board
            .import_fen4(STARTING_POSITION_FEN4)
            .expect("starting FEN4 should import");
        board
            .set(sq("j1"), Some(Piece::new(Player::Red, PieceKind::Rook)))
            .expect("j1 is on the board");
        let mut engine = started();
        engine
            .set_position(&format!("{}r - - 0 1", board.export_fen4()))
            .expect("position should import");
        let before = engine.state().board.clone();

        let record = engine
            .try_apply_move(sq("h1"), sq("j1"))
            .expect("king onto its own rook should be accepted");

        assert_eq!(record.to_token(), "rK h1 rR j1");
        assert_eq!(engine.state().board, before);
        assert_eq!(engine.move_number(), 1);
        assert_eq!(engine.current_player(), Some(Player::Blue));

        assert!(engine.prev_move());
        assert_eq!(engine.state().board, before);
        assert_eq!(engine.current_player(), Some(Player::Red));
    }

    #[test]
    fn new_game_after_play_starts_over() {
        let mut engine = started();
        for (from, to) in FIRST_ROUND.iter().take(2) {
            assert!(engine.apply_move(sq(from), sq(to)), "{from}-{to}");
        }
        assert_eq!(engine.state().undo_log.len(), 2);
        engine.set_result(GameResult::Team1Wins);

        engine.new_game().expect("starting position should load");

        let mut fresh = Board::standard();
        fresh
            .import_fen4(STARTING_POSITION_FEN4)
            .expect("starting FEN4 should import");
        let state = engine.state();
        assert_eq!(state.board, fresh);
        assert!(state.move_tree.is_empty());
        assert!(state.undo_log.is_empty());
        assert_eq!(state.move_number, 0);
        assert_eq!(state.result, GameResult::NoResult);
        assert_eq!(state.current_player, Some(Player::Red));
        assert_eq!(
            state.player_queue.iter().copied().collect::<Vec<_>>(),
            TURN_ORDER.to_vec()
        );
        assert!(!engine.prev_move());

        let log = engine.events().record();
        engine.set_result(GameResult::Draw);
        assert_eq!(log.drain(), vec![GameEvent::GameOver(GameResult::Draw)]);
    }

    #[test]
    fn turns_rotate_from_a_pasted_player() {
        let mut engine = started();
        let board_field = engine.state().board.export_fen4();
        engine
            .set_position(&format!("{board_field}y - - 0 1"))
            .expect("position should import");

        let moves = [
            ("e13", "e11"),
            ("m10", "k10"),
            ("e2", "e4"),
            ("b5", "d5"),
            ("f13", "f11"),
            ("m9", "k9"),
        ];
        for (n, (from, to)) in moves.iter().enumerate() {
            assert_eq!(engine.current_player(), Some(TURN_ORDER[(2 + n) % 4]), "ply {n}");
            assert!(engine.apply_move(sq(from), sq(to)), "{from}-{to}");
        }
        assert_eq!(engine.current_player(), Some(TURN_ORDER[(2 + moves.len()) % 4]));
        assert_eq!(engine.move_number(), moves.len());
    }

    #[test]
    fn set_position_keeps_the_move_history() {
        let mut engine = started();
        assert!(engine.apply_move(sq("e2"), sq("e4")));

        let empty = Board::standard().export_fen4();
        engine
            .set_position(&format!("{empty}b - - 0 1"))
            .expect("empty position should import");
        assert_eq!(engine.state().board.pieces().count(), 0);
        assert_eq!(engine.move_number(), 1);

        assert!(engine.prev_move());
        assert_eq!(
            engine.state().board.get(sq("e2")),
            Ok(Some(Piece::new(Player::Red, PieceKind::Pawn)))
        );
        assert_eq!(engine.current_player(), Some(Player::Red));
    }
}
