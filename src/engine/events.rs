//! Synchronous event dispatch from the game core to its front-ends.
//!
//! Subscribers are called in registration order, on the caller's thread, at
//! the moment the state changes. Nothing is queued.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::game_state::chess_types::{GameResult, Player, Square};
use crate::move_tree::move_tree::TreeSnapshot;

/// Everything a front-end can observe about the game.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// The whole board was replaced (new game, FEN4 import, failed import).
    BoardReset,
    CellChanged { square: Square },
    CurrentPlayerChanged(Option<Player>),
    GameOver(GameResult),
    Fen4Generated(String),
    Pgn4Generated(String),
    /// The move tree gained a node. Names are in algebraic notation.
    MoveTreeChanged(TreeSnapshot),
    /// Mark the squares of the move just made in `player`'s color.
    AddHighlight { from: Square, to: Square, player: Player },
    /// Clear every highlight drawn in `player`'s color.
    RemoveHighlights(Option<Player>),
}

pub type Listener = Box<dyn FnMut(&GameEvent)>;

/// Shared, cloneable handle to a list of subscribers.
///
/// Clones dispatch to the same subscribers. Subscribers must not subscribe
/// from inside a callback.
#[derive(Clone, Default)]
pub struct EventBus {
    listeners: Rc<RefCell<Vec<Listener>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: impl FnMut(&GameEvent) + 'static) {
        self.listeners.borrow_mut().push(Box::new(listener));
    }

    pub fn emit(&self, event: GameEvent) {
        for listener in self.listeners.borrow_mut().iter_mut() {
            listener(&event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Subscribe a recorder that keeps every event, mostly for tests and
    /// scripted front-ends.
    pub fn record(&self) -> EventLog {
        let log = EventLog::default();
        let sink = log.clone();
        self.subscribe(move |event| sink.events.borrow_mut().push(event.clone()));
        log
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<GameEvent>>>,
}

impl EventLog {
    /// Remove and return everything recorded so far.
    pub fn drain(&self) -> Vec<GameEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}
