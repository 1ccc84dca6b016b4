//! Crate root module declarations for the four-player chess core.
//!
//! This file exposes the board and game state, the branching move tree, the
//! notation codecs (FEN4, move tokens, PGN4), the variant rules, the game
//! engine with its event stream, and the console front-end, so binaries,
//! benches, and external front-ends can import stable module paths.

pub mod errors;

pub mod game_state {
    pub mod board;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
    pub mod undo_state;
}

pub mod move_tree {
    pub mod linearize;
    pub mod move_tree;
}

pub mod variants {
    pub mod free_for_all;
    pub mod teams;
    pub mod variant_trait;
}

pub mod engine {
    pub mod config;
    pub mod events;
    pub mod game_engine;
}

pub mod console {
    pub mod console_top;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen4_generator;
    pub mod fen4_parser;
    pub mod move_token;
    pub mod pgn4;
    pub mod random_playout;
    pub mod render_game_state;
}
