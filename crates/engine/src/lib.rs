//! Xiangqi rules engine: board codec, per-piece move generation, check and
//! winner detection, a game session and simple playing agents.

pub mod agent;
pub mod board;
pub mod config;
pub mod constants;
pub mod error;
pub mod game;
pub mod mcts;
pub mod move_gen;
pub mod movelist;
pub mod r#move;
pub mod position;
pub mod rules;
pub mod state;

pub use agent::{Agent, RandomAgent};
pub use board::Board;
pub use config::MctsConfig;
pub use constants::{NO_POSITION, Piece, PieceKind, Player, Position, Winner};
pub use error::ParseError;
pub use game::{Game, MoveAction};
pub use mcts::MctsAgent;
pub use r#move::Movement;
pub use rules::{
    MoveFilter, did_player_lose, find_general, get_winner, is_game_over, is_in_check, possible_boards,
    possible_moves, possible_positions,
};
pub use state::BoardState;
