//! Players that choose a movement for the side to move.

use crate::board::Board;
use crate::constants::Player;
use crate::r#move::Movement;
use crate::rules::{MoveFilter, possible_moves};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

pub trait Agent {
    /// Picks a movement for `player`, or `None` when `player` cannot move at all.
    fn make_move(&mut self, board: &Board, player: Player) -> Option<Movement>;
}

/// Moves that keep the own general safe, or every pseudo-legal move when
/// there are none (the position is already lost).
pub fn candidate_moves(board: &Board, player: Player) -> Vec<Movement> {
    let legal = possible_moves(board, player, MoveFilter::AvoidSelfCheck);
    if legal.is_empty() {
        possible_moves(board, player, MoveFilter::AllowSelfCheck)
    } else {
        legal
    }
}

/// Plays uniformly at random among [`candidate_moves`].
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Agent for RandomAgent {
    fn make_move(&mut self, board: &Board, player: Player) -> Option<Movement> {
        candidate_moves(board, player).choose(&mut self.rng).copied()
    }
}
