#![allow(dead_code)]

use engine::position::{parse_position, position_name};
use engine::{Board, MoveFilter, Player, Position, RandomAgent, Agent, is_game_over, possible_positions};

pub fn sq(name: &str) -> Position {
    parse_position(name).unwrap()
}

pub fn board(text: &str) -> Board {
    text.parse().unwrap()
}

/// Destinations of the piece on `from`, as sorted square names.
pub fn dests(board: &Board, from: &str, filter: MoveFilter) -> Vec<String> {
    let mut names: Vec<String> = possible_positions(board, sq(from), filter)
        .iter()
        .map(|&p| position_name(p))
        .collect();
    names.sort();
    names
}

pub fn names(list: &[&str]) -> Vec<String> {
    let mut v: Vec<String> = list.iter().map(|s| s.to_uppercase()).collect();
    v.sort();
    v
}

/// Boards met along a seeded random game from the starting position.
pub fn random_game(seed: u64, max_plies: usize) -> Vec<Board> {
    let mut agent = RandomAgent::with_seed(seed);
    let mut board = Board::starting();
    let mut player = Player::Red;
    let mut seen = vec![board.clone()];
    for _ in 0..max_plies {
        if is_game_over(&board) {
            break;
        }
        let Some(mv) = agent.make_move(&board, player) else { break };
        board.move_piece(mv);
        player = player.opponent();
        seen.push(board.clone());
    }
    seen
}
