//! Check detection, winner detection and player-level move enumeration.

use crate::board::Board;
use crate::constants::{PieceKind, Player, Position, Winner};
use crate::move_gen::{self, Destinations};
use crate::r#move::Movement;

/// Whether enumeration drops moves that leave the mover's own general attacked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveFilter {
    /// Geometry and capture rule only.
    AllowSelfCheck,
    /// Also discard moves after which the mover is in check, except captures of
    /// the enemy general, which end the game.
    AvoidSelfCheck,
}

const RED_PALACE: [Position; 9] = [66, 67, 68, 75, 76, 77, 84, 85, 86];
const BLACK_PALACE: [Position; 9] = [3, 4, 5, 12, 13, 14, 21, 22, 23];

/// Locates `player`'s general. Only palace squares are searched, own palace first.
pub fn find_general(board: &Board, player: Player) -> Option<Position> {
    let (own, other) = match player {
        Player::Red => (RED_PALACE, BLACK_PALACE),
        Player::Black => (BLACK_PALACE, RED_PALACE),
    };
    let general = player.general();
    own.into_iter().chain(other).find(|&sq| board[sq] == general)
}

/// True when `player`'s general is attacked, or is no longer on the board.
pub fn is_in_check(board: &Board, player: Player) -> bool {
    let Some(general) = find_general(board, player) else {
        return true;
    };
    board
        .pieces(player.opponent())
        .any(|(from, _)| move_gen::attacks(board, from, general))
}

pub fn get_winner(board: &Board) -> Winner {
    match (
        find_general(board, Player::Red).is_some(),
        find_general(board, Player::Black).is_some(),
    ) {
        (true, true) => Winner::None,
        (true, false) => Winner::Red,
        (false, true) => Winner::Black,
        (false, false) => Winner::Draw,
    }
}

pub fn is_game_over(board: &Board) -> bool {
    get_winner(board) != Winner::None
}

/// Plays `mv` on a copy and reports whether `player` is then in check.
/// Capturing a general is never counted as self-check.
fn leaves_in_check(board: &Board, player: Player, mv: Movement) -> bool {
    let mut next = board.clone();
    let captured = next.move_piece(mv);
    if captured.kind() == Some(PieceKind::General) {
        return false;
    }
    is_in_check(&next, player)
}

/// Destinations of the piece on `from`, optionally without self-check.
pub fn possible_positions(board: &Board, from: Position, filter: MoveFilter) -> Destinations {
    let mut dests = move_gen::piece_destinations(board, from);
    if filter == MoveFilter::AvoidSelfCheck {
        if let Some(player) = board[from].player() {
            dests.retain(|to| !leaves_in_check(board, player, Movement::new(from, to)));
        }
    }
    dests
}

/// Every movement of `player`, pieces scanned row-major, then generator order.
pub fn possible_moves(board: &Board, player: Player, filter: MoveFilter) -> Vec<Movement> {
    let mut moves = Vec::new();
    for (from, _) in board.pieces(player) {
        for &to in &possible_positions(board, from, filter) {
            moves.push(Movement::new(from, to));
        }
    }
    moves
}

/// One resulting board per movement from [`possible_moves`], in the same order.
pub fn possible_boards(board: &Board, player: Player, filter: MoveFilter) -> Vec<Board> {
    possible_moves(board, player, filter)
        .into_iter()
        .map(|mv| {
            let mut next = board.clone();
            next.move_piece(mv);
            next
        })
        .collect()
}

/// True if `player` has already lost the general, or has no move that gets
/// the general out of check. Stalemate counts as a loss.
pub fn did_player_lose(board: &Board, player: Player) -> bool {
    if get_winner(board) == Winner::from(player.opponent()) {
        return true;
    }
    possible_moves(board, player, MoveFilter::AvoidSelfCheck).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::Piece;
    use crate::position::parse_position;

    fn sq(name: &str) -> Position {
        parse_position(name).unwrap()
    }

    #[test]
    fn generals_on_starting_board() {
        let board = Board::starting();
        assert_eq!(find_general(&board, Player::Red), Some(sq("E9")));
        assert_eq!(find_general(&board, Player::Black), Some(sq("E0")));
        assert!(!is_in_check(&board, Player::Red));
        assert!(!is_in_check(&board, Player::Black));
        assert_eq!(get_winner(&board), Winner::None);
        assert!(!is_game_over(&board));
    }

    #[test]
    fn general_outside_palaces_is_not_found() {
        let mut board = Board::empty();
        board[sq("A0")] = Piece::BGeneral;
        board[sq("E8")] = Piece::BGeneral;
        // The stray general in Red's palace is the one reported.
        assert_eq!(find_general(&board, Player::Black), Some(sq("E8")));
        board[sq("E8")] = Piece::Empty;
        assert_eq!(find_general(&board, Player::Black), None);
        assert!(is_in_check(&board, Player::Black));
    }

    #[test]
    fn winner_by_missing_general() {
        let mut board = Board::empty();
        assert_eq!(get_winner(&board), Winner::Draw);
        board[sq("E9")] = Piece::RGeneral;
        assert_eq!(get_winner(&board), Winner::Red);
        board[sq("E0")] = Piece::BGeneral;
        assert_eq!(get_winner(&board), Winner::None);
        board[sq("E9")] = Piece::Empty;
        assert_eq!(get_winner(&board), Winner::Black);
    }

    #[test]
    fn starting_move_counts() {
        let board = Board::starting();
        for player in [Player::Red, Player::Black] {
            let all = possible_moves(&board, player, MoveFilter::AllowSelfCheck);
            let legal = possible_moves(&board, player, MoveFilter::AvoidSelfCheck);
            assert_eq!(all.len(), 44);
            assert_eq!(legal, all);
            assert_eq!(possible_boards(&board, player, MoveFilter::AllowSelfCheck).len(), 44);
        }
    }

    #[test]
    fn empty_square_has_no_moves() {
        let board = Board::starting();
        assert!(possible_positions(&board, sq("E5"), MoveFilter::AvoidSelfCheck).is_empty());
    }

    #[test]
    fn lost_player() {
        let mut board = Board::empty();
        board[sq("E9")] = Piece::RGeneral;
        assert!(did_player_lose(&board, Player::Black));
        assert!(!did_player_lose(&board, Player::Red));

        // Two chariots seal the black general on the back rank.
        board[sq("E0")] = Piece::BGeneral;
        board[sq("A0")] = Piece::RChariot;
        board[sq("A1")] = Piece::RChariot;
        board.move_piece(Movement::new(sq("E9"), sq("D9")));
        assert!(is_in_check(&board, Player::Black));
        assert!(did_player_lose(&board, Player::Black));
        assert!(!did_player_lose(&board, Player::Red));
    }
}
