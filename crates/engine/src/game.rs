//! A game session: current board, side to move and an undoable move history.

use crate::board::Board;
use crate::constants::{Piece, Player, Position, Winner};
use crate::position::is_on_board;
use crate::r#move::Movement;
use crate::rules::get_winner;
use crate::state::BoardState;

/// One applied movement, kept so it can be undone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveAction {
    pub piece: Piece,
    pub movement: Movement,
    pub captured: Piece,
}

#[derive(Debug, Clone)]
pub struct Game {
    initial: Board,
    first_player: Player,
    board: Board,
    player: Player,
    /// Board before each recorded action, in lockstep with `actions`.
    history: Vec<Board>,
    actions: Vec<MoveAction>,
}

impl Game {
    pub fn new() -> Self {
        Self::from_board(Board::starting())
    }

    pub fn from_board(board: Board) -> Self {
        Self {
            initial: board.clone(),
            first_player: Player::Red,
            board,
            player: Player::Red,
            history: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub fn current_player(&self) -> Player {
        self.player
    }

    pub fn moves_count(&self) -> usize {
        self.actions.len()
    }

    /// Lets Black open the game. Only possible before the first move.
    pub fn make_black_move_first(&mut self) -> bool {
        if !self.actions.is_empty() {
            log::warn!("black cannot move first once the game has started");
            return false;
        }
        self.first_player = Player::Black;
        self.player = Player::Black;
        true
    }

    pub fn piece_at(&self, pos: Position) -> Piece {
        self.board.piece_at(pos)
    }

    pub fn current_board(&self) -> &Board {
        &self.board
    }

    pub fn winner(&self) -> Winner {
        get_winner(&self.board)
    }

    /// Applies `movement` for the side to move and returns the captured piece.
    ///
    /// Movements from an empty square, onto the origin square, off the board,
    /// or of the opponent's piece are ignored and report `Empty`. The rules of the
    /// movement itself are not checked.
    pub fn move_piece(&mut self, movement: Movement) -> Piece {
        let piece = self.board.piece_at(movement.origin());
        if movement.origin() == movement.dest()
            || piece.is_empty()
            || !is_on_board(movement.dest())
        {
            return Piece::Empty;
        }
        if !piece.belongs_to(self.player) {
            log::warn!("{:?} cannot move {piece:?} with {movement}", self.player);
            return Piece::Empty;
        }

        let before = self.board.clone();
        let captured = self.board.move_piece(movement);
        self.history.push(before);
        self.actions.push(MoveAction {
            piece,
            movement,
            captured,
        });
        log::debug!("{:?} plays {movement}, captures {captured:?}", self.player);
        self.player = self.player.opponent();
        captured
    }

    pub fn can_undo(&self) -> bool {
        !self.actions.is_empty()
    }

    /// Takes back the last movement, restoring the board and the side to move.
    pub fn undo(&mut self) -> Option<MoveAction> {
        let action = self.actions.pop()?;
        if let Some(board) = self.history.pop() {
            self.board = board;
        }
        self.player = self.player.opponent();
        log::debug!("undo {}", action.movement);
        Some(action)
    }

    pub fn initial_board_state(&self) -> BoardState {
        BoardState::encode(&self.initial)
    }

    /// The game's movements packed as 16-bit values, oldest first.
    pub fn export_moves(&self) -> Vec<u16> {
        self.actions.iter().map(|a| a.movement.bits()).collect()
    }

    pub fn actions(&self) -> &[MoveAction] {
        &self.actions
    }

    pub fn captured_pieces(&self) -> Vec<Piece> {
        self.actions
            .iter()
            .map(|a| a.captured)
            .filter(|p| !p.is_empty())
            .collect()
    }

    /// Back to the initial board with an empty history.
    pub fn restart(&mut self) {
        self.board = self.initial.clone();
        self.player = self.first_player;
        self.history.clear();
        self.actions.clear();
    }

    /// Starts over from a decoded board state, Red to move.
    pub fn restore_board(&mut self, state: BoardState) {
        self.initial = state.decode();
        self.first_player = Player::Red;
        self.restart();
    }

    /// Restarts and replays packed movements. Returns how many were applied;
    /// replay stops at the first movement the session ignores.
    pub fn restore_moves(&mut self, moves: &[u16]) -> usize {
        self.restart();
        for (applied, &bits) in moves.iter().enumerate() {
            let before = self.moves_count();
            self.move_piece(Movement::from_bits(bits));
            if self.moves_count() == before {
                log::warn!("replay stopped at move {applied} ({bits:#06x})");
                return applied;
            }
        }
        moves.len()
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}
