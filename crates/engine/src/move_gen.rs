//! Per-piece destination generators and the attack primitives shared with
//! check detection, backed by pre-computed jump tables.
//!
//! Generators only apply movement geometry and the capture rule (a square held
//! by the mover's own colour is never a destination). Whether the move leaves
//! the mover's general attacked is decided in `rules`.

use crate::board::Board;
use crate::constants::{
    BOARD_SIZE, MAX_ADVISOR_MOVES, MAX_CANNON_MOVES, MAX_CHARIOT_MOVES, MAX_DESTINATIONS,
    MAX_ELEPHANT_MOVES, MAX_GENERAL_MOVES, MAX_HORSE_MOVES, MAX_SOLDIER_MOVES, PieceKind, Player,
    Position, TOTAL_COL, TOTAL_ROW,
};
use crate::movelist::PositionList;
use crate::position::{col, in_palace, on_own_side, pos, row};
use once_cell::sync::Lazy;

pub type GeneralMoves = PositionList<MAX_GENERAL_MOVES>;
pub type AdvisorMoves = PositionList<MAX_ADVISOR_MOVES>;
pub type ElephantMoves = PositionList<MAX_ELEPHANT_MOVES>;
pub type HorseMoves = PositionList<MAX_HORSE_MOVES>;
pub type ChariotMoves = PositionList<MAX_CHARIOT_MOVES>;
pub type CannonMoves = PositionList<MAX_CANNON_MOVES>;
pub type SoldierMoves = PositionList<MAX_SOLDIER_MOVES>;
pub type Destinations = PositionList<MAX_DESTINATIONS>;

type Delta = (isize, isize);

// Slide order: up, down, left, right.
const ORTHOGONAL: [Delta; 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
// General steps: down, up, right, left.
const GENERAL_STEPS: [Delta; 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const ADVISOR_STEPS: [Delta; 4] = [(1, -1), (1, 1), (-1, -1), (-1, 1)];
const ELEPHANT_STEPS: [Delta; 4] = [(-2, -2), (-2, 2), (2, -2), (2, 2)];
// Long leg first: up, down, left, right.
const HORSE_STEPS: [Delta; 8] = [
    (-2, -1),
    (-2, 1),
    (2, -1),
    (2, 1),
    (-1, -2),
    (1, -2),
    (-1, 2),
    (1, 2),
];

const fn is_valid(r: isize, c: isize) -> bool {
    r >= 0 && r < TOTAL_ROW as isize && c >= 0 && c < TOTAL_COL as isize
}

fn offset(from: Position, (dr, dc): Delta) -> Option<Position> {
    let (r, c) = (row(from) as isize + dr, col(from) as isize + dc);
    is_valid(r, c).then(|| pos(r as usize, c as usize))
}

/// A jump to `dest` that is cancelled when `block` is occupied
/// (the horse's leg, the elephant's eye).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Jump {
    pub dest: Position,
    pub block: Position,
}

/// Geometry that only depends on the origin square, computed once.
pub struct MoveTables {
    advisor: Vec<Vec<Position>>,
    elephant: Vec<Vec<Jump>>,
    horse: Vec<Vec<Jump>>,
}

/// Advisors stand on the palace diagonals: the four corners and the centre.
fn is_advisor_point(sq: Position) -> bool {
    let on_palace = in_palace(Player::Red, sq) || in_palace(Player::Black, sq);
    let middle_row = row(sq) == 1 || row(sq) == 8;
    on_palace && ((col(sq) == 4) == middle_row)
}

impl MoveTables {
    fn new() -> Self {
        let mut tables = MoveTables {
            advisor: vec![Vec::new(); BOARD_SIZE],
            elephant: vec![Vec::new(); BOARD_SIZE],
            horse: vec![Vec::new(); BOARD_SIZE],
        };

        for sq in 0..BOARD_SIZE {
            if is_advisor_point(sq) {
                let palace = if row(sq) < 5 { Player::Black } else { Player::Red };
                tables.advisor[sq] = ADVISOR_STEPS
                    .iter()
                    .filter_map(|&d| offset(sq, d))
                    .filter(|&to| in_palace(palace, to))
                    .collect();
            }

            for (dr, dc) in ELEPHANT_STEPS {
                if let (Some(dest), Some(block)) = (offset(sq, (dr, dc)), offset(sq, (dr / 2, dc / 2))) {
                    tables.elephant[sq].push(Jump { dest, block });
                }
            }

            for (dr, dc) in HORSE_STEPS {
                let leg = if dr.abs() == 2 { (dr / 2, 0) } else { (0, dc / 2) };
                if let (Some(dest), Some(block)) = (offset(sq, (dr, dc)), offset(sq, leg)) {
                    tables.horse[sq].push(Jump { dest, block });
                }
            }
        }

        tables
    }
}

// The global instance, initialized lazily and only once.
pub static MOVE_TABLES: Lazy<MoveTables> = Lazy::new(MoveTables::new);

/// Squares walked from `from` (exclusive) towards the board edge.
fn ray(from: Position, (dr, dc): Delta) -> impl Iterator<Item = Position> {
    let (r, c) = (row(from) as isize, col(from) as isize);
    (1..)
        .map(move |k| (r + dr * k, c + dc * k))
        .take_while(|&(r, c)| is_valid(r, c))
        .map(|(r, c)| pos(r as usize, c as usize))
}

fn direction_to(from: Position, to: Position) -> Option<Delta> {
    if from == to {
        return None;
    }
    let (fr, fc) = (row(from) as isize, col(from) as isize);
    let (tr, tc) = (row(to) as isize, col(to) as isize);
    if fr == tr {
        Some((0, (tc - fc).signum()))
    } else if fc == tc {
        Some(((tr - fr).signum(), 0))
    } else {
        None
    }
}

// --- Attack primitives ---

/// Number of pieces strictly between two squares on the same row or column.
/// `None` when the squares do not share a line.
pub fn count_between(board: &Board, from: Position, to: Position) -> Option<usize> {
    let dir = direction_to(from, to)?;
    Some(
        ray(from, dir)
            .take_while(|&sq| sq != to)
            .filter(|&sq| !board[sq].is_empty())
            .count(),
    )
}

/// Same row or column with nothing in between.
pub fn is_path_clear(board: &Board, from: Position, to: Position) -> bool {
    count_between(board, from, to) == Some(0)
}

fn jump_open(board: &Board, jump: &Jump) -> bool {
    board[jump.block].is_empty()
}

pub fn horse_reaches(board: &Board, from: Position, to: Position) -> bool {
    MOVE_TABLES.horse[from]
        .iter()
        .any(|jump| jump.dest == to && jump_open(board, jump))
}

/// Elephants never cross the river, so the destination must be on `player`'s side.
pub fn elephant_reaches(board: &Board, player: Player, from: Position, to: Position) -> bool {
    MOVE_TABLES.elephant[from]
        .iter()
        .any(|jump| jump.dest == to && on_own_side(player, to) && jump_open(board, jump))
}

/// Forward one row; sideways too once the soldier is across the river.
pub fn soldier_steps(player: Player, from: Position) -> SoldierMoves {
    let (forward, crossed) = match player {
        Player::Red => (-1, row(from) <= 4),
        Player::Black => (1, row(from) >= 5),
    };
    let mut steps = SoldierMoves::new();
    if let Some(to) = offset(from, (forward, 0)) {
        steps.add(to);
    }
    if crossed {
        for side in [(0, -1), (0, 1)] {
            if let Some(to) = offset(from, side) {
                steps.add(to);
            }
        }
    }
    steps
}

/// Whether the piece on `from` attacks `target`, using the same geometry as
/// its generator. Advisors are never treated as attackers.
pub fn attacks(board: &Board, from: Position, target: Position) -> bool {
    let piece = board[from];
    let (Some(kind), Some(player)) = (piece.kind(), piece.player()) else {
        return false;
    };
    match kind {
        PieceKind::General => col(from) == col(target) && is_path_clear(board, from, target),
        PieceKind::Chariot => is_path_clear(board, from, target),
        PieceKind::Cannon => count_between(board, from, target) == Some(1),
        PieceKind::Horse => horse_reaches(board, from, target),
        PieceKind::Elephant => elephant_reaches(board, player, from, target),
        PieceKind::Soldier => soldier_steps(player, from).contains(target),
        PieceKind::Advisor => false,
    }
}

// --- Generators ---

fn can_land(board: &Board, player: Player, to: Position) -> bool {
    !board[to].belongs_to(player)
}

/// Orthogonal steps inside the own palace, preceded by the flying-general
/// capture when the enemy general stands on the same open column.
pub fn general_moves(board: &Board, from: Position) -> GeneralMoves {
    let mut moves = GeneralMoves::new();
    let Some(player) = board[from].player() else {
        return moves;
    };

    let enemy_general = player.opponent().general();
    for dir in [(-1, 0), (1, 0)] {
        if let Some(first) = ray(from, dir).find(|&sq| !board[sq].is_empty()) {
            if board[first] == enemy_general {
                moves.add(first);
            }
        }
    }

    for step in GENERAL_STEPS {
        if let Some(to) = offset(from, step) {
            if in_palace(player, from) && in_palace(player, to) && can_land(board, player, to) {
                moves.add(to);
            }
        }
    }
    moves
}

pub fn advisor_moves(board: &Board, from: Position) -> AdvisorMoves {
    let mut moves = AdvisorMoves::new();
    let Some(player) = board[from].player() else {
        return moves;
    };
    if !in_palace(player, from) {
        return moves;
    }
    for &to in &MOVE_TABLES.advisor[from] {
        if can_land(board, player, to) {
            moves.add(to);
        }
    }
    moves
}

pub fn elephant_moves(board: &Board, from: Position) -> ElephantMoves {
    let mut moves = ElephantMoves::new();
    let Some(player) = board[from].player() else {
        return moves;
    };
    for jump in &MOVE_TABLES.elephant[from] {
        if on_own_side(player, jump.dest) && jump_open(board, jump) && can_land(board, player, jump.dest) {
            moves.add(jump.dest);
        }
    }
    moves
}

pub fn horse_moves(board: &Board, from: Position) -> HorseMoves {
    let mut moves = HorseMoves::new();
    let Some(player) = board[from].player() else {
        return moves;
    };
    for jump in &MOVE_TABLES.horse[from] {
        if jump_open(board, jump) && can_land(board, player, jump.dest) {
            moves.add(jump.dest);
        }
    }
    moves
}

/// Slides until the first piece, which is included only when it is an enemy.
pub fn chariot_moves(board: &Board, from: Position) -> ChariotMoves {
    let mut moves = ChariotMoves::new();
    let Some(player) = board[from].player() else {
        return moves;
    };
    for dir in ORTHOGONAL {
        for to in ray(from, dir) {
            if board[to].is_empty() {
                moves.add(to);
                continue;
            }
            if can_land(board, player, to) {
                moves.add(to);
            }
            break;
        }
    }
    moves
}

/// Slides over empty squares; captures only the first piece behind exactly one screen.
pub fn cannon_moves(board: &Board, from: Position) -> CannonMoves {
    let mut moves = CannonMoves::new();
    let Some(player) = board[from].player() else {
        return moves;
    };
    for dir in ORTHOGONAL {
        let mut screened = false;
        for to in ray(from, dir) {
            let occupied = !board[to].is_empty();
            if !screened {
                if occupied {
                    screened = true;
                } else {
                    moves.add(to);
                }
            } else if occupied {
                if can_land(board, player, to) {
                    moves.add(to);
                }
                break;
            }
        }
    }
    moves
}

pub fn soldier_moves(board: &Board, from: Position) -> SoldierMoves {
    let mut moves = SoldierMoves::new();
    let Some(player) = board[from].player() else {
        return moves;
    };
    for &to in &soldier_steps(player, from) {
        if can_land(board, player, to) {
            moves.add(to);
        }
    }
    moves
}

/// Dispatches to the generator for the piece on `from`. Empty squares yield nothing.
pub fn piece_destinations(board: &Board, from: Position) -> Destinations {
    let Some(kind) = board[from].kind() else {
        return Destinations::new();
    };
    match kind {
        PieceKind::General => general_moves(board, from).widen(),
        PieceKind::Advisor => advisor_moves(board, from).widen(),
        PieceKind::Elephant => elephant_moves(board, from).widen(),
        PieceKind::Horse => horse_moves(board, from).widen(),
        PieceKind::Chariot => chariot_moves(board, from),
        PieceKind::Cannon => cannon_moves(board, from),
        PieceKind::Soldier => soldier_moves(board, from).widen(),
    }
}
