//! Canonical 256-bit board fingerprint.
//!
//! Each side packs into 16 bytes (two big-endian words):
//! general, 2 advisors, 2 elephants, 2 horses, 2 chariots, 2 cannons, 5 soldiers.
//! Positions of the same kind are sorted ascending and a missing piece is `0xFF`,
//! so two boards that differ only by swapping same-kind pieces encode identically.
//! Words 0-1 hold Red, words 2-3 hold Black.

use crate::board::Board;
use crate::constants::{BOARD_SIZE, NO_POSITION, Piece, PieceKind, Player, TOTAL_PIECES};

/// Byte offset of each kind inside a side's 16-byte block.
const fn slot_offset(kind: PieceKind) -> usize {
    match kind {
        PieceKind::General => 0,
        PieceKind::Advisor => 1,
        PieceKind::Elephant => 3,
        PieceKind::Horse => 5,
        PieceKind::Chariot => 7,
        PieceKind::Cannon => 9,
        PieceKind::Soldier => 11,
    }
}

/// One byte per piece.
const SIDE_BYTES: usize = TOTAL_PIECES / 2;
const EMPTY_SLOT: u8 = NO_POSITION as u8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoardState(pub [u64; 4]);

impl BoardState {
    pub fn encode(board: &Board) -> Self {
        let red = encode_side(board, Player::Red);
        let black = encode_side(board, Player::Black);
        BoardState([red[0], red[1], black[0], black[1]])
    }

    /// Rebuilds the board. Bytes that are not on-board squares are skipped.
    pub fn decode(&self) -> Board {
        let mut board = Board::empty();
        decode_side(&mut board, Player::Red, [self.0[0], self.0[1]]);
        decode_side(&mut board, Player::Black, [self.0[2], self.0[3]]);
        board
    }

    pub fn words(&self) -> [u64; 4] {
        self.0
    }
}

impl From<&Board> for BoardState {
    fn from(board: &Board) -> Self {
        BoardState::encode(board)
    }
}

fn encode_side(board: &Board, player: Player) -> [u64; 2] {
    let mut bytes = [EMPTY_SLOT; SIDE_BYTES];
    let mut filled = [0usize; 8];
    for (pos, piece) in board.pieces(player) {
        let Some(kind) = piece.kind() else { continue };
        let used = &mut filled[kind as usize];
        // Pieces beyond the usual count do not fit the layout.
        if *used == kind.count_per_side() {
            log::trace!("board state drops extra {kind:?} at square {pos}");
            continue;
        }
        bytes[slot_offset(kind) + *used] = pos as u8;
        *used += 1;
    }
    for kind in PieceKind::ALL {
        let start = slot_offset(kind);
        bytes[start..start + kind.count_per_side()].sort_unstable();
    }

    let mut high = [0u8; 8];
    let mut low = [0u8; 8];
    high.copy_from_slice(&bytes[..8]);
    low.copy_from_slice(&bytes[8..]);
    [u64::from_be_bytes(high), u64::from_be_bytes(low)]
}

fn decode_side(board: &mut Board, player: Player, words: [u64; 2]) {
    let mut bytes = [0u8; SIDE_BYTES];
    bytes[..8].copy_from_slice(&words[0].to_be_bytes());
    bytes[8..].copy_from_slice(&words[1].to_be_bytes());
    for kind in PieceKind::ALL {
        let start = slot_offset(kind);
        for &pos in &bytes[start..start + kind.count_per_side()] {
            let pos = pos as usize;
            if pos < BOARD_SIZE {
                board.set_piece(pos, Piece::new(kind, player));
            }
        }
    }
}
