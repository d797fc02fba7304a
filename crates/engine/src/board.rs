//! The core board representation: a flat array of 90 signed piece values.

use crate::constants::{BOARD_SIZE, Piece, Player, Position, TOTAL_COL, TOTAL_ROW};
use crate::error::ParseError;
use crate::r#move::Movement;
use crate::position::{self, in_palace, row};
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

pub const STARTING_BOARD: [Piece; BOARD_SIZE] = {
    use Piece::*;
    [
        BChariot, BHorse, BElephant, BAdvisor, BGeneral, BAdvisor, BElephant, BHorse, BChariot,
        Empty, Empty, Empty, Empty, Empty, Empty, Empty, Empty, Empty,
        Empty, BCannon, Empty, Empty, Empty, Empty, Empty, BCannon, Empty,
        BSoldier, Empty, BSoldier, Empty, BSoldier, Empty, BSoldier, Empty, BSoldier,
        Empty, Empty, Empty, Empty, Empty, Empty, Empty, Empty, Empty,
        Empty, Empty, Empty, Empty, Empty, Empty, Empty, Empty, Empty,
        RSoldier, Empty, RSoldier, Empty, RSoldier, Empty, RSoldier, Empty, RSoldier,
        Empty, RCannon, Empty, Empty, Empty, Empty, Empty, RCannon, Empty,
        Empty, Empty, Empty, Empty, Empty, Empty, Empty, Empty, Empty,
        RChariot, RHorse, RElephant, RAdvisor, RGeneral, RAdvisor, RElephant, RHorse, RChariot,
    ]
};

const HEADER: &str = "  A B C D E F G H I ";

/// One Xiangqi position. Mutated only through [`Board::move_piece`] and
/// [`Board::set_piece`]; callers that need the next board clone first.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Piece; BOARD_SIZE],
}

impl Board {
    pub const fn empty() -> Self {
        Self {
            squares: [Piece::Empty; BOARD_SIZE],
        }
    }

    pub const fn starting() -> Self {
        Self {
            squares: STARTING_BOARD,
        }
    }

    /// The piece on `pos`, or `Empty` for squares off the board.
    pub fn piece_at(&self, pos: Position) -> Piece {
        self.squares.get(pos).copied().unwrap_or(Piece::Empty)
    }

    pub fn set_piece(&mut self, pos: Position, piece: Piece) {
        if let Some(square) = self.squares.get_mut(pos) {
            *square = piece;
        }
    }

    /// Applies a movement without checking that it is legal and returns the
    /// captured piece. Moving from an empty square, onto the same square, or
    /// off the board changes nothing and returns `Empty`.
    pub fn move_piece(&mut self, mv: Movement) -> Piece {
        let (from_sq, to_sq) = (mv.origin(), mv.dest());
        if from_sq == to_sq || !position::is_on_board(from_sq) || !position::is_on_board(to_sq) {
            return Piece::Empty;
        }
        let moving_piece = self.squares[from_sq];
        if moving_piece.is_empty() {
            return Piece::Empty;
        }
        let captured_piece = self.squares[to_sq];
        self.squares[to_sq] = moving_piece;
        self.squares[from_sq] = Piece::Empty;
        captured_piece
    }

    /// Pieces of `player` with their squares, in row-major order.
    pub fn pieces(&self, player: Player) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter(move |(_, piece)| piece.belongs_to(player))
            .map(|(pos, &piece)| (pos, piece))
    }

    pub fn piece_count(&self) -> usize {
        self.squares.iter().filter(|p| !p.is_empty()).count()
    }

    /// Rotates 180 degrees and swaps colours, so the side to move sees the
    /// board from the other player's seat.
    pub fn flipped(&self) -> Board {
        let mut out = Board::empty();
        for (pos, &piece) in self.squares.iter().enumerate() {
            out.squares[position::flip_position(pos)] = piece.flipped();
        }
        out
    }

    /// Reflects left to right. Colours are kept.
    pub fn mirrored_horizontal(&self) -> Board {
        let mut out = Board::empty();
        for (pos, &piece) in self.squares.iter().enumerate() {
            out.squares[position::mirror_position_horizontal(pos)] = piece;
        }
        out
    }

    /// Reflects across the river and swaps colours, so each side keeps its own half.
    pub fn mirrored_vertical(&self) -> Board {
        let mut out = Board::empty();
        for (pos, &piece) in self.squares.iter().enumerate() {
            out.squares[position::mirror_position_vertical(pos)] = piece.flipped();
        }
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::starting()
    }
}

impl Index<Position> for Board {
    type Output = Piece;

    fn index(&self, pos: Position) -> &Self::Output {
        &self.squares[pos]
    }
}

impl IndexMut<Position> for Board {
    fn index_mut(&mut self, pos: Position) -> &mut Self::Output {
        &mut self.squares[pos]
    }
}

fn empty_glyph(pos: Position) -> char {
    let r = row(pos);
    if r == 4 || r == 5 {
        '-'
    } else if in_palace(Player::Red, pos) || in_palace(Player::Black, pos) {
        '*'
    } else {
        '.'
    }
}

fn is_empty_glyph(c: char) -> bool {
    matches!(c, '.' | '*' | '-')
}

/// Canonical diagram: header, then one labelled line per row.
/// Empty squares show `*` inside a palace, `-` on the two river rows, `.` elsewhere.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{HEADER}")?;
        for r in 0..TOTAL_ROW {
            write!(f, "{r} ")?;
            for c in 0..TOTAL_COL {
                let sq = position::pos(r, c);
                let piece = self.squares[sq];
                let glyph = if piece.is_empty() { empty_glyph(sq) } else { piece.to_char() };
                write!(f, "{glyph} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Parses the diagram written by `Display`. The header line is optional and
/// `.`, `*`, `-` are all read as an empty square.
impl FromStr for Board {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rows = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .peekable();
        if rows.peek().is_some_and(|line| line.starts_with('A')) {
            rows.next();
        }

        let mut board = Board::empty();
        let mut parsed = 0;
        for (r, line) in rows.take(TOTAL_ROW).enumerate() {
            let mut tokens = line.split_whitespace();
            let label = tokens.next().unwrap_or_default();
            if label != r.to_string() {
                return Err(ParseError::BadRowLabel {
                    row: r,
                    found: label.to_string(),
                });
            }
            let cells: Vec<&str> = tokens.collect();
            if cells.len() != TOTAL_COL {
                return Err(ParseError::RowLength { row: r, cells: cells.len() });
            }
            for (c, cell) in cells.iter().enumerate() {
                let mut chars = cell.chars();
                let (Some(glyph), None) = (chars.next(), chars.next()) else {
                    return Err(ParseError::UnknownGlyph {
                        row: r,
                        col: c,
                        glyph: cell.chars().next().unwrap_or(' '),
                    });
                };
                if is_empty_glyph(glyph) {
                    continue;
                }
                let piece = Piece::from_char(glyph)
                    .ok_or(ParseError::UnknownGlyph { row: r, col: c, glyph })?;
                board.squares[position::pos(r, c)] = piece;
            }
            parsed += 1;
        }

        if parsed < TOTAL_ROW {
            return Err(ParseError::TooShort {
                expected: TOTAL_ROW,
                actual: parsed,
            });
        }
        Ok(board)
    }
}
