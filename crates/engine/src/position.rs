//! Square arithmetic: row/column conversion, flips, mirrors and square names.

use crate::constants::{BOARD_SIZE, NO_POSITION, Player, Position, RED_RIVER_START, TOTAL_COL, TOTAL_ROW};
use crate::error::ParseError;

pub const fn pos(row: usize, col: usize) -> Position {
    row * TOTAL_COL + col
}

pub const fn row(pos: Position) -> usize {
    pos / TOTAL_COL
}

pub const fn col(pos: Position) -> usize {
    pos % TOTAL_COL
}

pub const fn is_on_board(pos: Position) -> bool {
    pos < BOARD_SIZE
}

/// 180 degree rotation. Squares off the board map to `NO_POSITION`.
pub const fn flip_position(pos: Position) -> Position {
    if !is_on_board(pos) {
        return NO_POSITION;
    }
    BOARD_SIZE - 1 - pos
}

/// Reflection across the centre column (column E stays put).
pub const fn mirror_position_horizontal(pos: Position) -> Position {
    pos - col(pos) + (TOTAL_COL - 1 - col(pos))
}

/// Reflection across the river.
pub const fn mirror_position_vertical(pos: Position) -> Position {
    (TOTAL_ROW - 1 - row(pos)) * TOTAL_COL + col(pos)
}

/// The 3x3 palace of `player`: columns D-F, rows 7-9 for Red and 0-2 for Black.
pub const fn in_palace(player: Player, pos: Position) -> bool {
    let (r, c) = (row(pos), col(pos));
    if c < 3 || c > 5 {
        return false;
    }
    match player {
        Player::Red => r >= 7 && r <= 9,
        Player::Black => r <= 2,
    }
}

/// Whether `pos` lies on `player`'s own side of the river.
pub const fn on_own_side(player: Player, pos: Position) -> bool {
    match player {
        Player::Red => pos >= RED_RIVER_START && pos < BOARD_SIZE,
        Player::Black => pos < RED_RIVER_START,
    }
}

/// Parses a square name such as `"B7"`: column letter then row digit, case-insensitive.
pub fn parse_position(name: &str) -> Result<Position, ParseError> {
    let bad = || ParseError::BadPosition(name.to_string());
    let mut chars = name.trim().chars();
    let (Some(letter), Some(digit), None) = (chars.next(), chars.next(), chars.next()) else {
        return Err(bad());
    };
    let letter = letter.to_ascii_uppercase();
    if !('A'..='I').contains(&letter) {
        return Err(bad());
    }
    let r = digit.to_digit(10).ok_or_else(bad)? as usize;
    Ok(pos(r, (letter as u8 - b'A') as usize))
}

/// Inverse of [`parse_position`], always uppercase.
pub fn position_name(pos: Position) -> String {
    if !is_on_board(pos) {
        return "--".to_string();
    }
    format!("{}{}", (b'A' + col(pos) as u8) as char, row(pos))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_and_col_invert_pos() {
        for r in 0..TOTAL_ROW {
            for c in 0..TOTAL_COL {
                assert_eq!(row(pos(r, c)), r);
                assert_eq!(col(pos(r, c)), c);
            }
        }
    }

    #[test]
    fn square_names() {
        assert_eq!(parse_position("a0"), Ok(pos(0, 0)));
        assert_eq!(parse_position("B7"), Ok(pos(7, 1)));
        assert_eq!(parse_position("i9"), Ok(89));
        assert!(parse_position("J0").is_err());
        assert!(parse_position("A").is_err());
        assert!(parse_position("A10").is_err());
        assert_eq!(position_name(pos(7, 1)), "B7");
    }

    #[test]
    fn flips_and_mirrors_are_involutions() {
        for p in 0..BOARD_SIZE {
            assert_eq!(flip_position(flip_position(p)), p);
            assert_eq!(mirror_position_horizontal(mirror_position_horizontal(p)), p);
            assert_eq!(mirror_position_vertical(mirror_position_vertical(p)), p);
        }
        assert_eq!(flip_position(NO_POSITION), NO_POSITION);
        assert_eq!(flip_position(BOARD_SIZE), NO_POSITION);
        assert_eq!(flip_position(200), NO_POSITION);
        assert_eq!(mirror_position_horizontal(pos(3, 4)), pos(3, 4));
        assert_eq!(mirror_position_horizontal(pos(3, 0)), pos(3, 8));
        assert_eq!(mirror_position_vertical(pos(4, 2)), pos(5, 2));
    }

    #[test]
    fn palaces_and_sides() {
        assert!(in_palace(Player::Red, pos(9, 4)));
        assert!(in_palace(Player::Black, pos(0, 3)));
        assert!(!in_palace(Player::Red, pos(0, 3)));
        assert!(!in_palace(Player::Black, pos(1, 6)));
        assert!(on_own_side(Player::Red, pos(5, 0)));
        assert!(!on_own_side(Player::Red, pos(4, 8)));
        assert!(on_own_side(Player::Black, pos(4, 8)));
    }
}
