//! Defines the representation of a movement on the board.

use crate::constants::Position;
use crate::error::ParseError;
use crate::position::{parse_position, position_name};
use std::fmt;
use std::str::FromStr;

/// Represents a single movement.
///
/// A movement is packed into a 16-bit integer:
/// - Bits 8-15: origin square (0-89)
/// - Bits 0-7:  destination square (0-89)
///
/// This packed value is what move lists export, two bytes per move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Movement(u16);

impl Movement {
    pub fn new(origin: Position, dest: Position) -> Self {
        Movement(((origin as u16 & 0xFF) << 8) | (dest as u16 & 0xFF))
    }

    pub fn from_bits(bits: u16) -> Self {
        Movement(bits)
    }

    pub fn bits(self) -> u16 {
        self.0
    }

    /// Gets the origin square.
    pub fn origin(self) -> Position {
        (self.0 >> 8) as Position
    }

    /// Gets the destination square.
    pub fn dest(self) -> Position {
        (self.0 & 0xFF) as Position
    }
}

impl From<Movement> for u16 {
    fn from(mv: Movement) -> u16 {
        mv.0
    }
}

impl fmt::Display for Movement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", position_name(self.origin()), position_name(self.dest()))
    }
}

/// Accepts `"B7B0"` and `"B7-B0"`.
impl FromStr for Movement {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s.trim().chars().filter(|&c| c != '-').collect();
        if compact.len() != 4 || !compact.is_ascii() {
            return Err(ParseError::BadMovement(s.to_string()));
        }
        let bad = |_| ParseError::BadMovement(s.to_string());
        let origin = parse_position(&compact[..2]).map_err(bad)?;
        let dest = parse_position(&compact[2..]).map_err(bad)?;
        Ok(Movement::new(origin, dest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::pos;

    #[test]
    fn packs_origin_in_high_byte() {
        let mv = Movement::new(pos(7, 1), pos(0, 1));
        assert_eq!(mv.bits(), (64 << 8) | 1);
        assert_eq!(mv.origin(), 64);
        assert_eq!(mv.dest(), 1);
        assert_eq!(Movement::from_bits(mv.bits()), mv);
    }

    #[test]
    fn text_form() {
        let mv: Movement = "b7-b0".parse().unwrap();
        assert_eq!(mv, Movement::new(pos(7, 1), pos(0, 1)));
        assert_eq!(mv.to_string(), "B7B0");
        assert!("B7".parse::<Movement>().is_err());
        assert!("Z7B0".parse::<Movement>().is_err());
    }
}
