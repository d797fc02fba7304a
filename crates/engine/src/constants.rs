//! Constants and core piece types used across the rules engine.

/// Square index on the flattened 10x9 board (row-major, row 0 is Black's back rank).
pub type Position = usize;

pub const TOTAL_ROW: usize = 10;
pub const TOTAL_COL: usize = 9;
pub const BOARD_SIZE: usize = TOTAL_ROW * TOTAL_COL;
pub const TOTAL_PIECES: usize = 32;

/// Marks an absent position, both in packed board states and in flipped positions.
pub const NO_POSITION: Position = 0xFF;

/// First square on Red's side of the river (row 5, column A).
pub const RED_RIVER_START: Position = 45;

// --- Generator capacities ---
// The flying-general capture is the fifth general destination.
pub const MAX_GENERAL_MOVES: usize = 5;
pub const MAX_ADVISOR_MOVES: usize = 4;
pub const MAX_ELEPHANT_MOVES: usize = 4;
pub const MAX_HORSE_MOVES: usize = 8;
pub const MAX_CHARIOT_MOVES: usize = 17;
pub const MAX_CANNON_MOVES: usize = 17;
pub const MAX_SOLDIER_MOVES: usize = 3;
/// Capacity that fits the destinations of any piece.
pub const MAX_DESTINATIONS: usize = 17;

// Negative for Black, positive for Red, magnitude is the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i8)]
pub enum Piece {
    BGeneral = -1,
    BAdvisor = -2,
    BElephant = -3,
    BHorse = -4,
    BChariot = -5,
    BCannon = -6,
    BSoldier = -7,
    Empty = 0,
    RGeneral = 1,
    RAdvisor = 2,
    RElephant = 3,
    RHorse = 4,
    RChariot = 5,
    RCannon = 6,
    RSoldier = 7,
}

/// The colourless kind of a piece, used to dispatch to move generators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i8)]
pub enum PieceKind {
    General = 1,
    Advisor = 2,
    Elephant = 3,
    Horse = 4,
    Chariot = 5,
    Cannon = 6,
    Soldier = 7,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i8)]
pub enum Player {
    Red = 1,
    Black = -1,
}

/// Outcome of a board. `None` means both generals are still on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i8)]
pub enum Winner {
    Draw = 0,
    Red = 1,
    Black = -1,
    None = -2,
}

impl Piece {
    pub const fn new(kind: PieceKind, player: Player) -> Piece {
        match (player, kind) {
            (Player::Red, PieceKind::General) => Piece::RGeneral,
            (Player::Red, PieceKind::Advisor) => Piece::RAdvisor,
            (Player::Red, PieceKind::Elephant) => Piece::RElephant,
            (Player::Red, PieceKind::Horse) => Piece::RHorse,
            (Player::Red, PieceKind::Chariot) => Piece::RChariot,
            (Player::Red, PieceKind::Cannon) => Piece::RCannon,
            (Player::Red, PieceKind::Soldier) => Piece::RSoldier,
            (Player::Black, PieceKind::General) => Piece::BGeneral,
            (Player::Black, PieceKind::Advisor) => Piece::BAdvisor,
            (Player::Black, PieceKind::Elephant) => Piece::BElephant,
            (Player::Black, PieceKind::Horse) => Piece::BHorse,
            (Player::Black, PieceKind::Chariot) => Piece::BChariot,
            (Player::Black, PieceKind::Cannon) => Piece::BCannon,
            (Player::Black, PieceKind::Soldier) => Piece::BSoldier,
        }
    }

    /// Builds a piece from its signed value. Returns `None` outside `-7..=7`.
    pub fn from_i8(val: i8) -> Option<Piece> {
        if val == 0 {
            return Some(Piece::Empty);
        }
        let player = if val > 0 { Player::Red } else { Player::Black };
        let kind = PieceKind::from_magnitude(val.unsigned_abs())?;
        Some(Piece::new(kind, player))
    }

    pub fn is_empty(self) -> bool {
        self == Piece::Empty
    }

    /// Get the player associated with a piece.
    /// Returns `None` if the piece is `Empty`.
    pub fn player(self) -> Option<Player> {
        if (self as i8) > 0 {
            Some(Player::Red)
        } else if (self as i8) < 0 {
            Some(Player::Black)
        } else {
            None
        }
    }

    pub fn kind(self) -> Option<PieceKind> {
        PieceKind::from_magnitude((self as i8).unsigned_abs())
    }

    pub fn belongs_to(self, player: Player) -> bool {
        self.player() == Some(player)
    }

    /// Same kind, opposite colour. `Empty` stays `Empty`.
    pub fn flipped(self) -> Piece {
        match (self.kind(), self.player()) {
            (Some(kind), Some(player)) => Piece::new(kind, player.opponent()),
            _ => Piece::Empty,
        }
    }

    pub fn to_char(self) -> char {
        let Some(kind) = self.kind() else {
            return '.';
        };
        let c = kind.to_char();
        if self.belongs_to(Player::Black) {
            c.to_ascii_lowercase()
        } else {
            c
        }
    }

    /// Parses a piece glyph; uppercase is Red, lowercase is Black.
    pub fn from_char(c: char) -> Option<Piece> {
        let kind = PieceKind::from_char(c.to_ascii_uppercase())?;
        let player = if c.is_ascii_uppercase() { Player::Red } else { Player::Black };
        Some(Piece::new(kind, player))
    }
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::General,
        PieceKind::Advisor,
        PieceKind::Elephant,
        PieceKind::Horse,
        PieceKind::Chariot,
        PieceKind::Cannon,
        PieceKind::Soldier,
    ];

    fn from_magnitude(val: u8) -> Option<PieceKind> {
        match val {
            1 => Some(PieceKind::General),
            2 => Some(PieceKind::Advisor),
            3 => Some(PieceKind::Elephant),
            4 => Some(PieceKind::Horse),
            5 => Some(PieceKind::Chariot),
            6 => Some(PieceKind::Cannon),
            7 => Some(PieceKind::Soldier),
            _ => None,
        }
    }

    /// How many pieces of this kind each side starts with.
    pub const fn count_per_side(self) -> usize {
        match self {
            PieceKind::General => 1,
            PieceKind::Soldier => 5,
            _ => 2,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            PieceKind::General => 'G',
            PieceKind::Advisor => 'A',
            PieceKind::Elephant => 'E',
            PieceKind::Horse => 'H',
            PieceKind::Chariot => 'R',
            PieceKind::Cannon => 'C',
            PieceKind::Soldier => 'S',
        }
    }

    fn from_char(c: char) -> Option<PieceKind> {
        match c {
            'G' => Some(PieceKind::General),
            'A' => Some(PieceKind::Advisor),
            'E' => Some(PieceKind::Elephant),
            'H' => Some(PieceKind::Horse),
            'R' => Some(PieceKind::Chariot),
            'C' => Some(PieceKind::Cannon),
            'S' => Some(PieceKind::Soldier),
            _ => None,
        }
    }
}

impl Player {
    /// Get the opponent of the current player.
    pub fn opponent(self) -> Player {
        match self {
            Player::Red => Player::Black,
            Player::Black => Player::Red,
        }
    }

    pub fn general(self) -> Piece {
        Piece::new(PieceKind::General, self)
    }
}

impl From<Player> for Winner {
    fn from(player: Player) -> Self {
        match player {
            Player::Red => Winner::Red,
            Player::Black => Winner::Black,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piece_values_follow_sign_convention() {
        assert_eq!(Piece::RChariot as i8, 5);
        assert_eq!(Piece::BSoldier as i8, -7);
        assert_eq!(Piece::from_i8(-4), Some(Piece::BHorse));
        assert_eq!(Piece::from_i8(8), None);
        assert_eq!(Piece::RCannon.flipped(), Piece::BCannon);
        assert_eq!(Piece::Empty.flipped(), Piece::Empty);
    }

    #[test]
    fn glyphs_round_trip() {
        for kind in PieceKind::ALL {
            for player in [Player::Red, Player::Black] {
                let piece = Piece::new(kind, player);
                assert_eq!(Piece::from_char(piece.to_char()), Some(piece));
            }
        }
        assert_eq!(Piece::from_char('x'), None);
        assert_eq!(Piece::Empty.to_char(), '.');
    }
}
