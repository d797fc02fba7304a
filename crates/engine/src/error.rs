//! Errors raised at the text boundary (board diagrams, square names, move strings).

/// Failure to parse a human-readable board, position or movement.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The board diagram ended before all rows were read.
    #[error("board text has {actual} rows, expected {expected}")]
    TooShort { expected: usize, actual: usize },

    /// A row did not start with its row digit.
    #[error("row {row} is labelled {found:?}")]
    BadRowLabel { row: usize, found: String },

    #[error("row {row} has {cells} cells, expected 9")]
    RowLength { row: usize, cells: usize },

    /// A cell held something that is neither a piece nor an empty marker.
    #[error("unknown glyph {glyph:?} at row {row}, column {col}")]
    UnknownGlyph { row: usize, col: usize, glyph: char },

    #[error("invalid position: {0:?}")]
    BadPosition(String),

    #[error("invalid movement: {0:?}")]
    BadMovement(String),
}
