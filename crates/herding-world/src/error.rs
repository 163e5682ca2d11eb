//! Error types for the `herding-world` crate.
//!
//! All fallible operations in this crate return [`WorldError`].

use herding_types::{CellKind, Position};

/// Errors that can occur during board operations.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// The board must have at least one row and one column, and fit in `i32`.
    #[error("invalid board dimensions {width}x{height}")]
    InvalidDimensions {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// A position outside the board was addressed.
    #[error("position ({0}) is outside the board")]
    OutOfBounds(Position),

    /// No empty cell is left to place an entity on.
    #[error("no empty cell left to place {kind}")]
    BoardFull {
        /// The kind that could not be placed.
        kind: CellKind,
    },

    /// A board layout contained a character that is not a cell symbol.
    #[error("unknown cell symbol {symbol:?} at row {row}, column {column}")]
    UnknownSymbol {
        /// The offending character.
        symbol: char,
        /// Zero-based row.
        row: usize,
        /// Zero-based column.
        column: usize,
    },

    /// A board layout had rows of different lengths.
    #[error("row {row} has {actual} cells, expected {expected}")]
    RaggedRows {
        /// Zero-based row.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of this row.
        actual: usize,
    },
}
