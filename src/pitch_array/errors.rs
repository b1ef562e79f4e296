//! Error types for pitch arrays
//!
//! Every failure is local to the call that raised it; the array is left as
//! it was before the call.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PitchArrayError {
    /// Rows or columns that do not tile to the same shape
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    /// A cell description that matches no token shape
    #[error("Invalid cell token: {0}")]
    InvalidCellToken(String),

    #[error("{context} index {index} out of range (len {len})")]
    IndexOutOfRange {
        context: &'static str,
        index: usize,
        len: usize,
    },

    /// `next`/`previous` past the end of a row
    #[error("Cell {cell} has no {direction} neighbor in row {row}")]
    Boundary {
        cell: usize,
        row: usize,
        direction: &'static str,
    },

    /// Navigation from a cell that was withdrawn from its row
    #[error("Cell {0} has been withdrawn from its row")]
    DetachedCell(usize),
}

pub type Result<T> = std::result::Result<T, PitchArrayError>;
