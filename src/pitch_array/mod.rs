//! Pitch arrays
//!
//! A pitch array is a grid of rows in which every row partitions the same
//! total width into cells of varying span, like a spreadsheet whose columns
//! can be merged independently in each row. Cells carry an ordered list of
//! pitches, which makes the grid a chart of harmonic content across voices.
//!
//! # Module Structure
//!
//! - `array`: the owning `PitchArray` (construction, queries, edits)
//! - `row` / `column`: borrowed views; columns are derived on demand
//! - `cell`: `PitchArrayCell` and its `CellId` handle
//! - `token`: `CellToken`, the accepted cell spellings
//! - `render`: bracketed text display

pub mod array;
pub mod cell;
pub mod column;
pub mod errors;
mod render;
pub mod row;
pub mod token;

pub use array::PitchArray;
pub use cell::{CellId, PitchArrayCell};
pub use column::PitchArrayColumn;
pub use errors::{PitchArrayError, Result};
pub use row::PitchArrayRow;
pub use token::CellToken;
