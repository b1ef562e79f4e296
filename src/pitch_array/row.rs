//! Borrowed view of one pitch array row

use super::array::PitchArray;
use super::cell::{CellId, PitchArrayCell};
use super::token::CellToken;
use crate::models::Pitch;

#[derive(Debug, Clone, Copy)]
pub struct PitchArrayRow<'a> {
    array: &'a PitchArray,
    index: usize,
}

impl<'a> PitchArrayRow<'a> {
    pub(crate) fn new(array: &'a PitchArray, index: usize) -> Self {
        Self { array, index }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn cell_ids(&self) -> &'a [CellId] {
        self.array.raw_row(self.index)
    }

    pub fn cells(&self) -> impl Iterator<Item = &'a PitchArrayCell> + 'a {
        let array = self.array;
        self.cell_ids().iter().map(move |&id| array.raw_cell(id))
    }

    pub fn len(&self) -> usize {
        self.cell_ids().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cell_ids().is_empty()
    }

    /// Sum of cell widths
    pub fn width(&self) -> usize {
        self.array.row_width(self.index)
    }

    pub fn cell_widths(&self) -> Vec<usize> {
        self.cells().map(PitchArrayCell::width).collect()
    }

    pub fn tokens(&self) -> Vec<CellToken> {
        self.cells().map(PitchArrayCell::token).collect()
    }

    /// All pitches in the row, left to right
    pub fn pitches(&self) -> Vec<Pitch> {
        self.cells()
            .flat_map(|cell| cell.pitches().iter().copied())
            .collect()
    }

    /// Width differs from the array's width (after a withdrawal)
    pub fn is_defective(&self) -> bool {
        self.width() != self.array.width()
    }

    /// Some cell covers `column` without starting on it
    pub fn has_spanning_cell_over_index(&self, column: usize) -> bool {
        let mut start = 0;
        for cell in self.cells() {
            let stop = start + cell.width();
            if column < stop {
                return start < column;
            }
            start = stop;
        }
        false
    }
}
