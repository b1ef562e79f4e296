//! Derived column views
//!
//! A column is the list of cells, one per row, whose span covers a column
//! index. Wide cells show up in every column they cover.

use super::array::PitchArray;
use super::cell::{CellId, PitchArrayCell};
use crate::models::Pitch;

#[derive(Debug, Clone)]
pub struct PitchArrayColumn<'a> {
    array: &'a PitchArray,
    index: usize,
    cells: Vec<CellId>,
}

impl<'a> PitchArrayColumn<'a> {
    pub(crate) fn new(array: &'a PitchArray, index: usize, cells: Vec<CellId>) -> Self {
        Self {
            array,
            index,
            cells,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn cell_ids(&self) -> &[CellId] {
        &self.cells
    }

    pub fn cells(&self) -> impl Iterator<Item = &'a PitchArrayCell> + '_ {
        self.cells.iter().map(|&id| self.array.raw_cell(id))
    }

    /// Number of rows that reach this column
    pub fn depth(&self) -> usize {
        self.cells.len()
    }

    pub fn pitches(&self) -> Vec<Pitch> {
        self.cells()
            .flat_map(|cell| cell.pitches().iter().copied())
            .collect()
    }

    /// Number of pitches in the column
    pub fn weight(&self) -> usize {
        self.cells().map(PitchArrayCell::weight).sum()
    }

    /// Cells whose first grid index is this column
    pub fn start_cells(&self) -> Vec<CellId> {
        self.filter_by_edge(|indices| indices.first())
    }

    /// Cells whose last grid index is this column
    pub fn stop_cells(&self) -> Vec<CellId> {
        self.filter_by_edge(|indices| indices.last())
    }

    pub fn start_pitches(&self) -> Vec<Pitch> {
        self.start_cells()
            .into_iter()
            .flat_map(|id| self.array.raw_cell(id).pitches().to_vec())
            .collect()
    }

    /// A lower row holds a pitch above some pitch of the row over it
    pub fn has_voice_crossing(&self) -> bool {
        self.cells
            .windows(2)
            .any(|pair| {
                let upper = self.array.raw_cell(pair[0]).pitches();
                let lower = self.array.raw_cell(pair[1]).pitches();
                upper
                    .iter()
                    .any(|u| lower.iter().any(|l| u.number() < l.number()))
            })
    }

    fn filter_by_edge<F>(&self, edge: F) -> Vec<CellId>
    where
        F: Fn(&[usize]) -> Option<&usize>,
    {
        self.cells
            .iter()
            .copied()
            .filter(|&id| {
                self.array
                    .column_indices(id)
                    .map(|indices| edge(indices.as_slice()) == Some(&self.index))
                    .unwrap_or(false)
            })
            .collect()
    }
}
