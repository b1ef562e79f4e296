//! The pitch array: rows of variable-width cells over a shared column grid
//!
//! Cells live in one arena owned by the array and are addressed by
//! `CellId`. Rows are ordered lists of ids; a cell records the index of the
//! row that holds it, so parent lookups are index lookups. Columns are never
//! stored: they are derived from the rows on every request.

use super::cell::{CellId, PitchArrayCell};
use super::column::PitchArrayColumn;
use super::errors::{PitchArrayError, Result};
use super::row::PitchArrayRow;
use super::token::CellToken;
use crate::models::Pitch;

#[derive(Debug, Clone, Default)]
pub struct PitchArray {
    cells: Vec<PitchArrayCell>,
    rows: Vec<Vec<CellId>>,
}

impl PitchArray {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from rows of tokens; every row must tile the same width
    pub fn from_rows(rows: Vec<Vec<CellToken>>) -> Result<Self> {
        let widths: Vec<usize> = rows
            .iter()
            .map(|row| row.iter().map(CellToken::width).sum())
            .collect();
        if let Some(&expected) = widths.first() {
            if let Some((index, width)) = widths.iter().enumerate().find(|&(_, &w)| w != expected) {
                return Err(PitchArrayError::ShapeMismatch(format!(
                    "row {} has width {}, expected {}",
                    index, width, expected
                )));
            }
        }

        let mut array = Self::new();
        for row in rows {
            array.push_row(row)?;
        }
        log::debug!(
            "Built pitch array: depth={}, width={}",
            array.depth(),
            array.width()
        );
        Ok(array)
    }

    /// Build from columns of tokens (one token per row in each column)
    pub fn from_columns(columns: Vec<Vec<CellToken>>) -> Result<Self> {
        let depth = columns.first().map(Vec::len).unwrap_or(0);
        if let Some((index, column)) = columns.iter().enumerate().find(|(_, c)| c.len() != depth) {
            return Err(PitchArrayError::ShapeMismatch(format!(
                "column {} has {} cells, expected {}",
                index,
                column.len(),
                depth
            )));
        }

        let mut rows: Vec<Vec<CellToken>> = vec![Vec::with_capacity(columns.len()); depth];
        for column in columns {
            for (row, token) in rows.iter_mut().zip(column) {
                row.push(token);
            }
        }
        Self::from_rows(rows)
    }

    /// `depth` rows of `width` empty unit cells
    pub fn from_counts(depth: usize, width: usize) -> Self {
        let mut array = Self::new();
        for _ in 0..depth {
            array.push_empty_row(width);
        }
        array
    }

    // ------------------------------------------------------------------
    // Shape
    // ------------------------------------------------------------------

    /// Number of rows
    pub fn depth(&self) -> usize {
        self.rows.len()
    }

    /// Widest row width (all rows agree unless a cell was withdrawn)
    pub fn width(&self) -> usize {
        (0..self.rows.len())
            .map(|i| self.row_width(i))
            .max()
            .unwrap_or(0)
    }

    /// (depth, width)
    pub fn dimensions(&self) -> (usize, usize) {
        (self.depth(), self.width())
    }

    /// Number of attached cells
    pub fn size(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Number of pitches across all attached cells
    pub fn weight(&self) -> usize {
        self.attached_cells().map(PitchArrayCell::weight).sum()
    }

    pub fn is_rectangular(&self) -> bool {
        let width = self.width();
        (0..self.rows.len()).all(|i| self.row_width(i) == width)
    }

    // ------------------------------------------------------------------
    // Rows and columns
    // ------------------------------------------------------------------

    pub fn row(&self, index: usize) -> Result<PitchArrayRow<'_>> {
        self.check_row(index)?;
        Ok(PitchArrayRow::new(self, index))
    }

    pub fn rows(&self) -> impl Iterator<Item = PitchArrayRow<'_>> + '_ {
        (0..self.rows.len()).map(move |i| PitchArrayRow::new(self, i))
    }

    /// Cells covering column `index`, one per row, derived fresh each call
    pub fn column(&self, index: usize) -> Result<PitchArrayColumn<'_>> {
        let width = self.width();
        if index >= width {
            return Err(PitchArrayError::IndexOutOfRange {
                context: "Column",
                index,
                len: width,
            });
        }
        let cells = (0..self.rows.len())
            .filter_map(|row| self.cell_covering(row, index))
            .collect();
        Ok(PitchArrayColumn::new(self, index, cells))
    }

    pub fn columns(&self) -> Vec<PitchArrayColumn<'_>> {
        (0..self.width())
            .filter_map(|i| self.column(i).ok())
            .collect()
    }

    pub fn cell_widths_by_row(&self) -> Vec<Vec<usize>> {
        self.rows().map(|row| row.cell_widths()).collect()
    }

    pub fn cell_tokens_by_row(&self) -> Vec<Vec<CellToken>> {
        self.rows().map(|row| row.tokens()).collect()
    }

    pub fn pitches_by_row(&self) -> Vec<Vec<Pitch>> {
        self.rows().map(|row| row.pitches()).collect()
    }

    /// True when some cell spans `index` without starting on it
    pub fn has_spanning_cell_over_index(&self, index: usize) -> bool {
        self.rows()
            .any(|row| row.has_spanning_cell_over_index(index))
    }

    pub fn has_voice_crossing(&self) -> bool {
        self.columns().iter().any(PitchArrayColumn::has_voice_crossing)
    }

    /// Number of columns holding a voice crossing
    pub fn voice_crossing_count(&self) -> usize {
        self.columns()
            .iter()
            .filter(|c| c.has_voice_crossing())
            .count()
    }

    // ------------------------------------------------------------------
    // Cells
    // ------------------------------------------------------------------

    pub fn cell(&self, id: CellId) -> Result<&PitchArrayCell> {
        self.cells.get(id.0).ok_or(PitchArrayError::IndexOutOfRange {
            context: "Cell",
            index: id.0,
            len: self.cells.len(),
        })
    }

    /// Cell of `row` covering `column`
    pub fn cell_at(&self, row: usize, column: usize) -> Result<CellId> {
        self.check_row(row)?;
        self.cell_covering(row, column)
            .ok_or(PitchArrayError::IndexOutOfRange {
                context: "Column",
                index: column,
                len: self.row_width(row),
            })
    }

    /// Row index of an attached cell
    pub fn row_index(&self, id: CellId) -> Result<usize> {
        self.locate(id).map(|(row, _)| row)
    }

    /// Position of an attached cell within its row
    pub fn index_in_row(&self, id: CellId) -> Result<usize> {
        self.locate(id).map(|(_, index)| index)
    }

    /// Grid columns occupied by a cell
    pub fn column_indices(&self, id: CellId) -> Result<Vec<usize>> {
        let (row, index) = self.locate(id)?;
        let start = self.start_column(row, index);
        Ok((start..start + self.cells[id.0].width()).collect())
    }

    pub fn is_first_in_row(&self, id: CellId) -> Result<bool> {
        let (row, index) = self.locate(id)?;
        Ok(self.start_column(row, index) == 0)
    }

    pub fn is_last_in_row(&self, id: CellId) -> Result<bool> {
        let (row, index) = self.locate(id)?;
        let stop = self.start_column(row, index) + self.cells[id.0].width();
        Ok(stop == self.width())
    }

    pub fn next(&self, id: CellId) -> Result<CellId> {
        let (row, index) = self.locate(id)?;
        self.rows[row]
            .get(index + 1)
            .copied()
            .ok_or(PitchArrayError::Boundary {
                cell: id.0,
                row,
                direction: "next",
            })
    }

    pub fn previous(&self, id: CellId) -> Result<CellId> {
        let (row, index) = self.locate(id)?;
        index
            .checked_sub(1)
            .map(|i| self.rows[row][i])
            .ok_or(PitchArrayError::Boundary {
                cell: id.0,
                row,
                direction: "previous",
            })
    }

    pub fn parent_row(&self, id: CellId) -> Result<PitchArrayRow<'_>> {
        let (row, _) = self.locate(id)?;
        Ok(PitchArrayRow::new(self, row))
    }

    /// Column of the first grid index the cell occupies
    pub fn parent_column(&self, id: CellId) -> Result<PitchArrayColumn<'_>> {
        let (row, index) = self.locate(id)?;
        self.column(self.start_column(row, index))
    }

    pub fn cell_token(&self, id: CellId) -> Result<CellToken> {
        self.cell(id).map(PitchArrayCell::token)
    }

    /// Compare two cells by width and ordered pitches
    pub fn matches(&self, a: CellId, b: CellId) -> Result<bool> {
        Ok(self.cell(a)?.matches(self.cell(b)?))
    }

    // ------------------------------------------------------------------
    // Edits
    // ------------------------------------------------------------------

    pub fn append_pitch(&mut self, id: CellId, pitch: Pitch) -> Result<()> {
        self.cell(id)?;
        self.cells[id.0].push_pitch(pitch);
        Ok(())
    }

    /// Remove a cell from its row; the row becomes defective
    pub fn withdraw(&mut self, id: CellId) -> Result<()> {
        let (row, index) = self.locate(id)?;
        self.rows[row].remove(index);
        self.cells[id.0].row = None;
        log::debug!("Withdrew cell {} from row {}", id.0, row);
        Ok(())
    }

    /// Append a row; it must match the current width unless the array is empty
    pub fn append_row(&mut self, tokens: Vec<CellToken>) -> Result<usize> {
        let width: usize = tokens.iter().map(CellToken::width).sum();
        if !self.rows.is_empty() && width != self.width() {
            return Err(PitchArrayError::ShapeMismatch(format!(
                "row has width {}, expected {}",
                width,
                self.width()
            )));
        }
        self.push_row(tokens)
    }

    /// Append one token to the end of every row
    pub fn append_column(&mut self, tokens: Vec<CellToken>) -> Result<()> {
        if tokens.len() != self.rows.len() {
            return Err(PitchArrayError::ShapeMismatch(format!(
                "column has {} cells, expected {}",
                tokens.len(),
                self.rows.len()
            )));
        }
        let widths = tokens.iter().map(CellToken::width).collect::<Vec<_>>();
        if widths.windows(2).any(|w| w[0] != w[1]) {
            return Err(PitchArrayError::ShapeMismatch(format!(
                "column cells have differing widths {:?}",
                widths
            )));
        }
        let parts = tokens
            .into_iter()
            .map(CellToken::into_parts)
            .collect::<Result<Vec<_>>>()?;
        for (row, (width, pitches)) in parts.into_iter().enumerate() {
            let id = self.alloc(width, pitches, row);
            self.rows[row].push(id);
        }
        Ok(())
    }

    /// Remove the last row, returning its (now detached) cells
    pub fn pop_row(&mut self) -> Option<Vec<CellId>> {
        let last = self.rows.len().checked_sub(1)?;
        self.remove_row(last).ok()
    }

    /// Remove a row, returning its (now detached) cells
    pub fn remove_row(&mut self, index: usize) -> Result<Vec<CellId>> {
        self.check_row(index)?;
        let removed = self.rows.remove(index);
        for id in &removed {
            self.cells[id.0].row = None;
        }
        for cell in self.cells.iter_mut() {
            if let Some(row) = cell.row.as_mut() {
                if *row > index {
                    *row -= 1;
                }
            }
        }
        Ok(removed)
    }

    /// Fill every row with empty unit cells up to `width`
    pub fn pad_to_width(&mut self, width: usize) {
        for row in 0..self.rows.len() {
            let missing = width.saturating_sub(self.row_width(row));
            for _ in 0..missing {
                let id = self.alloc(1, Vec::new(), row);
                self.rows[row].push(id);
            }
        }
    }

    /// Append empty rows until the array has `depth` rows
    pub fn pad_to_depth(&mut self, depth: usize) {
        let width = self.width();
        while self.rows.len() < depth {
            self.push_empty_row(width);
        }
    }

    /// Give each pitched cell of each row one pitch from that row's list
    ///
    /// Cells without pitches are left alone. A row's list must hold exactly
    /// one pitch per pitched cell.
    pub fn apply_pitches_by_row(&mut self, pitch_lists: Vec<Vec<Pitch>>) -> Result<()> {
        if pitch_lists.len() != self.rows.len() {
            return Err(PitchArrayError::ShapeMismatch(format!(
                "{} pitch lists for {} rows",
                pitch_lists.len(),
                self.rows.len()
            )));
        }
        let mut assignments = Vec::new();
        for (row, pitches) in pitch_lists.into_iter().enumerate() {
            let pitched: Vec<CellId> = self.rows[row]
                .iter()
                .copied()
                .filter(|id| self.cells[id.0].weight() > 0)
                .collect();
            if pitched.len() != pitches.len() {
                return Err(PitchArrayError::ShapeMismatch(format!(
                    "row {} has {} pitched cells but {} pitches",
                    row,
                    pitched.len(),
                    pitches.len()
                )));
            }
            assignments.extend(pitched.into_iter().zip(pitches));
        }
        for (id, pitch) in assignments {
            self.cells[id.0].set_pitches(vec![pitch]);
        }
        Ok(())
    }

    /// Collapse adjacent cells of one row into a single cell
    ///
    /// The merged cell's width is the sum of widths and its pitches are the
    /// concatenated pitches, left to right. Returns the new cell.
    pub fn merge(&mut self, ids: &[CellId]) -> Result<CellId> {
        let mut located = ids
            .iter()
            .map(|&id| self.locate(id).map(|(row, index)| (row, index, id)))
            .collect::<Result<Vec<_>>>()?;
        located.sort_unstable_by_key(|&(_, index, _)| index);
        let Some(&(row, first, _)) = located.first() else {
            return Err(PitchArrayError::ShapeMismatch("no cells to merge".to_string()));
        };
        if located.len() == 1 {
            return Ok(located[0].2);
        }
        let contiguous = located
            .iter()
            .enumerate()
            .all(|(k, &(r, index, _))| r == row && index == first + k);
        if !contiguous {
            return Err(PitchArrayError::ShapeMismatch(
                "merged cells must be adjacent cells of one row".to_string(),
            ));
        }

        let count = located.len();
        let width: usize = located.iter().map(|&(_, _, id)| self.cells[id.0].width()).sum();
        let pitches: Vec<Pitch> = located
            .iter()
            .flat_map(|&(_, _, id)| self.cells[id.0].pitches().to_vec())
            .collect();
        for &(_, _, id) in &located {
            self.cells[id.0].row = None;
        }
        let merged = self.alloc(width, pitches, row);
        let cells = &mut self.rows[row];
        cells.drain(first..first + count);
        cells.insert(first, merged);
        log::debug!("Merged {} cells of row {} into cell {}", count, row, merged.0);
        Ok(merged)
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    pub(crate) fn raw_row(&self, index: usize) -> &[CellId] {
        &self.rows[index]
    }

    pub(crate) fn raw_cell(&self, id: CellId) -> &PitchArrayCell {
        &self.cells[id.0]
    }

    pub(crate) fn row_width(&self, row: usize) -> usize {
        self.rows[row]
            .iter()
            .map(|id| self.cells[id.0].width())
            .sum()
    }

    /// First grid column of the cell at `index` in `row`
    pub(crate) fn start_column(&self, row: usize, index: usize) -> usize {
        self.rows[row][..index]
            .iter()
            .map(|id| self.cells[id.0].width())
            .sum()
    }

    fn cell_covering(&self, row: usize, column: usize) -> Option<CellId> {
        let mut start = 0;
        for &id in &self.rows[row] {
            let stop = start + self.cells[id.0].width();
            if column < stop {
                return Some(id);
            }
            start = stop;
        }
        None
    }

    fn attached_cells(&self) -> impl Iterator<Item = &PitchArrayCell> + '_ {
        self.rows.iter().flatten().map(move |id| &self.cells[id.0])
    }

    fn check_row(&self, index: usize) -> Result<()> {
        if index >= self.rows.len() {
            return Err(PitchArrayError::IndexOutOfRange {
                context: "Row",
                index,
                len: self.rows.len(),
            });
        }
        Ok(())
    }

    /// (row, index in row) of an attached cell
    fn locate(&self, id: CellId) -> Result<(usize, usize)> {
        let row = self.cell(id)?.row.ok_or(PitchArrayError::DetachedCell(id.0))?;
        let index = self.rows[row]
            .iter()
            .position(|&other| other == id)
            .ok_or(PitchArrayError::DetachedCell(id.0))?;
        Ok((row, index))
    }

    fn alloc(&mut self, width: usize, pitches: Vec<Pitch>, row: usize) -> CellId {
        let id = CellId(self.cells.len());
        self.cells.push(PitchArrayCell::new(width, pitches, row));
        id
    }

    fn push_row(&mut self, tokens: Vec<CellToken>) -> Result<usize> {
        let parts = tokens
            .into_iter()
            .map(CellToken::into_parts)
            .collect::<Result<Vec<_>>>()?;
        let row = self.rows.len();
        let ids: Vec<CellId> = parts
            .into_iter()
            .map(|(width, pitches)| self.alloc(width, pitches, row))
            .collect();
        self.rows.push(ids);
        Ok(row)
    }

    fn push_empty_row(&mut self, width: usize) {
        let row = self.rows.len();
        let ids: Vec<CellId> = (0..width).map(|_| self.alloc(1, Vec::new(), row)).collect();
        self.rows.push(ids);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widths(rows: &[&[usize]]) -> Vec<Vec<CellToken>> {
        rows.iter()
            .map(|row| row.iter().map(|&w| CellToken::Width(w)).collect())
            .collect()
    }

    fn p(name: &str) -> Pitch {
        name.parse().unwrap()
    }

    #[test]
    fn test_from_rows_shape() {
        let array = PitchArray::from_rows(widths(&[&[1, 2, 1], &[2, 1, 1]])).unwrap();
        assert_eq!(array.dimensions(), (2, 4));
        assert_eq!(array.size(), 6);
        assert!(array.is_rectangular());
    }

    #[test]
    fn test_from_rows_mismatch() {
        let err = PitchArray::from_rows(widths(&[&[1, 2], &[1, 1]])).unwrap_err();
        assert!(matches!(err, PitchArrayError::ShapeMismatch(_)));
    }

    #[test]
    fn test_from_rows_rejects_zero_width_token() {
        let err = PitchArray::from_rows(widths(&[&[0]])).unwrap_err();
        assert!(matches!(err, PitchArrayError::InvalidCellToken(_)));
    }

    #[test]
    fn test_empty_array() {
        let array = PitchArray::from_rows(vec![]).unwrap();
        assert_eq!(array.dimensions(), (0, 0));
        assert!(array.columns().is_empty());
    }

    #[test]
    fn test_from_columns_transposes() {
        let array = PitchArray::from_columns(vec![
            vec![CellToken::Pitch(p("c'")), CellToken::Empty],
            vec![CellToken::Empty, CellToken::Pitch(p("g"))],
        ])
        .unwrap();
        assert_eq!(array.dimensions(), (2, 2));
        assert_eq!(array.pitches_by_row(), vec![vec![p("c'")], vec![p("g")]]);
        let id = array.cell_at(1, 1).unwrap();
        assert_eq!(array.cell(id).unwrap().pitches(), &[p("g")]);
    }

    #[test]
    fn test_from_columns_length_mismatch() {
        let err = PitchArray::from_columns(vec![
            vec![CellToken::Empty, CellToken::Empty],
            vec![CellToken::Empty],
        ])
        .unwrap_err();
        assert!(matches!(err, PitchArrayError::ShapeMismatch(_)));
    }

    #[test]
    fn test_column_indices_and_boundaries() {
        let array = PitchArray::from_rows(widths(&[&[1, 2, 1], &[2, 1, 1]])).unwrap();
        let row = array.row(0).unwrap();
        let ids = row.cell_ids().to_vec();
        assert_eq!(array.cell(ids[1]).unwrap().width(), 2);
        assert_eq!(array.column_indices(ids[1]).unwrap(), vec![1, 2]);
        assert!(array.is_first_in_row(ids[0]).unwrap());
        assert!(!array.is_first_in_row(ids[1]).unwrap());
        assert!(array.is_last_in_row(ids[2]).unwrap());
        assert_eq!(array.next(ids[0]).unwrap(), ids[1]);
        assert_eq!(array.previous(ids[2]).unwrap(), ids[1]);
        assert!(matches!(
            array.next(ids[2]),
            Err(PitchArrayError::Boundary { .. })
        ));
        assert!(matches!(
            array.previous(ids[0]),
            Err(PitchArrayError::Boundary { .. })
        ));
    }

    #[test]
    fn test_column_repeats_spanning_cell() {
        let array = PitchArray::from_rows(widths(&[&[1, 2, 1], &[2, 1, 1]])).unwrap();
        let one = array.column(1).unwrap();
        let two = array.column(2).unwrap();
        assert_eq!(one.cell_ids()[0], two.cell_ids()[0]);
        assert_ne!(one.cell_ids()[1], two.cell_ids()[1]);
        assert!(array.column(4).is_err());
    }

    #[test]
    fn test_row_out_of_range() {
        let array = PitchArray::from_counts(2, 3);
        assert!(matches!(
            array.row(2),
            Err(PitchArrayError::IndexOutOfRange { index: 2, len: 2, .. })
        ));
    }

    #[test]
    fn test_withdraw_detaches() {
        let mut array = PitchArray::from_counts(1, 3);
        let id = array.row(0).unwrap().cell_ids()[1];
        array.withdraw(id).unwrap();
        assert_eq!(array.row(0).unwrap().cell_ids().len(), 2);
        assert!(array.cell(id).unwrap().is_detached());
        assert_eq!(array.next(id), Err(PitchArrayError::DetachedCell(id.index())));
        assert_eq!(array.withdraw(id), Err(PitchArrayError::DetachedCell(id.index())));
        assert!(array.parent_row(id).is_err());
    }

    #[test]
    fn test_withdraw_makes_row_defective() {
        let mut array = PitchArray::from_counts(2, 2);
        let id = array.row(1).unwrap().cell_ids()[0];
        array.withdraw(id).unwrap();
        assert!(!array.is_rectangular());
        assert!(array.row(1).unwrap().is_defective());
        assert!(!array.row(0).unwrap().is_defective());
    }

    #[test]
    fn test_columns_recomputed_after_edit() {
        let mut array = PitchArray::from_counts(2, 2);
        assert_eq!(array.column(1).unwrap().cell_ids().len(), 2);
        let id = array.row(1).unwrap().cell_ids()[1];
        array.withdraw(id).unwrap();
        assert_eq!(array.column(1).unwrap().cell_ids().len(), 1);
    }

    #[test]
    fn test_append_pitch_preserves_order_and_width() {
        let mut array = PitchArray::from_counts(1, 1);
        let id = array.row(0).unwrap().cell_ids()[0];
        array.append_pitch(id, p("e'")).unwrap();
        array.append_pitch(id, p("c'")).unwrap();
        let cell = array.cell(id).unwrap();
        assert_eq!(cell.pitches(), &[p("e'"), p("c'")]);
        assert_eq!(cell.width(), 1);
        assert_eq!(array.weight(), 2);
    }

    #[test]
    fn test_append_row_and_column() {
        let mut array = PitchArray::from_counts(1, 2);
        assert!(array.append_row(vec![CellToken::Width(3)]).is_err());
        array.append_row(vec![CellToken::Width(2)]).unwrap();
        array
            .append_column(vec![CellToken::Empty, CellToken::Pitch(p("d'"))])
            .unwrap();
        assert_eq!(array.dimensions(), (2, 3));
        assert_eq!(array.cell_widths_by_row(), vec![vec![1, 1, 1], vec![2, 1]]);
        assert!(array.append_column(vec![CellToken::Empty]).is_err());
    }

    #[test]
    fn test_remove_row_updates_parents() {
        let mut array = PitchArray::from_counts(3, 1);
        let last = array.row(2).unwrap().cell_ids()[0];
        let removed = array.remove_row(0).unwrap();
        assert!(array.cell(removed[0]).unwrap().is_detached());
        assert_eq!(array.row_index(last).unwrap(), 1);
        assert_eq!(array.pop_row().map(|ids| ids.len()), Some(1));
        assert_eq!(array.depth(), 1);
    }

    #[test]
    fn test_pad() {
        let mut array = PitchArray::from_counts(1, 2);
        array.pad_to_width(4);
        array.pad_to_depth(3);
        assert_eq!(array.dimensions(), (3, 4));
        assert!(array.is_rectangular());
    }

    #[test]
    fn test_merge() {
        let mut array = PitchArray::from_rows(vec![vec![
            CellToken::Pitch(p("c'")),
            CellToken::Pitch(p("d'")),
            CellToken::Empty,
        ]])
        .unwrap();
        let ids = array.row(0).unwrap().cell_ids().to_vec();
        let merged = array.merge(&[ids[1], ids[0]]).unwrap();
        let cell = array.cell(merged).unwrap();
        assert_eq!(cell.width(), 2);
        assert_eq!(cell.pitches(), &[p("c'"), p("d'")]);
        assert_eq!(array.cell_widths_by_row(), vec![vec![2, 1]]);
        assert!(array.cell(ids[0]).unwrap().is_detached());
    }

    #[test]
    fn test_merge_requires_adjacent_cells() {
        let mut array = PitchArray::from_counts(2, 3);
        let top = array.row(0).unwrap().cell_ids().to_vec();
        let bottom = array.row(1).unwrap().cell_ids().to_vec();
        assert!(array.merge(&[top[0], top[2]]).is_err());
        assert!(array.merge(&[top[0], bottom[1]]).is_err());
        assert_eq!(array.size(), 6);
    }

    #[test]
    fn test_apply_pitches_by_row() {
        let mut array = PitchArray::from_rows(vec![
            vec![CellToken::Pitch(p("c'")), CellToken::Empty],
            vec![CellToken::Pitch(p("c")), CellToken::Pitch(p("d"))],
        ])
        .unwrap();
        array
            .apply_pitches_by_row(vec![vec![p("g'")], vec![p("e"), p("f")]])
            .unwrap();
        assert_eq!(
            array.pitches_by_row(),
            vec![vec![p("g'")], vec![p("e"), p("f")]]
        );
        assert!(array.apply_pitches_by_row(vec![vec![], vec![]]).is_err());
        assert_eq!(array.pitches_by_row()[0], vec![p("g'")]);
    }

    #[test]
    fn test_spanning_cell_over_index() {
        let array = PitchArray::from_rows(widths(&[&[1, 2, 1], &[1, 1, 1, 1]])).unwrap();
        assert!(!array.has_spanning_cell_over_index(1));
        assert!(array.has_spanning_cell_over_index(2));
    }

    #[test]
    fn test_matches_symmetric() {
        let array = PitchArray::from_rows(vec![
            vec![CellToken::Pitch(p("c'")), CellToken::Pitch(p("c'"))],
            vec![CellToken::Width(2)],
        ])
        .unwrap();
        let top = array.row(0).unwrap().cell_ids().to_vec();
        let wide = array.row(1).unwrap().cell_ids()[0];
        for &a in top.iter().chain([&wide]) {
            for &b in top.iter().chain([&wide]) {
                assert_eq!(array.matches(a, b).unwrap(), array.matches(b, a).unwrap());
            }
        }
        assert!(array.matches(top[0], top[1]).unwrap());
        assert!(!array.matches(top[0], wide).unwrap());
    }
}
