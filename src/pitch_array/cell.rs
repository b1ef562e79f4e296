//! Pitch array cells

use super::token::CellToken;
use crate::models::Pitch;
use serde::Serialize;

/// Handle to a cell in its owning `PitchArray`
///
/// Ids stay valid after a cell is withdrawn; the cell is then detached and
/// only its own data (width, pitches) can be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CellId(pub(crate) usize);

impl CellId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// One unit of a row, spanning `width` columns
#[derive(Debug, Clone, Serialize)]
pub struct PitchArrayCell {
    width: usize,
    pitches: Vec<Pitch>,
    /// Owning row; `None` once withdrawn
    #[serde(skip)]
    pub(crate) row: Option<usize>,
}

impl PitchArrayCell {
    pub(crate) fn new(width: usize, pitches: Vec<Pitch>, row: usize) -> Self {
        Self {
            width,
            pitches,
            row: Some(row),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn pitches(&self) -> &[Pitch] {
        &self.pitches
    }

    /// Number of pitches held
    pub fn weight(&self) -> usize {
        self.pitches.len()
    }

    pub fn is_detached(&self) -> bool {
        self.row.is_none()
    }

    pub fn token(&self) -> CellToken {
        CellToken::from_parts(self.width, self.pitches.clone())
    }

    /// Same width and the same pitches in the same order
    pub fn matches(&self, other: &PitchArrayCell) -> bool {
        self.width == other.width && self.pitches == other.pitches
    }

    /// Text shown between the brackets when rendering
    pub(crate) fn label(&self) -> String {
        self.pitches
            .iter()
            .map(Pitch::name)
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub(crate) fn push_pitch(&mut self, pitch: Pitch) {
        self.pitches.push(pitch);
    }

    pub(crate) fn set_pitches(&mut self, pitches: Vec<Pitch>) {
        self.pitches = pitches;
    }
}
