//! Split each division by a pattern of target durations

use super::division::Division;
use super::errors::{DivisionError, Result};
use super::nested::{into_leaves, Nested};
use crate::models::{Duration, Offset, Rational, Side};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitByDurations {
    /// Target piece durations, taken in order
    pub durations: Vec<Duration>,
    /// Repeat the target list once exhausted
    pub cyclic: bool,
    /// Where a partial leftover piece goes
    pub remainder: Side,
    /// Leftovers shorter than this fuse into the adjacent full piece
    pub remainder_fuse_threshold: Option<Duration>,
    /// Scales the targets when the input is a compound meter
    pub compound_meter_multiplier: Option<Rational>,
}

impl Default for SplitByDurations {
    fn default() -> Self {
        Self {
            durations: Vec::new(),
            cyclic: true,
            remainder: Side::Right,
            remainder_fuse_threshold: None,
            compound_meter_multiplier: None,
        }
    }
}

impl SplitByDurations {
    pub fn new(durations: Vec<Duration>) -> Self {
        Self {
            durations,
            ..Self::default()
        }
    }

    pub fn with_cyclic(self, cyclic: bool) -> Self {
        Self { cyclic, ..self }
    }

    pub fn with_remainder(self, remainder: Side) -> Self {
        Self { remainder, ..self }
    }

    pub fn with_remainder_fuse_threshold(self, threshold: Duration) -> Self {
        Self {
            remainder_fuse_threshold: Some(threshold),
            ..self
        }
    }

    pub fn with_compound_meter_multiplier(self, multiplier: Rational) -> Self {
        Self {
            compound_meter_multiplier: Some(multiplier),
            ..self
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(bad) = self.durations.iter().find(|d| !d.is_positive()) {
            return Err(DivisionError::InvalidDuration(format!(
                "target duration {} is not positive",
                bad
            )));
        }
        if let Some(threshold) = self.remainder_fuse_threshold {
            if !threshold.is_positive() {
                return Err(DivisionError::InvalidDuration(format!(
                    "remainder fuse threshold {} is not positive",
                    threshold
                )));
            }
        }
        if let Some(multiplier) = self.compound_meter_multiplier {
            if multiplier <= Rational::from_integer(0) {
                return Err(DivisionError::InvalidDuration(format!(
                    "compound meter multiplier {} is not positive",
                    multiplier
                )));
            }
        }
        Ok(())
    }

    /// Split every leaf; one group per input division
    pub fn apply(&self, divisions: Vec<Nested<Division>>) -> Result<Vec<Nested<Division>>> {
        self.validate()?;
        into_leaves(divisions)
            .into_iter()
            .map(|division| {
                self.split_one(division)
                    .map(|pieces| Nested::Group(pieces.into_iter().map(Nested::Item).collect()))
            })
            .collect()
    }

    pub(crate) fn split_one(&self, division: Division) -> Result<Vec<Division>> {
        let input = division.duration();
        if !input.is_positive() {
            return Err(DivisionError::InvalidDuration(format!(
                "cannot split {} (input must be positive)",
                input
            )));
        }
        if self.durations.is_empty() {
            return Ok(vec![division]);
        }

        let targets: Vec<Duration> = match self.compound_meter_multiplier {
            Some(multiplier) if input.is_compound_meter() => {
                self.durations
                    .iter()
                    .map(|d| d.scale(multiplier))
                    .collect::<std::result::Result<_, _>>()?
            }
            _ => self.durations.clone(),
        };

        let mut pieces = Vec::new();
        let mut remaining = input;
        let limit = if self.cyclic { usize::MAX } else { targets.len() };
        for target in targets.iter().cycle().take(limit) {
            if remaining.is_zero() || *target > remaining {
                break;
            }
            pieces.push(*target);
            remaining = remaining.checked_sub(target)?;
        }

        if !remaining.is_zero() {
            let leftover = remaining
                .with_denominator(input.denominator())
                .unwrap_or(remaining);
            let fuses = self
                .remainder_fuse_threshold
                .is_some_and(|threshold| leftover < threshold);
            match (self.remainder, fuses, pieces.is_empty()) {
                (_, _, true) => pieces.push(leftover),
                (Side::Right, true, false) => {
                    if let Some(last) = pieces.last_mut() {
                        *last = last.checked_add(&leftover)?;
                    }
                }
                (Side::Left, true, false) => pieces[0] = leftover.checked_add(&pieces[0])?,
                (Side::Right, false, false) => pieces.push(leftover),
                (Side::Left, false, false) => pieces.insert(0, leftover),
            }
        }

        log::trace!(
            "split {} into [{}]",
            input,
            pieces
                .iter()
                .map(Duration::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        );

        place_pieces(pieces, division.start_offset())
    }
}

/// Pieces laid end to end from `start`, or without offsets
pub(crate) fn place_pieces(pieces: Vec<Duration>, start: Option<Offset>) -> Result<Vec<Division>> {
    let mut cursor = start;
    pieces
        .into_iter()
        .map(|duration| {
            let division = Division::from_duration(duration);
            match cursor {
                Some(offset) => {
                    cursor = Some(duration.stop_from(offset)?);
                    Ok(division.with_start_offset(offset))
                }
                None => Ok(division),
            }
        })
        .collect()
}
