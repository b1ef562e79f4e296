//! Split each division proportionally by integer ratios

use super::division::Division;
use super::errors::{DivisionError, Result};
use super::nested::{into_leaves, Nested};
use super::split::place_pieces;
use crate::models::{Duration, DurationError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitByRoundedRatios {
    /// Ratios cycled over the input divisions, e.g. `[[2, 1], [1, 1, 1]]`
    pub ratios: Vec<Vec<u32>>,
}

impl SplitByRoundedRatios {
    pub fn new(ratios: Vec<Vec<u32>>) -> Self {
        Self { ratios }
    }

    pub fn validate(&self) -> Result<()> {
        for ratio in &self.ratios {
            if ratio.is_empty() || ratio.contains(&0) {
                return Err(DivisionError::InvalidRatio(format!("{:?}", ratio)));
            }
        }
        Ok(())
    }

    /// One group per input division; an empty ratio list keeps each whole
    pub fn apply(&self, divisions: Vec<Nested<Division>>) -> Result<Vec<Nested<Division>>> {
        self.validate()?;
        into_leaves(divisions)
            .into_iter()
            .enumerate()
            .map(|(i, division)| {
                let pieces = match self.ratios.get(i % self.ratios.len().max(1)) {
                    Some(ratio) => split_by_ratio(division, ratio)?,
                    None => vec![division],
                };
                Ok(Nested::Group(pieces.into_iter().map(Nested::Item).collect()))
            })
            .collect()
    }
}

fn split_by_ratio(division: Division, ratio: &[u32]) -> Result<Vec<Division>> {
    let input = division.duration();
    if !input.is_positive() {
        return Err(DivisionError::InvalidDuration(format!(
            "cannot split {} (input must be positive)",
            input
        )));
    }
    let (mut numerator, mut denominator) = input.pair();
    let mut shares = partition_integer_by_ratio(numerator, ratio);
    while shares.contains(&0) {
        let (Some(n), Some(d)) = (numerator.checked_mul(2), denominator.checked_mul(2)) else {
            return Err(DurationError::Overflow(format!(
                "refining {} for ratio {:?}",
                input, ratio
            ))
            .into());
        };
        numerator = n;
        denominator = d;
        shares = partition_integer_by_ratio(numerator, ratio);
    }
    if denominator != input.denominator() {
        log::warn!(
            "ratio {:?} does not fit {}; splitting over /{}",
            ratio,
            input,
            denominator
        );
    }
    let pieces = shares
        .into_iter()
        .map(|share| Duration::new(share, denominator))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    place_pieces(pieces, division.start_offset())
}

/// Integer parts of `n` proportional to `ratio`, summing exactly to `n`
///
/// Each cumulative share is rounded half up and parts are the differences,
/// so ties go to the earlier part.
pub fn partition_integer_by_ratio(n: i64, ratio: &[u32]) -> Vec<i64> {
    let total: i128 = ratio.iter().map(|&term| term as i128).sum();
    if total == 0 {
        return Vec::new();
    }
    let mut previous = 0i128;
    let mut cumulative = 0i128;
    ratio
        .iter()
        .map(|&term| {
            cumulative += term as i128;
            let rounded = (2 * n as i128 * cumulative + total).div_euclid(2 * total);
            let part = rounded - previous;
            previous = rounded;
            part as i64
        })
        .collect()
}
