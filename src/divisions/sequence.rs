//! Division sequences: building, offset assignment and checks

use super::division::Division;
use super::nested::{leaves, Nested};
use crate::models::{Duration, DurationError, Offset};

/// Assign start offsets by a running sum over the leaves, keeping nesting
///
/// Offsets follow depth-first leaf order regardless of grouping. The first
/// offset is the first leaf's existing offset, or zero when it has none.
pub fn to_divisions(
    items: Vec<Nested<Division>>,
) -> Result<Vec<Nested<Division>>, DurationError> {
    let mut offset = leaves(&items)
        .first()
        .and_then(|division| division.start_offset())
        .unwrap_or_else(|| Offset::from_integer(0));
    assign_offsets(items, &mut offset)
}

fn assign_offsets(
    items: Vec<Nested<Division>>,
    offset: &mut Offset,
) -> Result<Vec<Nested<Division>>, DurationError> {
    items
        .into_iter()
        .map(|item| match item {
            Nested::Item(division) => {
                let placed = division.with_start_offset(*offset);
                *offset = division.duration().stop_from(*offset)?;
                Ok(Nested::Item(placed))
            }
            Nested::Group(children) => assign_offsets(children, offset).map(Nested::Group),
        })
        .collect()
}

/// Nested duration pairs as divisions without offsets
pub fn from_pairs(
    items: Vec<Nested<(i64, i64)>>,
) -> Result<Vec<Nested<Division>>, DurationError> {
    items
        .into_iter()
        .map(|item| item.try_map(&mut |(n, d)| Division::new(n, d)))
        .collect()
}

/// Flat sequence of divisions from pairs
pub fn from_flat_pairs(pairs: &[(i64, i64)]) -> Result<Vec<Nested<Division>>, DurationError> {
    pairs
        .iter()
        .map(|&(n, d)| Division::new(n, d).map(Nested::Item))
        .collect()
}

/// Sum of every leaf duration
pub fn total_duration(items: &[Nested<Division>]) -> Result<Duration, DurationError> {
    Duration::checked_sum(leaves(items).into_iter().map(Division::duration))
}

/// True when every leaf has an offset and each starts where the previous
/// one stops
pub fn is_contiguous(items: &[Nested<Division>]) -> bool {
    let all = leaves(items);
    if all.iter().any(|division| division.start_offset().is_none()) {
        return false;
    }
    all.windows(2)
        .all(|pair| pair[0].stop_offset() == pair[1].start_offset())
}
