//! Fuse consecutive divisions by counts

use super::counts::{group_by_counts, validate_counts, Count};
use super::division::Division;
use super::errors::Result;
use super::nested::{into_leaves, Nested};
use crate::models::Duration;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuseByCounts {
    pub counts: Vec<Count>,
    pub cyclic: bool,
}

impl Default for FuseByCounts {
    fn default() -> Self {
        Self {
            counts: Vec::new(),
            cyclic: true,
        }
    }
}

impl FuseByCounts {
    pub fn new(counts: Vec<Count>, cyclic: bool) -> Self {
        Self { counts, cyclic }
    }

    pub fn validate(&self) -> Result<()> {
        validate_counts(&self.counts)
    }

    /// Flat sequence of fused divisions
    ///
    /// After a non-cyclic count list runs out, the overhang fuses into one
    /// last division. With no counts the whole input fuses into one.
    pub fn apply(&self, divisions: Vec<Nested<Division>>) -> Result<Vec<Nested<Division>>> {
        self.validate()?;
        let flat = into_leaves(divisions);
        if flat.is_empty() {
            return Ok(Vec::new());
        }
        let groups = if self.counts.is_empty() {
            vec![flat]
        } else {
            let grouping = group_by_counts(flat, &self.counts, self.cyclic);
            let mut groups = grouping.full;
            if !grouping.leftover.is_empty() {
                groups.push(grouping.leftover);
            }
            groups
        };
        log::trace!("fusing {} groups", groups.len());
        groups
            .into_iter()
            .filter_map(|group| fuse(group).transpose())
            .map(|fused| fused.map(Nested::Item))
            .collect()
    }
}

/// Sum a group into one division at its first member's offset
pub(crate) fn fuse(group: Vec<Division>) -> Result<Option<Division>> {
    let first = match group.first() {
        Some(first) => *first,
        None => return Ok(None),
    };
    let total = Duration::checked_sum(group.iter().map(Division::duration))?;
    Ok(Some(first.with_duration(total)))
}
