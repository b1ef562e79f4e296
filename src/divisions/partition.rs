//! Partition divisions into groups by counts, without summing

use super::counts::{group_by_counts, validate_counts, Count};
use super::division::Division;
use super::errors::Result;
use super::fuse::fuse;
use super::nested::{into_leaves, Nested};
use crate::models::{Duration, Side};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PartitionByCounts {
    /// Group sizes, always cycled
    pub counts: Vec<Count>,
    /// Collapse an input whose total is assignable into one division
    pub fuse_assignable_total_duration: bool,
    /// Merge the remainder into its neighbouring full group
    pub append_remainder: bool,
    /// `Right` groups from the start (remainder last), `Left` from the end
    /// (remainder first)
    pub remainder_direction: Side,
}

impl PartitionByCounts {
    pub fn new(counts: Vec<Count>) -> Self {
        Self {
            counts,
            ..Self::default()
        }
    }

    pub fn with_fuse_assignable_total_duration(self, fuse: bool) -> Self {
        Self {
            fuse_assignable_total_duration: fuse,
            ..self
        }
    }

    pub fn with_append_remainder(self, append_remainder: bool) -> Self {
        Self {
            append_remainder,
            ..self
        }
    }

    pub fn with_remainder_direction(self, remainder_direction: Side) -> Self {
        Self {
            remainder_direction,
            ..self
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_counts(&self.counts)
    }

    /// Partition the input
    ///
    /// Each top-level group is partitioned on its own and its parts wrapped
    /// in one output group. Each run of loose divisions between groups is
    /// partitioned on its own and its parts returned in place.
    pub fn apply(&self, divisions: Vec<Nested<Division>>) -> Result<Vec<Nested<Division>>> {
        self.validate()?;
        let mut output = Vec::new();
        let mut run = Vec::new();
        for item in divisions {
            match item {
                Nested::Item(division) => run.push(division),
                Nested::Group(children) => {
                    if !run.is_empty() {
                        output.extend(self.wrap(self.partition(std::mem::take(&mut run))?));
                    }
                    let parts = self.partition(into_leaves(children))?;
                    output.push(Nested::Group(self.wrap(parts)));
                }
            }
        }
        if !run.is_empty() {
            output.extend(self.wrap(self.partition(run)?));
        }
        Ok(output)
    }

    fn wrap(&self, parts: Vec<Vec<Division>>) -> Vec<Nested<Division>> {
        parts
            .into_iter()
            .map(|part| Nested::Group(part.into_iter().map(Nested::Item).collect()))
            .collect()
    }

    pub(crate) fn partition(&self, divisions: Vec<Division>) -> Result<Vec<Vec<Division>>> {
        if divisions.is_empty() {
            return Ok(Vec::new());
        }
        if self.fuse_assignable_total_duration {
            let total = Duration::checked_sum(divisions.iter().map(Division::duration))?;
            if total.is_assignable() {
                log::trace!("fusing assignable total {}", total);
                return Ok(fuse(divisions)?.into_iter().map(|d| vec![d]).collect());
            }
        }
        if self.counts.is_empty() {
            return Ok(vec![divisions]);
        }

        let mut parts = match self.remainder_direction {
            Side::Right => group_by_counts(divisions, &self.counts, true),
            Side::Left => {
                let mut reversed = divisions;
                reversed.reverse();
                let mut grouping = group_by_counts(reversed, &self.counts, true);
                for group in grouping.full.iter_mut() {
                    group.reverse();
                }
                grouping.full.reverse();
                grouping.leftover.reverse();
                grouping
            }
        };

        let remainder = std::mem::take(&mut parts.leftover);
        let mut groups = parts.full;
        if remainder.is_empty() {
            return Ok(groups);
        }
        match (self.remainder_direction, self.append_remainder, groups.is_empty()) {
            (Side::Right, true, false) => {
                if let Some(last) = groups.last_mut() {
                    last.extend(remainder);
                }
            }
            (Side::Left, true, false) => {
                let mut first = remainder;
                first.append(&mut groups[0]);
                groups[0] = first;
            }
            (Side::Right, _, _) => groups.push(remainder),
            (Side::Left, _, _) => groups.insert(0, remainder),
        }
        Ok(groups)
    }
}
