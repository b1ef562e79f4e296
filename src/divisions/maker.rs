//! Persistent division pipelines

use super::callback::{DivisionCallback, Flatten};
use super::counts::Count;
use super::division::Division;
use super::errors::{DivisionError, Result};
use super::fuse::FuseByCounts;
use super::nested::{leaves, Depth, Nested};
use super::partition::PartitionByCounts;
use super::ratios::SplitByRoundedRatios;
use super::sequence::to_divisions;
use super::split::SplitByDurations;
use serde::Serialize;

/// Ordered list of callbacks applied to a division sequence
///
/// Builders never change the receiver: each returns a new maker holding a
/// copy of the list plus the new step, so a maker can be shared and branched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DivisionMaker {
    callbacks: Vec<DivisionCallback>,
}

impl DivisionMaker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn callbacks(&self) -> &[DivisionCallback] {
        &self.callbacks
    }

    /// New maker with `callback` appended, after validating it
    pub fn append_callback(&self, callback: impl Into<DivisionCallback>) -> Result<Self> {
        let callback = callback.into();
        callback.validate()?;
        let mut callbacks = self.callbacks.clone();
        callbacks.push(callback);
        Ok(Self { callbacks })
    }

    pub fn split_by_durations(&self, settings: SplitByDurations) -> Result<Self> {
        self.append_callback(settings)
    }

    pub fn fuse_by_counts(&self, counts: Vec<Count>, cyclic: bool) -> Result<Self> {
        self.append_callback(FuseByCounts::new(counts, cyclic))
    }

    pub fn partition_by_counts(&self, settings: PartitionByCounts) -> Result<Self> {
        self.append_callback(settings)
    }

    pub fn split_by_rounded_ratios(&self, ratios: Vec<Vec<u32>>) -> Result<Self> {
        self.append_callback(SplitByRoundedRatios::new(ratios))
    }

    pub fn flatten(&self, depth: Depth) -> Self {
        let mut callbacks = self.callbacks.clone();
        callbacks.push(DivisionCallback::Flatten(Flatten { depth }));
        Self { callbacks }
    }

    /// Normalize, run every callback in order, then normalize again
    ///
    /// Every input division must have a positive duration.
    pub fn call(&self, divisions: Vec<Nested<Division>>) -> Result<Vec<Nested<Division>>> {
        if divisions.is_empty() {
            return Ok(Vec::new());
        }
        if let Some(bad) = leaves(&divisions).into_iter().find(|d| !d.duration().is_positive()) {
            return Err(DivisionError::InvalidDuration(format!(
                "input division {} is not positive",
                bad.duration()
            )));
        }
        let mut current = to_divisions(divisions)?;
        for callback in &self.callbacks {
            log::debug!("applying {} to {} entries", callback.name(), current.len());
            current = callback.apply(current)?;
        }
        Ok(to_divisions(current)?)
    }
}
