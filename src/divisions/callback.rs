//! Pipeline steps

use super::division::Division;
use super::errors::Result;
use super::fuse::FuseByCounts;
use super::nested::{flatten, Depth, Nested};
use super::partition::PartitionByCounts;
use super::ratios::SplitByRoundedRatios;
use super::split::SplitByDurations;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Flatten {
    pub depth: Depth,
}

/// One transformation in a `DivisionMaker`
///
/// Configured from JSON as `{"kind": "split_by_durations", ...}` with the
/// variant's fields alongside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DivisionCallback {
    SplitByDurations(SplitByDurations),
    FuseByCounts(FuseByCounts),
    PartitionByCounts(PartitionByCounts),
    SplitByRoundedRatios(SplitByRoundedRatios),
    Flatten(Flatten),
}

impl DivisionCallback {
    pub fn name(&self) -> &'static str {
        match self {
            DivisionCallback::SplitByDurations(_) => "split_by_durations",
            DivisionCallback::FuseByCounts(_) => "fuse_by_counts",
            DivisionCallback::PartitionByCounts(_) => "partition_by_counts",
            DivisionCallback::SplitByRoundedRatios(_) => "split_by_rounded_ratios",
            DivisionCallback::Flatten(_) => "flatten",
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            DivisionCallback::SplitByDurations(settings) => settings.validate(),
            DivisionCallback::FuseByCounts(settings) => settings.validate(),
            DivisionCallback::PartitionByCounts(settings) => settings.validate(),
            DivisionCallback::SplitByRoundedRatios(settings) => settings.validate(),
            DivisionCallback::Flatten(_) => Ok(()),
        }
    }

    pub fn apply(&self, divisions: Vec<Nested<Division>>) -> Result<Vec<Nested<Division>>> {
        match self {
            DivisionCallback::SplitByDurations(settings) => settings.apply(divisions),
            DivisionCallback::FuseByCounts(settings) => settings.apply(divisions),
            DivisionCallback::PartitionByCounts(settings) => settings.apply(divisions),
            DivisionCallback::SplitByRoundedRatios(settings) => settings.apply(divisions),
            DivisionCallback::Flatten(settings) => Ok(flatten(divisions, settings.depth)),
        }
    }
}

impl From<SplitByDurations> for DivisionCallback {
    fn from(settings: SplitByDurations) -> Self {
        DivisionCallback::SplitByDurations(settings)
    }
}

impl From<FuseByCounts> for DivisionCallback {
    fn from(settings: FuseByCounts) -> Self {
        DivisionCallback::FuseByCounts(settings)
    }
}

impl From<PartitionByCounts> for DivisionCallback {
    fn from(settings: PartitionByCounts) -> Self {
        DivisionCallback::PartitionByCounts(settings)
    }
}

impl From<SplitByRoundedRatios> for DivisionCallback {
    fn from(settings: SplitByRoundedRatios) -> Self {
        DivisionCallback::SplitByRoundedRatios(settings)
    }
}

impl From<Flatten> for DivisionCallback {
    fn from(settings: Flatten) -> Self {
        DivisionCallback::Flatten(settings)
    }
}
