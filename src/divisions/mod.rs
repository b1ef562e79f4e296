//! Division sequence engine
//!
//! A division is a duration with an optional start offset. Sequences of
//! divisions may be nested (`Nested::Group`), typically one group per
//! time signature. A `DivisionMaker` chains pure callbacks over such
//! sequences:
//!
//! - `SplitByDurations`: cut each division by a target pattern
//! - `FuseByCounts`: sum consecutive divisions into one
//! - `PartitionByCounts`: group consecutive divisions without summing
//! - `SplitByRoundedRatios`: cut each division proportionally
//! - `Flatten`: remove levels of grouping
//!
//! Calling a maker assigns offsets before and after the callbacks run, so
//! its output is always contiguous.

pub mod callback;
pub mod config;
pub mod counts;
pub mod division;
pub mod errors;
pub mod fuse;
pub mod maker;
pub mod nested;
pub mod partition;
pub mod ratios;
pub mod sequence;
pub mod split;

pub use callback::{DivisionCallback, Flatten};
pub use config::DivisionMakerConfig;
pub use counts::Count;
pub use division::Division;
pub use errors::{DivisionError, Result};
pub use fuse::FuseByCounts;
pub use maker::DivisionMaker;
pub use nested::{flatten, into_leaves, leaves, Depth, Nested};
pub use partition::PartitionByCounts;
pub use ratios::{partition_integer_by_ratio, SplitByRoundedRatios};
pub use sequence::{from_flat_pairs, from_pairs, is_contiguous, to_divisions, total_duration};
pub use split::SplitByDurations;
