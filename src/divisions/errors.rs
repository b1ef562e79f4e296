//! Error types for division pipelines
//!
//! All of these are raised when a pipeline is configured or called; none
//! are deferred, and no partial output is returned.

use crate::models::DurationError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DivisionError {
    /// Group size of zero or less passed to fuse/partition
    #[error("Invalid count: {0} (counts must be positive)")]
    InvalidCount(i64),

    /// Non-positive target, threshold, multiplier or input duration
    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    /// Empty ratio or ratio with a zero term
    #[error("Invalid ratio: {0}")]
    InvalidRatio(String),

    #[error(transparent)]
    Duration(#[from] DurationError),
}

pub type Result<T> = std::result::Result<T, DivisionError>;
