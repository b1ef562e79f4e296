//! Crate-level error type
//!
//! Each engine keeps its own error enum; this wraps them for callers that
//! drive both, such as the JSON API.

use crate::divisions::DivisionError;
use crate::models::{DurationError, PitchError};
use crate::pitch_array::PitchArrayError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Pitch array error: {0}")]
    PitchArray(#[from] PitchArrayError),

    #[error("Division error: {0}")]
    Division(#[from] DivisionError),

    #[error("Duration error: {0}")]
    Duration(#[from] DurationError),

    #[error("Pitch error: {0}")]
    Pitch(#[from] PitchError),

    #[error("Invalid JSON: {0}")]
    Json(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
