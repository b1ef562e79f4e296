//! The division value: a duration with an optional start offset

use crate::models::{Duration, DurationError, Offset, Rational};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Duration annotated with where it starts on the timeline
///
/// Divisions are never edited in place: splitting, fusing and offset
/// assignment all build new values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "DivisionRecord", from = "DivisionRecord")]
pub struct Division {
    duration: Duration,
    start_offset: Option<Offset>,
}

impl Division {
    pub fn new(numerator: i64, denominator: i64) -> Result<Self, DurationError> {
        Ok(Self::from_duration(Duration::new(numerator, denominator)?))
    }

    pub fn from_duration(duration: Duration) -> Self {
        Self {
            duration,
            start_offset: None,
        }
    }

    pub fn with_start_offset(self, start_offset: Offset) -> Self {
        Self {
            start_offset: Some(start_offset),
            ..self
        }
    }

    pub fn with_duration(self, duration: Duration) -> Self {
        Self { duration, ..self }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn start_offset(&self) -> Option<Offset> {
        self.start_offset
    }

    /// `None` when the start is unknown or the stop is not representable
    pub fn stop_offset(&self) -> Option<Offset> {
        self.start_offset
            .and_then(|start| self.duration.stop_from(start).ok())
    }

    /// Non-reduced (numerator, denominator)
    pub fn pair(&self) -> (i64, i64) {
        self.duration.pair()
    }

    pub fn value(&self) -> Rational {
        self.duration.value()
    }
}

impl From<Duration> for Division {
    fn from(duration: Duration) -> Self {
        Division::from_duration(duration)
    }
}

impl fmt::Display for Division {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.start_offset {
            Some(offset) => write!(f, "{} @ {}", self.duration, offset),
            None => write!(f, "{}", self.duration),
        }
    }
}

/// Wire form: `{"duration": [n, d], "startOffset": [n, d] | null}`
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DivisionRecord {
    duration: Duration,
    #[serde(default)]
    start_offset: Option<Offset>,
}

impl From<Division> for DivisionRecord {
    fn from(division: Division) -> Self {
        Self {
            duration: division.duration,
            start_offset: division.start_offset,
        }
    }
}

impl From<DivisionRecord> for Division {
    fn from(record: DivisionRecord) -> Self {
        Self {
            duration: record.duration,
            start_offset: record.start_offset,
        }
    }
}
