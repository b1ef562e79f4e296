//! Cell tokens: the accepted ways of spelling a cell
//!
//! ```text
//! null / ""            → Empty              (width 1, no pitches)
//! 2 / "2"              → Width(2)
//! "c'"                 → Pitch(c')
//! ["c'", "e'"]         → Pitches([c', e'])
//! [["c'", "e'"], 2]    → PitchesWithWidth([c', e'], 2)
//! ```

use super::errors::{PitchArrayError, Result};
use crate::models::Pitch;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub enum CellToken {
    Empty,
    Width(usize),
    Pitch(Pitch),
    Pitches(Vec<Pitch>),
    PitchesWithWidth(Vec<Pitch>, usize),
}

impl CellToken {
    /// Canonical token for a width and pitch list
    pub fn from_parts(width: usize, pitches: Vec<Pitch>) -> Self {
        match (width, pitches.len()) {
            (1, 0) => CellToken::Empty,
            (_, 0) => CellToken::Width(width),
            (1, 1) => CellToken::Pitch(pitches[0]),
            (1, _) => CellToken::Pitches(pitches),
            _ => CellToken::PitchesWithWidth(pitches, width),
        }
    }

    pub fn width(&self) -> usize {
        match self {
            CellToken::Empty | CellToken::Pitch(_) | CellToken::Pitches(_) => 1,
            CellToken::Width(width) | CellToken::PitchesWithWidth(_, width) => *width,
        }
    }

    pub fn pitches(&self) -> Vec<Pitch> {
        match self {
            CellToken::Empty | CellToken::Width(_) => Vec::new(),
            CellToken::Pitch(pitch) => vec![*pitch],
            CellToken::Pitches(pitches) | CellToken::PitchesWithWidth(pitches, _) => {
                pitches.clone()
            }
        }
    }

    /// Width and pitches, rejecting zero-width tokens
    pub(crate) fn into_parts(self) -> Result<(usize, Vec<Pitch>)> {
        let width = self.width();
        if width == 0 {
            return Err(PitchArrayError::InvalidCellToken(format!(
                "{} (width must be at least 1)",
                self
            )));
        }
        Ok((width, self.pitches()))
    }

    /// Parse a token from loosely-typed JSON
    pub fn from_json(value: &Value) -> Result<Self> {
        let invalid = || PitchArrayError::InvalidCellToken(value.to_string());
        match value {
            Value::Null => Ok(CellToken::Empty),
            Value::Number(n) => match n.as_u64() {
                Some(width) if width > 0 => Ok(CellToken::Width(width as usize)),
                _ => Err(invalid()),
            },
            Value::String(s) => s.parse(),
            Value::Array(items) if items.is_empty() => Ok(CellToken::Empty),
            Value::Array(items) => {
                if let [head, Value::Number(n)] = items.as_slice() {
                    let width = n
                        .as_u64()
                        .filter(|&w| w > 0)
                        .ok_or_else(invalid)? as usize;
                    let pitches = match head {
                        Value::String(_) => vec![pitch_from_json(head).ok_or_else(invalid)?],
                        Value::Array(names) => names
                            .iter()
                            .map(pitch_from_json)
                            .collect::<Option<Vec<_>>>()
                            .ok_or_else(invalid)?,
                        _ => return Err(invalid()),
                    };
                    return Ok(CellToken::PitchesWithWidth(pitches, width));
                }
                let pitches = items
                    .iter()
                    .map(pitch_from_json)
                    .collect::<Option<Vec<_>>>()
                    .ok_or_else(invalid)?;
                Ok(CellToken::Pitches(pitches))
            }
            _ => Err(invalid()),
        }
    }
}

fn pitch_from_json(value: &Value) -> Option<Pitch> {
    value.as_str().and_then(|name| name.parse().ok())
}

impl FromStr for CellToken {
    type Err = PitchArrayError;

    /// Compact text form: pitch names separated by spaces, optionally
    /// followed by an integer width
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || PitchArrayError::InvalidCellToken(format!("'{}'", s));
        let mut words: Vec<&str> = s.split_whitespace().collect();
        if words.is_empty() {
            return Ok(CellToken::Empty);
        }

        let width = match words.last().and_then(|w| w.parse::<usize>().ok()) {
            Some(0) => return Err(invalid()),
            Some(width) => {
                words.pop();
                Some(width)
            }
            None => None,
        };

        let pitches = words
            .iter()
            .map(|w| w.parse::<Pitch>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|_| invalid())?;

        Ok(match (pitches.len(), width) {
            (0, Some(width)) => CellToken::Width(width),
            (1, None) => CellToken::Pitch(pitches[0]),
            (_, None) => CellToken::Pitches(pitches),
            (_, Some(width)) => CellToken::PitchesWithWidth(pitches, width),
        })
    }
}

impl fmt::Display for CellToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = |pitches: &[Pitch]| {
            pitches
                .iter()
                .map(Pitch::name)
                .collect::<Vec<_>>()
                .join(" ")
        };
        match self {
            CellToken::Empty => Ok(()),
            CellToken::Width(width) => write!(f, "{}", width),
            CellToken::Pitch(pitch) => write!(f, "{}", pitch),
            CellToken::Pitches(pitches) => write!(f, "{}", names(pitches)),
            CellToken::PitchesWithWidth(pitches, width) => {
                write!(f, "{} {}", names(pitches), width)
            }
        }
    }
}

impl TryFrom<Value> for CellToken {
    type Error = PitchArrayError;

    fn try_from(value: Value) -> Result<Self> {
        CellToken::from_json(&value)
    }
}

impl From<CellToken> for Value {
    fn from(token: CellToken) -> Self {
        let names = |pitches: Vec<Pitch>| {
            Value::Array(pitches.into_iter().map(|p| Value::String(p.name())).collect())
        };
        match token {
            CellToken::Empty => Value::Null,
            CellToken::Width(width) => Value::from(width),
            CellToken::Pitch(pitch) => Value::String(pitch.name()),
            CellToken::Pitches(pitches) => names(pitches),
            CellToken::PitchesWithWidth(pitches, width) => {
                Value::Array(vec![names(pitches), Value::from(width)])
            }
        }
    }
}

impl From<usize> for CellToken {
    fn from(width: usize) -> Self {
        CellToken::Width(width)
    }
}

impl From<Pitch> for CellToken {
    fn from(pitch: Pitch) -> Self {
        CellToken::Pitch(pitch)
    }
}
