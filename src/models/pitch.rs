//! Pitch representation
//!
//! Pitches are spelled (step + accidental + octave) and carry a signed
//! semitone number relative to middle C. Names use LilyPond's English
//! spelling: `c'` is middle C, `fs''` the F-sharp an octave and a fifth
//! above, `bf,` a B-flat below the bass staff.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Semitones above C for each diatonic step
const STEP_SEMITONES: [i32; 7] = [0, 2, 4, 5, 7, 9, 11];

const STEP_NAMES: [char; 7] = ['c', 'd', 'e', 'f', 'g', 'a', 'b'];

/// Octave of unmarked names (`c` is the C below middle C)
const BASE_OCTAVE: i8 = 3;

/// Octave that holds middle C
const MIDDLE_C_OCTAVE: i8 = 4;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PitchError {
    #[error("Invalid pitch name: '{0}'")]
    InvalidName(String),

    #[error("Pitch number {0} is outside the representable octave range")]
    NumberOutOfRange(i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Accidental {
    DoubleFlat,
    Flat,
    Natural,
    Sharp,
    DoubleSharp,
}

impl Accidental {
    /// Get the semitone offset for this accidental
    pub fn semitone_offset(&self) -> i32 {
        match self {
            Accidental::DoubleFlat => -2,
            Accidental::Flat => -1,
            Accidental::Natural => 0,
            Accidental::Sharp => 1,
            Accidental::DoubleSharp => 2,
        }
    }

    /// LilyPond English suffix
    pub fn suffix(&self) -> &'static str {
        match self {
            Accidental::DoubleFlat => "ff",
            Accidental::Flat => "f",
            Accidental::Natural => "",
            Accidental::Sharp => "s",
            Accidental::DoubleSharp => "ss",
        }
    }

    fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "ff" => Some(Accidental::DoubleFlat),
            "f" => Some(Accidental::Flat),
            "" => Some(Accidental::Natural),
            "s" => Some(Accidental::Sharp),
            "ss" => Some(Accidental::DoubleSharp),
            _ => None,
        }
    }
}

/// Spelled pitch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pitch {
    /// Diatonic step (0=C, 1=D, ... 6=B)
    step: u8,
    accidental: Accidental,
    /// Octave number (4 = middle C octave)
    octave: i8,
}

impl Pitch {
    pub fn new(step: u8, accidental: Accidental, octave: i8) -> Result<Self, PitchError> {
        if step > 6 {
            return Err(PitchError::InvalidName(format!(
                "step {} (must be 0-6)",
                step
            )));
        }
        Ok(Self {
            step,
            accidental,
            octave,
        })
    }

    /// Spell a semitone number with sharps
    pub fn from_number(number: i32) -> Result<Self, PitchError> {
        const SPELLINGS: [(u8, Accidental); 12] = [
            (0, Accidental::Natural),
            (0, Accidental::Sharp),
            (1, Accidental::Natural),
            (1, Accidental::Sharp),
            (2, Accidental::Natural),
            (3, Accidental::Natural),
            (3, Accidental::Sharp),
            (4, Accidental::Natural),
            (4, Accidental::Sharp),
            (5, Accidental::Natural),
            (5, Accidental::Sharp),
            (6, Accidental::Natural),
        ];
        let (step, accidental) = SPELLINGS[number.rem_euclid(12) as usize];
        let octave = i8::try_from(number.div_euclid(12))
            .ok()
            .and_then(|shift| MIDDLE_C_OCTAVE.checked_add(shift))
            .ok_or(PitchError::NumberOutOfRange(number))?;
        Ok(Self {
            step,
            accidental,
            octave,
        })
    }

    pub fn step(&self) -> u8 {
        self.step
    }

    pub fn accidental(&self) -> Accidental {
        self.accidental
    }

    pub fn octave(&self) -> i8 {
        self.octave
    }

    /// Semitones relative to middle C
    pub fn number(&self) -> i32 {
        STEP_SEMITONES[self.step as usize]
            + self.accidental.semitone_offset()
            + (self.octave as i32 - MIDDLE_C_OCTAVE as i32) * 12
    }

    /// LilyPond English name, e.g. `cs''`
    pub fn name(&self) -> String {
        let marks = self.octave as i32 - BASE_OCTAVE as i32;
        let octave_marks = if marks >= 0 {
            "'".repeat(marks as usize)
        } else {
            ",".repeat(marks.unsigned_abs() as usize)
        };
        format!(
            "{}{}{}",
            STEP_NAMES[self.step as usize],
            self.accidental.suffix(),
            octave_marks
        )
    }
}

impl FromStr for Pitch {
    type Err = PitchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PitchError::InvalidName(s.to_string());
        let mut chars = s.trim().chars();
        let letter = chars.next().ok_or_else(invalid)?;
        let step = STEP_NAMES
            .iter()
            .position(|&c| c == letter.to_ascii_lowercase())
            .ok_or_else(invalid)? as u8;

        let rest: String = chars.collect();
        let marks_at = rest.find(['\'', ',']).unwrap_or(rest.len());
        let (suffix, marks) = rest.split_at(marks_at);
        let accidental = Accidental::from_suffix(suffix).ok_or_else(invalid)?;

        let ups = marks.chars().filter(|&c| c == '\'').count();
        let downs = marks.chars().filter(|&c| c == ',').count();
        if (ups > 0 && downs > 0) || ups + downs != marks.len() {
            return Err(invalid());
        }
        let octave = i8::try_from(ups)
            .ok()
            .and_then(|ups| BASE_OCTAVE.checked_add(ups))
            .zip(i8::try_from(downs).ok())
            .and_then(|(octave, downs)| octave.checked_sub(downs))
            .ok_or_else(invalid)?;

        Pitch::new(step, accidental, octave)
    }
}

impl TryFrom<String> for Pitch {
    type Error = PitchError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Pitch> for String {
    fn from(pitch: Pitch) -> Self {
        pitch.name()
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
