//! Models module for baca
//!
//! Value types shared by the pitch-array and division engines.

pub mod duration;
pub mod pitch;
pub mod side;

// Re-export commonly used types
pub use duration::{Duration, DurationError, Offset, Rational};
pub use pitch::{Accidental, Pitch, PitchError};
pub use side::Side;
