//! baca WASM API
//!
//! JavaScript-facing entry points. Each export has a pure-Rust `*_json`
//! twin taking and returning JSON strings, which is what native callers
//! and tests use.
//!
//! # Module Structure
//!
//! - `helpers`: console logging macros and JS value conversion
//! - `divisions`: `makeDivisions`
//! - `pitch_array`: `pitchArraySummary`

pub mod helpers;
pub mod divisions;
pub mod pitch_array;

pub use divisions::{make_divisions, make_divisions_json, make_divisions_typed};
pub use pitch_array::{
    pitch_array_summary, pitch_array_summary_json, pitch_array_summary_typed, PitchArraySpec,
    PitchArraySummary,
};
