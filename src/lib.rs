//! baca WASM Module
//!
//! Two engines for scripting score structure:
//!
//! - `pitch_array`: grids of variable-width pitch cells, one row per voice
//! - `divisions`: pipelines that split, fuse and partition durations into
//!   notational divisions
//!
//! Both are plain Rust; `api` exposes them to JavaScript.

pub mod models;
pub mod pitch_array;
pub mod divisions;
pub mod error;
pub mod api;

// Re-export commonly used types
pub use models::{Duration, Offset, Pitch, Rational, Side};
pub use pitch_array::{CellId, CellToken, PitchArray};
pub use divisions::{Count, Depth, Division, DivisionCallback, DivisionMaker, Nested};
pub use error::{Error, Result};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    init_logging();

    log::info!("baca WASM module initialized");
}

#[cfg(feature = "console_log")]
fn init_logging() {
    if console_log::init_with_level(log::Level::Debug).is_err() {
        wasm_warn!("logger already initialized");
    }
}
