//! Division pipeline operations for the WASM API
//!
//! Input divisions are nested duration pairs (`[[7, 8], [[3, 8], [5, 8]]]`);
//! output mirrors the nesting with `{"duration": [n, d], "startOffset": [n, d]}`
//! records.

use crate::divisions::{Division, DivisionMaker, DivisionMakerConfig, Nested};
use crate::error::Result;
use crate::models::Duration;
use crate::api::helpers::{deserialize, js_error, serialize};
use crate::{wasm_info, wasm_log};
use wasm_bindgen::prelude::*;

/// Run a configured pipeline over typed input
pub fn make_divisions_typed(
    config: DivisionMakerConfig,
    durations: Vec<Nested<Duration>>,
) -> Result<Vec<Nested<Division>>> {
    let maker = DivisionMaker::from_config(config)?;
    let input: Vec<Nested<Division>> = durations
        .into_iter()
        .map(|item| item.map(&mut Division::from_duration))
        .collect();
    log::debug!(
        "make_divisions: {} callbacks over {} entries",
        maker.callbacks().len(),
        input.len()
    );
    Ok(maker.call(input)?)
}

/// JSON twin of `makeDivisions`
pub fn make_divisions_json(config_json: &str, divisions_json: &str) -> Result<String> {
    let config: DivisionMakerConfig = serde_json::from_str(config_json)?;
    let durations: Vec<Nested<Duration>> = serde_json::from_str(divisions_json)?;
    let output = make_divisions_typed(config, durations)?;
    Ok(serde_json::to_string(&output)?)
}

/// Run a division pipeline
///
/// # Parameters
/// - `config`: `{"callbacks": [{"kind": "split_by_durations", ...}, ...]}`
/// - `divisions`: nested `[numerator, denominator]` pairs
///
/// # Returns
/// Nested division records with start offsets
#[wasm_bindgen(js_name = makeDivisions)]
pub fn make_divisions(config: JsValue, divisions: JsValue) -> std::result::Result<JsValue, JsValue> {
    wasm_info!("makeDivisions called");

    let config: DivisionMakerConfig = deserialize(config, "Invalid division maker config")?;
    let durations: Vec<Nested<Duration>> = deserialize(divisions, "Invalid divisions")?;
    wasm_log!("  {} callbacks, {} input entries", config.callbacks.len(), durations.len());

    let output = make_divisions_typed(config, durations)
        .map_err(|e| js_error(e, "makeDivisions failed"))?;

    wasm_info!("makeDivisions completed: {} entries", output.len());
    serialize(&output, "Failed to serialize divisions")
}
