//! Pitch array operations for the WASM API

use crate::error::Result;
use crate::pitch_array::{CellToken, PitchArray};
use crate::api::helpers::{deserialize, js_error, serialize};
use crate::{wasm_info, wasm_log};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

/// Grid input: `{"rows": [[...], ...]}` or `{"columns": [[...], ...]}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PitchArraySpec {
    Rows(Vec<Vec<CellToken>>),
    Columns(Vec<Vec<CellToken>>),
}

/// Structure of a built grid, as returned to JavaScript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PitchArraySummary {
    pub depth: usize,
    pub width: usize,
    pub cell_widths: Vec<Vec<usize>>,
    pub tokens: Vec<Vec<CellToken>>,
    pub pitch_count: usize,
    pub has_voice_crossing: bool,
    pub text: String,
}

impl PitchArraySpec {
    pub fn build(self) -> Result<PitchArray> {
        let array = match self {
            PitchArraySpec::Rows(rows) => PitchArray::from_rows(rows)?,
            PitchArraySpec::Columns(columns) => PitchArray::from_columns(columns)?,
        };
        Ok(array)
    }
}

impl From<&PitchArray> for PitchArraySummary {
    fn from(array: &PitchArray) -> Self {
        Self {
            depth: array.depth(),
            width: array.width(),
            cell_widths: array.cell_widths_by_row(),
            tokens: array.cell_tokens_by_row(),
            pitch_count: array.weight(),
            has_voice_crossing: array.has_voice_crossing(),
            text: array.to_string(),
        }
    }
}

pub fn pitch_array_summary_typed(spec: PitchArraySpec) -> Result<PitchArraySummary> {
    let array = spec.build()?;
    log::debug!("pitch array built: {}x{}", array.depth(), array.width());
    Ok(PitchArraySummary::from(&array))
}

/// JSON twin of `pitchArraySummary`
pub fn pitch_array_summary_json(spec_json: &str) -> Result<String> {
    let spec: PitchArraySpec = serde_json::from_str(spec_json)?;
    let summary = pitch_array_summary_typed(spec)?;
    Ok(serde_json::to_string(&summary)?)
}

/// Build a pitch array and describe it
///
/// # Parameters
/// - `spec`: `{"rows": [[token, ...], ...]}` or `{"columns": ...}`
///
/// # Returns
/// Dimensions, per-row widths and tokens, and the rendered grid text
#[wasm_bindgen(js_name = pitchArraySummary)]
pub fn pitch_array_summary(spec: JsValue) -> std::result::Result<JsValue, JsValue> {
    wasm_info!("pitchArraySummary called");

    let spec: PitchArraySpec = deserialize(spec, "Invalid pitch array spec")?;
    let summary = pitch_array_summary_typed(spec)
        .map_err(|e| js_error(e, "pitchArraySummary failed"))?;

    wasm_log!("  {} rows x {} columns", summary.depth, summary.width);
    serialize(&summary, "Failed to serialize pitch array summary")
}
