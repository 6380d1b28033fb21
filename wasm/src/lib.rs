//! WebAssembly module for the plant pairing front-end
//!
//! Exposes the pure parts of the pipeline to the browser:
//! - Response normalization and map points
//! - Region lookup
//! - Display and input helpers

use serde::Serialize;
use shared::{ActiveTab, CoordinateResolver, ErrorResult, RawPredictionResponse};
use wasm_bindgen::prelude::*;

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&format!("Serialization failed: {}", e)))
}

fn log_warning(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&JsValue::from_str(message));
    #[cfg(not(target_arch = "wasm32"))]
    let _ = message;
}

/// Normalize a prediction response body.
///
/// Returns the view model as JSON, or an error card (`status: "Error"`) when
/// the body carries the error marker. Only unparseable input is an error.
#[wasm_bindgen]
pub fn normalize_prediction(response_json: &str) -> Result<String, JsValue> {
    let value: serde_json::Value = serde_json::from_str(response_json).map_err(|e| {
        log_warning(&format!("Prediction body is not JSON: {}", e));
        JsValue::from_str(&format!("Invalid response JSON: {}", e))
    })?;

    let raw = RawPredictionResponse::from_value(value);
    if raw.is_error() {
        return to_json(&ErrorResult::new(raw.reason.unwrap_or_default()));
    }
    to_json(&shared::normalize(&raw, CoordinateResolver::builtin()))
}

/// Look up a region, returning `[lat, lng]` when known
#[wasm_bindgen]
pub fn resolve_region(name: &str) -> Option<Vec<f64>> {
    CoordinateResolver::builtin()
        .resolve(name)
        .map(|coord| vec![coord.lat, coord.lng])
}

/// "drought_tolerance" -> "Drought Tolerance"
#[wasm_bindgen]
pub fn format_trait_name(key: &str) -> String {
    shared::format_trait_name(key)
}

#[wasm_bindgen]
pub fn format_score(score: f64) -> String {
    shared::format_score(score)
}

/// Whether a query is long enough to send to the search endpoint
#[wasm_bindgen]
pub fn is_searchable_query(text: &str) -> bool {
    shared::is_searchable_query(text, shared::MIN_QUERY_LEN)
}

/// Check the form before submitting; returns the problem, if any
#[wasm_bindgen]
pub fn validate_submission(tab: &str, plant_a: &str, plant_b: &str) -> Option<String> {
    let tab = match tab {
        "cross" => ActiveTab::Cross,
        _ => ActiveTab::Single,
    };
    shared::validate_submission(tab, plant_a, plant_b)
        .err()
        .map(|e| e.to_string())
}
