//! WebAssembly module for Crop Advisor
//!
//! Provides client-side computation for:
//! - Prediction year options
//! - Form validation before submit
//! - Recommendation payload building
//! - The cached map position and read-aloud controls

use wasm_bindgen::prelude::*;

mod browser;

pub use browser::{LocalStorage, WebSpeech};

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;
use shared::{PositionCache, SpeechSynthesizer};

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::debug_1(&"Crop Advisor WASM module loaded".into());
}

fn browser_year() -> i32 {
    js_sys::Date::new_0().get_full_year() as i32
}

fn finalize_draft(draft_json: &str, lat: f64, lng: f64, current_year: i32) -> Result<String, String> {
    let draft: CropDraft =
        serde_json::from_str(draft_json).map_err(|e| format!("Invalid draft JSON: {}", e))?;
    let record = draft
        .finalize(Coordinates::new(lat, lng), current_year)
        .map_err(|e| e.to_string())?;
    serde_json::to_string(&record).map_err(|e| e.to_string())
}

fn recommendation_payload(record_json: &str, context: &str) -> Result<String, String> {
    let record: CropRecord =
        serde_json::from_str(record_json).map_err(|e| format!("Invalid record JSON: {}", e))?;
    let context: AnalysisContext = context.parse()?;
    serde_json::to_string(&RecommendationRequest::new(&record, context)).map_err(|e| e.to_string())
}

/// The selectable prediction years, `current_year` first
#[wasm_bindgen]
pub fn prediction_year_options(current_year: i32) -> Vec<i32> {
    prediction_years(current_year)
}

/// Validate the form and build the crop record at the marker position
///
/// Returns the record as JSON, or the first validation failure.
#[wasm_bindgen]
pub fn validate_crop_draft(draft_json: &str, lat: f64, lng: f64) -> Result<String, JsValue> {
    finalize_draft(draft_json, lat, lng, browser_year()).map_err(|e| JsValue::from_str(&e))
}

/// Body for `POST /generate-content`
#[wasm_bindgen]
pub fn build_recommendation_request(record_json: &str, context: &str) -> Result<String, JsValue> {
    recommendation_payload(record_json, context).map_err(|e| JsValue::from_str(&e))
}

/// The cached `[lat, lng]`, `[0, 0]` when nothing usable is stored
#[wasm_bindgen]
pub fn load_cached_position() -> Vec<f64> {
    PositionCache::new(LocalStorage).load().as_pair().to_vec()
}

#[wasm_bindgen]
pub fn save_cached_position(lat: f64, lng: f64) -> Result<(), JsValue> {
    PositionCache::new(LocalStorage)
        .save(Coordinates::new(lat, lng))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Read `text` aloud, cancelling any utterance in progress
#[wasm_bindgen]
pub fn speak(text: &str) {
    if !text.is_empty() {
        WebSpeech.speak(text);
    }
}

#[wasm_bindgen]
pub fn stop_speaking() {
    WebSpeech.stop();
}

#[wasm_bindgen]
pub fn is_speaking() -> bool {
    WebSpeech.is_speaking()
}
