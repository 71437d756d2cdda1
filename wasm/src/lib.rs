//! WebAssembly module for the Smart Irrigation System
//!
//! Provides client-side computation for:
//! - Irrigation decisions from locally held readings
//! - Rain probability estimation from weather condition codes
//! - Offline coordinate validation

use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;

/// Compute an irrigation decision from JSON encoded inputs.
///
/// Returns the decision as JSON, e.g.
/// `{"water_amount":1.31,"duration":2.3,"status":"Active"}`.
#[wasm_bindgen]
pub fn decide_irrigation(
    crop_json: &str,
    soil_json: &str,
    sensor_json: &str,
    weather_json: &str,
) -> Result<String, JsValue> {
    decide_from_json(crop_json, soil_json, sensor_json, weather_json)
        .map_err(|e| JsValue::from_str(&e))
}

/// Rain probability (%) for an OpenWeatherMap condition code.
///
/// Cloud codes (801-899) need the cloud cover; `undefined` is returned when it
/// is missing.
#[wasm_bindgen]
pub fn estimate_rain_probability(code: i32, cloud_cover: Option<f64>) -> Option<f64> {
    shared::models::estimate_rain_probability(code, cloud_cover)
}

/// Check that a latitude/longitude pair is usable for a decision request
#[wasm_bindgen]
pub fn validate_coordinates(latitude: f64, longitude: f64) -> bool {
    shared::validation::validate_coordinates(&GpsCoordinates::new(latitude, longitude)).is_ok()
}

fn decide_from_json(
    crop_json: &str,
    soil_json: &str,
    sensor_json: &str,
    weather_json: &str,
) -> Result<String, String> {
    let crop: CropProfile =
        serde_json::from_str(crop_json).map_err(|e| format!("Invalid crop JSON: {}", e))?;
    let soil: SoilProfile =
        serde_json::from_str(soil_json).map_err(|e| format!("Invalid soil JSON: {}", e))?;
    let sensor: SensorReading =
        serde_json::from_str(sensor_json).map_err(|e| format!("Invalid sensor JSON: {}", e))?;
    let weather: WeatherReading =
        serde_json::from_str(weather_json).map_err(|e| format!("Invalid weather JSON: {}", e))?;

    shared::validation::validate_crop_profile(&crop).map_err(|e| e.to_string())?;
    shared::validation::validate_soil_profile(&soil).map_err(|e| e.to_string())?;

    let decision = shared::engine::decide(&crop, &soil, &sensor, &weather);
    serde_json::to_string(&decision).map_err(|e| format!("Failed to encode decision: {}", e))
}
