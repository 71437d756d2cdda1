//! Sensor reading model

use serde::{Deserialize, Serialize};

/// A single soil/air reading taken at decision time
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SensorReading {
    /// Soil moisture, percent
    pub soil_moisture: f64,
    /// Air temperature, °C
    pub temperature: f64,
    /// Relative humidity, percent
    pub humidity: f64,
}

impl SensorReading {
    /// Reading used when the sensor source cannot produce one
    pub const FALLBACK: SensorReading = SensorReading {
        soil_moisture: 60.0,
        temperature: 25.0,
        humidity: 65.0,
    };
}
