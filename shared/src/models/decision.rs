//! Irrigation decision models

use serde::{Deserialize, Serialize};

/// Outcome category of an irrigation decision
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum IrrigationStatus {
    /// Proceed with irrigation
    Active,
    /// Defer, rain is imminent
    Pending,
    /// Soil is already oversaturated
    Cancelled,
}

impl std::fmt::Display for IrrigationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IrrigationStatus::Active => write!(f, "Active"),
            IrrigationStatus::Pending => write!(f, "Pending"),
            IrrigationStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// Recommended irrigation action
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct IrrigationDecision {
    /// Liters per hour
    pub water_amount: f64,
    /// Hours
    pub duration: f64,
    pub status: IrrigationStatus,
}

impl IrrigationDecision {
    /// Decision returned when the engine cannot compute one
    pub const FALLBACK: IrrigationDecision = IrrigationDecision {
        water_amount: 1.0,
        duration: 2.0,
        status: IrrigationStatus::Pending,
    };
}

/// Whether the weather reading came from the provider or was substituted
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WeatherOrigin {
    Live,
    Fallback,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SensorReading, WeatherReading};

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_string(&IrrigationStatus::Cancelled).unwrap();
        assert_eq!(json, "\"Cancelled\"");
        assert_eq!(IrrigationStatus::Pending.to_string(), "Pending");
    }

    #[test]
    fn test_fallback_readings() {
        assert_eq!(SensorReading::FALLBACK.soil_moisture, 60.0);
        assert_eq!(WeatherReading::FALLBACK.rain_probability, 10.0);
        assert_eq!(IrrigationDecision::FALLBACK.status, IrrigationStatus::Pending);
    }
}
