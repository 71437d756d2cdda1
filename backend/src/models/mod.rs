//! Models for the Smart Irrigation System backend
//!
//! Re-exports models from the shared crate and adds backend-specific models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use shared::models::*;

/// A recorded decision together with the inputs that produced it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IrrigationLog {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub user: String,
    pub crop_type: String,
    pub soil_type: String,
    pub latitude: f64,
    pub longitude: f64,
    pub sensor_data: SensorReading,
    pub weather_data: WeatherReading,
    pub weather_source: WeatherOrigin,
    pub decision: IrrigationDecision,
}
