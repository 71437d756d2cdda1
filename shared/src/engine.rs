//! Rule-based irrigation decision engine
//!
//! Maps a crop profile, soil profile, sensor reading and weather reading to a
//! recommended water amount, duration and status. The engine holds no state
//! and draws no randomness, so identical inputs always yield identical
//! decisions.

use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{
    CropProfile, IrrigationDecision, IrrigationStatus, SensorReading, SoilProfile, WeatherReading,
};
use crate::types::round_to;

/// Largest increase applied for dry soil (+50%)
pub const MAX_DEFICIT_INCREASE: f64 = 0.5;
/// Smallest factor applied for wet soil (-50%)
pub const MIN_EXCESS_FACTOR: f64 = 0.5;
/// Largest increase applied for heat stress (+30%)
pub const MAX_HEAT_INCREASE: f64 = 0.3;
/// Degrees above the ideal maximum that add 100% heat-stress increase
pub const HEAT_STRESS_SPAN: f64 = 10.0;
/// Rain probability (percent) above which water is halved
pub const RAIN_REDUCTION_THRESHOLD: f64 = 60.0;
pub const RAIN_REDUCTION_FACTOR: f64 = 0.5;
/// Rain probability (percent) above which irrigation is deferred
pub const RAIN_DEFER_THRESHOLD: f64 = 80.0;
/// Multiple of the ideal maximum moisture treated as oversaturated
pub const SATURATION_FACTOR: f64 = 1.2;

pub const BASE_DURATION_HOURS: f64 = 2.0;
pub const MIN_DURATION_HOURS: f64 = 0.5;
pub const MAX_DURATION_HOURS: f64 = 4.0;

/// Arithmetic failure inside the engine
///
/// Never escapes [`decide`]; it is recovered there by returning
/// [`IrrigationDecision::FALLBACK`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ComputationAnomaly {
    #[error("input {0} is not a finite number")]
    NonFiniteInput(&'static str),

    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("computed {0} is not a finite number")]
    NonFiniteResult(&'static str),
}

/// Moisture rule applied to the water amount
///
/// Deficit and excess are mutually exclusive by construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoistureAdjustment {
    /// Soil is drier than the ideal minimum; carries the multiplier (> 1)
    Deficit(f64),
    /// Soil is wetter than the ideal maximum; carries the multiplier (< 1)
    Excess(f64),
    /// Soil moisture is within the ideal range
    WithinRange,
}

impl MoistureAdjustment {
    pub fn factor(&self) -> f64 {
        match self {
            MoistureAdjustment::Deficit(factor) | MoistureAdjustment::Excess(factor) => *factor,
            MoistureAdjustment::WithinRange => 1.0,
        }
    }
}

/// Recommend an irrigation action. Always produces a decision.
pub fn decide(
    crop: &CropProfile,
    soil: &SoilProfile,
    sensor: &SensorReading,
    weather: &WeatherReading,
) -> IrrigationDecision {
    match try_decide(crop, soil, sensor, weather) {
        Ok(decision) => {
            debug!(
                crop = %crop.name,
                soil = %soil.name,
                water_amount = decision.water_amount,
                duration = decision.duration,
                status = %decision.status,
                "Irrigation decision computed"
            );
            decision
        }
        Err(anomaly) => {
            warn!(
                crop = %crop.name,
                soil = %soil.name,
                error = %anomaly,
                "Decision engine anomaly, returning fallback decision"
            );
            IrrigationDecision::FALLBACK
        }
    }
}

/// Compute a decision, reporting arithmetic anomalies instead of recovering
pub fn try_decide(
    crop: &CropProfile,
    soil: &SoilProfile,
    sensor: &SensorReading,
    weather: &WeatherReading,
) -> Result<IrrigationDecision, ComputationAnomaly> {
    check_inputs(crop, soil, sensor, weather)?;

    let moisture = sensor.soil_moisture;
    let mut water = crop.base_water_rate;

    let adjustment = moisture_adjustment(crop, moisture);
    match adjustment {
        MoistureAdjustment::Deficit(factor) => {
            debug!("Increasing water by {:.1}% for low moisture", (factor - 1.0) * 100.0);
        }
        MoistureAdjustment::Excess(factor) => {
            debug!("Decreasing water by {:.1}% for high moisture", (1.0 - factor) * 100.0);
        }
        MoistureAdjustment::WithinRange => {}
    }
    water *= adjustment.factor();

    if let Some(factor) = heat_stress_factor(crop, sensor.temperature) {
        debug!("Increasing water by {:.1}% for high temperature", (factor - 1.0) * 100.0);
        water *= factor;
    }

    if weather.rain_probability > RAIN_REDUCTION_THRESHOLD {
        debug!(
            rain_probability = weather.rain_probability,
            "Halving water for likely rain"
        );
        water *= RAIN_REDUCTION_FACTOR;
    }

    // Lower absorption means more applied water reaches the same depth
    water /= soil.absorption_rate;

    let water_amount = round_to(water, 2);
    if !water_amount.is_finite() {
        return Err(ComputationAnomaly::NonFiniteResult("water_amount"));
    }

    let duration = irrigation_duration(crop, moisture);
    if !duration.is_finite() {
        return Err(ComputationAnomaly::NonFiniteResult("duration"));
    }

    Ok(IrrigationDecision {
        water_amount,
        duration,
        status: irrigation_status(crop, moisture, weather.rain_probability),
    })
}

/// Select the moisture rule for the current soil moisture
pub fn moisture_adjustment(crop: &CropProfile, moisture: f64) -> MoistureAdjustment {
    let ideal = crop.ideal_moisture;
    if moisture < ideal.min {
        let deficit = (ideal.min - moisture) / ideal.min;
        MoistureAdjustment::Deficit(1.0 + deficit.min(MAX_DEFICIT_INCREASE))
    } else if moisture > ideal.max {
        let excess = (moisture - ideal.max) / ideal.max;
        MoistureAdjustment::Excess(MIN_EXCESS_FACTOR.max(1.0 - excess))
    } else {
        MoistureAdjustment::WithinRange
    }
}

/// Multiplier for temperatures above the crop's ideal maximum
pub fn heat_stress_factor(crop: &CropProfile, temperature: f64) -> Option<f64> {
    let ideal_max = crop.ideal_temp.max;
    if temperature > ideal_max {
        let increase = ((temperature - ideal_max) / HEAT_STRESS_SPAN).min(MAX_HEAT_INCREASE);
        Some(1.0 + increase)
    } else {
        None
    }
}

/// Irrigation duration in hours. Only the moisture deficit lengthens it.
pub fn irrigation_duration(crop: &CropProfile, moisture: f64) -> f64 {
    let ideal_min = crop.ideal_moisture.min;
    let deficit = ((ideal_min - moisture) / ideal_min).max(0.0);
    let duration =
        (BASE_DURATION_HOURS * (1.0 + deficit)).clamp(MIN_DURATION_HOURS, MAX_DURATION_HOURS);
    round_to(duration, 1)
}

/// Status rules, evaluated in priority order
pub fn irrigation_status(
    crop: &CropProfile,
    moisture: f64,
    rain_probability: f64,
) -> IrrigationStatus {
    if rain_probability > RAIN_DEFER_THRESHOLD {
        IrrigationStatus::Pending
    } else if moisture > crop.ideal_moisture.max * SATURATION_FACTOR {
        IrrigationStatus::Cancelled
    } else {
        IrrigationStatus::Active
    }
}

fn check_inputs(
    crop: &CropProfile,
    soil: &SoilProfile,
    sensor: &SensorReading,
    weather: &WeatherReading,
) -> Result<(), ComputationAnomaly> {
    let finite = [
        ("crop.base_water_lph", crop.base_water_rate),
        ("crop.ideal_moisture.min", crop.ideal_moisture.min),
        ("crop.ideal_moisture.max", crop.ideal_moisture.max),
        ("crop.ideal_temp.max", crop.ideal_temp.max),
        ("soil.absorption_rate", soil.absorption_rate),
        ("sensor.soil_moisture", sensor.soil_moisture),
        ("sensor.temperature", sensor.temperature),
        ("weather.rain_probability", weather.rain_probability),
    ];
    if let Some(&(field, _)) = finite.iter().find(|(_, value)| !value.is_finite()) {
        return Err(ComputationAnomaly::NonFiniteInput(field));
    }

    let positive = [
        ("crop.ideal_moisture.min", crop.ideal_moisture.min),
        ("crop.ideal_moisture.max", crop.ideal_moisture.max),
        ("soil.absorption_rate", soil.absorption_rate),
    ];
    if let Some(&(field, value)) = positive.iter().find(|(_, value)| *value <= 0.0) {
        return Err(ComputationAnomaly::NonPositive { field, value });
    }

    if crop.base_water_rate < 0.0 {
        return Err(ComputationAnomaly::Negative {
            field: "crop.base_water_lph",
            value: crop.base_water_rate,
        });
    }

    Ok(())
}
