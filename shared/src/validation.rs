//! Validation utilities for the Smart Irrigation System

use thiserror::Error;

use crate::models::{CropProfile, SoilProfile};
use crate::types::GpsCoordinates;

/// A rejected input, naming the offending field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

// ============================================================================
// Location Validations
// ============================================================================

/// Validate latitude is within [-90, 90]
pub fn validate_latitude(latitude: f64) -> Result<(), ValidationError> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(ValidationError::new(
            "latitude",
            "Latitude must be between -90 and 90",
        ));
    }
    Ok(())
}

/// Validate longitude is within [-180, 180]
pub fn validate_longitude(longitude: f64) -> Result<(), ValidationError> {
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(ValidationError::new(
            "longitude",
            "Longitude must be between -180 and 180",
        ));
    }
    Ok(())
}

pub fn validate_coordinates(coordinates: &GpsCoordinates) -> Result<(), ValidationError> {
    validate_latitude(coordinates.latitude)?;
    validate_longitude(coordinates.longitude)
}

// ============================================================================
// Reference Data Validations
// ============================================================================

/// Validate a crop profile before it enters the catalog
pub fn validate_crop_profile(crop: &CropProfile) -> Result<(), ValidationError> {
    if crop.name.trim().is_empty() {
        return Err(ValidationError::new("name", "Crop name cannot be empty"));
    }
    if !crop.ideal_moisture.is_ordered() {
        return Err(ValidationError::new(
            "ideal_moisture",
            format!("Ideal moisture range for {} must be [min, max]", crop.name),
        ));
    }
    if crop.ideal_moisture.min <= 0.0 || crop.ideal_moisture.max > 100.0 {
        return Err(ValidationError::new(
            "ideal_moisture",
            format!("Ideal moisture for {} must lie within (0, 100]", crop.name),
        ));
    }
    if !crop.ideal_temp.is_ordered() {
        return Err(ValidationError::new(
            "ideal_temp",
            format!("Ideal temperature range for {} must be [min, max]", crop.name),
        ));
    }
    if !crop.base_water_rate.is_finite() || crop.base_water_rate < 0.0 {
        return Err(ValidationError::new(
            "base_water_lph",
            format!("Base water rate for {} cannot be negative", crop.name),
        ));
    }
    Ok(())
}

/// Validate a soil profile. Absorption rate must be in (0, 1].
pub fn validate_soil_profile(soil: &SoilProfile) -> Result<(), ValidationError> {
    if soil.name.trim().is_empty() {
        return Err(ValidationError::new("name", "Soil name cannot be empty"));
    }
    if !(soil.absorption_rate > 0.0 && soil.absorption_rate <= 1.0) {
        return Err(ValidationError::new(
            "absorption_rate",
            format!(
                "Absorption rate for {} must be in (0, 1], got {}",
                soil.name, soil.absorption_rate
            ),
        ));
    }
    Ok(())
}
