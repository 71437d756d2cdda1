//! Crop and soil reference data
//!
//! The decision pipeline only reads profiles through [`ReferenceData`], so the
//! backing store can change without touching the engine.

use std::collections::HashSet;

use shared::{
    default_crops, default_soils, validate_crop_profile, validate_soil_profile, CropProfile,
    SoilProfile,
};

use crate::error::{AppError, AppResult};

/// Read-only lookup of crop and soil profiles by name
pub trait ReferenceData: Send + Sync {
    fn crop(&self, name: &str) -> Option<CropProfile>;
    fn soil(&self, name: &str) -> Option<SoilProfile>;
    fn crops(&self) -> Vec<CropProfile>;
    fn soils(&self) -> Vec<SoilProfile>;
}

/// Catalog held in memory, validated once at construction
#[derive(Debug, Clone)]
pub struct InMemoryCatalog {
    crops: Vec<CropProfile>,
    soils: Vec<SoilProfile>,
}

impl InMemoryCatalog {
    /// Build a catalog, rejecting invalid or duplicate profiles
    pub fn new(crops: Vec<CropProfile>, soils: Vec<SoilProfile>) -> AppResult<Self> {
        let mut seen = HashSet::new();
        for crop in &crops {
            validate_crop_profile(crop).map_err(|e| {
                AppError::Configuration(format!("Invalid crop profile '{}': {}", crop.name, e))
            })?;
            if !seen.insert(crop.name.as_str()) {
                return Err(AppError::Configuration(format!(
                    "Duplicate crop profile '{}'",
                    crop.name
                )));
            }
        }

        let mut seen = HashSet::new();
        for soil in &soils {
            validate_soil_profile(soil).map_err(|e| {
                AppError::Configuration(format!("Invalid soil profile '{}': {}", soil.name, e))
            })?;
            if !seen.insert(soil.name.as_str()) {
                return Err(AppError::Configuration(format!(
                    "Duplicate soil profile '{}'",
                    soil.name
                )));
            }
        }

        tracing::info!(
            crops = crops.len(),
            soils = soils.len(),
            "Reference catalog loaded"
        );
        Ok(Self { crops, soils })
    }

    /// Catalog seeded with the built-in crops and soils
    pub fn with_defaults() -> AppResult<Self> {
        Self::new(default_crops(), default_soils())
    }
}

impl ReferenceData for InMemoryCatalog {
    fn crop(&self, name: &str) -> Option<CropProfile> {
        self.crops.iter().find(|c| c.name == name).cloned()
    }

    fn soil(&self, name: &str) -> Option<SoilProfile> {
        self.soils.iter().find(|s| s.name == name).cloned()
    }

    fn crops(&self) -> Vec<CropProfile> {
        self.crops.clone()
    }

    fn soils(&self) -> Vec<SoilProfile> {
        self.soils.clone()
    }
}
