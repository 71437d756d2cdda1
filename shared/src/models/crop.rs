//! Crop and soil reference profiles

use serde::{Deserialize, Serialize};

use crate::types::ValueRange;

/// Growing requirements for a crop
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropProfile {
    pub name: String,
    /// Ideal soil moisture, percent
    pub ideal_moisture: ValueRange,
    /// Ideal air temperature, °C
    pub ideal_temp: ValueRange,
    /// Base water need in liters per hour
    #[serde(rename = "base_water_lph")]
    pub base_water_rate: f64,
}

impl CropProfile {
    pub fn new(
        name: impl Into<String>,
        ideal_moisture: [f64; 2],
        ideal_temp: [f64; 2],
        base_water_rate: f64,
    ) -> Self {
        Self {
            name: name.into(),
            ideal_moisture: ideal_moisture.into(),
            ideal_temp: ideal_temp.into(),
            base_water_rate,
        }
    }
}

/// Soil characteristics relevant to irrigation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SoilProfile {
    pub name: String,
    /// Absorption coefficient in (0, 1]
    pub absorption_rate: f64,
}

impl SoilProfile {
    pub fn new(name: impl Into<String>, absorption_rate: f64) -> Self {
        Self {
            name: name.into(),
            absorption_rate,
        }
    }
}

/// Crops available out of the box
pub fn default_crops() -> Vec<CropProfile> {
    vec![
        CropProfile::new("turmeric", [65.0, 75.0], [25.0, 30.0], 1.2),
        CropProfile::new("tomato", [60.0, 70.0], [20.0, 28.0], 0.9),
        CropProfile::new("potato", [55.0, 65.0], [18.0, 24.0], 0.8),
        CropProfile::new("rice", [80.0, 90.0], [24.0, 32.0], 1.5),
        CropProfile::new("wheat", [50.0, 60.0], [15.0, 25.0], 0.7),
        CropProfile::new("cotton", [55.0, 65.0], [22.0, 30.0], 1.0),
        CropProfile::new("sugarcane", [70.0, 80.0], [25.0, 35.0], 1.4),
        CropProfile::new("maize", [60.0, 70.0], [20.0, 30.0], 1.1),
    ]
}

/// Soils available out of the box
pub fn default_soils() -> Vec<SoilProfile> {
    vec![
        SoilProfile::new("Red Soil", 0.8),
        SoilProfile::new("Black Soil", 0.7),
        SoilProfile::new("Alluvial Soil", 0.9),
        SoilProfile::new("Laterite Soil", 0.6),
        SoilProfile::new("Sandy Soil", 0.5),
        SoilProfile::new("Loamy Soil", 0.85),
        SoilProfile::new("Clay Soil", 0.65),
        SoilProfile::new("Silt Soil", 0.75),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crop_profile_wire_format() {
        let crop = CropProfile::new("tomato", [60.0, 70.0], [20.0, 28.0], 0.9);
        let value = serde_json::to_value(&crop).unwrap();
        assert_eq!(value["name"], "tomato");
        assert_eq!(value["ideal_moisture"], serde_json::json!([60.0, 70.0]));
        assert_eq!(value["base_water_lph"], 0.9);
    }

    #[test]
    fn test_default_catalog_names_unique() {
        let crops = default_crops();
        let mut names: Vec<_> = crops.iter().map(|c| c.name.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), crops.len());

        assert!(default_soils().iter().all(|s| s.absorption_rate > 0.0));
    }
}
