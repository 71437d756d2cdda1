//! Weather data models

use serde::{Deserialize, Serialize};

use crate::types::round_to;

/// Ambient conditions normalized for the decision engine
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WeatherReading {
    /// Air temperature, °C
    pub temperature: f64,
    /// Relative humidity, percent
    pub humidity: f64,
    /// Estimated probability of rain, percent
    pub rain_probability: f64,
}

impl WeatherReading {
    /// Reading substituted when the weather provider is unavailable
    pub const FALLBACK: WeatherReading = WeatherReading {
        temperature: 25.0,
        humidity: 60.0,
        rain_probability: 10.0,
    };

    /// Build a reading from raw provider values, rounding to one decimal
    pub fn normalized(temperature: f64, humidity: f64, rain_probability: f64) -> Self {
        Self {
            temperature: round_to(temperature, 1),
            humidity: round_to(humidity, 1),
            rain_probability: round_to(rain_probability, 1),
        }
    }
}

/// Weather condition groups keyed by provider condition code
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCategory {
    /// Codes below 300
    Thunderstorm,
    /// 300-399
    Drizzle,
    /// 400-599
    Rain,
    /// 600-699
    Snow,
    /// 700-799: fog, haze, dust
    Atmosphere,
    /// Exactly 800
    Clear,
    /// 801-899
    Clouds,
    /// 900 and above
    Other,
}

/// Upper bound on rain probability inferred from cloud cover alone
pub const MAX_CLOUD_RAIN_PROBABILITY: f64 = 40.0;

impl WeatherCategory {
    pub fn from_code(code: i32) -> Self {
        match code {
            i32::MIN..=299 => WeatherCategory::Thunderstorm,
            300..=399 => WeatherCategory::Drizzle,
            400..=599 => WeatherCategory::Rain,
            600..=699 => WeatherCategory::Snow,
            700..=799 => WeatherCategory::Atmosphere,
            800 => WeatherCategory::Clear,
            801..=899 => WeatherCategory::Clouds,
            _ => WeatherCategory::Other,
        }
    }

    /// Rain probability (percent) for this category.
    ///
    /// Cloudy conditions scale with cloud cover, so `None` is returned when the
    /// category is `Clouds` and no cover percentage is available.
    pub fn rain_probability(&self, cloud_cover_percent: Option<f64>) -> Option<f64> {
        match self {
            WeatherCategory::Thunderstorm => Some(90.0),
            WeatherCategory::Drizzle => Some(70.0),
            WeatherCategory::Rain => Some(80.0),
            WeatherCategory::Snow => Some(50.0),
            WeatherCategory::Atmosphere => Some(30.0),
            WeatherCategory::Clear => Some(0.0),
            WeatherCategory::Clouds => {
                cloud_cover_percent.map(|cover| cover.min(MAX_CLOUD_RAIN_PROBABILITY))
            }
            WeatherCategory::Other => Some(20.0),
        }
    }
}

/// Estimate rain probability from a provider condition code
pub fn estimate_rain_probability(code: i32, cloud_cover_percent: Option<f64>) -> Option<f64> {
    WeatherCategory::from_code(code).rain_probability(cloud_cover_percent)
}
