//! Configuration management for the Smart Irrigation System
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with SIS_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::SensorBounds;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Weather API configuration
    pub weather: WeatherConfig,

    /// Simulated sensor bounds
    pub sensor: SensorBounds,

    /// Decision history configuration
    pub history: HistoryConfig,

    /// Log output configuration
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// Weather API endpoint
    pub api_endpoint: String,

    /// Weather API key
    pub api_key: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Units flag passed to the provider
    pub units: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HistoryConfig {
    /// Records kept in memory before the oldest are evicted
    pub max_records: usize,

    /// Records returned when a history query has no limit
    pub default_limit: usize,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("SIS_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 8000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("weather.api_endpoint", "https://api.openweathermap.org/data/2.5")?
            .set_default("weather.api_key", "")?
            .set_default("weather.timeout_secs", 10)?
            .set_default("weather.units", "metric")?
            .set_default("sensor.moisture", vec![30.0, 90.0])?
            .set_default("sensor.temperature", vec![15.0, 40.0])?
            .set_default("sensor.humidity", vec![40.0, 90.0])?
            .set_default("history.max_records", 1000)?
            .set_default("history.default_limit", 50)?
            .set_default("logging.format", "pretty")?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (SIS_ prefix)
            .add_source(
                Environment::with_prefix("SIS")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    // Sensor bounds as "min,max", e.g. SIS_SENSOR__MOISTURE=35,85
                    .list_separator(",")
                    .with_list_parse_key("sensor.moisture")
                    .with_list_parse_key("sensor.temperature")
                    .with_list_parse_key("sensor.humidity"),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_endpoint: "https://api.openweathermap.org/data/2.5".to_string(),
            api_key: String::new(),
            timeout_secs: 10,
            units: "metric".to_string(),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_records: 1000,
            default_limit: 50,
        }
    }
}
