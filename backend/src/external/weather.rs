//! Weather API client for fetching current conditions
//!
//! Integrates with the OpenWeatherMap current-weather endpoint and normalizes
//! the response into the [`WeatherReading`] the decision engine consumes.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use shared::{estimate_rain_probability, WeatherReading};

use crate::config::WeatherConfig;
use crate::error::{AppError, AppResult};

/// Source of current weather conditions for a location.
///
/// Implementations make at most one upstream call per invocation and never
/// retry; fallback policy belongs to the caller.
#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn resolve(&self, latitude: f64, longitude: f64) -> AppResult<WeatherReading>;
}

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
    units: String,
}

/// OpenWeatherMap API response for current weather
#[derive(Debug, Deserialize)]
struct OWMCurrentResponse {
    weather: Vec<OWMWeather>,
    main: OWMMain,
    clouds: Option<OWMClouds>,
}

#[derive(Debug, Deserialize)]
struct OWMWeather {
    id: i32,
}

#[derive(Debug, Deserialize)]
struct OWMMain {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OWMClouds {
    all: f64,
}

impl WeatherClient {
    /// Create a new WeatherClient. An empty API key is a configuration error.
    pub fn new(config: &WeatherConfig) -> AppResult<Self> {
        if config.api_key.trim().is_empty() {
            return Err(AppError::Configuration(
                "Weather API key not configured".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.api_endpoint.trim_end_matches('/').to_string(),
            units: config.units.clone(),
        })
    }

    /// Create a new WeatherClient with custom base URL (for testing)
    pub fn with_base_url(api_key: String, base_url: String) -> AppResult<Self> {
        Self::new(&WeatherConfig {
            api_endpoint: base_url,
            api_key,
            ..WeatherConfig::default()
        })
    }

    /// Fetch current weather conditions by GPS coordinates
    pub async fn get_current_weather(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> AppResult<WeatherReading> {
        let url = format!(
            "{}/weather?lat={}&lon={}&appid={}&units={}",
            self.base_url, latitude, longitude, self.api_key, self.units
        );

        tracing::debug!(latitude, longitude, "Fetching current weather");

        let response = self.client.get(&url).send().await.map_err(|e| {
            let reason = if e.is_timeout() { "timed out" } else { "failed" };
            tracing::error!("Weather API request {}: {}", reason, e.without_url());
            AppError::UpstreamUnavailable(format!("Weather API request {}", reason))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Weather API error: {} - {}", status, body);
            return Err(AppError::UpstreamUnavailable(format!(
                "Weather API error: {}",
                status
            )));
        }

        let data: OWMCurrentResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse weather response: {}", e.without_url());
            AppError::UpstreamUnavailable("Failed to parse weather response".to_string())
        })?;

        let reading = convert_current_response(data)?;
        tracing::debug!(?reading, "Weather reading resolved");
        Ok(reading)
    }
}

#[async_trait]
impl WeatherSource for WeatherClient {
    async fn resolve(&self, latitude: f64, longitude: f64) -> AppResult<WeatherReading> {
        self.get_current_weather(latitude, longitude).await
    }
}

/// Convert OpenWeatherMap current response to our format
fn convert_current_response(data: OWMCurrentResponse) -> AppResult<WeatherReading> {
    let code = data
        .weather
        .first()
        .map(|w| w.id)
        .ok_or_else(|| AppError::UpstreamUnavailable("Weather response has no condition".to_string()))?;

    let cloud_cover = data.clouds.map(|c| c.all);
    let rain_probability = estimate_rain_probability(code, cloud_cover).ok_or_else(|| {
        AppError::UpstreamUnavailable(format!(
            "Weather response for condition {} has no cloud cover",
            code
        ))
    })?;

    Ok(WeatherReading::normalized(
        data.main.temp,
        data.main.humidity,
        rain_probability,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: serde_json::Value) -> OWMCurrentResponse {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_convert_rainy_response() {
        let data = parse(serde_json::json!({
            "weather": [{ "id": 501, "main": "Rain" }],
            "main": { "temp": 24.37, "humidity": 88 },
            "clouds": { "all": 90 }
        }));
        let reading = convert_current_response(data).unwrap();
        assert_eq!(reading.temperature, 24.4);
        assert_eq!(reading.humidity, 88.0);
        assert_eq!(reading.rain_probability, 80.0);
    }

    #[test]
    fn test_convert_cloudy_response_caps_probability() {
        let data = parse(serde_json::json!({
            "weather": [{ "id": 804 }],
            "main": { "temp": 30.0, "humidity": 55 },
            "clouds": { "all": 100 }
        }));
        assert_eq!(convert_current_response(data).unwrap().rain_probability, 40.0);
    }

    #[test]
    fn test_cloudy_response_without_cover_is_rejected() {
        let data = parse(serde_json::json!({
            "weather": [{ "id": 802 }],
            "main": { "temp": 30.0, "humidity": 55 }
        }));
        assert!(matches!(
            convert_current_response(data),
            Err(AppError::UpstreamUnavailable(_))
        ));
    }

    #[test]
    fn test_clear_response_without_cover_is_accepted() {
        let data = parse(serde_json::json!({
            "weather": [{ "id": 800 }],
            "main": { "temp": 31.26, "humidity": 40 }
        }));
        let reading = convert_current_response(data).unwrap();
        assert_eq!(reading.rain_probability, 0.0);
        assert_eq!(reading.temperature, 31.3);
    }

    #[test]
    fn test_empty_condition_list_is_rejected() {
        let data = parse(serde_json::json!({
            "weather": [],
            "main": { "temp": 20.0, "humidity": 50 }
        }));
        assert!(convert_current_response(data).is_err());
    }

    #[test]
    fn test_missing_api_key_is_configuration_error() {
        let result = WeatherClient::with_base_url("  ".to_string(), "http://localhost".to_string());
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }
}
