//! Irrigation decision service
//!
//! Resolves reference data, sensor and weather inputs for a request, runs the
//! decision engine and records the outcome.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::{decide, validate_coordinates, GpsCoordinates, SensorSource};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::external::WeatherSource;
use crate::models::{
    CropProfile, IrrigationDecision, IrrigationLog, SensorReading, SoilProfile, WeatherOrigin,
    WeatherReading,
};
use crate::services::catalog::ReferenceData;
use crate::services::history::{export_to_csv, HistoryStore};

/// User recorded on decisions until authentication exists
const GUEST_USER: &str = "guest";

/// Irrigation service orchestrating the decision pipeline
#[derive(Clone)]
pub struct IrrigationService {
    catalog: Arc<dyn ReferenceData>,
    sensor: Arc<dyn SensorSource>,
    weather: Arc<dyn WeatherSource>,
    history: Arc<HistoryStore>,
}

/// Input for requesting a decision
#[derive(Debug, Clone, Deserialize)]
pub struct DecisionRequest {
    pub crop_type: String,
    pub soil_type: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Decision together with the readings it was based on
#[derive(Debug, Clone, Serialize)]
pub struct DecisionResponse {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub sensor_data: SensorReading,
    pub weather_data: WeatherReading,
    pub weather_source: WeatherOrigin,
    pub decision: IrrigationDecision,
}

/// Available reference data
#[derive(Debug, Clone, Serialize)]
pub struct CatalogResponse {
    pub crops: Vec<CropProfile>,
    pub soils: Vec<SoilProfile>,
}

impl IrrigationService {
    pub fn new(
        catalog: Arc<dyn ReferenceData>,
        sensor: Arc<dyn SensorSource>,
        weather: Arc<dyn WeatherSource>,
        history: Arc<HistoryStore>,
    ) -> Self {
        Self {
            catalog,
            sensor,
            weather,
            history,
        }
    }

    /// Produce, record and return an irrigation decision
    pub async fn make_decision(&self, request: DecisionRequest) -> AppResult<DecisionResponse> {
        validate_coordinates(&GpsCoordinates::new(request.latitude, request.longitude))?;

        let crop = self.catalog.crop(&request.crop_type).ok_or_else(|| AppError::Validation {
            field: "crop_type".to_string(),
            message: format!("Crop type '{}' not found", request.crop_type),
        })?;
        let soil = self.catalog.soil(&request.soil_type).ok_or_else(|| AppError::Validation {
            field: "soil_type".to_string(),
            message: format!("Soil type '{}' not found", request.soil_type),
        })?;

        let sensor_data = self.sensor.read();
        let (weather_data, weather_source) = self
            .resolve_weather(request.latitude, request.longitude)
            .await;

        let decision = decide(&crop, &soil, &sensor_data, &weather_data);

        let log = IrrigationLog {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            user: GUEST_USER.to_string(),
            crop_type: crop.name.clone(),
            soil_type: soil.name.clone(),
            latitude: request.latitude,
            longitude: request.longitude,
            sensor_data,
            weather_data,
            weather_source,
            decision,
        };

        tracing::info!(
            id = %log.id,
            crop = %log.crop_type,
            soil = %log.soil_type,
            status = %decision.status,
            water_amount = decision.water_amount,
            duration = decision.duration,
            ?weather_source,
            "Irrigation decision recorded"
        );

        let response = DecisionResponse {
            id: log.id,
            timestamp: log.timestamp,
            sensor_data,
            weather_data,
            weather_source,
            decision,
        };
        self.history.record(log);

        Ok(response)
    }

    /// Live weather for the location, or the documented fallback reading
    pub async fn resolve_weather(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> (WeatherReading, WeatherOrigin) {
        match self.weather.resolve(latitude, longitude).await {
            Ok(reading) => (reading, WeatherOrigin::Live),
            Err(e) => {
                tracing::warn!("Weather unavailable, using fallback reading: {}", e);
                (WeatherReading::FALLBACK, WeatherOrigin::Fallback)
            }
        }
    }

    /// Recent decisions, newest first
    pub fn history(&self, limit: Option<usize>, crop_type: Option<&str>) -> Vec<IrrigationLog> {
        self.history.list(limit, crop_type)
    }

    /// Full history as CSV
    pub fn export_history_csv(&self) -> AppResult<String> {
        export_to_csv(&self.history.all())
    }

    pub fn catalog(&self) -> CatalogResponse {
        CatalogResponse {
            crops: self.catalog.crops(),
            soils: self.catalog.soils(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HistoryConfig;
    use crate::models::IrrigationStatus;
    use crate::services::catalog::InMemoryCatalog;
    use async_trait::async_trait;

    struct FixedSensor(SensorReading);

    impl SensorSource for FixedSensor {
        fn read(&self) -> SensorReading {
            self.0
        }
    }

    struct FixedWeather(Option<WeatherReading>);

    #[async_trait]
    impl WeatherSource for FixedWeather {
        async fn resolve(&self, _latitude: f64, _longitude: f64) -> AppResult<WeatherReading> {
            self.0
                .ok_or_else(|| AppError::UpstreamUnavailable("provider down".to_string()))
        }
    }

    fn service(weather: Option<WeatherReading>) -> IrrigationService {
        IrrigationService::new(
            Arc::new(InMemoryCatalog::with_defaults().unwrap()),
            Arc::new(FixedSensor(SensorReading {
                soil_moisture: 50.0,
                temperature: 22.0,
                humidity: 65.0,
            })),
            Arc::new(FixedWeather(weather)),
            Arc::new(HistoryStore::new(&HistoryConfig::default())),
        )
    }

    fn request(crop: &str, soil: &str) -> DecisionRequest {
        DecisionRequest {
            crop_type: crop.to_string(),
            soil_type: soil.to_string(),
            latitude: 12.9716,
            longitude: 77.5946,
        }
    }

    #[tokio::test]
    async fn test_decision_with_live_weather() {
        let weather = WeatherReading {
            temperature: 26.0,
            humidity: 70.0,
            rain_probability: 10.0,
        };
        let svc = service(Some(weather));

        let response = svc.make_decision(request("tomato", "Red Soil")).await.unwrap();
        assert_eq!(response.weather_source, WeatherOrigin::Live);
        assert_eq!(response.decision.water_amount, 1.31);
        assert_eq!(response.decision.duration, 2.3);
        assert_eq!(response.decision.status, IrrigationStatus::Active);

        let history = svc.history(None, None);
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, response.id);
        assert_eq!(history[0].user, "guest");
    }

    #[tokio::test]
    async fn test_weather_failure_uses_fallback() {
        let svc = service(None);
        let response = svc.make_decision(request("tomato", "Red Soil")).await.unwrap();
        assert_eq!(response.weather_source, WeatherOrigin::Fallback);
        assert_eq!(response.weather_data, WeatherReading::FALLBACK);
        assert_eq!(response.decision.status, IrrigationStatus::Active);
    }

    #[tokio::test]
    async fn test_unknown_crop_rejected() {
        let svc = service(None);
        let err = svc.make_decision(request("mango", "Red Soil")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { ref field, .. } if field == "crop_type"));

        let err = svc.make_decision(request("tomato", "Lava")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { ref field, .. } if field == "soil_type"));
        assert!(svc.history(None, None).is_empty());
    }

    #[tokio::test]
    async fn test_invalid_coordinates_rejected() {
        let svc = service(None);
        let mut req = request("tomato", "Red Soil");
        req.latitude = 123.0;
        let err = svc.make_decision(req).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { ref field, .. } if field == "latitude"));
    }
}
