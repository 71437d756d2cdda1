//! Smart Irrigation System - Backend
//!
//! HTTP service that recommends irrigation actions for a crop, soil and
//! location from current sensor and weather conditions.

use std::sync::Arc;

use axum::{routing::get, Router};
use shared::SimulatedSensor;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use config::Config;

use error::AppResult;
use external::WeatherClient;
use services::{HistoryStore, InMemoryCatalog, IrrigationService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub irrigation: IrrigationService,
}

impl AppState {
    /// Wire the production collaborators described by the configuration.
    ///
    /// Fails on a missing weather credential or an invalid catalog.
    pub fn from_config(config: Config) -> AppResult<Self> {
        let catalog = InMemoryCatalog::with_defaults()?;
        let weather = WeatherClient::new(&config.weather)?;
        let sensor = SimulatedSensor::new(config.sensor);
        let history = HistoryStore::new(&config.history);

        let irrigation = IrrigationService::new(
            Arc::new(catalog),
            Arc::new(sensor),
            Arc::new(weather),
            Arc::new(history),
        );

        Ok(Self {
            config: Arc::new(config),
            irrigation,
        })
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Smart Irrigation System API v1.0"
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
