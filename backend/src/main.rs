//! Smart Irrigation System - Backend Server

use std::net::SocketAddr;

use smart_irrigation_backend::{config::LogFormat, create_app, AppState, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    // Initialize tracing
    let json = config.logging.format == LogFormat::Json;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "sis_server=debug,smart_irrigation_backend=debug,shared=debug,tower_http=debug"
                    .into()
            }),
        )
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(tracing_subscriber::fmt::layer))
        .init();

    tracing::info!("Starting Smart Irrigation System Server");
    tracing::info!("Environment: {}", config.environment);

    let host: std::net::IpAddr = config.server.host.parse()?;
    let addr = SocketAddr::new(host, config.server.port);

    // Create application state
    let state = AppState::from_config(config)?;

    // Build application
    let app = create_app(state);

    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
