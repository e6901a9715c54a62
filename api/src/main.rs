//! CEP Weather API (back service)
//!
//! Resolves a CEP to the current temperature: geocodes it through CEP Aberto,
//! then asks Open-Meteo for the current weather at those coordinates.
//! Uses hexagonal (ports & adapters) architecture; the orchestration lives in
//! `cep-weather-core`, this binary wires in the reqwest adapters.

use std::net::SocketAddr;
use std::sync::Arc;

use cep_weather_core::domain::ports::LogStageObserver;
use cep_weather_core::http::{router, AppState};
use cep_weather_core::shutdown::shutdown_signal;
use cep_weather_core::BackOrchestrator;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod config;


use adapters::{CepAbertoClient, OpenMeteoClient};
use config::Config;

const SERVICE_NAME: &str = "cep-weather-api";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,cep_weather_api=debug,cep_weather_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting CEP weather API...");

    // Load configuration
    let config = Config::from_env();
    if config.api_token.is_some() {
        tracing::info!("API_TOKEN loaded");
    } else {
        tracing::warn!("API_TOKEN not set; lookups will answer 500 until it is configured");
    }

    // Create adapters
    let geocoder = Arc::new(CepAbertoClient::new(config.geocode_base_url.clone()));
    let weather = Arc::new(
        OpenMeteoClient::new(config.weather_base_url.clone()).with_ceiling(config.weather_timeout),
    );

    let service = BackOrchestrator::new(geocoder, weather, config.api_token.clone())
        .with_observer(Arc::new(LogStageObserver::new(SERVICE_NAME)))
        .with_budget(config.request_timeout);

    let app = router(AppState::new(Arc::new(service)));

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
