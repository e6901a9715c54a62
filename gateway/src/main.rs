//! CEP Weather Gateway (front service)
//!
//! Public entry point. Rejects malformed CEPs locally and relays everything
//! else to the back service, answering with whatever status and body the back
//! service classified.

use std::net::SocketAddr;
use std::sync::Arc;

use cep_weather_core::domain::ports::LogStageObserver;
use cep_weather_core::http::{router, AppState};
use cep_weather_core::shutdown::shutdown_signal;
use cep_weather_core::FrontOrchestrator;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod config;


use adapters::BackendClient;
use config::Config;

const SERVICE_NAME: &str = "cep-weather-gateway";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "info,cep_weather_gateway=debug,cep_weather_core=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting CEP weather gateway...");

    let config = Config::from_env();
    tracing::info!(backend = %config.backend_url, "Relaying to backend");

    let relay = Arc::new(BackendClient::new(config.backend_url.clone()));
    let service = FrontOrchestrator::new(relay)
        .with_observer(Arc::new(LogStageObserver::new(SERVICE_NAME)))
        .with_budget(config.request_timeout);

    let app = router(AppState::new(Arc::new(service))).layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    );

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
