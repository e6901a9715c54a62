//! HTTP surface shared by both services
//!
//! Axum handlers and the router. The service behind the routes is whichever
//! [`TemperatureService`] the binary injects, so front and back expose the
//! same paths and error bodies.

pub mod handlers;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::app::TemperatureService;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<dyn TemperatureService>,
}

impl AppState {
    pub fn new(service: Arc<dyn TemperatureService>) -> Self {
        Self { service }
    }
}

/// Build the router
///
/// `/temp/:cep` answers both `GET` and `POST`: callers of the front service
/// `POST`, the front relays to the back with `GET`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/temp/:cep",
            get(handlers::temperature).post(handlers::temperature),
        )
        .route("/coordenadas/:cep", get(handlers::coordinates))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
