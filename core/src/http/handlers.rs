//! HTTP handlers
//!
//! Endpoints for temperature and coordinate lookups by CEP.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use super::AppState;
use crate::domain::{Coordinates, Temperature};
use crate::error::{AppError, INVALID_CEP_MESSAGE, NOT_FOUND_MESSAGE};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET|POST /temp/:cep
///
/// Current temperature for a CEP in Celsius, Fahrenheit and Kelvin.
pub async fn temperature(
    State(state): State<AppState>,
    Path(cep): Path<String>,
) -> Result<Json<Temperature>, AppError> {
    let temperature = state.service.temperature(&cep).await?;
    Ok(Json(temperature))
}

/// GET /coordenadas/:cep
///
/// Geocoding result for a CEP. This route only answers 400 (malformed input)
/// or 502: a CEP the provider does not know is an upstream failure here.
pub async fn coordinates(
    State(state): State<AppState>,
    Path(cep): Path<String>,
) -> Result<Json<Coordinates>, AppError> {
    let coordinates = state
        .service
        .coordinates(&cep)
        .await
        .map_err(|e| match e {
            AppError::InvalidInput => AppError::BadRequest(INVALID_CEP_MESSAGE.to_string()),
            AppError::NotFound => AppError::UpstreamUnavailable(NOT_FOUND_MESSAGE.to_string()),
            e => e,
        })?;
    Ok(Json(coordinates))
}
