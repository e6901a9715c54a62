//! Error types for the CEP weather services
//!
//! This module defines error types for each layer:
//! - `GeocodeError`: geocoding provider adapter errors
//! - `WeatherError`: weather provider adapter errors
//! - `AppError`: classified outcome returned by the orchestrators and rendered
//!   as the `{"error": ...}` HTTP body
//!
//! Adapter errors are classified once, when converted into `AppError`; after
//! that the classification travels upward (and across the front/back hop)
//! unchanged.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{InvalidCoordinates, InvalidPostalCode};

/// Message for a malformed CEP on the `/temp` routes
pub const INVALID_ZIPCODE_MESSAGE: &str = "invalid zipcode.";

/// Message for a CEP the geocoding provider does not know
pub const NOT_FOUND_MESSAGE: &str = "can not find zipcode";

/// Message for a malformed CEP on the `/coordenadas` routes
pub const INVALID_CEP_MESSAGE: &str = "CEP inválido. Use exatamente 8 dígitos numéricos.";

/// Message when the back service has no provider credential
pub const MISSING_TOKEN_MESSAGE: &str = "API token not configured";

/// Geocoding provider errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeocodeError {
    /// The provider answered successfully but had no coordinates for the code
    #[error("can not find zipcode")]
    NotFound,

    #[error("geocoding request failed: {0}")]
    Unavailable(String),

    #[error("unexpected geocoding response status: {0}")]
    Status(u16),
}

/// Weather provider errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeatherError {
    #[error("{0}")]
    InvalidCoordinates(#[from] InvalidCoordinates),

    #[error("weather request failed: {0}")]
    Unavailable(String),

    #[error("unexpected weather response status: {0}")]
    Status(u16),

    #[error("failed to decode weather response: {0}")]
    Decode(String),
}

/// Classified request outcome, used by orchestrators and HTTP handlers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("invalid zipcode.")]
    InvalidInput,

    /// Malformed input on routes that answer 400 instead of 422
    #[error("{0}")]
    BadRequest(String),

    #[error("can not find zipcode")]
    NotFound,

    #[error("{0}")]
    UpstreamUnavailable(String),

    #[error("{0}")]
    Configuration(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidInput => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
            AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<InvalidPostalCode> for AppError {
    fn from(_: InvalidPostalCode) -> Self {
        AppError::InvalidInput
    }
}

impl From<GeocodeError> for AppError {
    fn from(e: GeocodeError) -> Self {
        match e {
            GeocodeError::NotFound => AppError::NotFound,
            e => AppError::UpstreamUnavailable(e.to_string()),
        }
    }
}

impl From<WeatherError> for AppError {
    fn from(e: WeatherError) -> Self {
        AppError::UpstreamUnavailable(e.to_string())
    }
}

/// Error response body for JSON responses
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::UpstreamUnavailable(msg) => {
                tracing::error!("Upstream error: {}", msg);
            }
            AppError::Configuration(msg) => {
                tracing::error!("Configuration error: {}", msg);
            }
            _ => {}
        }

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}
