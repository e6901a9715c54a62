//! HTTP client for the back service
//!
//! The back service has already classified its failures into a status and an
//! `{"error": ...}` body. This client maps them back onto [`AppError`] so the
//! front answers with the same status and message.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tokio::time::timeout_at;

use cep_weather_core::domain::ports::{Deadline, TemperatureRelay};
use cep_weather_core::domain::{Coordinates, PostalCode, Temperature};
use cep_weather_core::error::{AppError, ErrorResponse, INVALID_CEP_MESSAGE};
use cep_weather_core::upstream::{read_body, MAX_BODY_BYTES};

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8081";

pub struct BackendClient {
    http: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: String) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, route: &str, code: &PostalCode) -> String {
        format!("{}/{}/{}", self.base_url, route, code)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, AppError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::UpstreamUnavailable(format!("backend request failed: {}", e)))?;

        let status = response.status();
        let body = read_body(response, MAX_BODY_BYTES)
            .await
            .map_err(|e| AppError::UpstreamUnavailable(format!("backend request failed: {}", e)))?;

        if !status.is_success() {
            return Err(classify(status, &body));
        }

        serde_json::from_slice(&body).map_err(|e| {
            AppError::UpstreamUnavailable(format!("failed to decode backend response: {}", e))
        })
    }

    async fn get_within<T: DeserializeOwned>(
        &self,
        url: String,
        deadline: Deadline,
    ) -> Result<T, AppError> {
        tracing::debug!(%url, "relaying to backend");
        timeout_at(deadline, self.get_json(&url))
            .await
            .map_err(|_| AppError::UpstreamUnavailable("backend request timed out".to_string()))?
    }
}

/// Map a non-2xx reply from the back service onto the matching [`AppError`]
fn classify(status: StatusCode, body: &[u8]) -> AppError {
    let message = serde_json::from_slice::<ErrorResponse>(body)
        .ok()
        .map(|r| r.error);

    match status {
        StatusCode::UNPROCESSABLE_ENTITY => AppError::InvalidInput,
        StatusCode::BAD_REQUEST => {
            AppError::BadRequest(message.unwrap_or_else(|| INVALID_CEP_MESSAGE.to_string()))
        }
        StatusCode::NOT_FOUND => AppError::NotFound,
        StatusCode::INTERNAL_SERVER_ERROR => AppError::Configuration(
            message.unwrap_or_else(|| "backend internal error".to_string()),
        ),
        other => AppError::UpstreamUnavailable(message.unwrap_or_else(|| {
            format!("unexpected backend response status: {}", other.as_u16())
        })),
    }
}

#[async_trait]
impl TemperatureRelay for BackendClient {
    async fn temperature(
        &self,
        code: &PostalCode,
        deadline: Deadline,
    ) -> Result<Temperature, AppError> {
        self.get_within(self.url("temp", code), deadline).await
    }

    async fn coordinates(
        &self,
        code: &PostalCode,
        deadline: Deadline,
    ) -> Result<Coordinates, AppError> {
        self.get_within(self.url("coordenadas", code), deadline).await
    }
}
