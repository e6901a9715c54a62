//! Open-Meteo weather client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tokio::time::timeout_at;

use cep_weather_core::domain::ports::{deadline_after, Deadline, WeatherResolver};
use cep_weather_core::domain::Coordinates;
use cep_weather_core::error::WeatherError;
use cep_weather_core::upstream::{read_body, MAX_BODY_BYTES};

pub const DEFAULT_OPEN_METEO_URL: &str = "https://api.open-meteo.com";

/// Ceiling for the weather call, applied even when the caller's budget is larger
pub const DEFAULT_WEATHER_CEILING: Duration = Duration::from_secs(3);

pub struct OpenMeteoClient {
    http: Client,
    base_url: String,
    ceiling: Duration,
}

impl OpenMeteoClient {
    pub fn new(base_url: String) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            ceiling: DEFAULT_WEATHER_CEILING,
        }
    }

    pub fn with_ceiling(mut self, ceiling: Duration) -> Self {
        self.ceiling = ceiling;
        self
    }

    fn api_url(&self) -> String {
        format!("{}/v1/forecast", self.base_url)
    }

    /// The tighter of the caller's deadline and our own ceiling
    fn effective_deadline(&self, deadline: Deadline) -> Deadline {
        deadline.min(deadline_after(self.ceiling))
    }

    async fn fetch(&self, latitude: f64, longitude: f64) -> Result<Vec<u8>, WeatherError> {
        let response = self
            .http
            .get(self.api_url())
            .query(&[
                ("latitude", format!("{:.4}", latitude)),
                ("longitude", format!("{:.4}", longitude)),
                ("current_weather", "true".to_string()),
            ])
            .send()
            .await
            .map_err(|e| WeatherError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Status(status.as_u16()));
        }

        read_body(response, MAX_BODY_BYTES)
            .await
            .map_err(|e| WeatherError::Unavailable(e.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct OpenMeteoResponse {
    current_weather: OpenMeteoCurrent,
}

#[derive(Debug, Deserialize)]
struct OpenMeteoCurrent {
    temperature: f64,
}

fn parse_temperature(body: &[u8]) -> Result<f64, WeatherError> {
    let parsed: OpenMeteoResponse =
        serde_json::from_slice(body).map_err(|e| WeatherError::Decode(e.to_string()))?;
    Ok(parsed.current_weather.temperature)
}

#[async_trait]
impl WeatherResolver for OpenMeteoClient {
    async fn resolve(
        &self,
        coordinates: &Coordinates,
        deadline: Deadline,
    ) -> Result<f64, WeatherError> {
        let (latitude, longitude) = coordinates.parse()?;
        let deadline = self.effective_deadline(deadline);

        let body = timeout_at(deadline, self.fetch(latitude, longitude))
            .await
            .map_err(|_| WeatherError::Unavailable("deadline exceeded".to_string()))??;

        parse_temperature(&body)
    }
}
