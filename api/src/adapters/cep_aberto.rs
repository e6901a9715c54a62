//! CEP Aberto geocoding client
//!
//! CEP Aberto answers 200 even for unknown codes, with an empty body or empty
//! latitude/longitude. That emptiness is the only "not found" signal, so a
//! successful status with an undecodable or empty body is `NotFound`, while
//! transport and status failures are `Unavailable`/`Status`.

use async_trait::async_trait;
use reqwest::{header::AUTHORIZATION, Client};
use serde::Deserialize;
use tokio::time::timeout_at;

use cep_weather_core::domain::ports::{Deadline, GeocodeResolver};
use cep_weather_core::domain::{Coordinates, PostalCode};
use cep_weather_core::error::GeocodeError;
use cep_weather_core::upstream::{read_body, MAX_BODY_BYTES};

pub const DEFAULT_CEP_ABERTO_URL: &str = "https://www.cepaberto.com";

pub struct CepAbertoClient {
    http: Client,
    base_url: String,
}

impl CepAbertoClient {
    pub fn new(base_url: String) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn api_url(&self) -> String {
        format!("{}/api/v3/cep", self.base_url)
    }

    async fn fetch(&self, code: &PostalCode, credential: &str) -> Result<Vec<u8>, GeocodeError> {
        let response = self
            .http
            .get(self.api_url())
            .query(&[("cep", code.as_str())])
            .header(AUTHORIZATION, format!("Token {}", credential))
            .send()
            .await
            .map_err(|e| GeocodeError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::Status(status.as_u16()));
        }

        read_body(response, MAX_BODY_BYTES)
            .await
            .map_err(|e| GeocodeError::Unavailable(e.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct CepAbertoResponse {
    latitude: Option<String>,
    longitude: Option<String>,
    cidade: Option<CepAbertoCidade>,
}

#[derive(Debug, Deserialize)]
struct CepAbertoCidade {
    nome: Option<String>,
}

impl From<CepAbertoResponse> for Coordinates {
    fn from(r: CepAbertoResponse) -> Self {
        Coordinates {
            latitude: r.latitude.unwrap_or_default(),
            longitude: r.longitude.unwrap_or_default(),
            city: r.cidade.and_then(|c| c.nome).filter(|n| !n.is_empty()),
        }
    }
}

/// Decode a 2xx body. Anything without both coordinates is `NotFound`.
fn parse_coordinates(body: &[u8]) -> Result<Coordinates, GeocodeError> {
    let parsed: CepAbertoResponse = serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(error = %e, "CEP Aberto body did not decode");
        GeocodeError::NotFound
    })?;

    let coordinates = Coordinates::from(parsed);
    if !coordinates.is_resolved() {
        return Err(GeocodeError::NotFound);
    }
    Ok(coordinates)
}

#[async_trait]
impl GeocodeResolver for CepAbertoClient {
    async fn resolve(
        &self,
        code: &PostalCode,
        credential: &str,
        deadline: Deadline,
    ) -> Result<Coordinates, GeocodeError> {
        let body = timeout_at(deadline, self.fetch(code, credential))
            .await
            .map_err(|_| GeocodeError::Unavailable("deadline exceeded".to_string()))??;

        parse_coordinates(&body)
    }
}
