use std::env;
use std::time::Duration;

use crate::adapters::{DEFAULT_CEP_ABERTO_URL, DEFAULT_OPEN_METEO_URL, DEFAULT_WEATHER_CEILING};

const DEFAULT_PORT: u16 = 8081;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 6;

/// Upper bound for any configured timeout
const MAX_TIMEOUT_SECS: u64 = 300;

#[derive(Clone)]
pub struct Config {
    /// CEP Aberto token. Absence is reported per request as a 500.
    pub api_token: Option<String>,
    pub geocode_base_url: String,
    pub weather_base_url: String,
    pub port: u16,
    /// Overall budget for one inbound request
    pub request_timeout: Duration,
    /// Ceiling for the weather call alone
    pub weather_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            api_token: lookup("API_TOKEN").filter(|t| !t.trim().is_empty()),
            geocode_base_url: lookup("GEOCODE_BASE_URL")
                .unwrap_or_else(|| DEFAULT_CEP_ABERTO_URL.to_string()),
            weather_base_url: lookup("WEATHER_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPEN_METEO_URL.to_string()),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            request_timeout: timeout_secs(&lookup, "REQUEST_TIMEOUT_SECS")
                .unwrap_or(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)),
            weather_timeout: timeout_secs(&lookup, "WEATHER_TIMEOUT_SECS")
                .unwrap_or(DEFAULT_WEATHER_CEILING),
        }
    }
}

/// Whole seconds, clamped to `MAX_TIMEOUT_SECS`
fn timeout_secs(lookup: impl Fn(&str) -> Option<String>, key: &str) -> Option<Duration> {
    lookup(key)
        .and_then(|s| s.parse::<u64>().ok())
        .map(|secs| Duration::from_secs(secs.min(MAX_TIMEOUT_SECS)))
}
