use std::env;
use std::time::Duration;

use crate::adapters::DEFAULT_BACKEND_URL;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 6;

/// Upper bound for any configured timeout
const MAX_TIMEOUT_SECS: u64 = 300;

#[derive(Clone)]
pub struct Config {
    pub backend_url: String,
    pub port: u16,
    /// Overall budget for one inbound request, including the hop to the back
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            backend_url: lookup("BACKEND_URL")
                .filter(|u| !u.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string()),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            request_timeout: timeout_secs(&lookup, "REQUEST_TIMEOUT_SECS")
                .unwrap_or(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)),
        }
    }
}

/// Whole seconds, clamped to `MAX_TIMEOUT_SECS`
fn timeout_secs(lookup: impl Fn(&str) -> Option<String>, key: &str) -> Option<Duration> {
    lookup(key)
        .and_then(|s| s.parse::<u64>().ok())
        .map(|secs| Duration::from_secs(secs.min(MAX_TIMEOUT_SECS)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = config_from(&[]);
        assert_eq!(config.backend_url, "http://localhost:8081");
        assert_eq!(config.port, 8080);
        assert_eq!(config.request_timeout, Duration::from_secs(6));
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("BACKEND_URL", "http://api:8081"),
            ("PORT", "3000"),
            ("REQUEST_TIMEOUT_SECS", "2"),
        ]);
        assert_eq!(config.backend_url, "http://api:8081");
        assert_eq!(config.port, 3000);
        assert_eq!(config.request_timeout, Duration::from_secs(2));
    }

    #[test]
    fn blank_backend_falls_back() {
        let config = config_from(&[("BACKEND_URL", ""), ("PORT", "eighty")]);
        assert_eq!(config.backend_url, "http://localhost:8081");
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn oversized_timeout_is_clamped() {
        let max = u64::MAX.to_string();
        let config = config_from(&[("REQUEST_TIMEOUT_SECS", max.as_str())]);
        assert_eq!(config.request_timeout, Duration::from_secs(300));
    }
}
