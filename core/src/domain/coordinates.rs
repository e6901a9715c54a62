//! Geocoding result

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidCoordinates {
    #[error("invalid latitude: {0:?}")]
    Latitude(String),

    #[error("invalid longitude: {0:?}")]
    Longitude(String),
}

/// Latitude/longitude as the geocoding provider returns them (decimal strings),
/// plus the locality name when the provider reports one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: String,
    pub longitude: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

impl Coordinates {
    pub fn new(
        latitude: impl Into<String>,
        longitude: impl Into<String>,
        city: Option<String>,
    ) -> Self {
        Self {
            latitude: latitude.into(),
            longitude: longitude.into(),
            city,
        }
    }

    /// Both fields are present. Empty fields mean "not found", never zero.
    pub fn is_resolved(&self) -> bool {
        !self.latitude.is_empty() && !self.longitude.is_empty()
    }

    /// Parse both fields as `f64` (latitude, longitude). No whitespace allowed.
    pub fn parse(&self) -> Result<(f64, f64), InvalidCoordinates> {
        let latitude = self
            .latitude
            .parse::<f64>()
            .map_err(|_| InvalidCoordinates::Latitude(self.latitude.clone()))?;
        let longitude = self
            .longitude
            .parse::<f64>()
            .map_err(|_| InvalidCoordinates::Longitude(self.longitude.clone()))?;

        if !latitude.is_finite() {
            return Err(InvalidCoordinates::Latitude(self.latitude.clone()));
        }
        if !longitude.is_finite() {
            return Err(InvalidCoordinates::Longitude(self.longitude.clone()));
        }

        Ok((latitude, longitude))
    }
}
