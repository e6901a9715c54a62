//! Weather port

use async_trait::async_trait;

use super::Deadline;
use crate::domain::Coordinates;
use crate::error::WeatherError;

/// Resolves coordinates to the current temperature in Celsius.
///
/// The returned reading is raw: no rounding, no clamping.
#[async_trait]
pub trait WeatherResolver: Send + Sync {
    async fn resolve(&self, coordinates: &Coordinates, deadline: Deadline)
        -> Result<f64, WeatherError>;
}
