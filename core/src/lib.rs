//! Shared core of the CEP weather services
//!
//! Resolves a Brazilian postal code (CEP) to the current temperature by
//! composing a geocoding lookup and a weather lookup. Two binaries are built
//! on top of this crate:
//! - `cep-weather-api`: the back service, which talks to the upstream providers
//! - `cep-weather-gateway`: the front service, a validating relay to the back
//!
//! Uses hexagonal (ports & adapters) architecture: the orchestrators in [`app`]
//! only see the traits in [`domain::ports`]; each binary injects its adapters.

pub mod app;
pub mod domain;
pub mod error;
pub mod http;
pub mod shutdown;
pub mod upstream;

#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;

pub use app::{BackOrchestrator, FrontOrchestrator, TemperatureService};
pub use domain::{Coordinates, PostalCode, Temperature};
pub use error::{AppError, GeocodeError, WeatherError};
