//! Domain layer
//!
//! Request-scoped value objects and the ports the orchestrators depend on.
//! - `cep`: postal code validation
//! - `coordinates`: geocoding result
//! - `temperature`: unit conversion
//! - `ports`: trait definitions for external lookups and instrumentation

pub mod cep;
pub mod coordinates;
pub mod ports;
pub mod temperature;

pub use cep::{validate, InvalidPostalCode, PostalCode};
pub use coordinates::{Coordinates, InvalidCoordinates};
pub use temperature::Temperature;
