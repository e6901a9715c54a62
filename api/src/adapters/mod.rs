//! Adapters layer
//!
//! Reqwest implementations of the geocoding and weather ports.

pub mod cep_aberto;
pub mod open_meteo;

pub use cep_aberto::{CepAbertoClient, DEFAULT_CEP_ABERTO_URL};
pub use open_meteo::{OpenMeteoClient, DEFAULT_OPEN_METEO_URL, DEFAULT_WEATHER_CEILING};
