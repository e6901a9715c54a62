//! Adapters layer
//!
//! Reqwest implementation of the relay port, towards the back service.

pub mod backend;

pub use backend::{BackendClient, DEFAULT_BACKEND_URL};
