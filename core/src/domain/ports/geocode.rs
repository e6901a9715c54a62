//! Geocoding port

use async_trait::async_trait;

use super::Deadline;
use crate::domain::{Coordinates, PostalCode};
use crate::error::GeocodeError;

/// Resolves a postal code to coordinates and locality.
///
/// Implementations must return `GeocodeError::NotFound` when the provider has
/// no usable coordinates for the code, and only return `Coordinates` for which
/// [`Coordinates::is_resolved`] holds.
#[async_trait]
pub trait GeocodeResolver: Send + Sync {
    async fn resolve(
        &self,
        code: &PostalCode,
        credential: &str,
        deadline: Deadline,
    ) -> Result<Coordinates, GeocodeError>;
}
