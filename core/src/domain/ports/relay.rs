//! Front-to-back relay port

use async_trait::async_trait;

use super::Deadline;
use crate::domain::{Coordinates, PostalCode, Temperature};
use crate::error::AppError;

/// Forwards a validated postal code to the back service.
///
/// The back service has already classified its failures, so implementations
/// return [`AppError`] directly and the front passes it through unchanged.
#[async_trait]
pub trait TemperatureRelay: Send + Sync {
    async fn temperature(&self, code: &PostalCode, deadline: Deadline)
        -> Result<Temperature, AppError>;

    async fn coordinates(&self, code: &PostalCode, deadline: Deadline)
        -> Result<Coordinates, AppError>;
}
