//! Application layer
//!
//! Request orchestration. Both services expose the same [`TemperatureService`]
//! surface; they differ only in the collaborators injected at construction.
//! - `back`: validate, geocode, weather, convert
//! - `front`: validate, relay to the back service

pub mod back;
pub mod front;

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use tracing::Instrument;

use crate::domain::ports::{Stage, StageObserver, StageOutcome};
use crate::domain::{Coordinates, PostalCode, Temperature};
use crate::error::AppError;

pub use back::BackOrchestrator;
pub use front::FrontOrchestrator;

/// Default inbound budget for one request, covering every outbound call
pub const DEFAULT_REQUEST_BUDGET: Duration = Duration::from_secs(6);

/// Entry point used by the HTTP handlers
#[async_trait]
pub trait TemperatureService: Send + Sync {
    /// Resolve a raw (unvalidated) CEP to a temperature
    async fn temperature(&self, cep: &str) -> Result<Temperature, AppError>;

    /// Resolve a raw (unvalidated) CEP to its coordinates
    async fn coordinates(&self, cep: &str) -> Result<Coordinates, AppError>;
}

/// Validation stage, the only admission gate before any network call
pub(crate) fn admit(observer: &dyn StageObserver, cep: &str) -> Result<PostalCode, AppError> {
    observer.stage_started(Stage::Validate);
    let result = PostalCode::parse(cep).map_err(AppError::from);
    observer.stage_finished(Stage::Validate, StageOutcome::of(&result));
    if result.is_err() {
        tracing::debug!(cep, "rejected malformed CEP");
    }
    result
}

/// Run an async stage inside its own span, bracketed by the observer
pub(crate) async fn run_stage<T, E, F>(
    observer: &dyn StageObserver,
    stage: Stage,
    future: F,
) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
{
    let span = tracing::info_span!("stage", name = stage.as_str());
    async {
        observer.stage_started(stage);
        let result = future.await;
        observer.stage_finished(stage, StageOutcome::of(&result));
        result
    }
    .instrument(span)
    .await
}
