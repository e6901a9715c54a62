//! Front service orchestrator
//!
//! A validating relay: rejects malformed CEPs before the network hop, then
//! forwards to the back service under the caller's overall deadline and
//! returns whatever the back service classified.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::{admit, run_stage, TemperatureService, DEFAULT_REQUEST_BUDGET};
use crate::domain::ports::{
    deadline_after, NoopStageObserver, Stage, StageObserver, TemperatureRelay,
};
use crate::domain::{Coordinates, Temperature};
use crate::error::AppError;

pub struct FrontOrchestrator {
    relay: Arc<dyn TemperatureRelay>,
    observer: Arc<dyn StageObserver>,
    budget: Duration,
}

impl FrontOrchestrator {
    pub fn new(relay: Arc<dyn TemperatureRelay>) -> Self {
        Self {
            relay,
            observer: Arc::new(NoopStageObserver),
            budget: DEFAULT_REQUEST_BUDGET,
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn StageObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_budget(mut self, budget: Duration) -> Self {
        self.budget = budget;
        self
    }
}

#[async_trait]
impl TemperatureService for FrontOrchestrator {
    async fn temperature(&self, cep: &str) -> Result<Temperature, AppError> {
        let code = admit(self.observer.as_ref(), cep)?;
        let deadline = deadline_after(self.budget);

        run_stage(
            self.observer.as_ref(),
            Stage::Relay,
            self.relay.temperature(&code, deadline),
        )
        .await
        .inspect_err(|e| tracing::warn!(cep = %code, error = %e, "relay failed"))
    }

    async fn coordinates(&self, cep: &str) -> Result<Coordinates, AppError> {
        let code = admit(self.observer.as_ref(), cep)?;
        let deadline = deadline_after(self.budget);

        run_stage(
            self.observer.as_ref(),
            Stage::Relay,
            self.relay.coordinates(&code, deadline),
        )
        .await
        .inspect_err(|e| tracing::warn!(cep = %code, error = %e, "relay failed"))
    }
}
