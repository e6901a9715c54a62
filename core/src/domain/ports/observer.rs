//! Stage instrumentation port
//!
//! Each orchestrator stage is bracketed by `stage_started`/`stage_finished` so a
//! tracing backend can open and close a span around it. The orchestrators do
//! not depend on any particular backend.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Validate,
    Geocode,
    Weather,
    Convert,
    /// Front-to-back network hop
    Relay,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Validate => "validate",
            Stage::Geocode => "geocode",
            Stage::Weather => "weather",
            Stage::Convert => "convert",
            Stage::Relay => "relay",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageOutcome {
    Ok,
    Failed,
}

impl StageOutcome {
    pub fn of<T, E>(result: &Result<T, E>) -> Self {
        if result.is_ok() {
            StageOutcome::Ok
        } else {
            StageOutcome::Failed
        }
    }
}

pub trait StageObserver: Send + Sync {
    fn stage_started(&self, stage: Stage);

    fn stage_finished(&self, stage: Stage, outcome: StageOutcome);
}

/// Observer that drops every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopStageObserver;

impl StageObserver for NoopStageObserver {
    fn stage_started(&self, _stage: Stage) {}

    fn stage_finished(&self, _stage: Stage, _outcome: StageOutcome) {}
}

/// Observer that reports stage boundaries as `tracing` events.
///
/// Events are emitted inside the stage span opened by the orchestrator, so
/// they carry the service and stage names.
#[derive(Debug, Clone)]
pub struct LogStageObserver {
    service: &'static str,
}

impl LogStageObserver {
    pub fn new(service: &'static str) -> Self {
        Self { service }
    }
}

impl StageObserver for LogStageObserver {
    fn stage_started(&self, stage: Stage) {
        tracing::debug!(service = self.service, stage = %stage, "stage started");
    }

    fn stage_finished(&self, stage: Stage, outcome: StageOutcome) {
        match outcome {
            StageOutcome::Ok => {
                tracing::debug!(service = self.service, stage = %stage, "stage finished")
            }
            StageOutcome::Failed => {
                tracing::warn!(service = self.service, stage = %stage, "stage failed")
            }
        }
    }
}
