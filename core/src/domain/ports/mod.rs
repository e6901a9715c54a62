//! Domain ports (traits)
//!
//! Port traits define interfaces that the orchestrators require.
//! Adapters in the service binaries provide concrete implementations.

pub mod geocode;
pub mod observer;
pub mod relay;
pub mod weather;

use std::time::Duration;

/// Absolute point in time after which an outbound call is abandoned.
///
/// Adapters race their request against [`tokio::time::timeout_at`], which drops
/// (and so cancels) the in-flight future once the deadline passes.
pub type Deadline = tokio::time::Instant;

/// Stand-in for "no deadline" when a budget does not fit in an `Instant`
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

/// The deadline `budget` from now, saturating instead of overflowing
pub fn deadline_after(budget: Duration) -> Deadline {
    let now = tokio::time::Instant::now();
    now.checked_add(budget)
        .or_else(|| now.checked_add(FAR_FUTURE))
        .unwrap_or(now)
}

pub use geocode::GeocodeResolver;
pub use observer::{LogStageObserver, NoopStageObserver, Stage, StageObserver, StageOutcome};
pub use relay::TemperatureRelay;
pub use weather::WeatherResolver;
