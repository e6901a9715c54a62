//! Stub implementations of port traits
//!
//! Each stub returns a scripted result, optionally after a delay, and records
//! how it was called so tests can assert on sequencing and deadlines. Delays
//! honour the deadline the same way the real adapters do.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::ports::{
    Deadline, GeocodeResolver, Stage, StageObserver, StageOutcome, TemperatureRelay,
    WeatherResolver,
};
use crate::domain::{Coordinates, PostalCode, Temperature};
use crate::error::{AppError, GeocodeError, WeatherError};

/// Sleep for `delay`, or fail once `deadline` passes
async fn wait(delay: Option<Duration>, deadline: Deadline) -> Result<(), ()> {
    match delay {
        Some(delay) => tokio::time::timeout_at(deadline, tokio::time::sleep(delay))
            .await
            .map_err(|_| ()),
        None => Ok(()),
    }
}

// ============================================================================
// Geocoder
// ============================================================================

pub struct StubGeocoder {
    result: Result<Coordinates, GeocodeError>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    last_code: Mutex<Option<String>>,
    last_credential: Mutex<Option<String>>,
    last_deadline: Mutex<Option<Deadline>>,
}

impl StubGeocoder {
    fn with_result(result: Result<Coordinates, GeocodeError>) -> Self {
        Self {
            result,
            delay: None,
            calls: AtomicUsize::new(0),
            last_code: Mutex::new(None),
            last_credential: Mutex::new(None),
            last_deadline: Mutex::new(None),
        }
    }

    pub fn found(coordinates: Coordinates) -> Self {
        Self::with_result(Ok(coordinates))
    }

    pub fn failing(error: GeocodeError) -> Self {
        Self::with_result(Err(error))
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_code(&self) -> Option<String> {
        self.last_code.lock().unwrap().clone()
    }

    pub fn last_credential(&self) -> Option<String> {
        self.last_credential.lock().unwrap().clone()
    }

    pub fn last_deadline(&self) -> Option<Deadline> {
        *self.last_deadline.lock().unwrap()
    }
}

#[async_trait]
impl GeocodeResolver for StubGeocoder {
    async fn resolve(
        &self,
        code: &PostalCode,
        credential: &str,
        deadline: Deadline,
    ) -> Result<Coordinates, GeocodeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_code.lock().unwrap() = Some(code.as_str().to_string());
        *self.last_credential.lock().unwrap() = Some(credential.to_string());
        *self.last_deadline.lock().unwrap() = Some(deadline);

        wait(self.delay, deadline)
            .await
            .map_err(|_| GeocodeError::Unavailable("deadline exceeded".to_string()))?;
        self.result.clone()
    }
}

// ============================================================================
// Weather
// ============================================================================

pub struct StubWeather {
    result: Result<f64, WeatherError>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    last_deadline: Mutex<Option<Deadline>>,
}

impl StubWeather {
    fn with_result(result: Result<f64, WeatherError>) -> Self {
        Self {
            result,
            delay: None,
            calls: AtomicUsize::new(0),
            last_deadline: Mutex::new(None),
        }
    }

    pub fn reading(celsius: f64) -> Self {
        Self::with_result(Ok(celsius))
    }

    pub fn failing(error: WeatherError) -> Self {
        Self::with_result(Err(error))
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_deadline(&self) -> Option<Deadline> {
        *self.last_deadline.lock().unwrap()
    }
}

#[async_trait]
impl WeatherResolver for StubWeather {
    async fn resolve(
        &self,
        _coordinates: &Coordinates,
        deadline: Deadline,
    ) -> Result<f64, WeatherError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_deadline.lock().unwrap() = Some(deadline);

        wait(self.delay, deadline)
            .await
            .map_err(|_| WeatherError::Unavailable("deadline exceeded".to_string()))?;
        self.result.clone()
    }
}

// ============================================================================
// Relay
// ============================================================================

pub struct StubRelay {
    temperature: Result<Temperature, AppError>,
    coordinates: Result<Coordinates, AppError>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    last_code: Mutex<Option<String>>,
    last_deadline: Mutex<Option<Deadline>>,
}

impl StubRelay {
    fn with_results(
        temperature: Result<Temperature, AppError>,
        coordinates: Result<Coordinates, AppError>,
    ) -> Self {
        Self {
            temperature,
            coordinates,
            delay: None,
            calls: AtomicUsize::new(0),
            last_code: Mutex::new(None),
            last_deadline: Mutex::new(None),
        }
    }

    pub fn temperature(temperature: Temperature) -> Self {
        Self::with_results(Ok(temperature), Err(AppError::NotFound))
    }

    pub fn coordinates(coordinates: Coordinates) -> Self {
        Self::with_results(Err(AppError::NotFound), Ok(coordinates))
    }

    pub fn failing(error: AppError) -> Self {
        Self::with_results(Err(error.clone()), Err(error))
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_code(&self) -> Option<String> {
        self.last_code.lock().unwrap().clone()
    }

    pub fn last_deadline(&self) -> Option<Deadline> {
        *self.last_deadline.lock().unwrap()
    }

    async fn record(&self, code: &PostalCode, deadline: Deadline) -> Result<(), AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_code.lock().unwrap() = Some(code.as_str().to_string());
        *self.last_deadline.lock().unwrap() = Some(deadline);

        wait(self.delay, deadline)
            .await
            .map_err(|_| AppError::UpstreamUnavailable("deadline exceeded".to_string()))
    }
}

#[async_trait]
impl TemperatureRelay for StubRelay {
    async fn temperature(
        &self,
        code: &PostalCode,
        deadline: Deadline,
    ) -> Result<Temperature, AppError> {
        self.record(code, deadline).await?;
        self.temperature.clone()
    }

    async fn coordinates(
        &self,
        code: &PostalCode,
        deadline: Deadline,
    ) -> Result<Coordinates, AppError> {
        self.record(code, deadline).await?;
        self.coordinates.clone()
    }
}

// ============================================================================
// Observer
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageEvent {
    Started(Stage),
    Finished(Stage, StageOutcome),
}

#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<StageEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<StageEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn saw(&self, stage: Stage) -> bool {
        self.events().iter().any(|e| match e {
            StageEvent::Started(s) | StageEvent::Finished(s, _) => *s == stage,
        })
    }
}

impl StageObserver for RecordingObserver {
    fn stage_started(&self, stage: Stage) {
        self.events.lock().unwrap().push(StageEvent::Started(stage));
    }

    fn stage_finished(&self, stage: Stage, outcome: StageOutcome) {
        self.events
            .lock()
            .unwrap()
            .push(StageEvent::Finished(stage, outcome));
    }
}
