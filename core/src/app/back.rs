//! Back service orchestrator
//!
//! Per request: Validate -> Geocode -> Weather -> Convert -> Respond.
//! Single attempt per stage, no retries; the first failure is the response.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::{admit, run_stage, TemperatureService, DEFAULT_REQUEST_BUDGET};
use crate::domain::ports::{
    deadline_after, Deadline, GeocodeResolver, NoopStageObserver, Stage, StageObserver,
    StageOutcome, WeatherResolver,
};
use crate::domain::{Coordinates, PostalCode, Temperature};
use crate::error::{AppError, MISSING_TOKEN_MESSAGE};

/// Orchestrates the geocoding and weather lookups for the back service
pub struct BackOrchestrator {
    geocoder: Arc<dyn GeocodeResolver>,
    weather: Arc<dyn WeatherResolver>,
    observer: Arc<dyn StageObserver>,
    credential: Option<String>,
    budget: Duration,
}

impl BackOrchestrator {
    pub fn new(
        geocoder: Arc<dyn GeocodeResolver>,
        weather: Arc<dyn WeatherResolver>,
        credential: Option<String>,
    ) -> Self {
        Self {
            geocoder,
            weather,
            observer: Arc::new(NoopStageObserver),
            credential: credential.filter(|c| !c.is_empty()),
            budget: DEFAULT_REQUEST_BUDGET,
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn StageObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Overall budget for one inbound request
    pub fn with_budget(mut self, budget: Duration) -> Self {
        self.budget = budget;
        self
    }

    /// Missing credential is a per-request 500, not a startup crash
    fn credential(&self) -> Result<&str, AppError> {
        self.credential
            .as_deref()
            .ok_or_else(|| AppError::Configuration(MISSING_TOKEN_MESSAGE.to_string()))
    }

    async fn geocode(&self, code: &PostalCode, deadline: Deadline) -> Result<Coordinates, AppError> {
        let credential = self.credential()?;
        let coordinates = run_stage(
            self.observer.as_ref(),
            Stage::Geocode,
            self.geocoder.resolve(code, credential, deadline),
        )
        .await
        .map_err(|e| {
            tracing::warn!(cep = %code, error = %e, "geocoding failed");
            AppError::from(e)
        })?;

        tracing::debug!(
            cep = %code,
            latitude = %coordinates.latitude,
            longitude = %coordinates.longitude,
            "geocoded"
        );
        Ok(coordinates)
    }
}

#[async_trait]
impl TemperatureService for BackOrchestrator {
    async fn temperature(&self, cep: &str) -> Result<Temperature, AppError> {
        let deadline = deadline_after(self.budget);
        let code = admit(self.observer.as_ref(), cep)?;
        let coordinates = self.geocode(&code, deadline).await?;

        let celsius = run_stage(
            self.observer.as_ref(),
            Stage::Weather,
            self.weather.resolve(&coordinates, deadline),
        )
        .await
        .map_err(|e| {
            tracing::warn!(cep = %code, error = %e, "weather lookup failed");
            AppError::from(e)
        })?;

        self.observer.stage_started(Stage::Convert);
        let temperature = Temperature::from_celsius(celsius, coordinates.city);
        self.observer.stage_finished(Stage::Convert, StageOutcome::Ok);

        tracing::info!(cep = %code, temp_c = temperature.celsius(), "temperature resolved");
        Ok(temperature)
    }

    async fn coordinates(&self, cep: &str) -> Result<Coordinates, AppError> {
        let deadline = deadline_after(self.budget);
        let code = admit(self.observer.as_ref(), cep)?;
        self.geocode(&code, deadline).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    use crate::error::{GeocodeError, WeatherError};
    use crate::test_utils::{
        sao_paulo, RecordingObserver, StageEvent, StubGeocoder, StubWeather, TEST_TOKEN,
    };

    fn create_orchestrator(
        geocoder: Arc<StubGeocoder>,
        weather: Arc<StubWeather>,
    ) -> BackOrchestrator {
        BackOrchestrator::new(geocoder, weather, Some(TEST_TOKEN.to_string()))
    }

    #[tokio::test]
    async fn temperature_success() {
        let geocoder = Arc::new(StubGeocoder::found(sao_paulo()));
        let weather = Arc::new(StubWeather::reading(25.0));
        let service = create_orchestrator(geocoder.clone(), weather.clone());

        let temp = service.temperature("41830460").await.unwrap();

        assert_eq!(temp.celsius(), 25.0);
        assert_eq!(temp.fahrenheit(), 77.0);
        assert_eq!(temp.kelvin(), 298.0);
        assert_eq!(temp.city(), Some("São Paulo"));
        assert_eq!(geocoder.calls(), 1);
        assert_eq!(weather.calls(), 1);
        assert_eq!(geocoder.last_code().as_deref(), Some("41830460"));
        assert_eq!(geocoder.last_credential().as_deref(), Some(TEST_TOKEN));
    }

    #[tokio::test]
    async fn temperature_without_city() {
        let geocoder = Arc::new(StubGeocoder::found(Coordinates::new(
            "-23.5505", "-46.6333", None,
        )));
        let service = create_orchestrator(geocoder, Arc::new(StubWeather::reading(10.0)));

        let temp = service.temperature("01001000").await.unwrap();
        assert_eq!(temp.city(), None);
        assert_eq!(temp.kelvin(), 283.0);
    }

    #[tokio::test]
    async fn invalid_cep_makes_no_upstream_calls() {
        let geocoder = Arc::new(StubGeocoder::found(sao_paulo()));
        let weather = Arc::new(StubWeather::reading(25.0));
        let service = create_orchestrator(geocoder.clone(), weather.clone());

        let err = service.temperature("123").await.unwrap_err();

        assert_eq!(err, AppError::InvalidInput);
        assert_eq!(geocoder.calls(), 0);
        assert_eq!(weather.calls(), 0);
    }

    #[tokio::test]
    async fn not_found_short_circuits_weather() {
        let geocoder = Arc::new(StubGeocoder::failing(GeocodeError::NotFound));
        let weather = Arc::new(StubWeather::reading(25.0));
        let service = create_orchestrator(geocoder.clone(), weather.clone());

        let err = service.temperature("00000000").await.unwrap_err();

        assert_eq!(err, AppError::NotFound);
        assert_eq!(geocoder.calls(), 1);
        assert_eq!(weather.calls(), 0);
    }

    #[tokio::test]
    async fn geocode_outage_is_upstream_unavailable() {
        let geocoder = Arc::new(StubGeocoder::failing(GeocodeError::Status(503)));
        let weather = Arc::new(StubWeather::reading(25.0));
        let service = create_orchestrator(geocoder, weather.clone());

        let err = service.temperature("41830460").await.unwrap_err();

        assert!(matches!(err, AppError::UpstreamUnavailable(_)));
        assert_eq!(weather.calls(), 0);
    }

    #[tokio::test]
    async fn weather_failure_is_upstream_unavailable() {
        let weather = Arc::new(StubWeather::failing(WeatherError::Status(500)));
        let service = create_orchestrator(Arc::new(StubGeocoder::found(sao_paulo())), weather);

        let err = service.temperature("41830460").await.unwrap_err();

        assert_eq!(
            err,
            AppError::UpstreamUnavailable("unexpected weather response status: 500".into())
        );
    }

    #[tokio::test]
    async fn weather_deadline_is_upstream_unavailable() {
        let weather = Arc::new(StubWeather::reading(25.0).with_delay(Duration::from_secs(5)));
        let service = create_orchestrator(Arc::new(StubGeocoder::found(sao_paulo())), weather)
            .with_budget(Duration::from_millis(50));

        let started = std::time::Instant::now();
        let err = service.temperature("41830460").await.unwrap_err();

        assert!(matches!(err, AppError::UpstreamUnavailable(_)));
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn geocode_and_weather_share_request_deadline() {
        let geocoder = Arc::new(StubGeocoder::found(sao_paulo()));
        let weather = Arc::new(StubWeather::reading(25.0));
        let service = create_orchestrator(geocoder.clone(), weather.clone());

        let before = Instant::now();
        service.temperature("41830460").await.unwrap();

        let geocode_deadline = geocoder.last_deadline().unwrap();
        let weather_deadline = weather.last_deadline().unwrap();
        assert_eq!(geocode_deadline, weather_deadline);
        assert!(geocode_deadline >= before + DEFAULT_REQUEST_BUDGET);
    }

    #[tokio::test]
    async fn oversized_budget_does_not_panic() {
        let service = create_orchestrator(
            Arc::new(StubGeocoder::found(sao_paulo())),
            Arc::new(StubWeather::reading(25.0)),
        )
        .with_budget(Duration::from_secs(u64::MAX));

        let handle = tokio::spawn(async move { service.temperature("41830460").await });
        let temp = handle.await.unwrap().unwrap();

        assert_eq!(temp.kelvin(), 298.0);
    }

    #[tokio::test]
    async fn missing_credential_is_configuration_error() {
        let geocoder = Arc::new(StubGeocoder::found(sao_paulo()));
        let service = BackOrchestrator::new(
            geocoder.clone(),
            Arc::new(StubWeather::reading(25.0)),
            None,
        );

        let err = service.temperature("41830460").await.unwrap_err();

        assert_eq!(err, AppError::Configuration(MISSING_TOKEN_MESSAGE.to_string()));
        assert_eq!(geocoder.calls(), 0);
    }

    #[tokio::test]
    async fn empty_credential_counts_as_missing() {
        let service = BackOrchestrator::new(
            Arc::new(StubGeocoder::found(sao_paulo())),
            Arc::new(StubWeather::reading(25.0)),
            Some(String::new()),
        );

        let err = service.coordinates("41830460").await.unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[tokio::test]
    async fn validation_runs_before_credential_check() {
        let service = BackOrchestrator::new(
            Arc::new(StubGeocoder::found(sao_paulo())),
            Arc::new(StubWeather::reading(25.0)),
            None,
        );

        let err = service.temperature("abc").await.unwrap_err();
        assert_eq!(err, AppError::InvalidInput);
    }

    #[tokio::test]
    async fn coordinates_skip_weather() {
        let weather = Arc::new(StubWeather::reading(25.0));
        let service = create_orchestrator(Arc::new(StubGeocoder::found(sao_paulo())), weather.clone());

        let coords = service.coordinates("41830460").await.unwrap();

        assert_eq!(coords, sao_paulo());
        assert_eq!(weather.calls(), 0);
    }

    #[tokio::test]
    async fn observer_sees_every_stage_in_order() {
        let observer = Arc::new(RecordingObserver::new());
        let service = create_orchestrator(
            Arc::new(StubGeocoder::found(sao_paulo())),
            Arc::new(StubWeather::reading(25.0)),
        )
        .with_observer(observer.clone());

        service.temperature("41830460").await.unwrap();

        assert_eq!(
            observer.events(),
            vec![
                StageEvent::Started(Stage::Validate),
                StageEvent::Finished(Stage::Validate, StageOutcome::Ok),
                StageEvent::Started(Stage::Geocode),
                StageEvent::Finished(Stage::Geocode, StageOutcome::Ok),
                StageEvent::Started(Stage::Weather),
                StageEvent::Finished(Stage::Weather, StageOutcome::Ok),
                StageEvent::Started(Stage::Convert),
                StageEvent::Finished(Stage::Convert, StageOutcome::Ok),
            ]
        );
    }

    #[tokio::test]
    async fn observer_stops_at_failed_stage() {
        let observer = Arc::new(RecordingObserver::new());
        let service = create_orchestrator(
            Arc::new(StubGeocoder::failing(GeocodeError::NotFound)),
            Arc::new(StubWeather::reading(25.0)),
        )
        .with_observer(observer.clone());

        service.temperature("00000000").await.unwrap_err();

        assert_eq!(
            observer.events().last(),
            Some(&StageEvent::Finished(Stage::Geocode, StageOutcome::Failed))
        );
        assert!(!observer.saw(Stage::Weather));
    }
}
