//! Integration tests for the location and search cycles using wiremock.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use skycast_core::{
    Coordinates, LocationCycle, LocationError, LocationPhase, LocationSource, Notice,
    OpenWeatherProvider, SearchCycle, WeatherProvider,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn delhi_body() -> serde_json::Value {
    serde_json::json!({
        "name": "Delhi",
        "sys": { "country": "IN" },
        "main": { "temp": 31.4, "humidity": 38 },
        "weather": [{ "main": "Haze", "icon": "50d" }],
        "visibility": 4800,
        "wind": { "speed": 3.6 }
    })
}

fn provider(server: &MockServer) -> Arc<dyn WeatherProvider> {
    Arc::new(OpenWeatherProvider::new(server.uri(), "test-key".to_string()).expect("client builds"))
}

#[derive(Debug)]
struct FixedSource(Coordinates);

#[async_trait]
impl LocationSource for FixedSource {
    async fn locate(&self) -> Result<Coordinates, LocationError> {
        Ok(self.0)
    }
}

#[derive(Debug)]
struct DeniedSource;

#[async_trait]
impl LocationSource for DeniedSource {
    async fn locate(&self) -> Result<Coordinates, LocationError> {
        Err(LocationError::PermissionDenied)
    }
}

#[tokio::test]
async fn denied_geolocation_falls_back_to_fixed_coordinates() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("lat", "28.67"))
        .and(query_param("lon", "77.22"))
        .respond_with(ResponseTemplate::new(200).set_body_json(delhi_body()))
        .mount(&mock_server)
        .await;

    let mut cycle = LocationCycle::new(provider(&mock_server), Some(Arc::new(DeniedSource)));
    cycle.activate().await;

    let state = cycle.state();
    assert_eq!(state.notice, Some(Notice::LocationAccessDenied));
    assert_eq!(
        state.coordinates,
        Some(Coordinates {
            latitude: 28.67,
            longitude: 77.22
        })
    );
    assert_eq!(state.phase, LocationPhase::Ready);
    assert!(state.snapshot.is_some());

    // The notice is recorded once at activation; refresh ticks leave it alone.
    cycle.tick().await;
    assert_eq!(cycle.state().notice, Some(Notice::LocationAccessDenied));
}

#[tokio::test]
async fn missing_capability_notices_and_never_fetches() {
    let mock_server = MockServer::start().await;

    let mut cycle = LocationCycle::new(provider(&mock_server), None);
    cycle.activate().await;
    cycle.tick().await;

    let state = cycle.state();
    assert_eq!(state.notice, Some(Notice::GeolocationUnavailable));
    assert_eq!(state.phase, LocationPhase::Loading);
    assert!(state.snapshot.is_none());

    let requests = mock_server.received_requests().await.unwrap();
    assert!(requests.is_empty());
}

#[tokio::test]
async fn failed_refresh_keeps_previous_snapshot_and_ready_phase() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(delhi_body()))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .mount(&mock_server)
        .await;

    let source = FixedSource(Coordinates {
        latitude: 50.1,
        longitude: 8.6,
    });
    let mut cycle = LocationCycle::new(provider(&mock_server), Some(Arc::new(source)));

    cycle.activate().await;
    let snapshot = cycle.state().snapshot.clone().expect("first fetch succeeds");

    cycle.tick().await;

    let state = cycle.state();
    assert!(state.fetch_failed);
    assert_eq!(state.phase, LocationPhase::Ready);
    assert_eq!(state.snapshot.as_ref(), Some(&snapshot));
    assert!(state.notice.is_none());
}

#[tokio::test]
async fn repeated_ticks_with_identical_upstream_data_do_not_drift() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(delhi_body()))
        .mount(&mock_server)
        .await;

    let source = FixedSource(Coordinates {
        latitude: 28.67,
        longitude: 77.22,
    });
    let mut cycle = LocationCycle::new(provider(&mock_server), Some(Arc::new(source)));

    cycle.activate().await;
    let first = cycle.state().snapshot.clone();

    cycle.tick().await;
    let second = cycle.state().snapshot.clone();

    assert!(first.is_some());
    assert_eq!(first, second);
    assert!(!cycle.state().fetch_failed);
}

#[tokio::test]
async fn deactivation_stops_the_refresh_timer() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(delhi_body()))
        .mount(&mock_server)
        .await;

    let source = FixedSource(Coordinates {
        latitude: 28.67,
        longitude: 77.22,
    });
    let cycle = LocationCycle::new(provider(&mock_server), Some(Arc::new(source)));

    let handle = cycle.spawn(Duration::from_millis(25));
    tokio::time::sleep(Duration::from_millis(120)).await;

    let mut state_rx = handle.state();
    handle.deactivate().await;

    let fetched_before = mock_server.received_requests().await.unwrap().len();
    assert!(fetched_before >= 2, "activation plus at least one tick");

    tokio::time::sleep(Duration::from_millis(120)).await;

    let fetched_after = mock_server.received_requests().await.unwrap().len();
    assert_eq!(fetched_before, fetched_after);

    let state = state_rx.borrow_and_update().clone();
    assert_eq!(state.phase, LocationPhase::Ready);
}

#[tokio::test]
async fn startup_search_populates_a_snapshot() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Delhi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(delhi_body()))
        .mount(&mock_server)
        .await;

    let mut cycle = SearchCycle::new(provider(&mock_server), "Delhi");
    cycle.activate().await;

    let state = cycle.state();
    assert_eq!(state.snapshot().map(|s| s.city.as_str()), Some("Delhi"));
    assert!(state.error().is_none());
    assert_eq!(cycle.query(), "");
}

#[tokio::test]
async fn unknown_city_replaces_snapshot_with_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Delhi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(delhi_body()))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Zzqqxx"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "cod": "404",
            "message": "city not found"
        })))
        .mount(&mock_server)
        .await;

    let mut cycle = SearchCycle::new(provider(&mock_server), "Delhi");
    cycle.activate().await;
    assert!(cycle.state().snapshot().is_some());

    cycle.set_query("Zzqqxx");
    cycle.submit().await;

    let state = cycle.state();
    assert!(state.snapshot().is_none());
    let error = state.error().expect("search error recorded");
    assert_eq!(error.attempted_query, "Zzqqxx");
    assert_eq!(error.message, "Not Found");
    assert_eq!(cycle.query(), "");
}

#[tokio::test]
async fn successful_search_clears_a_previous_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Zzqqxx"))
        .respond_with(ResponseTemplate::new(404).set_body_string("{}"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Delhi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(delhi_body()))
        .mount(&mock_server)
        .await;

    let mut cycle = SearchCycle::new(provider(&mock_server), "Delhi");

    cycle.set_query("Zzqqxx");
    cycle.submit().await;
    assert!(cycle.state().error().is_some());
    assert!(cycle.state().snapshot().is_none());

    cycle.set_query("Delhi");
    cycle.click().await;
    assert!(cycle.state().error().is_none());
    assert!(cycle.state().snapshot().is_some());
}

#[tokio::test]
async fn click_with_empty_query_triggers_no_request() {
    let mock_server = MockServer::start().await;

    let mut cycle = SearchCycle::new(provider(&mock_server), "Delhi");
    cycle.click().await;

    assert!(cycle.state().snapshot().is_none());
    assert!(cycle.state().error().is_none());

    let requests = mock_server.received_requests().await.unwrap();
    assert!(requests.is_empty());
}
