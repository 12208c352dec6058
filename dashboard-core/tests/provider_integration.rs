use chrono::NaiveDate;
use dashboard_core::{
    CurrentWeatherProvider, FailureKind, ForecastCondition, ForecastProvider, FetchError,
    provider::{forecast::ForecastBackend, openweather::OpenWeatherProvider},
};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, method, path, query_param},
};

// ============================================================================
// Helper Functions
// ============================================================================

fn london_body() -> serde_json::Value {
    json!({
        "name": "London",
        "main": {"temp": 14.6, "humidity": 80, "pressure": 1012},
        "weather": [{"id": 500, "main": "Rain", "description": "light rain"}],
        "wind": {"speed": 3.1, "deg": 240},
        "visibility": 10000
    })
}

fn may_first() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date")
}

// ============================================================================
// Current weather
// ============================================================================

#[tokio::test]
async fn current_weather_sends_query_units_and_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "London"))
        .and(query_param("units", "metric"))
        .and(query_param("appid", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(london_body()))
        .expect(1)
        .mount(&server)
        .await;

    let provider = OpenWeatherProvider::new("test-key".into(), format!("{}/weather", server.uri()));
    let current = provider.fetch_current("London").await.expect("fetch succeeds");

    assert_eq!(current.location_name, "London");
    assert_eq!(current.temperature_c, 14.6);
    assert_eq!(current.humidity_pct, 80);
    assert_eq!(current.wind_speed_mps, 3.1);
    assert_eq!(current.condition_label, "Rain");
    assert_eq!(current.condition_description, "light rain");
}

#[tokio::test]
async fn current_weather_is_idempotent_for_unchanged_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(london_body()))
        .expect(2)
        .mount(&server)
        .await;

    let provider = OpenWeatherProvider::new("k".into(), format!("{}/weather", server.uri()));
    let first = provider.fetch_current("London").await.expect("first fetch");
    let second = provider.fetch_current("London").await.expect("second fetch");

    assert_eq!(first, second);
}

#[tokio::test]
async fn current_weather_error_status_is_a_shape_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"cod": "404", "message": "city not found"})),
        )
        .mount(&server)
        .await;

    let provider = OpenWeatherProvider::new("k".into(), format!("{}/weather", server.uri()));
    let err = provider.fetch_current("Atlantis").await.unwrap_err();

    assert_eq!(err.kind(), FailureKind::ResponseShape);
    assert_eq!(err.provider(), "openweather");
    assert!(err.to_string().contains("city not found"));
}

#[tokio::test]
async fn current_weather_malformed_body_is_a_shape_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let provider = OpenWeatherProvider::new("k".into(), server.uri());
    let err = provider.fetch_current("London").await.unwrap_err();

    assert!(matches!(err, FetchError::ResponseShape { .. }));
}

#[tokio::test]
async fn unreachable_provider_is_a_network_failure() {
    // Nothing listens on the discard port.
    let provider = OpenWeatherProvider::new("k".into(), "http://127.0.0.1:9/weather".into());
    let err = provider.fetch_current("London").await.unwrap_err();

    assert_eq!(err.kind(), FailureKind::Network);
}

// ============================================================================
// Forecast
// ============================================================================

#[tokio::test]
async fn forecast_posts_reference_date() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/predict"))
        .and(body_json(json!({"date": "2024-05-01"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "2024-05-01": {"temperature": 21.4, "precipitation": 0.0, "humidity": 40, "condition": "sunny"},
            "2024-05-02": {"temperature": 18.9, "precipitation": 2.3, "humidity": 77.5, "condition": "raining"},
            "2024-05-03": {"temperature": 19.2, "precipitation": 0.05, "humidity": 61.0, "condition": "cloudy"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let backend = ForecastBackend::new(format!("{}/predict", server.uri()));
    let forecast = backend.fetch_forecast(may_first()).await.expect("fetch succeeds");

    assert_eq!(forecast.len(), 3);
    let conditions: Vec<_> = forecast.iter().map(|e| e.condition).collect();
    assert_eq!(
        conditions,
        [
            ForecastCondition::Sunny,
            ForecastCondition::Raining,
            ForecastCondition::Cloudy
        ]
    );

    let first = forecast.get(may_first()).expect("entry for reference date");
    assert_eq!(first.temperature_c, 21.4);
    assert_eq!(first.precipitation_mm, 0.0);
    assert_eq!(first.humidity_pct, 40.0);
}

#[tokio::test]
async fn forecast_server_error_is_a_shape_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"detail": "Prediction failed: boom"})),
        )
        .mount(&server)
        .await;

    let backend = ForecastBackend::new(server.uri());
    let err = backend.fetch_forecast(may_first()).await.unwrap_err();

    assert_eq!(err.kind(), FailureKind::ResponseShape);
    assert!(err.to_string().contains("Prediction failed"));
}

#[tokio::test]
async fn forecast_with_unknown_condition_is_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "2024-05-01": {"temperature": 1.0, "precipitation": 0.0, "humidity": 90, "condition": "snowing"}
        })))
        .mount(&server)
        .await;

    let backend = ForecastBackend::new(server.uri());
    let err = backend.fetch_forecast(may_first()).await.unwrap_err();

    assert_eq!(err.kind(), FailureKind::ResponseShape);
}
