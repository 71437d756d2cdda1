//! Weather client tests against a mock OpenWeatherMap server

use serde_json::json;
use smart_irrigation_backend::config::WeatherConfig;
use smart_irrigation_backend::error::AppError;
use smart_irrigation_backend::external::{WeatherClient, WeatherSource};
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> WeatherClient {
    WeatherClient::with_base_url("test-key".to_string(), server.uri()).unwrap()
}

fn current_weather(code: i32, temp: f64, humidity: f64, clouds: f64) -> serde_json::Value {
    json!({
        "coord": { "lon": 77.59, "lat": 12.97 },
        "weather": [{ "id": code, "main": "Clouds", "description": "scattered clouds" }],
        "main": { "temp": temp, "feels_like": temp, "humidity": humidity, "pressure": 1012 },
        "clouds": { "all": clouds },
        "name": "Bengaluru"
    })
}

#[tokio::test]
async fn test_resolves_live_reading() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("lat", "12.97"))
        .and(query_param("lon", "77.59"))
        .and(query_param("appid", "test-key"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_weather(802, 27.84, 71.0, 55.0)))
        .expect(1)
        .mount(&server)
        .await;

    let reading = client_for(&server).resolve(12.97, 77.59).await.unwrap();
    assert_eq!(reading.temperature, 27.8);
    assert_eq!(reading.humidity, 71.0);
    assert_eq!(reading.rain_probability, 40.0);
}

#[tokio::test]
async fn test_thunderstorm_maps_to_high_probability() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_weather(211, 22.0, 92.0, 100.0)))
        .mount(&server)
        .await;

    let reading = client_for(&server).resolve(10.0, 76.0).await.unwrap();
    assert_eq!(reading.rain_probability, 90.0);
}

#[tokio::test]
async fn test_error_status_is_upstream_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "cod": 401, "message": "Invalid API key" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server).resolve(12.97, 77.59).await;
    assert!(matches!(result, Err(AppError::UpstreamUnavailable(_))));
}

#[tokio::test]
async fn test_malformed_body_is_upstream_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let result = client_for(&server).resolve(12.97, 77.59).await;
    assert!(matches!(result, Err(AppError::UpstreamUnavailable(_))));
}

#[tokio::test]
async fn test_cloud_code_without_cover_is_upstream_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "weather": [{ "id": 803 }],
            "main": { "temp": 25.0, "humidity": 60 }
        })))
        .mount(&server)
        .await;

    let result = client_for(&server).resolve(12.97, 77.59).await;
    assert!(matches!(result, Err(AppError::UpstreamUnavailable(_))));
}

#[tokio::test]
async fn test_slow_provider_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(current_weather(800, 30.0, 40.0, 0.0))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client = WeatherClient::new(&WeatherConfig {
        api_endpoint: server.uri(),
        api_key: "test-key".to_string(),
        timeout_secs: 1,
        ..WeatherConfig::default()
    })
    .unwrap();

    let result = client.resolve(12.97, 77.59).await;
    assert!(matches!(result, Err(AppError::UpstreamUnavailable(_))));
}

#[tokio::test]
async fn test_unreachable_provider_is_upstream_unavailable() {
    let client =
        WeatherClient::with_base_url("test-key".to_string(), "http://127.0.0.1:9".to_string())
            .unwrap();
    let result = client.resolve(12.97, 77.59).await;
    assert!(matches!(result, Err(AppError::UpstreamUnavailable(_))));
}

#[tokio::test]
async fn test_makes_exactly_one_request_on_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let _ = client_for(&server).resolve(12.97, 77.59).await;
    server.verify().await;
}
