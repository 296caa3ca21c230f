//! Lookup classification against a mock OpenWeather endpoint.

use std::time::Duration;

use serde_json::json;
use weather_core::{
    Credential, OpenWeatherProvider, ProviderConfig, Units, WeatherProvider, WeatherResult,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{any, method, path, query_param},
};

fn sample_current(temp: f64) -> serde_json::Value {
    json!({
        "coord": { "lon": -0.1257, "lat": 51.5085 },
        "weather": [{ "id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04d" }],
        "base": "stations",
        "main": {
            "temp": temp,
            "feels_like": 14.2,
            "temp_min": 13.9,
            "temp_max": 16.1,
            "pressure": 1012,
            "humidity": 72
        },
        "visibility": 10000,
        "wind": { "speed": 4.63, "deg": 240 },
        "clouds": { "all": 75 },
        "dt": 1_700_000_000,
        "sys": { "country": "GB", "sunrise": 1_699_945_000, "sunset": 1_699_978_000 },
        "timezone": 0,
        "id": 2_643_743,
        "name": "London",
        "cod": 200
    })
}

fn provider_for(server_uri: &str, key: Option<&str>) -> OpenWeatherProvider {
    let config = ProviderConfig {
        base_url: server_uri.to_string(),
        timeout_secs: 1,
        units: Units::Metric,
    };
    OpenWeatherProvider::new(Credential::new(key.map(str::to_string)), &config)
        .expect("Failed to create provider")
}

async fn mount_status(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(template)
        .mount(server)
        .await;
}

#[tokio::test]
async fn success_sends_city_key_and_metric_units_once() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "London"))
        .and(query_param("appid", "KEY"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_current(15.0)))
        .expect(1)
        .mount(&server)
        .await;

    let result = provider_for(&server.uri(), Some("KEY")).lookup("London").await;

    let report = result.into_report().expect("expected success");
    assert_eq!(report.temperature_c, 15);
    assert_eq!(report.location_name, "London");
    assert_eq!(report.country.as_deref(), Some("GB"));
    assert_eq!(report.raw["cod"], 200);
}

#[tokio::test]
async fn city_with_spaces_is_sent_verbatim() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "New York"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_current(-2.6)))
        .expect(1)
        .mount(&server)
        .await;

    let result = provider_for(&server.uri(), Some("KEY")).lookup("New York").await;

    assert_eq!(result.into_report().map(|r| r.temperature_c), Some(-3));
}

#[tokio::test]
async fn not_found_maps_to_not_found() {
    let server = MockServer::start().await;
    mount_status(
        &server,
        ResponseTemplate::new(404).set_body_json(json!({ "cod": "404", "message": "city not found" })),
    )
    .await;

    let result = provider_for(&server.uri(), Some("KEY")).lookup("Nowhereland").await;

    assert_eq!(result, WeatherResult::NotFound);
}

#[tokio::test]
async fn other_statuses_carry_their_code() {
    for code in [401_u16, 429, 500, 503] {
        let server = MockServer::start().await;
        mount_status(&server, ResponseTemplate::new(code).set_body_string("nope")).await;

        let result = provider_for(&server.uri(), Some("KEY")).lookup("London").await;

        assert_eq!(result, WeatherResult::ProviderError { code });
    }
}

#[tokio::test]
async fn non_200_success_status_is_a_provider_error() {
    let server = MockServer::start().await;
    mount_status(&server, ResponseTemplate::new(204)).await;

    let result = provider_for(&server.uri(), Some("KEY")).lookup("London").await;

    assert_eq!(result, WeatherResult::ProviderError { code: 204 });
}

#[tokio::test]
async fn slow_provider_times_out() {
    let server = MockServer::start().await;
    mount_status(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(sample_current(15.0))
            .set_delay(Duration::from_secs(3)),
    )
    .await;

    let result = provider_for(&server.uri(), Some("KEY")).lookup("London").await;

    assert_eq!(result, WeatherResult::Timeout);
}

#[tokio::test]
async fn refused_connection_is_a_connection_failure() {
    let uri = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");
        format!("http://{addr}")
    };

    let result = provider_for(&uri, Some("KEY")).lookup("London").await;

    assert_eq!(result, WeatherResult::ConnectionFailure);
}

#[tokio::test]
async fn malformed_body_is_an_unknown_failure() {
    let server = MockServer::start().await;
    mount_status(&server, ResponseTemplate::new(200).set_body_string("<html>oops</html>")).await;

    let result = provider_for(&server.uri(), Some("KEY")).lookup("London").await;

    assert_eq!(result, WeatherResult::UnknownFailure);
}

#[tokio::test]
async fn payload_without_temperature_is_never_a_success() {
    let server = MockServer::start().await;
    mount_status(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({ "name": "London", "main": {} })),
    )
    .await;

    let result = provider_for(&server.uri(), Some("KEY")).lookup("London").await;

    assert_eq!(result, WeatherResult::UnknownFailure);
}

#[tokio::test]
async fn odd_display_fields_still_yield_a_report() {
    let server = MockServer::start().await;
    mount_status(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "name": "London",
            "main": { "temp": 15.0, "humidity": 81.5, "pressure": null },
            "weather": [{ "main": "Rain", "description": null }],
            "wind": { "deg": 200 }
        })),
    )
    .await;

    let result = provider_for(&server.uri(), Some("KEY")).lookup("London").await;

    let report = result.into_report().expect("temperature alone is enough for a report");
    assert_eq!(report.temperature_c, 15);
    assert_eq!(report.humidity_pct, Some(82));
    assert_eq!(report.pressure_hpa, None);
    assert_eq!(report.condition, "Rain");
    assert_eq!(report.description, "Unknown");
    assert_eq!(report.wind_speed_mps, None);
}

#[tokio::test]
async fn missing_or_placeholder_key_makes_no_request() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_current(15.0)))
        .expect(0)
        .mount(&server)
        .await;

    for key in [None, Some("your_api_key_here"), Some("  ")] {
        let provider = provider_for(&server.uri(), key);
        assert!(!provider.is_configured());
        assert_eq!(provider.lookup("Paris").await, WeatherResult::Unconfigured);
    }
}

#[tokio::test]
async fn standard_units_are_converted_from_kelvin() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("units", "standard"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_current(288.15)))
        .expect(1)
        .mount(&server)
        .await;

    let config = ProviderConfig {
        base_url: server.uri(),
        timeout_secs: 1,
        units: Units::Standard,
    };
    let provider = OpenWeatherProvider::new(Credential::new(Some("KEY".into())), &config)
        .expect("Failed to create provider");

    let result = provider.lookup("London").await;

    assert_eq!(result.into_report().map(|r| r.temperature_c), Some(15));
}
