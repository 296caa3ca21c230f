use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::{
    config::{Credential, ProviderConfig},
    model::{WeatherReport, WeatherResult},
    units::{Units, round_celsius},
};

use super::WeatherProvider;

/// Why a configured lookup did not produce a report.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("city not found")]
    NotFound,

    #[error("provider responded with HTTP {0}")]
    Status(u16),

    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connection(String),

    #[error("request failed: {0}")]
    Request(String),

    #[error("malformed provider payload: {0}")]
    Payload(#[from] serde_json::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_connect() {
            FetchError::Connection(err.to_string())
        } else {
            FetchError::Request(err.to_string())
        }
    }
}

impl From<FetchError> for WeatherResult {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::NotFound => WeatherResult::NotFound,
            FetchError::Status(code) => WeatherResult::ProviderError { code },
            FetchError::Timeout => WeatherResult::Timeout,
            FetchError::Connection(_) => WeatherResult::ConnectionFailure,
            FetchError::Request(_) | FetchError::Payload(_) => WeatherResult::UnknownFailure,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    credential: Credential,
    base_url: String,
    units: Units,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(credential: Credential, config: &ProviderConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client for OpenWeather")?;

        Ok(Self {
            credential,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            units: config.units,
            http,
        })
    }

    async fn fetch_current(&self, city: &str, api_key: &str) -> Result<WeatherReport, FetchError> {
        let url = format!("{}/weather", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[("q", city), ("appid", api_key), ("units", self.units.as_query())])
            .send()
            .await?;

        let status = res.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound);
        }
        if status != StatusCode::OK {
            let body = res.text().await.unwrap_or_default();
            warn!(%status, body = %truncate_body(&body), "OpenWeather request failed");
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = res.text().await?;
        let raw: serde_json::Value = serde_json::from_str(&body)?;
        let parsed = OwCurrentResponse::deserialize(&raw)?;

        Ok(self.build_report(parsed, raw))
    }

    fn build_report(&self, parsed: OwCurrentResponse, raw: serde_json::Value) -> WeatherReport {
        let celsius = |value: f64| round_celsius(self.units.to_celsius(value));

        let first = parsed.weather.unwrap_or_default().into_iter().next();
        let (condition, description, icon) = match first {
            Some(w) => (w.main, w.description, w.icon),
            None => (None, None, None),
        };

        WeatherReport {
            location_name: parsed.name.unwrap_or_default(),
            country: parsed.sys.and_then(|s| s.country),
            temperature_c: celsius(parsed.main.temp),
            feels_like_c: parsed.main.feels_like.map(celsius),
            temp_min_c: parsed.main.temp_min.map(celsius),
            temp_max_c: parsed.main.temp_max.map(celsius),
            condition: condition.unwrap_or_else(|| UNKNOWN.to_string()),
            description: description.unwrap_or_else(|| UNKNOWN.to_string()),
            icon,
            humidity_pct: parsed.main.humidity.map(|h| h.round().clamp(0.0, 100.0) as u8),
            pressure_hpa: parsed.main.pressure.map(|p| p.round().max(0.0) as u32),
            wind_speed_mps: parsed.wind.and_then(|w| w.speed),
            observation_time: parsed.dt.and_then(unix_to_utc),
            raw,
        }
    }
}

const UNKNOWN: &str = "Unknown";

/// Accept any JSON for a display-only field; a value of the wrong shape becomes `None`.
///
/// Only `main.temp` is required to build a report.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    #[serde(default, deserialize_with = "lenient")]
    feels_like: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    temp_min: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    temp_max: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    humidity: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pressure: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    #[serde(default, deserialize_with = "lenient")]
    main: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    icon: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    #[serde(default, deserialize_with = "lenient")]
    speed: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    #[serde(default, deserialize_with = "lenient")]
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    #[serde(default, deserialize_with = "lenient")]
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    dt: Option<i64>,
    main: OwMain,
    #[serde(default, deserialize_with = "lenient")]
    weather: Option<Vec<OwWeather>>,
    #[serde(default, deserialize_with = "lenient")]
    wind: Option<OwWind>,
    #[serde(default, deserialize_with = "lenient")]
    sys: Option<OwSys>,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(skip(self), fields(units = %self.units))]
    async fn lookup(&self, city: &str) -> WeatherResult {
        let Some(api_key) = self.credential.api_key() else {
            debug!("No OpenWeather API key configured, skipping request");
            return WeatherResult::Unconfigured;
        };

        match self.fetch_current(city, api_key).await {
            Ok(report) => {
                debug!(temperature_c = report.temperature_c, "Weather lookup succeeded");
                WeatherResult::Success(report)
            }
            Err(err) => {
                debug!(error = %err, "Weather lookup failed");
                err.into()
            }
        }
    }

    fn is_configured(&self) -> bool {
        self.credential.is_configured()
    }
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
