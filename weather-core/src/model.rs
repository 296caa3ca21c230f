use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single form submission.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub city: String,
}

impl SearchRequest {
    pub fn new(city: impl Into<String>) -> Self {
        Self { city: city.into() }
    }

    /// The trimmed city, or `None` when only whitespace was submitted.
    pub fn normalized_city(&self) -> Option<&str> {
        let city = self.city.trim();
        (!city.is_empty()).then_some(city)
    }
}

/// Current conditions for a city, temperatures already in whole Celsius.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReport {
    pub location_name: String,
    pub country: Option<String>,
    pub temperature_c: i64,
    pub feels_like_c: Option<i64>,
    pub temp_min_c: Option<i64>,
    pub temp_max_c: Option<i64>,
    pub condition: String,
    pub description: String,
    pub icon: Option<String>,
    pub humidity_pct: Option<u8>,
    pub pressure_hpa: Option<u32>,
    pub wind_speed_mps: Option<f64>,
    pub observation_time: Option<DateTime<Utc>>,
    /// Provider payload exactly as received.
    pub raw: serde_json::Value,
}

/// Outcome of one lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherResult {
    Success(WeatherReport),
    NotFound,
    ProviderError { code: u16 },
    Timeout,
    ConnectionFailure,
    Unconfigured,
    UnknownFailure,
}

impl WeatherResult {
    pub fn into_report(self) -> Option<WeatherReport> {
        match self {
            WeatherResult::Success(report) => Some(report),
            _ => None,
        }
    }
}
