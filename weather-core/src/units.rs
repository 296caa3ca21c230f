use serde::{Deserialize, Serialize};

const KELVIN_OFFSET: f64 = 273.15;

/// Unit system requested from the provider via its `units` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    /// Temperatures come back in Celsius.
    #[default]
    Metric,
    /// Temperatures come back in Kelvin.
    Standard,
}

impl Units {
    pub fn as_query(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Standard => "standard",
        }
    }

    /// Convert a provider temperature expressed in this unit system to Celsius.
    pub fn to_celsius(&self, value: f64) -> f64 {
        match self {
            Units::Metric => value,
            Units::Standard => kelvin_to_celsius(value),
        }
    }
}

impl std::fmt::Display for Units {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_query())
    }
}

pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    kelvin - KELVIN_OFFSET
}

/// Round a Celsius reading to the whole degree shown to users.
pub fn round_celsius(celsius: f64) -> i64 {
    celsius.round() as i64
}
