use crate::{Config, WeatherResult, provider::openweather::OpenWeatherProvider};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Current-weather lookup for a city.
///
/// Implementations classify every outcome into a [`WeatherResult`]; they never
/// return an error and never retry.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Look up current conditions. `city` must already be trimmed and non-empty.
    async fn lookup(&self, city: &str) -> WeatherResult;

    /// Whether a usable credential is present.
    fn is_configured(&self) -> bool;
}

/// Construct the OpenWeather provider from config.
///
/// A missing API key is not an error here: the provider answers
/// [`WeatherResult::Unconfigured`] until a key is supplied.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let provider = OpenWeatherProvider::new(config.credential(), &config.provider)?;
    Ok(Box::new(provider))
}
