//! Core library for the `weather` web app.
//!
//! This crate defines:
//! - Configuration & credential handling
//! - The OpenWeather lookup service and its result taxonomy
//! - Unit conversion for provider temperatures
//!
//! It is used by `weather-web`, but can also be reused by other binaries or services.

pub mod config;
pub mod model;
pub mod provider;
pub mod units;

pub use config::{Config, Credential, ProviderConfig, ServerConfig};
pub use model::{SearchRequest, WeatherReport, WeatherResult};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider, provider_from_config};
pub use units::Units;
