//! Application state shared across handlers

use std::sync::Arc;

use weather_core::{Credential, WeatherProvider};

use crate::render::Pages;

/// Read-only state built once at startup.
#[derive(Debug, Clone)]
pub struct AppState {
    pub provider: Arc<dyn WeatherProvider>,
    pub credential: Arc<Credential>,
    pub pages: Arc<Pages>,
}

impl AppState {
    pub fn new(provider: Arc<dyn WeatherProvider>, credential: Credential) -> Result<Self, tera::Error> {
        Ok(Self {
            provider,
            credential: Arc::new(credential),
            pages: Arc::new(Pages::new()?),
        })
    }
}
