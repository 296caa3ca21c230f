use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use weather_core::{Config, SearchRequest, WeatherResult, provider_from_config};
use weather_web::{AppState, handlers, server};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "City weather lookup web app")]
pub struct Cli {
    /// Path to a TOML config file; defaults to the platform config directory.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the search page.
    Serve {
        /// Interface to bind, overrides `[server] host`.
        #[arg(long)]
        host: Option<String>,

        /// Port to bind, overrides `[server] port`.
        #[arg(long)]
        port: Option<u16>,
    },

    /// Look up current weather for a city once and print it.
    Lookup {
        /// City name, e.g. "London".
        city: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        init_tracing();

        let config = Config::load(self.config.as_deref())?;

        match self.command {
            Command::Serve { host, port } => serve(config, host, port).await,
            Command::Lookup { city } => lookup(&config, &city).await,
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weather=info,weather_web=info,weather_core=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn serve(config: Config, host: Option<String>, port: Option<u16>) -> anyhow::Result<()> {
    info!(?config, "Configuration loaded");

    if !config.credential().is_configured() {
        warn!("No OpenWeather API key configured; searches will report the service as not configured");
    }
    if config.uses_default_secret() {
        warn!("SECRET_KEY not set, using the development default");
    }

    let provider = provider_from_config(&config)?;
    let state = AppState::new(Arc::from(provider), config.credential())
        .context("Failed to compile page templates")?;

    let addr = format!(
        "{}:{}",
        host.unwrap_or(config.server.host),
        port.unwrap_or(config.server.port)
    );

    server::serve(state, &addr).await
}

async fn lookup(config: &Config, city: &str) -> anyhow::Result<()> {
    let request = SearchRequest::new(city);
    let Some(city) = request.normalized_city() else {
        println!("{}", handlers::EMPTY_CITY);
        return Ok(());
    };

    let provider = provider_from_config(config)?;
    let result = provider.lookup(city).await;

    match result {
        WeatherResult::Success(report) => {
            let place = match &report.country {
                Some(country) => format!("{}, {country}", report.location_name),
                None => report.location_name.clone(),
            };
            println!("{place}: {}°C, {}", report.temperature_c, report.description);
        }
        other => println!("{}", handlers::notice_for(&other).unwrap_or_default()),
    }

    Ok(())
}
