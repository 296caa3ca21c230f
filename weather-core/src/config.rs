use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt, fs, path::Path, path::PathBuf};

use crate::units::Units;

/// Value shipped in the sample `.env`; treated exactly like a missing key.
pub const PLACEHOLDER_API_KEY: &str = "your_api_key_here";

/// Fallback used when no secret is configured. Fine for local runs only.
pub const DEFAULT_SECRET_KEY: &str = "dev-key-change-in-production";

pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";
pub const SECRET_KEY_ENV: &str = "SECRET_KEY";

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Provider API key, fixed for the lifetime of the process.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credential {
    api_key: Option<String>,
}

impl Credential {
    pub fn new(api_key: Option<String>) -> Self {
        Self { api_key }
    }

    pub fn missing() -> Self {
        Self::default()
    }

    /// The usable key, if any. Blank and placeholder values count as absent.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && *key != PLACEHOLDER_API_KEY)
    }

    pub fn is_configured(&self) -> bool {
        self.api_key().is_some()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("configured", &self.is_configured())
            .finish()
    }
}

/// Where and how to reach the weather provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Hard limit for the whole outbound call.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub units: Units,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            units: Units::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port() }
    }
}

/// Top-level configuration: optional file on disk, then environment overrides.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// secret_key = "..."
///
/// [provider]
/// timeout_secs = 10
/// units = "metric"
///
/// [server]
/// port = 5000
/// ```
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub secret_key: Option<String>,

    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default)]
    pub provider: ProviderConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("secret_key", &self.secret_key.as_ref().map(|_| "<redacted>"))
            .field("credential", &self.credential())
            .field("provider", &self.provider)
            .field("server", &self.server)
            .finish()
    }
}

impl Config {
    /// Load config from `path` (or the platform default), then `.env`, then the process environment.
    ///
    /// Later layers win. Missing files are not errors: first runs start from defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_file_path()?,
        };

        let mut cfg = Self::from_file(&path)?;
        cfg.apply_env_file(None)?;
        cfg.apply_overrides(|name| std::env::var(name).ok());
        Ok(cfg)
    }

    /// Overlay `KEY=value` pairs from a dotenv file without touching the process environment.
    ///
    /// `None` searches for `.env` in the working directory and its parents.
    /// Returns whether a file was found.
    pub fn apply_env_file(&mut self, path: Option<&Path>) -> Result<bool> {
        let entries = match path {
            Some(p) => dotenvy::from_path_iter(p),
            None => dotenvy::dotenv_iter(),
        };

        let entries = match entries {
            Ok(entries) => entries,
            Err(err) if err.not_found() => return Ok(false),
            Err(err) => return Err(err).context("Failed to open .env file"),
        };

        let vars = entries
            .collect::<Result<HashMap<String, String>, _>>()
            .context("Failed to parse .env file")?;

        self.apply_overrides(|name| vars.get(name).cloned());
        Ok(true)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Overlay values from a variable lookup (normally the process environment).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(API_KEY_ENV) {
            self.api_key = Some(key);
        }
        if let Some(secret) = lookup(SECRET_KEY_ENV) {
            self.secret_key = Some(secret);
        }
    }

    /// Path to the default config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-task", "weather-web")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn credential(&self) -> Credential {
        Credential::new(self.api_key.clone())
    }

    pub fn secret_key(&self) -> &str {
        self.secret_key
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(DEFAULT_SECRET_KEY)
    }

    pub fn uses_default_secret(&self) -> bool {
        self.secret_key() == DEFAULT_SECRET_KEY
    }
}
