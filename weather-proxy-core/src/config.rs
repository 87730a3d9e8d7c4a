use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::provider::openweather::DEFAULT_BASE_URL;

/// Address the HTTP server binds to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_string(), port: 5000 }
    }
}

/// Credentials and endpoint for the upstream provider.
///
/// Example TOML:
/// [openweather]
/// api_key = "..."
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenWeatherConfig {
    pub api_key: Option<String>,
    pub base_url: String,
}

impl Default for OpenWeatherConfig {
    fn default() -> Self {
        Self { api_key: None, base_url: DEFAULT_BASE_URL.to_string() }
    }
}

/// Top-level configuration.
///
/// Sources, in increasing precedence: built-in defaults, a TOML file
/// (platform config dir, or an explicit path), then environment variables.
/// CLI flags are applied on top by the server binary.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub openweather: OpenWeatherConfig,
}

impl Config {
    /// Load config from `explicit` if given (the file must exist), otherwise
    /// from the platform config dir (missing file means defaults), then apply
    /// environment overrides.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut cfg = match explicit {
            Some(path) => Self::from_file(path)?,
            None => {
                let path = Self::config_file_path()?;
                if path.exists() { Self::from_file(&path)? } else { Self::default() }
            }
        };

        cfg.apply_env(|name| std::env::var(name).ok())?;

        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Apply environment overrides through a lookup function, so tests can
    /// feed variables without touching the process environment.
    pub fn apply_env<F>(&mut self, var: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = var("WEATHER_PROXY_HOST") {
            self.server.host = host;
        }
        if let Some(port) = var("WEATHER_PROXY_PORT") {
            self.server.port = port
                .parse()
                .with_context(|| format!("Invalid WEATHER_PROXY_PORT value: {port}"))?;
        }
        if let Some(key) = var("OPENWEATHER_API_KEY") {
            self.openweather.api_key = Some(key);
        }
        if let Some(url) = var("OPENWEATHER_BASE_URL") {
            self.openweather.base_url = url;
        }

        Ok(())
    }

    /// Returns the provider API key, or an error telling the operator how to
    /// supply one. The key itself never appears in the message.
    pub fn openweather_api_key(&self) -> Result<&str> {
        self.openweather.api_key.as_deref().filter(|key| !key.is_empty()).ok_or_else(|| {
            anyhow!(
                "No OpenWeatherMap API key configured.\n\
                 Hint: set the OPENWEATHER_API_KEY environment variable, or add\n\
                 `api_key` under [openweather] in the config file."
            )
        })
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-proxy", "weather-proxy")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
