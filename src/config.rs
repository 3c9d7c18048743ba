//! Runtime configuration for City Weather CLI
//!
//! Settings are layered: command-line flags (and `OPENWEATHER_API_KEY`) win
//! over the TOML config file, which wins over built-in defaults. The API key
//! has no default and must come from one of the first two layers.

use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::cli::Cli;
use crate::data::weather::{DEFAULT_ENDPOINT, DEFAULT_LANG};
use crate::data::WeatherClient;

/// Default lifetime of a toast notification, in seconds
const DEFAULT_NOTIFICATION_SECS: u64 = 5;

/// Errors that can occur while assembling the configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The config file is not valid TOML for our schema
    #[error("Failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// No API key was supplied by any layer
    #[error(
        "No OpenWeatherMap API key configured. Pass --api-key, set OPENWEATHER_API_KEY, \
         or add `api_key = \"...\"` to {0}"
    )]
    MissingApiKey(String),
}

/// On-disk configuration file; every field is optional
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// lang = "en"
/// notification_secs = 8
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub api_key: Option<String>,
    pub endpoint: Option<String>,
    pub lang: Option<String>,
    pub notification_secs: Option<u64>,
}

impl FileConfig {
    /// Loads a config file from the given path.
    ///
    /// # Arguments
    /// * `path` - File to read
    /// * `required` - Whether a missing file is an error (explicit `--config`)
    pub fn load(path: &Path, required: bool) -> Result<Self, ConfigError> {
        if !required && !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Fully resolved configuration used to build the app
#[derive(Debug, Clone)]
pub struct Config {
    /// OpenWeatherMap API key
    pub api_key: String,
    /// Current weather endpoint URL
    pub endpoint: String,
    /// Locale passed as the `lang` query parameter
    pub lang: String,
    /// How long notifications stay on screen
    pub notification_ttl: Duration,
}

impl Config {
    /// Resolves configuration from CLI arguments and the config file.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let (path, required) = match &cli.config {
            Some(path) => (path.clone(), true),
            None => (default_config_path().unwrap_or_default(), false),
        };
        let file = if path.as_os_str().is_empty() {
            FileConfig::default()
        } else {
            FileConfig::load(&path, required)?
        };

        Self::layer(cli, file, &path)
    }

    /// Merges CLI values over file values over defaults.
    fn layer(cli: &Cli, file: FileConfig, path: &Path) -> Result<Self, ConfigError> {
        let api_key = [cli.api_key.clone(), file.api_key]
            .into_iter()
            .flatten()
            .map(|k| k.trim().to_string())
            .find(|k| !k.is_empty())
            .ok_or_else(|| ConfigError::MissingApiKey(path.display().to_string()))?;

        Ok(Self {
            api_key,
            endpoint: cli
                .endpoint
                .clone()
                .or(file.endpoint)
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            lang: cli
                .lang
                .clone()
                .or(file.lang)
                .unwrap_or_else(|| DEFAULT_LANG.to_string()),
            notification_ttl: Duration::from_secs(
                file.notification_secs.unwrap_or(DEFAULT_NOTIFICATION_SECS),
            ),
        })
    }

    /// Builds the weather client described by this configuration
    pub fn weather_client(&self) -> WeatherClient {
        WeatherClient::new(self.api_key.clone())
            .with_endpoint(self.endpoint.clone())
            .with_lang(self.lang.clone())
    }
}

/// XDG-compliant path of the default config file
///
/// `~/.config/cityweather/config.toml` on Linux.
pub fn default_config_path() -> Option<PathBuf> {
    let dirs = ProjectDirs::from("", "", "cityweather")?;
    Some(dirs.config_dir().join("config.toml"))
}
