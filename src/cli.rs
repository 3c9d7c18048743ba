//! Command-line interface parsing for City Weather CLI
//!
//! This module handles parsing of CLI arguments using clap. Flags configure the
//! session (API key, endpoint, locale) and can prefill a city to look up at startup.

use clap::Parser;
use std::path::PathBuf;
use thiserror::Error;

use crate::data::{Query, QueryError};

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The --city value was empty or whitespace
    #[error("Invalid city: '{0}'. {1}")]
    InvalidCity(String, QueryError),
}

/// City Weather CLI - Look up current weather conditions for any city
#[derive(Parser, Debug, Default)]
#[command(name = "cityweather")]
#[command(about = "Current weather conditions for any city")]
#[command(version)]
pub struct Cli {
    /// OpenWeatherMap API key
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Current weather endpoint URL
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Locale for condition descriptions (e.g. pt_br, en, de)
    #[arg(long, value_name = "LOCALE")]
    pub lang: Option<String>,

    /// Look up this city as soon as the app starts
    ///
    /// Examples:
    ///   cityweather --city Paris
    ///   cityweather --city "São Paulo"
    #[arg(long, value_name = "CITY")]
    pub city: Option<String>,

    /// Path to a TOML config file (defaults to the platform config directory)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone, Default)]
pub struct StartupConfig {
    /// City to look up immediately, if given
    pub initial_query: Option<Query>,
}

/// Parses a city argument into a Query.
///
/// # Returns
/// * `Ok(Query)` if the string has non-whitespace content
/// * `Err(CliError::InvalidCity)` otherwise
pub fn parse_city_arg(s: &str) -> Result<Query, CliError> {
    Query::parse(s).map_err(|e| CliError::InvalidCity(s.to_string(), e))
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let initial_query = cli.city.as_deref().map(parse_city_arg).transpose()?;
        Ok(StartupConfig { initial_query })
    }
}
