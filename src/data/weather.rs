//! OpenWeatherMap current weather client
//!
//! This module provides functionality to fetch current conditions for a city
//! from the OpenWeatherMap API and parse them into a `WeatherSnapshot`.

use chrono::Utc;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument};

use super::{mps_to_kmh, ConditionCategory, Query, WeatherSnapshot};

/// Default URL for the OpenWeatherMap current weather endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Default locale for provider descriptions
pub const DEFAULT_LANG: &str = "pt_br";

/// Longest provider error message kept, in characters
const MAX_PROVIDER_MESSAGE_CHARS: usize = 200;

/// Errors that can occur when fetching weather data
#[derive(Debug, Error)]
pub enum FetchError {
    /// The provider does not know the requested city (HTTP 404)
    #[error("City not found: {0}")]
    NotFound(String),

    /// The provider answered with any other non-success status
    #[error("Weather provider error ({status}): {message}")]
    Provider { status: u16, message: String },

    /// The request never completed (DNS, connect, reset, body read)
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// A success response did not have the expected shape
    #[error("Malformed weather response: {0}")]
    Parse(String),
}

/// Client for fetching current weather from OpenWeatherMap
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    endpoint: String,
    api_key: String,
    lang: String,
}

impl WeatherClient {
    /// Create a new WeatherClient for the given API key with default endpoint and locale
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: api_key.into(),
            lang: DEFAULT_LANG.to_string(),
        }
    }

    /// Use a different endpoint URL (e.g. a mock server)
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Use a different locale for condition descriptions
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    /// Returns the configured endpoint URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the configured locale
    pub fn lang(&self) -> &str {
        &self.lang
    }

    /// Fetch current weather for a city
    ///
    /// Issues exactly one GET request with metric units. No retries.
    ///
    /// # Returns
    /// * `Ok(WeatherSnapshot)` - Current conditions for the city
    /// * `Err(FetchError)` - If the request fails, the city is unknown, or the body is malformed
    #[instrument(skip_all, fields(city = %query))]
    pub async fn fetch(&self, query: &Query) -> Result<WeatherSnapshot, FetchError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("q", query.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
                ("lang", self.lang.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        debug!(status = status.as_u16(), bytes = text.len(), "weather response received");

        if !status.is_success() {
            return Err(status_error(status, &text, query));
        }

        parse_response(&text)
    }
}

/// Maps a non-success HTTP status to a FetchError
fn status_error(status: StatusCode, body: &str, query: &Query) -> FetchError {
    if status == StatusCode::NOT_FOUND {
        return FetchError::NotFound(query.to_string());
    }

    let message = serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .map(|m| truncate_message(&m))
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unexpected status")
                .to_string()
        });

    FetchError::Provider {
        status: status.as_u16(),
        message,
    }
}

/// Caps an untrusted message at `MAX_PROVIDER_MESSAGE_CHARS`, marking the cut
fn truncate_message(message: &str) -> String {
    if message.chars().count() <= MAX_PROVIDER_MESSAGE_CHARS {
        return message.to_string();
    }
    let mut truncated: String = message.chars().take(MAX_PROVIDER_MESSAGE_CHARS - 1).collect();
    truncated.push('…');
    truncated
}

/// Parse a success body into a WeatherSnapshot
fn parse_response(body: &str) -> Result<WeatherSnapshot, FetchError> {
    let response: OpenWeatherResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Parse(e.to_string()))?;

    let condition = response
        .weather
        .into_iter()
        .next()
        .ok_or_else(|| FetchError::Parse("weather array is empty".to_string()))?;

    let humidity = response.main.humidity;
    if !(0.0..=100.0).contains(&humidity) || humidity.fract() != 0.0 {
        return Err(FetchError::Parse(format!(
            "humidity is not an integer percent: {}",
            humidity
        )));
    }

    let wind_speed = response.wind.speed;
    if !wind_speed.is_finite() || wind_speed < 0.0 {
        return Err(FetchError::Parse(format!(
            "invalid wind speed: {}",
            wind_speed
        )));
    }

    Ok(WeatherSnapshot {
        location: response.name,
        temperature: response.main.temp,
        feels_like: response.main.feels_like,
        humidity: humidity as u8,
        wind_kmh: mps_to_kmh(wind_speed),
        condition: ConditionCategory::from_provider(&condition.main),
        description: condition.description,
        icon_code: condition.icon,
        fetched_at: Utc::now(),
    })
}

/// OpenWeatherMap current weather response
#[derive(Debug, Deserialize)]
struct OpenWeatherResponse {
    name: String,
    main: MainReadings,
    weather: Vec<ConditionEntry>,
    wind: WindReadings,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
    feels_like: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct ConditionEntry {
    main: String,
    description: String,
    #[serde(default)]
    icon: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WindReadings {
    speed: f64,
}

/// Error body returned by OpenWeatherMap, e.g. `{"cod":401,"message":"Invalid API key"}`
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}
