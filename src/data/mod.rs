//! Core data models for City Weather CLI
//!
//! This module contains the types that flow through a lookup: the validated
//! city query, the weather snapshot returned by the provider, and the
//! condition categories used to pick an icon.

pub mod weather;

pub use weather::{FetchError, WeatherClient};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while validating user input before a lookup
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The input was empty or contained only whitespace
    #[error("Please type a city name to search.")]
    Empty,
}

/// A trimmed, non-empty city name entered by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    /// Validates raw input text and builds a Query from it.
    ///
    /// # Returns
    /// * `Ok(Query)` holding the trimmed city name
    /// * `Err(QueryError::Empty)` if nothing but whitespace was typed
    pub fn parse(raw: &str) -> Result<Self, QueryError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(QueryError::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the city name
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Primary weather condition reported by the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionCategory {
    Clear,
    Clouds,
    Rain,
    Snow,
    Drizzle,
    /// Any category without a dedicated variant, kept verbatim
    Other(String),
}

impl ConditionCategory {
    /// Maps the provider's `weather[0].main` value to a category (case-insensitive)
    pub fn from_provider(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "clear" => ConditionCategory::Clear,
            "clouds" => ConditionCategory::Clouds,
            "rain" => ConditionCategory::Rain,
            "snow" => ConditionCategory::Snow,
            "drizzle" => ConditionCategory::Drizzle,
            _ => ConditionCategory::Other(value.to_string()),
        }
    }

    /// Returns the category name as the provider spells it
    pub fn as_str(&self) -> &str {
        match self {
            ConditionCategory::Clear => "Clear",
            ConditionCategory::Clouds => "Clouds",
            ConditionCategory::Rain => "Rain",
            ConditionCategory::Snow => "Snow",
            ConditionCategory::Drizzle => "Drizzle",
            ConditionCategory::Other(raw) => raw,
        }
    }
}

/// One immutable weather reading for a single location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Location name as resolved by the provider
    pub location: String,
    /// Current temperature in Celsius
    pub temperature: f64,
    /// Feels-like temperature in Celsius
    pub feels_like: f64,
    /// Relative humidity percentage (0-100)
    pub humidity: u8,
    /// Wind speed in km/h
    pub wind_kmh: f64,
    /// Primary condition category
    pub condition: ConditionCategory,
    /// Human-readable description in the requested locale
    pub description: String,
    /// Provider icon code (e.g. "01d"), if present
    pub icon_code: Option<String>,
    /// When this data was fetched
    pub fetched_at: DateTime<Utc>,
}

/// Converts a wind speed in metres per second to km/h
pub fn mps_to_kmh(speed: f64) -> f64 {
    speed * 3.6
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_parse_trims_input() {
        let query = Query::parse("  Paris \t").unwrap();
        assert_eq!(query.as_str(), "Paris");
        assert_eq!(query.to_string(), "Paris");
    }

    #[test]
    fn test_query_parse_keeps_inner_spaces() {
        let query = Query::parse(" São Paulo ").unwrap();
        assert_eq!(query.as_str(), "São Paulo");
    }

    #[test]
    fn test_query_parse_rejects_empty() {
        assert_eq!(Query::parse(""), Err(QueryError::Empty));
    }

    #[test]
    fn test_query_parse_rejects_whitespace_only() {
        for raw in [" ", "   ", "\t", "\n \t "] {
            assert_eq!(Query::parse(raw), Err(QueryError::Empty), "input {:?}", raw);
        }
    }

    #[test]
    fn test_condition_category_case_insensitive() {
        assert_eq!(ConditionCategory::from_provider("Rain"), ConditionCategory::Rain);
        assert_eq!(ConditionCategory::from_provider("RAIN"), ConditionCategory::Rain);
        assert_eq!(ConditionCategory::from_provider("clouds"), ConditionCategory::Clouds);
        assert_eq!(ConditionCategory::from_provider("Drizzle"), ConditionCategory::Drizzle);
    }

    #[test]
    fn test_condition_category_other_keeps_raw_value() {
        let category = ConditionCategory::from_provider("Tornado");
        assert_eq!(category, ConditionCategory::Other("Tornado".to_string()));
        assert_eq!(category.as_str(), "Tornado");
    }

    #[test]
    fn test_mps_to_kmh() {
        assert!((mps_to_kmh(5.0) - 18.0).abs() < 1e-9);
        assert!((mps_to_kmh(3.0) - 10.8).abs() < 1e-9);
        assert_eq!(mps_to_kmh(0.0), 0.0);
    }
}
