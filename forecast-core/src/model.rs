use anyhow::anyhow;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};

use crate::input::{is_valid_api_key, is_valid_city};

/// Placeholder written wherever a forecast field was absent from the API response.
pub const NOT_AVAILABLE: &str = "N/A";

/// OpenWeatherMap API key: exactly 32 lowercase hex characters.
///
/// Only the shape is checked; the key is never verified against the live API.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ApiKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if is_valid_api_key(trimmed) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(anyhow!(
                "Invalid API key. Please enter a valid 32-character API key."
            ))
        }
    }
}

// Keep the key out of logs.
impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(****)")
    }
}

/// A city name that passed input validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct City(String);

impl City {
    /// Entering this as a city ends the session.
    pub const EXIT_SENTINEL: &'static str = "q";

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_exit_sentinel(&self) -> bool {
        self.0 == Self::EXIT_SENTINEL
    }
}

impl FromStr for City {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if is_valid_city(trimmed) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(anyhow!("Invalid input. Please enter a valid city name."))
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Query string shared by the current-weather and forecast endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct WeatherQuery<'a> {
    #[serde(rename = "q")]
    pub city: &'a str,
    #[serde(rename = "appid")]
    pub api_key: &'a str,
    pub units: &'a str,
}

impl<'a> WeatherQuery<'a> {
    pub const UNITS: &'static str = "metric";

    pub fn new(api_key: &'a ApiKey, city: &'a City) -> Self {
        Self {
            city: city.as_str(),
            api_key: api_key.as_str(),
            units: Self::UNITS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub city: String,
    pub description: String,
    /// The API's own number, so `18.0` still prints as `18.0`.
    pub temperature: serde_json::Number,
}

/// Marker for a field the API did not provide; (de)serializes as `"N/A"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotAvailable;

impl Serialize for NotAvailable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(NOT_AVAILABLE)
    }
}

impl<'de> Deserialize<'de> for NotAvailable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        if s == NOT_AVAILABLE {
            Ok(NotAvailable)
        } else {
            let msg = format!("expected \"{NOT_AVAILABLE}\", got \"{s}\"");
            Err(serde::de::Error::custom(msg))
        }
    }
}

/// A forecast field that is either present or defaulted to `"N/A"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reading<T> {
    Missing(NotAvailable),
    Value(T),
}

impl<T> Reading<T> {
    pub fn missing() -> Self {
        Reading::Missing(NotAvailable)
    }

    pub fn from_option(value: Option<T>) -> Self {
        value.map_or_else(Self::missing, Reading::Value)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Reading::Value(v) => Some(v),
            Reading::Missing(_) => None,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Reading<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reading::Value(v) => v.fmt(f),
            Reading::Missing(_) => f.write_str(NOT_AVAILABLE),
        }
    }
}

/// One 3-hourly point of the 5-day forecast, in the shape written to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    #[serde(rename = "Timestamp")]
    pub timestamp: Reading<String>,
    /// Kept as the API's own number so `10` is not rewritten as `10.0`.
    #[serde(rename = "Temperature")]
    pub temperature: Reading<serde_json::Number>,
    #[serde(rename = "Description")]
    pub description: Reading<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn api_key_parses_trimmed_hex() {
        let key: ApiKey = "  0123456789abcdef0123456789abcdef \n".parse().unwrap();
        assert_eq!(key.as_str(), "0123456789abcdef0123456789abcdef");
        assert_eq!(format!("{key:?}"), "ApiKey(****)");
    }

    #[test]
    fn api_key_rejects_uppercase() {
        let upper = "0123456789ABCDEF0123456789ABCDEF";
        let err = upper.parse::<ApiKey>().unwrap_err();
        assert!(err.to_string().contains("32-character"));
    }

    #[test]
    fn city_sentinel_is_case_sensitive() {
        assert!("q".parse::<City>().unwrap().is_exit_sentinel());
        assert!(!"Q".parse::<City>().unwrap().is_exit_sentinel());
        assert!(!"Quito".parse::<City>().unwrap().is_exit_sentinel());
    }

    #[test]
    fn query_uses_api_parameter_names() {
        let key: ApiKey = "0123456789abcdef0123456789abcdef".parse().unwrap();
        let city: City = "Paris".parse().unwrap();

        let query = WeatherQuery::new(&key, &city);
        let value = serde_json::to_value(query).unwrap();
        assert_eq!(
            value,
            json!({"q": "Paris", "appid": "0123456789abcdef0123456789abcdef", "units": "metric"})
        );
    }

    #[test]
    fn forecast_entry_uses_capitalized_keys_and_na_placeholder() {
        let entry = ForecastEntry {
            timestamp: Reading::Value("2024-01-01 12:00:00".to_string()),
            temperature: Reading::missing(),
            description: Reading::Value("rain".to_string()),
        };

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            value,
            json!({"Timestamp": "2024-01-01 12:00:00", "Temperature": "N/A", "Description": "rain"})
        );

        let back: ForecastEntry = serde_json::from_value(value).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn integer_temperature_is_not_widened() {
        let entry: ForecastEntry = serde_json::from_value(
            json!({"Timestamp": "t", "Temperature": 10, "Description": "d"}),
        )
        .unwrap();

        assert_eq!(entry.temperature.to_string(), "10");
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["Temperature"], json!(10));
    }
}
