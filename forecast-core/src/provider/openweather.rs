use serde_json::{Number, Value};

use crate::{
    config::Endpoints,
    console::Console,
    model::{ApiKey, City, CurrentWeather, ForecastEntry, Reading, WeatherQuery},
};

use super::{JsonFetcher, fetch};

/// Why a response body could not be turned into records.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum LookupError {
    #[error("missing field '{0}'")]
    MissingField(&'static str),

    #[error("field '{0}' has an unexpected type")]
    InvalidField(&'static str),

    /// `cod` present but not the endpoint's success value.
    #[error("unexpected status code {0}")]
    Status(Value),
}

const FETCH_FAILED: &str =
    "Error: Unable to fetch data from the API. Please check your connection or city name.";

/// Fetch and print current conditions.
///
/// `None` covers transport failures, an empty body, an unexpected `cod` and missing fields;
/// only the last one is reported to the user, the others are left to the caller.
pub async fn current_weather<F, C>(
    fetcher: &F,
    console: &mut C,
    endpoints: &Endpoints,
    api_key: &ApiKey,
    city: &City,
) -> Option<CurrentWeather>
where
    F: JsonFetcher + ?Sized,
    C: Console + ?Sized,
{
    let query = WeatherQuery::new(api_key, city);
    let data = fetch(fetcher, console, &endpoints.current_weather(), &query)
        .await
        .filter(has_content)?;

    match parse_current(&data) {
        Ok(weather) => {
            console.say(&format!("City: {}", weather.city));
            console.say(&format!("Description: {}", weather.description));
            console.say(&format!("Temperature: {}°C", weather.temperature));
            Some(weather)
        }
        Err(LookupError::Status(cod)) => {
            tracing::debug!(%cod, city = city.as_str(), "current weather rejected");
            None
        }
        Err(err) => {
            console.say(&format!("Failed to get data. Error: {err}"));
            None
        }
    }
}

/// Fetch the 5 day forecast and print one line per 3-hour point.
pub async fn forecast<F, C>(
    fetcher: &F,
    console: &mut C,
    endpoints: &Endpoints,
    api_key: &ApiKey,
    city: &City,
) -> Option<Vec<ForecastEntry>>
where
    F: JsonFetcher + ?Sized,
    C: Console + ?Sized,
{
    let query = WeatherQuery::new(api_key, city);
    let data = fetch(fetcher, console, &endpoints.forecast(), &query)
        .await
        .filter(has_content);
    let Some(data) = data else {
        console.say(FETCH_FAILED);
        return None;
    };

    match parse_forecast(&data) {
        Ok(entries) => {
            for entry in &entries {
                console.say(&format!(
                    "Date: {} - Temp.: {}°C - Desc.: {}",
                    entry.timestamp, entry.temperature, entry.description
                ));
            }
            Some(entries)
        }
        Err(LookupError::Status(cod)) => {
            tracing::debug!(%cod, city = city.as_str(), "forecast rejected");
            console.say(&format!("Error: {}", api_message(&data)));
            None
        }
        Err(err) => {
            console.say(&format!("Failed to get forecast data. Error: {err}"));
            None
        }
    }
}

/// An empty object carries nothing and is treated like a failed request.
fn has_content(data: &Value) -> bool {
    !data.as_object().is_some_and(|obj| obj.is_empty())
}

/// The current-weather endpoint reports success as the number `200`.
fn parse_current(data: &Value) -> Result<CurrentWeather, LookupError> {
    let cod = data.get("cod").ok_or(LookupError::MissingField("cod"))?;
    if cod.as_u64() != Some(200) {
        return Err(LookupError::Status(cod.clone()));
    }

    let city = required_str(data, "/name", "name")?;
    let description = required_str(data, "/weather/0/description", "weather[0].description")?;
    let temperature = match data.pointer("/main/temp") {
        Some(Value::Number(n)) => n.clone(),
        Some(_) => return Err(LookupError::InvalidField("main.temp")),
        None => return Err(LookupError::MissingField("main.temp")),
    };

    Ok(CurrentWeather {
        city: city.to_string(),
        description: description.to_string(),
        temperature,
    })
}

/// The forecast endpoint reports success as the string `"200"`, unlike current weather.
fn parse_forecast(data: &Value) -> Result<Vec<ForecastEntry>, LookupError> {
    let cod = data.get("cod").ok_or(LookupError::MissingField("cod"))?;
    if cod.as_str() != Some("200") {
        return Err(LookupError::Status(cod.clone()));
    }

    let points = data
        .get("list")
        .ok_or(LookupError::MissingField("list"))?
        .as_array()
        .ok_or(LookupError::InvalidField("list"))?;

    Ok(points.iter().map(forecast_entry).collect())
}

/// Each field falls back to `"N/A"` on its own.
fn forecast_entry(point: &Value) -> ForecastEntry {
    ForecastEntry {
        timestamp: Reading::from_option(optional_string(point, "/dt_txt")),
        temperature: Reading::from_option(optional_number(point, "/main/temp")),
        description: Reading::from_option(optional_string(point, "/weather/0/description")),
    }
}

fn required_str<'a>(
    data: &'a Value,
    pointer: &str,
    field: &'static str,
) -> Result<&'a str, LookupError> {
    data.pointer(pointer)
        .ok_or(LookupError::MissingField(field))?
        .as_str()
        .ok_or(LookupError::InvalidField(field))
}

fn optional_string(data: &Value, pointer: &str) -> Option<String> {
    data.pointer(pointer)
        .and_then(Value::as_str)
        .map(str::to_owned)
}

fn optional_number(data: &Value, pointer: &str) -> Option<Number> {
    match data.pointer(pointer) {
        Some(Value::Number(n)) => Some(n.clone()),
        _ => None,
    }
}

fn api_message(data: &Value) -> String {
    match data.get("message") {
        Some(Value::String(msg)) => msg.clone(),
        Some(other) => other.to_string(),
        None => "Unknown error in forecast data".to_string(),
    }
}
