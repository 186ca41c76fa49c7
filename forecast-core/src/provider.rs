use async_trait::async_trait;
use serde_json::Value;
use std::fmt::Debug;

use crate::{console::Console, model::WeatherQuery};

pub mod http;
pub mod openweather;

pub use http::HttpClient;
pub use openweather::{current_weather, forecast};

/// Anything that went wrong below the JSON level: connection, status or body decoding.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("failed to send request: {0}")]
    Send(#[source] reqwest::Error),

    #[error("request failed with status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),

    #[error("response body is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Single GET returning a parsed JSON body.
#[async_trait]
pub trait JsonFetcher: Send + Sync + Debug {
    async fn get_json(&self, url: &str, query: &WeatherQuery<'_>) -> Result<Value, TransportError>;
}

/// Issue one request and collapse every transport failure into `None`.
///
/// Failures are logged but not shown to the user; callers decide on messaging.
pub async fn fetch<F, C>(
    fetcher: &F,
    console: &mut C,
    url: &str,
    query: &WeatherQuery<'_>,
) -> Option<Value>
where
    F: JsonFetcher + ?Sized,
    C: Console + ?Sized,
{
    match fetcher.get_json(url, query).await {
        Ok(body) => {
            console.say("Successfully connected to the weather API.");
            Some(body)
        }
        Err(err) => {
            tracing::warn!(url, city = query.city, error = %err, "weather API request failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::{ApiKey, City},
        testing::{ScriptedConsole, StubFetcher, TEST_KEY},
    };
    use serde_json::json;

    const URL: &str = "http://x/weather";

    #[tokio::test]
    async fn fetch_announces_success() {
        let fetcher = StubFetcher::new().respond("/weather", json!({"cod": 200}));
        let mut console = ScriptedConsole::default();
        let key: ApiKey = TEST_KEY.parse().unwrap();
        let city: City = "Oslo".parse().unwrap();
        let query = WeatherQuery::new(&key, &city);

        let body = fetch(&fetcher, &mut console, URL, &query).await;

        assert_eq!(body, Some(json!({"cod": 200})));
        assert_eq!(
            console.output,
            vec!["Successfully connected to the weather API."]
        );
    }

    #[tokio::test]
    async fn fetch_is_silent_on_failure() {
        let fetcher = StubFetcher::new().fail("/weather");
        let mut console = ScriptedConsole::default();
        let key: ApiKey = TEST_KEY.parse().unwrap();
        let city: City = "Oslo".parse().unwrap();
        let query = WeatherQuery::new(&key, &city);

        let body = fetch(&fetcher, &mut console, URL, &query).await;

        assert_eq!(body, None);
        assert!(console.output.is_empty());
        assert_eq!(fetcher.calls(), vec!["http://x/weather?q=Oslo"]);
    }
}
