use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::model::WeatherQuery;

use super::{JsonFetcher, TransportError};

const USER_AGENT: &str = concat!("forecast/", env!("CARGO_PKG_VERSION"));

/// `reqwest`-backed fetcher. No retries, and reqwest's default timeouts.
#[derive(Debug, Clone)]
pub struct HttpClient {
    http: Client,
}

impl HttpClient {
    pub fn new() -> anyhow::Result<Self> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { http })
    }

    pub fn with_client(http: Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl JsonFetcher for HttpClient {
    async fn get_json(&self, url: &str, query: &WeatherQuery<'_>) -> Result<Value, TransportError> {
        let res = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(TransportError::Send)?;

        let status = res.status();
        let body = res.text().await.map_err(TransportError::Body)?;

        if !status.is_success() {
            return Err(TransportError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
