//! Test doubles for the console and HTTP seams.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::{collections::VecDeque, sync::Mutex};

use crate::{
    console::Console,
    model::WeatherQuery,
    provider::{JsonFetcher, TransportError},
};

pub const TEST_KEY: &str = "0123456789abcdef0123456789abcdef";

/// Replays queued answers; once they run out, input counts as closed.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    answers: VecDeque<String>,
    pub prompts: Vec<String>,
    pub output: Vec<String>,
}

impl ScriptedConsole {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Console for ScriptedConsole {
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        Ok(self.answers.pop_front())
    }

    fn say(&mut self, line: &str) {
        self.output.push(line.to_string());
    }
}

/// Serves canned bodies by URL suffix (`"/weather"`, `"/forecast"`) and records each call.
#[derive(Debug, Default)]
pub struct StubFetcher {
    routes: Vec<(String, Option<Value>)>,
    calls: Mutex<Vec<String>>,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, suffix: &str, body: Value) -> Self {
        self.routes.push((suffix.to_string(), Some(body)));
        self
    }

    /// Make every request ending in `suffix` fail at the transport level.
    pub fn fail(mut self, suffix: &str) -> Self {
        self.routes.push((suffix.to_string(), None));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl JsonFetcher for StubFetcher {
    async fn get_json(&self, url: &str, query: &WeatherQuery<'_>) -> Result<Value, TransportError> {
        let call = format!("{url}?q={}", query.city);
        self.calls.lock().unwrap().push(call);

        let route = self
            .routes
            .iter()
            .find(|(suffix, _)| url.ends_with(suffix.as_str()));
        match route {
            Some((_, Some(body))) => Ok(body.clone()),
            _ => Err(TransportError::Status {
                status: reqwest::StatusCode::BAD_GATEWAY,
                body: format!("stubbed failure for {url}"),
            }),
        }
    }
}
