//! Core library for the `forecast` CLI.
//!
//! This crate defines:
//! - Validation of interactive input (city names, API keys, yes/no answers)
//! - The OpenWeatherMap client and the current weather / forecast lookups
//! - Saving forecasts as timestamped JSON files
//! - The interactive session loop tying it all together
//!
//! Terminal and HTTP access go through the [`Console`] and [`JsonFetcher`] traits so the
//! session can be driven by scripted doubles.

pub mod config;
pub mod console;
pub mod input;
pub mod model;
pub mod provider;
pub mod session;
pub mod storage;

#[cfg(test)]
mod testing;

pub use config::{Endpoints, Settings};
pub use console::{Console, Prompt};
pub use model::{ApiKey, City, CurrentWeather, ForecastEntry, Reading};
pub use provider::{HttpClient, JsonFetcher, TransportError};
pub use session::Session;
