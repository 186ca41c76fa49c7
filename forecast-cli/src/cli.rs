use clap::Parser;
use forecast_core::{ApiKey, HttpClient, Session, Settings};
use std::path::PathBuf;

use crate::terminal::TerminalConsole;

/// Top-level CLI struct.
///
/// Every flag is optional; without any the tool runs fully interactively.
#[derive(Debug, Parser)]
#[command(
    name = "forecast",
    version,
    about = "Current weather and 5 day forecasts from OpenWeatherMap"
)]
pub struct Cli {
    /// OpenWeatherMap API key (32 lowercase hex characters); skips the key prompt.
    #[arg(long, value_parser = parse_api_key)]
    pub api_key: Option<ApiKey>,

    /// Directory for saved forecast files. Defaults to the executable's directory.
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Base URL of the OpenWeatherMap 2.5 API.
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,
}

fn parse_api_key(raw: &str) -> Result<ApiKey, String> {
    raw.parse().map_err(|err: anyhow::Error| err.to_string())
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let settings = Settings::load()?
            .with_api_key(self.api_key)
            .with_base_url(self.base_url)
            .with_output_dir(self.output_dir);
        tracing::debug!(?settings, "starting session");

        let fetcher = HttpClient::new()?;
        let mut console = TerminalConsole::new();

        Session::new(&fetcher, &mut console, &settings).run().await
    }
}
