use anyhow::{Context, Result, bail};
use std::path::PathBuf;

use crate::model::ApiKey;

/// Public OpenWeatherMap API, version 2.5.
pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// URLs of the two endpoints the session talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base_url: String,
}

impl Endpoints {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    pub fn current_weather(&self) -> String {
        format!("{}/weather", self.base_url)
    }

    /// 5 day / 3 hour forecast.
    pub fn forecast(&self) -> String {
        format!("{}/forecast", self.base_url)
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Everything the session needs besides the user's answers.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Pre-validated key; when absent the session prompts for one.
    pub api_key: Option<ApiKey>,
    pub endpoints: Endpoints,
    /// Directory that receives saved forecast files.
    pub output_dir: PathBuf,
}

impl Settings {
    /// Defaults: prompt for the key, public API, files next to the executable.
    pub fn load() -> Result<Self> {
        Ok(Self {
            api_key: None,
            endpoints: Endpoints::default(),
            output_dir: default_output_dir()?,
        })
    }

    pub fn with_api_key(mut self, api_key: Option<ApiKey>) -> Self {
        if api_key.is_some() {
            self.api_key = api_key;
        }
        self
    }

    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        if let Some(url) = base_url {
            self.endpoints = Endpoints::new(url);
        }
        self
    }

    pub fn with_output_dir(mut self, dir: Option<PathBuf>) -> Self {
        if let Some(dir) = dir {
            self.output_dir = dir;
        }
        self
    }
}

/// The directory containing the running executable.
pub fn default_output_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe()
        .context("Failed to locate the running executable")?;
    let exe = exe.canonicalize().unwrap_or(exe);

    let Some(dir) = exe.parent() else {
        bail!("Executable path has no parent directory: {}", exe.display());
    };
    Ok(dir.to_path_buf())
}
