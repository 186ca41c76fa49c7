use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::{
    fmt::Display,
    fs,
    path::{Path, PathBuf},
};

use crate::model::ForecastEntry;

const FILE_PREFIX: &str = "weather_forecast_";
/// Minute resolution: two saves within the same minute share a file and the last one wins.
const STAMP_FORMAT: &str = "%Y-%m-%d_%H-%M";

pub fn forecast_file_name<Tz>(now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!("{FILE_PREFIX}{}.json", now.format(STAMP_FORMAT))
}

/// Write `entries` as 4-space indented JSON into `dir`, replacing any same-named file.
pub fn save_forecast<Tz>(
    dir: &Path,
    entries: &[ForecastEntry],
    now: &DateTime<Tz>,
) -> Result<PathBuf>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let path = dir.join(forecast_file_name(now));

    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = Serializer::with_formatter(&mut buf, formatter);
    entries
        .serialize(&mut ser)
        .context("Failed to serialize forecast data to JSON")?;

    fs::write(&path, buf).with_context(|| {
        format!("Failed to write forecast file: {}", path.display())
    })?;

    tracing::debug!(path = %path.display(), entries = entries.len(), "forecast saved");
    Ok(path)
}

/// Read back a file written by [`save_forecast`].
pub fn load_forecast(path: &Path) -> Result<Vec<ForecastEntry>> {
    let contents = fs::read_to_string(path).with_context(|| {
        format!("Failed to read forecast file: {}", path.display())
    })?;

    serde_json::from_str(&contents).with_context(|| {
        format!("Failed to parse forecast file: {}", path.display())
    })
}
