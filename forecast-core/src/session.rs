//! The interactive read → fetch → display → forecast → save loop.

use anyhow::Result;
use chrono::Local;

use crate::{
    config::Settings,
    console::{Console, Prompt},
    input::{read_api_key, read_city, read_yes_no},
    model::ApiKey,
    provider::{JsonFetcher, current_weather, forecast},
    storage::save_forecast,
};

pub const WELCOME: &str = "Welcome to the Weather API Scraper";
pub const GOODBYE: &str = "Goodbye!";
pub const FORECAST_QUESTION: &str = "Do you want to see the 5 day forecast? Yes/No: ";
pub const SAVE_QUESTION: &str = "Do you want to save the data to a .json file? Yes/No: ";
pub const WEATHER_FAILED: &str = "Failed to get weather data. Please try again.";

pub struct Session<'a, F: ?Sized, C: ?Sized> {
    fetcher: &'a F,
    console: &'a mut C,
    settings: &'a Settings,
}

impl<'a, F, C> Session<'a, F, C>
where
    F: JsonFetcher + ?Sized,
    C: Console + ?Sized,
{
    pub fn new(fetcher: &'a F, console: &'a mut C, settings: &'a Settings) -> Self {
        Self {
            fetcher,
            console,
            settings,
        }
    }

    /// Run until the user enters a sentinel or closes input. Both are clean exits.
    pub async fn run(&mut self) -> Result<()> {
        self.console.say(WELCOME);

        let api_key = match &self.settings.api_key {
            Some(key) => key.clone(),
            None => match read_api_key(self.console)? {
                Prompt::Value(key) => key,
                Prompt::Exit => {
                    self.console.say(GOODBYE);
                    return Ok(());
                }
            },
        };

        while let Step::Continue = self.round(&api_key).await? {}

        self.console.say(GOODBYE);
        Ok(())
    }

    /// One pass from the city prompt back to the city prompt.
    async fn round(&mut self, key: &ApiKey) -> Result<Step> {
        let fetcher = self.fetcher;
        let settings = self.settings;
        let urls = &settings.endpoints;
        let console = &mut *self.console;

        let city = match read_city(console)? {
            Prompt::Value(city) if !city.is_exit_sentinel() => city,
            _ => return Ok(Step::Stop),
        };

        let weather = current_weather(fetcher, console, urls, key, &city).await;
        if weather.is_none() {
            console.say(WEATHER_FAILED);
            return Ok(Step::Continue);
        }

        match read_yes_no(console, FORECAST_QUESTION)? {
            Prompt::Value(true) => {}
            Prompt::Value(false) => return Ok(Step::Continue),
            Prompt::Exit => return Ok(Step::Stop),
        }

        let entries = match forecast(fetcher, console, urls, key, &city).await {
            Some(entries) if !entries.is_empty() => entries,
            _ => return Ok(Step::Continue),
        };

        match read_yes_no(console, SAVE_QUESTION)? {
            Prompt::Value(true) => {
                let now = Local::now();
                match save_forecast(&settings.output_dir, &entries, &now) {
                    Ok(path) => {
                        let shown = path.display();
                        console.say(&format!("Forecast data saved successfully to {shown}."));
                    }
                    Err(err) => {
                        tracing::warn!("failed to save forecast: {err:#}");
                        console.say(&format!("Failed to save forecast data. Error: {err:#}"));
                    }
                }
                Ok(Step::Continue)
            }
            Prompt::Value(false) => Ok(Step::Continue),
            Prompt::Exit => Ok(Step::Stop),
        }
    }
}

enum Step {
    Continue,
    Stop,
}
