//! Prompt loops that keep asking until the user enters something acceptable.

use anyhow::Result;
use regex::Regex;
use std::sync::LazyLock;

use crate::{
    console::{Console, Prompt},
    model::{ApiKey, City},
};

/// Letters (including Latin-1 accented letters), apostrophe, hyphen and space.
const CITY_PATTERN: &str = r"^[a-zA-ZÀ-ÿ' -]+$";
const API_KEY_PATTERN: &str = r"^[a-f0-9]{32}$";

static CITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(CITY_PATTERN).expect("valid regex"));
static API_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(API_KEY_PATTERN).expect("valid regex"));

pub const CITY_PROMPT: &str = "Enter city name or 'q' to exit: ";
pub const API_KEY_PROMPT: &str = "Enter your OpenWeatherMap API key or 'q' to exit: ";
pub const API_KEY_HINT: &str = "You need an API key to access the OpenWeatherMap API. \
     You can get one by signing up at https://home.openweathermap.org/users/sign_up";

/// Typing this at the API key prompt (any case) ends the program.
const API_KEY_EXIT: &str = "q";

pub fn is_valid_city(input: &str) -> bool {
    CITY_RE.is_match(input)
}

pub fn is_valid_api_key(input: &str) -> bool {
    API_KEY_RE.is_match(input)
}

/// `Some(true)` for yes/y, `Some(false)` for no/n, `None` for anything else.
pub fn parse_yes_no(input: &str) -> Option<bool> {
    match input.trim().to_lowercase().as_str() {
        "yes" | "y" => Some(true),
        "no" | "n" => Some(false),
        _ => None,
    }
}

/// Read a city name. A literal `q` is a valid city; the caller decides what it means.
pub fn read_city<C: Console + ?Sized>(console: &mut C) -> Result<Prompt<City>> {
    loop {
        let Some(line) = console.ask(CITY_PROMPT)? else {
            return Ok(Prompt::Exit);
        };

        match line.parse::<City>() {
            Ok(city) => return Ok(Prompt::Value(city)),
            Err(err) => console.say(&err.to_string()),
        }
    }
}

pub fn read_api_key<C: Console + ?Sized>(console: &mut C) -> Result<Prompt<ApiKey>> {
    loop {
        console.say(API_KEY_HINT);
        let Some(line) = console.ask(API_KEY_PROMPT)? else {
            return Ok(Prompt::Exit);
        };

        if line.trim().eq_ignore_ascii_case(API_KEY_EXIT) {
            return Ok(Prompt::Exit);
        }

        match line.parse::<ApiKey>() {
            Ok(key) => return Ok(Prompt::Value(key)),
            Err(err) => console.say(&err.to_string()),
        }
    }
}

pub fn read_yes_no<C: Console + ?Sized>(console: &mut C, prompt: &str) -> Result<Prompt<bool>> {
    loop {
        let Some(line) = console.ask(prompt)? else {
            return Ok(Prompt::Exit);
        };

        match parse_yes_no(&line) {
            Some(answer) => return Ok(Prompt::Value(answer)),
            None => console.say("Invalid input. Please only choose between yes or no."),
        }
    }
}
