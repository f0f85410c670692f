use std::{
    fs::File,
    io::{BufReader, ErrorKind, Read},
};

use serde::Deserialize;
use thiserror::Error;

/// Theme flag supplied by the host; the plot itself never owns theme state.
#[derive(Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Light
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub theme: Theme,
}

impl Config {
    /// A missing config.toml is fine; a malformed one is a startup error.
    pub fn load_or_default() -> Result<Config, ConfigLoadError> {
        let file = match File::open("config.toml") {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Config::default()),
            Err(e) => return Err(e.into()),
        };
        let mut s = String::new();
        BufReader::new(file).read_to_string(&mut s)?;
        Ok(toml::from_str(&s)?)
    }
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("{0}")]
    IOError(#[from] std::io::Error),
    #[error("{0}")]
    IllegalConfigEntry(#[from] toml::de::Error),
}
