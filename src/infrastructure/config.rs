//! Configuration management

use crate::error::{DayportError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Settings file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "dayport.toml";

/// Environment variable overriding `geocode.api_key`
pub const GEOCODE_KEY_ENV: &str = "DAYPORT_GEOCODE_KEY";

pub const DEFAULT_GEOCODE_ENDPOINT: &str = "https://us1.locationiq.com/v1";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub journal: JournalConfig,
    pub geocode: GeocodeConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JournalConfig {
    /// Name given to imported journals when none is passed on the command line
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocodeConfig {
    pub enabled: bool,
    pub api_key: Option<String>,
    pub endpoint: String,
}

impl Default for GeocodeConfig {
    fn default() -> Self {
        GeocodeConfig {
            enabled: true,
            api_key: None,
            endpoint: DEFAULT_GEOCODE_ENDPOINT.to_string(),
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `dayport.toml` in the working
    /// directory is used when present, and defaults otherwise. The
    /// `DAYPORT_GEOCODE_KEY` environment variable is applied last.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Self::load_from_file(default_path)?
                } else {
                    Config::default()
                }
            }
        };

        config.apply_overrides(std::env::var(GEOCODE_KEY_ENV).ok());
        Ok(config)
    }

    /// Load config from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                DayportError::Config(format!("Config file not found: {}", path.display()))
            } else {
                DayportError::Io(e)
            }
        })?;

        toml::from_str(&contents).map_err(|e| {
            DayportError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    /// Apply values taken from the environment
    pub fn apply_overrides(&mut self, geocode_key: Option<String>) {
        if let Some(key) = geocode_key.filter(|key| !key.is_empty()) {
            self.geocode.api_key = Some(key);
        }
    }
}
