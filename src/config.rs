//! Quiz configuration.

use crate::countries::{
    DEFAULT_API_URL, DatasetProvider, FetchError, JsonFileDataset, RestCountriesClient,
};
use crate::quiz::TOTAL_QUESTIONS;
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Settings for a quiz host.
///
/// Loaded from TOML; every field has a default, so an empty file is valid.
/// Command-line flags are applied on top with the `with_*` setters.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct QuizConfig {
    /// Questions per game.
    #[serde(default = "default_question_count")]
    question_count: usize,

    /// REST Countries base URL.
    #[serde(default = "default_api_url")]
    #[setters(into)]
    api_url: String,

    /// HTTP timeout for the dataset fetch, in seconds.
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,

    /// RNG seed for reproducible games.
    #[serde(default)]
    #[setters(strip_option)]
    seed: Option<u64>,

    /// Local JSON dataset used instead of the API.
    #[serde(default)]
    #[setters(strip_option, into)]
    dataset_path: Option<PathBuf>,
}

fn default_question_count() -> usize {
    TOTAL_QUESTIONS
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            question_count: default_question_count(),
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
            seed: None,
            dataset_path: None,
        }
    }
}

impl QuizConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        info!(question_count = config.question_count, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, defaults otherwise.
    #[instrument]
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) if path.exists() => Self::from_file(path),
            Some(path) => {
                info!("Config file not found at {}, using defaults", path.display());
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Rejects settings no game can run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.question_count == 0 {
            return Err(ConfigError::new("question_count must be at least 1".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::new("timeout_secs must be at least 1".to_string()));
        }
        if self.api_url.trim().is_empty() {
            return Err(ConfigError::new("api_url must not be empty".to_string()));
        }
        Ok(())
    }

    /// Fetch timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The dataset source this configuration selects: the local file if
    /// one is set, the REST Countries API otherwise.
    #[instrument(skip(self))]
    pub fn dataset_provider(&self) -> Result<Box<dyn DatasetProvider>, FetchError> {
        match &self.dataset_path {
            Some(path) => {
                debug!(path = %path.display(), "Using local dataset");
                Ok(Box::new(JsonFileDataset::new(path.clone())))
            }
            None => {
                debug!(api_url = %self.api_url, "Using REST Countries API");
                Ok(Box::new(RestCountriesClient::new(&self.api_url, self.timeout())?))
            }
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
