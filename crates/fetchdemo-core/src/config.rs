//! Configuration for the fixture client and the simulated delays.
//!
//! Values come from built-in defaults, then an optional TOML file, then
//! `FETCHDEMO_*` environment variables. The result is read-only once loaded.

use crate::{Error, Result};
use core::time::Duration;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Public fixture API the demo talks to by default.
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";
/// Simulated latency of every callback stage.
pub const DEFAULT_DELAY_MS: u64 = 1000;

/// Overrides `api.base_url`.
pub const ENV_BASE_URL: &str = "FETCHDEMO_BASE_URL";
/// Overrides `api.lenient`.
pub const ENV_LENIENT: &str = "FETCHDEMO_LENIENT";
/// Overrides both `chain.stage_delay_ms` and `chain.step_delay_ms`.
pub const ENV_DELAY_MS: &str = "FETCHDEMO_DELAY_MS";

/// Complete demo configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Fixture API settings
    pub api: ApiConfig,
    /// Callback demo timing
    pub chain: ChainConfig,
}

/// Fixture API settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL; `/users` and `/posts` are appended to it
    pub base_url: String,
    /// Log non-success statuses and keep parsing instead of failing
    pub lenient: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            lenient: false,
        }
    }
}

/// Simulated latencies for the callback demo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    /// Delay before each login-flow continuation fires
    pub stage_delay_ms: u64,
    /// Delay between the nested log steps
    pub step_delay_ms: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            stage_delay_ms: DEFAULT_DELAY_MS,
            step_delay_ms: DEFAULT_DELAY_MS,
        }
    }
}

impl ChainConfig {
    /// Stage delay as a [`Duration`].
    pub fn stage_delay(&self) -> Duration {
        Duration::from_millis(self.stage_delay_ms)
    }

    /// Step delay as a [`Duration`].
    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }
}

impl DemoConfig {
    /// Loads the configuration: defaults, then `path` if given, then the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if an
    /// override or the resulting base URL is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let config = config.with_env_overrides(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a TOML configuration file. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from {}", path.display());
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Applies `FETCHDEMO_*` overrides resolved through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns an error if an override cannot be parsed.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(ENV_BASE_URL) {
            self.api.base_url = base_url;
        }
        if let Some(lenient) = lookup(ENV_LENIENT) {
            self.api.lenient = parse_flag(ENV_LENIENT, &lenient)?;
        }
        if let Some(delay) = lookup(ENV_DELAY_MS) {
            let delay_ms = delay.trim().parse::<u64>().map_err(|err| {
                Error::Config(format!("{ENV_DELAY_MS} must be a number of milliseconds: {err}"))
            })?;
            self.chain.stage_delay_ms = delay_ms;
            self.chain.step_delay_ms = delay_ms;
        }
        Ok(self)
    }

    /// Checks that the base URL is an absolute http(s) URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] describing the problem.
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.api.base_url)
            .map_err(|err| Error::Config(format!("invalid base_url {:?}: {err}", self.api.base_url)))?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(Error::Config(format!(
                "base_url must use http or https, got {scheme}"
            ))),
        }
    }

    /// Renders the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|err| Error::Config(err.to_string()))
    }
}

/// Parses a boolean environment flag.
fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(Error::Config(format!("{key} must be a boolean, got {other:?}"))),
    }
}
