//! Configuration handling for preview generation.
//!
//! Settings come from environment variables with development defaults.
//! The CLI layers its own flags on top via [`Config::new`].

use std::env;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::fetcher::client::{DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};

/// Environment variable names.
pub const ENV_CACHE_DIR: &str = "PREVIEW_CACHE_DIR";
pub const ENV_TIMEOUT_SECS: &str = "PREVIEW_TIMEOUT_SECS";
pub const ENV_USER_AGENT: &str = "PREVIEW_USER_AGENT";
pub const ENV_TITLE_MODE: &str = "PREVIEW_TITLE_MODE";

pub const DEFAULT_CACHE_DIR: &str = "_cache";

/// How a directive's quoted title interacts with title extraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TitleMode {
    /// Extraction only runs when a quoted title was given, and the quoted
    /// title itself is never shown. Matches snippets cached by earlier
    /// versions of the tag.
    #[default]
    Legacy,
    /// Extraction always runs; a quoted title replaces the extracted one.
    Fixed,
}

impl FromStr for TitleMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" => Ok(Self::Legacy),
            "fixed" => Ok(Self::Fixed),
            other => Err(ConfigError::InvalidValue {
                field: ENV_TITLE_MODE,
                reason: format!("expected 'legacy' or 'fixed', got '{other}'"),
            }),
        }
    }
}

impl Display for TitleMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Legacy => f.write_str("legacy"),
            Self::Fixed => f.write_str("fixed"),
        }
    }
}

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    cache_dir: PathBuf,
    fetch_timeout: Duration,
    user_agent: String,
    title_mode: TitleMode,
}

impl Config {
    pub fn new(
        cache_dir: impl Into<PathBuf>,
        fetch_timeout: Duration,
        user_agent: impl Into<String>,
        title_mode: TitleMode,
    ) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            fetch_timeout,
            user_agent: user_agent.into(),
            title_mode,
        }
    }

    /// Load from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let cache_dir = env::var(ENV_CACHE_DIR).unwrap_or_else(|_| DEFAULT_CACHE_DIR.to_string());
        let fetch_timeout = match env::var(ENV_TIMEOUT_SECS) {
            Ok(raw) => parse_timeout_secs(&raw)?,
            Err(_) => DEFAULT_TIMEOUT,
        };
        let user_agent =
            env::var(ENV_USER_AGENT).unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string());
        let title_mode = match env::var(ENV_TITLE_MODE) {
            Ok(raw) => raw.parse()?,
            Err(_) => TitleMode::default(),
        };

        Ok(Self::new(cache_dir, fetch_timeout, user_agent, title_mode))
    }

    /// Directory holding one file per cached snippet.
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }
    /// Upper bound on a single page fetch.
    pub fn fetch_timeout(&self) -> Duration {
        self.fetch_timeout
    }
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
    pub fn title_mode(&self) -> TitleMode {
        self.title_mode
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(
            DEFAULT_CACHE_DIR,
            DEFAULT_TIMEOUT,
            DEFAULT_USER_AGENT,
            TitleMode::default(),
        )
    }
}

/// Parse a positive whole number of seconds.
pub fn parse_timeout_secs(raw: &str) -> Result<Duration, ConfigError> {
    let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        field: ENV_TIMEOUT_SECS,
        reason: format!("'{raw}' is not a whole number of seconds"),
    })?;
    if secs == 0 {
        return Err(ConfigError::InvalidValue {
            field: ENV_TIMEOUT_SECS,
            reason: "timeout must be greater than zero".to_string(),
        });
    }
    Ok(Duration::from_secs(secs))
}

/// Errors that can occur while building a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}
