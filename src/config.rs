//! User configuration.
//!
//! Settings come from an optional TOML file in the user's config directory.
//! A missing file means defaults; a malformed one is an error.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default Gemini model for math questions.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Low temperature keeps answers deterministic.
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Checked when the primary variable is unset.
pub const FALLBACK_API_KEY_ENV: &str = "API_KEY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ai: AiSettings,
}

/// AI assistant settings. The API key itself is never stored here, only
/// the name of the environment variable holding it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiSettings {
    pub model: String,
    pub temperature: f32,
    pub api_key_env: String,
    pub fallback_env: Option<String>,
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            fallback_env: Some(FALLBACK_API_KEY_ENV.to_string()),
        }
    }
}

impl AiSettings {
    /// Look up the API key in the environment.
    pub fn api_key(&self) -> Option<String> {
        std::iter::once(self.api_key_env.as_str())
            .chain(self.fallback_env.as_deref())
            .find_map(|name| env::var(name).ok().filter(|key| !key.trim().is_empty()))
    }

    /// The variables searched for the key, as `"A or B"`.
    pub fn key_variables(&self) -> String {
        match &self.fallback_env {
            Some(fallback) => format!("{} or {}", self.api_key_env, fallback),
            None => self.api_key_env.clone(),
        }
    }
}

impl Config {
    /// Default location: `<config_dir>/zcalc/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("zcalc").join("config.toml"))
    }

    /// Load from `path`, or from the default location when `None`.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) => path,
                None => return Ok(Self::default()),
            },
        };

        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let text = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let config = Self::parse(&text).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;

        tracing::debug!(path = %path.display(), model = %config.ai.model, "loaded config");
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}
