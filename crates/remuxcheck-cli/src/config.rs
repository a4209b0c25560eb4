//! TOML configuration file.
//!
//! ```toml
//! [paste]
//! ignore_after_line = "-- signature --"
//! ignore_until_blank_line_prefixes = ["Disc Label:"]
//!
//! [check]
//! release_group = "GRouP"
//! internal_channels = ["internal-remux"]
//! cuts = ["Extended", "Theatrical"]
//!
//! [services]
//! dictionary = "/usr/share/hunspell/en_US.dic"
//! ```

use remuxcheck_lint::services::{ServiceError, WordListSpellChecker};
use remuxcheck_lint::{CheckConfig, Services};
use remuxcheck_paste::ParserConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors while loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// Offline service settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServicesConfig {
    /// Word list or hunspell `.dic` file for the spelling rule.
    pub dictionary: Option<PathBuf>,
}

/// Contents of a `--config` file. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub paste: ParserConfig,
    pub check: CheckConfig,
    pub services: ServicesConfig,
}

impl AppConfig {
    /// Parses configuration text; `origin` only labels errors.
    pub fn parse(text: &str, origin: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_string(),
            source,
        })
    }

    /// Reads and parses a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::parse(&text, &path.display().to_string())?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Loads `path` when given, else the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    /// Offline services, with the configured dictionary when there is one.
    pub fn services(&self) -> Result<Services, ConfigError> {
        let services = Services::offline();
        match self.services.dictionary.as_deref() {
            Some(path) => Ok(services.with_spell_checker(WordListSpellChecker::load(path)?)),
            None => Ok(services),
        }
    }
}
