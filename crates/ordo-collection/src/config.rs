//! Collection configuration.
//!
//! # Example TOML
//!
//! ```toml
//! resolution = "topological"
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Config Field | Values |
//! |----------|--------------|--------|
//! | `ORDO_RESOLUTION` | `resolution` | `single_pass`, `topological` |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// Environment variable overriding [`CollectionConfig::resolution`].
pub const RESOLUTION_ENV_VAR: &str = "ORDO_RESOLUTION";

/// How deferred before/after items are resolved into priorities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionStrategy {
    /// One forward pass over pending items in insertion order.
    ///
    /// A pending item can only anchor to a pending pivot that was inserted
    /// earlier. Anything else is reported as
    /// [`OrderError::UnresolvableOrdering`](crate::OrderError::UnresolvableOrdering).
    #[default]
    SinglePass,
    /// Depth-first resolution that follows pending-on-pending chains in
    /// any insertion order. Only cycles are unresolvable.
    Topological,
}

impl ResolutionStrategy {
    /// Returns the configuration string for this strategy.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SinglePass => "single_pass",
            Self::Topological => "topological",
        }
    }
}

impl fmt::Display for ResolutionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResolutionStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "single_pass" => Ok(Self::SinglePass),
            "topological" => Ok(Self::Topological),
            other => Err(format!(
                "expected 'single_pass' or 'topological', got '{other}'"
            )),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file.
    #[error("failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML.
    #[error("failed to parse config: {0}")]
    ParseToml(#[from] toml::de::Error),

    /// Failed to serialize config.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Invalid environment variable value.
    #[error("invalid value for environment variable '{name}': {message}")]
    InvalidEnvVar { name: String, message: String },
}

/// Settings for an [`OrderedCollection`](crate::OrderedCollection).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionConfig {
    /// Strategy used when resolving deferred placements.
    pub resolution: ResolutionStrategy,
}

impl CollectionConfig {
    /// Creates the default configuration (single-pass resolution).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the resolution strategy.
    #[must_use]
    pub fn with_resolution(mut self, resolution: ResolutionStrategy) -> Self {
        self.resolution = resolution;
        self
    }

    /// Parses a configuration from TOML. Missing fields take defaults.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serializes this configuration to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Loads a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content)?;
        debug!(path = %path.display(), resolution = %config.resolution, "loaded collection config");
        Ok(config)
    }

    /// Applies overrides from `ORDO_RESOLUTION`.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_env_value(std::env::var(RESOLUTION_ENV_VAR).ok().as_deref())
    }

    fn apply_env_value(&mut self, value: Option<&str>) -> Result<(), ConfigError> {
        if let Some(value) = value {
            self.resolution = value
                .parse()
                .map_err(|message| ConfigError::InvalidEnvVar {
                    name: RESOLUTION_ENV_VAR.to_string(),
                    message,
                })?;
        }
        Ok(())
    }

    /// Merges another config into this one.
    ///
    /// Fields of `other` that differ from the default override `self`.
    pub fn merge(&mut self, other: &Self) {
        if other.resolution != ResolutionStrategy::default() {
            self.resolution = other.resolution;
        }
    }
}
