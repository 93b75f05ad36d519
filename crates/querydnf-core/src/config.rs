//! Transform configuration.
//!
//! Configuration is read from TOML:
//!
//! ```toml
//! [transform]
//! max_disjuncts = 4096
//! ```
//!
//! Missing keys fall back to defaults; unknown keys are rejected.

use crate::{DEFAULT_MAX_DISJUNCTS, error::InternalError};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Invalid(String),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl From<ConfigError> for InternalError {
    fn from(err: ConfigError) -> Self {
        Self::config_internal(err.to_string())
    }
}

///
/// ConfigFile
///
/// Top-level layout of a config document.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub transform: TransformConfig,
}

///
/// TransformConfig
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransformConfig {
    /// Upper bound on the disjuncts a single distribution may emit.
    pub max_disjuncts: usize,
}

impl TransformConfig {
    #[must_use]
    pub const fn with_max_disjuncts(mut self, max_disjuncts: usize) -> Self {
        self.max_disjuncts = max_disjuncts;
        self
    }

    /// Parse a TOML config document and return its `[transform]` table.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(source)?;
        file.transform.validate()?;

        Ok(file.transform)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_disjuncts == 0 {
            return Err(ConfigError::Invalid(
                "transform.max_disjuncts must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            max_disjuncts: DEFAULT_MAX_DISJUNCTS,
        }
    }
}

///
/// TESTS
///
