//! Configuration loader. A JSON file selects the algorithm and its cost
//! parameters; every section is optional and falls back to the documented
//! defaults. The hasher built from it is immutable.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::crypto::argon2id::Argon2idHasher;
use crate::crypto::bcrypt::BcryptHasher;
use crate::crypto::hasher::{Algorithm, Hasher};
use crate::crypto::params::{Argon2Params, ParamLimits};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file unreadable: {0}")]
    Io(String),
    #[error("config parse failed: {0}")]
    Parse(String),
    #[error("invalid hasher configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BcryptConfig {
    pub cost: u32,
}

impl Default for BcryptConfig {
    fn default() -> Self {
        Self {
            cost: ::bcrypt::DEFAULT_COST,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HasherConfig {
    pub algorithm: Algorithm,
    pub argon2id: Argon2Params,
    pub bcrypt: BcryptConfig,
    pub limits: ParamLimits,
    pub debug_level: Option<String>,
}

impl Default for HasherConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Argon2id,
            argon2id: Argon2Params::default(),
            bcrypt: BcryptConfig::default(),
            limits: ParamLimits::default(),
            debug_level: None,
        }
    }
}

impl HasherConfig {
    /// Builds the configured hasher. Argon2id parameters above the
    /// configured limits are rejected rather than clamped.
    pub fn build(&self) -> Result<Hasher, ConfigError> {
        let invalid = |e: crate::error::HashError| ConfigError::Invalid(format!("{e}"));
        match self.algorithm {
            Algorithm::Argon2id => {
                let hasher = Argon2idHasher::new(self.argon2id)
                    .and_then(|h| h.with_limits(self.limits))
                    .map_err(invalid)?;
                Ok(Hasher::Argon2id(hasher))
            }
            Algorithm::Bcrypt => {
                let hasher = BcryptHasher::new(self.bcrypt.cost).map_err(invalid)?;
                Ok(Hasher::Bcrypt(hasher))
            }
        }
    }
}

/// Reads and parses the JSON configuration file.
pub fn load_config(path: impl AsRef<Path>) -> Result<HasherConfig, ConfigError> {
    let raw_json = fs::read_to_string(&path).map_err(|e| ConfigError::Io(format!("{e}")))?;
    serde_json::from_str(&raw_json).map_err(|e| ConfigError::Parse(format!("{e}")))
}
