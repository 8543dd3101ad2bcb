//! Election configuration with TOML file support.

use ballot_election::{Election, ElectionError};
use ballot_types::{ProposalName, VoterAddress};
use ballot_utils::LogFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid election config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to encode election config: {0}")]
    Encode(#[from] toml::ser::Error),
}

/// Everything needed to open an election.
///
/// ```toml
/// administrator = "chairperson"
/// proposals = ["P1", "P2", "P3"]
/// max_name_len = 32
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ElectionConfig {
    /// Identity allowed to grant voting rights.
    pub administrator: VoterAddress,

    /// Proposal names, in ballot order.
    pub proposals: Vec<String>,

    /// Byte limit on each proposal name.
    #[serde(default = "default_max_name_len")]
    pub max_name_len: usize,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_max_name_len() -> usize {
    ProposalName::DEFAULT_MAX_LEN
}

fn default_log_level() -> String {
    "info".to_string()
}

impl ElectionConfig {
    pub fn new(administrator: VoterAddress, proposals: Vec<String>) -> Self {
        Self {
            administrator,
            proposals,
            max_name_len: default_max_name_len(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
        }
    }

    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Open a fresh election from this configuration.
    pub fn build(&self) -> Result<Election, ElectionError> {
        Election::new(
            self.administrator.clone(),
            self.proposals.iter().cloned(),
            self.max_name_len,
        )
    }
}
