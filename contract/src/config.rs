//! Contract configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::Path;

use ballot_utils::LogFormat;

use crate::ContractError;

/// Deployment-time settings for the voting contract.
///
/// Loaded from a TOML file via [`ContractConfig::from_toml_file`] or built
/// programmatically (e.g. for tests). Every replica must run with the same
/// values, since `require_live_election` changes which votes are accepted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractConfig {
    /// Reject ballots unless the election status is `live`.
    #[serde(default)]
    pub require_live_election: bool,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl ContractConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ContractError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ContractError::Config(format!("{}: {e}", path.as_ref().display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ContractError> {
        toml::from_str(s).map_err(|e| ContractError::Config(e.to_string()))
    }

    pub fn to_toml_string(&self) -> Result<String, ContractError> {
        toml::to_string_pretty(self).map_err(|e| ContractError::Config(e.to_string()))
    }

    /// The configured log format, parsed.
    pub fn log_format(&self) -> Result<LogFormat, ContractError> {
        self.log_format.parse().map_err(ContractError::Config)
    }

    /// Install the global tracing subscriber described by this config.
    pub fn init_logging(&self) -> Result<(), ContractError> {
        ballot_utils::try_init_logging(self.log_format()?, &self.log_level)
            .map_err(|e| ContractError::Config(e.to_string()))
    }
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            require_live_election: false,
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}
