//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.
//!
//! ```toml
//! [proxy]
//! max_per_grantee = 2
//!
//! [quorum]
//! required_percentage = 50.0
//!
//! [voting]
//! default_majority = "simple"
//!
//! [output]
//! format = "full"
//! color = true
//!
//! [logging]
//! event_log = "~/.local/share/condo-quorum/events.jsonl"
//! ```

mod logging;
mod output;
mod proxy;
mod quorum;
mod voting;

pub use logging::FileLoggingConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use proxy::FileProxyConfig;
pub use quorum::FileQuorumConfig;
pub use voting::FileVotingConfig;

use condo_application::GovernanceConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigValidationError {
    #[error("quorum.required_percentage must be between 0 and 100, got {0}")]
    InvalidPercentage(f64),

    #[error("proxy.max_per_grantee cannot be 0")]
    ZeroProxyLimit,

    #[error("voting.default_majority: {0}")]
    UnknownMajorityRule(String),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Proxy delegation limits
    pub proxy: FileProxyConfig,
    /// Quorum defaults
    pub quorum: FileQuorumConfig,
    /// Ballot defaults
    pub voting: FileVotingConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Event log settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let percentage = self.quorum.required_percentage;
        if !(0.0..=100.0).contains(&percentage) {
            return Err(ConfigValidationError::InvalidPercentage(percentage));
        }

        if self.proxy.max_per_grantee == 0 {
            return Err(ConfigValidationError::ZeroProxyLimit);
        }

        self.voting
            .parse_default_majority()
            .map_err(ConfigValidationError::UnknownMajorityRule)?;

        Ok(())
    }

    /// Validate and convert into the parameters the use cases take.
    pub fn to_governance_config(&self) -> Result<GovernanceConfig, ConfigValidationError> {
        self.validate()?;
        let majority = self
            .voting
            .parse_default_majority()
            .map_err(ConfigValidationError::UnknownMajorityRule)?;

        Ok(GovernanceConfig::default()
            .with_max_proxies_per_grantee(self.proxy.max_per_grantee)
            .with_quorum_default_percentage(self.quorum.required_percentage)
            .with_default_majority(majority))
    }
}
