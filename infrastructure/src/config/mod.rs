//! Configuration file loading for condo-quorum
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `CONDO_QUORUM_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./condo-quorum.toml` or `./.condo-quorum.toml`
//! 4. Global: `$XDG_CONFIG_HOME/condo-quorum/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileLoggingConfig, FileOutputConfig, FileOutputFormat,
    FileProxyConfig, FileQuorumConfig, FileVotingConfig,
};
pub use loader::ConfigLoader;
