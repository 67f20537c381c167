//! Quorum configuration from TOML (`[quorum]` section)
//!
//! ```toml
//! [quorum]
//! required_percentage = 50.0   # used when a meeting sets no requirement
//! ```

use condo_application::config::DEFAULT_QUORUM_PERCENTAGE;
use serde::{Deserialize, Serialize};

/// Raw quorum configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileQuorumConfig {
    /// Required share of total eligible weight, 0 to 100
    pub required_percentage: f64,
}

impl Default for FileQuorumConfig {
    fn default() -> Self {
        Self {
            required_percentage: DEFAULT_QUORUM_PERCENTAGE,
        }
    }
}
