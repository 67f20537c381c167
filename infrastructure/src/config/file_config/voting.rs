//! Voting configuration from TOML (`[voting]` section)

use condo_domain::MajorityRule;
use serde::{Deserialize, Serialize};

/// Raw voting configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileVotingConfig {
    /// Majority rule for agenda items without one:
    /// "simple", "two_thirds" (or "2/3"), "unanimous"
    pub default_majority: String,
}

impl Default for FileVotingConfig {
    fn default() -> Self {
        Self {
            default_majority: MajorityRule::default().as_str().to_string(),
        }
    }
}

impl FileVotingConfig {
    /// Parse the rule string into a MajorityRule
    pub fn parse_default_majority(&self) -> Result<MajorityRule, String> {
        self.default_majority.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_default_majority() {
        let mut config = FileVotingConfig::default();
        assert_eq!(config.parse_default_majority(), Ok(MajorityRule::Simple));

        config.default_majority = "2/3".to_string();
        assert_eq!(config.parse_default_majority(), Ok(MajorityRule::TwoThirds));

        config.default_majority = "unanimous".to_string();
        assert_eq!(config.parse_default_majority(), Ok(MajorityRule::Unanimous));

        config.default_majority = "most".to_string();
        assert!(config.parse_default_majority().is_err());
    }
}
