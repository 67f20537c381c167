//! Proxy configuration from TOML (`[proxy]` section)

use condo_domain::proxy::DEFAULT_MAX_PROXIES_PER_GRANTEE;
use serde::{Deserialize, Serialize};

/// Raw proxy configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProxyConfig {
    /// Maximum active proxies one member may hold per meeting.
    /// Statutes sometimes raise the legal default of 2.
    pub max_per_grantee: usize,
}

impl Default for FileProxyConfig {
    fn default() -> Self {
        Self {
            max_per_grantee: DEFAULT_MAX_PROXIES_PER_GRANTEE,
        }
    }
}
