//! Application-level configuration.
//!
//! - [`GovernanceConfig`]: proxy limit, quorum fallback, default majority

pub mod governance_config;

pub use governance_config::{DEFAULT_QUORUM_PERCENTAGE, GovernanceConfig, ProxyPolicy};
