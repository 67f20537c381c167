//! Infrastructure layer for condo-quorum
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod storage;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileLoggingConfig, FileOutputConfig,
    FileOutputFormat, FileProxyConfig, FileQuorumConfig, FileVotingConfig,
};
pub use logging::{EventLogError, JsonlEventLog, TracingEventPublisher};
pub use storage::{GovernanceSnapshot, InMemoryGovernanceStore, JsonSnapshotFile, SnapshotError};
