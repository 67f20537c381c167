//! Governance record storage
//!
//! [`InMemoryGovernanceStore`] implements the repository port over a
//! [`GovernanceSnapshot`], which [`JsonSnapshotFile`] reads and writes.

mod memory_store;
mod snapshot;

pub use memory_store::InMemoryGovernanceStore;
pub use snapshot::{GovernanceSnapshot, JsonSnapshotFile, SnapshotError};
