//! Quorum domain
//!
//! Determines whether enough voting weight is represented at a meeting,
//! counting delegated weight only where the grantor is absent and the
//! grantee is present.

pub mod evaluator;
pub mod result;

pub use evaluator::compute_quorum;
pub use result::QuorumResult;
