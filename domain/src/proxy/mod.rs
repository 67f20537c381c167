//! Proxy (delegation) domain
//!
//! A grantor delegates their vote to a grantee, either for a single meeting
//! or generally (every meeting until revoked). The registry enforces the
//! legal constraints:
//!
//! - no self delegation
//! - at most one active outgoing proxy per grantor in overlapping scopes
//! - at most N active incoming proxies per grantee for any meeting (default 2)
//! - no circular pair between grantor and grantee
//!
//! Revocation ends the validity window; hard deletion removes the record.

pub mod entities;
pub mod error;
pub mod registry;

pub use entities::{NewProxy, Proxy, ProxyScope};
pub use error::ProxyError;
pub use registry::{DEFAULT_MAX_PROXIES_PER_GRANTEE, ProxyRegistry, active_for_meeting};
