//! Proxy validation errors

use crate::core::ids::ProxyId;
use thiserror::Error;

/// Errors raised by the proxy registry
///
/// All are deterministic given the same input; retrying without changing
/// the input fails the same way.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProxyError {
    #[error("A member cannot delegate their vote to themselves")]
    SelfDelegation,

    #[error("Proxy validity ends before it starts")]
    EmptyValidityWindow,

    #[error("Grantor already has an active proxy for this scope")]
    DuplicateGrantorProxy,

    #[error("Grantee already holds the maximum of {limit} active proxies")]
    GranteeLimitExceeded { limit: usize },

    #[error("Grantee already delegates to the grantor; proxies cannot be circular")]
    CircularProxy,

    #[error("Proxy not found: {0}")]
    NotFound(ProxyId),
}

impl ProxyError {
    /// Input broke a delegation rule
    pub fn is_validation(&self) -> bool {
        !self.is_not_found()
    }

    /// Reference to a proxy that does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, ProxyError::NotFound(_))
    }
}
