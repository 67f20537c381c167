//! Domain error types

use crate::ballot::VoteError;
use crate::proxy::ProxyError;
use crate::schedule::ScheduleError;
use thiserror::Error;

/// Domain-level errors
///
/// Wraps the error kinds of each calculation component so callers that only
/// care about "bad request" vs "stale reference" can branch on
/// [`is_validation`](Self::is_validation) / [`is_not_found`](Self::is_not_found).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error(transparent)]
    Proxy(#[from] ProxyError),

    #[error(transparent)]
    Vote(#[from] VoteError),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

impl DomainError {
    /// The input broke a governance rule; the caller must change it.
    pub fn is_validation(&self) -> bool {
        match self {
            DomainError::Proxy(e) => e.is_validation(),
            DomainError::Vote(_) => true,
            DomainError::Schedule(_) => false,
        }
    }

    /// The operation referenced a record that does not exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            DomainError::Proxy(e) => e.is_not_found(),
            DomainError::Vote(_) => false,
            DomainError::Schedule(ScheduleError::UnknownOption(_)) => true,
        }
    }
}
