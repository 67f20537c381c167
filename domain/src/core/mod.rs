//! Core domain concepts shared across all subdomains.
//!
//! - [`ids`]: identifier newtypes (`MemberId`, `MeetingId`, `ProxyId`, ...)
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod ids;
