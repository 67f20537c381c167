//! Use cases
//!
//! Application-level operations that orchestrate domain logic: read a
//! snapshot through the repository port, apply the governance rules, persist
//! the outcome, then publish an event.

pub mod cast_vote;
pub mod evaluate_quorum;
pub mod manage_proxies;
pub mod record_attendance;
pub mod schedule_meeting;
pub mod tally_votes;

#[cfg(test)]
pub(crate) mod test_support;
