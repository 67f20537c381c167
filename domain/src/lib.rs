//! Domain layer for condo-quorum
//!
//! This crate contains the entities and the weighted governance calculation
//! core. It has no dependencies on infrastructure or presentation concerns:
//! every operation is a deterministic function over snapshots passed in by
//! the caller.
//!
//! # Core Concepts
//!
//! ## Weighted membership
//!
//! Each member carries a voting weight (e.g. an ownership share). Observers
//! and inactive members never count.
//!
//! ## Proxies
//!
//! A grantor may delegate their vote to a grantee, generally or for one
//! meeting. Delegated weight counts only while the grantor is absent.
//!
//! ## Decisions
//!
//! - **Quorum**: weighted presence (plus delegated weight) against a
//!   required percentage
//! - **Tally**: weighted yes/no/abstain under a majority rule
//! - **Schedule consensus**: unweighted yes/maybe/no scoring of candidate dates
//!
//! ```text
//! Entity Model ─► Proxy Registry ─► Weight Resolver ─► Quorum Evaluator
//!        └──────────────► Vote Tally / Schedule Consensus
//! ```

pub mod attendance;
pub mod ballot;
pub mod config;
pub mod core;
pub mod meeting;
pub mod member;
pub mod proxy;
pub mod quorum;
pub mod schedule;
pub mod weight;

// Re-export commonly used types
pub use attendance::{Attendance, AttendanceKind, present_member_ids};
pub use ballot::{
    BallotChoice, BallotKind, MajorityRule, Vote, VoteError, VoteLedger, VoteResult, tally,
};
pub use config::OutputFormat;
pub use core::{
    error::DomainError,
    ids::{AgendaItemId, MeetingId, MemberId, OrganizationId, ProxyId, ScheduleOptionId},
};
pub use meeting::{AgendaItem, Meeting};
pub use member::{Member, MemberRole};
pub use proxy::{NewProxy, Proxy, ProxyError, ProxyRegistry, ProxyScope, active_for_meeting};
pub use quorum::{QuorumResult, compute_quorum};
pub use schedule::{
    OptionScore, Preference, ScheduleError, ScheduleOption, ScheduleVote, calculate_winner,
};
pub use weight::{MemberWeight, WeightLookup, effective_weight, member_weights, voting_power};
