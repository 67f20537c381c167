//! Ballot domain
//!
//! Weighted votes on agenda items, the majority rules that decide them and
//! the tally that aggregates them.
//!
//! # Flow
//!
//! ```text
//! prepare_direct_vote / prepare_proxy_vote  ──►  Vote (persisted once per voter)
//!                                                   │
//!                            tally(votes, rule)  ◄──┘  ──►  VoteResult
//! ```

pub mod casting;
pub mod error;
pub mod rule;
pub mod tally;
pub mod vote;

pub use casting::{VoteLedger, ensure_not_duplicate, prepare_direct_vote, prepare_proxy_vote};
pub use error::VoteError;
pub use rule::MajorityRule;
pub use tally::{VoteResult, tally};
pub use vote::{BallotChoice, BallotKind, Vote};
