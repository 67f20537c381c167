//! Ballot validation errors

use crate::core::ids::MemberId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VoteError {
    #[error("A vote for {member} on this agenda item has already been recorded")]
    DuplicateVote { member: MemberId },

    #[error("Member {0} is not eligible to vote")]
    NotEligible(MemberId),

    #[error("Choice '{0}' is not offered on this ballot")]
    ChoiceNotAllowed(String),

    #[error("{grantee} holds no active proxy from {grantor} for this meeting")]
    NoActiveProxy { grantor: MemberId, grantee: MemberId },

    #[error("Grantor {0} is present and votes for themself")]
    GrantorPresent(MemberId),
}
