//! Application layer for condo-quorum
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{GovernanceConfig, ProxyPolicy};
pub use ports::{
    clock::{Clock, FixedClock, SystemClock},
    events::{GovernanceEvent, GovernanceEventPublisher, NoEventPublisher},
    repository::{GovernanceRepository, MeetingSnapshot, RepositoryError},
};
pub use use_cases::cast_vote::{CastVoteError, CastVoteUseCase};
pub use use_cases::evaluate_quorum::{EvaluateQuorumError, EvaluateQuorumUseCase};
pub use use_cases::manage_proxies::{ManageProxiesError, ManageProxiesUseCase};
pub use use_cases::record_attendance::{RecordAttendanceError, RecordAttendanceUseCase};
pub use use_cases::schedule_meeting::{ScheduleMeetingError, ScheduleMeetingUseCase};
pub use use_cases::tally_votes::{TallyVotesError, TallyVotesUseCase};
