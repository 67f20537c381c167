//! Evaluate Quorum use case
//!
//! Reads one consistent meeting snapshot and runs the weighted quorum
//! computation over it.

use crate::config::GovernanceConfig;
use crate::ports::clock::{Clock, SystemClock};
use crate::ports::repository::{GovernanceRepository, MeetingSnapshot, RepositoryError};
use condo_domain::{MeetingId, MemberWeight, QuorumResult, compute_quorum, member_weights};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum EvaluateQuorumError {
    #[error("Unknown meeting: {0}")]
    UnknownMeeting(MeetingId),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Use case for evaluating a meeting's quorum
pub struct EvaluateQuorumUseCase<R: GovernanceRepository + 'static> {
    repository: Arc<R>,
    default_percentage: f64,
    clock: Arc<dyn Clock>,
}

impl<R: GovernanceRepository + 'static> EvaluateQuorumUseCase<R> {
    pub fn new(repository: Arc<R>, config: &GovernanceConfig) -> Self {
        Self {
            repository,
            default_percentage: config.quorum_default_percentage,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Evaluate quorum against the meeting's own requirement, or the
    /// configured default when it has none.
    pub async fn execute(&self, meeting: &MeetingId) -> Result<QuorumResult, EvaluateQuorumError> {
        let snapshot = self.snapshot(meeting).await?;
        let required = snapshot
            .meeting
            .quorum_percentage_or(self.default_percentage);

        let result = compute_quorum(
            meeting,
            &snapshot.members,
            &snapshot.attendance,
            &snapshot.proxies,
            required,
            self.clock.now(),
        );

        info!(
            "Quorum for {}: {:.2}% of {:.2}% required ({})",
            meeting,
            result.quorum_percentage,
            required,
            if result.quorum_reached {
                "reached"
            } else {
                "not reached"
            }
        );
        Ok(result)
    }

    /// Per-member weight breakdown for the meeting.
    pub async fn member_weights(
        &self,
        meeting: &MeetingId,
    ) -> Result<Vec<MemberWeight>, EvaluateQuorumError> {
        let snapshot = self.snapshot(meeting).await?;
        let weights = member_weights(
            meeting,
            &snapshot.members,
            &snapshot.attendance,
            &snapshot.proxies,
            self.clock.now(),
        );
        debug!("Resolved weights for {} members of {}", weights.len(), meeting);
        Ok(weights)
    }

    async fn snapshot(&self, meeting: &MeetingId) -> Result<MeetingSnapshot, EvaluateQuorumError> {
        self.repository
            .meeting_snapshot(meeting)
            .await?
            .ok_or_else(|| EvaluateQuorumError::UnknownMeeting(meeting.clone()))
    }
}
