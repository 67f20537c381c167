//! Cast Vote use case
//!
//! Records a weighted vote on an agenda item, either with the member's own
//! weight or, as a proxy, with an absent grantor's weight.

use crate::ports::clock::{Clock, SystemClock};
use crate::ports::events::{GovernanceEvent, GovernanceEventPublisher, NoEventPublisher};
use crate::ports::repository::{GovernanceRepository, MeetingSnapshot, RepositoryError};
use condo_domain::ballot::{prepare_direct_vote, prepare_proxy_vote};
use condo_domain::{
    AgendaItem, AgendaItemId, BallotChoice, DomainError, Member, MemberId, Vote, VoteError,
    active_for_meeting, present_member_ids,
};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::info;

#[derive(Error, Debug)]
pub enum CastVoteError {
    #[error("Unknown agenda item: {0}")]
    UnknownAgendaItem(AgendaItemId),

    #[error("Unknown member: {0}")]
    UnknownMember(MemberId),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl From<VoteError> for CastVoteError {
    fn from(error: VoteError) -> Self {
        CastVoteError::Domain(error.into())
    }
}

/// Use case for casting votes on agenda items
pub struct CastVoteUseCase<R: GovernanceRepository + 'static> {
    repository: Arc<R>,
    events: Arc<dyn GovernanceEventPublisher>,
    clock: Arc<dyn Clock>,
    /// Serializes the duplicate check with the insert
    write_lock: Mutex<()>,
}

impl<R: GovernanceRepository + 'static> CastVoteUseCase<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            events: Arc::new(NoEventPublisher),
            clock: Arc::new(SystemClock),
            write_lock: Mutex::new(()),
        }
    }

    pub fn with_events(mut self, events: Arc<dyn GovernanceEventPublisher>) -> Self {
        self.events = events;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Record `member`'s own vote.
    pub async fn cast(
        &self,
        item: &AgendaItemId,
        member: &MemberId,
        choice: BallotChoice,
    ) -> Result<Vote, CastVoteError> {
        let _guard = self.write_lock.lock().await;

        let item = self.agenda_item(item).await?;
        let voter = self.member(member).await?;
        let existing = self.repository.votes(&item.id).await?;

        let vote = prepare_direct_vote(&item, &voter, choice, &existing, self.clock.now())?;
        self.store(vote).await
    }

    /// Record a vote by `grantee` on behalf of `grantor`.
    pub async fn cast_for(
        &self,
        item: &AgendaItemId,
        grantee: &MemberId,
        grantor: &MemberId,
        choice: BallotChoice,
    ) -> Result<Vote, CastVoteError> {
        let _guard = self.write_lock.lock().await;

        let item = self.agenda_item(item).await?;
        let snapshot = self
            .repository
            .meeting_snapshot(&item.meeting_id)
            .await?
            .ok_or_else(|| {
                RepositoryError::NotFound(format!("meeting {} of {}", item.meeting_id, item.id))
            })?;
        let grantee = Self::roster_member(&snapshot, grantee)?;
        let grantor = Self::roster_member(&snapshot, grantor)?;
        let existing = self.repository.votes(&item.id).await?;

        let now = self.clock.now();
        let present = present_member_ids(&item.meeting_id, &snapshot.attendance);
        let vote = prepare_proxy_vote(
            &item,
            grantee,
            grantor,
            choice,
            active_for_meeting(&item.meeting_id, &snapshot.proxies, now),
            &present,
            &existing,
            now,
        )?;
        self.store(vote).await
    }

    async fn store(&self, vote: Vote) -> Result<Vote, CastVoteError> {
        self.repository.insert_vote(vote.clone()).await?;
        info!(
            "Vote on {} by {}{}: {} (weight {:.2})",
            vote.agenda_item_id,
            vote.member_id,
            vote.proxy_for
                .as_ref()
                .map(|grantor| format!(" for {}", grantor))
                .unwrap_or_default(),
            vote.choice,
            vote.weight
        );

        self.events
            .publish(GovernanceEvent::VoteCast { vote: vote.clone() });
        Ok(vote)
    }

    async fn agenda_item(&self, id: &AgendaItemId) -> Result<AgendaItem, CastVoteError> {
        self.repository
            .agenda_item(id)
            .await?
            .ok_or_else(|| CastVoteError::UnknownAgendaItem(id.clone()))
    }

    async fn member(&self, id: &MemberId) -> Result<Member, CastVoteError> {
        self.repository
            .member(id)
            .await?
            .ok_or_else(|| CastVoteError::UnknownMember(id.clone()))
    }

    fn roster_member<'a>(
        snapshot: &'a MeetingSnapshot,
        id: &MemberId,
    ) -> Result<&'a Member, CastVoteError> {
        snapshot
            .member(id)
            .ok_or_else(|| CastVoteError::UnknownMember(id.clone()))
    }
}
