//! In-memory governance store
//!
//! Holds a [`GovernanceSnapshot`] behind a `tokio::sync::RwLock`. Reads that
//! feed a calculation take one read guard, so quorum and tally always see a
//! consistent view; every write takes the write guard and re-checks the
//! storage-level uniqueness constraints before mutating.

use super::snapshot::GovernanceSnapshot;
use async_trait::async_trait;
use condo_application::ports::repository::{
    GovernanceRepository, MeetingSnapshot, RepositoryError,
};
use condo_domain::schedule::record_preference;
use condo_domain::{
    AgendaItem, AgendaItemId, Attendance, Meeting, MeetingId, Member, MemberId, OrganizationId,
    Proxy, ProxyId, ScheduleOption, ScheduleVote, Vote,
};
use tokio::sync::RwLock;
use tracing::{debug, warn};

pub struct InMemoryGovernanceStore {
    state: RwLock<GovernanceSnapshot>,
}

impl InMemoryGovernanceStore {
    pub fn new(snapshot: GovernanceSnapshot) -> Self {
        Self {
            state: RwLock::new(snapshot),
        }
    }

    /// Copy of the current state, e.g. for writing it back to disk.
    pub async fn snapshot(&self) -> GovernanceSnapshot {
        self.state.read().await.clone()
    }

    pub fn into_snapshot(self) -> GovernanceSnapshot {
        self.state.into_inner()
    }
}

impl Default for InMemoryGovernanceStore {
    fn default() -> Self {
        Self::new(GovernanceSnapshot::default())
    }
}

fn conflict(message: String) -> RepositoryError {
    warn!("Refused conflicting write: {}", message);
    RepositoryError::Conflict(message)
}

#[async_trait]
impl GovernanceRepository for InMemoryGovernanceStore {
    async fn members(&self, organization: &OrganizationId) -> Result<Vec<Member>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .members
            .iter()
            .filter(|m| &m.organization_id == organization)
            .cloned()
            .collect())
    }

    async fn member(&self, id: &MemberId) -> Result<Option<Member>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state.members.iter().find(|m| &m.id == id).cloned())
    }

    async fn meeting(&self, id: &MeetingId) -> Result<Option<Meeting>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state.meetings.iter().find(|m| &m.id == id).cloned())
    }

    async fn agenda_item(&self, id: &AgendaItemId) -> Result<Option<AgendaItem>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state.agenda_items.iter().find(|i| &i.id == id).cloned())
    }

    async fn proxies(&self, organization: &OrganizationId) -> Result<Vec<Proxy>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .proxies
            .iter()
            .filter(|p| &p.organization_id == organization)
            .cloned()
            .collect())
    }

    async fn proxy(&self, id: &ProxyId) -> Result<Option<Proxy>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state.proxies.iter().find(|p| &p.id == id).cloned())
    }

    async fn attendance(&self, meeting: &MeetingId) -> Result<Vec<Attendance>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .attendance
            .iter()
            .filter(|a| &a.meeting_id == meeting)
            .cloned()
            .collect())
    }

    async fn votes(&self, item: &AgendaItemId) -> Result<Vec<Vote>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .votes
            .iter()
            .filter(|v| &v.agenda_item_id == item)
            .cloned()
            .collect())
    }

    async fn schedule_options(
        &self,
        meeting: &MeetingId,
    ) -> Result<Vec<ScheduleOption>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .schedule_options
            .iter()
            .filter(|o| &o.meeting_id == meeting)
            .cloned()
            .collect())
    }

    async fn schedule_votes(
        &self,
        meeting: &MeetingId,
    ) -> Result<Vec<ScheduleVote>, RepositoryError> {
        let state = self.state.read().await;
        let options: Vec<_> = state
            .schedule_options
            .iter()
            .filter(|o| &o.meeting_id == meeting)
            .map(|o| &o.id)
            .collect();
        Ok(state
            .schedule_votes
            .iter()
            .filter(|v| options.contains(&&v.option_id))
            .cloned()
            .collect())
    }

    async fn meeting_snapshot(
        &self,
        meeting: &MeetingId,
    ) -> Result<Option<MeetingSnapshot>, RepositoryError> {
        let state = self.state.read().await;
        let Some(found) = state.meetings.iter().find(|m| &m.id == meeting) else {
            return Ok(None);
        };
        let organization = &found.organization_id;

        Ok(Some(MeetingSnapshot {
            meeting: found.clone(),
            members: state
                .members
                .iter()
                .filter(|m| &m.organization_id == organization)
                .cloned()
                .collect(),
            attendance: state
                .attendance
                .iter()
                .filter(|a| &a.meeting_id == meeting)
                .cloned()
                .collect(),
            proxies: state
                .proxies
                .iter()
                .filter(|p| &p.organization_id == organization)
                .cloned()
                .collect(),
        }))
    }

    async fn insert_proxy(&self, proxy: Proxy) -> Result<(), RepositoryError> {
        let mut state = self.state.write().await;

        if state.proxies.iter().any(|p| p.id == proxy.id) {
            return Err(conflict(format!("proxy id {} already exists", proxy.id)));
        }
        // validity windows, not just the start instant: an upcoming proxy
        // of the same grantor conflicts as well
        let scope = proxy.scope();
        let overlapping = proxy.has_window()
            && state.proxies.iter().any(|p| {
                p.grantor_id == proxy.grantor_id
                    && p.overlaps_window(proxy.valid_from, proxy.valid_until)
                    && p.scope().overlaps(&scope)
            });
        if overlapping {
            return Err(conflict(format!(
                "{} already has an active proxy for this scope",
                proxy.grantor_id
            )));
        }

        debug!("Storing proxy {}", proxy.id);
        state.proxies.push(proxy);
        Ok(())
    }

    async fn update_proxy(&self, proxy: Proxy) -> Result<(), RepositoryError> {
        let mut state = self.state.write().await;
        let existing = state
            .proxies
            .iter_mut()
            .find(|p| p.id == proxy.id)
            .ok_or_else(|| RepositoryError::NotFound(format!("proxy {}", proxy.id)))?;
        *existing = proxy;
        Ok(())
    }

    async fn remove_proxy(&self, id: &ProxyId) -> Result<(), RepositoryError> {
        let mut state = self.state.write().await;
        let before = state.proxies.len();
        state.proxies.retain(|p| &p.id != id);
        if state.proxies.len() == before {
            return Err(RepositoryError::NotFound(format!("proxy {}", id)));
        }
        Ok(())
    }

    async fn upsert_attendance(&self, attendance: Attendance) -> Result<(), RepositoryError> {
        let mut state = self.state.write().await;
        match state.attendance.iter_mut().find(|a| {
            a.meeting_id == attendance.meeting_id && a.member_id == attendance.member_id
        }) {
            Some(existing) => *existing = attendance,
            None => state.attendance.push(attendance),
        }
        Ok(())
    }

    async fn insert_vote(&self, vote: Vote) -> Result<(), RepositoryError> {
        let mut state = self.state.write().await;
        let duplicate = state
            .votes
            .iter()
            .any(|v| v.agenda_item_id == vote.agenda_item_id && v.voter() == vote.voter());
        if duplicate {
            return Err(conflict(format!(
                "{} already voted on {}",
                vote.voter(),
                vote.agenda_item_id
            )));
        }
        state.votes.push(vote);
        Ok(())
    }

    async fn save_schedule_options(
        &self,
        meeting: &MeetingId,
        options: Vec<ScheduleOption>,
    ) -> Result<(), RepositoryError> {
        let mut state = self.state.write().await;
        // keep the original position of the meeting's options
        let mut replacement = options.into_iter();
        let mut kept = Vec::with_capacity(state.schedule_options.len());
        for option in state.schedule_options.drain(..) {
            if &option.meeting_id != meeting {
                kept.push(option);
            } else if let Some(next) = replacement.next() {
                kept.push(next);
            }
        }
        kept.extend(replacement);
        state.schedule_options = kept;
        Ok(())
    }

    async fn upsert_schedule_vote(&self, vote: ScheduleVote) -> Result<(), RepositoryError> {
        let mut state = self.state.write().await;
        record_preference(&mut state.schedule_votes, vote);
        Ok(())
    }
}
