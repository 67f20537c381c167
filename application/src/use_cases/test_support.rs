//! Hand-written fakes shared by the use case tests.

use crate::ports::events::{GovernanceEvent, GovernanceEventPublisher};
use crate::ports::repository::{GovernanceRepository, MeetingSnapshot, RepositoryError};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use condo_domain::{
    AgendaItem, AgendaItemId, Attendance, Meeting, MeetingId, Member, MemberId, OrganizationId,
    Proxy, ProxyId, ScheduleOption, ScheduleVote, Vote,
};
use std::sync::Mutex;

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 19, 0, 0).unwrap()
}

#[derive(Default)]
struct State {
    members: Vec<Member>,
    meetings: Vec<Meeting>,
    items: Vec<AgendaItem>,
    proxies: Vec<Proxy>,
    attendance: Vec<Attendance>,
    votes: Vec<Vote>,
    options: Vec<ScheduleOption>,
    schedule_votes: Vec<ScheduleVote>,
}

#[derive(Default)]
pub struct FakeRepository {
    state: Mutex<State>,
}

impl FakeRepository {
    /// Organization "org" with meeting "agm", agenda item "roof" and the
    /// four 25-weight members a, b, c, d.
    pub fn building() -> Self {
        let repo = Self::default();
        {
            let mut state = repo.state.lock().unwrap();
            state.meetings.push(Meeting::new("agm", "org"));
            state.items.push(AgendaItem::new("roof", "agm"));
            for id in ["a", "b", "c", "d"] {
                state.members.push(Member::new(id, "org", 25.0));
            }
        }
        repo
    }

    pub fn with_member(self, member: Member) -> Self {
        self.state.lock().unwrap().members.push(member);
        self
    }

    pub fn with_meeting(self, meeting: Meeting) -> Self {
        self.state.lock().unwrap().meetings.push(meeting);
        self
    }

    pub fn with_item(self, item: AgendaItem) -> Self {
        self.state.lock().unwrap().items.push(item);
        self
    }

    pub fn with_proxy(self, proxy: Proxy) -> Self {
        self.state.lock().unwrap().proxies.push(proxy);
        self
    }

    pub fn with_present(self, members: &[&str]) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            for id in members {
                state
                    .attendance
                    .push(Attendance::check_in("agm", *id, now(), 25.0));
            }
        }
        self
    }

    pub fn with_vote(self, vote: Vote) -> Self {
        self.state.lock().unwrap().votes.push(vote);
        self
    }

    pub fn with_option(self, option: ScheduleOption) -> Self {
        self.state.lock().unwrap().options.push(option);
        self
    }

    pub fn stored_proxies(&self) -> Vec<Proxy> {
        self.state.lock().unwrap().proxies.clone()
    }

    pub fn stored_votes(&self) -> Vec<Vote> {
        self.state.lock().unwrap().votes.clone()
    }

    pub fn stored_attendance(&self) -> Vec<Attendance> {
        self.state.lock().unwrap().attendance.clone()
    }

    pub fn stored_options(&self) -> Vec<ScheduleOption> {
        self.state.lock().unwrap().options.clone()
    }
}

#[async_trait]
impl GovernanceRepository for FakeRepository {
    async fn members(&self, organization: &OrganizationId) -> Result<Vec<Member>, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .members
            .iter()
            .filter(|m| &m.organization_id == organization)
            .cloned()
            .collect())
    }

    async fn member(&self, id: &MemberId) -> Result<Option<Member>, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state.members.iter().find(|m| &m.id == id).cloned())
    }

    async fn meeting(&self, id: &MeetingId) -> Result<Option<Meeting>, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state.meetings.iter().find(|m| &m.id == id).cloned())
    }

    async fn agenda_item(&self, id: &AgendaItemId) -> Result<Option<AgendaItem>, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state.items.iter().find(|i| &i.id == id).cloned())
    }

    async fn proxies(&self, organization: &OrganizationId) -> Result<Vec<Proxy>, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .proxies
            .iter()
            .filter(|p| &p.organization_id == organization)
            .cloned()
            .collect())
    }

    async fn proxy(&self, id: &ProxyId) -> Result<Option<Proxy>, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state.proxies.iter().find(|p| &p.id == id).cloned())
    }

    async fn attendance(&self, meeting: &MeetingId) -> Result<Vec<Attendance>, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .attendance
            .iter()
            .filter(|a| &a.meeting_id == meeting)
            .cloned()
            .collect())
    }

    async fn votes(&self, item: &AgendaItemId) -> Result<Vec<Vote>, RepositoryError> {
        let state = self.state.lock().unwrap();
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
        let state = self.state.lock().unwrap();
        Ok(state
            .options
            .iter()
            .filter(|o| &o.meeting_id == meeting)
            .cloned()
            .collect())
    }

    async fn schedule_votes(
        &self,
        meeting: &MeetingId,
    ) -> Result<Vec<ScheduleVote>, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .schedule_votes
            .iter()
            .filter(|v| {
                state
                    .options
                    .iter()
                    .any(|o| o.id == v.option_id && &o.meeting_id == meeting)
            })
            .cloned()
            .collect())
    }

    async fn meeting_snapshot(
        &self,
        meeting: &MeetingId,
    ) -> Result<Option<MeetingSnapshot>, RepositoryError> {
        let state = self.state.lock().unwrap();
        let Some(found) = state.meetings.iter().find(|m| &m.id == meeting).cloned() else {
            return Ok(None);
        };
        let org = found.organization_id.clone();
        Ok(Some(MeetingSnapshot {
            members: state
                .members
                .iter()
                .filter(|m| m.organization_id == org)
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
                .filter(|p| p.organization_id == org)
                .cloned()
                .collect(),
            meeting: found,
        }))
    }

    async fn insert_proxy(&self, proxy: Proxy) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().unwrap();
        if state.proxies.iter().any(|p| p.id == proxy.id) {
            return Err(RepositoryError::Conflict(proxy.id.to_string()));
        }
        state.proxies.push(proxy);
        Ok(())
    }

    async fn update_proxy(&self, proxy: Proxy) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().unwrap();
        match state.proxies.iter_mut().find(|p| p.id == proxy.id) {
            Some(existing) => {
                *existing = proxy;
                Ok(())
            }
            None => Err(RepositoryError::NotFound(proxy.id.to_string())),
        }
    }

    async fn remove_proxy(&self, id: &ProxyId) -> Result<(), RepositoryError> {
        self.state.lock().unwrap().proxies.retain(|p| &p.id != id);
        Ok(())
    }

    async fn upsert_attendance(&self, attendance: Attendance) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().unwrap();
        state.attendance.retain(|a| {
            !(a.meeting_id == attendance.meeting_id && a.member_id == attendance.member_id)
        });
        state.attendance.push(attendance);
        Ok(())
    }

    async fn insert_vote(&self, vote: Vote) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().unwrap();
        if state
            .votes
            .iter()
            .any(|v| v.agenda_item_id == vote.agenda_item_id && v.voter() == vote.voter())
        {
            return Err(RepositoryError::Conflict(vote.voter().to_string()));
        }
        state.votes.push(vote);
        Ok(())
    }

    async fn save_schedule_options(
        &self,
        meeting: &MeetingId,
        options: Vec<ScheduleOption>,
    ) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().unwrap();
        state.options.retain(|o| &o.meeting_id != meeting);
        state.options.extend(options);
        Ok(())
    }

    async fn upsert_schedule_vote(&self, vote: ScheduleVote) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().unwrap();
        condo_domain::schedule::record_preference(&mut state.schedule_votes, vote);
        Ok(())
    }
}

/// Keeps every published event for assertions.
#[derive(Default)]
pub struct RecordingPublisher {
    events: Mutex<Vec<GovernanceEvent>>,
}

impl RecordingPublisher {
    pub fn events(&self) -> Vec<GovernanceEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl GovernanceEventPublisher for RecordingPublisher {
    fn publish(&self, event: GovernanceEvent) {
        self.events.lock().unwrap().push(event);
    }
}
