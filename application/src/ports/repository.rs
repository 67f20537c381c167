//! Governance repository port
//!
//! Defines the interface for reading and writing governance records.
//! The calculation core never touches storage; use cases read a snapshot
//! through this port, run the domain rules, then persist the result.

use async_trait::async_trait;
use condo_domain::{
    AgendaItem, AgendaItemId, Attendance, Meeting, MeetingId, Member, MemberId, OrganizationId,
    Proxy, ProxyId, ScheduleOption, ScheduleVote, Vote,
};
use thiserror::Error;

/// Errors that can occur in a repository adapter
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A storage-level uniqueness constraint was violated
    #[error("Conflicting write: {0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Everything needed to evaluate one meeting, read consistently.
#[derive(Debug, Clone)]
pub struct MeetingSnapshot {
    pub meeting: Meeting,
    /// Full roster of the meeting's organization
    pub members: Vec<Member>,
    pub attendance: Vec<Attendance>,
    /// All proxy records of the organization, active or not
    pub proxies: Vec<Proxy>,
}

impl MeetingSnapshot {
    pub fn member(&self, id: &MemberId) -> Option<&Member> {
        self.members.iter().find(|m| &m.id == id)
    }
}

/// Port for governance persistence
///
/// Writes that would break a uniqueness constraint must fail with
/// [`RepositoryError::Conflict`] instead of overwriting:
///
/// - a second vote for the same (agenda item, voter) pair
/// - a proxy id that already exists
/// - a second active proxy from the same grantor in an overlapping scope
#[async_trait]
pub trait GovernanceRepository: Send + Sync {
    // ==================== Reads ====================

    async fn members(&self, organization: &OrganizationId)
    -> Result<Vec<Member>, RepositoryError>;

    async fn member(&self, id: &MemberId) -> Result<Option<Member>, RepositoryError>;

    async fn meeting(&self, id: &MeetingId) -> Result<Option<Meeting>, RepositoryError>;

    async fn agenda_item(&self, id: &AgendaItemId)
    -> Result<Option<AgendaItem>, RepositoryError>;

    async fn proxies(&self, organization: &OrganizationId) -> Result<Vec<Proxy>, RepositoryError>;

    async fn proxy(&self, id: &ProxyId) -> Result<Option<Proxy>, RepositoryError>;

    async fn attendance(&self, meeting: &MeetingId) -> Result<Vec<Attendance>, RepositoryError>;

    async fn votes(&self, item: &AgendaItemId) -> Result<Vec<Vote>, RepositoryError>;

    async fn schedule_options(
        &self,
        meeting: &MeetingId,
    ) -> Result<Vec<ScheduleOption>, RepositoryError>;

    async fn schedule_votes(&self, meeting: &MeetingId)
    -> Result<Vec<ScheduleVote>, RepositoryError>;

    /// Meeting, roster, attendance and proxies read as one consistent view.
    async fn meeting_snapshot(
        &self,
        meeting: &MeetingId,
    ) -> Result<Option<MeetingSnapshot>, RepositoryError>;

    // ==================== Writes ====================

    async fn insert_proxy(&self, proxy: Proxy) -> Result<(), RepositoryError>;

    /// Replace an existing proxy record (used for revocation).
    async fn update_proxy(&self, proxy: Proxy) -> Result<(), RepositoryError>;

    async fn remove_proxy(&self, id: &ProxyId) -> Result<(), RepositoryError>;

    /// Insert or replace the record for (meeting, member).
    async fn upsert_attendance(&self, attendance: Attendance) -> Result<(), RepositoryError>;

    async fn insert_vote(&self, vote: Vote) -> Result<(), RepositoryError>;

    /// Replace the stored options of `meeting` with `options`.
    async fn save_schedule_options(
        &self,
        meeting: &MeetingId,
        options: Vec<ScheduleOption>,
    ) -> Result<(), RepositoryError>;

    /// Insert or replace the answer for (option, member).
    async fn upsert_schedule_vote(&self, vote: ScheduleVote) -> Result<(), RepositoryError>;
}
