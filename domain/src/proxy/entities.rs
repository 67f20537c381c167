//! Proxy (delegation) entities

use crate::core::ids::{MeetingId, MemberId, OrganizationId, ProxyId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which meetings a proxy covers
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProxyScope {
    /// Valid for every meeting until revoked
    General,
    /// Valid for a single meeting
    Meeting(MeetingId),
}

impl ProxyScope {
    pub fn from_meeting(meeting: Option<MeetingId>) -> Self {
        match meeting {
            Some(id) => ProxyScope::Meeting(id),
            None => ProxyScope::General,
        }
    }

    pub fn meeting_id(&self) -> Option<&MeetingId> {
        match self {
            ProxyScope::General => None,
            ProxyScope::Meeting(id) => Some(id),
        }
    }

    /// Whether a proxy with this scope counts for `meeting`.
    pub fn covers(&self, meeting: &MeetingId) -> bool {
        match self {
            ProxyScope::General => true,
            ProxyScope::Meeting(id) => id == meeting,
        }
    }

    /// Two scopes overlap when some meeting is covered by both.
    pub fn overlaps(&self, other: &ProxyScope) -> bool {
        match (self, other) {
            (ProxyScope::General, _) | (_, ProxyScope::General) => true,
            (ProxyScope::Meeting(a), ProxyScope::Meeting(b)) => a == b,
        }
    }
}

impl std::fmt::Display for ProxyScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProxyScope::General => write!(f, "general"),
            ProxyScope::Meeting(id) => write!(f, "meeting {}", id),
        }
    }
}

/// A delegation of a grantor's vote to a grantee (Entity)
///
/// Immutable except for the validity window (revocation) and the supporting
/// document reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proxy {
    pub id: ProxyId,
    pub organization_id: OrganizationId,
    pub grantor_id: MemberId,
    pub grantee_id: MemberId,
    /// `None` means a general proxy
    #[serde(default)]
    pub meeting_id: Option<MeetingId>,
    pub valid_from: DateTime<Utc>,
    #[serde(default)]
    pub valid_until: Option<DateTime<Utc>>,
    #[serde(default)]
    pub document_ref: Option<String>,
}

impl Proxy {
    pub fn scope(&self) -> ProxyScope {
        ProxyScope::from_meeting(self.meeting_id.clone())
    }

    pub fn is_general(&self) -> bool {
        self.meeting_id.is_none()
    }

    /// `valid_from <= now` and not yet past `valid_until` (inclusive).
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.valid_from <= now && self.valid_until.is_none_or(|until| until >= now)
    }

    /// General proxies apply to every meeting.
    pub fn applies_to(&self, meeting: &MeetingId) -> bool {
        match &self.meeting_id {
            Some(id) => id == meeting,
            None => true,
        }
    }

    pub fn is_active_for(&self, meeting: &MeetingId, now: DateTime<Utc>) -> bool {
        self.applies_to(meeting) && self.is_active_at(now)
    }

    /// False for a window that ends before it starts, e.g. a future proxy
    /// revoked before it began.
    pub fn has_window(&self) -> bool {
        self.valid_until.is_none_or(|until| until >= self.valid_from)
    }

    /// Active at `now` or starting later.
    pub fn is_current_or_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.has_window() && self.valid_until.is_none_or(|until| until >= now)
    }

    /// Whether some instant lies in both this proxy's validity window and
    /// `[from, until]` (open-ended when `until` is `None`).
    pub fn overlaps_window(&self, from: DateTime<Utc>, until: Option<DateTime<Utc>>) -> bool {
        self.has_window()
            && until.is_none_or(|until| self.valid_from <= until)
            && self.valid_until.is_none_or(|end| end >= from)
    }
}

/// Input for creating a proxy
#[derive(Debug, Clone, PartialEq)]
pub struct NewProxy {
    pub organization_id: OrganizationId,
    pub grantor_id: MemberId,
    pub grantee_id: MemberId,
    pub scope: ProxyScope,
    /// Defaults to the creation time
    pub valid_from: Option<DateTime<Utc>>,
    pub valid_until: Option<DateTime<Utc>>,
    pub document_ref: Option<String>,
}

impl NewProxy {
    pub fn general(
        organization_id: impl Into<OrganizationId>,
        grantor_id: impl Into<MemberId>,
        grantee_id: impl Into<MemberId>,
    ) -> Self {
        Self {
            organization_id: organization_id.into(),
            grantor_id: grantor_id.into(),
            grantee_id: grantee_id.into(),
            scope: ProxyScope::General,
            valid_from: None,
            valid_until: None,
            document_ref: None,
        }
    }

    pub fn for_meeting(
        organization_id: impl Into<OrganizationId>,
        grantor_id: impl Into<MemberId>,
        grantee_id: impl Into<MemberId>,
        meeting_id: impl Into<MeetingId>,
    ) -> Self {
        Self {
            scope: ProxyScope::Meeting(meeting_id.into()),
            ..Self::general(organization_id, grantor_id, grantee_id)
        }
    }

    pub fn valid_from(mut self, from: DateTime<Utc>) -> Self {
        self.valid_from = Some(from);
        self
    }

    pub fn valid_until(mut self, until: DateTime<Utc>) -> Self {
        self.valid_until = Some(until);
        self
    }

    pub fn with_document(mut self, document_ref: impl Into<String>) -> Self {
        self.document_ref = Some(document_ref.into());
        self
    }

    /// Validity window the proxy will get when created at `now`.
    pub fn window(&self, now: DateTime<Utc>) -> (DateTime<Utc>, Option<DateTime<Utc>>) {
        (self.valid_from.unwrap_or(now), self.valid_until)
    }
}
