//! Meeting and agenda item entities

use crate::ballot::{BallotKind, MajorityRule};
use crate::core::ids::{AgendaItemId, MeetingId, OrganizationId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A meeting of an organization (Entity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meeting {
    pub id: MeetingId,
    pub organization_id: OrganizationId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub scheduled_at: Option<DateTime<Utc>>,
    /// Required quorum percentage (0-100); falls back to the configured default
    #[serde(default)]
    pub required_quorum: Option<f64>,
}

impl Meeting {
    pub fn new(id: impl Into<MeetingId>, organization_id: impl Into<OrganizationId>) -> Self {
        Self {
            id: id.into(),
            organization_id: organization_id.into(),
            title: String::new(),
            scheduled_at: None,
            required_quorum: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_required_quorum(mut self, percentage: f64) -> Self {
        self.required_quorum = Some(percentage);
        self
    }

    /// Quorum percentage to apply, given the organization-wide default.
    pub fn quorum_percentage_or(&self, default: f64) -> f64 {
        self.required_quorum.unwrap_or(default)
    }
}

/// An item on a meeting's agenda that members vote on (Entity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgendaItem {
    pub id: AgendaItemId,
    pub meeting_id: MeetingId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub ballot: BallotKind,
    /// Falls back to the organization default when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub majority: Option<MajorityRule>,
}

impl AgendaItem {
    pub fn new(id: impl Into<AgendaItemId>, meeting_id: impl Into<MeetingId>) -> Self {
        Self {
            id: id.into(),
            meeting_id: meeting_id.into(),
            title: String::new(),
            ballot: BallotKind::default(),
            majority: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_ballot(mut self, ballot: BallotKind) -> Self {
        self.ballot = ballot;
        self
    }

    pub fn with_majority(mut self, majority: MajorityRule) -> Self {
        self.majority = Some(majority);
        self
    }

    pub fn majority_or(&self, default: MajorityRule) -> MajorityRule {
        self.majority.unwrap_or(default)
    }
}
