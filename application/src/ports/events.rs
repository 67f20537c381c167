//! Port for governance event notification.
//!
//! Events are published after the calculation core accepted an operation and
//! the result was persisted. Downstream consumers (minutes generation,
//! notifications, audit trail) subscribe through an adapter.
//!
//! The `publish` method is synchronous and non-fallible: a failing
//! subscriber must not undo a recorded vote.

use chrono::{DateTime, Utc};
use condo_domain::{Attendance, Proxy, ProxyId, ScheduleOption, Vote};
use serde::Serialize;
use serde_json::{Value, json};

/// Something that happened in the governance core
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GovernanceEvent {
    ProxyCreated {
        proxy: Proxy,
    },
    ProxyRevoked {
        proxy: Proxy,
    },
    ProxyDeleted {
        proxy_id: ProxyId,
    },
    VoteCast {
        vote: Vote,
    },
    AttendanceRecorded {
        attendance: Attendance,
    },
    ScheduleWinnerSelected {
        option: ScheduleOption,
    },
}

impl GovernanceEvent {
    /// Event type identifier, as written to event logs
    pub fn event_type(&self) -> &'static str {
        match self {
            GovernanceEvent::ProxyCreated { .. } => "proxy_created",
            GovernanceEvent::ProxyRevoked { .. } => "proxy_revoked",
            GovernanceEvent::ProxyDeleted { .. } => "proxy_deleted",
            GovernanceEvent::VoteCast { .. } => "vote_cast",
            GovernanceEvent::AttendanceRecorded { .. } => "attendance_recorded",
            GovernanceEvent::ScheduleWinnerSelected { .. } => "schedule_winner_selected",
        }
    }

    /// Event-specific fields without the type tag.
    pub fn payload(&self) -> Value {
        match self {
            GovernanceEvent::ProxyCreated { proxy } | GovernanceEvent::ProxyRevoked { proxy } => {
                json!({ "proxy": proxy })
            }
            GovernanceEvent::ProxyDeleted { proxy_id } => json!({ "proxy_id": proxy_id }),
            GovernanceEvent::VoteCast { vote } => json!({ "vote": vote }),
            GovernanceEvent::AttendanceRecorded { attendance } => {
                json!({ "attendance": attendance })
            }
            GovernanceEvent::ScheduleWinnerSelected { option } => json!({ "option": option }),
        }
    }

    /// Moment the underlying record took effect, when it carries one.
    pub fn occurred_at(&self) -> Option<DateTime<Utc>> {
        match self {
            GovernanceEvent::ProxyCreated { proxy } => Some(proxy.valid_from),
            GovernanceEvent::ProxyRevoked { proxy } => proxy.valid_until,
            GovernanceEvent::VoteCast { vote } => Some(vote.cast_at),
            GovernanceEvent::AttendanceRecorded { attendance } => Some(
                attendance
                    .checked_out_at
                    .unwrap_or(attendance.checked_in_at),
            ),
            GovernanceEvent::ProxyDeleted { .. }
            | GovernanceEvent::ScheduleWinnerSelected { .. } => None,
        }
    }
}

/// Port for publishing governance events.
pub trait GovernanceEventPublisher: Send + Sync {
    fn publish(&self, event: GovernanceEvent);
}

/// No-op implementation for tests and when publishing is disabled.
pub struct NoEventPublisher;

impl GovernanceEventPublisher for NoEventPublisher {
    fn publish(&self, _event: GovernanceEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use condo_domain::BallotChoice;

    #[test]
    fn test_serialized_with_type_tag() {
        let event = GovernanceEvent::ProxyDeleted {
            proxy_id: ProxyId::new("p-1"),
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "proxy_deleted");
        assert_eq!(value["proxy_id"], "p-1");
        assert_eq!(event.event_type(), "proxy_deleted");
    }

    #[test]
    fn test_payload_omits_type() {
        let at = Utc::now();
        let event = GovernanceEvent::VoteCast {
            vote: Vote::direct("roof", "a", BallotChoice::Yes, 10.0, at),
        };
        let payload = event.payload();
        assert!(payload.get("type").is_none());
        assert_eq!(payload["vote"]["member_id"], "a");
        assert_eq!(event.occurred_at(), Some(at));
    }
}
