//! Attendance records and the definition of "present"
//!
//! A member is present for a meeting iff they have an attendance record for
//! that meeting without a check-out timestamp. [`present_member_ids`] is the
//! only place this rule is evaluated; both the weight resolver and the
//! quorum evaluator go through it.

use crate::core::ids::{MeetingId, MemberId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// How the member attends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceKind {
    #[default]
    InPerson,
    Online,
    /// Represented by a delegate who holds their proxy
    Proxy,
}

impl std::str::FromStr for AttendanceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "in_person" | "inperson" => Ok(AttendanceKind::InPerson),
            "online" => Ok(AttendanceKind::Online),
            "proxy" => Ok(AttendanceKind::Proxy),
            _ => Err(format!(
                "Unknown attendance kind: {}. Valid: in-person, online, proxy",
                s
            )),
        }
    }
}

/// Attendance of one member at one meeting (Entity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attendance {
    pub meeting_id: MeetingId,
    pub member_id: MemberId,
    pub checked_in_at: DateTime<Utc>,
    #[serde(default)]
    pub checked_out_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub kind: AttendanceKind,
    /// Member weight at check-in, kept for the minutes
    #[serde(default)]
    pub weight_snapshot: f64,
}

impl Attendance {
    pub fn check_in(
        meeting_id: impl Into<MeetingId>,
        member_id: impl Into<MemberId>,
        at: DateTime<Utc>,
        weight_snapshot: f64,
    ) -> Self {
        Self {
            meeting_id: meeting_id.into(),
            member_id: member_id.into(),
            checked_in_at: at,
            checked_out_at: None,
            kind: AttendanceKind::InPerson,
            weight_snapshot,
        }
    }

    pub fn with_kind(mut self, kind: AttendanceKind) -> Self {
        self.kind = kind;
        self
    }

    /// Mark the member as having left. Keeps the first check-out time.
    pub fn check_out(&mut self, at: DateTime<Utc>) {
        if self.checked_out_at.is_none() {
            self.checked_out_at = Some(at);
        }
    }

    /// Checked in and not yet checked out.
    pub fn is_present(&self) -> bool {
        self.checked_out_at.is_none()
    }
}

/// Members currently present at `meeting`.
pub fn present_member_ids<'a>(
    meeting: &MeetingId,
    attendance: impl IntoIterator<Item = &'a Attendance>,
) -> HashSet<MemberId> {
    attendance
        .into_iter()
        .filter(|a| &a.meeting_id == meeting && a.is_present())
        .map(|a| a.member_id.clone())
        .collect()
}
