//! Scheduling entities

use crate::core::ids::{MeetingId, MemberId, ScheduleOptionId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ternary availability answer for a candidate date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preference {
    Yes,
    Maybe,
    No,
}

impl Preference {
    /// Contribution to an option's score
    pub fn points(&self) -> i64 {
        match self {
            Preference::Yes => 2,
            Preference::Maybe => 1,
            Preference::No => -1,
        }
    }
}

impl std::str::FromStr for Preference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yes" | "y" => Ok(Preference::Yes),
            "maybe" | "m" => Ok(Preference::Maybe),
            "no" | "n" => Ok(Preference::No),
            _ => Err(format!("Unknown preference: {}. Valid: yes, maybe, no", s)),
        }
    }
}

impl std::fmt::Display for Preference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Preference::Yes => write!(f, "yes"),
            Preference::Maybe => write!(f, "maybe"),
            Preference::No => write!(f, "no"),
        }
    }
}

/// Candidate date/time for a meeting (Entity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleOption {
    pub id: ScheduleOptionId,
    pub meeting_id: MeetingId,
    pub starts_at: DateTime<Utc>,
    #[serde(default = "default_duration")]
    pub duration_minutes: u32,
    /// Set on the chosen option; at most one per meeting
    #[serde(default)]
    pub selected: bool,
}

fn default_duration() -> u32 {
    60
}

impl ScheduleOption {
    pub fn new(
        id: impl Into<ScheduleOptionId>,
        meeting_id: impl Into<MeetingId>,
        starts_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            meeting_id: meeting_id.into(),
            starts_at,
            duration_minutes: default_duration(),
            selected: false,
        }
    }

    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.duration_minutes = minutes;
        self
    }
}

/// One member's answer for one option. Unweighted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleVote {
    pub option_id: ScheduleOptionId,
    pub member_id: MemberId,
    pub preference: Preference,
}

impl ScheduleVote {
    pub fn new(
        option_id: impl Into<ScheduleOptionId>,
        member_id: impl Into<MemberId>,
        preference: Preference,
    ) -> Self {
        Self {
            option_id: option_id.into(),
            member_id: member_id.into(),
            preference,
        }
    }
}
