//! Report views pairing a result with the record it was computed for.
//!
//! JSON output serializes these directly, so the result fields appear at
//! the top level next to the identifiers.

use condo_domain::{
    AgendaItemId, Attendance, MeetingId, MemberId, MemberWeight, OptionScore, Proxy,
    QuorumResult, ScheduleOption, ScheduleVote, Vote, VoteResult,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct QuorumReport<'a> {
    pub meeting: &'a MeetingId,
    #[serde(flatten)]
    pub result: &'a QuorumResult,
}

#[derive(Debug, Serialize)]
pub struct WeightsReport<'a> {
    pub meeting: &'a MeetingId,
    pub members: &'a [MemberWeight],
}

#[derive(Debug, Serialize)]
pub struct TallyReport<'a> {
    pub item: &'a AgendaItemId,
    #[serde(flatten)]
    pub result: &'a VoteResult,
}

#[derive(Debug, Serialize)]
pub struct VoteReport<'a> {
    #[serde(flatten)]
    pub vote: &'a Vote,
}

/// Which side of a delegation a proxy list shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProxyDirection {
    /// Proxies the member holds
    Incoming,
    /// Proxies the member gave
    Outgoing,
}

#[derive(Debug, Serialize)]
pub struct ProxyListReport<'a> {
    pub meeting: &'a MeetingId,
    pub member: &'a MemberId,
    pub direction: ProxyDirection,
    pub proxies: &'a [Proxy],
}

/// A proxy record after a create / revoke / delete
#[derive(Debug, Serialize)]
pub struct ProxyReport<'a> {
    pub action: &'static str,
    pub proxy: &'a Proxy,
}

#[derive(Debug, Serialize)]
pub struct AttendanceReport<'a> {
    #[serde(flatten)]
    pub attendance: &'a Attendance,
}

#[derive(Debug, Serialize)]
pub struct RankingReport<'a> {
    pub meeting: &'a MeetingId,
    pub ranking: &'a [OptionScore],
    /// Option details, for dates and the current selection
    #[serde(skip)]
    pub options: &'a [ScheduleOption],
}

impl RankingReport<'_> {
    pub fn option(&self, score: &OptionScore) -> Option<&ScheduleOption> {
        self.options.iter().find(|o| o.id == score.option_id)
    }
}

#[derive(Debug, Serialize)]
pub struct PreferenceReport<'a> {
    pub meeting: &'a MeetingId,
    #[serde(flatten)]
    pub vote: &'a ScheduleVote,
}

#[derive(Debug, Serialize)]
pub struct SelectionReport<'a> {
    pub meeting: &'a MeetingId,
    pub selected: &'a ScheduleOption,
}
