//! Weight resolver
//!
//! A member's effective weight is their own weight plus the weight of the
//! grantors who delegated to them. Two call sites exist on purpose:
//!
//! | Function | Delegated weight counted | Used by |
//! |----------|--------------------------|---------|
//! | [`effective_weight`] | only grantors who are absent | quorum evaluation |
//! | [`voting_power`] | every applicable incoming proxy | a grantee casting proxy votes |
//!
//! When a grantor attends, they vote for themself and their proxy adds
//! nothing to the aggregate, otherwise their weight would count twice.

use crate::attendance::{Attendance, present_member_ids};
use crate::core::ids::{MeetingId, MemberId};
use crate::member::Member;
use crate::proxy::{Proxy, active_for_meeting};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Weight by member id for the eligible members of one snapshot.
///
/// Inactive members and observers are left out, so a proxy granted by one of
/// them contributes nothing.
#[derive(Debug, Clone, Default)]
pub struct WeightLookup {
    weights: HashMap<MemberId, f64>,
}

impl WeightLookup {
    pub fn from_members<'a>(members: impl IntoIterator<Item = &'a Member>) -> Self {
        let weights = members
            .into_iter()
            .filter(|m| m.is_eligible())
            .map(|m| (m.id.clone(), m.counted_weight()))
            .collect();
        Self { weights }
    }

    /// Weight of an eligible member; 0 for unknown or ineligible ones.
    pub fn weight_of(&self, member: &MemberId) -> f64 {
        self.weights.get(member).copied().unwrap_or(0.0)
    }

    pub fn is_eligible(&self, member: &MemberId) -> bool {
        self.weights.contains_key(member)
    }

    pub fn total(&self) -> f64 {
        self.weights.values().sum()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

/// Presence-gated effective weight, as counted for quorum.
///
/// `proxies_for_meeting` should be the proxies active for `meeting`
/// (see [`crate::proxy::active_for_meeting`]).
pub fn effective_weight<'a>(
    member: &MemberId,
    own_weight: f64,
    meeting: &MeetingId,
    proxies_for_meeting: impl IntoIterator<Item = &'a Proxy>,
    weights: &WeightLookup,
    present: &HashSet<MemberId>,
) -> f64 {
    own_weight + delegated_weight(member, meeting, proxies_for_meeting, weights, present)
}

/// The delegated part of [`effective_weight`]: weight of absent grantors
/// whose proxies `member` holds for `meeting`.
pub fn delegated_weight<'a>(
    member: &MemberId,
    meeting: &MeetingId,
    proxies_for_meeting: impl IntoIterator<Item = &'a Proxy>,
    weights: &WeightLookup,
    present: &HashSet<MemberId>,
) -> f64 {
    incoming(member, meeting, proxies_for_meeting)
        .filter(|p| !present.contains(&p.grantor_id))
        .map(|p| weights.weight_of(&p.grantor_id))
        .sum()
}

/// Unconditional voting power: own weight plus every applicable incoming
/// proxy, regardless of who attends.
pub fn voting_power<'a>(
    member: &MemberId,
    own_weight: f64,
    meeting: &MeetingId,
    proxies_for_meeting: impl IntoIterator<Item = &'a Proxy>,
    weights: &WeightLookup,
) -> f64 {
    own_weight
        + incoming(member, meeting, proxies_for_meeting)
            .map(|p| weights.weight_of(&p.grantor_id))
            .sum::<f64>()
}

/// Weight breakdown of one eligible member for a meeting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberWeight {
    pub member_id: MemberId,
    pub own_weight: f64,
    pub present: bool,
    /// Active proxies held for the meeting
    pub proxies_held: usize,
    /// Presence-gated, as counted for quorum
    pub effective_weight: f64,
    /// Own weight plus all held proxies
    pub voting_power: f64,
}

/// Resolve both weights for every eligible member of a meeting snapshot,
/// in roster order.
pub fn member_weights(
    meeting: &MeetingId,
    members: &[Member],
    attendance: &[Attendance],
    proxies: &[Proxy],
    now: DateTime<Utc>,
) -> Vec<MemberWeight> {
    let weights = WeightLookup::from_members(members);
    let present = present_member_ids(meeting, attendance);
    let active: Vec<&Proxy> = active_for_meeting(meeting, proxies, now).collect();

    members
        .iter()
        .filter(|m| m.is_eligible())
        .map(|m| {
            let own = m.counted_weight();
            MemberWeight {
                member_id: m.id.clone(),
                own_weight: own,
                present: present.contains(&m.id),
                proxies_held: incoming(&m.id, meeting, active.iter().copied()).count(),
                effective_weight: effective_weight(
                    &m.id,
                    own,
                    meeting,
                    active.iter().copied(),
                    &weights,
                    &present,
                ),
                voting_power: voting_power(&m.id, own, meeting, active.iter().copied(), &weights),
            }
        })
        .collect()
}

fn incoming<'a, 'b>(
    member: &'b MemberId,
    meeting: &'b MeetingId,
    proxies: impl IntoIterator<Item = &'a Proxy>,
) -> impl Iterator<Item = &'a Proxy> {
    proxies
        .into_iter()
        .filter(move |p| &p.grantee_id == member && p.applies_to(meeting))
}
