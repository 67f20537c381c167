//! Proxy registry: delegation rules over a snapshot of proxy records
//!
//! The registry never owns storage. Every operation takes the current proxy
//! set explicitly and returns the record the caller should persist, so the
//! rules stay pure and can be checked against any consistent snapshot.

use super::entities::{NewProxy, Proxy, ProxyScope};
use super::error::ProxyError;
use crate::core::ids::{MeetingId, MemberId, ProxyId};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Legal default for the number of proxies one member may hold.
pub const DEFAULT_MAX_PROXIES_PER_GRANTEE: usize = 2;

/// Proxies active for `meeting` at `now`: meeting-specific ones for that
/// meeting plus every general proxy.
///
/// This is the single scope-resolution rule; creation checks, weight
/// resolution and quorum computation all go through it.
pub fn active_for_meeting<'a>(
    meeting: &'a MeetingId,
    proxies: &'a [Proxy],
    now: DateTime<Utc>,
) -> impl Iterator<Item = &'a Proxy> + 'a {
    proxies.iter().filter(move |p| p.is_active_for(meeting, now))
}

/// Existing proxies that could be active at the same time as a new one
/// valid over `[from, until]`: not ended before `now`, windows intersecting.
fn contending<'a>(
    from: DateTime<Utc>,
    until: Option<DateTime<Utc>>,
    proxies: &'a [Proxy],
    now: DateTime<Utc>,
) -> impl Iterator<Item = &'a Proxy> + 'a {
    proxies
        .iter()
        .filter(move |p| p.is_current_or_upcoming(now) && p.overlaps_window(from, until))
}

/// Validates and manages delegation records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProxyRegistry {
    max_per_grantee: usize,
}

impl Default for ProxyRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PROXIES_PER_GRANTEE)
    }
}

impl ProxyRegistry {
    pub fn new(max_per_grantee: usize) -> Self {
        Self { max_per_grantee }
    }

    pub fn max_per_grantee(&self) -> usize {
        self.max_per_grantee
    }

    /// Check a new delegation against the existing records.
    ///
    /// Rules are applied in order: self delegation, empty validity window,
    /// duplicate grantor proxy, grantee limit, circular pair. The first
    /// violation is returned. Existing proxies count when their validity
    /// window meets the new one, so a proxy starting next week blocks a
    /// conflicting one starting today.
    pub fn validate(
        &self,
        input: &NewProxy,
        existing: &[Proxy],
        now: DateTime<Utc>,
    ) -> Result<(), ProxyError> {
        if input.grantor_id == input.grantee_id {
            return Err(ProxyError::SelfDelegation);
        }

        let (from, until) = input.window(now);
        if until.is_some_and(|until| until < from) {
            return Err(ProxyError::EmptyValidityWindow);
        }

        let has_outgoing = contending(from, until, existing, now)
            .any(|p| p.grantor_id == input.grantor_id && p.scope().overlaps(&input.scope));
        if has_outgoing {
            return Err(ProxyError::DuplicateGrantorProxy);
        }

        let load = self.incoming_load(&input.grantee_id, &input.scope, (from, until), existing, now);
        if load >= self.max_per_grantee {
            return Err(ProxyError::GranteeLimitExceeded {
                limit: self.max_per_grantee,
            });
        }

        // any scope: a pair delegating to each other is circular even when
        // the two proxies name different meetings
        let circular = contending(from, until, existing, now)
            .any(|p| p.grantor_id == input.grantee_id && p.grantee_id == input.grantor_id);
        if circular {
            return Err(ProxyError::CircularProxy);
        }

        Ok(())
    }

    /// Validate the input and build the record to persist.
    pub fn create(
        &self,
        id: ProxyId,
        input: NewProxy,
        existing: &[Proxy],
        now: DateTime<Utc>,
    ) -> Result<Proxy, ProxyError> {
        self.validate(&input, existing, now)?;

        Ok(Proxy {
            id,
            organization_id: input.organization_id,
            grantor_id: input.grantor_id,
            grantee_id: input.grantee_id,
            meeting_id: input.scope.meeting_id().cloned(),
            valid_from: input.valid_from.unwrap_or(now),
            valid_until: input.valid_until,
            document_ref: input.document_ref,
        })
    }

    /// Soft delete: end the validity window at `now`.
    ///
    /// A proxy that already ended earlier keeps its original end, so
    /// revoking twice never extends a delegation.
    pub fn revoke(
        &self,
        id: &ProxyId,
        proxies: &[Proxy],
        now: DateTime<Utc>,
    ) -> Result<Proxy, ProxyError> {
        let mut proxy = find(id, proxies)?.clone();
        proxy.valid_until = Some(match proxy.valid_until {
            Some(until) if until < now => until,
            _ => now,
        });
        Ok(proxy)
    }

    /// Hard delete. Unconditional apart from the record having to exist;
    /// returns the record to remove.
    pub fn delete<'a>(&self, id: &ProxyId, proxies: &'a [Proxy]) -> Result<&'a Proxy, ProxyError> {
        find(id, proxies)
    }

    /// Active proxies held by `member` that count for `meeting`.
    pub fn active_for_grantee<'a>(
        &self,
        member: &MemberId,
        meeting: &'a MeetingId,
        proxies: &'a [Proxy],
        now: DateTime<Utc>,
    ) -> Vec<&'a Proxy> {
        active_for_meeting(meeting, proxies, now)
            .filter(|p| &p.grantee_id == member)
            .collect()
    }

    /// Active proxies given by `member` that count for `meeting`.
    pub fn active_for_grantor<'a>(
        &self,
        member: &MemberId,
        meeting: &'a MeetingId,
        proxies: &'a [Proxy],
        now: DateTime<Utc>,
    ) -> Vec<&'a Proxy> {
        active_for_meeting(meeting, proxies, now)
            .filter(|p| &p.grantor_id == member)
            .collect()
    }

    /// Highest number of proxies `grantee` holds for any single meeting
    /// covered by `scope`, among those whose window meets `window`.
    ///
    /// For a meeting scope this is general + specific proxies for that
    /// meeting. A general scope covers every meeting, so the busiest
    /// meeting decides.
    fn incoming_load(
        &self,
        grantee: &MemberId,
        scope: &ProxyScope,
        (from, until): (DateTime<Utc>, Option<DateTime<Utc>>),
        proxies: &[Proxy],
        now: DateTime<Utc>,
    ) -> usize {
        let incoming = contending(from, until, proxies, now).filter(|p| &p.grantee_id == grantee);

        match scope {
            ProxyScope::Meeting(meeting) => incoming.filter(|p| p.applies_to(meeting)).count(),
            ProxyScope::General => {
                let mut general = 0;
                let mut per_meeting: HashMap<&MeetingId, usize> = HashMap::new();
                for proxy in incoming {
                    match &proxy.meeting_id {
                        None => general += 1,
                        Some(meeting) => *per_meeting.entry(meeting).or_default() += 1,
                    }
                }
                general + per_meeting.values().copied().max().unwrap_or(0)
            }
        }
    }
}

fn find<'a>(id: &ProxyId, proxies: &'a [Proxy]) -> Result<&'a Proxy, ProxyError> {
    proxies
        .iter()
        .find(|p| &p.id == id)
        .ok_or_else(|| ProxyError::NotFound(id.clone()))
}
