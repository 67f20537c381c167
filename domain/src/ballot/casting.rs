//! Vote casting rules
//!
//! Builds the [`Vote`] record to persist after checking it against a
//! snapshot of existing votes, attendance and proxies. A vote is recorded
//! once per (agenda item, voter); later attempts are rejected rather than
//! overwriting, so every recorded vote stays attributable.

use super::error::VoteError;
use super::vote::{BallotChoice, Vote};
use crate::core::ids::{AgendaItemId, MemberId};
use crate::meeting::AgendaItem;
use crate::member::Member;
use crate::proxy::Proxy;
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// Reject a vote whose voter already voted on `item`.
pub fn ensure_not_duplicate<'a>(
    existing: impl IntoIterator<Item = &'a Vote>,
    item: &AgendaItemId,
    voter: &MemberId,
) -> Result<(), VoteError> {
    let duplicate = existing
        .into_iter()
        .any(|v| &v.agenda_item_id == item && v.voter() == voter);
    if duplicate {
        return Err(VoteError::DuplicateVote {
            member: voter.clone(),
        });
    }
    Ok(())
}

/// Votes recorded so far for one or more agenda items.
///
/// In-memory helper around [`ensure_not_duplicate`] for callers that keep
/// their own vote list.
#[derive(Debug, Clone, Default)]
pub struct VoteLedger {
    votes: Vec<Vote>,
}

impl VoteLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_votes(votes: Vec<Vote>) -> Self {
        Self { votes }
    }

    /// Append a vote unless its voter already voted on the same item.
    /// The ledger is left untouched on error.
    pub fn record(&mut self, vote: Vote) -> Result<(), VoteError> {
        ensure_not_duplicate(&self.votes, &vote.agenda_item_id, vote.voter())?;
        self.votes.push(vote);
        Ok(())
    }

    pub fn votes(&self) -> &[Vote] {
        &self.votes
    }

    pub fn for_item<'a>(&'a self, item: &'a AgendaItemId) -> impl Iterator<Item = &'a Vote> + 'a {
        self.votes.iter().filter(move |v| &v.agenda_item_id == item)
    }

    pub fn into_votes(self) -> Vec<Vote> {
        self.votes
    }
}

fn ensure_allowed(item: &AgendaItem, choice: &BallotChoice) -> Result<(), VoteError> {
    if item.ballot.allows(choice) {
        Ok(())
    } else {
        Err(VoteError::ChoiceNotAllowed(choice.to_string()))
    }
}

fn ensure_eligible(member: &Member) -> Result<(), VoteError> {
    if member.is_eligible() {
        Ok(())
    } else {
        Err(VoteError::NotEligible(member.id.clone()))
    }
}

/// A member voting with their own weight.
pub fn prepare_direct_vote(
    item: &AgendaItem,
    voter: &Member,
    choice: BallotChoice,
    existing: &[Vote],
    now: DateTime<Utc>,
) -> Result<Vote, VoteError> {
    ensure_eligible(voter)?;
    ensure_allowed(item, &choice)?;
    ensure_not_duplicate(existing, &item.id, &voter.id)?;

    Ok(Vote::direct(
        item.id.clone(),
        voter.id.clone(),
        choice,
        voter.counted_weight(),
        now,
    ))
}

/// A grantee casting an absent grantor's weight.
///
/// `proxies_for_meeting` are the proxies active for the item's meeting.
/// The grantee must hold one from the grantor, and the grantor must not be
/// present (a present grantor votes for themself).
#[allow(clippy::too_many_arguments)]
pub fn prepare_proxy_vote<'a>(
    item: &AgendaItem,
    grantee: &Member,
    grantor: &Member,
    choice: BallotChoice,
    proxies_for_meeting: impl IntoIterator<Item = &'a Proxy>,
    present: &HashSet<MemberId>,
    existing: &[Vote],
    now: DateTime<Utc>,
) -> Result<Vote, VoteError> {
    ensure_eligible(grantee)?;
    ensure_eligible(grantor)?;
    ensure_allowed(item, &choice)?;

    let holds_proxy = proxies_for_meeting.into_iter().any(|p| {
        p.grantor_id == grantor.id && p.grantee_id == grantee.id && p.applies_to(&item.meeting_id)
    });
    if !holds_proxy {
        return Err(VoteError::NoActiveProxy {
            grantor: grantor.id.clone(),
            grantee: grantee.id.clone(),
        });
    }
    if present.contains(&grantor.id) {
        return Err(VoteError::GrantorPresent(grantor.id.clone()));
    }

    ensure_not_duplicate(existing, &item.id, &grantor.id)?;

    Ok(Vote::by_proxy(
        item.id.clone(),
        grantee.id.clone(),
        grantor.id.clone(),
        choice,
        grantor.counted_weight(),
        now,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ballot::BallotKind;
    use crate::core::ids::ProxyId;
    use crate::member::MemberRole;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 19, 0, 0).unwrap()
    }

    fn item() -> AgendaItem {
        AgendaItem::new("roof", "agm")
    }

    fn proxy(grantor: &str, grantee: &str) -> Proxy {
        Proxy {
            id: ProxyId::new("p-1"),
            organization_id: "org".into(),
            grantor_id: grantor.into(),
            grantee_id: grantee.into(),
            meeting_id: None,
            valid_from: now() - Duration::days(1),
            valid_until: None,
            document_ref: None,
        }
    }

    #[test]
    fn test_direct_vote_uses_own_weight() {
        let member = Member::new("a", "org", 12.5);
        let vote = prepare_direct_vote(&item(), &member, BallotChoice::Yes, &[], now()).unwrap();

        assert_eq!(vote.weight, 12.5);
        assert!(!vote.is_proxy);
        assert_eq!(vote.cast_at, now());
    }

    #[test]
    fn test_duplicate_vote_rejected_without_mutation() {
        let member = Member::new("a", "org", 12.5);
        let mut ledger = VoteLedger::new();
        let first = prepare_direct_vote(&item(), &member, BallotChoice::Yes, ledger.votes(), now())
            .unwrap();
        ledger.record(first.clone()).unwrap();

        let again = prepare_direct_vote(&item(), &member, BallotChoice::No, ledger.votes(), now());
        assert_eq!(
            again,
            Err(VoteError::DuplicateVote {
                member: MemberId::new("a")
            })
        );

        let forced = ledger.record(Vote::direct("roof", "a", BallotChoice::No, 12.5, now()));
        assert!(forced.is_err());
        assert_eq!(ledger.votes(), &[first]);
    }

    #[test]
    fn test_same_member_may_vote_on_other_items() {
        let mut ledger = VoteLedger::new();
        ledger
            .record(Vote::direct("roof", "a", BallotChoice::Yes, 1.0, now()))
            .unwrap();
        ledger
            .record(Vote::direct("budget", "a", BallotChoice::No, 1.0, now()))
            .unwrap();

        assert_eq!(ledger.for_item(&AgendaItemId::new("roof")).count(), 1);
        assert_eq!(ledger.into_votes().len(), 2);
    }

    #[test]
    fn test_observer_cannot_vote() {
        let observer = Member::new("o", "org", 5.0).with_role(MemberRole::Observer);
        let result = prepare_direct_vote(&item(), &observer, BallotChoice::Yes, &[], now());
        assert_eq!(result, Err(VoteError::NotEligible(MemberId::new("o"))));
    }

    #[test]
    fn test_choice_must_fit_ballot() {
        let member = Member::new("a", "org", 1.0);
        let binary = item().with_ballot(BallotKind::YesNo);
        let result = prepare_direct_vote(&binary, &member, BallotChoice::Abstain, &[], now());
        assert_eq!(result, Err(VoteError::ChoiceNotAllowed("abstain".to_string())));
    }

    #[test]
    fn test_proxy_vote_carries_grantor_weight() {
        let grantee = Member::new("a", "org", 25.0);
        let grantor = Member::new("c", "org", 30.0);
        let proxies = vec![proxy("c", "a")];
        let present: HashSet<_> = [MemberId::new("a")].into();

        let vote = prepare_proxy_vote(
            &item(),
            &grantee,
            &grantor,
            BallotChoice::No,
            &proxies,
            &present,
            &[],
            now(),
        )
        .unwrap();

        assert_eq!(vote.weight, 30.0);
        assert!(vote.is_proxy);
        assert_eq!(vote.proxy_for, Some(MemberId::new("c")));
        assert_eq!(vote.member_id, MemberId::new("a"));
    }

    #[test]
    fn test_proxy_vote_requires_proxy() {
        let grantee = Member::new("a", "org", 25.0);
        let grantor = Member::new("c", "org", 30.0);
        let proxies = vec![proxy("c", "b")];

        let result = prepare_proxy_vote(
            &item(),
            &grantee,
            &grantor,
            BallotChoice::Yes,
            &proxies,
            &HashSet::new(),
            &[],
            now(),
        );
        assert_eq!(
            result,
            Err(VoteError::NoActiveProxy {
                grantor: MemberId::new("c"),
                grantee: MemberId::new("a"),
            })
        );
    }

    #[test]
    fn test_present_grantor_votes_for_themself() {
        let grantee = Member::new("a", "org", 25.0);
        let grantor = Member::new("c", "org", 30.0);
        let proxies = vec![proxy("c", "a")];
        let present: HashSet<_> = [MemberId::new("a"), MemberId::new("c")].into();

        let result = prepare_proxy_vote(
            &item(),
            &grantee,
            &grantor,
            BallotChoice::Yes,
            &proxies,
            &present,
            &[],
            now(),
        );
        assert_eq!(result, Err(VoteError::GrantorPresent(MemberId::new("c"))));
    }

    #[test]
    fn test_grantor_cannot_vote_after_proxy_vote() {
        let proxy_vote = Vote::by_proxy("roof", "a", "c", BallotChoice::Yes, 30.0, now());
        let grantor = Member::new("c", "org", 30.0);

        let result = prepare_direct_vote(&item(), &grantor, BallotChoice::No, &[proxy_vote], now());
        assert_eq!(
            result,
            Err(VoteError::DuplicateVote {
                member: MemberId::new("c")
            })
        );
    }

    #[test]
    fn test_grantee_keeps_own_vote_alongside_proxy_vote() {
        let own = Vote::direct("roof", "a", BallotChoice::Yes, 25.0, now());
        let grantee = Member::new("a", "org", 25.0);
        let grantor = Member::new("c", "org", 30.0);
        let proxies = vec![proxy("c", "a")];

        let result = prepare_proxy_vote(
            &item(),
            &grantee,
            &grantor,
            BallotChoice::Yes,
            &proxies,
            &HashSet::new(),
            &[own],
            now(),
        );
        assert!(result.is_ok());
    }
}
