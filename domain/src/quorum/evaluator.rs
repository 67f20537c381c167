//! Weighted quorum evaluation
//!
//! ```text
//! eligible          = active members that are not observers
//! present_weight    = Σ weight of eligible members checked in (no check-out)
//! proxy_weight      = Σ weight of absent grantors whose grantee is present
//! effective         = present_weight + proxy_weight
//! quorum_percentage = effective / total_weight * 100   (0 when total is 0)
//! quorum_reached    = quorum_percentage >= required
//! ```

use super::result::QuorumResult;
use crate::attendance::{Attendance, present_member_ids};
use crate::core::ids::MeetingId;
use crate::member::Member;
use crate::proxy::{Proxy, active_for_meeting};
use crate::weight::{WeightLookup, delegated_weight};
use chrono::{DateTime, Utc};

/// Evaluate quorum for `meeting` over one consistent snapshot.
///
/// Every proxy record is judged on its own grantor/grantee pair: it adds
/// weight only if its grantee is present and its grantor is not. A meeting
/// without eligible members yields 0% and is never reached.
pub fn compute_quorum(
    meeting: &MeetingId,
    members: &[Member],
    attendance: &[Attendance],
    proxies: &[Proxy],
    required_percentage: f64,
    now: DateTime<Utc>,
) -> QuorumResult {
    let weights = WeightLookup::from_members(members);
    if weights.is_empty() {
        return QuorumResult::empty(required_percentage);
    }

    let present = present_member_ids(meeting, attendance);
    let active: Vec<&Proxy> = active_for_meeting(meeting, proxies, now).collect();

    let mut present_weight = 0.0;
    let mut proxy_weight = 0.0;
    let mut present_members = 0;

    for member in members.iter().filter(|m| m.is_eligible()) {
        if !present.contains(&member.id) {
            continue;
        }
        present_members += 1;
        present_weight += member.counted_weight();
        proxy_weight += delegated_weight(
            &member.id,
            meeting,
            active.iter().copied(),
            &weights,
            &present,
        );
    }

    let total_weight = weights.total();
    let effective_present_weight = present_weight + proxy_weight;
    let quorum_percentage = if total_weight > 0.0 {
        effective_present_weight / total_weight * 100.0
    } else {
        0.0
    };

    QuorumResult {
        total_weight,
        present_weight,
        quorum_percentage,
        quorum_reached: total_weight > 0.0 && quorum_percentage >= required_percentage,
        present_members,
        total_members: weights.len(),
        proxy_weight,
        effective_present_weight,
        required_percentage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ids::{MemberId, ProxyId};
    use crate::member::MemberRole;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 18, 30, 0).unwrap()
    }

    fn meeting() -> MeetingId {
        MeetingId::new("agm")
    }

    fn members() -> Vec<Member> {
        ["a", "b", "c", "d"]
            .into_iter()
            .map(|id| Member::new(id, "org", 25.0))
            .collect()
    }

    fn present(ids: &[&str]) -> Vec<Attendance> {
        ids.iter()
            .map(|id| Attendance::check_in("agm", *id, now() - Duration::minutes(30), 25.0))
            .collect()
    }

    fn proxy(grantor: &str, grantee: &str) -> Proxy {
        Proxy {
            id: ProxyId::new(format!("{grantor}->{grantee}")),
            organization_id: "org".into(),
            grantor_id: MemberId::new(grantor),
            grantee_id: MemberId::new(grantee),
            meeting_id: None,
            valid_from: now() - Duration::days(7),
            valid_until: None,
            document_ref: None,
        }
    }

    #[test]
    fn test_absent_grantor_proxy_counts() {
        let result = compute_quorum(
            &meeting(),
            &members(),
            &present(&["a", "b"]),
            &[proxy("c", "a")],
            50.0,
            now(),
        );

        assert_eq!(result.total_weight, 100.0);
        assert_eq!(result.present_weight, 50.0);
        assert_eq!(result.proxy_weight, 25.0);
        assert_eq!(result.effective_present_weight, 75.0);
        assert_eq!(result.quorum_percentage, 75.0);
        assert!(result.quorum_reached);
        assert_eq!(result.present_members, 2);
        assert_eq!(result.total_members, 4);
    }

    #[test]
    fn test_present_grantor_overrides_proxy() {
        let result = compute_quorum(
            &meeting(),
            &members(),
            &present(&["a", "b", "c"]),
            &[proxy("c", "a")],
            50.0,
            now(),
        );

        assert_eq!(result.present_weight, 75.0);
        assert_eq!(result.proxy_weight, 0.0);
        assert_eq!(result.effective_present_weight, 75.0);
    }

    #[test]
    fn test_grantor_presence_alone_decides() {
        // C present, D absent: C's proxy contributes nothing, the
        // effective weight is just the two present owners.
        let result = compute_quorum(
            &meeting(),
            &members(),
            &present(&["a", "c"]),
            &[proxy("c", "a")],
            50.0,
            now(),
        );
        assert_eq!(result.proxy_weight, 0.0);
        assert_eq!(result.effective_present_weight, 50.0);
    }

    #[test]
    fn test_absent_grantee_carries_nothing() {
        let result = compute_quorum(
            &meeting(),
            &members(),
            &present(&["b"]),
            &[proxy("c", "a")],
            50.0,
            now(),
        );
        assert_eq!(result.proxy_weight, 0.0);
        assert_eq!(result.quorum_percentage, 25.0);
        assert!(!result.quorum_reached);
    }

    #[test]
    fn test_each_proxy_judged_independently() {
        // b is grantee of d (absent) and grantor to a (both present)
        let proxies = vec![proxy("b", "a"), proxy("d", "b")];
        let result = compute_quorum(
            &meeting(),
            &members(),
            &present(&["a", "b"]),
            &proxies,
            50.0,
            now(),
        );
        assert_eq!(result.proxy_weight, 25.0);
        assert_eq!(result.effective_present_weight, 75.0);
    }

    #[test]
    fn test_zero_eligible_members_never_reached() {
        let observers = vec![Member::new("x", "org", 10.0).with_role(MemberRole::Observer)];
        let result = compute_quorum(&meeting(), &observers, &present(&["x"]), &[], 0.0, now());

        assert_eq!(result.quorum_percentage, 0.0);
        assert!(!result.quorum_reached);
        assert_eq!(result.total_members, 0);
    }

    #[test]
    fn test_zero_total_weight_never_reached() {
        let members = vec![Member::new("a", "org", 0.0)];
        let result = compute_quorum(&meeting(), &members, &present(&["a"]), &[], 0.0, now());
        assert_eq!(result.quorum_percentage, 0.0);
        assert!(!result.quorum_reached);
        assert_eq!(result.present_members, 1);
    }

    #[test]
    fn test_observers_and_inactive_excluded() {
        let mut roster = members();
        roster.push(Member::new("obs", "org", 50.0).with_role(MemberRole::Observer));
        roster.push(Member::new("gone", "org", 50.0).inactive());

        let result = compute_quorum(
            &meeting(),
            &roster,
            &present(&["a", "obs", "gone"]),
            &[],
            50.0,
            now(),
        );
        assert_eq!(result.total_weight, 100.0);
        assert_eq!(result.present_weight, 25.0);
        assert_eq!(result.present_members, 1);
    }

    #[test]
    fn test_checked_out_member_not_counted() {
        let mut attendance = present(&["a", "b"]);
        attendance[1].check_out(now());

        let result = compute_quorum(&meeting(), &members(), &attendance, &[], 50.0, now());
        assert_eq!(result.present_weight, 25.0);
    }

    #[test]
    fn test_inactive_proxies_ignored() {
        let mut expired = proxy("c", "a");
        expired.valid_until = Some(now() - Duration::hours(1));
        let mut other_meeting = proxy("d", "b");
        other_meeting.meeting_id = Some(MeetingId::new("board"));

        let result = compute_quorum(
            &meeting(),
            &members(),
            &present(&["a", "b"]),
            &[expired, other_meeting],
            50.0,
            now(),
        );
        assert_eq!(result.proxy_weight, 0.0);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let result = compute_quorum(
            &meeting(),
            &members(),
            &present(&["a", "b"]),
            &[],
            50.0,
            now(),
        );
        assert_eq!(result.quorum_percentage, 50.0);
        assert!(result.quorum_reached);
    }

    #[test]
    fn test_adding_present_member_is_monotonic() {
        let proxies = vec![proxy("c", "a"), proxy("d", "b")];
        let ids = ["a", "b", "c", "d"];
        let mut previous = 0.0;

        for n in 0..=ids.len() {
            let result = compute_quorum(
                &meeting(),
                &members(),
                &present(&ids[..n]),
                &proxies,
                50.0,
                now(),
            );
            assert!(result.effective_present_weight >= previous);
            previous = result.effective_present_weight;
        }
        assert_eq!(previous, 100.0);
    }
}
