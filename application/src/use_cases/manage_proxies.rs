//! Manage Proxies use case
//!
//! Creates, revokes and deletes delegation records, and lists the proxies a
//! member holds or has given for a meeting. Validation is done by the
//! domain [`ProxyRegistry`] against the organization's current proxy set.

use crate::config::GovernanceConfig;
use crate::ports::clock::{Clock, SystemClock};
use crate::ports::events::{GovernanceEvent, GovernanceEventPublisher, NoEventPublisher};
use crate::ports::repository::{GovernanceRepository, RepositoryError};
use condo_domain::{
    DomainError, MeetingId, MemberId, NewProxy, OrganizationId, Proxy, ProxyError, ProxyId,
    ProxyRegistry,
};
use std::slice;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

/// Errors that can occur while managing proxies
#[derive(Error, Debug)]
pub enum ManageProxiesError {
    #[error("Unknown member: {0}")]
    UnknownMember(MemberId),

    #[error("Unknown meeting: {0}")]
    UnknownMeeting(MeetingId),

    #[error("Member {member} does not belong to organization {organization}")]
    ForeignMember {
        member: MemberId,
        organization: OrganizationId,
    },

    #[error("Meeting {meeting} does not belong to organization {organization}")]
    ForeignMeeting {
        meeting: MeetingId,
        organization: OrganizationId,
    },

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl From<ProxyError> for ManageProxiesError {
    fn from(error: ProxyError) -> Self {
        ManageProxiesError::Domain(error.into())
    }
}

/// Use case for managing proxy delegations
pub struct ManageProxiesUseCase<R: GovernanceRepository + 'static> {
    repository: Arc<R>,
    registry: ProxyRegistry,
    events: Arc<dyn GovernanceEventPublisher>,
    clock: Arc<dyn Clock>,
    /// Serializes check-then-write sequences
    write_lock: Mutex<()>,
}

impl<R: GovernanceRepository + 'static> ManageProxiesUseCase<R> {
    pub fn new(repository: Arc<R>, config: &GovernanceConfig) -> Self {
        Self {
            repository,
            registry: config.proxy.registry(),
            events: Arc::new(NoEventPublisher),
            clock: Arc::new(SystemClock),
            write_lock: Mutex::new(()),
        }
    }

    pub fn with_events(mut self, events: Arc<dyn GovernanceEventPublisher>) -> Self {
        self.events = events;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Validate and store a new delegation.
    pub async fn create(&self, input: NewProxy) -> Result<Proxy, ManageProxiesError> {
        let _guard = self.write_lock.lock().await;

        // the registry only sees the organization's proxies, so every
        // reference must belong to that organization
        let organization = &input.organization_id;
        for member in [&input.grantor_id, &input.grantee_id] {
            let found = self
                .repository
                .member(member)
                .await?
                .ok_or_else(|| ManageProxiesError::UnknownMember(member.clone()))?;
            if &found.organization_id != organization {
                return Err(ManageProxiesError::ForeignMember {
                    member: member.clone(),
                    organization: organization.clone(),
                });
            }
        }
        if let Some(meeting) = input.scope.meeting_id() {
            let found = self
                .repository
                .meeting(meeting)
                .await?
                .ok_or_else(|| ManageProxiesError::UnknownMeeting(meeting.clone()))?;
            if &found.organization_id != organization {
                return Err(ManageProxiesError::ForeignMeeting {
                    meeting: meeting.clone(),
                    organization: organization.clone(),
                });
            }
        }

        let existing = self.repository.proxies(&input.organization_id).await?;
        let id = ProxyId::new(Uuid::new_v4().to_string());
        let proxy = self
            .registry
            .create(id, input, &existing, self.clock.now())?;

        self.repository.insert_proxy(proxy.clone()).await?;
        info!(
            "Proxy {} created: {} -> {} ({})",
            proxy.id,
            proxy.grantor_id,
            proxy.grantee_id,
            proxy
                .meeting_id
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| "general".to_string())
        );

        self.events.publish(GovernanceEvent::ProxyCreated {
            proxy: proxy.clone(),
        });
        Ok(proxy)
    }

    /// End a proxy's validity now. The record is kept.
    pub async fn revoke(&self, id: &ProxyId) -> Result<Proxy, ManageProxiesError> {
        let _guard = self.write_lock.lock().await;

        let proxy = self.find(id).await?;
        let revoked = self
            .registry
            .revoke(id, slice::from_ref(&proxy), self.clock.now())?;

        self.repository.update_proxy(revoked.clone()).await?;
        info!("Proxy {} revoked", id);

        self.events.publish(GovernanceEvent::ProxyRevoked {
            proxy: revoked.clone(),
        });
        Ok(revoked)
    }

    /// Remove a proxy record entirely.
    pub async fn delete(&self, id: &ProxyId) -> Result<Proxy, ManageProxiesError> {
        let _guard = self.write_lock.lock().await;

        let proxy = self.find(id).await?;
        self.registry.delete(id, slice::from_ref(&proxy))?;

        self.repository.remove_proxy(id).await?;
        info!("Proxy {} deleted", id);

        self.events.publish(GovernanceEvent::ProxyDeleted {
            proxy_id: id.clone(),
        });
        Ok(proxy)
    }

    /// Active proxies `member` holds for `meeting`.
    pub async fn incoming(
        &self,
        member: &MemberId,
        meeting: &MeetingId,
    ) -> Result<Vec<Proxy>, ManageProxiesError> {
        let proxies = self.meeting_proxies(meeting).await?;
        let held = self
            .registry
            .active_for_grantee(member, meeting, &proxies, self.clock.now());
        debug!("{} holds {} proxies for {}", member, held.len(), meeting);
        Ok(held.into_iter().cloned().collect())
    }

    /// Active proxies `member` has given for `meeting`.
    pub async fn outgoing(
        &self,
        member: &MemberId,
        meeting: &MeetingId,
    ) -> Result<Vec<Proxy>, ManageProxiesError> {
        let proxies = self.meeting_proxies(meeting).await?;
        Ok(self
            .registry
            .active_for_grantor(member, meeting, &proxies, self.clock.now())
            .into_iter()
            .cloned()
            .collect())
    }

    async fn find(&self, id: &ProxyId) -> Result<Proxy, ManageProxiesError> {
        self.repository
            .proxy(id)
            .await?
            .ok_or_else(|| ProxyError::NotFound(id.clone()).into())
    }

    async fn meeting_proxies(&self, meeting: &MeetingId) -> Result<Vec<Proxy>, ManageProxiesError> {
        let snapshot = self
            .repository
            .meeting_snapshot(meeting)
            .await?
            .ok_or_else(|| ManageProxiesError::UnknownMeeting(meeting.clone()))?;
        Ok(snapshot.proxies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::clock::FixedClock;
    use crate::use_cases::test_support::{FakeRepository, RecordingPublisher, now};
    use chrono::Duration;
    use condo_domain::{Meeting, Member};

    fn use_case(repo: Arc<FakeRepository>) -> ManageProxiesUseCase<FakeRepository> {
        ManageProxiesUseCase::new(repo, &GovernanceConfig::default())
            .with_clock(Arc::new(FixedClock(now())))
    }

    fn domain_error(result: Result<Proxy, ManageProxiesError>) -> ProxyError {
        match result {
            Err(ManageProxiesError::Domain(DomainError::Proxy(e))) => e,
            other => panic!("expected proxy error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_general_proxy() {
        let repo = Arc::new(FakeRepository::building());
        let events = Arc::new(RecordingPublisher::default());
        let use_case = use_case(repo.clone()).with_events(events.clone());

        let proxy = use_case
            .create(NewProxy::general("org", "c", "a"))
            .await
            .unwrap();

        assert!(proxy.is_general());
        assert_eq!(proxy.valid_from, now());
        assert_eq!(repo.stored_proxies(), vec![proxy.clone()]);
        assert_eq!(events.events(), vec![GovernanceEvent::ProxyCreated { proxy }]);
    }

    #[tokio::test]
    async fn test_duplicate_grantor_rejected_and_nothing_stored() {
        let repo = Arc::new(FakeRepository::building());
        let use_case = use_case(repo.clone());

        use_case
            .create(NewProxy::general("org", "c", "a"))
            .await
            .unwrap();
        let second = use_case.create(NewProxy::general("org", "c", "b")).await;

        assert_eq!(domain_error(second), ProxyError::DuplicateGrantorProxy);
        assert_eq!(repo.stored_proxies().len(), 1);
    }

    #[tokio::test]
    async fn test_self_delegation_rejected() {
        let use_case = use_case(Arc::new(FakeRepository::building()));
        let result = use_case.create(NewProxy::general("org", "a", "a")).await;
        assert_eq!(domain_error(result), ProxyError::SelfDelegation);
    }

    #[tokio::test]
    async fn test_grantee_limit_from_config() {
        let repo = Arc::new(
            FakeRepository::building().with_member(Member::new("e", "org", 10.0)),
        );
        let config = GovernanceConfig::default().with_max_proxies_per_grantee(1);
        let use_case = ManageProxiesUseCase::new(repo, &config)
            .with_clock(Arc::new(FixedClock(now())));

        use_case
            .create(NewProxy::general("org", "c", "a"))
            .await
            .unwrap();
        let result = use_case.create(NewProxy::general("org", "e", "a")).await;
        assert_eq!(
            domain_error(result),
            ProxyError::GranteeLimitExceeded { limit: 1 }
        );
    }

    #[tokio::test]
    async fn test_unknown_references() {
        let use_case = use_case(Arc::new(FakeRepository::building()));

        let result = use_case.create(NewProxy::general("org", "zz", "a")).await;
        assert!(matches!(result, Err(ManageProxiesError::UnknownMember(m)) if m.as_str() == "zz"));

        let result = use_case
            .create(NewProxy::for_meeting("org", "c", "a", "nope"))
            .await;
        assert!(matches!(result, Err(ManageProxiesError::UnknownMeeting(_))));
    }

    #[tokio::test]
    async fn test_proxy_must_stay_inside_its_organization() {
        let repo = Arc::new(
            FakeRepository::building()
                .with_member(Member::new("x", "elsewhere", 10.0))
                .with_meeting(Meeting::new("board", "elsewhere")),
        );
        let use_case = use_case(repo.clone());
        use_case
            .create(NewProxy::general("org", "b", "a"))
            .await
            .unwrap();
        use_case
            .create(NewProxy::general("org", "c", "a"))
            .await
            .unwrap();

        // a full grantee cannot be reached through another organization's proxy set
        let result = use_case.create(NewProxy::general("elsewhere", "d", "a")).await;
        assert!(matches!(
            result,
            Err(ManageProxiesError::ForeignMember { member, .. }) if member.as_str() == "d"
        ));

        let result = use_case.create(NewProxy::general("org", "d", "x")).await;
        assert!(matches!(
            result,
            Err(ManageProxiesError::ForeignMember { member, .. }) if member.as_str() == "x"
        ));

        let result = use_case
            .create(NewProxy::for_meeting("org", "d", "b", "board"))
            .await;
        assert!(matches!(
            result,
            Err(ManageProxiesError::ForeignMeeting { meeting, .. }) if meeting.as_str() == "board"
        ));

        assert_eq!(repo.stored_proxies().len(), 2);
    }

    #[tokio::test]
    async fn test_upcoming_proxy_blocks_immediate_one() {
        let repo = Arc::new(FakeRepository::building());
        let use_case = use_case(repo.clone());

        use_case
            .create(NewProxy::general("org", "c", "a").valid_from(now() + Duration::days(7)))
            .await
            .unwrap();
        let result = use_case.create(NewProxy::general("org", "c", "b")).await;

        assert_eq!(domain_error(result), ProxyError::DuplicateGrantorProxy);
        assert_eq!(repo.stored_proxies().len(), 1);
    }

    #[tokio::test]
    async fn test_revoke_ends_validity_and_frees_grantor() {
        let repo = Arc::new(FakeRepository::building());
        let events = Arc::new(RecordingPublisher::default());
        let use_case = use_case(repo.clone()).with_events(events.clone());

        let proxy = use_case
            .create(NewProxy::general("org", "c", "a").valid_from(now() - Duration::days(1)))
            .await
            .unwrap();
        let revoked = use_case.revoke(&proxy.id).await.unwrap();

        assert_eq!(revoked.valid_until, Some(now()));
        assert_eq!(repo.stored_proxies(), vec![revoked.clone()]);
        assert!(matches!(
            events.events().last(),
            Some(GovernanceEvent::ProxyRevoked { .. })
        ));

        // no longer active, so it no longer counts as incoming
        let held = use_case
            .incoming(&MemberId::new("a"), &MeetingId::new("agm"))
            .await
            .unwrap();
        assert!(held.is_empty());
    }

    #[tokio::test]
    async fn test_delete_removes_record() {
        let repo = Arc::new(FakeRepository::building());
        let use_case = use_case(repo.clone());

        let proxy = use_case
            .create(NewProxy::general("org", "c", "a"))
            .await
            .unwrap();
        use_case.delete(&proxy.id).await.unwrap();
        assert!(repo.stored_proxies().is_empty());

        let again = use_case.delete(&proxy.id).await;
        assert_eq!(domain_error(again), ProxyError::NotFound(proxy.id));
    }

    #[tokio::test]
    async fn test_incoming_and_outgoing() {
        let repo = Arc::new(FakeRepository::building());
        let use_case = use_case(repo);

        use_case
            .create(NewProxy::general("org", "c", "a"))
            .await
            .unwrap();
        use_case
            .create(NewProxy::for_meeting("org", "d", "a", "agm"))
            .await
            .unwrap();

        let meeting = MeetingId::new("agm");
        let incoming = use_case
            .incoming(&MemberId::new("a"), &meeting)
            .await
            .unwrap();
        assert_eq!(incoming.len(), 2);

        let outgoing = use_case
            .outgoing(&MemberId::new("d"), &meeting)
            .await
            .unwrap();
        assert_eq!(outgoing.len(), 1);
        assert_eq!(outgoing[0].grantee_id.as_str(), "a");
    }
}
