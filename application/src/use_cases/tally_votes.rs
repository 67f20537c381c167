//! Tally Votes use case

use crate::config::GovernanceConfig;
use crate::ports::repository::{GovernanceRepository, RepositoryError};
use condo_domain::{AgendaItemId, MajorityRule, VoteResult, tally};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum TallyVotesError {
    #[error("Unknown agenda item: {0}")]
    UnknownAgendaItem(AgendaItemId),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Use case for tallying the votes of an agenda item
pub struct TallyVotesUseCase<R: GovernanceRepository + 'static> {
    repository: Arc<R>,
    default_majority: MajorityRule,
}

impl<R: GovernanceRepository + 'static> TallyVotesUseCase<R> {
    pub fn new(repository: Arc<R>, config: &GovernanceConfig) -> Self {
        Self {
            repository,
            default_majority: config.default_majority,
        }
    }

    /// Tally every recorded vote under the item's majority rule.
    pub async fn execute(&self, item: &AgendaItemId) -> Result<VoteResult, TallyVotesError> {
        let agenda_item = self
            .repository
            .agenda_item(item)
            .await?
            .ok_or_else(|| TallyVotesError::UnknownAgendaItem(item.clone()))?;
        let rule = agenda_item.majority_or(self.default_majority);

        let votes = self.repository.votes(item).await?;
        let result = tally(&votes, rule);

        info!(
            "Tally for {}: yes {:.2} / no {:.2} / abstain {:.2} under {} -> {}",
            item,
            result.yes,
            result.no,
            result.abstain,
            rule,
            if result.passed { "passed" } else { "failed" }
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{FakeRepository, now};
    use condo_domain::{AgendaItem, BallotChoice, Vote};

    fn vote(item: &str, member: &str, choice: BallotChoice) -> Vote {
        Vote::direct(item, member, choice, 25.0, now())
    }

    #[tokio::test]
    async fn test_simple_majority_passes() {
        let repo = FakeRepository::building()
            .with_vote(vote("roof", "a", BallotChoice::Yes))
            .with_vote(vote("roof", "b", BallotChoice::Yes))
            .with_vote(vote("roof", "c", BallotChoice::No));

        let use_case = TallyVotesUseCase::new(Arc::new(repo), &GovernanceConfig::default());
        let result = use_case.execute(&AgendaItemId::new("roof")).await.unwrap();

        assert_eq!(result.yes, 50.0);
        assert_eq!(result.no, 25.0);
        assert_eq!(result.total_votes, 3);
        assert_eq!(result.majority, MajorityRule::Simple);
        assert!(result.passed);
    }

    #[tokio::test]
    async fn test_default_majority_from_config() {
        let repo = FakeRepository::building()
            .with_vote(vote("roof", "a", BallotChoice::Yes))
            .with_vote(vote("roof", "b", BallotChoice::Yes))
            .with_vote(vote("roof", "c", BallotChoice::No));
        let config = GovernanceConfig::default().with_default_majority(MajorityRule::Unanimous);

        let result = TallyVotesUseCase::new(Arc::new(repo), &config)
            .execute(&AgendaItemId::new("roof"))
            .await
            .unwrap();

        assert_eq!(result.majority, MajorityRule::Unanimous);
        assert!(!result.passed);
    }

    #[tokio::test]
    async fn test_item_rule_wins_over_default() {
        let repo = FakeRepository::building()
            .with_item(AgendaItem::new("bylaws", "agm").with_majority(MajorityRule::TwoThirds))
            .with_vote(vote("bylaws", "a", BallotChoice::Yes))
            .with_vote(vote("bylaws", "b", BallotChoice::Yes))
            .with_vote(vote("bylaws", "c", BallotChoice::Abstain));

        let result = TallyVotesUseCase::new(Arc::new(repo), &GovernanceConfig::default())
            .execute(&AgendaItemId::new("bylaws"))
            .await
            .unwrap();

        // 50 of 75 counted weight is exactly two thirds
        assert_eq!(result.majority, MajorityRule::TwoThirds);
        assert!(result.passed);
    }

    #[tokio::test]
    async fn test_unknown_item() {
        let use_case =
            TallyVotesUseCase::new(Arc::new(FakeRepository::building()), &GovernanceConfig::default());
        let result = use_case.execute(&AgendaItemId::new("nope")).await;
        assert!(matches!(result, Err(TallyVotesError::UnknownAgendaItem(_))));
    }
}
