//! Schedule Meeting use case
//!
//! Collects yes / maybe / no answers for a meeting's candidate dates, ranks
//! them, and lets an administrator fix the chosen date.

use crate::ports::events::{GovernanceEvent, GovernanceEventPublisher, NoEventPublisher};
use crate::ports::repository::{GovernanceRepository, RepositoryError};
use condo_domain::schedule::{rank_options, select_winner};
use condo_domain::{
    DomainError, MeetingId, MemberId, OptionScore, Preference, ScheduleError, ScheduleOption,
    ScheduleOptionId, ScheduleVote, calculate_winner,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ScheduleMeetingError {
    #[error("Unknown meeting: {0}")]
    UnknownMeeting(MeetingId),

    #[error("Unknown member: {0}")]
    UnknownMember(MemberId),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl From<ScheduleError> for ScheduleMeetingError {
    fn from(error: ScheduleError) -> Self {
        ScheduleMeetingError::Domain(error.into())
    }
}

/// Use case for date-finding polls
pub struct ScheduleMeetingUseCase<R: GovernanceRepository + 'static> {
    repository: Arc<R>,
    events: Arc<dyn GovernanceEventPublisher>,
}

impl<R: GovernanceRepository + 'static> ScheduleMeetingUseCase<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            events: Arc::new(NoEventPublisher),
        }
    }

    pub fn with_events(mut self, events: Arc<dyn GovernanceEventPublisher>) -> Self {
        self.events = events;
        self
    }

    /// Record a member's answer for one option of `meeting`, replacing any
    /// earlier answer for the same option.
    pub async fn vote(
        &self,
        meeting: &MeetingId,
        option: &ScheduleOptionId,
        member: &MemberId,
        preference: Preference,
    ) -> Result<ScheduleVote, ScheduleMeetingError> {
        let options = self.options(meeting).await?;
        if !options.iter().any(|o| &o.id == option) {
            return Err(ScheduleError::UnknownOption(option.clone()).into());
        }
        if self.repository.member(member).await?.is_none() {
            return Err(ScheduleMeetingError::UnknownMember(member.clone()));
        }

        let vote = ScheduleVote::new(option.clone(), member.clone(), preference);
        self.repository.upsert_schedule_vote(vote.clone()).await?;
        debug!("{} answered {} for option {}", member, preference, option);
        Ok(vote)
    }

    /// All options of `meeting` scored and ranked, best first.
    pub async fn ranking(
        &self,
        meeting: &MeetingId,
    ) -> Result<Vec<OptionScore>, ScheduleMeetingError> {
        let options = self.options(meeting).await?;
        let votes = self.repository.schedule_votes(meeting).await?;
        Ok(rank_options(&options, &votes))
    }

    /// Best option, or `None` when the meeting has no candidate dates.
    pub async fn winner(
        &self,
        meeting: &MeetingId,
    ) -> Result<Option<ScheduleOption>, ScheduleMeetingError> {
        let options = self.options(meeting).await?;
        let votes = self.repository.schedule_votes(meeting).await?;
        Ok(calculate_winner(&options, &votes).cloned())
    }

    /// Fix `option` as the meeting date, clearing any earlier selection.
    pub async fn select_winner(
        &self,
        meeting: &MeetingId,
        option: &ScheduleOptionId,
    ) -> Result<ScheduleOption, ScheduleMeetingError> {
        let mut options = self.options(meeting).await?;
        select_winner(meeting, option, &mut options)?;

        let selected = options
            .iter()
            .find(|o| &o.id == option)
            .cloned()
            .ok_or_else(|| ScheduleError::UnknownOption(option.clone()))?;
        self.repository
            .save_schedule_options(meeting, options)
            .await?;
        info!("Selected {} ({}) for {}", option, selected.starts_at, meeting);

        self.events.publish(GovernanceEvent::ScheduleWinnerSelected {
            option: selected.clone(),
        });
        Ok(selected)
    }

    async fn options(
        &self,
        meeting: &MeetingId,
    ) -> Result<Vec<ScheduleOption>, ScheduleMeetingError> {
        if self.repository.meeting(meeting).await?.is_none() {
            return Err(ScheduleMeetingError::UnknownMeeting(meeting.clone()));
        }
        Ok(self.repository.schedule_options(meeting).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{FakeRepository, RecordingPublisher, now};
    use chrono::Duration;
    use condo_domain::Member;

    /// Three options; answers give scores [1, 5, 5] with yes counts [0, 2, 3].
    async fn poll() -> (Arc<FakeRepository>, ScheduleMeetingUseCase<FakeRepository>) {
        let mut repo = FakeRepository::building();
        for i in 0..3 {
            repo = repo.with_option(ScheduleOption::new(
                format!("opt-{i}"),
                "agm",
                now() + Duration::days(i),
            ));
        }
        for m in ["e", "f"] {
            repo = repo.with_member(Member::new(m, "org", 0.0));
        }
        let repo = Arc::new(repo);
        let use_case = ScheduleMeetingUseCase::new(repo.clone());
        let meeting = MeetingId::new("agm");

        let answers = [
            ("opt-0", "a", Preference::Maybe),
            ("opt-1", "a", Preference::Yes),
            ("opt-1", "b", Preference::Yes),
            ("opt-1", "c", Preference::Maybe),
            ("opt-2", "a", Preference::Yes),
            ("opt-2", "b", Preference::Yes),
            ("opt-2", "c", Preference::Yes),
            ("opt-2", "d", Preference::No),
        ];
        for (option, member, preference) in answers {
            use_case
                .vote(&meeting, &option.into(), &member.into(), preference)
                .await
                .unwrap();
        }
        (repo, use_case)
    }

    #[tokio::test]
    async fn test_ranking_and_winner() {
        let (_, use_case) = poll().await;
        let meeting = MeetingId::new("agm");

        let ranking = use_case.ranking(&meeting).await.unwrap();
        let scores: Vec<_> = ranking.iter().map(|s| (s.option_id.as_str(), s.score)).collect();
        assert_eq!(scores, vec![("opt-2", 5), ("opt-1", 5), ("opt-0", 1)]);

        let winner = use_case.winner(&meeting).await.unwrap().unwrap();
        assert_eq!(winner.id.as_str(), "opt-2");
    }

    #[tokio::test]
    async fn test_changed_answer_replaces_previous() {
        let (_, use_case) = poll().await;
        let meeting = MeetingId::new("agm");

        // d moves from no to yes on opt-2, and e, f back opt-1
        use_case
            .vote(&meeting, &"opt-2".into(), &"d".into(), Preference::Yes)
            .await
            .unwrap();
        for m in ["e", "f"] {
            use_case
                .vote(&meeting, &"opt-1".into(), &m.into(), Preference::Yes)
                .await
                .unwrap();
        }

        let ranking = use_case.ranking(&meeting).await.unwrap();
        assert_eq!(ranking[0].option_id.as_str(), "opt-1");
        assert_eq!(ranking[0].score, 9);
        assert_eq!(ranking[1].score, 8);
    }

    #[tokio::test]
    async fn test_no_options_no_winner() {
        let use_case = ScheduleMeetingUseCase::new(Arc::new(FakeRepository::building()));
        let meeting = MeetingId::new("agm");

        assert!(use_case.winner(&meeting).await.unwrap().is_none());
        assert!(use_case.ranking(&meeting).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_select_winner_persists_single_selection() {
        let (repo, use_case) = poll().await;
        let events = Arc::new(RecordingPublisher::default());
        let use_case = use_case.with_events(events.clone());
        let meeting = MeetingId::new("agm");

        use_case
            .select_winner(&meeting, &"opt-1".into())
            .await
            .unwrap();
        let chosen = use_case
            .select_winner(&meeting, &"opt-2".into())
            .await
            .unwrap();

        assert!(chosen.selected);
        let selected: Vec<_> = repo
            .stored_options()
            .into_iter()
            .filter(|o| o.selected)
            .collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id.as_str(), "opt-2");
        assert_eq!(events.events().len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_option_and_meeting() {
        let (repo, use_case) = poll().await;
        let meeting = MeetingId::new("agm");

        let result = use_case.select_winner(&meeting, &"nope".into()).await;
        assert!(matches!(
            result,
            Err(ScheduleMeetingError::Domain(DomainError::Schedule(_)))
        ));
        assert!(repo.stored_options().iter().all(|o| !o.selected));

        let result = use_case
            .vote(&meeting, &"nope".into(), &"a".into(), Preference::Yes)
            .await;
        assert!(result.is_err());

        let result = use_case.ranking(&MeetingId::new("nope")).await;
        assert!(matches!(result, Err(ScheduleMeetingError::UnknownMeeting(_))));
    }
}
