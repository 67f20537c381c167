//! Schedule consensus: scoring candidate dates and picking a winner
//!
//! Every participant counts once regardless of ownership weight.
//! Score = 2·yes + 1·maybe − 1·no.
//!
//! Ranking order: score desc, then yes count desc, then no count asc, then
//! original option order. The sort is stable, so ranking the same input
//! twice gives the same winner.

use super::entities::{Preference, ScheduleOption, ScheduleVote};
use crate::core::ids::{MeetingId, ScheduleOptionId};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Schedule option not found for this meeting: {0}")]
    UnknownOption(ScheduleOptionId),
}

/// Vote counts and score of one option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionScore {
    pub option_id: ScheduleOptionId,
    pub yes: usize,
    pub maybe: usize,
    pub no: usize,
    pub score: i64,
}

impl OptionScore {
    pub fn from_counts(option_id: ScheduleOptionId, yes: usize, maybe: usize, no: usize) -> Self {
        let score = yes as i64 * Preference::Yes.points()
            + maybe as i64 * Preference::Maybe.points()
            + no as i64 * Preference::No.points();
        Self {
            option_id,
            yes,
            maybe,
            no,
            score,
        }
    }

    /// Count the votes cast for `option`.
    pub fn for_option<'a>(
        option: &ScheduleOption,
        votes: impl IntoIterator<Item = &'a ScheduleVote>,
    ) -> Self {
        let (mut yes, mut maybe, mut no) = (0, 0, 0);
        for vote in votes.into_iter().filter(|v| v.option_id == option.id) {
            match vote.preference {
                Preference::Yes => yes += 1,
                Preference::Maybe => maybe += 1,
                Preference::No => no += 1,
            }
        }
        Self::from_counts(option.id.clone(), yes, maybe, no)
    }

    pub fn total_votes(&self) -> usize {
        self.yes + self.maybe + self.no
    }
}

fn ranking_order(a: &OptionScore, b: &OptionScore) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| b.yes.cmp(&a.yes))
        .then_with(|| a.no.cmp(&b.no))
}

/// Rank already-scored options, best first.
pub fn rank_scores(mut scores: Vec<OptionScore>) -> Vec<OptionScore> {
    // stable: equal keys keep their input order
    scores.sort_by(ranking_order);
    scores
}

/// Score every option and rank them, best first.
pub fn rank_options(options: &[ScheduleOption], votes: &[ScheduleVote]) -> Vec<OptionScore> {
    rank_scores(
        options
            .iter()
            .map(|option| OptionScore::for_option(option, votes))
            .collect(),
    )
}

/// Best option, or `None` when there are no options.
pub fn calculate_winner<'a>(
    options: &'a [ScheduleOption],
    votes: &[ScheduleVote],
) -> Option<&'a ScheduleOption> {
    let best = rank_options(options, votes).into_iter().next()?;
    options.iter().find(|o| o.id == best.option_id)
}

/// Mark `option_id` as the chosen date for `meeting`, clearing any earlier
/// choice first so at most one option per meeting is selected.
///
/// Leaves `options` untouched when the option does not belong to the meeting.
pub fn select_winner(
    meeting: &MeetingId,
    option_id: &ScheduleOptionId,
    options: &mut [ScheduleOption],
) -> Result<(), ScheduleError> {
    let known = options
        .iter()
        .any(|o| &o.meeting_id == meeting && &o.id == option_id);
    if !known {
        return Err(ScheduleError::UnknownOption(option_id.clone()));
    }

    for option in options.iter_mut().filter(|o| &o.meeting_id == meeting) {
        option.selected = false;
    }
    for option in options
        .iter_mut()
        .filter(|o| &o.meeting_id == meeting && &o.id == option_id)
    {
        option.selected = true;
    }
    Ok(())
}

/// Currently selected option of a meeting, if any.
pub fn selected_option<'a>(
    meeting: &MeetingId,
    options: &'a [ScheduleOption],
) -> Option<&'a ScheduleOption> {
    options
        .iter()
        .find(|o| &o.meeting_id == meeting && o.selected)
}

/// Record a member's answer for an option, replacing their previous answer
/// for the same option.
pub fn record_preference(votes: &mut Vec<ScheduleVote>, vote: ScheduleVote) {
    match votes
        .iter_mut()
        .find(|v| v.option_id == vote.option_id && v.member_id == vote.member_id)
    {
        Some(existing) => existing.preference = vote.preference,
        None => votes.push(vote),
    }
}
