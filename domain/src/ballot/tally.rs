//! Weighted vote tally

use super::rule::MajorityRule;
use super::vote::{BallotChoice, Vote};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Result of a weighted vote aggregation
///
/// `yes`, `no` and `abstain` are summed weights. `total_weight` is their sum;
/// weight cast for multiple-choice options is reported per label in
/// `choices` and stays out of the named buckets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteResult {
    pub yes: f64,
    pub no: f64,
    pub abstain: f64,
    /// Number of vote records, including option votes
    pub total_votes: usize,
    pub total_weight: f64,
    pub passed: bool,
    #[serde(default)]
    pub majority: MajorityRule,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub choices: BTreeMap<String, f64>,
}

impl VoteResult {
    /// Share of the counted weight that voted yes (0.0 to 1.0)
    pub fn yes_ratio(&self) -> f64 {
        if self.total_weight > 0.0 {
            self.yes / self.total_weight
        } else {
            0.0
        }
    }

    /// Option label with the most weight on a multiple-choice ballot.
    ///
    /// Ties go to the label that sorts first.
    pub fn leading_option(&self) -> Option<(&str, f64)> {
        self.choices
            .iter()
            .fold(None, |best: Option<(&str, f64)>, (label, weight)| match best {
                Some((_, w)) if w >= *weight => best,
                _ => Some((label.as_str(), *weight)),
            })
    }
}

/// Aggregate weighted votes and apply a majority rule.
pub fn tally<'a>(votes: impl IntoIterator<Item = &'a Vote>, rule: MajorityRule) -> VoteResult {
    let mut yes = 0.0;
    let mut no = 0.0;
    let mut abstain = 0.0;
    let mut total_votes = 0;
    let mut choices: BTreeMap<String, f64> = BTreeMap::new();

    for vote in votes {
        total_votes += 1;
        match &vote.choice {
            BallotChoice::Yes => yes += vote.weight,
            BallotChoice::No => no += vote.weight,
            BallotChoice::Abstain => abstain += vote.weight,
            BallotChoice::Option(label) => *choices.entry(label.clone()).or_default() += vote.weight,
        }
    }

    let total_weight = yes + no + abstain;

    VoteResult {
        yes,
        no,
        abstain,
        total_votes,
        total_weight,
        passed: rule.is_satisfied(yes, no, total_weight),
        majority: rule,
        choices,
    }
}
