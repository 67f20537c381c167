//! Ballot vote types
//!
//! Ballot values are a closed set so majority rules and tallies can match
//! on them exhaustively. Multiple-choice ballots carry the chosen option's
//! label.

use crate::core::ids::{AgendaItemId, MemberId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a member chose on a ballot
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BallotChoice {
    Yes,
    No,
    Abstain,
    /// One of the labels of a multiple-choice ballot
    Option(String),
}

impl BallotChoice {
    pub fn label(&self) -> &str {
        match self {
            BallotChoice::Yes => "yes",
            BallotChoice::No => "no",
            BallotChoice::Abstain => "abstain",
            BallotChoice::Option(label) => label,
        }
    }
}

impl std::fmt::Display for BallotChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for BallotChoice {
    type Err = String;

    /// `yes`, `no` and `abstain` map to their variants; anything else is an
    /// option label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("Ballot choice cannot be empty".to_string());
        }
        Ok(match trimmed.to_lowercase().as_str() {
            "yes" => BallotChoice::Yes,
            "no" => BallotChoice::No,
            "abstain" => BallotChoice::Abstain,
            _ => BallotChoice::Option(trimmed.to_string()),
        })
    }
}

/// Which choices an agenda item accepts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BallotKind {
    /// Binary ballot
    YesNo,
    /// Ternary ballot (default)
    #[default]
    YesNoAbstain,
    /// Free choice among labelled options; abstention is always allowed
    MultipleChoice(Vec<String>),
}

impl BallotKind {
    pub fn allows(&self, choice: &BallotChoice) -> bool {
        match (self, choice) {
            (BallotKind::YesNo, BallotChoice::Yes | BallotChoice::No) => true,
            (BallotKind::YesNoAbstain, BallotChoice::Yes | BallotChoice::No | BallotChoice::Abstain) => {
                true
            }
            (BallotKind::MultipleChoice(_), BallotChoice::Abstain) => true,
            (BallotKind::MultipleChoice(options), BallotChoice::Option(label)) => {
                options.iter().any(|o| o == label)
            }
            _ => false,
        }
    }
}

/// A recorded ballot vote (Entity)
///
/// `member_id` is the member who cast it. For proxy votes `proxy_for`
/// names the grantor whose weight was cast; see [`Vote::voter`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vote {
    pub agenda_item_id: AgendaItemId,
    pub member_id: MemberId,
    pub choice: BallotChoice,
    /// Weight used at cast time
    pub weight: f64,
    #[serde(default)]
    pub is_proxy: bool,
    #[serde(default)]
    pub proxy_for: Option<MemberId>,
    pub cast_at: DateTime<Utc>,
}

impl Vote {
    /// A member voting with their own weight.
    pub fn direct(
        agenda_item_id: impl Into<AgendaItemId>,
        member_id: impl Into<MemberId>,
        choice: BallotChoice,
        weight: f64,
        cast_at: DateTime<Utc>,
    ) -> Self {
        Self {
            agenda_item_id: agenda_item_id.into(),
            member_id: member_id.into(),
            choice,
            weight,
            is_proxy: false,
            proxy_for: None,
            cast_at,
        }
    }

    /// A grantee casting an absent grantor's weight.
    pub fn by_proxy(
        agenda_item_id: impl Into<AgendaItemId>,
        grantee_id: impl Into<MemberId>,
        grantor_id: impl Into<MemberId>,
        choice: BallotChoice,
        weight: f64,
        cast_at: DateTime<Utc>,
    ) -> Self {
        Self {
            is_proxy: true,
            proxy_for: Some(grantor_id.into()),
            ..Self::direct(agenda_item_id, grantee_id, choice, weight, cast_at)
        }
    }

    /// The member whose weight this vote carries: the grantor for proxy
    /// votes, the caster otherwise. One vote per (agenda item, voter).
    pub fn voter(&self) -> &MemberId {
        self.proxy_for.as_ref().unwrap_or(&self.member_id)
    }
}
