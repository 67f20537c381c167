//! Majority rules for weighted ballots
//!
//! This module defines the threshold functions that decide whether a
//! weighted vote passes.

use serde::{Deserialize, Serialize};

/// Rule for deciding a weighted vote
///
/// Weights are compared exactly, with no tolerance:
/// - `Simple`: yes weight strictly greater than no weight (a tie fails)
/// - `TwoThirds`: yes weight at least two thirds of yes + no + abstain
/// - `Unanimous`: no "no" weight at all and some "yes" weight
///
/// # Example
///
/// ```
/// use condo_domain::ballot::MajorityRule;
///
/// let rule = MajorityRule::Simple;
/// assert!(rule.is_satisfied(60.0, 40.0, 100.0));
/// assert!(!rule.is_satisfied(50.0, 50.0, 100.0)); // tie fails
///
/// let strict = MajorityRule::Unanimous;
/// assert!(strict.is_satisfied(90.0, 0.0, 100.0));  // abstentions allowed
/// assert!(!strict.is_satisfied(89.0, 1.0, 100.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MajorityRule {
    /// More yes than no weight
    #[default]
    Simple,

    /// Yes weight >= 2/3 of the total cast weight
    TwoThirds,

    /// No opposing weight and at least some support
    Unanimous,
}

impl MajorityRule {
    /// Check whether the rule is satisfied by the given bucket weights.
    ///
    /// `total_weight` is yes + no + abstain.
    pub fn is_satisfied(&self, yes: f64, no: f64, total_weight: f64) -> bool {
        match self {
            MajorityRule::Simple => yes > no,
            // yes >= total * 2/3, kept free of the division
            MajorityRule::TwoThirds => total_weight > 0.0 && yes * 3.0 >= total_weight * 2.0,
            MajorityRule::Unanimous => no == 0.0 && yes > 0.0,
        }
    }

    /// Stable identifier used in configuration and persisted records
    pub fn as_str(&self) -> &'static str {
        match self {
            MajorityRule::Simple => "simple",
            MajorityRule::TwoThirds => "two_thirds",
            MajorityRule::Unanimous => "unanimous",
        }
    }

    /// Get a human-readable description of this rule
    pub fn description(&self) -> String {
        match self {
            MajorityRule::Simple => "simple majority (more yes than no)".to_string(),
            MajorityRule::TwoThirds => "two-thirds majority of cast weight".to_string(),
            MajorityRule::Unanimous => "unanimous (no opposing weight)".to_string(),
        }
    }

    /// Minimum yes weight needed for a given total, where the rule has one.
    ///
    /// `Simple` depends on the no weight rather than the total and returns `None`.
    pub fn min_yes_weight(&self, total_weight: f64) -> Option<f64> {
        match self {
            MajorityRule::Simple => None,
            MajorityRule::TwoThirds => Some(total_weight * 2.0 / 3.0),
            MajorityRule::Unanimous => Some(total_weight),
        }
    }
}

impl std::fmt::Display for MajorityRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

impl std::str::FromStr for MajorityRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "simple" | "majority" => Ok(MajorityRule::Simple),
            "two_thirds" | "twothirds" | "2/3" => Ok(MajorityRule::TwoThirds),
            "unanimous" => Ok(MajorityRule::Unanimous),
            _ => Err(format!(
                "Unknown majority rule: {}. Valid: simple, two_thirds, unanimous",
                s
            )),
        }
    }
}
