//! Quorum result value object

use serde::{Deserialize, Serialize};

/// Outcome of a weighted quorum evaluation
///
/// Field names match the persisted shape read by the minutes generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuorumResult {
    /// Combined weight of all eligible members
    pub total_weight: f64,
    /// Weight of eligible members who are present
    pub present_weight: f64,
    /// Effective present weight as a percentage of `total_weight`
    pub quorum_percentage: f64,
    pub quorum_reached: bool,
    pub present_members: usize,
    pub total_members: usize,
    /// Weight delegated by absent grantors to present grantees
    pub proxy_weight: f64,
    /// `present_weight + proxy_weight`
    pub effective_present_weight: f64,
    /// Threshold this result was evaluated against
    #[serde(default)]
    pub required_percentage: f64,
}

impl QuorumResult {
    /// Result for a meeting without eligible members: never reached.
    pub fn empty(required_percentage: f64) -> Self {
        Self {
            total_weight: 0.0,
            present_weight: 0.0,
            quorum_percentage: 0.0,
            quorum_reached: false,
            present_members: 0,
            total_members: 0,
            proxy_weight: 0.0,
            effective_present_weight: 0.0,
            required_percentage,
        }
    }

    /// Weight still missing to reach the threshold (0 once reached).
    pub fn missing_weight(&self) -> f64 {
        let required = self.total_weight * self.required_percentage / 100.0;
        (required - self.effective_present_weight).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_value(QuorumResult::empty(50.0)).unwrap();
        for key in [
            "total_weight",
            "present_weight",
            "quorum_percentage",
            "quorum_reached",
            "present_members",
            "total_members",
            "proxy_weight",
            "effective_present_weight",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
    }

    #[test]
    fn test_missing_weight() {
        let result = QuorumResult {
            total_weight: 100.0,
            present_weight: 30.0,
            quorum_percentage: 40.0,
            quorum_reached: false,
            present_members: 2,
            total_members: 4,
            proxy_weight: 10.0,
            effective_present_weight: 40.0,
            required_percentage: 50.0,
        };
        assert_eq!(result.missing_weight(), 10.0);
    }
}
