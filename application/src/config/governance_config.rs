//! Governance parameters: limits and defaults applied by the use cases.
//!
//! [`GovernanceConfig`] carries the organization-level knobs that are not
//! stored on the entities themselves: the proxy limit, the quorum fallback
//! for meetings without their own requirement, and the majority rule used
//! when an agenda item does not specify one.

use condo_domain::proxy::DEFAULT_MAX_PROXIES_PER_GRANTEE;
use condo_domain::{MajorityRule, ProxyRegistry};
use serde::{Deserialize, Serialize};

/// Default required quorum, as a percentage of total eligible weight.
pub const DEFAULT_QUORUM_PERCENTAGE: f64 = 50.0;

/// Proxy delegation policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyPolicy {
    /// Maximum active proxies one member may hold for a single meeting.
    pub max_per_grantee: usize,
}

impl Default for ProxyPolicy {
    fn default() -> Self {
        Self {
            max_per_grantee: DEFAULT_MAX_PROXIES_PER_GRANTEE,
        }
    }
}

impl ProxyPolicy {
    pub fn registry(&self) -> ProxyRegistry {
        ProxyRegistry::new(self.max_per_grantee)
    }
}

/// Governance parameters passed into the use cases.
///
/// | Field | Used by |
/// |-------|---------|
/// | `proxy` | ManageProxies, CastVote |
/// | `quorum_default_percentage` | EvaluateQuorum |
/// | `default_majority` | fallback when building agenda items |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GovernanceConfig {
    pub proxy: ProxyPolicy,
    /// Applied when a meeting has no `required_quorum` of its own.
    pub quorum_default_percentage: f64,
    pub default_majority: MajorityRule,
}

impl Default for GovernanceConfig {
    fn default() -> Self {
        Self {
            proxy: ProxyPolicy::default(),
            quorum_default_percentage: DEFAULT_QUORUM_PERCENTAGE,
            default_majority: MajorityRule::default(),
        }
    }
}

impl GovernanceConfig {
    // ==================== Builder Methods ====================

    pub fn with_max_proxies_per_grantee(mut self, max: usize) -> Self {
        self.proxy.max_per_grantee = max;
        self
    }

    pub fn with_quorum_default_percentage(mut self, percentage: f64) -> Self {
        self.quorum_default_percentage = percentage;
        self
    }

    pub fn with_default_majority(mut self, rule: MajorityRule) -> Self {
        self.default_majority = rule;
        self
    }
}
