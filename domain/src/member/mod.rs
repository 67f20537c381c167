//! Member entity
//!
//! A member carries a numeric voting weight (typically an ownership share)
//! instead of one-person-one-vote. Weight is read once per calculation pass;
//! it may change between meetings (ownership transfer) but never during one.

use crate::core::ids::{MemberId, OrganizationId};
use serde::{Deserialize, Serialize};

/// Role of a member within the organization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Admin,
    Chair,
    Secretary,
    #[default]
    Voter,
    /// Attends but never counts toward quorum or votes.
    Observer,
}

impl MemberRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberRole::Admin => "admin",
            MemberRole::Chair => "chair",
            MemberRole::Secretary => "secretary",
            MemberRole::Voter => "voter",
            MemberRole::Observer => "observer",
        }
    }
}

impl std::fmt::Display for MemberRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for MemberRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(MemberRole::Admin),
            "chair" => Ok(MemberRole::Chair),
            "secretary" => Ok(MemberRole::Secretary),
            "voter" => Ok(MemberRole::Voter),
            "observer" => Ok(MemberRole::Observer),
            _ => Err(format!(
                "Unknown member role: {}. Valid: admin, chair, secretary, voter, observer",
                s
            )),
        }
    }
}

/// A member of an organization (Entity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub organization_id: OrganizationId,
    #[serde(default)]
    pub name: String,
    /// Voting weight (>= 0), e.g. ownership percentage
    pub weight: f64,
    #[serde(default)]
    pub role: MemberRole,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Member {
    /// Create an active voter. Negative weights are clamped to zero.
    pub fn new(
        id: impl Into<MemberId>,
        organization_id: impl Into<OrganizationId>,
        weight: f64,
    ) -> Self {
        Self {
            id: id.into(),
            organization_id: organization_id.into(),
            name: String::new(),
            weight: weight.max(0.0),
            role: MemberRole::Voter,
            active: true,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_role(mut self, role: MemberRole) -> Self {
        self.role = role;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Whether this member takes part in quorum, vote and weight computations.
    pub fn is_eligible(&self) -> bool {
        self.active && self.role != MemberRole::Observer
    }

    /// Weight usable in computations; ineligible members weigh nothing.
    pub fn counted_weight(&self) -> f64 {
        if self.is_eligible() {
            self.weight.max(0.0)
        } else {
            0.0
        }
    }

    /// Name if set, otherwise the identifier.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            self.id.as_str()
        } else {
            &self.name
        }
    }
}

/// Keep only members that count for governance computations.
pub fn eligible_members(members: &[Member]) -> impl Iterator<Item = &Member> {
    members.iter().filter(|m| m.is_eligible())
}
