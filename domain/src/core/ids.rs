//! Identifier value objects.
//!
//! Every entity in the governance model is addressed by an opaque string
//! identifier. Each kind gets its own newtype so a `MemberId` can never be
//! passed where a `MeetingId` is expected.

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates the identifier from an existing string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }

        impl From<&String> for $name {
            fn from(s: &String) -> Self {
                Self::new(s.as_str())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

string_id!(
    /// Organization (e.g. a condominium association) owning members and meetings.
    OrganizationId
);
string_id!(
    /// Member of an organization.
    MemberId
);
string_id!(
    /// A single meeting of an organization.
    MeetingId
);
string_id!(
    /// Delegation record.
    ProxyId
);
string_id!(
    /// Agenda item voted on during a meeting.
    AgendaItemId
);
string_id!(
    /// Candidate date/time for a meeting.
    ScheduleOptionId
);
