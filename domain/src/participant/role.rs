//! Participant roles
//!
//! The role is derived exactly once, when a participant joins, from the
//! pseudo alone. It is never re-derived from the name afterwards.

use serde::{Deserialize, Serialize};

/// Role of a connected participant
///
/// Only [`Role::Voter`] votes count toward completeness and approval;
/// the Product Owner and Scrum Master facilitate but do not estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    ProductOwner,
    ScrumMaster,
    Voter,
}

impl Role {
    /// Derive the role from a pseudo: "po" and "sm" (case-insensitive)
    /// are the two facilitator names, everyone else estimates.
    pub fn for_pseudo(pseudo: &str) -> Role {
        match pseudo.to_lowercase().as_str() {
            "po" => Role::ProductOwner,
            "sm" => Role::ScrumMaster,
            _ => Role::Voter,
        }
    }

    /// Whether a role may be held by at most one connected participant
    pub fn is_unique(&self) -> bool {
        !matches!(self, Role::Voter)
    }

    /// Whether this role's vote counts toward completeness and approval
    pub fn votes(&self) -> bool {
        matches!(self, Role::Voter)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Role::ProductOwner => "Product Owner",
            Role::ScrumMaster => "Scrum Master",
            Role::Voter => "Voter",
        };
        write!(f, "{}", label)
    }
}
