//! # Role Permissions
//!
//! A closed role × action matrix, not a generic ACL. Three roles, three
//! action tags, one exhaustive match. Adding a role or action forces every
//! consumer through the compiler.

use serde::{Deserialize, Serialize};

/// A user's role in the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Posts errands and pays rewards.
    Requester,
    /// Accepts and carries out errands.
    Helper,
    /// Back-office operator; may do anything.
    Admin,
}

impl Role {
    /// The canonical string name of this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Requester => "requester",
            Self::Helper => "helper",
            Self::Admin => "admin",
        }
    }

    /// Parse a canonical role name.
    pub fn from_str_opt(s: &str) -> Option<Role> {
        match s {
            "requester" => Some(Self::Requester),
            "helper" => Some(Self::Helper),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A permission-gated action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Posting a new errand.
    CreateErrand,
    /// Becoming the helper on an open errand.
    AcceptMatch,
    /// Back-office operations (dispute resolution, overrides).
    AdminOnly,
}

impl Action {
    /// The canonical string name of this action.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateErrand => "create_errand",
            Self::AcceptMatch => "accept_match",
            Self::AdminOnly => "admin_only",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether `role` may perform `action`.
///
/// Admin may do everything; requesters create errands; helpers accept
/// matches.
pub fn role_may(role: Role, action: Action) -> bool {
    match action {
        Action::AdminOnly => matches!(role, Role::Admin),
        Action::CreateErrand => matches!(role, Role::Requester | Role::Admin),
        Action::AcceptMatch => matches!(role, Role::Helper | Role::Admin),
    }
}
