//! Role names and the single role-resolution function.
//!
//! Every authentication strategy funnels the raw role string it finds
//! (credential list entry, profile row, token claim) through
//! [`resolve_role`], so there is exactly one place that decides what a
//! role string means.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const ROLE_SUPERADMIN: &str = "superadmin";
pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";
pub const ROLE_VIEWER: &str = "viewer";
pub const ROLE_GUEST: &str = "guest";

/// A user's role, ordered from least to most privileged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Guest,
    Viewer,
    User,
    Admin,
    SuperAdmin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Guest => ROLE_GUEST,
            Role::Viewer => ROLE_VIEWER,
            Role::User => ROLE_USER,
            Role::Admin => ROLE_ADMIN,
            Role::SuperAdmin => ROLE_SUPERADMIN,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve a raw role string into a [`Role`].
///
/// Matching is case-insensitive and ignores surrounding whitespace.
/// Missing or unrecognised roles resolve to [`Role::Guest`].
pub fn resolve_role(raw: Option<&str>) -> Role {
    let Some(raw) = raw else {
        return Role::Guest;
    };
    match raw.trim().to_lowercase().as_str() {
        ROLE_SUPERADMIN | "super_admin" => Role::SuperAdmin,
        ROLE_ADMIN => Role::Admin,
        ROLE_USER => Role::User,
        ROLE_VIEWER => Role::Viewer,
        _ => Role::Guest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_roles_resolve() {
        assert_eq!(resolve_role(Some("superadmin")), Role::SuperAdmin);
        assert_eq!(resolve_role(Some("admin")), Role::Admin);
        assert_eq!(resolve_role(Some("user")), Role::User);
        assert_eq!(resolve_role(Some("viewer")), Role::Viewer);
    }

    #[test]
    fn resolution_ignores_case_and_whitespace() {
        assert_eq!(resolve_role(Some("  Admin ")), Role::Admin);
        assert_eq!(resolve_role(Some("SUPER_ADMIN")), Role::SuperAdmin);
    }

    #[test]
    fn unknown_or_missing_is_guest() {
        assert_eq!(resolve_role(None), Role::Guest);
        assert_eq!(resolve_role(Some("")), Role::Guest);
        assert_eq!(resolve_role(Some("root")), Role::Guest);
    }

    #[test]
    fn display_round_trips_through_resolution() {
        for role in [Role::Guest, Role::Viewer, Role::User, Role::Admin, Role::SuperAdmin] {
            assert_eq!(resolve_role(Some(&role.to_string())), role);
        }
    }
}
