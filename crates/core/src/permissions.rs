//! Role-based capability lookup.
//!
//! A pure function of `(role, capability)`. Callers re-evaluate on every
//! request; nothing here is cached across role changes.

use serde::Serialize;

use crate::roles::Role;

/// An action a user may be allowed to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Read,
    Write,
    Delete,
    ManageUsers,
}

impl Capability {
    pub const ALL: [Capability; 4] = [
        Capability::Read,
        Capability::Write,
        Capability::Delete,
        Capability::ManageUsers,
    ];
}

/// Whether `role` grants `capability`.
///
/// - `superadmin` → everything.
/// - `admin` → read, write, delete.
/// - `user` / `viewer` → read only.
/// - `guest` → nothing.
pub fn has_capability(role: Role, capability: Capability) -> bool {
    match role {
        Role::SuperAdmin => true,
        Role::Admin => !matches!(capability, Capability::ManageUsers),
        Role::User | Role::Viewer => matches!(capability, Capability::Read),
        Role::Guest => false,
    }
}

/// The full capability set of a role, as exposed to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CapabilitySet {
    pub can_read: bool,
    pub can_write: bool,
    pub can_delete: bool,
    pub can_manage_users: bool,
}

impl CapabilitySet {
    pub fn for_role(role: Role) -> Self {
        Self {
            can_read: has_capability(role, Capability::Read),
            can_write: has_capability(role, Capability::Write),
            can_delete: has_capability(role, Capability::Delete),
            can_manage_users: has_capability(role, Capability::ManageUsers),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn superadmin_has_everything() {
        for cap in Capability::ALL {
            assert!(has_capability(Role::SuperAdmin, cap));
        }
    }

    #[test]
    fn admin_cannot_manage_users() {
        assert!(has_capability(Role::Admin, Capability::Read));
        assert!(has_capability(Role::Admin, Capability::Write));
        assert!(has_capability(Role::Admin, Capability::Delete));
        assert!(!has_capability(Role::Admin, Capability::ManageUsers));
    }

    #[test]
    fn user_and_viewer_are_read_only() {
        for role in [Role::User, Role::Viewer] {
            assert!(has_capability(role, Capability::Read));
            assert!(!has_capability(role, Capability::Write));
            assert!(!has_capability(role, Capability::Delete));
            assert!(!has_capability(role, Capability::ManageUsers));
        }
    }

    #[test]
    fn guest_has_nothing() {
        for cap in Capability::ALL {
            assert!(!has_capability(Role::Guest, cap));
        }
    }

    #[test]
    fn capability_set_tracks_role_changes() {
        let before = CapabilitySet::for_role(Role::Viewer);
        let after = CapabilitySet::for_role(Role::Admin);
        assert!(!before.can_write);
        assert!(after.can_write);
    }
}
