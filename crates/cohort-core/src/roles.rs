//! Role registry — maps role names to the permissions they grant.

use std::collections::{HashMap, HashSet};

use crate::models::identity::{ROLE_ADMIN, ROLE_USER};
use crate::models::permission::Permission;

/// Static mapping from role name to granted permissions.
///
/// Passed explicitly to the [`AccessPolicy`](crate::policy::AccessPolicy)
/// so tests and deployments can substitute their own role sets.
/// Unknown roles grant nothing.
#[derive(Debug, Clone, Default)]
pub struct RoleRegistry {
    roles: HashMap<String, HashSet<Permission>>,
}

impl RoleRegistry {
    /// An empty registry in which no role grants anything.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in roles: `user` grants nothing, `admin` grants
    /// every permission.
    pub fn builtin() -> Self {
        Self::empty()
            .with_role(ROLE_USER, Vec::<Permission>::new())
            .with_role(
                ROLE_ADMIN,
                [
                    Permission::GetUsers,
                    Permission::ManageUsers,
                    Permission::ManageGroups,
                ],
            )
    }

    /// Register (or replace) a role with the given permissions.
    pub fn with_role(
        mut self,
        role: impl Into<String>,
        permissions: impl IntoIterator<Item = Permission>,
    ) -> Self {
        self.roles
            .insert(role.into(), permissions.into_iter().collect());
        self
    }

    pub fn has_permission(&self, role: &str, permission: Permission) -> bool {
        self.roles
            .get(role)
            .is_some_and(|granted| granted.contains(&permission))
    }

    /// True only if `required` is non-empty and every entry is granted.
    pub fn has_all_permissions(&self, role: &str, required: &[Permission]) -> bool {
        !required.is_empty() && required.iter().all(|p| self.has_permission(role, *p))
    }
}
