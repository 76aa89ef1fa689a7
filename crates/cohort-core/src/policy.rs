//! Group access policy.
//!
//! A pure decision function: given a group, an optional caller and an
//! operation, answer [`Decision::Allow`] or [`Decision::Deny`]. The
//! policy never fails; turning a denial into an error is the caller's job.

use crate::models::group::Group;
use crate::models::identity::Caller;
use crate::models::permission::Permission;
use crate::roles::RoleRegistry;

/// Operations gated by the policy. Creation and listing are not gated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Update,
    Delete,
    Join,
    Leave,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

impl Decision {
    pub fn is_allowed(self) -> bool {
        self == Decision::Allow
    }

    fn from_bool(allowed: bool) -> Self {
        if allowed { Self::Allow } else { Self::Deny }
    }
}

#[derive(Debug, Clone)]
pub struct AccessPolicy {
    roles: RoleRegistry,
}

impl AccessPolicy {
    pub fn new(roles: RoleRegistry) -> Self {
        Self { roles }
    }

    pub fn decide(&self, group: &Group, caller: Option<&Caller>, op: Operation) -> Decision {
        match op {
            Operation::Read if !group.private => Decision::Allow,
            Operation::Read | Operation::Update | Operation::Delete => {
                Decision::from_bool(caller.is_some_and(|c| self.owns_or_manages(group, c)))
            }
            Operation::Join | Operation::Leave => Decision::from_bool(caller.is_some()),
        }
    }

    /// Ownership is decided by id equality with the stored admin.
    fn owns_or_manages(&self, group: &Group, caller: &Caller) -> bool {
        caller.id == group.admin
            || self
                .roles
                .has_permission(&caller.role, Permission::ManageGroups)
    }
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self::new(RoleRegistry::builtin())
    }
}
