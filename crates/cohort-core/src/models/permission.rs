//! Permission domain model.

use serde::{Deserialize, Serialize};

/// A named capability a role can grant.
///
/// Serialized with the camelCase names used by the public API
/// (`getUsers`, `manageUsers`, `manageGroups`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Permission {
    GetUsers,
    ManageUsers,
    /// Overrides group ownership for read, update and delete.
    ManageGroups,
}
