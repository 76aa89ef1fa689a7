//! Caller identity supplied by the authentication layer.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role name given to ordinary accounts.
pub const ROLE_USER: &str = "user";
/// Role name given to project administrators.
pub const ROLE_ADMIN: &str = "admin";

/// An authenticated principal issuing a request.
///
/// Anonymous requests carry no `Caller` at all (`Option<&Caller>`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    pub id: Uuid,
    pub role: String,
}

impl Caller {
    pub fn new(id: Uuid, role: impl Into<String>) -> Self {
        Self {
            id,
            role: role.into(),
        }
    }

    /// A caller holding the ordinary `user` role.
    pub fn user(id: Uuid) -> Self {
        Self::new(id, ROLE_USER)
    }

    /// A caller holding the project-wide `admin` role.
    pub fn admin(id: Uuid) -> Self {
        Self::new(id, ROLE_ADMIN)
    }
}
