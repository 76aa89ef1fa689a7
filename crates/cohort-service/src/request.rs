//! Client payloads and the allow-list that turns them into repository
//! inputs.

use cohort_core::error::{CohortError, CohortResult};
use cohort_core::models::group::{CreateGroup, UpdateGroup};
use serde::Deserialize;
use uuid::Uuid;

/// Body of a create request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateGroupRequest {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub private: Option<bool>,
    #[serde(default)]
    pub image: Option<String>,
    /// Accepted but never trusted: the creator always becomes admin.
    #[serde(default)]
    pub admin: Option<Uuid>,
}

impl CreateGroupRequest {
    pub fn into_create(self, creator_id: Uuid) -> CohortResult<CreateGroup> {
        let private = self
            .private
            .ok_or_else(|| CohortError::validation("private is required"))?;
        CreateGroup {
            name: self.name,
            description: self.description,
            private,
            image: self.image,
            admin: creator_id,
        }
        .normalized()
    }
}

/// Body of an update request.
///
/// `admin` and `members` are parsed only so they can be refused
/// explicitly; they never reach the repository.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateGroupRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub private: Option<bool>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub admin: Option<Uuid>,
    #[serde(default)]
    pub members: Option<Vec<Uuid>>,
}

impl UpdateGroupRequest {
    pub fn into_update(self) -> CohortResult<UpdateGroup> {
        if self.admin.is_some() {
            return Err(CohortError::validation("\"admin\" is not allowed"));
        }
        if self.members.is_some() {
            return Err(CohortError::validation("\"members\" is not allowed"));
        }
        UpdateGroup {
            name: self.name,
            description: self.description,
            private: self.private,
            image: self.image,
        }
        .normalized()
    }
}
