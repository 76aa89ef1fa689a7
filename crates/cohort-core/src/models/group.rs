//! Group domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CohortError, CohortResult};

/// A named collection of users owned by a single admin.
///
/// Private groups are only visible to their admin and to callers whose
/// role grants `manageGroups`. The admin is not implicitly a member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub private: bool,
    pub image: Option<String>,
    pub admin: Uuid,
    /// Duplicate-free, kept in join order.
    pub members: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Attributes persisted when a group is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGroup {
    pub name: String,
    pub description: String,
    pub private: bool,
    pub image: Option<String>,
    pub admin: Uuid,
}

impl CreateGroup {
    /// Trim text fields and reject empty ones.
    pub fn normalized(self) -> CohortResult<Self> {
        Ok(Self {
            name: required_text("name", self.name)?,
            description: required_text("description", self.description)?,
            private: self.private,
            image: self.image.map(|i| required_text("image", i)).transpose()?,
            admin: self.admin,
        })
    }
}

/// Partial update of the client-settable group fields.
///
/// `admin` and `members` are deliberately absent: ownership never
/// changes and membership only moves through join/leave.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateGroup {
    pub name: Option<String>,
    pub description: Option<String>,
    pub private: Option<bool>,
    pub image: Option<String>,
}

impl UpdateGroup {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.private.is_none()
            && self.image.is_none()
    }

    /// Trim text fields, reject empty ones and reject an empty patch.
    pub fn normalized(self) -> CohortResult<Self> {
        if self.is_empty() {
            return Err(CohortError::validation(
                "update must contain at least one field",
            ));
        }
        Ok(Self {
            name: self.name.map(|n| required_text("name", n)).transpose()?,
            description: self
                .description
                .map(|d| required_text("description", d))
                .transpose()?,
            private: self.private,
            image: self.image.map(|i| required_text("image", i)).transpose()?,
        })
    }
}

fn required_text(field: &str, value: String) -> CohortResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CohortError::validation(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_owned())
}
