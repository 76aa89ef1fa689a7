//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Absence is reported as
//! `Ok(None)` by lookups and as [`CohortError::NotFound`] by mutations.
//!
//! [`CohortError::NotFound`]: crate::error::CohortError::NotFound

use uuid::Uuid;

use crate::error::CohortResult;
use crate::models::group::{CreateGroup, Group, UpdateGroup};
use crate::query::{GroupFilter, Page, Paging};

pub trait GroupRepository: Send + Sync {
    fn create(&self, input: CreateGroup) -> impl Future<Output = CohortResult<Group>> + Send;
    fn find_by_id(&self, id: Uuid) -> impl Future<Output = CohortResult<Option<Group>>> + Send;
    fn query(
        &self,
        filter: GroupFilter,
        paging: Paging,
    ) -> impl Future<Output = CohortResult<Page<Group>>> + Send;
    /// Apply only the fields present in `input`.
    fn update(
        &self,
        id: Uuid,
        input: UpdateGroup,
    ) -> impl Future<Output = CohortResult<Group>> + Send;
    /// Hard delete. Fails with `NotFound` if the group is already gone.
    fn remove(&self, id: Uuid) -> impl Future<Output = CohortResult<()>> + Send;

    /// Add `member_id` to the member set. Adding an existing member is a
    /// no-op that returns the group unchanged.
    fn add_member(
        &self,
        id: Uuid,
        member_id: Uuid,
    ) -> impl Future<Output = CohortResult<Group>> + Send;

    /// Remove `member_id` from the member set. Removing an absent member
    /// is a no-op that returns the group unchanged.
    fn remove_member(
        &self,
        id: Uuid,
        member_id: Uuid,
    ) -> impl Future<Output = CohortResult<Group>> + Send;
}
