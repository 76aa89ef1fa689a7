//! Group lifecycle service — one method per public use case.

use cohort_core::error::{CohortError, CohortResult};
use cohort_core::models::group::Group;
use cohort_core::models::identity::Caller;
use cohort_core::policy::{AccessPolicy, Operation};
use cohort_core::query::{GroupFilter, ListOptions, Page};
use cohort_core::repository::GroupRepository;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::ServiceConfig;
use crate::request::{CreateGroupRequest, UpdateGroupRequest};

/// Group lifecycle service.
///
/// Generic over the repository implementation so that the service
/// layer has no dependency on the database crate.
pub struct GroupService<R: GroupRepository> {
    repo: R,
    policy: AccessPolicy,
    config: ServiceConfig,
}

impl<R: GroupRepository> GroupService<R> {
    pub fn new(repo: R, policy: AccessPolicy, config: ServiceConfig) -> Self {
        Self {
            repo,
            policy,
            config,
        }
    }

    /// Create a group owned by `creator_id`. Any admin in the request is
    /// ignored.
    pub async fn create_group(
        &self,
        request: CreateGroupRequest,
        creator_id: Uuid,
    ) -> CohortResult<Group> {
        if request.admin.is_some_and(|a| a != creator_id) {
            debug!(creator_id = %creator_id, "Ignoring client-supplied admin");
        }
        let input = request.into_create(creator_id)?;
        let group = self.repo.create(input).await?;
        info!(group_id = %group.id, admin = %group.admin, private = group.private, "Group created");
        Ok(group)
    }

    /// List public groups. Private groups are never listed, whoever asks.
    pub async fn list_groups(
        &self,
        filter: GroupFilter,
        options: ListOptions,
    ) -> CohortResult<Page<Group>> {
        let paging = options.resolve(self.config.default_page_limit, self.config.max_page_limit)?;
        let filter = GroupFilter {
            private: Some(false),
            ..filter
        };
        self.repo.query(filter, paging).await
    }

    pub async fn get_group(&self, id: Uuid, caller: Option<&Caller>) -> CohortResult<Group> {
        let group = self.fetch(id).await?;
        self.authorize(&group, caller, Operation::Read)?;
        Ok(group)
    }

    /// Update the client-settable fields of a group. Attempts to change
    /// `admin` or `members` are refused after authorization and before
    /// anything is written.
    pub async fn update_group(
        &self,
        id: Uuid,
        caller: Option<&Caller>,
        request: UpdateGroupRequest,
    ) -> CohortResult<Group> {
        let group = self.get_group(id, caller).await?;
        self.authorize(&group, caller, Operation::Update)?;

        let update = request.into_update()?;
        let group = self.repo.update(id, update).await?;
        info!(group_id = %id, "Group updated");
        Ok(group)
    }

    pub async fn delete_group(&self, id: Uuid, caller: Option<&Caller>) -> CohortResult<()> {
        let group = self.get_group(id, caller).await?;
        self.authorize(&group, caller, Operation::Delete)?;

        self.repo.remove(id).await?;
        info!(group_id = %id, "Group deleted");
        Ok(())
    }

    /// Add the caller to the group. Visibility is not checked; any
    /// authenticated caller may join.
    pub async fn add_member(&self, id: Uuid, caller: Option<&Caller>) -> CohortResult<Group> {
        let group = self.fetch(id).await?;
        let member = self.authorize_self_service(&group, caller, Operation::Join)?;

        let group = self.repo.add_member(id, member).await?;
        info!(group_id = %id, member_id = %member, "Member joined");
        Ok(group)
    }

    /// Remove the caller from the group.
    pub async fn remove_member(&self, id: Uuid, caller: Option<&Caller>) -> CohortResult<Group> {
        let group = self.fetch(id).await?;
        let member = self.authorize_self_service(&group, caller, Operation::Leave)?;

        let group = self.repo.remove_member(id, member).await?;
        info!(group_id = %id, member_id = %member, "Member left");
        Ok(group)
    }

    async fn fetch(&self, id: Uuid) -> CohortResult<Group> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| CohortError::NotFound {
                entity: "group".into(),
                id: id.to_string(),
            })
    }

    fn authorize(&self, group: &Group, caller: Option<&Caller>, op: Operation) -> CohortResult<()> {
        if self.policy.decide(group, caller, op).is_allowed() {
            return Ok(());
        }
        warn!(
            group_id = %group.id,
            caller_id = ?caller.map(|c| c.id),
            operation = ?op,
            "Group access denied"
        );
        Err(CohortError::Forbidden {
            reason: format!("{op:?} not permitted on group {}", group.id),
        })
    }

    /// Join/leave always act on the caller's own id.
    fn authorize_self_service(
        &self,
        group: &Group,
        caller: Option<&Caller>,
        op: Operation,
    ) -> CohortResult<Uuid> {
        self.authorize(group, caller, op)?;
        caller.map(|c| c.id).ok_or_else(|| CohortError::Forbidden {
            reason: "membership changes require an authenticated caller".into(),
        })
    }
}
