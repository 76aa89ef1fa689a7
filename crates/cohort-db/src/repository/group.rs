//! SurrealDB implementation of [`GroupRepository`].

use chrono::{DateTime, Utc};
use cohort_core::error::CohortResult;
use cohort_core::models::group::{CreateGroup, Group, UpdateGroup};
use cohort_core::query::{GroupFilter, Page, Paging, SortCriterion, SortField};
use cohort_core::repository::GroupRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbError;

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct GroupRow {
    name: String,
    description: String,
    private: bool,
    image: Option<String>,
    admin: String,
    members: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl GroupRow {
    fn into_group(self, id: Uuid) -> Result<Group, DbError> {
        let admin = parse_uuid("admin", &self.admin)?;
        let members = self
            .members
            .iter()
            .map(|m| parse_uuid("member", m))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Group {
            id,
            name: self.name,
            description: self.description,
            private: self.private,
            image: self.image,
            admin,
            members,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct GroupRowWithId {
    record_id: String,
    name: String,
    description: String,
    private: bool,
    image: Option<String>,
    admin: String,
    members: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl GroupRowWithId {
    fn try_into_group(self) -> Result<Group, DbError> {
        let id = parse_uuid("group", &self.record_id)?;
        GroupRow {
            name: self.name,
            description: self.description,
            private: self.private,
            image: self.image,
            admin: self.admin,
            members: self.members,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
        .into_group(id)
    }
}

/// Row struct for count queries.
#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

fn parse_uuid(what: &str, raw: &str) -> Result<Uuid, DbError> {
    Uuid::parse_str(raw).map_err(|e| DbError::Corrupt(format!("invalid {what} UUID '{raw}': {e}")))
}

fn not_found(id: &str) -> DbError {
    DbError::NotFound {
        entity: "group".into(),
        id: id.to_owned(),
    }
}

/// `ORDER BY` body for the requested criteria. Creation time and then
/// record id always close the list so paging is deterministic.
fn order_clause(criteria: &[SortCriterion]) -> String {
    let mut parts: Vec<String> = criteria
        .iter()
        .map(|c| format!("{} {}", c.field.column(), c.direction))
        .collect();
    if !criteria.iter().any(|c| c.field == SortField::CreatedAt) {
        parts.push("created_at ASC".into());
    }
    parts.push("id ASC".into());
    parts.join(", ")
}

fn where_clause(filter: &GroupFilter) -> String {
    let mut conditions = Vec::new();
    if filter.name.is_some() {
        conditions.push("name = $name");
    }
    if filter.description.is_some() {
        conditions.push("description = $description");
    }
    if filter.private.is_some() {
        conditions.push("private = $private");
    }
    if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    }
}

/// SurrealDB implementation of the Group repository.
#[derive(Clone)]
pub struct SurrealGroupRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealGroupRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    /// Run a guarded membership mutation. When the guard filters the
    /// record out (nothing to change) the current state is returned.
    async fn mutate_members(&self, id: Uuid, member_id: Uuid, query: &str) -> CohortResult<Group> {
        let id_str = id.to_string();

        let result = self
            .db
            .query(query)
            .bind(("id", id_str.clone()))
            .bind(("member", member_id.to_string()))
            .await
            .map_err(DbError::from)?;
        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<GroupRow> = result.take(0).map_err(DbError::from)?;
        match rows.into_iter().next() {
            Some(row) => Ok(row.into_group(id)?),
            None => {
                debug!(group_id = %id, member_id = %member_id, "Membership unchanged");
                self.find_by_id(id)
                    .await?
                    .ok_or_else(|| not_found(&id_str).into())
            }
        }
    }
}

impl<C: Connection> GroupRepository for SurrealGroupRepository<C> {
    async fn create(&self, input: CreateGroup) -> CohortResult<Group> {
        let input = input.normalized()?;
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('group', $id) SET \
                 name = $name, description = $description, \
                 private = $private, image = $image, \
                 admin = $admin, members = []",
            )
            .bind(("id", id_str.clone()))
            .bind(("name", input.name))
            .bind(("description", input.description))
            .bind(("private", input.private))
            .bind(("image", input.image))
            .bind(("admin", input.admin.to_string()))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<GroupRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| not_found(&id_str))?;

        Ok(row.into_group(id)?)
    }

    async fn find_by_id(&self, id: Uuid) -> CohortResult<Option<Group>> {
        let mut result = self
            .db
            .query("SELECT * FROM type::record('group', $id)")
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<GroupRow> = result.take(0).map_err(DbError::from)?;
        match rows.into_iter().next() {
            Some(row) => Ok(Some(row.into_group(id)?)),
            None => Ok(None),
        }
    }

    async fn query(&self, filter: GroupFilter, paging: Paging) -> CohortResult<Page<Group>> {
        let where_sql = where_clause(&filter);

        let count_query = format!("SELECT count() AS total FROM group {where_sql} GROUP ALL");
        let mut builder = self.db.query(&count_query);
        if let Some(name) = filter.name.clone() {
            builder = builder.bind(("name", name));
        }
        if let Some(description) = filter.description.clone() {
            builder = builder.bind(("description", description));
        }
        if let Some(private) = filter.private {
            builder = builder.bind(("private", private));
        }
        let count_result = builder.await.map_err(DbError::from)?;
        let mut count_result = count_result
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        if paging.offset() >= total {
            debug!(page = paging.page, total, "Requested page is past the end");
            return Ok(Page::new(Vec::new(), &paging, total));
        }

        let query = format!(
            "SELECT meta::id(id) AS record_id, * FROM group {where_sql} \
             ORDER BY {} \
             LIMIT $limit START $offset",
            order_clause(&paging.sort_by)
        );
        debug!(%query, page = paging.page, limit = paging.limit, "Querying groups");

        let mut builder = self
            .db
            .query(&query)
            .bind(("limit", paging.limit))
            .bind(("offset", paging.offset()));

        if let Some(name) = filter.name {
            builder = builder.bind(("name", name));
        }
        if let Some(description) = filter.description {
            builder = builder.bind(("description", description));
        }
        if let Some(private) = filter.private {
            builder = builder.bind(("private", private));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<GroupRowWithId> = result.take(0).map_err(DbError::from)?;
        let items = rows
            .into_iter()
            .map(|row| row.try_into_group())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(Page::new(items, &paging, total))
    }

    async fn update(&self, id: Uuid, input: UpdateGroup) -> CohortResult<Group> {
        let input = input.normalized()?;
        let id_str = id.to_string();

        let mut sets = Vec::new();
        if input.name.is_some() {
            sets.push("name = $name");
        }
        if input.description.is_some() {
            sets.push("description = $description");
        }
        if input.private.is_some() {
            sets.push("private = $private");
        }
        if input.image.is_some() {
            sets.push("image = $image");
        }
        sets.push("updated_at = time::now()");

        let query = format!("UPDATE type::record('group', $id) SET {}", sets.join(", "));

        let mut builder = self.db.query(&query).bind(("id", id_str.clone()));

        if let Some(name) = input.name {
            builder = builder.bind(("name", name));
        }
        if let Some(description) = input.description {
            builder = builder.bind(("description", description));
        }
        if let Some(private) = input.private {
            builder = builder.bind(("private", private));
        }
        if let Some(image) = input.image {
            builder = builder.bind(("image", image));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<GroupRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| not_found(&id_str))?;

        Ok(row.into_group(id)?)
    }

    async fn remove(&self, id: Uuid) -> CohortResult<()> {
        let id_str = id.to_string();

        let result = self
            .db
            .query("DELETE type::record('group', $id) RETURN BEFORE")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;
        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<GroupRow> = result.take(0).map_err(DbError::from)?;
        if rows.is_empty() {
            return Err(not_found(&id_str).into());
        }

        Ok(())
    }

    async fn add_member(&self, id: Uuid, member_id: Uuid) -> CohortResult<Group> {
        // The guard keeps the set duplicate-free without a read-modify-write.
        self.mutate_members(
            id,
            member_id,
            "UPDATE type::record('group', $id) SET \
             members += $member, updated_at = time::now() \
             WHERE members CONTAINSNOT $member",
        )
        .await
    }

    async fn remove_member(&self, id: Uuid, member_id: Uuid) -> CohortResult<Group> {
        self.mutate_members(
            id,
            member_id,
            "UPDATE type::record('group', $id) SET \
             members -= $member, updated_at = time::now() \
             WHERE members CONTAINS $member",
        )
        .await
    }
}
