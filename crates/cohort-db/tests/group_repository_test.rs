//! Integration tests for Group repository using in-memory SurrealDB.

use cohort_core::error::CohortError;
use cohort_core::models::group::{CreateGroup, UpdateGroup};
use cohort_core::query::{GroupFilter, Paging, parse_sort_by};
use cohort_core::repository::GroupRepository;
use cohort_db::repository::SurrealGroupRepository;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use uuid::Uuid;

/// Helper: spin up in-memory DB and run migrations.
async fn setup() -> SurrealGroupRepository<Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    cohort_db::run_migrations(&db).await.unwrap();
    SurrealGroupRepository::new(db)
}

fn new_group(name: &str, private: bool, admin: Uuid) -> CreateGroup {
    CreateGroup {
        name: name.into(),
        description: format!("{name} description"),
        private,
        image: None,
        admin,
    }
}

#[tokio::test]
async fn create_and_find_group() {
    let repo = setup().await;
    let admin = Uuid::new_v4();

    let group = repo
        .create(CreateGroup {
            name: "Developers".into(),
            description: "Software developers".into(),
            private: false,
            image: Some("https://img.example/dev.png".into()),
            admin,
        })
        .await
        .unwrap();

    assert_eq!(group.admin, admin);
    assert_eq!(group.name, "Developers");
    assert!(group.members.is_empty());

    let fetched = repo.find_by_id(group.id).await.unwrap().unwrap();
    assert_eq!(fetched.id, group.id);
    assert_eq!(fetched.name, group.name);
    assert_eq!(fetched.description, group.description);
    assert_eq!(fetched.private, group.private);
    assert_eq!(fetched.image, group.image);
    assert_eq!(fetched.admin, admin);
}

#[tokio::test]
async fn create_trims_and_rejects_blank_text() {
    let repo = setup().await;

    let group = repo
        .create(new_group("  Padded  ", false, Uuid::new_v4()))
        .await
        .unwrap();
    assert_eq!(group.name, "Padded");

    let err = repo
        .create(new_group("   ", false, Uuid::new_v4()))
        .await
        .unwrap_err();
    assert!(matches!(err, CohortError::Validation { .. }));
}

#[tokio::test]
async fn find_missing_group_returns_none() {
    let repo = setup().await;
    assert!(repo.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn update_applies_only_present_fields() {
    let repo = setup().await;
    let group = repo
        .create(new_group("Original", false, Uuid::new_v4()))
        .await
        .unwrap();

    let updated = repo
        .update(
            group.id,
            UpdateGroup {
                name: Some("Renamed".into()),
                private: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Renamed");
    assert!(updated.private);
    assert_eq!(updated.description, "Original description"); // unchanged
    assert_eq!(updated.admin, group.admin);
    assert!(updated.updated_at >= group.updated_at);
}

#[tokio::test]
async fn update_missing_group_is_not_found() {
    let repo = setup().await;
    let err = repo
        .update(
            Uuid::new_v4(),
            UpdateGroup {
                name: Some("Ghost".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, CohortError::NotFound { .. }));
}

#[tokio::test]
async fn remove_group_then_remove_again_fails() {
    let repo = setup().await;
    let group = repo
        .create(new_group("ToDelete", false, Uuid::new_v4()))
        .await
        .unwrap();

    repo.remove(group.id).await.unwrap();
    assert!(repo.find_by_id(group.id).await.unwrap().is_none());

    let err = repo.remove(group.id).await.unwrap_err();
    assert!(matches!(err, CohortError::NotFound { .. }));
}

#[tokio::test]
async fn query_paginates_in_creation_order() {
    let repo = setup().await;
    let admin = Uuid::new_v4();
    for i in 0..5 {
        repo.create(new_group(&format!("group-{i}"), false, admin))
            .await
            .unwrap();
    }

    let page1 = repo
        .query(
            GroupFilter::default(),
            Paging {
                limit: 3,
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(page1.results.len(), 3);
    assert_eq!(page1.total_results, 5);
    assert_eq!(page1.total_pages, 2);
    assert_eq!(page1.page, 1);

    let page2 = repo
        .query(
            GroupFilter::default(),
            Paging {
                limit: 3,
                page: 2,
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(page2.results.len(), 2);
    let first_page_ids: Vec<Uuid> = page1.results.iter().map(|g| g.id).collect();
    assert!(page2.results.iter().all(|g| !first_page_ids.contains(&g.id)));
}

#[tokio::test]
async fn query_filters_by_name_and_visibility() {
    let repo = setup().await;
    let admin = Uuid::new_v4();
    repo.create(new_group("Chess", false, admin)).await.unwrap();
    repo.create(new_group("Chess", true, admin)).await.unwrap();
    repo.create(new_group("Go", false, admin)).await.unwrap();

    let page = repo
        .query(
            GroupFilter {
                name: Some("Chess".into()),
                private: Some(false),
                ..Default::default()
            },
            Paging::default(),
        )
        .await
        .unwrap();

    assert_eq!(page.total_results, 1);
    assert_eq!(page.results[0].name, "Chess");
    assert!(!page.results[0].private);
}

#[tokio::test]
async fn query_sorts_by_requested_field() {
    let repo = setup().await;
    let admin = Uuid::new_v4();
    for name in ["beta", "alpha", "gamma"] {
        repo.create(new_group(name, false, admin)).await.unwrap();
    }

    let page = repo
        .query(
            GroupFilter::default(),
            Paging {
                sort_by: parse_sort_by("name:desc").unwrap(),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let names: Vec<&str> = page.results.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["gamma", "beta", "alpha"]);
}

#[tokio::test]
async fn add_member_is_idempotent() {
    let repo = setup().await;
    let group = repo
        .create(new_group("Team", false, Uuid::new_v4()))
        .await
        .unwrap();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    repo.add_member(group.id, alice).await.unwrap();
    repo.add_member(group.id, bob).await.unwrap();
    let group = repo.add_member(group.id, alice).await.unwrap();

    assert_eq!(group.members, vec![alice, bob]);
}

#[tokio::test]
async fn remove_member_ignores_non_members() {
    let repo = setup().await;
    let group = repo
        .create(new_group("Team2", false, Uuid::new_v4()))
        .await
        .unwrap();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    repo.add_member(group.id, alice).await.unwrap();
    repo.add_member(group.id, bob).await.unwrap();

    let group = repo.remove_member(group.id, alice).await.unwrap();
    assert_eq!(group.members, vec![bob]);

    let unchanged = repo.remove_member(group.id, alice).await.unwrap();
    assert_eq!(unchanged.members, vec![bob]);
    assert_eq!(unchanged.updated_at, group.updated_at);
}

#[tokio::test]
async fn membership_changes_on_missing_group_are_not_found() {
    let repo = setup().await;
    let err = repo
        .add_member(Uuid::new_v4(), Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, CohortError::NotFound { .. }));

    let err = repo
        .remove_member(Uuid::new_v4(), Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, CohortError::NotFound { .. }));
}

#[tokio::test]
async fn query_past_last_page_returns_empty_page() {
    let repo = setup().await;
    let admin = Uuid::new_v4();
    for i in 0..3 {
        repo.create(new_group(&format!("far-{i}"), false, admin))
            .await
            .unwrap();
    }

    for page in [4, 1 << 62, u64::MAX] {
        let result = repo
            .query(
                GroupFilter::default(),
                Paging {
                    limit: 1,
                    page,
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(result.results.is_empty());
        assert_eq!(result.page, page);
        assert_eq!(result.total_results, 3);
        assert_eq!(result.total_pages, 3);
    }
}
