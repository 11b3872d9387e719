//! Tests for the SQLite store.

use tempfile::TempDir;

use crate::content::{Project, Tech};
use crate::store::utils::is_entity_id;
use crate::store::{ContentStore, SqliteStore, StoreError};

async fn setup_db() -> SqliteStore {
    SqliteStore::in_memory()
        .await
        .expect("Failed to create in-memory database")
}

fn project(title: &str) -> Project {
    Project {
        title: title.to_string(),
        description: "d".to_string(),
        skills: vec!["a".to_string(), "b".to_string()],
        github_url: Some("https://github.com/x/y".to_string()),
        live_url: None,
    }
}

fn tech(name: &str, category: &str) -> Tech {
    Tech {
        name: name.to_string(),
        category: category.to_string(),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn schema_creates_all_tables() {
    let db = setup_db().await;

    let tables: Vec<String> =
        sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .fetch_all(db.pool())
            .await
            .expect("Query should succeed");

    for table in ["blogs", "projects", "resume", "techstack"] {
        assert!(
            tables.iter().any(|t| t == table),
            "Missing table: {}. Found tables: {:?}",
            table,
            tables
        );
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn create_generates_id_and_round_trips_body() {
    let db = setup_db().await;
    let repo = db.projects();

    let created = repo.create(project("Foo")).await.expect("Create should succeed");
    assert!(is_entity_id(&created.id));

    let fetched = repo.get(&created.id).await.expect("Get should succeed");
    assert_eq!(fetched, created);
    assert_eq!(fetched.record.skills, vec!["a", "b"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn list_keeps_insertion_order() {
    let db = setup_db().await;
    for title in ["C", "A", "B"] {
        db.projects().create(project(title)).await.unwrap();
    }

    let titles: Vec<_> = db
        .projects()
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.record.title)
        .collect();
    assert_eq!(titles, vec!["C", "A", "B"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn duplicate_natural_key_conflicts() {
    let db = setup_db().await;
    db.projects().create(project("Foo")).await.unwrap();

    let err = db.projects().create(project("Foo")).await.unwrap_err();
    assert!(matches!(err, StoreError::Conflict { .. }));
}

#[tokio::test(flavor = "multi_thread")]
async fn update_by_id_renames_and_replaces() {
    let db = setup_db().await;
    let repo = db.projects();
    let created = repo.create(project("Old")).await.unwrap();

    let mut replacement = project("New");
    replacement.skills = vec![];
    replacement.github_url = None;
    let updated = repo.update(&created.id, replacement.clone()).await.unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(repo.get(&created.id).await.unwrap().record, replacement);
    assert!(repo.find_by_key("Old").await.unwrap().is_none());
    assert_eq!(
        repo.find_by_key("New").await.unwrap().map(|s| s.id),
        Some(created.id)
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn update_onto_other_key_conflicts() {
    let db = setup_db().await;
    let a = db.projects().create(project("A")).await.unwrap();
    db.projects().create(project("B")).await.unwrap();

    let err = db.projects().update(&a.id, project("B")).await.unwrap_err();
    assert!(matches!(err, StoreError::Conflict { .. }));
    assert_eq!(db.projects().get(&a.id).await.unwrap().record.title, "A");
}

#[tokio::test(flavor = "multi_thread")]
async fn update_and_remove_missing_id_are_not_found() {
    let db = setup_db().await;

    let err = db.projects().update("nonexist", project("X")).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));

    let err = db.projects().remove("nonexist").await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
}

#[tokio::test(flavor = "multi_thread")]
async fn remove_deletes_exactly_one() {
    let db = setup_db().await;
    let a = db.techstack().create(tech("Rust", "Backend")).await.unwrap();
    db.techstack().create(tech("Go", "Backend")).await.unwrap();

    db.techstack().remove(&a.id).await.unwrap();

    let list = db.techstack().list().await.unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].record.name, "Go");
}

#[tokio::test(flavor = "multi_thread")]
async fn invalid_record_is_rejected_before_insert() {
    let db = setup_db().await;

    let err = db.techstack().create(tech("Rust", "")).await.unwrap_err();
    assert!(matches!(err, StoreError::Validation { .. }));
    assert!(db.techstack().list().await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn rename_category_updates_every_member() {
    let db = setup_db().await;
    db.techstack().create(tech("Rust", "Backend")).await.unwrap();
    db.techstack().create(tech("Git", "Tools")).await.unwrap();
    db.techstack().create(tech("Go", "Backend")).await.unwrap();

    let moved = db.rename_category("Backend", "Core Backend").await.unwrap();
    assert_eq!(moved, 2);

    let list = db.techstack().list().await.unwrap();
    assert!(list.iter().all(|s| s.record.category != "Backend"));
    assert_eq!(
        list.iter()
            .filter(|s| s.record.category == "Core Backend")
            .count(),
        2
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn rename_unknown_category_moves_nothing() {
    let db = setup_db().await;
    db.techstack().create(tech("Rust", "Backend")).await.unwrap();

    assert_eq!(db.rename_category("Nope", "Other").await.unwrap(), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn resume_is_a_singleton() {
    let db = setup_db().await;
    assert!(db.resume().current().await.unwrap().is_none());

    db.resume().save("first").await.unwrap();
    db.resume().save("second").await.unwrap();

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM resume")
        .fetch_one(db.pool())
        .await
        .unwrap();
    assert_eq!(count, 1);
    assert_eq!(
        db.resume().current().await.unwrap().unwrap().storage_id,
        "second"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn file_database_persists_across_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("folio.db");

    let id = {
        let db = SqliteStore::open(&path).await.unwrap();
        let created = db.projects().create(project("Kept")).await.unwrap();
        db.pool().close().await;
        created.id
    };

    let db = SqliteStore::open(&path).await.unwrap();
    assert_eq!(db.projects().get(&id).await.unwrap().record.title, "Kept");
}
