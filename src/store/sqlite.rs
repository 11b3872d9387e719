//! SQLite content store.
//!
//! Every collection is a table of JSON documents with a generated id and a
//! unique, indexed natural-key column. Each mutation is a single statement;
//! the category rename runs in one transaction.

use std::marker::PhantomData;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use tracing::{debug, info};

use super::utils::{current_timestamp, generate_entity_id};
use super::{Collection, ContentStore, ResumeStore, StoreError, StoreResult};
use crate::content::{BlogPost, Entity, Project, Resume, Stored, Tech, ValidationError};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS projects (
    id TEXT PRIMARY KEY NOT NULL,
    natural_key TEXT NOT NULL UNIQUE,
    body TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS blogs (
    id TEXT PRIMARY KEY NOT NULL,
    natural_key TEXT NOT NULL UNIQUE,
    body TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS techstack (
    id TEXT PRIMARY KEY NOT NULL,
    natural_key TEXT NOT NULL UNIQUE,
    body TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_techstack_category
    ON techstack (json_extract(body, '$.category'));

CREATE TABLE IF NOT EXISTS resume (
    slot INTEGER PRIMARY KEY CHECK (slot = 1),
    storage_id TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
"#;

pub struct SqliteStore {
    pool: SqlitePool,
    projects: SqliteCollection<Project>,
    blogs: SqliteCollection<BlogPost>,
    techstack: SqliteCollection<Tech>,
    resume: SqliteResume,
}

impl SqliteStore {
    /// Open (or create) the database file at `path` and apply the schema.
    pub async fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        info!(path = %path.display(), "Opened SQLite store");
        Self::with_pool(pool).await
    }

    /// Create an in-memory database (useful for testing).
    ///
    /// Every connection to `:memory:` is a separate database, so the pool is
    /// pinned to one connection that is never recycled.
    pub async fn in_memory() -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        Self::with_pool(pool).await
    }

    async fn with_pool(pool: SqlitePool) -> StoreResult<Self> {
        sqlx::raw_sql(SCHEMA).execute(&pool).await?;
        Ok(Self {
            projects: SqliteCollection::new(pool.clone()),
            blogs: SqliteCollection::new(pool.clone()),
            techstack: SqliteCollection::new(pool.clone()),
            resume: SqliteResume { pool: pool.clone() },
            pool,
        })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

// =============================================================================
// Collections
// =============================================================================

struct SqliteCollection<E> {
    pool: SqlitePool,
    table: &'static str,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> SqliteCollection<E> {
    fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            table: E::COLLECTION.as_str(),
            _entity: PhantomData,
        }
    }

    fn decode((id, body): (String, String)) -> StoreResult<Stored<E>> {
        Ok(Stored::new(id, serde_json::from_str(&body)?))
    }

    fn write_error(err: sqlx::Error, key: &str) -> StoreError {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                StoreError::conflict(E::LABEL, key)
            }
            _ => err.into(),
        }
    }
}

#[async_trait]
impl<E: Entity> Collection<E> for SqliteCollection<E> {
    async fn list(&self) -> StoreResult<Vec<Stored<E>>> {
        let sql = format!("SELECT id, body FROM {} ORDER BY rowid", self.table);
        let rows: Vec<(String, String)> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        rows.into_iter().map(Self::decode).collect()
    }

    async fn get(&self, id: &str) -> StoreResult<Stored<E>> {
        let sql = format!("SELECT id, body FROM {} WHERE id = ?", self.table);
        let row: Option<(String, String)> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        let row = row.ok_or_else(|| StoreError::not_found(E::LABEL, id))?;
        Self::decode(row)
    }

    async fn find_by_key(&self, key: &str) -> StoreResult<Option<Stored<E>>> {
        let sql = format!("SELECT id, body FROM {} WHERE natural_key = ?", self.table);
        let row: Option<(String, String)> = sqlx::query_as(&sql)
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Self::decode).transpose()
    }

    async fn create(&self, record: E) -> StoreResult<Stored<E>> {
        let record = record.prepared()?;
        let id = generate_entity_id();
        let now = current_timestamp();
        let body = serde_json::to_string(&record)?;

        let sql = format!(
            "INSERT INTO {} (id, natural_key, body, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
            self.table
        );
        sqlx::query(&sql)
            .bind(&id)
            .bind(record.natural_key())
            .bind(&body)
            .bind(&now)
            .bind(&now)
            .execute(&self.pool)
            .await
            .map_err(|e| Self::write_error(e, record.natural_key()))?;

        debug!(table = self.table, id = %id, "Created record");
        Ok(Stored::new(id, record))
    }

    async fn update(&self, id: &str, record: E) -> StoreResult<Stored<E>> {
        let record = record.prepared()?;
        let body = serde_json::to_string(&record)?;

        let sql = format!(
            "UPDATE {} SET natural_key = ?, body = ?, updated_at = ? WHERE id = ?",
            self.table
        );
        let result = sqlx::query(&sql)
            .bind(record.natural_key())
            .bind(&body)
            .bind(current_timestamp())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| Self::write_error(e, record.natural_key()))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(E::LABEL, id));
        }
        Ok(Stored::new(id, record))
    }

    async fn remove(&self, id: &str) -> StoreResult<()> {
        let sql = format!("DELETE FROM {} WHERE id = ?", self.table);
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(E::LABEL, id));
        }
        Ok(())
    }
}

// =============================================================================
// Resume
// =============================================================================

struct SqliteResume {
    pool: SqlitePool,
}

#[async_trait]
impl ResumeStore for SqliteResume {
    async fn current(&self) -> StoreResult<Option<Resume>> {
        let row: Option<(String, String)> =
            sqlx::query_as("SELECT storage_id, updated_at FROM resume WHERE slot = 1")
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(|(storage_id, updated_at)| Resume {
            storage_id,
            updated_at,
        }))
    }

    async fn save(&self, storage_id: &str) -> StoreResult<Resume> {
        let resume = Resume {
            storage_id: storage_id.to_string(),
            updated_at: current_timestamp(),
        };
        sqlx::query(
            "INSERT INTO resume (slot, storage_id, updated_at) VALUES (1, ?, ?) \
             ON CONFLICT(slot) DO UPDATE SET storage_id = excluded.storage_id, \
             updated_at = excluded.updated_at",
        )
        .bind(&resume.storage_id)
        .bind(&resume.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(resume)
    }
}

// =============================================================================
// ContentStore
// =============================================================================

#[async_trait]
impl ContentStore for SqliteStore {
    fn projects(&self) -> &dyn Collection<Project> {
        &self.projects
    }

    fn blogs(&self) -> &dyn Collection<BlogPost> {
        &self.blogs
    }

    fn techstack(&self) -> &dyn Collection<Tech> {
        &self.techstack
    }

    fn resume(&self) -> &dyn ResumeStore {
        &self.resume
    }

    async fn rename_category(&self, from: &str, to: &str) -> StoreResult<usize> {
        let to = to.trim();
        if to.is_empty() {
            return Err(ValidationError::MissingCategory.into());
        }

        let mut tx = self.pool.begin().await?;
        let result = sqlx::query(
            "UPDATE techstack SET body = json_set(body, '$.category', ?), updated_at = ? \
             WHERE json_extract(body, '$.category') = ?",
        )
        .bind(to)
        .bind(current_timestamp())
        .bind(from)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        Ok(result.rows_affected() as usize)
    }

    fn backend(&self) -> &'static str {
        "sqlite"
    }
}
