//! Record store abstraction.
//!
//! Content lives behind [`ContentStore`] so the server does not care whether
//! it is backed by flat JSON files or by SQLite.
//!
//! # Architecture
//!
//! - `error`: Store error types
//! - `file`: JSON-file store keyed on natural keys
//! - `sqlite`: sqlx SQLite store with generated ids
//! - `blob`: upload tickets and binary storage for the resume PDF
//! - `utils`: id, timestamp and atomic write helpers

mod blob;
mod error;
mod file;
mod sqlite;
pub mod utils;

#[cfg(test)]
mod sqlite_test;

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use crate::content::{BlogPost, Entity, Project, Resume, Stored, Tech};

pub use blob::{BlobError, BlobStore, UPLOAD_TICKET_TTL};
pub use error::{StoreError, StoreResult};
pub use file::FileStore;
pub use sqlite::SqliteStore;

/// One record collection.
///
/// `id` is whatever the backend hands out in [`Stored::id`]: the natural key
/// for the file store, a generated id for SQLite.
#[async_trait]
pub trait Collection<E: Entity>: Send + Sync {
    /// All records in insertion order.
    async fn list(&self) -> StoreResult<Vec<Stored<E>>>;

    async fn get(&self, id: &str) -> StoreResult<Stored<E>>;

    /// Look a record up by its natural key.
    async fn find_by_key(&self, key: &str) -> StoreResult<Option<Stored<E>>>;

    /// Append a record. Fails with `Conflict` if the natural key is taken.
    async fn create(&self, record: E) -> StoreResult<Stored<E>>;

    /// Replace the record stored under `id` wholesale.
    async fn update(&self, id: &str, record: E) -> StoreResult<Stored<E>>;

    async fn remove(&self, id: &str) -> StoreResult<()>;
}

/// The singleton resume record.
#[async_trait]
pub trait ResumeStore: Send + Sync {
    async fn current(&self) -> StoreResult<Option<Resume>>;

    /// Point the resume at `storage_id`, replacing any previous one.
    async fn save(&self, storage_id: &str) -> StoreResult<Resume>;
}

/// Every collection the portfolio needs.
#[async_trait]
pub trait ContentStore: Send + Sync {
    fn projects(&self) -> &dyn Collection<Project>;

    fn blogs(&self) -> &dyn Collection<BlogPost>;

    fn techstack(&self) -> &dyn Collection<Tech>;

    fn resume(&self) -> &dyn ResumeStore;

    /// Move every technology in category `from` to `to` in one step.
    /// Returns the number of technologies moved.
    async fn rename_category(&self, from: &str, to: &str) -> StoreResult<usize>;

    /// Short backend name for logs and `/health`.
    fn backend(&self) -> &'static str;
}

/// Resolves an entity type to its collection, so handlers can be generic.
pub trait Persisted: Entity {
    fn collection(store: &dyn ContentStore) -> &dyn Collection<Self>;
}

impl Persisted for Project {
    fn collection(store: &dyn ContentStore) -> &dyn Collection<Self> {
        store.projects()
    }
}

impl Persisted for BlogPost {
    fn collection(store: &dyn ContentStore) -> &dyn Collection<Self> {
        store.blogs()
    }
}

impl Persisted for Tech {
    fn collection(store: &dyn ContentStore) -> &dyn Collection<Self> {
        store.techstack()
    }
}

/// Which backend `open` builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum StoreKind {
    /// JSON files, one per collection
    #[default]
    File,
    /// SQLite database `folio.db`
    Sqlite,
}

/// Open the configured store under `data_dir`.
pub async fn open(kind: StoreKind, data_dir: &Path) -> StoreResult<Arc<dyn ContentStore>> {
    let store: Arc<dyn ContentStore> = match kind {
        StoreKind::File => Arc::new(FileStore::open(data_dir)?),
        StoreKind::Sqlite => Arc::new(SqliteStore::open(&data_dir.join("folio.db")).await?),
    };
    Ok(store)
}
