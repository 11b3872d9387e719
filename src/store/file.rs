//! JSON-file content store.
//!
//! Each collection is one pretty-printed JSON array under the data directory
//! (`projects.json`, `blogs.json`, `techstack.json`) and records are keyed on
//! their natural key. The resume is a single object in `resume.json`.
//!
//! Writers take a per-collection lock around the whole read-modify-write and
//! replace the file atomically.

use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tracing::debug;

use super::utils::{current_timestamp, write_atomic};
use super::{Collection, ContentStore, ResumeStore, StoreError, StoreResult};
use crate::content::{BlogPost, Entity, Project, Resume, Stored, Tech, ValidationError};

pub struct FileStore {
    dir: PathBuf,
    projects: JsonCollection<Project>,
    blogs: JsonCollection<BlogPost>,
    techstack: JsonCollection<Tech>,
    resume: JsonResume,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    /// Missing collection files read as empty.
    pub fn open(dir: &Path) -> StoreResult<Self> {
        std::fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
            projects: JsonCollection::new(dir),
            blogs: JsonCollection::new(dir),
            techstack: JsonCollection::new(dir),
            resume: JsonResume {
                path: dir.join("resume.json"),
                lock: Mutex::new(()),
            },
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> StoreResult<Option<T>> {
    match tokio::fs::read(path).await {
        Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(None),
        Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> StoreResult<()> {
    let bytes = serde_json::to_vec_pretty(value)?;
    let path = path.to_path_buf();
    tokio::task::spawn_blocking(move || write_atomic(&path, &bytes))
        .await
        .map_err(std::io::Error::other)??;
    Ok(())
}

// =============================================================================
// Collections
// =============================================================================

struct JsonCollection<E> {
    path: PathBuf,
    lock: Mutex<()>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> JsonCollection<E> {
    fn new(dir: &Path) -> Self {
        Self {
            path: dir.join(format!("{}.json", E::COLLECTION)),
            lock: Mutex::new(()),
            _entity: PhantomData,
        }
    }

    async fn read(&self) -> StoreResult<Vec<E>> {
        Ok(read_json(&self.path).await?.unwrap_or_default())
    }

    async fn write(&self, records: &[E]) -> StoreResult<()> {
        write_json(&self.path, records).await?;
        debug!(path = %self.path.display(), count = records.len(), "Wrote collection");
        Ok(())
    }

    fn stored(record: E) -> Stored<E> {
        Stored::new(record.natural_key().to_string(), record)
    }

    fn not_found(key: &str) -> StoreError {
        StoreError::not_found(E::LABEL, key)
    }
}

#[async_trait]
impl<E: Entity> Collection<E> for JsonCollection<E> {
    async fn list(&self) -> StoreResult<Vec<Stored<E>>> {
        Ok(self.read().await?.into_iter().map(Self::stored).collect())
    }

    async fn get(&self, id: &str) -> StoreResult<Stored<E>> {
        self.find_by_key(id)
            .await?
            .ok_or_else(|| Self::not_found(id))
    }

    async fn find_by_key(&self, key: &str) -> StoreResult<Option<Stored<E>>> {
        Ok(self
            .read()
            .await?
            .into_iter()
            .find(|r| r.natural_key() == key)
            .map(Self::stored))
    }

    async fn create(&self, record: E) -> StoreResult<Stored<E>> {
        let record = record.prepared()?;
        let _guard = self.lock.lock().await;

        let mut records = self.read().await?;
        if records
            .iter()
            .any(|r| r.natural_key() == record.natural_key())
        {
            return Err(StoreError::conflict(E::LABEL, record.natural_key()));
        }
        records.push(record.clone());
        self.write(&records).await?;
        Ok(Self::stored(record))
    }

    async fn update(&self, id: &str, record: E) -> StoreResult<Stored<E>> {
        let record = record.prepared()?;
        let _guard = self.lock.lock().await;

        let mut records = self.read().await?;
        let position = records
            .iter()
            .position(|r| r.natural_key() == id)
            .ok_or_else(|| Self::not_found(id))?;
        let renamed_onto_other = record.natural_key() != id
            && records
                .iter()
                .any(|r| r.natural_key() == record.natural_key());
        if renamed_onto_other {
            return Err(StoreError::conflict(E::LABEL, record.natural_key()));
        }
        records[position] = record.clone();
        self.write(&records).await?;
        Ok(Self::stored(record))
    }

    async fn remove(&self, id: &str) -> StoreResult<()> {
        let _guard = self.lock.lock().await;

        let mut records = self.read().await?;
        let before = records.len();
        records.retain(|r| r.natural_key() != id);
        if records.len() == before {
            return Err(Self::not_found(id));
        }
        self.write(&records).await
    }
}

// =============================================================================
// Resume
// =============================================================================

struct JsonResume {
    path: PathBuf,
    lock: Mutex<()>,
}

#[async_trait]
impl ResumeStore for JsonResume {
    async fn current(&self) -> StoreResult<Option<Resume>> {
        read_json(&self.path).await
    }

    async fn save(&self, storage_id: &str) -> StoreResult<Resume> {
        let resume = Resume {
            storage_id: storage_id.to_string(),
            updated_at: current_timestamp(),
        };
        let _guard = self.lock.lock().await;
        write_json(&self.path, &resume).await?;
        Ok(resume)
    }
}

// =============================================================================
// ContentStore
// =============================================================================

#[async_trait]
impl ContentStore for FileStore {
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
        let _guard = self.techstack.lock.lock().await;

        let mut techs = self.techstack.read().await?;
        let mut moved = 0;
        for tech in techs.iter_mut().filter(|t| t.category == from) {
            tech.category = to.to_string();
            moved += 1;
        }
        if moved > 0 {
            self.techstack.write(&techs).await?;
        }
        Ok(moved)
    }

    fn backend(&self) -> &'static str {
        "file"
    }
}
