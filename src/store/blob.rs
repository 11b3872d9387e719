//! Blob storage for the resume PDF.
//!
//! Uploads are two-step: the admin asks for an upload ticket, then posts the
//! raw bytes to the ticket's URL. Tickets are single-use and expire after
//! [`UPLOAD_TICKET_TTL`]. Accepted blobs are written to
//! `<data_dir>/blobs/<storage_id>`.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use dashmap::DashMap;
use miette::Diagnostic;
use thiserror::Error;
use tracing::{debug, info};

use super::utils::{generate_entity_id, is_entity_id};
use crate::content::{UploadError, validate_resume};

/// How long an upload ticket stays valid.
pub const UPLOAD_TICKET_TTL: Duration = Duration::from_secs(5 * 60);

#[derive(Error, Diagnostic, Debug)]
pub enum BlobError {
    #[error("Upload URL is invalid or has expired")]
    #[diagnostic(
        code(folio::blob::ticket),
        help("Request a new upload URL and retry")
    )]
    TicketInvalid,

    #[error("{0}")]
    #[diagnostic(code(folio::blob::rejected))]
    Rejected(#[from] UploadError),

    #[error("Blob '{0}' not found")]
    #[diagnostic(code(folio::blob::not_found))]
    NotFound(String),

    #[error("I/O error: {0}")]
    #[diagnostic(code(folio::blob::io))]
    Io(#[from] std::io::Error),
}

pub struct BlobStore {
    dir: PathBuf,
    tickets: DashMap<String, Instant>,
    ttl: Duration,
}

impl BlobStore {
    /// Open blob storage under `dir`, creating it if needed.
    pub fn open(dir: &Path) -> std::io::Result<Self> {
        std::fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
            tickets: DashMap::new(),
            ttl: UPLOAD_TICKET_TTL,
        })
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Issue a single-use upload ticket.
    pub fn issue_ticket(&self) -> String {
        let now = Instant::now();
        self.tickets.retain(|_, expires| *expires > now);

        let ticket = generate_entity_id();
        self.tickets.insert(ticket.clone(), now + self.ttl);
        debug!(pending = self.tickets.len(), "Issued upload ticket");
        ticket
    }

    /// Store `bytes` against `ticket` and return the new storage id.
    ///
    /// The ticket is consumed only once the content is accepted, so a rejected
    /// file can be corrected and re-posted to the same URL.
    pub async fn accept(
        &self,
        ticket: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<String, BlobError> {
        let live = self
            .tickets
            .get(ticket)
            .is_some_and(|expires| *expires > Instant::now());
        if !live {
            self.tickets.remove(ticket);
            return Err(BlobError::TicketInvalid);
        }

        validate_resume(content_type, bytes.len() as u64)?;

        if self.tickets.remove(ticket).is_none() {
            return Err(BlobError::TicketInvalid);
        }

        let storage_id = generate_entity_id();
        tokio::fs::write(self.dir.join(&storage_id), bytes).await?;
        info!(storage_id = %storage_id, size = bytes.len(), "Stored blob");
        Ok(storage_id)
    }

    pub async fn exists(&self, storage_id: &str) -> bool {
        match self.path_for(storage_id) {
            Some(path) => tokio::fs::try_exists(path).await.unwrap_or(false),
            None => false,
        }
    }

    pub async fn read(&self, storage_id: &str) -> Result<Vec<u8>, BlobError> {
        let path = self
            .path_for(storage_id)
            .ok_or_else(|| BlobError::NotFound(storage_id.to_string()))?;
        match tokio::fs::read(path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(BlobError::NotFound(storage_id.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Delete a stored blob. Returns `false` when there was nothing to delete.
    pub async fn remove(&self, storage_id: &str) -> Result<bool, BlobError> {
        let Some(path) = self.path_for(storage_id) else {
            return Ok(false);
        };
        match tokio::fs::remove_file(path).await {
            Ok(()) => {
                info!(storage_id = %storage_id, "Removed blob");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn path_for(&self, storage_id: &str) -> Option<PathBuf> {
        is_entity_id(storage_id).then(|| self.dir.join(storage_id))
    }
}
