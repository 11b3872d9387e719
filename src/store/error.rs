//! Store error types.
//!
//! Shared by both store backends and the blob store. Uses miette for
//! diagnostic output and thiserror for the derives.

use miette::Diagnostic;
use thiserror::Error;

use crate::content::ValidationError;

#[derive(Error, Diagnostic, Debug)]
pub enum StoreError {
    #[error("{entity_type} '{key}' not found")]
    #[diagnostic(code(folio::store::not_found))]
    NotFound { entity_type: String, key: String },

    #[error("{entity_type} '{key}' already exists")]
    #[diagnostic(
        code(folio::store::conflict),
        help("Titles and names must be unique within a collection")
    )]
    Conflict { entity_type: String, key: String },

    #[error("{message}")]
    #[diagnostic(code(folio::store::validation))]
    Validation { message: String },

    #[error("I/O error: {0}")]
    #[diagnostic(code(folio::store::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(folio::store::serialization))]
    Serialization(#[from] serde_json::Error),

    #[error("Database error: {message}")]
    #[diagnostic(code(folio::store::database))]
    Database { message: String },

    #[error("Blob error: {message}")]
    #[diagnostic(code(folio::store::blob))]
    Blob { message: String },
}

impl StoreError {
    pub fn not_found(entity_type: &str, key: &str) -> Self {
        StoreError::NotFound {
            entity_type: entity_type.to_string(),
            key: key.to_string(),
        }
    }

    pub fn conflict(entity_type: &str, key: &str) -> Self {
        StoreError::Conflict {
            entity_type: entity_type.to_string(),
            key: key.to_string(),
        }
    }
}

impl From<ValidationError> for StoreError {
    fn from(err: ValidationError) -> Self {
        StoreError::Validation {
            message: err.to_string(),
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Database {
            message: err.to_string(),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
