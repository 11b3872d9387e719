//! HTTP error mapping.

use axum::Json;
use axum::extract::FromRequest;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;

use crate::content::UploadError;
use crate::store::{BlobError, StoreError};

/// Error response DTO
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    #[schema(example = "Project 'Foo' not found")]
    pub error: String,
}

/// JSON body extractor whose rejections use the `{ error }` body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Errors a handler can return; each maps to one status code.
#[derive(Error, Diagnostic, Debug)]
pub enum ApiError {
    #[error("{0}")]
    #[diagnostic(code(folio::api::not_found))]
    NotFound(String),

    #[error("{0}")]
    #[diagnostic(code(folio::api::conflict))]
    Conflict(String),

    #[error("{0}")]
    #[diagnostic(code(folio::api::bad_request))]
    BadRequest(String),

    #[error("{0}")]
    #[diagnostic(code(folio::api::unauthorized))]
    Unauthorized(String),

    #[error("{0}")]
    #[diagnostic(code(folio::api::forbidden))]
    Forbidden(String),

    #[error("{0}")]
    #[diagnostic(code(folio::api::payload_too_large))]
    PayloadTooLarge(String),

    #[error("{0}")]
    #[diagnostic(code(folio::api::unsupported_media_type))]
    UnsupportedMediaType(String),

    #[error("{0}")]
    #[diagnostic(code(folio::api::internal))]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(status = status.as_u16(), "Request failed: {}", self);
        }
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            StoreError::Conflict { .. } => ApiError::Conflict(err.to_string()),
            StoreError::Validation { message } => ApiError::BadRequest(message),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<BlobError> for ApiError {
    fn from(err: BlobError) -> Self {
        match err {
            BlobError::TicketInvalid => ApiError::Forbidden(err.to_string()),
            BlobError::Rejected(UploadError::NotPdf { .. }) => {
                ApiError::UnsupportedMediaType(err.to_string())
            }
            BlobError::Rejected(UploadError::TooLarge { .. }) => {
                ApiError::PayloadTooLarge(err.to_string())
            }
            BlobError::Rejected(UploadError::Empty) => ApiError::BadRequest(err.to_string()),
            BlobError::NotFound(_) => ApiError::NotFound(err.to_string()),
            BlobError::Io(_) => ApiError::Internal(err.to_string()),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
