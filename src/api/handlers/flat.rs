//! Flat REST surface keyed on natural keys.
//!
//! `GET/POST/PUT/DELETE /api/{projects,blogs,techstack}` plus the resume
//! download. Records go over the wire without store ids, which keeps the
//! surface identical whichever backend is configured.

use axum::{
    Json,
    body::Body,
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::{IntoParams, ToSchema};

use crate::api::AppState;
use crate::api::error::{ApiError, ApiJson, ApiResult};
use crate::content::{ChangeEvent, ChangeKind, PDF_MIME};
use crate::store::{BlobError, Persisted};

// =============================================================================
// DTOs
// =============================================================================

/// Success response DTO
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SuccessResponse {
    #[schema(example = true)]
    pub success: bool,
}

impl SuccessResponse {
    fn ok() -> Json<Self> {
        Json(Self { success: true })
    }
}

/// Update request: the pre-edit natural key plus the full replacement.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatUpdateRequest<E> {
    #[serde(default, alias = "oldTitle", alias = "oldName")]
    pub old_key: Option<String>,
    #[serde(alias = "project", alias = "blog", alias = "tech")]
    pub record: E,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct KeyQuery {
    /// Natural key (title or name) of the record
    #[serde(default, alias = "title", alias = "name")]
    #[param(example = "My Project")]
    pub key: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ResumeCheckResponse {
    pub exists: bool,
}

fn required_key(key: Option<String>, what: &str) -> ApiResult<String> {
    key.map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .ok_or_else(|| ApiError::BadRequest(format!("{} is required", what)))
}

// =============================================================================
// Records
// =============================================================================

/// List all records of a collection
#[utoipa::path(
    get,
    path = "/api/{collection}",
    tag = "flat",
    params(("collection" = String, Path, description = "projects, blogs or techstack")),
    responses(
        (status = 200, description = "Records in insertion order"),
        (status = 500, description = "Internal server error", body = crate::api::ErrorResponse)
    )
)]
#[instrument(skip(state), fields(collection = %E::COLLECTION))]
pub async fn list<E: Persisted>(State(state): State<AppState>) -> ApiResult<Json<Vec<E>>> {
    let records = E::collection(state.store()).list().await?;
    Ok(Json(records.into_iter().map(|s| s.record).collect()))
}

/// Append a record
#[utoipa::path(
    post,
    path = "/api/{collection}",
    tag = "flat",
    params(("collection" = String, Path, description = "projects, blogs or techstack")),
    request_body(content = serde_json::Value, description = "The full record"),
    responses(
        (status = 200, description = "Record added", body = SuccessResponse),
        (status = 400, description = "Invalid record", body = crate::api::ErrorResponse),
        (status = 401, description = "Not logged in", body = crate::api::ErrorResponse),
        (status = 409, description = "Key already exists", body = crate::api::ErrorResponse)
    )
)]
#[instrument(skip(state), fields(collection = %E::COLLECTION))]
pub async fn create<E: Persisted>(
    State(state): State<AppState>,
    ApiJson(record): ApiJson<E>,
) -> ApiResult<Json<SuccessResponse>> {
    let stored = E::collection(state.store()).create(record).await?;
    info!(key = %stored.label(), "Added {}", E::LABEL);
    state.publish(ChangeEvent::new(E::COLLECTION, ChangeKind::Created, stored.id));
    Ok(SuccessResponse::ok())
}

/// Replace the record stored under `oldKey`
#[utoipa::path(
    put,
    path = "/api/{collection}",
    tag = "flat",
    params(("collection" = String, Path, description = "projects, blogs or techstack")),
    request_body(
        content = serde_json::Value,
        description = "`{ oldKey, record }`; `oldTitle`/`oldName` and `project`/`blog`/`tech` are accepted as aliases"
    ),
    responses(
        (status = 200, description = "Record replaced", body = SuccessResponse),
        (status = 400, description = "Missing old key or invalid record", body = crate::api::ErrorResponse),
        (status = 404, description = "No record with that key", body = crate::api::ErrorResponse),
        (status = 409, description = "New key belongs to another record", body = crate::api::ErrorResponse)
    )
)]
#[instrument(skip(state), fields(collection = %E::COLLECTION))]
pub async fn update<E: Persisted>(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<FlatUpdateRequest<E>>,
) -> ApiResult<Json<SuccessResponse>> {
    let old_key = required_key(req.old_key, "Old key")?;
    let collection = E::collection(state.store());

    let existing = collection
        .find_by_key(&old_key)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("{} '{}' not found", E::LABEL, old_key)))?;
    let stored = collection.update(&existing.id, req.record).await?;

    info!(from = %old_key, to = %stored.label(), "Updated {}", E::LABEL);
    state.publish(ChangeEvent::new(E::COLLECTION, ChangeKind::Updated, stored.id));
    Ok(SuccessResponse::ok())
}

/// Delete the record with the given key
#[utoipa::path(
    delete,
    path = "/api/{collection}",
    tag = "flat",
    params(
        ("collection" = String, Path, description = "projects, blogs or techstack"),
        KeyQuery
    ),
    responses(
        (status = 200, description = "Record deleted", body = SuccessResponse),
        (status = 400, description = "Missing key", body = crate::api::ErrorResponse),
        (status = 404, description = "No record with that key", body = crate::api::ErrorResponse)
    )
)]
#[instrument(skip(state), fields(collection = %E::COLLECTION))]
pub async fn remove<E: Persisted>(
    State(state): State<AppState>,
    Query(query): Query<KeyQuery>,
) -> ApiResult<Json<SuccessResponse>> {
    let key = required_key(query.key, "Key")?;
    let collection = E::collection(state.store());

    let existing = collection
        .find_by_key(&key)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("{} '{}' not found", E::LABEL, key)))?;
    collection.remove(&existing.id).await?;

    info!(key = %key, "Deleted {}", E::LABEL);
    state.publish(ChangeEvent::new(E::COLLECTION, ChangeKind::Deleted, existing.id));
    Ok(SuccessResponse::ok())
}

// =============================================================================
// Resume
// =============================================================================

/// Whether a resume has been uploaded
#[utoipa::path(
    get,
    path = "/api/resume/check",
    tag = "flat",
    responses((status = 200, description = "Resume presence", body = ResumeCheckResponse))
)]
#[instrument(skip(state))]
pub async fn check_resume(State(state): State<AppState>) -> ApiResult<Json<ResumeCheckResponse>> {
    let exists = match state.store().resume().current().await? {
        Some(resume) => state.blobs().exists(&resume.storage_id).await,
        None => false,
    };
    Ok(Json(ResumeCheckResponse { exists }))
}

/// Download the resume PDF
#[utoipa::path(
    get,
    path = "/api/resume",
    tag = "flat",
    responses(
        (status = 200, description = "The resume as an attachment", content_type = "application/pdf"),
        (status = 404, description = "No resume uploaded", body = crate::api::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn download_resume(State(state): State<AppState>) -> ApiResult<Response> {
    let not_found = || ApiError::NotFound("Resume not found".to_string());
    let resume = state.store().resume().current().await?.ok_or_else(not_found)?;
    let bytes = state
        .blobs()
        .read(&resume.storage_id)
        .await
        .map_err(|e| match e {
            BlobError::NotFound(_) => not_found(),
            other => other.into(),
        })?;

    Ok((
        [
            (header::CONTENT_TYPE, PDF_MIME),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"resume.pdf\"",
            ),
        ],
        Body::from(bytes),
    )
        .into_response())
}
