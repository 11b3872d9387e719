//! Resume upload and retrieval.
//!
//! Uploading is three calls: ask for an upload URL, POST the PDF to it, then
//! point the resume record at the returned storage id.

use axum::{
    Json,
    body::{Body, Bytes},
    extract::{Path, State},
    http::{HeaderMap, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use utoipa::ToSchema;

use crate::api::AppState;
use crate::api::error::{ApiError, ApiJson, ApiResult};
use crate::api::handlers::ResumeCheckResponse;
use crate::content::{ChangeEvent, ChangeKind, CollectionKind, PDF_MIME, Resume};

// =============================================================================
// DTOs
// =============================================================================

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadUrlResponse {
    /// Single-use URL to POST the file to
    #[schema(example = "/api/v1/storage/upload/3f2a...")]
    pub upload_url: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StorageIdResponse {
    pub storage_id: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveResumeRequest {
    pub storage_id: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ResumeUrlResponse {
    /// Download URL, or null when no resume is stored
    pub url: Option<String>,
}

pub fn storage_url(storage_id: &str) -> String {
    format!("/api/v1/storage/{}", storage_id)
}

// =============================================================================
// Handlers
// =============================================================================

/// Issue a single-use upload URL
#[utoipa::path(
    post,
    path = "/api/v1/resume/upload-url",
    tag = "resume",
    responses(
        (status = 200, description = "Upload URL issued", body = UploadUrlResponse),
        (status = 401, description = "Not logged in", body = crate::api::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn generate_upload_url(State(state): State<AppState>) -> Json<UploadUrlResponse> {
    let ticket = state.blobs().issue_ticket();
    Json(UploadUrlResponse {
        upload_url: format!("/api/v1/storage/upload/{}", ticket),
    })
}

/// Upload a file against an upload ticket
///
/// The ticket in the path is the credential, so no session is needed.
#[utoipa::path(
    post,
    path = "/api/v1/storage/upload/{ticket}",
    tag = "resume",
    params(("ticket" = String, Path, description = "Ticket from the upload URL")),
    request_body(content = Vec<u8>, content_type = "application/pdf"),
    responses(
        (status = 200, description = "File stored", body = StorageIdResponse),
        (status = 403, description = "Ticket unknown, used or expired", body = crate::api::ErrorResponse),
        (status = 413, description = "File over 5MB", body = crate::api::ErrorResponse),
        (status = 415, description = "Not a PDF", body = crate::api::ErrorResponse)
    )
)]
#[instrument(skip(state, headers, body), fields(size = body.len()))]
pub async fn upload_blob(
    State(state): State<AppState>,
    Path(ticket): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Json<StorageIdResponse>> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let storage_id = state.blobs().accept(&ticket, content_type, &body).await?;
    Ok(Json(StorageIdResponse { storage_id }))
}

/// Point the resume at an uploaded file
#[utoipa::path(
    put,
    path = "/api/v1/resume",
    tag = "resume",
    request_body = SaveResumeRequest,
    responses(
        (status = 200, description = "Resume saved", body = Resume),
        (status = 404, description = "No file with that storage id", body = crate::api::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn save_resume(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SaveResumeRequest>,
) -> ApiResult<Json<Resume>> {
    if !state.blobs().exists(&req.storage_id).await {
        return Err(ApiError::NotFound(format!(
            "No uploaded file with storage id '{}'",
            req.storage_id
        )));
    }
    let previous = state.store().resume().current().await?;
    let resume = state.store().resume().save(&req.storage_id).await?;
    info!(storage_id = %resume.storage_id, "Resume updated");

    if let Some(old) = previous.filter(|old| old.storage_id != resume.storage_id)
        && let Err(e) = state.blobs().remove(&old.storage_id).await
    {
        warn!(storage_id = %old.storage_id, error = %e, "Failed to remove superseded resume");
    }
    state.publish(ChangeEvent::new(
        CollectionKind::Resume,
        ChangeKind::Updated,
        &resume.storage_id,
    ));
    Ok(Json(resume))
}

/// Download URL of the current resume
#[utoipa::path(
    get,
    path = "/api/v1/resume/url",
    tag = "resume",
    responses((status = 200, description = "URL or null", body = ResumeUrlResponse))
)]
#[instrument(skip(state))]
pub async fn resume_url(State(state): State<AppState>) -> ApiResult<Json<ResumeUrlResponse>> {
    let url = state
        .store()
        .resume()
        .current()
        .await?
        .map(|r| storage_url(&r.storage_id));
    Ok(Json(ResumeUrlResponse { url }))
}

/// Whether a resume has been uploaded
#[utoipa::path(
    get,
    path = "/api/v1/resume/check",
    tag = "resume",
    responses((status = 200, description = "Resume presence", body = ResumeCheckResponse))
)]
#[instrument(skip(state))]
pub async fn check_resume(State(state): State<AppState>) -> ApiResult<Json<ResumeCheckResponse>> {
    crate::api::handlers::flat::check_resume(State(state)).await
}

/// Fetch a stored file
#[utoipa::path(
    get,
    path = "/api/v1/storage/{storage_id}",
    tag = "resume",
    params(("storage_id" = String, Path, description = "Storage id")),
    responses(
        (status = 200, description = "File content", content_type = "application/pdf"),
        (status = 404, description = "No such file", body = crate::api::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_blob(
    State(state): State<AppState>,
    Path(storage_id): Path<String>,
) -> ApiResult<Response> {
    let bytes = state.blobs().read(&storage_id).await?;
    Ok(([(header::CONTENT_TYPE, PDF_MIME)], Body::from(bytes)).into_response())
}
