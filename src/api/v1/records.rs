//! Record handlers keyed on store ids.
//!
//! One generic set of handlers serves projects, blogs and the tech stack;
//! the router instantiates them per entity.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::ToSchema;

use crate::api::AppState;
use crate::api::error::{ApiJson, ApiResult};
use crate::content::{ChangeEvent, ChangeKind, CollectionKind, Stored};
use crate::store::Persisted;

// =============================================================================
// DTOs
// =============================================================================

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RenameCategoryRequest {
    /// New category name
    #[schema(example = "Core Backend")]
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RenameCategoryResponse {
    /// Number of technologies moved
    #[schema(example = 3)]
    pub updated: usize,
}

// =============================================================================
// Handlers
// =============================================================================

/// List records with their ids
#[utoipa::path(
    get,
    path = "/api/v1/{collection}",
    tag = "records",
    params(("collection" = String, Path, description = "projects, blogs or techstack")),
    responses(
        (status = 200, description = "Records in insertion order, each with an `id`"),
        (status = 500, description = "Internal server error", body = crate::api::ErrorResponse)
    )
)]
#[instrument(skip(state), fields(collection = %E::COLLECTION))]
pub async fn list_records<E: Persisted>(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<Stored<E>>>> {
    Ok(Json(E::collection(state.store()).list().await?))
}

/// Create a record
#[utoipa::path(
    post,
    path = "/api/v1/{collection}",
    tag = "records",
    params(("collection" = String, Path, description = "projects, blogs or techstack")),
    request_body(content = serde_json::Value, description = "The full record"),
    responses(
        (status = 201, description = "Record created"),
        (status = 400, description = "Invalid record", body = crate::api::ErrorResponse),
        (status = 401, description = "Not logged in", body = crate::api::ErrorResponse),
        (status = 409, description = "Key already exists", body = crate::api::ErrorResponse)
    )
)]
#[instrument(skip(state), fields(collection = %E::COLLECTION))]
pub async fn create_record<E: Persisted>(
    State(state): State<AppState>,
    ApiJson(record): ApiJson<E>,
) -> ApiResult<(StatusCode, Json<Stored<E>>)> {
    let stored = E::collection(state.store()).create(record).await?;
    info!(id = %stored.id, key = %stored.label(), "Created {}", E::LABEL);
    state.publish(ChangeEvent::new(E::COLLECTION, ChangeKind::Created, &stored.id));
    Ok((StatusCode::CREATED, Json(stored)))
}

/// Replace a record
#[utoipa::path(
    put,
    path = "/api/v1/{collection}/{id}",
    tag = "records",
    params(
        ("collection" = String, Path, description = "projects, blogs or techstack"),
        ("id" = String, Path, description = "Record id")
    ),
    request_body(content = serde_json::Value, description = "The full replacement record"),
    responses(
        (status = 200, description = "Record replaced"),
        (status = 400, description = "Invalid record", body = crate::api::ErrorResponse),
        (status = 404, description = "Record not found", body = crate::api::ErrorResponse),
        (status = 409, description = "New key belongs to another record", body = crate::api::ErrorResponse)
    )
)]
#[instrument(skip(state), fields(collection = %E::COLLECTION))]
pub async fn update_record<E: Persisted>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(record): ApiJson<E>,
) -> ApiResult<Json<Stored<E>>> {
    let stored = E::collection(state.store()).update(&id, record).await?;
    info!(id = %stored.id, "Updated {}", E::LABEL);
    state.publish(ChangeEvent::new(E::COLLECTION, ChangeKind::Updated, &stored.id));
    Ok(Json(stored))
}

/// Delete a record
#[utoipa::path(
    delete,
    path = "/api/v1/{collection}/{id}",
    tag = "records",
    params(
        ("collection" = String, Path, description = "projects, blogs or techstack"),
        ("id" = String, Path, description = "Record id")
    ),
    responses(
        (status = 204, description = "Record deleted"),
        (status = 404, description = "Record not found", body = crate::api::ErrorResponse)
    )
)]
#[instrument(skip(state), fields(collection = %E::COLLECTION))]
pub async fn delete_record<E: Persisted>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    E::collection(state.store()).remove(&id).await?;
    info!(id = %id, "Deleted {}", E::LABEL);
    state.publish(ChangeEvent::new(E::COLLECTION, ChangeKind::Deleted, id));
    Ok(StatusCode::NO_CONTENT)
}

/// Rename a tech stack category
///
/// Moves every technology in the category in one step.
#[utoipa::path(
    put,
    path = "/api/v1/techstack/categories/{name}",
    tag = "records",
    params(("name" = String, Path, description = "Current category name")),
    request_body = RenameCategoryRequest,
    responses(
        (status = 200, description = "Category renamed", body = RenameCategoryResponse),
        (status = 400, description = "Blank new name", body = crate::api::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn rename_category(
    State(state): State<AppState>,
    Path(name): Path<String>,
    ApiJson(req): ApiJson<RenameCategoryRequest>,
) -> ApiResult<Json<RenameCategoryResponse>> {
    let updated = state.store().rename_category(&name, &req.name).await?;
    info!(from = %name, to = %req.name.trim(), updated, "Renamed category");
    if updated > 0 {
        state.publish(ChangeEvent::batch(
            CollectionKind::Techstack,
            ChangeKind::Updated,
        ));
    }
    Ok(Json(RenameCategoryResponse { updated }))
}
