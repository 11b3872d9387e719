//! Admin login and logout.

use axum::{
    Json,
    extract::{Request, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::ToSchema;

use crate::api::AppState;
use crate::api::auth::bearer_token;
use crate::api::error::{ApiError, ApiJson, ApiResult};

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "admin123")]
    pub password: String,
}

// Keep the password out of logs.
impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest").finish_non_exhaustive()
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    /// Bearer token for mutating requests
    pub token: String,
}

/// Exchange the admin password for a session token
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 401, description = "Wrong password", body = crate::api::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let token = state
        .sessions()
        .login(&req.password)
        .ok_or_else(|| ApiError::Unauthorized("Invalid password".to_string()))?;
    info!("Admin logged in");
    Ok(Json(LoginResponse { token }))
}

/// End the current session
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "auth",
    responses(
        (status = 204, description = "Logged out"),
        (status = 401, description = "Not logged in", body = crate::api::ErrorResponse)
    )
)]
#[instrument(skip_all)]
pub async fn logout(State(state): State<AppState>, request: Request) -> StatusCode {
    if let Some(token) = bearer_token(&request) {
        state.sessions().logout(token);
    }
    info!("Admin logged out");
    StatusCode::NO_CONTENT
}
