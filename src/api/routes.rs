//! API route configuration.

use std::path::Path;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{delete, get, post, put};
use tower_http::services::{ServeDir, ServeFile};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use super::auth::require_session;
use super::error::ErrorResponse;
use super::handlers::{
    self, HealthResponse, LoginRequest, LoginResponse, ResumeCheckResponse, SuccessResponse, flat,
};
use super::state::AppState;
use super::v1::{
    self, RenameCategoryRequest, RenameCategoryResponse, ResumeUrlResponse, SaveResumeRequest,
    StorageIdResponse, UploadUrlResponse,
};
use super::websocket::ws_handler;
use crate::content::{BlogPost, MAX_RESUME_BYTES, Project, Resume, Tech};

/// Build routes for a handler generic over the entity type.
///
/// Applies the turbofish for every handler so one set of generic handlers can
/// be mounted per collection.
macro_rules! routes {
    ($E:ty => {
        $($method:ident $path:literal => $($handler:ident)::+),* $(,)?
    }) => {{
        let router = Router::new();
        $(
            let router = router.route($path, $method($($handler)::+::<$E>));
        )*
        router
    }};
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Folio API",
        version = "0.3.0",
        description = "Portfolio content with an authenticated admin surface",
        license(name = "MIT")
    ),
    paths(
        handlers::health,
        handlers::login,
        handlers::logout,
        flat::list,
        flat::create,
        flat::update,
        flat::remove,
        flat::check_resume,
        flat::download_resume,
        v1::list_records,
        v1::create_record,
        v1::update_record,
        v1::delete_record,
        v1::rename_category,
        v1::generate_upload_url,
        v1::upload_blob,
        v1::save_resume,
        v1::resume_url,
        v1::check_resume,
        v1::get_blob,
    ),
    components(
        schemas(
            HealthResponse,
            LoginRequest,
            LoginResponse,
            SuccessResponse,
            ResumeCheckResponse,
            RenameCategoryRequest,
            RenameCategoryResponse,
            UploadUrlResponse,
            StorageIdResponse,
            SaveResumeRequest,
            ResumeUrlResponse,
            Project,
            BlogPost,
            Tech,
            Resume,
            ErrorResponse,
        )
    ),
    tags(
        (name = "system", description = "System health and status endpoints"),
        (name = "auth", description = "Admin session endpoints"),
        (name = "flat", description = "Records addressed by title or name"),
        (name = "records", description = "Records addressed by store id"),
        (name = "resume", description = "Resume upload and download")
    )
)]
pub struct ApiDoc;

/// Router options that do not live in [`AppState`].
#[derive(Debug, Clone, Default)]
pub struct RouterOptions<'a> {
    /// Mount Scalar docs at `/docs`
    pub enable_docs: bool,
    /// Built frontend to serve for every unmatched path
    pub static_dir: Option<&'a Path>,
}

/// Create the application router
pub fn create_router(state: AppState, options: RouterOptions<'_>) -> Router {
    // Flat surface keyed on titles and names
    let flat_routes = Router::new()
        .merge(routes!(Project => {
            get "/api/projects" => flat::list,
            post "/api/projects" => flat::create,
            put "/api/projects" => flat::update,
            delete "/api/projects" => flat::remove,
        }))
        .merge(routes!(BlogPost => {
            get "/api/blogs" => flat::list,
            post "/api/blogs" => flat::create,
            put "/api/blogs" => flat::update,
            delete "/api/blogs" => flat::remove,
        }))
        .merge(routes!(Tech => {
            get "/api/techstack" => flat::list,
            post "/api/techstack" => flat::create,
            put "/api/techstack" => flat::update,
            delete "/api/techstack" => flat::remove,
        }))
        .route("/api/resume", get(flat::download_resume))
        .route("/api/resume/check", get(flat::check_resume));

    // Typed surface keyed on store ids
    let v1_routes = Router::new()
        .merge(routes!(Project => {
            get "/api/v1/projects" => v1::list_records,
            post "/api/v1/projects" => v1::create_record,
            put "/api/v1/projects/{id}" => v1::update_record,
            delete "/api/v1/projects/{id}" => v1::delete_record,
        }))
        .merge(routes!(BlogPost => {
            get "/api/v1/blogs" => v1::list_records,
            post "/api/v1/blogs" => v1::create_record,
            put "/api/v1/blogs/{id}" => v1::update_record,
            delete "/api/v1/blogs/{id}" => v1::delete_record,
        }))
        .merge(routes!(Tech => {
            get "/api/v1/techstack" => v1::list_records,
            post "/api/v1/techstack" => v1::create_record,
            put "/api/v1/techstack/{id}" => v1::update_record,
            delete "/api/v1/techstack/{id}" => v1::delete_record,
        }))
        .route(
            "/api/v1/techstack/categories/{name}",
            put(v1::rename_category),
        )
        .route("/api/v1/resume", put(v1::save_resume))
        .route("/api/v1/resume/url", get(v1::resume_url))
        .route("/api/v1/resume/check", get(v1::check_resume))
        .route("/api/v1/resume/upload-url", post(v1::generate_upload_url))
        .route("/api/v1/storage/{storage_id}", get(v1::get_blob));

    let protected = flat_routes
        .merge(v1_routes)
        .route("/api/auth/logout", post(handlers::logout))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    // The login route hands out tokens and the upload ticket is its own
    // credential, so neither sits behind the session check.
    let open = Router::new()
        .route("/health", get(handlers::health))
        .route("/ws", get(ws_handler))
        .route("/api/auth/login", post(handlers::login))
        .route(
            "/api/v1/storage/upload/{ticket}",
            post(v1::upload_blob)
                .layer(DefaultBodyLimit::max(MAX_RESUME_BYTES as usize + 1024 * 1024)),
        );

    let mut router = open.merge(protected);

    if options.enable_docs {
        router = router.merge(Scalar::with_url("/docs", ApiDoc::openapi()));
    }

    if let Some(dir) = options.static_dir {
        let index = ServeFile::new(dir.join("index.html"));
        router = router.fallback_service(ServeDir::new(dir).fallback(index));
    }

    router.with_state(state)
}
