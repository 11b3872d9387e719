use std::path::PathBuf;

use axum::http::StatusCode;
use serde_json::json;
use utoipa::OpenApi;

use super::test_support::{TestApp, get};
use super::{ApiDoc, Config, DEFAULT_ADMIN_PASSWORD, DEFAULT_PORT, log_directive};
use crate::store::StoreKind;

#[test]
fn test_config_defaults() {
    let config = Config::default();
    assert_eq!(config.port, DEFAULT_PORT);
    assert_eq!(config.store, StoreKind::File);
    assert_eq!(config.admin_password, DEFAULT_ADMIN_PASSWORD);
    assert!(!config.enable_docs);
    assert!(config.static_dir.is_none());
}

#[test]
fn test_blob_dir_is_under_data_dir() {
    let config = Config {
        data_dir: PathBuf::from("/srv/folio"),
        ..Config::default()
    };
    assert_eq!(config.blob_dir(), PathBuf::from("/srv/folio/blobs"));
}

#[test]
fn test_log_directive_follows_verbosity() {
    assert!(log_directive(0).starts_with("folio=info"));
    assert!(log_directive(1).starts_with("folio=debug"));
    assert_eq!(log_directive(2), "folio=trace,tower_http=debug");
    assert_eq!(log_directive(9), log_directive(2));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_health_reports_store_backend() {
    let app = TestApp::file().await;
    let (status, body) = app.send(get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"], "file");

    let app = TestApp::sqlite().await;
    let (_, body) = app.send(get("/health")).await;
    assert_eq!(body["store"], "sqlite");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_docs_are_off_by_default() {
    let app = TestApp::file().await;
    let (status, _) = app.send(get("/docs")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unknown_api_route_is_not_found() {
    let app = TestApp::file().await;
    let (status, body) = app.send(get("/api/v1/nothing")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!(null));
}

#[test]
fn test_openapi_documents_record_bodies() {
    let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
    let paths = &doc["paths"];

    for (path, method) in [
        ("/api/{collection}", "post"),
        ("/api/{collection}", "put"),
        ("/api/v1/{collection}", "post"),
        ("/api/v1/{collection}/{id}", "put"),
    ] {
        let body = &paths[path][method]["requestBody"];
        assert!(body.is_object(), "{} {} has no request body", method, path);
        assert!(
            body["content"]["application/json"].is_object(),
            "{} {} body is not JSON",
            method,
            path
        );
    }
}
