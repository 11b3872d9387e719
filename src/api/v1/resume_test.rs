//! Tests for the three-step resume upload.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;

use crate::api::test_support::{TestApp, empty_request, get, json_request};
use crate::content::{ChangeKind, CollectionKind, MAX_RESUME_BYTES};

const PDF: &[u8] = b"%PDF-1.7\n1 0 obj\n<<>>\nendobj\n%%EOF";

fn upload(url: &str, content_type: &str, bytes: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(url)
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(bytes))
        .unwrap()
}

async fn upload_url(app: &TestApp, token: &str) -> String {
    let (status, body) = app
        .send(empty_request(
            "POST",
            "/api/v1/resume/upload-url",
            Some(token),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    body["uploadUrl"].as_str().unwrap().to_string()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_full_upload_flow() {
    let app = TestApp::file().await;
    let token = app.token().await;
    let mut rx = app.state.notifier().subscribe();

    let url = upload_url(&app, &token).await;
    assert!(url.starts_with("/api/v1/storage/upload/"));

    // The ticket authorizes the upload on its own
    let (status, body) = app.send(upload(&url, "application/pdf", PDF.to_vec())).await;
    assert_eq!(status, StatusCode::OK);
    let storage_id = body["storageId"].as_str().unwrap().to_string();

    let (status, body) = app
        .send(json_request(
            "PUT",
            "/api/v1/resume",
            Some(&token),
            json!({ "storageId": storage_id }),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["storageId"], storage_id.as_str());

    let event = rx.recv().await.unwrap();
    assert_eq!(event.collection, CollectionKind::Resume);
    assert_eq!(event.change, ChangeKind::Updated);

    let (_, body) = app.send(get("/api/v1/resume/url")).await;
    assert_eq!(body["url"], format!("/api/v1/storage/{}", storage_id));

    let (_, body) = app.send(get("/api/v1/resume/check")).await;
    assert_eq!(body, json!({ "exists": true }));
    let (_, body) = app.send(get("/api/resume/check")).await;
    assert_eq!(body, json!({ "exists": true }));

    let response = app
        .router
        .clone()
        .oneshot(get(&format!("/api/v1/storage/{}", storage_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], PDF);

    let response = app.router.clone().oneshot(get("/api/resume")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"resume.pdf\""
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_resume_url_is_null_without_resume() {
    let app = TestApp::sqlite().await;

    let (status, body) = app.send(get("/api/v1/resume/url")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "url": null }));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_ticket_is_single_use() {
    let app = TestApp::file().await;
    let token = app.token().await;
    let url = upload_url(&app, &token).await;

    let (status, _) = app.send(upload(&url, "application/pdf", PDF.to_vec())).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.send(upload(&url, "application/pdf", PDF.to_vec())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Upload URL is invalid or has expired");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unknown_ticket_is_forbidden() {
    let app = TestApp::file().await;

    let (status, _) = app
        .send(upload(
            "/api/v1/storage/upload/0123456789abcdef0123456789abcdef",
            "application/pdf",
            PDF.to_vec(),
        ))
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_non_pdf_is_rejected_and_ticket_survives() {
    let app = TestApp::file().await;
    let token = app.token().await;
    let url = upload_url(&app, &token).await;

    let (status, _) = app.send(upload(&url, "image/png", vec![1, 2, 3])).await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);

    let (status, _) = app.send(upload(&url, "application/pdf", PDF.to_vec())).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_oversized_pdf_is_rejected() {
    let app = TestApp::file().await;
    let token = app.token().await;
    let url = upload_url(&app, &token).await;

    let too_big = vec![0u8; MAX_RESUME_BYTES as usize + 1];
    let (status, _) = app.send(upload(&url, "application/pdf", too_big)).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_save_unknown_storage_id_is_not_found() {
    let app = TestApp::sqlite().await;
    let token = app.token().await;

    let (status, _) = app
        .send(json_request(
            "PUT",
            "/api/v1/resume",
            Some(&token),
            json!({ "storageId": "0123456789abcdef0123456789abcdef" }),
        ))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, body) = app.send(get("/api/v1/resume/check")).await;
    assert_eq!(body, json!({ "exists": false }));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unknown_blob_is_not_found() {
    let app = TestApp::file().await;

    let (status, _) = app.send(get("/api/v1/storage/../../etc/passwd")).await;
    assert_ne!(status, StatusCode::OK);

    let (status, _) = app
        .send(get("/api/v1/storage/0123456789abcdef0123456789abcdef"))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

async fn upload_and_save(app: &TestApp, token: &str) -> String {
    let url = upload_url(app, token).await;
    let (status, body) = app.send(upload(&url, "application/pdf", PDF.to_vec())).await;
    assert_eq!(status, StatusCode::OK);
    let storage_id = body["storageId"].as_str().unwrap().to_string();

    let (status, _) = app
        .send(json_request(
            "PUT",
            "/api/v1/resume",
            Some(token),
            json!({ "storageId": storage_id }),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    storage_id
}

#[tokio::test(flavor = "multi_thread")]
async fn test_replacing_resume_deletes_previous_file() {
    for app in [TestApp::file().await, TestApp::sqlite().await] {
        let token = app.token().await;

        let first = upload_and_save(&app, &token).await;
        let second = upload_and_save(&app, &token).await;
        assert_ne!(first, second);

        let (status, _) = app.send(get(&format!("/api/v1/storage/{}", first))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(!app.state.blobs().exists(&first).await);
        assert!(app.state.blobs().exists(&second).await);

        let (_, body) = app.send(get("/api/v1/resume/url")).await;
        assert_eq!(body["url"], format!("/api/v1/storage/{}", second));
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_saving_same_file_twice_keeps_it() {
    let app = TestApp::file().await;
    let token = app.token().await;
    let storage_id = upload_and_save(&app, &token).await;

    let (status, _) = app
        .send(json_request(
            "PUT",
            "/api/v1/resume",
            Some(&token),
            json!({ "storageId": storage_id }),
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(app.state.blobs().exists(&storage_id).await);
}
