use std::io::Write;

use tempfile::{NamedTempFile, TempDir};

use crate::cli::commands::resume::*;
use crate::cli::commands::test_support::spawn_test_server;
use crate::cli::error::CliError;
use crate::content::{MAX_RESUME_BYTES, UploadError};

const PDF: &[u8] = b"%PDF-1.4\n%%EOF";

fn temp_file(suffix: &str, bytes: &[u8]) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(bytes).unwrap();
    file
}

#[tokio::test(flavor = "multi_thread")]
async fn test_upload_status_download() {
    let server = spawn_test_server().await;
    let api = server.admin().await;

    assert_eq!(status(&api).await.unwrap(), "No resume uploaded.");

    let pdf = temp_file(".pdf", PDF);
    let output = upload(&api, pdf.path()).await.unwrap();
    assert!(output.starts_with(&format!("Resume uploaded ({} bytes)", PDF.len())));

    let output = status(&api).await.unwrap();
    assert!(output.starts_with(&format!("Resume uploaded: {}/api/v1/storage/", server.url)));

    let dir = TempDir::new().unwrap();
    let target = dir.path().join("cv.pdf");
    download(&api, &target).await.unwrap();
    assert_eq!(std::fs::read(&target).unwrap(), PDF);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_upload_rejects_non_pdf_before_any_request() {
    // Nothing listens on this port; a request would fail with a connection error
    let _ = rustls::crypto::ring::default_provider().install_default();
    let api = crate::cli::api_client::ApiClient::new(Some("http://127.0.0.1:9".to_string()));
    let image = temp_file(".png", b"\x89PNG");

    let err = upload(&api, image.path()).await.unwrap_err();

    assert!(matches!(err, CliError::Upload(UploadError::NotPdf { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_upload_rejects_oversized_pdf_before_any_request() {
    let _ = rustls::crypto::ring::default_provider().install_default();
    let api = crate::cli::api_client::ApiClient::new(Some("http://127.0.0.1:9".to_string()));
    let big = temp_file(".pdf", &vec![0u8; MAX_RESUME_BYTES as usize + 1]);

    let err = upload(&api, big.path()).await.unwrap_err();

    assert!(matches!(err, CliError::Upload(UploadError::TooLarge { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_upload_requires_login() {
    let server = spawn_test_server().await;
    let pdf = temp_file(".pdf", PDF);

    let err = upload(&server.anonymous(), pdf.path()).await.unwrap_err();

    assert!(matches!(err, CliError::Unauthorized { .. }));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_download_without_resume_is_not_found() {
    let server = spawn_test_server().await;
    let dir = TempDir::new().unwrap();

    let err = download(&server.anonymous(), &dir.path().join("x.pdf"))
        .await
        .unwrap_err();

    assert!(matches!(err, CliError::NotFound(_)));
}
