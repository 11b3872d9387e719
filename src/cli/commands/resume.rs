//! Resume commands.
//!
//! Uploads are checked locally before anything is sent, then follow the
//! server's three steps: upload URL, raw upload, save.

use std::path::Path;

use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use serde_json::json;

use crate::cli::api_client::ApiClient;
use crate::cli::error::{CliError, CliResult};
use crate::content::validate_resume;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadUrl {
    upload_url: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Uploaded {
    storage_id: String,
}

#[derive(Deserialize)]
struct ResumeUrl {
    url: Option<String>,
}

/// Whether a resume is uploaded and where to fetch it
pub async fn status(api_client: &ApiClient) -> CliResult<String> {
    let response = api_client.get("/api/v1/resume/url").send().await?;
    let body: ResumeUrl = ApiClient::handle_response(response).await?;

    Ok(match body.url {
        Some(url) => format!("Resume uploaded: {}{}", api_client.base_url(), url),
        None => "No resume uploaded.".to_string(),
    })
}

/// Upload a PDF and make it the current resume
pub async fn upload(api_client: &ApiClient, path: &Path) -> CliResult<String> {
    let size = tokio::fs::metadata(path).await?.len();
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    validate_resume(mime.essence_str(), size)?;

    let bytes = tokio::fs::read(path).await?;

    let response = api_client.post("/api/v1/resume/upload-url").send().await?;
    let ticket: UploadUrl = ApiClient::handle_response(response).await?;

    let response = api_client
        .post(&ticket.upload_url)
        .header(CONTENT_TYPE, mime.essence_str())
        .body(bytes)
        .send()
        .await?;
    let uploaded: Uploaded = ApiClient::handle_response(response).await?;

    let response = api_client
        .put("/api/v1/resume")
        .json(&json!({ "storageId": uploaded.storage_id }))
        .send()
        .await?;
    ApiClient::handle_response::<serde_json::Value>(response).await?;

    Ok(format!(
        "Resume uploaded ({} bytes) as {}",
        size, uploaded.storage_id
    ))
}

/// Save the current resume to `output`
pub async fn download(api_client: &ApiClient, output: &Path) -> CliResult<String> {
    let response = api_client.get("/api/resume").send().await?;
    let bytes = ApiClient::handle_bytes(response).await.map_err(|e| match e {
        CliError::ApiError { status: 404, .. } => {
            CliError::NotFound("No resume uploaded".to_string())
        }
        other => other,
    })?;

    tokio::fs::write(output, &bytes).await?;
    Ok(format!(
        "Saved resume to {} ({} bytes)",
        output.display(),
        bytes.len()
    ))
}
