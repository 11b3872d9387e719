//! gloo-net clients for the `/api/v1` surface.
//!
//! Admin requests carry the session token from `sessionStorage`; reads are
//! public and go out without it.

use std::marker::PhantomData;

use folio::content::{
    Authenticator, CategoryClient, ClientError, ClientResult, Entity, ErrorBody, RecordClient,
    Stored, Tech, encode_segment,
};
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::session::stored_token;

const API_BASE: &str = "/api/v1";

fn network(e: gloo_net::Error) -> ClientError {
    ClientError::Network(e.to_string())
}

fn authorized(request: RequestBuilder) -> RequestBuilder {
    match stored_token() {
        Some(token) => request.header("Authorization", &format!("Bearer {}", token)),
        None => request,
    }
}

async fn check(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if (200..300).contains(&status) {
        return Ok(response);
    }
    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => response.status_text(),
    };
    Err(ClientError::Server { status, message })
}

/// Helper function to handle API responses
async fn handle_response<T: DeserializeOwned>(request: Request) -> ClientResult<T> {
    let response = check(request.send().await.map_err(network)?).await?;
    response
        .json::<T>()
        .await
        .map_err(|e| ClientError::Deserialization(e.to_string()))
}

async fn handle_empty(request: Request) -> ClientResult<()> {
    check(request.send().await.map_err(network)?).await?;
    Ok(())
}

// =============================================================================
// Records
// =============================================================================

/// One collection on the serving host.
pub struct HttpRecords<E> {
    _entity: PhantomData<E>,
}

impl<E: Entity> HttpRecords<E> {
    pub fn new() -> Self {
        Self {
            _entity: PhantomData,
        }
    }

    fn collection_url() -> String {
        format!("{}/{}", API_BASE, E::COLLECTION)
    }

    fn item_url(key: &str) -> String {
        format!("{}/{}", Self::collection_url(), encode_segment(key))
    }
}

impl<E: Entity> RecordClient<E> for HttpRecords<E> {
    async fn list(&self) -> ClientResult<Vec<Stored<E>>> {
        let request = Request::get(&Self::collection_url()).build().map_err(network)?;
        handle_response(request).await
    }

    async fn create(&self, record: &E) -> ClientResult<Stored<E>> {
        let request = authorized(Request::post(&Self::collection_url()))
            .json(record)
            .map_err(network)?;
        handle_response(request).await
    }

    async fn update(&self, key: &str, record: &E) -> ClientResult<Stored<E>> {
        let request = authorized(Request::put(&Self::item_url(key)))
            .json(record)
            .map_err(network)?;
        handle_response(request).await
    }

    async fn remove(&self, key: &str) -> ClientResult<()> {
        let request = authorized(Request::delete(&Self::item_url(key)))
            .build()
            .map_err(network)?;
        handle_empty(request).await
    }
}

#[derive(Deserialize)]
struct RenameResponse {
    updated: usize,
}

impl CategoryClient for HttpRecords<Tech> {
    async fn rename_category(&self, from: &str, to: &str) -> ClientResult<usize> {
        let url = format!("{}/techstack/categories/{}", API_BASE, encode_segment(from));
        let request = authorized(Request::put(&url))
            .json(&json!({ "name": to }))
            .map_err(network)?;
        let body: RenameResponse = handle_response(request).await?;
        Ok(body.updated)
    }
}

// =============================================================================
// Auth
// =============================================================================

#[derive(Deserialize)]
struct TokenResponse {
    token: String,
}

pub struct HttpAuthenticator;

impl Authenticator for HttpAuthenticator {
    async fn authenticate(&self, password: &str) -> ClientResult<String> {
        let request = Request::post("/api/auth/login")
            .json(&json!({ "password": password }))
            .map_err(network)?;
        let body: TokenResponse = handle_response(request).await?;
        Ok(body.token)
    }
}

/// Drop the server session. The local gate is cleared regardless.
pub async fn logout() -> ClientResult<()> {
    let request = authorized(Request::post("/api/auth/logout"))
        .build()
        .map_err(network)?;
    handle_empty(request).await
}

// =============================================================================
// Resume
// =============================================================================

pub mod resume {
    use super::*;

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct UploadUrl {
        upload_url: String,
    }

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct StorageId {
        storage_id: String,
    }

    #[derive(Deserialize)]
    struct ResumeUrl {
        url: Option<String>,
    }

    #[derive(Deserialize)]
    struct Exists {
        exists: bool,
    }

    pub async fn url() -> ClientResult<Option<String>> {
        let request = Request::get(&format!("{}/resume/url", API_BASE))
            .build()
            .map_err(network)?;
        let body: ResumeUrl = handle_response(request).await?;
        Ok(body.url)
    }

    pub async fn exists() -> ClientResult<bool> {
        let request = Request::get(&format!("{}/resume/check", API_BASE))
            .build()
            .map_err(network)?;
        let body: Exists = handle_response(request).await?;
        Ok(body.exists)
    }

    /// Upload a checked PDF and point the resume at it.
    pub async fn replace(file: web_sys::File) -> ClientResult<()> {
        let request = authorized(Request::post(&format!("{}/resume/upload-url", API_BASE)))
            .build()
            .map_err(network)?;
        let ticket: UploadUrl = handle_response(request).await?;

        let request = Request::post(&ticket.upload_url)
            .header("Content-Type", &file.type_())
            .body(file)
            .map_err(network)?;
        let stored: StorageId = handle_response(request).await?;

        let request = authorized(Request::put(&format!("{}/resume", API_BASE)))
            .json(&json!({ "storageId": stored.storage_id }))
            .map_err(network)?;
        handle_empty(request).await
    }
}
