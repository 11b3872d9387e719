//! HTTP implementations of the content client traits.
//!
//! The admin commands drive [`FormController`](crate::content::FormController)
//! through these, against the id-addressed `/api/v1` surface.

use std::marker::PhantomData;

use serde::Deserialize;
use serde_json::json;

use crate::cli::api_client::ApiClient;
use crate::cli::error::CliResult;
use crate::content::{
    Authenticator, CategoryClient, ClientResult, Entity, RecordClient, Stored, Tech, encode_segment,
};

/// One collection on a remote server.
pub struct HttpCollection<'a, E> {
    api: &'a ApiClient,
    _entity: PhantomData<E>,
}

impl<'a, E: Entity> HttpCollection<'a, E> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self {
            api,
            _entity: PhantomData,
        }
    }

    fn collection_path(&self) -> String {
        format!("/api/v1/{}", E::COLLECTION)
    }

    fn item_path(&self, key: &str) -> String {
        format!("{}/{}", self.collection_path(), encode_segment(key))
    }

    async fn fetch(&self) -> CliResult<Vec<Stored<E>>> {
        let response = self.api.get(&self.collection_path()).send().await?;
        ApiClient::handle_response(response).await
    }

    async fn post(&self, record: &E) -> CliResult<Stored<E>> {
        let response = self
            .api
            .post(&self.collection_path())
            .json(record)
            .send()
            .await?;
        ApiClient::handle_response(response).await
    }

    async fn put(&self, key: &str, record: &E) -> CliResult<Stored<E>> {
        let response = self.api.put(&self.item_path(key)).json(record).send().await?;
        ApiClient::handle_response(response).await
    }

    async fn delete(&self, key: &str) -> CliResult<()> {
        let response = self.api.delete(&self.item_path(key)).send().await?;
        ApiClient::handle_empty(response).await
    }
}

impl<E: Entity> RecordClient<E> for HttpCollection<'_, E> {
    async fn list(&self) -> ClientResult<Vec<Stored<E>>> {
        Ok(self.fetch().await?)
    }

    async fn create(&self, record: &E) -> ClientResult<Stored<E>> {
        Ok(self.post(record).await?)
    }

    async fn update(&self, key: &str, record: &E) -> ClientResult<Stored<E>> {
        Ok(self.put(key, record).await?)
    }

    async fn remove(&self, key: &str) -> ClientResult<()> {
        Ok(self.delete(key).await?)
    }
}

#[derive(Deserialize)]
struct RenameResponse {
    updated: usize,
}

impl HttpCollection<'_, Tech> {
    async fn rename(&self, from: &str, to: &str) -> CliResult<usize> {
        let path = format!("/api/v1/techstack/categories/{}", encode_segment(from));
        let response = self
            .api
            .put(&path)
            .json(&json!({ "name": to }))
            .send()
            .await?;
        let body: RenameResponse = ApiClient::handle_response(response).await?;
        Ok(body.updated)
    }
}

impl CategoryClient for HttpCollection<'_, Tech> {
    async fn rename_category(&self, from: &str, to: &str) -> ClientResult<usize> {
        Ok(self.rename(from, to).await?)
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    token: String,
}

/// Logs in against `/api/auth/login`.
pub struct HttpAuthenticator<'a> {
    api: &'a ApiClient,
}

impl<'a> HttpAuthenticator<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    async fn login(&self, password: &str) -> CliResult<String> {
        let response = self
            .api
            .post("/api/auth/login")
            .json(&json!({ "password": password }))
            .send()
            .await?;
        let body: TokenResponse = ApiClient::handle_response(response).await?;
        Ok(body.token)
    }
}

impl Authenticator for HttpAuthenticator<'_> {
    async fn authenticate(&self, password: &str) -> ClientResult<String> {
        Ok(self.login(password).await?)
    }
}
