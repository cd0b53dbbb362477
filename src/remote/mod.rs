//! Typed client for the library service endpoints.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::fmt;
use tracing::debug;

use crate::remote::model::{
    DeleteViewedResponse, PageResponse, StartDownloadResponse, SyncOutcome,
    ToggleFavoriteResponse,
};

pub mod model;

/// The five mutating operations plus the paged listing the gallery consumes.
/// Kept as a trait so tests can substitute a recording implementation.
#[async_trait]
pub trait LibraryService: Send + Sync {
    async fn sync(&self) -> Result<SyncOutcome>;

    async fn list_page(&self, page: u32, limit: u32, favorites_only: bool) -> Result<PageResponse>;

    /// Toggle the persisted favorite flag; returns the authoritative value.
    async fn toggle_favorite(&self, name: &str) -> Result<bool>;

    async fn mark_viewed(&self, name: &str) -> Result<()>;

    /// Start a server-side download job; returns the service's status message.
    async fn start_download(&self, url: &str, depth: u32) -> Result<String>;

    /// Bulk-delete viewed, non-favorite media; returns the deleted count.
    async fn delete_viewed(&self) -> Result<u64>;
}

#[derive(Clone)]
pub struct HttpLibraryClient {
    http: Client,
    base_url: Url,
}

impl fmt::Debug for HttpLibraryClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpLibraryClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl HttpLibraryClient {
    /// `base_url` must end with a trailing slash so endpoint paths join
    /// underneath it.
    pub fn new(base_url: Url) -> Self {
        let http = Client::builder()
            .user_agent("gallerist/0.1")
            .build()
            .expect("reqwest client");
        Self { http, base_url }
    }

    /// Build the listing request. `cacheBust` carries the current epoch
    /// millis so intermediaries never serve a stale page.
    pub fn build_list_request(
        &self,
        page: u32,
        limit: u32,
        favorites_only: bool,
    ) -> Result<reqwest::Request> {
        let mut url = self
            .base_url
            .join("images")
            .context("invalid library base URL")?;
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("limit", &limit.to_string())
            .append_pair("favorites", if favorites_only { "true" } else { "false" })
            .append_pair("cacheBust", &Utc::now().timestamp_millis().to_string());
        self.http
            .get(url)
            .build()
            .context("failed to build listing request")
    }

    async fn post<T: DeserializeOwned>(&self, path: &str, body: Option<Value>) -> Result<T> {
        let url = self
            .base_url
            .join(path)
            .context("invalid library base URL")?;
        debug!(%url, "library request");
        let mut request = self.http.post(url);
        if let Some(body) = body {
            request = request.json(&body);
        }
        let res = request
            .send()
            .await
            .context("failed to reach library service")?;
        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(anyhow!("library error {}: {}", status, body));
        }
        res.json::<T>()
            .await
            .context("invalid library response JSON")
    }
}

#[async_trait]
impl LibraryService for HttpLibraryClient {
    async fn sync(&self) -> Result<SyncOutcome> {
        self.post("sync", None).await
    }

    async fn list_page(&self, page: u32, limit: u32, favorites_only: bool) -> Result<PageResponse> {
        let request = self.build_list_request(page, limit, favorites_only)?;
        let res = self
            .http
            .execute(request)
            .await
            .context("failed to reach library service")?;
        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(anyhow!("library error {}: {}", status, body));
        }
        res.json::<PageResponse>()
            .await
            .context("invalid listing response JSON")
    }

    async fn toggle_favorite(&self, name: &str) -> Result<bool> {
        let res: ToggleFavoriteResponse = self
            .post("toggle-favorite", Some(json!({ "filename": name })))
            .await?;
        if res.status != "success" {
            return Err(anyhow!("toggle-favorite rejected: {}", res.status));
        }
        Ok(res.favorite)
    }

    async fn mark_viewed(&self, name: &str) -> Result<()> {
        let _: Value = self
            .post("mark-viewed", Some(json!({ "filename": name })))
            .await?;
        Ok(())
    }

    async fn start_download(&self, url: &str, depth: u32) -> Result<String> {
        let res: StartDownloadResponse = self
            .post("start-download", Some(json!({ "url": url, "depth": depth })))
            .await?;
        Ok(res.message)
    }

    async fn delete_viewed(&self) -> Result<u64> {
        let res: DeleteViewedResponse = self.post("delete-viewed", None).await?;
        Ok(res.deleted)
    }
}
