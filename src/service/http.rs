//! REST gallery service client.
//!
//! Talks to the remote gallery API:
//!
//! | Operation | Request |
//! |-----------|---------|
//! | list      | `GET <base>` → JSON array of entries |
//! | upsert    | `POST <base>` with a JSON entry |
//! | delete    | `DELETE <base>/<url-encoded id>` |
//! | upload    | `POST <upload-endpoint>` multipart field `file` → `{ "url": "..." }` |
//!
//! Requests carry no credentials. Success is decided by the status class
//! alone; error bodies are not interpreted.

use crate::domain::error::{GalleryError, Result};
use crate::domain::Entry;
use crate::infrastructure::urls;
use crate::service::backend::{GalleryService, UploadFile};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(default)]
    url: Option<String>,
}

/// HTTP implementation of [`GalleryService`].
#[derive(Debug, Clone)]
pub struct HttpGallery {
    client: reqwest::Client,
    api_base: String,
    upload_endpoint: Option<String>,
}

impl HttpGallery {
    /// Creates a client for the given collection URL and optional upload URL.
    pub fn new(api_base: impl Into<String>, upload_endpoint: Option<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_base, upload_endpoint)
    }

    /// Creates a client that reuses an existing `reqwest::Client`.
    pub fn with_client(
        client: reqwest::Client,
        api_base: impl Into<String>,
        upload_endpoint: Option<String>,
    ) -> Self {
        Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            upload_endpoint: upload_endpoint.filter(|endpoint| !endpoint.trim().is_empty()),
        }
    }

    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn entry_url(&self, id: &str) -> String {
        urls::entry_url(&self.api_base, id)
    }
}

#[async_trait]
impl GalleryService for HttpGallery {
    #[tracing::instrument(level = "debug", name = "http_list", skip_all, fields(url = %self.api_base))]
    async fn list(&self) -> Result<Vec<Entry>> {
        let response = self
            .client
            .get(&self.api_base)
            .send()
            .await
            .map_err(|e| GalleryError::Load(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(status = %status, "list rejected");
            return Err(GalleryError::Load(format!("status {status}")));
        }

        let entries: Vec<Entry> = response
            .json()
            .await
            .map_err(|e| GalleryError::Load(format!("invalid response: {e}")))?;

        tracing::debug!(count = entries.len(), "entries fetched");
        Ok(entries)
    }

    #[tracing::instrument(level = "debug", name = "http_upsert", skip_all, fields(entry_id = %entry.id))]
    async fn upsert(&self, entry: &Entry) -> Result<()> {
        let response = self
            .client
            .post(&self.api_base)
            .json(entry)
            .send()
            .await
            .map_err(|e| GalleryError::Save(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(status = %status, "upsert rejected");
            return Err(GalleryError::Save(format!("status {status}")));
        }

        tracing::debug!("entry saved");
        Ok(())
    }

    #[tracing::instrument(level = "debug", name = "http_delete", skip(self))]
    async fn delete(&self, id: &str) -> Result<()> {
        let url = self.entry_url(id);

        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|e| GalleryError::Delete(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(status = %status, "delete rejected");
            return Err(GalleryError::Delete(format!("status {status}")));
        }

        tracing::debug!("entry deleted");
        Ok(())
    }

    #[tracing::instrument(level = "debug", name = "http_upload", skip_all,
        fields(file_name = %file.file_name, size = file.bytes.len()))]
    async fn upload(&self, file: &UploadFile) -> Result<String> {
        let endpoint = self
            .upload_endpoint
            .as_deref()
            .ok_or_else(|| GalleryError::Upload("upload endpoint is not configured".to_string()))?;

        let mut part = Part::bytes(file.bytes.clone()).file_name(file.file_name.clone());
        if let Some(mime) = &file.mime {
            part = part
                .mime_str(mime)
                .map_err(|e| GalleryError::Upload(format!("invalid mime type {mime}: {e}")))?;
        }
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| GalleryError::Upload(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(status = %status, "upload rejected");
            return Err(GalleryError::Upload(format!("status {status}")));
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| GalleryError::Upload(format!("invalid response: {e}")))?;

        let url = body
            .url
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| GalleryError::Upload("response has no url".to_string()))?;

        tracing::debug!(url = %url, "file uploaded");
        Ok(url)
    }
}
