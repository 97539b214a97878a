//! Gallery service abstraction.
//!
//! This module defines the [`GalleryService`] trait that abstracts over where
//! entries live. The store only talks to this trait, so switching between the
//! remote REST service and the in-memory mock is a matter of constructing a
//! different implementation.
//!
//! # Design
//!
//! The trait mirrors the four remote calls the store makes and nothing more:
//! list, upsert, delete by id, and file upload. Each method reports failures
//! with the error kind of its operation (`Load`, `Save`, `Delete`, `Upload`).

use crate::domain::error::{GalleryError, Result};
use crate::domain::Entry;
use async_trait::async_trait;
use std::path::Path;

/// How the store observes its own writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteSync {
    /// Reload the whole collection after a save so server-side
    /// canonicalization shows up.
    #[default]
    Reload,
    /// Apply the write to the loaded collection directly.
    Mirror,
}

/// A file picked for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
    /// MIME type, if known.
    pub mime: Option<String>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
            mime: None,
        }
    }

    #[must_use]
    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }

    /// Reads a file from disk, guessing the MIME type from its extension.
    ///
    /// # Errors
    ///
    /// Returns [`GalleryError::Io`] if the file cannot be read and
    /// [`GalleryError::Upload`] if the path has no file name.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| GalleryError::Upload(format!("not a file path: {}", path.display())))?
            .to_string();

        let bytes = tokio::fs::read(path).await?;
        let mime = guess_mime(&file_name).map(String::from);

        tracing::debug!(file_name = %file_name, size = bytes.len(), "read upload file");

        Ok(Self {
            file_name,
            bytes,
            mime,
        })
    }
}

/// Maps common image and video extensions to MIME types.
fn guess_mime(file_name: &str) -> Option<&'static str> {
    let (_, ext) = file_name.rsplit_once('.')?;
    let mime = match ext.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "avif" => "image/avif",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        _ => return None,
    };
    Some(mime)
}

/// Abstraction over the collection of gallery entries.
///
/// # Implementations
///
/// - [`crate::service::HttpGallery`]: remote REST service (live mode)
/// - [`crate::service::MemoryGallery`]: in-process collection (mock mode)
#[async_trait]
pub trait GalleryService: Send + Sync {
    /// Fetches every entry, in service order.
    ///
    /// # Errors
    ///
    /// Returns [`GalleryError::Load`] on transport failure, non-success
    /// status, or a body that is not an array of entries.
    async fn list(&self) -> Result<Vec<Entry>>;

    /// Creates or replaces the entry keyed by `entry.id`.
    ///
    /// # Errors
    ///
    /// Returns [`GalleryError::Save`] if the write is not acknowledged.
    async fn upsert(&self, entry: &Entry) -> Result<()>;

    /// Deletes the entry with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`GalleryError::Delete`] if the delete is not acknowledged,
    /// including when the id does not exist.
    async fn delete(&self, id: &str) -> Result<()>;

    /// Uploads a media file and returns the location to store in a media row.
    ///
    /// # Errors
    ///
    /// Returns [`GalleryError::Upload`] if the upload fails or the response
    /// has no usable location.
    async fn upload(&self, file: &UploadFile) -> Result<String>;

    /// How writes through this service become visible to the store.
    fn write_sync(&self) -> WriteSync {
        WriteSync::Reload
    }
}
