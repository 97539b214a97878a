//! In-memory gallery service.
//!
//! Stands in for the remote service when working offline or in tests. Writes
//! are applied to an in-process collection, and the store mirrors them into its
//! own loaded list instead of reloading ([`WriteSync::Mirror`]). The collection
//! can be seeded from a JSON file holding the same array the remote service
//! returns.
//!
//! # Seed File Format
//!
//! ```json
//! [
//!   { "id": "250913post1", "date": "2025-09-13", "images": ["/galleryimg/a.jpg"] },
//!   { "id": "250920post2", "media": [{ "type": "video", "src": "/galleryimg/b.mp4" }] }
//! ]
//! ```

use crate::domain::error::{GalleryError, Result};
use crate::domain::{sort_entries, Entry};
use crate::service::backend::{GalleryService, UploadFile, WriteSync};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct MemoryData {
    entries: Vec<Entry>,
    uploads: HashMap<String, Vec<u8>>,
}

/// In-process implementation of [`GalleryService`].
#[derive(Debug, Default)]
pub struct MemoryGallery {
    data: Mutex<MemoryData>,
}

impl MemoryGallery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a gallery holding `entries`, sorted canonically.
    #[must_use]
    pub fn with_entries(mut entries: Vec<Entry>) -> Self {
        sort_entries(&mut entries);
        Self {
            data: Mutex::new(MemoryData {
                entries,
                uploads: HashMap::new(),
            }),
        }
    }

    /// Seeds a gallery from a JSON array file.
    ///
    /// # Errors
    ///
    /// Returns [`GalleryError::Io`] if the file cannot be read and
    /// [`GalleryError::Load`] if it is not an array of entries.
    pub fn from_seed_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = ?path, "seeding in-memory gallery");

        let contents = std::fs::read_to_string(path)?;
        let entries: Vec<Entry> = serde_json::from_str(&contents)
            .map_err(|e| GalleryError::Load(format!("failed to parse seed file: {e}")))?;

        tracing::debug!(count = entries.len(), "seed entries loaded");
        Ok(Self::with_entries(entries))
    }

    /// Returns the bytes stored for an upload location, if any.
    #[must_use]
    pub fn uploaded(&self, location: &str) -> Option<Vec<u8>> {
        self.lock().ok()?.uploads.get(location).cloned()
    }

    fn lock(&self) -> std::result::Result<MutexGuard<'_, MemoryData>, String> {
        self.data
            .lock()
            .map_err(|e| format!("gallery state poisoned: {e}"))
    }
}

#[async_trait]
impl GalleryService for MemoryGallery {
    async fn list(&self) -> Result<Vec<Entry>> {
        let data = self.lock().map_err(GalleryError::Load)?;
        tracing::debug!(count = data.entries.len(), "listing in-memory entries");
        Ok(data.entries.clone())
    }

    async fn upsert(&self, entry: &Entry) -> Result<()> {
        let mut data = self.lock().map_err(GalleryError::Save)?;

        if let Some(existing) = data.entries.iter_mut().find(|e| e.id == entry.id) {
            tracing::debug!(entry_id = %entry.id, "replacing in-memory entry");
            *existing = entry.clone();
        } else {
            tracing::debug!(entry_id = %entry.id, "appending in-memory entry");
            data.entries.push(entry.clone());
        }
        sort_entries(&mut data.entries);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut data = self.lock().map_err(GalleryError::Delete)?;

        let before = data.entries.len();
        data.entries.retain(|e| e.id != id);
        if data.entries.len() == before {
            return Err(GalleryError::Delete(format!("entry not found: {id}")));
        }

        tracing::debug!(entry_id = %id, "deleted in-memory entry");
        Ok(())
    }

    async fn upload(&self, file: &UploadFile) -> Result<String> {
        let name = file.file_name.trim();
        if name.is_empty() {
            return Err(GalleryError::Upload("file has no name".to_string()));
        }

        let mut data = self.lock().map_err(GalleryError::Upload)?;
        let location = format!("/uploads/{}-{name}", data.uploads.len() + 1);
        data.uploads.insert(location.clone(), file.bytes.clone());

        tracing::debug!(location = %location, size = file.bytes.len(), "stored in-memory upload");
        Ok(location)
    }

    fn write_sync(&self) -> WriteSync {
        WriteSync::Mirror
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(entries: &[Entry]) -> Vec<&str> {
        entries.iter().map(|e| e.id.as_str()).collect()
    }

    #[tokio::test]
    async fn upsert_replaces_existing_or_appends_then_sorts() {
        let gallery = MemoryGallery::with_entries(vec![
            Entry::new("a").with_date("2024-01-01"),
            Entry::new("b").with_date("2024-02-01"),
        ]);

        gallery
            .upsert(&Entry::new("a").with_date("2024-03-01"))
            .await
            .unwrap();
        gallery.upsert(&Entry::new("c")).await.unwrap();

        let entries = gallery.list().await.unwrap();
        assert_eq!(ids(&entries), ["a", "b", "c"]);
        assert_eq!(entries[0].date, "2024-03-01");
    }

    #[tokio::test]
    async fn delete_of_unknown_id_fails() {
        let gallery = MemoryGallery::with_entries(vec![Entry::new("a")]);

        let err = gallery.delete("zzz").await.unwrap_err();

        assert!(matches!(err, GalleryError::Delete(_)));
        assert_eq!(gallery.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn delete_removes_entry() {
        let gallery = MemoryGallery::with_entries(vec![Entry::new("a"), Entry::new("b")]);

        gallery.delete("a").await.unwrap();

        assert_eq!(ids(&gallery.list().await.unwrap()), ["b"]);
    }

    #[tokio::test]
    async fn upload_keeps_bytes_under_returned_location() {
        let gallery = MemoryGallery::new();

        let first = gallery
            .upload(&UploadFile::new("a.jpg", vec![1, 2]))
            .await
            .unwrap();
        let second = gallery
            .upload(&UploadFile::new("a.jpg", vec![3]))
            .await
            .unwrap();

        assert_eq!(first, "/uploads/1-a.jpg");
        assert_eq!(second, "/uploads/2-a.jpg");
        assert_eq!(gallery.uploaded(&first), Some(vec![1, 2]));
        assert!(gallery
            .upload(&UploadFile::new("  ", vec![]))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn seed_file_is_read_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gallery.json");
        std::fs::write(
            &path,
            r#"[{"id":"b","date":"2024-01-01"},{"id":"a","date":"2024-01-01"},{"id":"c","date":"2024-06-01","images":["/c.jpg"]}]"#,
        )
        .unwrap();

        let gallery = MemoryGallery::from_seed_file(&path).unwrap();
        let entries = gallery.list().await.unwrap();

        assert_eq!(ids(&entries), ["c", "a", "b"]);
        assert_eq!(entries[0].images(), vec!["/c.jpg"]);
        assert_eq!(gallery.write_sync(), WriteSync::Mirror);
    }

    #[test]
    fn malformed_seed_file_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gallery.json");
        std::fs::write(&path, r#"{"not":"an array"}"#).unwrap();

        let err = MemoryGallery::from_seed_file(&path).unwrap_err();

        assert!(matches!(err, GalleryError::Load(_)));
    }
}
