//! Application state: the loaded collection, selection, form and status.
//!
//! [`Store`] owns everything one editing session mutates. It talks to the
//! gallery through a [`GalleryService`] and never branches on "live" versus
//! "mock" itself; the service's [`WriteSync`] decides whether a save reloads
//! the collection or is mirrored locally.
//!
//! Store operations return typed errors and leave the status line alone.
//! Translating outcomes into user-facing messages is the job of
//! [`handle_event`](crate::app::handle_event).
//!
//! # State Components
//!
//! - **Entries**: the collection, always in canonical order
//! - **Selection**: id of the entry being edited, if any
//! - **Form**: raw edit fields, detached from the collection until saved
//! - **Search query**: applied on demand by [`Store::visible_entries`]
//! - **Status**: last message shown to the user

use crate::app::status::{self, Status};
use crate::domain::error::{GalleryError, Result};
use crate::domain::{filter_entries, sort_entries, Entry, MediaKind};
use crate::form::FormState;
use crate::infrastructure::resolve_media_src;
use crate::service::{GalleryService, UploadFile, WriteSync};
use crate::ui::viewmodel::{ListItem, ListView, META_SEPARATOR, MISSING_ID_LABEL, NO_MATCHES};

/// Central state container for one editing session.
pub struct Store {
    service: Box<dyn GalleryService>,

    /// Loaded entries in canonical order.
    entries: Vec<Entry>,

    /// Id of the selected entry.
    ///
    /// Not guaranteed to be present in `entries`: a reload or a remote delete
    /// in live mode can leave it dangling until the next selection.
    selected_id: Option<String>,

    /// Edit form contents.
    pub form: FormState,

    /// Current search query, untrimmed as typed.
    pub search_query: String,

    status: Status,

    /// Origin used to resolve relative media sources for display.
    server_origin: String,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("entries", &self.entries.len())
            .field("selected_id", &self.selected_id)
            .field("form", &self.form)
            .field("search_query", &self.search_query)
            .field("status", &self.status)
            .field("server_origin", &self.server_origin)
            .finish_non_exhaustive()
    }
}

impl Store {
    /// Creates an empty store. Nothing is fetched until [`Store::load`].
    pub fn new(service: Box<dyn GalleryService>) -> Self {
        Self {
            service,
            entries: Vec::new(),
            selected_id: None,
            form: FormState::default(),
            search_query: String::new(),
            status: Status::default(),
            server_origin: String::new(),
        }
    }

    #[must_use]
    pub fn with_server_origin(mut self, origin: impl Into<String>) -> Self {
        self.server_origin = origin.into();
        self
    }

    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    #[must_use]
    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    /// Returns the selected entry if it is still part of the collection.
    #[must_use]
    pub fn selected_entry(&self) -> Option<&Entry> {
        let id = self.selected_id.as_deref()?;
        self.entries.iter().find(|entry| entry.id == id)
    }

    #[must_use]
    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn set_status(&mut self, status: Status) {
        self.status = status;
    }

    #[must_use]
    pub fn server_origin(&self) -> &str {
        &self.server_origin
    }

    /// Entries matching the current search query, in canonical order.
    #[must_use]
    pub fn visible_entries(&self) -> Vec<&Entry> {
        filter_entries(&self.entries, &self.search_query)
    }

    /// Replaces the collection with the service's current contents.
    ///
    /// On success the collection is sorted canonically and the selection and
    /// form are cleared. On failure nothing changes.
    ///
    /// # Errors
    ///
    /// Returns [`GalleryError::Load`] from the service.
    #[tracing::instrument(level = "debug", skip_all)]
    pub async fn load(&mut self) -> Result<&[Entry]> {
        let mut entries = self.service.list().await?;
        sort_entries(&mut entries);

        tracing::debug!(count = entries.len(), "collection replaced");

        self.entries = entries;
        self.selected_id = None;
        self.form.clear();
        Ok(&self.entries)
    }

    /// Upserts one entry.
    ///
    /// With [`WriteSync::Reload`] the whole collection is reloaded afterwards,
    /// which also clears the selection. With [`WriteSync::Mirror`] the entry
    /// replaces its namesake (or is appended), the collection is re-sorted and
    /// the saved id becomes the selection.
    ///
    /// # Errors
    ///
    /// Returns [`GalleryError::Save`] if the upsert fails, or
    /// [`GalleryError::Load`] if the upsert succeeded but the follow-up reload
    /// did not.
    #[tracing::instrument(level = "debug", skip_all, fields(entry_id = %entry.id))]
    pub async fn save(&mut self, entry: Entry) -> Result<()> {
        self.service.upsert(&entry).await?;
        self.selected_id = Some(entry.id.clone());

        match self.service.write_sync() {
            WriteSync::Reload => {
                self.load().await?;
            }
            WriteSync::Mirror => {
                match self.entries.iter_mut().find(|existing| existing.id == entry.id) {
                    Some(existing) => *existing = entry,
                    None => self.entries.push(entry),
                }
                sort_entries(&mut self.entries);
            }
        }

        Ok(())
    }

    /// Validates the form and saves the resulting entry.
    ///
    /// # Errors
    ///
    /// Returns [`GalleryError::Validation`] without contacting the service
    /// when the id is blank; otherwise see [`Store::save`].
    pub async fn submit(&mut self) -> Result<()> {
        let entry = self.form.to_entry()?;
        self.save(entry).await
    }

    /// Deletes an entry by id and clears the selection and form.
    ///
    /// Only a mirroring service drops the entry from the local collection; a
    /// reloading one leaves it until the next [`Store::load`].
    ///
    /// # Errors
    ///
    /// Returns [`GalleryError::Delete`] from the service.
    #[tracing::instrument(level = "debug", skip_all, fields(entry_id = %id))]
    pub async fn remove(&mut self, id: &str) -> Result<()> {
        self.service.delete(id).await?;

        if self.service.write_sync() == WriteSync::Mirror {
            self.entries.retain(|entry| entry.id != id);
        }
        self.selected_id = None;
        self.form.clear();
        Ok(())
    }

    /// Deletes the selected entry.
    ///
    /// # Errors
    ///
    /// Returns [`GalleryError::Validation`] when nothing is selected, otherwise
    /// see [`Store::remove`].
    pub async fn delete_selected(&mut self) -> Result<()> {
        let Some(id) = self.selected_id.clone() else {
            return Err(GalleryError::Validation(status::NOTHING_SELECTED.to_string()));
        };
        self.remove(&id).await
    }

    /// Selects an entry of the collection and loads it into the form.
    ///
    /// Returns `false`, leaving state untouched, if no entry has that id.
    pub fn select(&mut self, id: &str) -> bool {
        let Some(entry) = self.entries.iter().find(|entry| entry.id == id) else {
            return false;
        };
        self.form = FormState::from_entry(entry);
        self.selected_id = Some(entry.id.clone());
        true
    }

    /// Starts a blank entry: no selection, empty form.
    pub fn new_entry(&mut self) {
        self.selected_id = None;
        self.form.clear();
    }

    /// Discards form edits.
    ///
    /// Re-projects the selected entry if it is still loaded, otherwise clears
    /// selection and form as [`Store::new_entry`] does.
    pub fn reset(&mut self) {
        match self.selected_entry().map(FormState::from_entry) {
            Some(form) => self.form = form,
            None => self.new_entry(),
        }
    }

    /// Uploads a file and returns its public location.
    ///
    /// # Errors
    ///
    /// Returns [`GalleryError::Upload`] when `file` is `None` or the service
    /// rejects the upload.
    #[tracing::instrument(level = "debug", skip_all)]
    pub async fn upload(&mut self, file: Option<UploadFile>) -> Result<String> {
        let file = file.ok_or_else(|| GalleryError::Upload("no file selected".to_string()))?;
        self.service.upload(&file).await
    }

    /// Uploads a file and writes its location into media row `row`.
    ///
    /// # Errors
    ///
    /// Returns [`GalleryError::Upload`] if the row does not exist (checked
    /// before anything is sent) or the upload fails.
    pub async fn upload_to_row(&mut self, row: usize, file: Option<UploadFile>) -> Result<String> {
        if row >= self.form.media.len() {
            return Err(GalleryError::Upload(format!("no media row {row}")));
        }

        let location = self.upload(file).await?;
        self.form.set_media_src(row, location.clone());
        Ok(location)
    }

    /// Computes the list view for the current query and selection.
    #[must_use]
    pub fn compute_list_view(&self) -> ListView {
        let visible = self.visible_entries();
        let query = self.search_query.trim();

        let items: Vec<ListItem> = visible.iter().map(|entry| self.list_item(entry)).collect();

        ListView {
            empty_state: items.is_empty().then(|| NO_MATCHES.to_string()),
            items,
            total: self.entries.len(),
            query: (!query.is_empty()).then(|| query.to_string()),
        }
    }

    fn list_item(&self, entry: &Entry) -> ListItem {
        let label = if entry.id.is_empty() {
            MISSING_ID_LABEL.to_string()
        } else {
            entry.id.clone()
        };

        let meta = [Some(entry.date.as_str()), entry.source_label()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(META_SEPARATOR);

        let thumbnail = entry
            .cover()
            .filter(|cover| cover.kind == MediaKind::Image)
            .and_then(|cover| resolve_media_src(&self.server_origin, &cover.src));

        ListItem {
            id: entry.id.clone(),
            label,
            meta,
            thumbnail,
            is_active: self.selected_id.as_deref() == Some(entry.id.as_str()),
        }
    }
}
