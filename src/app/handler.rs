//! Event handling and status reporting.
//!
//! [`handle_event`] is the single entry point a front end drives. It applies
//! the event to the [`Store`], then writes the outcome into the status line:
//! a success message, or the message that matches the failing operation. No
//! error escapes without a status update and a `warn` log.
//!
//! # Event Types
//!
//! - **Collection**: `Load`, `Search`
//! - **Selection**: `Select`, `NewEntry`, `Reset`
//! - **Form editing**: `EditField`, `AddMediaRow`, `RemoveMediaRow`, `SetMediaRow`
//! - **Persistence**: `Submit`, `Delete`, `Remove`
//! - **Upload**: `Upload`, `UploadToRow`

use crate::app::status::{self, Status};
use crate::app::Store;
use crate::domain::error::{GalleryError, Result};
use crate::domain::MediaKind;
use crate::form::FormField;
use crate::service::UploadFile;

/// User intents accepted by [`handle_event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Replaces the collection from the service.
    Load,
    /// Sets the search query.
    Search(String),
    /// Selects an entry by id and loads it into the form.
    Select(String),
    /// Clears selection and form for a new entry.
    NewEntry,
    /// Overwrites one text field of the form.
    EditField(FormField, String),
    AddMediaRow(MediaKind),
    RemoveMediaRow(usize),
    /// Overwrites kind and source of an existing media row.
    SetMediaRow {
        index: usize,
        kind: MediaKind,
        src: String,
    },
    /// Validates the form and saves it.
    Submit,
    /// Deletes the selected entry.
    Delete,
    /// Deletes an entry by id, whether or not it is loaded.
    Remove(String),
    /// Discards form edits.
    Reset,
    /// Uploads a file without touching the form.
    Upload(Option<UploadFile>),
    /// Uploads a file and writes its location into media row `row`.
    UploadToRow {
        row: usize,
        file: Option<UploadFile>,
    },
}

impl Event {
    fn name(&self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Search(_) => "search",
            Self::Select(_) => "select",
            Self::NewEntry => "new_entry",
            Self::EditField(..) => "edit_field",
            Self::AddMediaRow(_) => "add_media_row",
            Self::RemoveMediaRow(_) => "remove_media_row",
            Self::SetMediaRow { .. } => "set_media_row",
            Self::Submit => "submit",
            Self::Delete => "delete",
            Self::Remove(_) => "remove",
            Self::Reset => "reset",
            Self::Upload(_) => "upload",
            Self::UploadToRow { .. } => "upload_to_row",
        }
    }
}

/// Applies an event to the store and updates its status line.
///
/// Form-editing events that succeed leave the status untouched.
///
/// # Errors
///
/// Returns the error of the failed operation after it has been written into
/// the status line, so callers may ignore it when they only display state.
#[tracing::instrument(level = "debug", skip_all, fields(event = event.name()))]
pub async fn handle_event(store: &mut Store, event: Event) -> Result<()> {
    match event {
        Event::Load => {
            store.set_status(Status::info(status::LOADING));
            match store.load().await {
                Ok(entries) => {
                    tracing::info!(count = entries.len(), "entries loaded");
                    store.set_status(Status::info(status::LOADED));
                    Ok(())
                }
                Err(err) => fail(store, err),
            }
        }
        Event::Search(query) => {
            store.search_query = query;
            Ok(())
        }
        Event::Select(id) => {
            if store.select(&id) {
                tracing::debug!(entry_id = %id, "entry selected");
                store.set_status(Status::info(format!("Editing {id}.")));
                Ok(())
            } else {
                fail(store, GalleryError::Validation(format!("No entry with ID {id}.")))
            }
        }
        Event::NewEntry => {
            store.new_entry();
            store.set_status(Status::info(status::NEW_ENTRY));
            Ok(())
        }
        Event::EditField(field, value) => {
            store.form.set_field(field, value);
            Ok(())
        }
        Event::AddMediaRow(kind) => {
            store.form.add_media_row(kind);
            Ok(())
        }
        Event::RemoveMediaRow(index) => {
            if store.form.remove_media_row(index) {
                Ok(())
            } else {
                fail(store, missing_row(index))
            }
        }
        Event::SetMediaRow { index, kind, src } => {
            if store.form.set_media_kind(index, kind) && store.form.set_media_src(index, src) {
                Ok(())
            } else {
                fail(store, missing_row(index))
            }
        }
        Event::Submit => {
            // A reload clears the selection, so take the id from the form.
            let entry_id = store.form.id.trim().to_string();
            match store.submit().await {
                Ok(()) => {
                    tracing::info!(entry_id = %entry_id, "entry saved");
                    store.set_status(Status::info(status::SAVED));
                    Ok(())
                }
                // The write went through; only the follow-up reload failed.
                Err(err @ GalleryError::Load(_)) => {
                    fail_with(store, err, status::SAVED_RELOAD_FAILED)
                }
                Err(err) => fail(store, err),
            }
        }
        Event::Delete => match store.delete_selected().await {
            Ok(()) => {
                tracing::info!("entry deleted");
                store.set_status(Status::info(status::DELETED));
                Ok(())
            }
            Err(err) => fail(store, err),
        },
        Event::Remove(id) => match store.remove(&id).await {
            Ok(()) => {
                tracing::info!(entry_id = %id, "entry deleted");
                store.set_status(Status::info(status::DELETED));
                Ok(())
            }
            Err(err) => fail(store, err),
        },
        Event::Reset => {
            store.reset();
            store.set_status(Status::info(status::RESET));
            Ok(())
        }
        Event::Upload(file) => {
            store.set_status(Status::info(status::UPLOADING));
            let outcome = store.upload(file).await;
            uploaded(store, outcome)
        }
        Event::UploadToRow { row, file } => {
            store.set_status(Status::info(status::UPLOADING));
            let outcome = store.upload_to_row(row, file).await;
            uploaded(store, outcome)
        }
    }
}

fn uploaded(store: &mut Store, outcome: Result<String>) -> Result<()> {
    match outcome {
        Ok(location) => {
            tracing::info!(location = %location, "file uploaded");
            store.set_status(Status::info(format!("{} {location}", status::UPLOADED)));
            Ok(())
        }
        Err(err) => fail(store, err),
    }
}

fn missing_row(index: usize) -> GalleryError {
    GalleryError::Validation(format!("No media row {index}."))
}

/// Writes the status message for `err`, logs it, and hands it back.
fn fail(store: &mut Store, err: GalleryError) -> Result<()> {
    let message = match &err {
        GalleryError::Load(_) => status::LOAD_FAILED.to_string(),
        GalleryError::Validation(message) => message.clone(),
        GalleryError::Delete(_) => status::DELETE_FAILED.to_string(),
        GalleryError::Upload(_) => status::UPLOAD_FAILED.to_string(),
        other => other.to_string(),
    };
    fail_with(store, err, message)
}

fn fail_with(store: &mut Store, err: GalleryError, message: impl Into<String>) -> Result<()> {
    tracing::warn!(error = %err, "operation failed");
    store.set_status(Status::error(message));
    Err(err)
}
