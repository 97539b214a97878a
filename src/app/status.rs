//! User-facing status line.
//!
//! Every operation ends by writing a short message and an error flag, which the
//! presentation layer shows below the list and form.

pub const READY: &str = "Ready.";
pub const LOADING: &str = "Loading entries…";
pub const LOADED: &str = "Entries loaded.";
pub const LOAD_FAILED: &str = "Could not load entries.";
pub const NEW_ENTRY: &str = "Creating a new entry…";
pub const SAVED: &str = "Saved.";
pub const SAVED_RELOAD_FAILED: &str = "Saved, but could not reload entries.";
pub const NOTHING_SELECTED: &str = "No entry selected.";
pub const DELETED: &str = "Deleted.";
pub const DELETE_FAILED: &str = "Could not delete the entry.";
pub const RESET: &str = "Changes reset.";
pub const UPLOADING: &str = "Uploading file…";
pub const UPLOADED: &str = "Upload complete.";
pub const UPLOAD_FAILED: &str = "Upload failed.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub message: String,
    pub is_error: bool,
}

impl Status {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: false,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: true,
        }
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::info(READY)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}
