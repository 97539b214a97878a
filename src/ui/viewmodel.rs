//! View model types representing renderable list state.
//!
//! View models are computed from the store with `Store::compute_list_view()`
//! and consumed by the renderer. They hold display-ready strings only: the id
//! label, a meta line, a resolved thumbnail URL and the selection flag.

/// Text shown for entries whose id is empty.
pub const MISSING_ID_LABEL: &str = "(no id)";

/// Message shown when the search matches nothing.
pub const NO_MATCHES: &str = "No matching entries.";

/// Separator between date and source label in the meta line.
pub const META_SEPARATOR: &str = " · ";

/// Complete list view model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    /// Entries passing the current search, in canonical order.
    pub items: Vec<ListItem>,

    /// Total number of loaded entries, before filtering.
    pub total: usize,

    /// Current search query, if any.
    pub query: Option<String>,

    /// Empty state message when no item matches.
    pub empty_state: Option<String>,
}

/// Display information for one entry row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    /// Entry id, needed to act on the row.
    pub id: String,

    /// Id as displayed, with a placeholder for empty ids.
    pub label: String,

    /// `date · source label`, omitting absent parts.
    pub meta: String,

    /// Absolute URL of the cover image, if the entry has one.
    ///
    /// Entries whose only media are videos have no thumbnail.
    pub thumbnail: Option<String>,

    /// Whether this row is the selected entry.
    pub is_active: bool,
}
