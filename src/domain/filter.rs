//! Client-side search over loaded entries.
//!
//! A query matches an entry when, after trimming, it is a case-insensitive
//! substring of the entry's haystack: id, date, source label and tags joined
//! by single spaces. There is no tokenization and no fuzzy matching.

use super::entry::Entry;

/// Builds the searchable text for an entry, skipping empty fields.
#[must_use]
pub fn haystack(entry: &Entry) -> String {
    std::iter::once(entry.id.as_str())
        .chain(std::iter::once(entry.date.as_str()))
        .chain(entry.source_label())
        .chain(entry.tags.iter().map(String::as_str))
        .filter(|field| !field.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Returns `true` if `entry` matches an already trimmed, lowercased needle.
fn matches_needle(entry: &Entry, needle: &str) -> bool {
    haystack(entry).to_lowercase().contains(needle)
}

/// Filters entries by a search query without touching the input.
///
/// A blank query returns every entry in input order.
///
/// ```
/// use gallery_admin::domain::{filter::filter_entries, Entry};
///
/// let entries = vec![
///     Entry::new("sunset-01").with_tags(["Landscape"]),
///     Entry::new("portrait-02"),
/// ];
///
/// let hits = filter_entries(&entries, "  SCAPE ");
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].id, "sunset-01");
/// assert_eq!(filter_entries(&entries, "   ").len(), 2);
/// ```
#[must_use]
pub fn filter_entries<'a>(entries: &'a [Entry], query: &str) -> Vec<&'a Entry> {
    let needle = query.trim().to_lowercase();

    let _span = tracing::debug_span!("filter_entries",
        total = entries.len(),
        query_len = needle.len()
    )
    .entered();

    if needle.is_empty() {
        return entries.iter().collect();
    }

    let filtered: Vec<&Entry> = entries
        .iter()
        .filter(|entry| matches_needle(entry, &needle))
        .collect();

    tracing::debug!(filtered_count = filtered.len(), "search filter applied");
    filtered
}
